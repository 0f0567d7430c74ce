//! Vulkan instance creation and ownership
//!
//! The instance is the process-wide connection to the graphics driver:
//! exactly one lives at a time, owned by the context that created it.
//! Platform-conditional needs (portability translation layers,
//! validation tooling) arrive here as data in [`InstanceRequirements`];
//! this module never branches on the compile target itself.

use std::ffi::{CStr, CString};

use ash::extensions::ext::DebugUtils;
use ash::{vk, Entry};

use super::capabilities;
use super::error::{VulkanError, VulkanResult};
use crate::core::config::RendererConfig;

/// Application identity reported to the driver at instance creation
#[derive(Debug, Clone)]
pub struct AppDescriptor {
    /// Application name
    pub name: String,
    /// Application version (major, minor, patch)
    pub version: (u32, u32, u32),
    /// Engine name
    pub engine_name: String,
    /// Engine version (major, minor, patch)
    pub engine_version: (u32, u32, u32),
    /// Vulkan API version the application targets
    pub api_version: u32,
}

impl Default for AppDescriptor {
    fn default() -> Self {
        Self {
            name: "Ray Engine Application".to_string(),
            version: (1, 0, 0),
            engine_name: "RayEngine".to_string(),
            engine_version: (1, 0, 0),
            api_version: vk::API_VERSION_1_0,
        }
    }
}

impl AppDescriptor {
    /// Build a descriptor from renderer configuration, keeping the
    /// default engine identity.
    pub fn from_config(config: &RendererConfig) -> Self {
        Self {
            name: config.application_name.clone(),
            version: config.application_version,
            ..Self::default()
        }
    }
}

/// Instance-level requirements, expressed as data.
///
/// The caller folds platform facts in once at startup (surface
/// extensions from the window, portability on translation-layer hosts,
/// validation from configuration) and hands the finished set to
/// [`VulkanInstance::new`].
#[derive(Debug, Clone, Default)]
pub struct InstanceRequirements {
    /// Instance extensions that must be present
    pub extensions: Vec<String>,
    /// Whether to set the enumerate-portability create flag
    pub portability_enumeration: bool,
    /// Whether to enable the Khronos validation layer
    pub validation: bool,
}

impl InstanceRequirements {
    /// Fold the configured validation toggle into a requirement set.
    pub fn from_config(config: &RendererConfig) -> Self {
        let mut requirements = Self::default();
        if config.validation_enabled() {
            requirements.validation = true;
            requirements.push_extension(DebugUtils::name());
        }
        requirements
    }

    /// Add extensions, skipping names already present.
    pub fn add_extensions<I>(&mut self, names: I)
    where
        I: IntoIterator<Item = String>,
    {
        for name in names {
            self.push_unique(name);
        }
    }

    /// Request the portability enumeration extension and create flag.
    ///
    /// Needed on hosts where the Vulkan implementation is a translation
    /// layer over another API (MoltenVK and friends).
    pub fn enable_portability(&mut self) {
        self.portability_enumeration = true;
        self.push_extension(vk::KhrPortabilityEnumerationFn::name());
    }

    fn push_extension(&mut self, name: &CStr) {
        self.push_unique(name.to_string_lossy().into_owned());
    }

    fn push_unique(&mut self, name: String) {
        if !self.extensions.contains(&name) {
            self.extensions.push(name);
        }
    }
}

/// Vulkan instance wrapper with RAII cleanup
pub struct VulkanInstance {
    entry: Entry,
    instance: ash::Instance,
    debug_utils: Option<(DebugUtils, vk::DebugUtilsMessengerEXT)>,
    destroyed: bool,
}

impl VulkanInstance {
    /// Create the process instance after validating `requirements`
    /// against the driver's extension catalog.
    ///
    /// Creation is all-or-nothing: a missing extension fails before any
    /// driver object exists, and a messenger failure destroys the
    /// just-created instance before the error returns.
    pub fn new(
        descriptor: &AppDescriptor,
        requirements: &InstanceRequirements,
    ) -> VulkanResult<Self> {
        let entry = unsafe { Entry::load() }
            .map_err(|e| VulkanError::LibraryLoad(e.to_string()))?;

        let available = capabilities::enumerate_instance_extensions(&entry, None)?;
        log::info!("{} instance extensions supported", available.len());
        for record in &available {
            log::debug!("  {} (v{})", record.name, record.spec_version);
        }

        if let Some(name) = capabilities::missing_extension(&available, &requirements.extensions) {
            return Err(VulkanError::MissingExtension {
                name: name.to_string(),
            });
        }

        let app_name_cstr = CString::new(descriptor.name.as_str()).unwrap();
        let engine_name_cstr = CString::new(descriptor.engine_name.as_str()).unwrap();
        let (major, minor, patch) = descriptor.version;
        let (engine_major, engine_minor, engine_patch) = descriptor.engine_version;
        let app_info = vk::ApplicationInfo::builder()
            .application_name(&app_name_cstr)
            .application_version(vk::make_api_version(0, major, minor, patch))
            .engine_name(&engine_name_cstr)
            .engine_version(vk::make_api_version(
                0,
                engine_major,
                engine_minor,
                engine_patch,
            ))
            .api_version(descriptor.api_version);

        let cstr_extensions: Vec<CString> = requirements
            .extensions
            .iter()
            .map(|ext| CString::new(ext.as_str()).unwrap())
            .collect();
        let extension_ptrs: Vec<*const i8> =
            cstr_extensions.iter().map(|ext| ext.as_ptr()).collect();

        let layer_names = if requirements.validation {
            vec![CString::new("VK_LAYER_KHRONOS_validation").unwrap()]
        } else {
            vec![]
        };
        let layer_ptrs: Vec<*const i8> = layer_names.iter().map(|name| name.as_ptr()).collect();

        let flags = if requirements.portability_enumeration {
            vk::InstanceCreateFlags::ENUMERATE_PORTABILITY_KHR
        } else {
            vk::InstanceCreateFlags::empty()
        };

        let create_info = vk::InstanceCreateInfo::builder()
            .application_info(&app_info)
            .enabled_extension_names(&extension_ptrs)
            .enabled_layer_names(&layer_ptrs)
            .flags(flags);

        let instance = unsafe {
            entry
                .create_instance(&create_info, None)
                .map_err(VulkanError::InstanceCreation)?
        };
        log::info!(
            "Vulkan instance created for {} {}.{}.{}",
            descriptor.name,
            major,
            minor,
            patch
        );

        let debug_utils = if requirements.validation {
            let loader = DebugUtils::new(&entry, &instance);
            match Self::setup_debug_messenger(&loader) {
                Ok(messenger) => Some((loader, messenger)),
                Err(err) => {
                    unsafe { instance.destroy_instance(None) };
                    return Err(err);
                }
            }
        } else {
            None
        };

        Ok(Self {
            entry,
            instance,
            debug_utils,
            destroyed: false,
        })
    }

    fn setup_debug_messenger(debug_utils: &DebugUtils) -> VulkanResult<vk::DebugUtilsMessengerEXT> {
        let create_info = vk::DebugUtilsMessengerCreateInfoEXT::builder()
            .message_severity(
                vk::DebugUtilsMessageSeverityFlagsEXT::WARNING
                    | vk::DebugUtilsMessageSeverityFlagsEXT::ERROR,
            )
            .message_type(
                vk::DebugUtilsMessageTypeFlagsEXT::GENERAL
                    | vk::DebugUtilsMessageTypeFlagsEXT::VALIDATION
                    | vk::DebugUtilsMessageTypeFlagsEXT::PERFORMANCE,
            )
            .pfn_user_callback(Some(debug_callback));

        unsafe {
            debug_utils
                .create_debug_utils_messenger(&create_info, None)
                .map_err(VulkanError::InstanceCreation)
        }
    }

    /// Vulkan entry point
    pub fn entry(&self) -> &Entry {
        &self.entry
    }

    /// Raw instance handle
    pub fn raw(&self) -> &ash::Instance {
        &self.instance
    }

    /// Destroy the instance.
    ///
    /// Idempotent: the second and later calls are no-ops, so teardown
    /// paths triggered by earlier failures never double-fault.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }

        unsafe {
            if let Some((loader, messenger)) = self.debug_utils.take() {
                loader.destroy_debug_utils_messenger(messenger, None);
            }
            self.instance.destroy_instance(None);
        }
        self.destroyed = true;
        log::debug!("Vulkan instance destroyed");
    }
}

impl Drop for VulkanInstance {
    fn drop(&mut self) {
        self.destroy();
    }
}

/// Debug callback for validation layers
unsafe extern "system" fn debug_callback(
    message_severity: vk::DebugUtilsMessageSeverityFlagsEXT,
    message_type: vk::DebugUtilsMessageTypeFlagsEXT,
    callback_data: *const vk::DebugUtilsMessengerCallbackDataEXT,
    _user_data: *mut std::ffi::c_void,
) -> vk::Bool32 {
    let callback_data = *callback_data;
    let message = CStr::from_ptr(callback_data.p_message).to_string_lossy();

    if message_severity >= vk::DebugUtilsMessageSeverityFlagsEXT::ERROR {
        log::error!("[Vulkan] {:?} - {}", message_type, message);
    } else if message_severity >= vk::DebugUtilsMessageSeverityFlagsEXT::WARNING {
        log::warn!("[Vulkan] {:?} - {}", message_type, message);
    } else {
        log::debug!("[Vulkan] {:?} - {}", message_type, message);
    }

    vk::FALSE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_toggle_adds_debug_extension() {
        let config = RendererConfig::default().with_validation(true);
        let requirements = InstanceRequirements::from_config(&config);
        assert!(requirements.validation);
        assert!(requirements
            .extensions
            .iter()
            .any(|name| name == "VK_EXT_debug_utils"));

        let config = config.with_validation(false);
        let requirements = InstanceRequirements::from_config(&config);
        assert!(!requirements.validation);
        assert!(requirements.extensions.is_empty());
    }

    #[test]
    fn test_portability_is_added_once() {
        let mut requirements = InstanceRequirements::default();
        requirements.enable_portability();
        requirements.enable_portability();

        assert!(requirements.portability_enumeration);
        assert_eq!(
            requirements.extensions,
            vec!["VK_KHR_portability_enumeration".to_string()]
        );
    }

    #[test]
    fn test_surface_extensions_are_deduplicated() {
        let mut requirements = InstanceRequirements::default();
        requirements.add_extensions([
            "VK_KHR_surface".to_string(),
            "VK_KHR_surface".to_string(),
        ]);
        requirements.add_extensions([
            "VK_KHR_surface".to_string(),
            "VK_KHR_xcb_surface".to_string(),
        ]);

        assert_eq!(requirements.extensions.len(), 2);
    }

    #[test]
    fn test_default_descriptor_identity() {
        let descriptor = AppDescriptor::default();
        assert_eq!(descriptor.engine_name, "RayEngine");
        assert_eq!(descriptor.api_version, vk::API_VERSION_1_0);
    }

    #[test]
    fn test_descriptor_from_config() {
        let config = RendererConfig::new("RealTimeRayTracer").with_version(0, 2, 0);
        let descriptor = AppDescriptor::from_config(&config);
        assert_eq!(descriptor.name, "RealTimeRayTracer");
        assert_eq!(descriptor.version, (0, 2, 0));
        assert_eq!(descriptor.engine_name, "RayEngine");
    }
}
