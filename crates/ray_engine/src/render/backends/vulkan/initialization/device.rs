//! Physical device enumeration and selection
//!
//! Devices are snapshotted into plain descriptors at enumeration time,
//! then ranked by a pluggable scoring policy. Hot-plug changes after the
//! snapshot are not tracked.

use std::ffi::CStr;
use std::fmt;

use ash::vk;

use super::error::{VulkanError, VulkanResult};

/// Hardware class reported by the driver for a physical device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceClass {
    /// Dedicated GPU
    DiscreteGpu,
    /// GPU embedded in the host CPU package
    IntegratedGpu,
    /// GPU exposed through a virtualization layer
    VirtualGpu,
    /// Software rasterizer running on the CPU
    Cpu,
    /// Anything the driver does not classify
    Other,
}

impl From<vk::PhysicalDeviceType> for DeviceClass {
    fn from(device_type: vk::PhysicalDeviceType) -> Self {
        match device_type {
            vk::PhysicalDeviceType::DISCRETE_GPU => Self::DiscreteGpu,
            vk::PhysicalDeviceType::INTEGRATED_GPU => Self::IntegratedGpu,
            vk::PhysicalDeviceType::VIRTUAL_GPU => Self::VirtualGpu,
            vk::PhysicalDeviceType::CPU => Self::Cpu,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::DiscreteGpu => "discrete GPU",
            Self::IntegratedGpu => "integrated GPU",
            Self::VirtualGpu => "virtual GPU",
            Self::Cpu => "CPU",
            Self::Other => "other",
        };
        write!(f, "{name}")
    }
}

/// Point-in-time snapshot of one device reported by the driver.
///
/// Descriptors are value copies: they own no driver resources and may be
/// discarded freely. The raw handle stays valid for the owning
/// instance's lifetime.
#[derive(Debug, Clone)]
pub struct PhysicalDeviceDescriptor {
    /// Raw device handle
    pub handle: vk::PhysicalDevice,
    /// Human-readable device name
    pub name: String,
    /// Supported Vulkan API version (packed)
    pub api_version: u32,
    /// Driver version (packed)
    pub driver_version: u32,
    /// PCI vendor id
    pub vendor_id: u32,
    /// PCI device id
    pub device_id: u32,
    /// Hardware class
    pub class: DeviceClass,
}

/// Scoring function mapping a device to a suitability score.
///
/// Higher wins; zero disqualifies the device outright. Policies needing
/// compute-only or ray-tracing-capable filtering inspect the descriptor
/// and score accordingly.
pub trait SelectionPolicy {
    /// Score one device
    fn score(&self, device: &PhysicalDeviceDescriptor) -> u32;
}

/// Default policy: prefer dedicated hardware, refuse software devices
pub struct DefaultDevicePolicy;

impl SelectionPolicy for DefaultDevicePolicy {
    fn score(&self, device: &PhysicalDeviceDescriptor) -> u32 {
        match device.class {
            DeviceClass::DiscreteGpu => 3,
            DeviceClass::IntegratedGpu => 2,
            DeviceClass::VirtualGpu => 1,
            DeviceClass::Cpu | DeviceClass::Other => 0,
        }
    }
}

/// Enumerate devices visible to `instance` and pick the best under
/// `policy`.
///
/// An empty enumeration and an enumeration where every device scores
/// zero both fail with [`VulkanError::NoSuitableDevice`]: present and
/// suitable are distinct conditions.
pub fn select_physical_device(
    instance: &ash::Instance,
    policy: &dyn SelectionPolicy,
) -> VulkanResult<PhysicalDeviceDescriptor> {
    let handles = unsafe {
        instance
            .enumerate_physical_devices()
            .map_err(VulkanError::DriverQuery)?
    };
    if handles.is_empty() {
        return Err(VulkanError::NoSuitableDevice);
    }

    let devices: Vec<PhysicalDeviceDescriptor> = handles
        .iter()
        .map(|&handle| describe_device(instance, handle))
        .collect();

    for device in &devices {
        log::info!(
            "Found {} ({}): API {}, driver {}, vendor 0x{:04x}, device 0x{:04x}",
            device.name,
            device.class,
            format_version(device.api_version),
            format_version(device.driver_version),
            device.vendor_id,
            device.device_id
        );
    }

    let selected = select_from(devices, policy)?;
    log::info!("Selected GPU: {}", selected.name);
    Ok(selected)
}

/// Pick the best descriptor under `policy`.
///
/// Deterministic for a fixed input order; ties keep the first-enumerated
/// descriptor. Enumeration order is a stable tiebreak, not a preference.
fn select_from(
    devices: Vec<PhysicalDeviceDescriptor>,
    policy: &dyn SelectionPolicy,
) -> VulkanResult<PhysicalDeviceDescriptor> {
    let mut best: Option<(u32, PhysicalDeviceDescriptor)> = None;

    for device in devices {
        let score = policy.score(&device);
        if score == 0 {
            continue;
        }
        match &best {
            Some((best_score, _)) if *best_score >= score => {}
            _ => best = Some((score, device)),
        }
    }

    best.map(|(_, device)| device)
        .ok_or(VulkanError::NoSuitableDevice)
}

fn describe_device(
    instance: &ash::Instance,
    handle: vk::PhysicalDevice,
) -> PhysicalDeviceDescriptor {
    let properties = unsafe { instance.get_physical_device_properties(handle) };
    let name = unsafe {
        CStr::from_ptr(properties.device_name.as_ptr())
            .to_string_lossy()
            .into_owned()
    };

    PhysicalDeviceDescriptor {
        handle,
        name,
        api_version: properties.api_version,
        driver_version: properties.driver_version,
        vendor_id: properties.vendor_id,
        device_id: properties.device_id,
        class: DeviceClass::from(properties.device_type),
    }
}

/// Format a packed Vulkan version as `major.minor.patch`
pub fn format_version(version: u32) -> String {
    format!(
        "{}.{}.{}",
        vk::api_version_major(version),
        vk::api_version_minor(version),
        vk::api_version_patch(version)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device(name: &str, class: DeviceClass) -> PhysicalDeviceDescriptor {
        PhysicalDeviceDescriptor {
            handle: vk::PhysicalDevice::null(),
            name: name.to_string(),
            api_version: vk::make_api_version(0, 1, 3, 0),
            driver_version: vk::make_api_version(0, 535, 113, 1),
            vendor_id: 0x10de,
            device_id: 0x2684,
            class,
        }
    }

    #[test]
    fn test_default_policy_prefers_discrete() {
        let devices = vec![
            device("llvmpipe", DeviceClass::Cpu),
            device("Intel Iris Xe", DeviceClass::IntegratedGpu),
            device("GeForce RTX 4090", DeviceClass::DiscreteGpu),
        ];

        let selected = select_from(devices, &DefaultDevicePolicy).unwrap();
        assert_eq!(selected.name, "GeForce RTX 4090");
        assert_eq!(selected.class, DeviceClass::DiscreteGpu);
    }

    #[test]
    fn test_empty_enumeration_is_unsuitable() {
        let result = select_from(Vec::new(), &DefaultDevicePolicy);
        assert!(matches!(result, Err(VulkanError::NoSuitableDevice)));
    }

    #[test]
    fn test_present_but_unsuitable_devices_are_rejected() {
        let devices = vec![
            device("mystery accelerator", DeviceClass::Other),
            device("llvmpipe", DeviceClass::Cpu),
        ];

        let result = select_from(devices, &DefaultDevicePolicy);
        assert!(matches!(result, Err(VulkanError::NoSuitableDevice)));
    }

    #[test]
    fn test_selection_is_deterministic_and_ties_keep_enumeration_order() {
        let devices = || {
            vec![
                device("Radeon RX 7900 XTX", DeviceClass::DiscreteGpu),
                device("GeForce RTX 4090", DeviceClass::DiscreteGpu),
            ]
        };

        let first = select_from(devices(), &DefaultDevicePolicy).unwrap();
        let second = select_from(devices(), &DefaultDevicePolicy).unwrap();
        assert_eq!(first.name, second.name);
        assert_eq!(first.name, "Radeon RX 7900 XTX");
    }

    #[test]
    fn test_custom_policy_overrides_class_ranking() {
        struct PreferIntegrated;
        impl SelectionPolicy for PreferIntegrated {
            fn score(&self, device: &PhysicalDeviceDescriptor) -> u32 {
                match device.class {
                    DeviceClass::IntegratedGpu => 2,
                    DeviceClass::DiscreteGpu => 1,
                    _ => 0,
                }
            }
        }

        let devices = vec![
            device("GeForce RTX 4090", DeviceClass::DiscreteGpu),
            device("Intel Iris Xe", DeviceClass::IntegratedGpu),
        ];

        let selected = select_from(devices, &PreferIntegrated).unwrap();
        assert_eq!(selected.class, DeviceClass::IntegratedGpu);
    }

    #[test]
    fn test_device_class_mapping() {
        assert_eq!(
            DeviceClass::from(vk::PhysicalDeviceType::DISCRETE_GPU),
            DeviceClass::DiscreteGpu
        );
        assert_eq!(
            DeviceClass::from(vk::PhysicalDeviceType::INTEGRATED_GPU),
            DeviceClass::IntegratedGpu
        );
        assert_eq!(
            DeviceClass::from(vk::PhysicalDeviceType::VIRTUAL_GPU),
            DeviceClass::VirtualGpu
        );
        assert_eq!(DeviceClass::from(vk::PhysicalDeviceType::CPU), DeviceClass::Cpu);
        assert_eq!(
            DeviceClass::from(vk::PhysicalDeviceType::OTHER),
            DeviceClass::Other
        );
    }

    #[test]
    fn test_format_version() {
        assert_eq!(format_version(vk::make_api_version(0, 1, 3, 250)), "1.3.250");
    }
}
