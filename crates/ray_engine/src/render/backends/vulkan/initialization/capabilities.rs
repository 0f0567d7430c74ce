//! Instance capability queries
//!
//! Read-only catalog of the extensions the host driver advertises.
//! Queries have no side effects and may run concurrently; the driver
//! serializes read access internally.

use std::ffi::CStr;

use ash::Entry;

use super::error::{VulkanError, VulkanResult};

/// An instance extension advertised by the driver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionRecord {
    /// Extension name, e.g. `VK_KHR_surface`
    pub name: String,
    /// Extension spec revision
    pub spec_version: u32,
}

/// List the instance extensions available on this host.
///
/// `layer` restricts the query to extensions provided by that layer;
/// `None` returns driver-provided extensions only. Zero extensions is a
/// valid result, not an error.
pub fn enumerate_instance_extensions(
    entry: &Entry,
    layer: Option<&CStr>,
) -> VulkanResult<Vec<ExtensionRecord>> {
    let properties = entry
        .enumerate_instance_extension_properties(layer)
        .map_err(VulkanError::DriverQuery)?;

    let records = properties
        .iter()
        .map(|props| {
            let name = unsafe { CStr::from_ptr(props.extension_name.as_ptr()) };
            ExtensionRecord {
                name: name.to_string_lossy().into_owned(),
                spec_version: props.spec_version,
            }
        })
        .collect();

    Ok(records)
}

/// Find the first entry of `required` that `available` does not contain.
pub fn missing_extension<'a>(
    available: &[ExtensionRecord],
    required: &'a [String],
) -> Option<&'a str> {
    required
        .iter()
        .map(String::as_str)
        .find(|name| !available.iter().any(|record| record.name == *name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str) -> ExtensionRecord {
        ExtensionRecord {
            name: name.to_string(),
            spec_version: 1,
        }
    }

    #[test]
    fn test_subset_of_available_is_satisfied() {
        let available = vec![
            record("VK_KHR_surface"),
            record("VK_KHR_xcb_surface"),
            record("VK_EXT_debug_utils"),
        ];
        let required = vec![
            "VK_KHR_surface".to_string(),
            "VK_EXT_debug_utils".to_string(),
        ];

        assert_eq!(missing_extension(&available, &required), None);
    }

    #[test]
    fn test_absent_extension_is_named_exactly() {
        let available = vec![record("VK_KHR_surface")];
        let required = vec![
            "VK_KHR_surface".to_string(),
            "VK_KHR_wayland_surface".to_string(),
        ];

        assert_eq!(
            missing_extension(&available, &required),
            Some("VK_KHR_wayland_surface")
        );
    }

    #[test]
    fn test_no_requirements_always_satisfied() {
        assert_eq!(missing_extension(&[], &[]), None);

        let available = vec![record("VK_KHR_surface")];
        assert_eq!(missing_extension(&available, &[]), None);
    }

    #[test]
    fn test_empty_catalog_reports_first_requirement() {
        let required = vec!["VK_KHR_surface".to_string()];
        assert_eq!(missing_extension(&[], &required), Some("VK_KHR_surface"));
    }
}
