//! Vulkan backend implementation
//!
//! Only the initialization layer lives here for now: everything needed
//! to bring the API up to a live instance with a selected physical
//! device. Resources, rendering and state management hang off this
//! module as the renderer grows.

/// Vulkan initialization types (capabilities, instance, device, context)
pub mod initialization;

// Re-export core initialization types
pub use initialization::capabilities::{enumerate_instance_extensions, ExtensionRecord};
pub use initialization::context::VulkanContext;
pub use initialization::device::{
    select_physical_device, DefaultDevicePolicy, DeviceClass, PhysicalDeviceDescriptor,
    SelectionPolicy,
};
pub use initialization::error::{VulkanError, VulkanResult};
pub use initialization::instance::{AppDescriptor, InstanceRequirements, VulkanInstance};
