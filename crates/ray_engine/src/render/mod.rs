//! # Rendering System
//!
//! Bootstrap layer for the renderer: window plumbing plus the Vulkan
//! instance/device initialization that the rest of the pipeline builds
//! on. The module hands applications a ready [`VulkanContext`] with a
//! bound physical device; swapchain and frame submission come later.

pub mod window;

/// Graphics backend implementations
///
/// Contains platform-specific rendering backend implementations.
/// Currently supports Vulkan with potential for additional backends in the future.
pub mod backends;

pub use backends::vulkan::{
    AppDescriptor, DefaultDevicePolicy, DeviceClass, InstanceRequirements,
    PhysicalDeviceDescriptor, SelectionPolicy, VulkanContext, VulkanError, VulkanResult,
};
pub use window::{Window, WindowError, WindowResult};
