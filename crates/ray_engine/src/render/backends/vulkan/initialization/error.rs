//! Vulkan bootstrap error types

use ash::vk;
use thiserror::Error;

/// Vulkan bootstrap errors
///
/// Every variant is terminal for the bootstrap: nothing here is retried.
/// Retry policy, if any, belongs to the caller above the context.
#[derive(Error, Debug)]
pub enum VulkanError {
    /// The Vulkan loader library could not be loaded
    #[error("Failed to load Vulkan library: {0}")]
    LibraryLoad(String),

    /// A read-only driver query failed
    #[error("Driver query failed: {0:?}")]
    DriverQuery(vk::Result),

    /// A mandatory instance extension is absent on this host
    #[error("Required instance extension not available: {name}")]
    MissingExtension {
        /// Name of the absent extension
        name: String,
    },

    /// The driver rejected instance creation
    #[error("Instance creation failed: {0:?}")]
    InstanceCreation(vk::Result),

    /// No physical device passed the selection policy
    #[error("No suitable GPU found")]
    NoSuitableDevice,
}

/// Result type for Vulkan operations
pub type VulkanResult<T> = Result<T, VulkanError>;
