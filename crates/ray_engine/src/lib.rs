//! # Ray Engine
//!
//! Bootstrap layer for a real-time ray tracer built on Vulkan.
//!
//! The crate brings the graphics subsystem up to a bound, selected
//! physical device: window plumbing through GLFW, instance creation with
//! capability validation, and policy-driven device selection. Everything
//! past that point (swapchain, pipelines, the ray tracer itself) builds
//! on the context this crate hands back.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ray_engine::core::config::ApplicationConfig;
//! use ray_engine::render::{
//!     AppDescriptor, DefaultDevicePolicy, InstanceRequirements, VulkanContext, Window,
//! };
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ApplicationConfig::default();
//!     let window = Window::new(&config.renderer.application_name, 800, 600)?;
//!
//!     let descriptor = AppDescriptor::from_config(&config.renderer);
//!     let mut requirements = InstanceRequirements::from_config(&config.renderer);
//!     requirements.add_extensions(window.get_required_instance_extensions()?);
//!
//!     let context = VulkanContext::new(&descriptor, &requirements, &DefaultDevicePolicy)?;
//!     println!("rendering on {}", context.physical_device().name);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod core;
pub mod render;

/// Common imports for engine users
pub mod prelude {
    pub use crate::core::config::{ApplicationConfig, Config, EngineConfig, RendererConfig};
    pub use crate::render::{
        AppDescriptor, DefaultDevicePolicy, DeviceClass, InstanceRequirements,
        PhysicalDeviceDescriptor, SelectionPolicy, VulkanContext, VulkanError, VulkanResult,
        Window, WindowError,
    };
}
