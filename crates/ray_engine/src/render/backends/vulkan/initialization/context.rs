//! Vulkan context lifecycle
//!
//! Composes instance creation and device selection into one scoped
//! object. Construction is all-or-nothing; teardown runs in reverse
//! acquisition order on every exit path.

use ash::Entry;

use super::device::{self, PhysicalDeviceDescriptor, SelectionPolicy};
use super::error::VulkanResult;
use super::instance::{AppDescriptor, InstanceRequirements, VulkanInstance};

/// Main Vulkan context owning the instance and the selected device
pub struct VulkanContext {
    physical_device: PhysicalDeviceDescriptor,
    // Declared last: fields drop in declaration order, so the instance
    // outlives everything derived from it during teardown.
    instance: VulkanInstance,
}

impl VulkanContext {
    /// Bring the graphics subsystem up: create the instance, then
    /// select a physical device against it.
    ///
    /// If selection fails, the just-created instance is destroyed before
    /// the error reaches the caller.
    pub fn new(
        descriptor: &AppDescriptor,
        requirements: &InstanceRequirements,
        policy: &dyn SelectionPolicy,
    ) -> VulkanResult<Self> {
        let instance = VulkanInstance::new(descriptor, requirements)?;

        // An Err here drops `instance`, destroying it on the way out.
        let physical_device = device::select_physical_device(instance.raw(), policy)?;

        Ok(Self {
            physical_device,
            instance,
        })
    }

    /// Vulkan entry point
    pub fn entry(&self) -> &Entry {
        self.instance.entry()
    }

    /// Raw instance handle
    pub fn instance(&self) -> &ash::Instance {
        self.instance.raw()
    }

    /// The selected physical device
    ///
    /// The descriptor is a value snapshot; the handle inside it remains
    /// valid for as long as this context lives.
    pub fn physical_device(&self) -> &PhysicalDeviceDescriptor {
        &self.physical_device
    }
}
