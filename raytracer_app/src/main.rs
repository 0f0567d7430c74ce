//! Real-time ray tracer bootstrap application
//!
//! Brings the Vulkan subsystem up (instance creation, device selection),
//! reports what the driver offers, then runs the window event loop.
//! Rendering proper hangs off the bootstrapped context in later
//! milestones.

use glfw::{Action, Key, WindowEvent};
use ray_engine::core::config::{ApplicationConfig, Config};
use ray_engine::render::{
    AppDescriptor, DefaultDevicePolicy, DeviceClass, InstanceRequirements, VulkanContext, Window,
};

const WINDOW_WIDTH: u32 = 800;
const WINDOW_HEIGHT: u32 = 600;
const CONFIG_PATH: &str = "raytracer.toml";

fn main() {
    let (config, config_notice) = match ApplicationConfig::load_from_file(CONFIG_PATH) {
        Ok(config) => (config, format!("Loaded configuration from {CONFIG_PATH}")),
        Err(err) => (
            ApplicationConfig::default(),
            format!("Using default configuration ({err})"),
        ),
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(&config.engine.log_level),
    )
    .init();
    log::info!("{config_notice}");

    if let Err(err) = run(&config) {
        log::error!("Bootstrap failed: {err}");
        std::process::exit(1);
    }
}

fn run(config: &ApplicationConfig) -> Result<(), Box<dyn std::error::Error>> {
    config.validate()?;

    log::info!("Creating window...");
    let mut window = Window::new(
        &config.renderer.application_name,
        WINDOW_WIDTH,
        WINDOW_HEIGHT,
    )?;

    let descriptor = AppDescriptor::from_config(&config.renderer);
    let mut requirements = InstanceRequirements::from_config(&config.renderer);
    requirements.add_extensions(window.get_required_instance_extensions()?);
    if cfg!(target_os = "macos") {
        // MoltenVK is a portability translation layer, not a native driver.
        requirements.enable_portability();
    }

    log::info!("Creating Vulkan context...");
    let context = VulkanContext::new(&descriptor, &requirements, &DefaultDevicePolicy)?;

    let device = context.physical_device();
    log::info!("Rendering on {} ({})", device.name, device.class);
    if device.class != DeviceClass::DiscreteGpu {
        log::warn!("No discrete GPU selected; ray tracing performance will suffer");
    }

    run_loop(&mut window);
    Ok(())
}

fn run_loop(window: &mut Window) {
    while !window.should_close() {
        window.poll_events();

        let events: Vec<(f64, WindowEvent)> = window.flush_events().collect();
        for (_, event) in events {
            if let WindowEvent::Key(Key::Escape, _, Action::Press, _) = event {
                window.set_should_close(true);
            }
        }
    }
}
