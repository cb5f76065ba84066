//! Command handlers for the CLI application.
//!
//! - `query`: read-only commands (list, effects, themes)
//! - `lighting`: the default flow (brightness, theme, effect, static color)
//! - `top`: CPU meter loop

pub mod lighting;
pub mod query;
pub mod top;

#[cfg(test)]
mod test_bus;

use razer_device::{devices, ChromaBus, Device, DeviceError, SessionBus};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Result type for command handlers
pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Connect to the daemon over the session bus
pub async fn connect() -> Result<Arc<dyn ChromaBus>, DeviceError> {
    Ok(Arc::new(SessionBus::connect().await?))
}

/// Pick a device: the one whose name matches `wanted`, else the first.
pub fn select_device(mut found: Vec<Device>, wanted: Option<&str>) -> Result<Device, DeviceError> {
    if found.is_empty() {
        return Err(DeviceError::NoDevices);
    }

    match wanted {
        None => Ok(found.swap_remove(0)),
        Some(name) => {
            let available: Vec<String> = found.iter().map(|d| d.name().to_string()).collect();
            found
                .into_iter()
                .find(|d| d.name() == name)
                .ok_or_else(|| {
                    DeviceError::NotFound(format!(
                        "{name} (available: {})",
                        available.join(", ")
                    ))
                })
        }
    }
}

/// Connect and open the requested (or first) device
pub async fn open_device(wanted: Option<&str>) -> Result<Device, DeviceError> {
    let bus = connect().await?;
    let device = select_device(devices(bus).await?, wanted)?;
    debug!(device = device.name(), "Selected device");
    Ok(device)
}

/// Set up a Ctrl-C handler that sets the given flag to false when triggered.
/// Returns the Arc<AtomicBool> for use in the main loop.
pub fn setup_interrupt_handler() -> Arc<AtomicBool> {
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = Arc::clone(&running);

    ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::SeqCst);
    })
    .ok();

    running
}
