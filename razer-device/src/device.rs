//! Device directory and per-device operations

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::bus::{method, ChromaBus, MethodArgs};
use crate::effect::Effect;
use crate::error::DeviceError;
use crate::keys::KeyMatrix;

/// Enumerate the devices the daemon manages, in daemon order.
pub async fn devices(bus: Arc<dyn ChromaBus>) -> Result<Vec<Device>, DeviceError> {
    let serials = bus.list_devices().await?;
    debug!("Daemon reports {} device(s)", serials.len());

    Ok(serials
        .into_iter()
        .map(|name| Device::new(name, Arc::clone(&bus)))
        .collect())
}

/// A single device exposed by the daemon
#[derive(Clone)]
pub struct Device {
    name: String,
    bus: Arc<dyn ChromaBus>,
}

impl fmt::Debug for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Device").field("name", &self.name).finish()
    }
}

impl Device {
    pub fn new(name: impl Into<String>, bus: Arc<dyn ChromaBus>) -> Self {
        Self {
            name: name.into(),
            bus,
        }
    }

    /// Identifier the daemon uses for this device's object path
    pub fn name(&self) -> &str {
        &self.name
    }

    // === Queries ===

    /// Device type (e.g. "keyboard")
    pub async fn device_type(&self) -> Result<String, DeviceError> {
        self.bus.get_string(&self.name, method::GET_DEVICE_TYPE).await
    }

    /// Serial number
    pub async fn serial(&self) -> Result<String, DeviceError> {
        self.bus.get_string(&self.name, method::GET_SERIAL).await
    }

    /// Firmware version
    pub async fn firmware(&self) -> Result<String, DeviceError> {
        self.bus.get_string(&self.name, method::GET_FIRMWARE).await
    }

    /// Key matrix dimensions as (rows, columns)
    pub async fn matrix_dimensions(&self) -> Result<(usize, usize), DeviceError> {
        let dims = self
            .bus
            .get_int_array(&self.name, method::GET_MATRIX_DIMENSIONS)
            .await?;

        match dims.as_slice() {
            [rows, cols, ..] if *rows > 0 && *cols > 0 => Ok((*rows as usize, *cols as usize)),
            _ => Err(DeviceError::UnexpectedResponse(format!(
                "invalid matrix dimensions: {dims:?}"
            ))),
        }
    }

    /// Whether the device is in game mode
    pub async fn game_mode(&self) -> Result<bool, DeviceError> {
        self.bus.get_bool(&self.name, method::GET_GAME_MODE).await
    }

    /// Whether the device has dedicated macro keys
    pub async fn has_dedicated_macro_keys(&self) -> Result<bool, DeviceError> {
        self.bus
            .get_bool(&self.name, method::HAS_DEDICATED_MACRO_KEYS)
            .await
    }

    /// Current brightness (0-100 percent)
    pub async fn brightness(&self) -> Result<f64, DeviceError> {
        self.bus.get_double(&self.name, method::GET_BRIGHTNESS).await
    }

    // === Lighting ===

    /// Set brightness (0-100 percent)
    pub async fn set_brightness(&self, percent: f64) -> Result<(), DeviceError> {
        if !(0.0..=100.0).contains(&percent) {
            return Err(DeviceError::InvalidParameter(format!(
                "brightness must be 0-100, got {percent}"
            )));
        }
        debug!(device = %self.name, percent, "Setting brightness");
        self.bus
            .invoke(&self.name, method::SET_BRIGHTNESS, &MethodArgs::Double(percent))
            .await
    }

    /// Activate a hardware effect
    pub async fn set_effect(&self, effect: &Effect) -> Result<(), DeviceError> {
        let method = effect.method();
        debug!(device = %self.name, effect = %effect.kind, %method, "Setting effect");
        self.bus
            .invoke(&self.name, &method, &effect.arguments())
            .await
    }

    /// Switch the device to the custom frame sent via [`Device::set_keys`]
    pub async fn activate_custom(&self) -> Result<(), DeviceError> {
        self.bus
            .invoke(&self.name, method::SET_CUSTOM, &MethodArgs::None)
            .await
    }

    /// Fresh all-black matrix sized for this device
    pub async fn key_matrix(&self) -> Result<KeyMatrix, DeviceError> {
        let (rows, cols) = self.matrix_dimensions().await?;
        KeyMatrix::new(rows, cols)
    }

    /// Send every row of `keys`, then activate the custom frame.
    pub async fn set_keys(&self, keys: &KeyMatrix) -> Result<(), DeviceError> {
        for row in keys.row_messages() {
            self.bus
                .invoke(&self.name, method::SET_KEY_ROW, &MethodArgs::Bytes(row))
                .await?;
        }
        self.activate_custom().await
    }

    /// Gather everything worth printing about the device.
    ///
    /// Failed reads are logged and shown as zero values.
    pub async fn summary(&self) -> DeviceSummary {
        let device_type = self.device_type().await.unwrap_or_else(|e| {
            warn!("reading device type failed: {e}");
            String::new()
        });
        let serial = self.serial().await.unwrap_or_else(|e| {
            warn!("reading device serial failed: {e}");
            String::new()
        });
        let dimensions = self.matrix_dimensions().await.unwrap_or_else(|e| {
            warn!("reading matrix dimensions failed: {e}");
            (0, 0)
        });
        let brightness = self.brightness().await.unwrap_or_else(|e| {
            warn!("reading brightness failed: {e}");
            0.0
        });
        let firmware = self.firmware().await.unwrap_or_else(|e| {
            warn!("reading firmware version failed: {e}");
            String::new()
        });
        let game_mode = self.game_mode().await.unwrap_or_else(|e| {
            warn!("reading game mode failed: {e}");
            false
        });
        let macro_keys = self.has_dedicated_macro_keys().await.unwrap_or_else(|e| {
            warn!("reading macro keys failed: {e}");
            false
        });

        DeviceSummary {
            name: self.name.clone(),
            device_type,
            serial,
            rows: dimensions.0,
            cols: dimensions.1,
            brightness,
            firmware,
            game_mode,
            macro_keys,
        }
    }
}

/// Snapshot of a device's properties
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceSummary {
    pub name: String,
    pub device_type: String,
    pub serial: String,
    pub rows: usize,
    pub cols: usize,
    pub brightness: f64,
    pub firmware: String,
    pub game_mode: bool,
    pub macro_keys: bool,
}

impl fmt::Display for DeviceSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (type {}, serial: {})\n\t\
             Dimensions: {}x{}\n\t\
             Brightness: {:.2}%\n\t\
             Firmware: {}\n\t\
             GameMode: {}\n\t\
             MacroKeys: {}",
            self.name,
            self.device_type,
            self.serial,
            self.rows,
            self.cols,
            self.brightness,
            self.firmware,
            self.game_mode,
            self.macro_keys
        )
    }
}
