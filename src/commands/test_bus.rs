//! In-memory daemon for exercising the command handlers.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use razer_device::{method, ChromaBus, Device, DeviceError, MethodArgs, RgbColor};

/// Answers reads from fixed values and records every setter call
pub struct RecordingBus {
    dimensions: Vec<i32>,
    brightness: f64,
    /// Cleared when a frame is activated
    stop: Option<Arc<AtomicBool>>,
    calls: Mutex<Vec<(String, MethodArgs)>>,
}

impl RecordingBus {
    pub fn new(rows: i32, cols: i32) -> Self {
        Self {
            dimensions: vec![rows, cols],
            brightness: 0.0,
            stop: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_brightness(mut self, brightness: f64) -> Self {
        self.brightness = brightness;
        self
    }

    /// Clear `flag` on the first `setCustom`
    pub fn stopping(mut self, flag: Arc<AtomicBool>) -> Self {
        self.stop = Some(flag);
        self
    }

    pub fn calls(&self) -> Vec<(String, MethodArgs)> {
        self.calls.lock().unwrap().clone()
    }

    /// Rows of every frame, each frame closed by `setCustom`
    pub fn frames(&self) -> Vec<Vec<Vec<u8>>> {
        let mut frames = Vec::new();
        let mut rows = Vec::new();

        for (name, args) in self.calls() {
            match (name.as_str(), args) {
                (method::SET_KEY_ROW, MethodArgs::Bytes(bytes)) => rows.push(bytes),
                (method::SET_CUSTOM, MethodArgs::None) => frames.push(std::mem::take(&mut rows)),
                (name, args) => panic!("unexpected call {name} {args:?}"),
            }
        }
        assert!(rows.is_empty(), "rows sent without setCustom");
        frames
    }
}

#[async_trait]
impl ChromaBus for RecordingBus {
    async fn list_devices(&self) -> Result<Vec<String>, DeviceError> {
        Ok(vec!["PM0001".into()])
    }

    async fn get_string(&self, _: &str, _: &str) -> Result<String, DeviceError> {
        Ok(String::new())
    }

    async fn get_bool(&self, _: &str, _: &str) -> Result<bool, DeviceError> {
        Ok(false)
    }

    async fn get_double(&self, _: &str, _: &str) -> Result<f64, DeviceError> {
        Ok(self.brightness)
    }

    async fn get_int_array(&self, _: &str, _: &str) -> Result<Vec<i32>, DeviceError> {
        Ok(self.dimensions.clone())
    }

    async fn invoke(&self, _: &str, method: &str, args: &MethodArgs) -> Result<(), DeviceError> {
        self.calls
            .lock()
            .unwrap()
            .push((method.to_string(), args.clone()));

        if method == method::SET_CUSTOM {
            if let Some(flag) = &self.stop {
                flag.store(false, Ordering::SeqCst);
            }
        }
        Ok(())
    }
}

/// Device named `name` on `bus`
pub fn device(bus: &Arc<RecordingBus>, name: &str) -> Device {
    let bus: Arc<dyn ChromaBus> = bus.clone();
    Device::new(name, bus)
}

/// Color of `(row, col)` in a frame of row messages
pub fn key_color(frame: &[Vec<u8>], row: usize, col: usize) -> RgbColor {
    let rgb = &frame[row][3 + col * 3..6 + col * 3];
    RgbColor::new(rgb[0], rgb[1], rgb[2])
}
