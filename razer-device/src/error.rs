//! Device interface error types

use thiserror::Error;

/// Errors from device operations
#[derive(Error, Debug)]
pub enum DeviceError {
    /// D-Bus transport or daemon-side error
    #[error("Bus error: {0}")]
    Bus(#[from] zbus::Error),

    /// Invalid parameter value
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Daemon returned unexpected response
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Device not found
    #[error("Device not found: {0}")]
    NotFound(String),

    /// Daemon manages no devices at all
    #[error("No Razer devices found.")]
    NoDevices,
}
