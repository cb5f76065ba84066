//! D-Bus plumbing for the OpenRazer daemon
//!
//! Bus name: `org.razer`
//! Root object: `/org/razer`
//! Device objects: `/org/razer/device/<serial>`

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Serialize, Serializer};
use tracing::{debug, trace};
use zbus::zvariant::{DynamicType, Signature, Type};

use crate::color::RgbColor;
use crate::error::DeviceError;

/// Well-known bus name of the daemon
pub const SERVICE: &str = "org.razer";

/// Object path of the device manager
pub const ROOT_PATH: &str = "/org/razer";

/// Object path of a single device
pub fn device_path(serial: &str) -> String {
    format!("{ROOT_PATH}/device/{serial}")
}

/// Daemon methods, as `interface.member`
pub mod method {
    // Device manager (root object)
    pub const GET_DEVICES: &str = "razer.devices.getDevices";

    // Misc queries
    pub const GET_DEVICE_TYPE: &str = "razer.device.misc.getDeviceType";
    pub const GET_SERIAL: &str = "razer.device.misc.getSerial";
    pub const GET_FIRMWARE: &str = "razer.device.misc.getFirmware";
    pub const GET_MATRIX_DIMENSIONS: &str = "razer.device.misc.getMatrixDimensions";
    pub const HAS_DEDICATED_MACRO_KEYS: &str = "razer.device.misc.hasDedicatedMacroKeys";
    pub const GET_GAME_MODE: &str = "razer.device.led.gamemode.getGameMode";

    // Brightness
    pub const GET_BRIGHTNESS: &str = "razer.device.lighting.brightness.getBrightness";
    pub const SET_BRIGHTNESS: &str = "razer.device.lighting.brightness.setBrightness";

    // Custom frame
    pub const SET_KEY_ROW: &str = "razer.device.lighting.chroma.setKeyRow";
    pub const SET_CUSTOM: &str = "razer.device.lighting.chroma.setCustom";

    /// Interface for the hardware effects
    pub const CHROMA: &str = "razer.device.lighting.chroma";
    /// Interface for the effects the daemon renders itself (ripple)
    pub const CUSTOM: &str = "razer.device.lighting.custom";
}

/// Split `interface.member` into its two halves.
pub fn split_method(method: &str) -> Result<(&str, &str), DeviceError> {
    match method.rsplit_once('.') {
        Some((interface, member)) if !interface.is_empty() && !member.is_empty() => {
            Ok((interface, member))
        }
        _ => Err(DeviceError::InvalidParameter(format!(
            "malformed method name: {method}"
        ))),
    }
}

/// Arguments of a setter call.
///
/// Each variant is one D-Bus signature the daemon accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum MethodArgs {
    /// No arguments
    None,
    /// `yyy`
    Rgb(RgbColor),
    /// `yyyy`: color then speed
    RgbSpeed(RgbColor, u8),
    /// `yyyyyy`
    DualRgb(RgbColor, RgbColor),
    /// `yyyy`: speed then color
    SpeedRgb(u8, RgbColor),
    /// `yyyyyyy`
    SpeedDualRgb(u8, RgbColor, RgbColor),
    /// `y`
    Speed(u8),
    /// `yyyd`: color then refresh rate
    RgbRefresh(RgbColor, f64),
    /// `d`
    Double(f64),
    /// `i`
    Direction(i32),
    /// `ay`
    Bytes(Vec<u8>),
}

impl Serialize for MethodArgs {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::None => ().serialize(serializer),
            Self::Rgb(c) => (c.r, c.g, c.b).serialize(serializer),
            Self::RgbSpeed(c, speed) => (c.r, c.g, c.b, *speed).serialize(serializer),
            Self::DualRgb(a, b) => (a.r, a.g, a.b, b.r, b.g, b.b).serialize(serializer),
            Self::SpeedRgb(speed, c) => (*speed, c.r, c.g, c.b).serialize(serializer),
            Self::SpeedDualRgb(speed, a, b) => {
                (*speed, a.r, a.g, a.b, b.r, b.g, b.b).serialize(serializer)
            }
            Self::Speed(speed) => (*speed,).serialize(serializer),
            Self::RgbRefresh(c, refresh) => (c.r, c.g, c.b, *refresh).serialize(serializer),
            Self::Double(v) => (*v,).serialize(serializer),
            Self::Direction(d) => (*d,).serialize(serializer),
            Self::Bytes(bytes) => (bytes,).serialize(serializer),
        }
    }
}

impl DynamicType for MethodArgs {
    fn signature(&self) -> Signature {
        let signature = match self {
            Self::None => <()>::SIGNATURE,
            Self::Rgb(_) => <(u8, u8, u8)>::SIGNATURE,
            Self::RgbSpeed(..) | Self::SpeedRgb(..) => <(u8, u8, u8, u8)>::SIGNATURE,
            Self::DualRgb(..) => <(u8, u8, u8, u8, u8, u8)>::SIGNATURE,
            Self::SpeedDualRgb(..) => <(u8, u8, u8, u8, u8, u8, u8)>::SIGNATURE,
            Self::Speed(_) => <(u8,)>::SIGNATURE,
            Self::RgbRefresh(..) => <(u8, u8, u8, f64)>::SIGNATURE,
            Self::Double(_) => <(f64,)>::SIGNATURE,
            Self::Direction(_) => <(i32,)>::SIGNATURE,
            Self::Bytes(_) => <(Vec<u8>,)>::SIGNATURE,
        };
        signature.clone()
    }
}

/// Transport to the daemon.
///
/// Reads are typed per reply signature so the trait stays object safe.
#[async_trait]
pub trait ChromaBus: Send + Sync {
    /// Serials of all devices the daemon manages
    async fn list_devices(&self) -> Result<Vec<String>, DeviceError>;

    /// Call a method returning `s`
    async fn get_string(&self, serial: &str, method: &str) -> Result<String, DeviceError>;

    /// Call a method returning `b`
    async fn get_bool(&self, serial: &str, method: &str) -> Result<bool, DeviceError>;

    /// Call a method returning `d`
    async fn get_double(&self, serial: &str, method: &str) -> Result<f64, DeviceError>;

    /// Call a method returning `ai`
    async fn get_int_array(&self, serial: &str, method: &str) -> Result<Vec<i32>, DeviceError>;

    /// Call a setter, ignoring any reply
    async fn invoke(
        &self,
        serial: &str,
        method: &str,
        args: &MethodArgs,
    ) -> Result<(), DeviceError>;
}

/// [`ChromaBus`] over the user's session bus.
pub struct SessionBus {
    conn: zbus::Connection,
}

impl SessionBus {
    /// Connect to the session bus
    pub async fn connect() -> Result<Self, DeviceError> {
        let conn = zbus::Connection::session().await?;
        debug!("Connected to session bus");
        Ok(Self { conn })
    }

    async fn send<B>(
        &self,
        path: &str,
        method: &str,
        body: &B,
    ) -> Result<zbus::Message, DeviceError>
    where
        B: Serialize + DynamicType,
    {
        let (interface, member) = split_method(method)?;
        trace!(path, method, "dbus call");
        let reply = self
            .conn
            .call_method(Some(SERVICE), path, Some(interface), member, body)
            .await?;
        Ok(reply)
    }

    async fn query<R>(&self, path: &str, method: &str) -> Result<R, DeviceError>
    where
        R: DeserializeOwned + Type,
    {
        let reply = self.send(path, method, &()).await?;
        Ok(reply.body().deserialize()?)
    }
}

#[async_trait]
impl ChromaBus for SessionBus {
    async fn list_devices(&self) -> Result<Vec<String>, DeviceError> {
        self.query(ROOT_PATH, method::GET_DEVICES).await
    }

    async fn get_string(&self, serial: &str, method: &str) -> Result<String, DeviceError> {
        self.query(&device_path(serial), method).await
    }

    async fn get_bool(&self, serial: &str, method: &str) -> Result<bool, DeviceError> {
        self.query(&device_path(serial), method).await
    }

    async fn get_double(&self, serial: &str, method: &str) -> Result<f64, DeviceError> {
        self.query(&device_path(serial), method).await
    }

    async fn get_int_array(&self, serial: &str, method: &str) -> Result<Vec<i32>, DeviceError> {
        self.query(&device_path(serial), method).await
    }

    async fn invoke(
        &self,
        serial: &str,
        method: &str,
        args: &MethodArgs,
    ) -> Result<(), DeviceError> {
        self.send(&device_path(serial), method, args).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zbus::zvariant::{serialized::Context, to_bytes, LE};

    const C1: RgbColor = RgbColor::new(1, 2, 3);
    const C2: RgbColor = RgbColor::new(4, 5, 6);

    /// Body signature (without the outer parentheses) and encoded bytes
    fn wire(args: &MethodArgs) -> (String, Vec<u8>) {
        let data = to_bytes(Context::new_dbus(LE, 0), args).unwrap();
        (args.signature().to_string_no_parens(), data.bytes().to_vec())
    }

    #[test]
    fn test_device_path() {
        assert_eq!(device_path("PM1234"), "/org/razer/device/PM1234");
    }

    #[test]
    fn test_split_method() {
        assert_eq!(
            split_method(method::GET_SERIAL).unwrap(),
            ("razer.device.misc", "getSerial")
        );
        assert_eq!(
            split_method(method::GET_DEVICES).unwrap(),
            ("razer.devices", "getDevices")
        );
    }

    #[test]
    fn test_split_method_rejects_malformed() {
        assert!(matches!(
            split_method("getSerial"),
            Err(DeviceError::InvalidParameter(_))
        ));
        assert!(split_method("razer.device.").is_err());
        assert!(split_method(".getSerial").is_err());
    }

    #[test]
    fn test_argument_signatures() {
        let cases = [
            (MethodArgs::None, ""),
            (MethodArgs::Rgb(C1), "yyy"),
            (MethodArgs::RgbSpeed(C1, 9), "yyyy"),
            (MethodArgs::DualRgb(C1, C2), "yyyyyy"),
            (MethodArgs::SpeedRgb(9, C1), "yyyy"),
            (MethodArgs::SpeedDualRgb(9, C1, C2), "yyyyyyy"),
            (MethodArgs::Speed(9), "y"),
            (MethodArgs::RgbRefresh(C1, 0.0), "yyyd"),
            (MethodArgs::Double(50.0), "d"),
            (MethodArgs::Direction(1), "i"),
            (MethodArgs::Bytes(vec![0, 0, 21]), "ay"),
        ];

        for (args, expected) in cases {
            assert_eq!(wire(&args).0, expected, "{args:?}");
        }
    }

    #[test]
    fn test_color_and_speed_order() {
        assert_eq!(wire(&MethodArgs::Rgb(C1)).1, [1, 2, 3]);
        assert_eq!(wire(&MethodArgs::RgbSpeed(C1, 9)).1, [1, 2, 3, 9]);
        assert_eq!(wire(&MethodArgs::SpeedRgb(9, C1)).1, [9, 1, 2, 3]);
        assert_eq!(wire(&MethodArgs::DualRgb(C1, C2)).1, [1, 2, 3, 4, 5, 6]);
        assert_eq!(
            wire(&MethodArgs::SpeedDualRgb(9, C1, C2)).1,
            [9, 1, 2, 3, 4, 5, 6]
        );
        assert_eq!(wire(&MethodArgs::Speed(9)).1, [9]);
        assert!(wire(&MethodArgs::None).1.is_empty());
    }

    #[test]
    fn test_numeric_arguments() {
        // double is 8-byte aligned after the color
        let mut refresh = vec![1, 2, 3, 0, 0, 0, 0, 0];
        refresh.extend_from_slice(&1.5f64.to_le_bytes());
        assert_eq!(wire(&MethodArgs::RgbRefresh(C1, 1.5)).1, refresh);

        assert_eq!(wire(&MethodArgs::Double(42.0)).1, 42.0f64.to_le_bytes());
        assert_eq!(wire(&MethodArgs::Direction(-1)).1, (-1i32).to_le_bytes());
    }

    #[test]
    fn test_byte_array_argument() {
        assert_eq!(
            wire(&MethodArgs::Bytes(vec![2, 0, 21])).1,
            [3, 0, 0, 0, 2, 0, 21]
        );
    }
}
