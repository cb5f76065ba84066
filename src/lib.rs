// lantern - lighting control for Razer keyboards
// Colors, themes, CPU meter and configuration on top of razer-device

pub mod color;
pub mod config;
pub mod cpu;
pub mod meter;
pub mod theme;

pub use config::Config;
pub use theme::{Swatch, Theme, ThemeError};
