// CLI definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use lantern::Config;

#[derive(Parser)]
#[command(name = "lantern")]
#[command(author, version, about = "Lighting control for Razer keyboards via the OpenRazer daemon")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Brightness (between 0 and 100)
    #[arg(short, long, value_parser = parse_brightness)]
    pub brightness: Option<f64>,

    /// Effect mode (static, reactive, wave, spectrum, breath[dual,random],
    /// starlight[dual,random], ripple[random])
    #[arg(short, long)]
    pub effect: Option<String>,

    /// Primary keyboard color [default: #ff0000]
    #[arg(short, long)]
    pub color: Option<String>,

    /// Secondary color, for 'dual' effect modes [default: #00ff00]
    #[arg(short, long)]
    pub secondary: Option<String>,

    /// Theme (rainbow, happy, warm, soft, random, monokai, ... or a CSS color name)
    #[arg(short, long)]
    pub theme: Option<String>,

    /// CPU meter mode: show CPU usage across the keyboard until Ctrl+C
    #[arg(long)]
    pub top: bool,

    /// Serial of the device to control (default: first device)
    #[arg(short, long)]
    pub device: Option<String>,

    /// Config file (default: ~/.config/lantern/config.toml)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Flags that may also come from the config file
    pub fn config_overrides(&self) -> Config {
        Config {
            color: self.color.clone(),
            secondary: self.secondary.clone(),
            brightness: self.brightness,
            device: self.device.clone(),
            top_interval_ms: None,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all devices known to the daemon
    #[command(visible_alias = "ls")]
    List,

    /// List effect names
    Effects,

    /// List built-in theme names
    Themes,
}

fn parse_brightness(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|_| format!("'{s}' is not a number"))?;
    if (0.0..=100.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("brightness must be between 0 and 100, got {value}"))
    }
}
