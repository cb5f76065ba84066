//! Read-only command handlers.

use super::{connect, CommandResult};
use lantern::theme::{Theme, NAMED_PALETTES};
use razer_device::{devices, Effect, EffectType, RgbColor};

/// Print a summary of every device
pub async fn list() -> CommandResult {
    let found = devices(connect().await?).await?;

    if found.is_empty() {
        println!("No Razer devices found.");
        return Ok(());
    }

    for device in &found {
        println!("{}", device.summary().await);
    }
    Ok(())
}

/// Print effect names and the daemon method each one calls
pub fn effects() {
    for kind in EffectType::ALL {
        let method = Effect::new(kind, RgbColor::BLACK, RgbColor::BLACK).method();
        let dual = if kind.is_dual() { " (uses --secondary)" } else { "" };
        println!("  {:<16} {method}{dual}", kind.name());
    }
}

/// Print built-in theme names
pub fn themes() {
    for name in Theme::builtin_names() {
        match NAMED_PALETTES.iter().find(|p| p.name == name) {
            Some(p) => {
                let colors: Vec<String> = p.colors.iter().map(|(_, c)| c.to_string()).collect();
                println!("  {name:<10} {}", colors.join(" "));
            }
            None => println!("  {name}"),
        }
    }
    println!("  <any CSS color name, e.g. 'teal'>");
}
