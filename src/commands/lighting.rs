//! Default command flow: brightness, then one of theme / effect / CPU meter /
//! static color.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use super::{open_device, setup_interrupt_handler, top, CommandResult};
use crate::cli::Cli;
use lantern::theme::{self, Theme, PALETTE_SIZE};
use lantern::Config;
use razer_device::{Device, Effect, EffectType, RgbColor};
use tracing::{debug, info, warn};

/// Pause between keys of the rainbow wipe
const RAINBOW_KEY_DELAY: Duration = Duration::from_millis(5);

/// Brightness applied when the device is dark and none was requested
const WAKE_BRIGHTNESS: f64 = 100.0;

/// What the run will do after brightness is settled
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Rainbow,
    Theme(Theme),
    Effect(EffectType),
    Top,
    Static,
}

/// Pick the action from the flags: theme, then effect, then top, else static.
pub fn choose_action(cli: &Cli) -> Result<Action, theme::ThemeError> {
    if let Some(name) = cli.theme.as_deref() {
        return Ok(match Theme::from_name(name)? {
            Theme::Rainbow => Action::Rainbow,
            other => Action::Theme(other),
        });
    }

    if let Some(name) = cli.effect.as_deref() {
        let kind = EffectType::from_name(name);
        if kind == EffectType::None && !name.eq_ignore_ascii_case("none") {
            warn!("Unknown effect '{name}', sending 'none'");
        }
        return Ok(Action::Effect(kind));
    }

    if cli.top {
        return Ok(Action::Top);
    }

    Ok(Action::Static)
}

/// Brightness to set, if any
pub fn brightness_to_set(requested: Option<f64>, current: f64) -> Option<f64> {
    match requested {
        Some(b) => Some(b),
        None if current == 0.0 => Some(WAKE_BRIGHTNESS),
        None => None,
    }
}

pub async fn run(cli: &Cli, config: &Config) -> CommandResult {
    let primary = config.primary()?;
    let secondary = config.secondary()?;
    let action = choose_action(cli)?;

    let device = open_device(config.device.as_deref()).await?;
    apply(&device, action, primary, secondary, config).await
}

/// Report the device, settle brightness, then carry out `action`
pub async fn apply(
    device: &Device,
    action: Action,
    primary: RgbColor,
    secondary: RgbColor,
    config: &Config,
) -> CommandResult {
    let summary = device.summary().await;
    println!("Found {summary}");

    if let Some(b) = brightness_to_set(config.brightness, summary.brightness) {
        info!("Setting brightness to {b:.0}%");
        device.set_brightness(b).await?;
    }

    match action {
        Action::Rainbow => {
            let running = setup_interrupt_handler();
            rainbow(device, &running, RAINBOW_KEY_DELAY).await
        }
        Action::Theme(theme) => apply_theme(device, &theme).await,
        Action::Effect(kind) => set_effect(device, kind, primary, secondary).await,
        Action::Top => top::run(device, config.top_interval()).await,
        Action::Static => set_effect(device, EffectType::Static, primary, secondary).await,
    }
}

async fn set_effect(
    device: &Device,
    kind: EffectType,
    primary: RgbColor,
    secondary: RgbColor,
) -> CommandResult {
    if kind.is_dual() {
        debug!("Effect {kind}: {primary} / {secondary}");
    } else {
        debug!("Effect {kind}: {primary}");
    }
    device
        .set_effect(&Effect::new(kind, primary, secondary))
        .await?;
    println!("Effect set: {kind}");
    Ok(())
}

/// Paint the key regions from a theme palette
async fn apply_theme(device: &Device, theme: &Theme) -> CommandResult {
    let mut keys = device.key_matrix().await?;
    if !keys.has_layout() {
        warn!(
            "No key layout for a {}x{} matrix, theme regions are empty",
            keys.rows(),
            keys.cols()
        );
    }

    let palette = theme.palette(PALETTE_SIZE);
    if theme.has_named_colors() {
        for swatch in &palette {
            println!("Color: {} {}", swatch.name, swatch.color);
        }
    }

    theme::apply_palette(&mut keys, &palette);
    device.set_keys(&keys).await?;
    Ok(())
}

/// Light the keyboard one key at a time, one palette color per row.
///
/// Stops early once `running` is cleared.
async fn rainbow(device: &Device, running: &AtomicBool, delay: Duration) -> CommandResult {
    let mut keys = device.key_matrix().await?;
    let palette = Theme::Rainbow.palette(keys.rows());

    for (row, swatch) in palette.iter().enumerate() {
        for col in 0..keys.cols() {
            if !running.load(Ordering::SeqCst) {
                info!("Rainbow interrupted");
                return Ok(());
            }
            keys.set_key(row, col, swatch.color)?;
            device.set_keys(&keys).await?;
            tokio::time::sleep(delay).await;
        }
    }
    Ok(())
}
