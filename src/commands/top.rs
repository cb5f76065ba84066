//! CPU meter loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use super::{setup_interrupt_handler, CommandResult};
use lantern::cpu::CpuSampler;
use lantern::meter;
use razer_device::Device;
use tracing::{info, trace};

/// Show CPU usage on the keyboard until Ctrl+C
pub async fn run(device: &Device, interval: Duration) -> CommandResult {
    let running = setup_interrupt_handler();

    info!(
        "CPU meter on {} every {}ms (Ctrl+C to stop)",
        device.name(),
        interval.as_millis()
    );

    meter_loop(device, &mut CpuSampler::new(), &running, interval).await?;

    info!("CPU meter stopped");
    Ok(())
}

/// Send one meter frame per tick while `running` is set
async fn meter_loop(
    device: &Device,
    sampler: &mut CpuSampler,
    running: &AtomicBool,
    interval: Duration,
) -> CommandResult {
    let mut keys = device.key_matrix().await?;
    let mut base = meter::START_BASE;

    while running.load(Ordering::SeqCst) {
        let usage = sampler.sample()?;
        trace!(usage, base, "frame");

        meter::render(&mut keys, base, usage);
        device.set_keys(&keys).await?;

        tokio::time::sleep(interval).await;
        base = meter::advance(base);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::test_bus::{self, key_color, RecordingBus};
    use super::*;
    use razer_device::{KeyMatrix, RgbColor};
    use std::sync::Arc;

    fn peak(c: RgbColor) -> u8 {
        c.r.max(c.g).max(c.b)
    }

    #[tokio::test]
    async fn test_one_tick_sends_one_frame() {
        let path = std::env::temp_dir().join(format!("lantern-top-stat-{}", std::process::id()));
        // 150 busy of 1000 ticks since boot: 15%
        std::fs::write(&path, "cpu  100 0 50 800 50 0 0 0 0 0\n").unwrap();

        let running = Arc::new(AtomicBool::new(true));
        let bus = Arc::new(RecordingBus::new(2, 5).stopping(Arc::clone(&running)));
        let mut sampler = CpuSampler::with_path(&path);

        let result = meter_loop(
            &test_bus::device(&bus, "PM0001"),
            &mut sampler,
            &running,
            Duration::ZERO,
        )
        .await;
        std::fs::remove_file(&path).ok();
        result.unwrap();

        let frames = bus.frames();
        assert_eq!(frames.len(), 1);

        let mut expected = KeyMatrix::new(2, 5).unwrap();
        meter::render(&mut expected, meter::START_BASE, 15.0);
        assert_eq!(frames[0], expected.row_messages());

        // 15% of five columns lights only the first
        for row in 0..2 {
            assert!(peak(key_color(&frames[0], row, 0)) > 200);
            for col in 1..5 {
                assert!(peak(key_color(&frames[0], row, col)) < 20, "col {col}");
            }
        }
    }
}
