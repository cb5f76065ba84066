//! CPU usage from the kernel's `/proc/stat`

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Kernel CPU accounting file
const PROC_STAT: &str = "/proc/stat";

/// Aggregate CPU time counters (in clock ticks)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuTimes {
    pub busy: u64,
    pub total: u64,
}

impl CpuTimes {
    /// Parse the aggregate `cpu` line of `/proc/stat`.
    ///
    /// Counts user, nice, system, idle, iowait, irq, softirq and steal; guest
    /// time is already included in user. Idle time is idle + iowait.
    pub fn parse(stat: &str) -> Option<Self> {
        let line = stat.lines().find(|l| l.starts_with("cpu "))?;
        let fields: Vec<u64> = line
            .split_whitespace()
            .skip(1)
            .take(8)
            .map(|f| f.parse().ok())
            .collect::<Option<_>>()?;

        if fields.len() < 4 {
            return None;
        }

        let total: u64 = fields.iter().sum();
        let idle = fields[3] + fields.get(4).copied().unwrap_or(0);
        Some(Self {
            busy: total.saturating_sub(idle),
            total,
        })
    }

    /// Busy percentage (0-100) between two readings
    pub fn usage_since(&self, earlier: &CpuTimes) -> f64 {
        let total = self.total.saturating_sub(earlier.total);
        if total == 0 {
            return 0.0;
        }
        let busy = self.busy.saturating_sub(earlier.busy);
        (busy as f64 * 100.0 / total as f64).clamp(0.0, 100.0)
    }
}

/// Samples CPU usage relative to the previous sample
pub struct CpuSampler {
    path: PathBuf,
    last: CpuTimes,
}

impl Default for CpuSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl CpuSampler {
    pub fn new() -> Self {
        Self::with_path(PROC_STAT)
    }

    /// Read from an alternative stat file
    pub fn with_path(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            last: CpuTimes::default(),
        }
    }

    /// Usage since the previous call (since boot on the first call)
    pub fn sample(&mut self) -> io::Result<f64> {
        let content = fs::read_to_string(&self.path)?;
        let now = CpuTimes::parse(&content).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("no cpu line in {}", self.path.display()),
            )
        })?;

        let usage = now.usage_since(&self.last);
        self.last = now;
        Ok(usage)
    }
}
