//! Host process snapshot attached to every entry.
//!
//! # Responsibilities
//! - Capture memory usage, pid, uptime, and runtime version info
//! - Never fail: unreadable stats degrade to zeroes
//!
//! # Design Decisions
//! - Uptime is measured from the first capture in this process, which
//!   the logger pins at construction time
//! - Memory comes from /proc/self/statm on Linux; other platforms
//!   report zeroes rather than guessing

use std::sync::OnceLock;
use std::time::Instant;

use serde::Serialize;

static PROCESS_START: OnceLock<Instant> = OnceLock::new();

/// Baseline instant for uptime. Idempotent; first caller wins.
pub fn process_start() -> Instant {
    *PROCESS_START.get_or_init(Instant::now)
}

/// Process statistics at a single point in time.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessSnapshot {
    pub memory_usage: MemoryUsage,
    pub pid: u32,
    /// Seconds since the process-start baseline.
    pub uptime: f64,
    pub versions: Versions,
}

impl ProcessSnapshot {
    pub fn capture() -> Self {
        Self {
            memory_usage: MemoryUsage::read(),
            pid: std::process::id(),
            uptime: process_start().elapsed().as_secs_f64(),
            versions: Versions::current(),
        }
    }
}

/// Memory usage in bytes.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct MemoryUsage {
    /// Resident set size.
    pub rss: u64,
    /// Virtual memory size.
    pub vms: u64,
}

impl MemoryUsage {
    fn read() -> Self {
        #[cfg(target_os = "linux")]
        if let Some(usage) = Self::read_statm() {
            return usage;
        }
        Self::default()
    }

    #[cfg(target_os = "linux")]
    fn read_statm() -> Option<Self> {
        // statm reports sizes in pages; assume the common 4 KiB page
        const PAGE_SIZE: u64 = 4096;
        let statm = std::fs::read_to_string("/proc/self/statm").ok()?;
        let mut fields = statm.split_whitespace();
        let vms_pages: u64 = fields.next()?.parse().ok()?;
        let rss_pages: u64 = fields.next()?.parse().ok()?;
        Some(Self {
            rss: rss_pages * PAGE_SIZE,
            vms: vms_pages * PAGE_SIZE,
        })
    }
}

/// Runtime version information.
#[derive(Debug, Clone, Serialize)]
pub struct Versions {
    pub logger: &'static str,
    pub os: &'static str,
    pub arch: &'static str,
}

impl Versions {
    pub fn current() -> Self {
        Self {
            logger: env!("CARGO_PKG_VERSION"),
            os: std::env::consts::OS,
            arch: std::env::consts::ARCH,
        }
    }
}
