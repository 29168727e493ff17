//! Auxiliary step library: filler frames that vary stack content.
//!
//! Steps are informational only. A step that cannot complete (allocation
//! refused, file missing, variable unset) logs at `debug` and returns, so the
//! enclosing path always goes on to reach its payload.

use std::fs;
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use chrono::{Local, Utc};
use rand::Rng;
use serde::Serialize;
use tracing::debug;

/// Bytes touched by [`AuxStep::HeapOperation`].
const HEAP_BYTES: usize = 64;
/// Bytes touched by [`AuxStep::PageCycle`].
const PAGE_BYTES: usize = 4096;
/// Characters of `PATH` read by [`AuxStep::EnvironmentVar`].
const ENV_PREFIX_CHARS: usize = 10;

/// One zero-argument filler operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuxStep {
    /// Sleep for a jittered 1..=10 ms.
    SmallDelay,
    /// Sleep for 1 ms.
    BriefSleep,
    /// Read UTC wall-clock time.
    SystemTime,
    /// Read local wall-clock time.
    LocalTime,
    /// Read time since the Unix epoch.
    FileTime,
    /// Read the monotonic clock.
    PerfCounter,
    /// Allocate, zero and free a small heap block.
    HeapOperation,
    /// Allocate, zero and free a page-sized block.
    PageCycle,
    /// Read process and thread identifiers.
    ThreadInfo,
    /// Read the current thread identifier only.
    ThreadId,
    /// Read a prefix of the `PATH` variable.
    EnvironmentVar,
    /// Read the host name.
    HostName,
    /// Read memory totals.
    MemoryStatus,
    /// Read CPU count and platform.
    SystemInfo,
}

/// Executes auxiliary steps on behalf of a path.
pub trait AuxSteps {
    fn run(&self, step: AuxStep);

    /// Acquire a zeroed scratch buffer, or `None` if allocation is refused.
    fn scratch(&self, bytes: usize) -> Option<Vec<u8>>;
}

/// Auxiliary steps backed by real OS and runtime queries.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsAux;

impl AuxSteps for OsAux {
    fn run(&self, step: AuxStep) {
        match step {
            AuxStep::SmallDelay => small_delay(),
            AuxStep::BriefSleep => thread::sleep(Duration::from_millis(1)),
            AuxStep::SystemTime => system_time(),
            AuxStep::LocalTime => local_time(),
            AuxStep::FileTime => file_time(),
            AuxStep::PerfCounter => perf_counter(),
            AuxStep::HeapOperation => heap_cycle("heap block", HEAP_BYTES),
            AuxStep::PageCycle => heap_cycle("page", PAGE_BYTES),
            AuxStep::ThreadInfo => thread_info(),
            AuxStep::ThreadId => {
                let tid = thread::current().id();
                debug!(?tid, "thread id");
            }
            AuxStep::EnvironmentVar => environment_var(),
            AuxStep::HostName => host_name(),
            AuxStep::MemoryStatus => memory_status(),
            AuxStep::SystemInfo => system_info(),
        }
    }

    fn scratch(&self, bytes: usize) -> Option<Vec<u8>> {
        let mut buf = Vec::new();
        if let Err(err) = buf.try_reserve_exact(bytes) {
            debug!(bytes, error = %err, "scratch allocation refused");
            return None;
        }
        buf.resize(bytes, 0);
        Some(buf)
    }
}

#[inline(never)]
fn small_delay() {
    let millis = rand::thread_rng().gen_range(1..=10);
    thread::sleep(Duration::from_millis(millis));
    debug!(millis, "small delay");
}

#[inline(never)]
fn system_time() {
    let now = Utc::now();
    debug!(time = %now.format("%H:%M:%S%.3f"), "system time");
}

#[inline(never)]
fn local_time() {
    let now = Local::now();
    debug!(time = %now.format("%H:%M:%S%.3f"), "local time");
}

#[inline(never)]
fn file_time() {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(since_epoch) => debug!(nanos = since_epoch.as_nanos() as u64, "time since epoch"),
        Err(err) => debug!(error = %err, "clock before unix epoch"),
    }
}

#[inline(never)]
fn perf_counter() {
    let counter = Instant::now();
    debug!(?counter, "performance counter");
}

#[inline(never)]
fn heap_cycle(label: &'static str, bytes: usize) {
    let mut block: Vec<u8> = Vec::new();
    if let Err(err) = block.try_reserve_exact(bytes) {
        debug!(label, bytes, error = %err, "allocation refused; skipping");
        return;
    }
    block.resize(bytes, 0);
    debug!(label, bytes, addr = ?block.as_ptr(), "allocated");
    drop(block);
    debug!(label, "released");
}

#[inline(never)]
fn thread_info() {
    let pid = std::process::id();
    let tid = thread::current().id();
    debug!(pid, ?tid, "process and thread ids");
}

#[inline(never)]
fn environment_var() {
    match std::env::var_os("PATH") {
        Some(value) => {
            let value = value.to_string_lossy();
            let prefix: String = value.chars().take(ENV_PREFIX_CHARS).collect();
            debug!(prefix = %prefix, "PATH prefix");
        }
        None => debug!("PATH unset; skipping"),
    }
}

#[inline(never)]
fn host_name() {
    let from_env = ["HOSTNAME", "COMPUTERNAME"]
        .iter()
        .find_map(|key| std::env::var(key).ok());
    let name = from_env.or_else(|| {
        fs::read_to_string("/etc/hostname")
            .ok()
            .map(|raw| raw.trim().to_string())
    });
    match name {
        Some(name) if !name.is_empty() => debug!(host = %name, "host name"),
        _ => debug!("host name unavailable; skipping"),
    }
}

#[inline(never)]
fn memory_status() {
    match fs::read_to_string("/proc/meminfo") {
        Ok(raw) => {
            let total = raw.lines().find(|line| line.starts_with("MemTotal:"));
            debug!(total = total.unwrap_or("unknown"), "memory status");
        }
        Err(err) => debug!(error = %err, "memory status unavailable; skipping"),
    }
}

#[inline(never)]
fn system_info() {
    let cpus = thread::available_parallelism().map(|n| n.get()).ok();
    debug!(
        cpus = ?cpus,
        arch = std::env::consts::ARCH,
        os = std::env::consts::OS,
        "system info"
    );
}
