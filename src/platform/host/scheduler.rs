//! Scheduler accounting from the kernel's aggregate CPU-time counters.
//!
//! Each column of the `cpu` line in `/proc/stat` is reported as one "task",
//! with the idle column named after the scheduler's idle task. Counters are
//! in clock ticks and truncated to wrapping `u32`, like the run-time counters
//! of a microcontroller scheduler.

use std::fs;
use std::path::PathBuf;

use crate::core::metrics::{SchedulerAccounting, TaskRunTime, DEFAULT_IDLE_TASK};
use crate::error::PlatformError;

const PROC_STAT: &str = "/proc/stat";

/// Column names of the aggregate `cpu` line, in order. `guest` time is
/// already included in `user` and is not listed.
const COLUMNS: [&str; 8] = [
    "user",
    "nice",
    "system",
    DEFAULT_IDLE_TASK,
    "iowait",
    "irq",
    "softirq",
    "steal",
];

pub struct ProcStatScheduler {
    path: PathBuf,
}

impl ProcStatScheduler {
    pub fn new() -> Self {
        Self::with_path(PROC_STAT)
    }

    pub fn with_path<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

impl Default for ProcStatScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl SchedulerAccounting for ProcStatScheduler {
    fn task_count(&self) -> usize {
        COLUMNS.len()
    }

    fn system_state(&self, tasks: &mut Vec<TaskRunTime>) -> Result<u32, PlatformError> {
        let contents = fs::read_to_string(&self.path).map_err(|e| {
            log::debug!("Cannot read {:?}: {}", self.path, e);
            PlatformError::NotSupported
        })?;

        let counters = parse_proc_stat(&contents)?;
        let total = counters
            .iter()
            .fold(0u32, |sum, task| sum.wrapping_add(task.run_time));

        let room = tasks.capacity() - tasks.len();
        tasks.extend(counters.into_iter().take(room));

        Ok(total)
    }
}

/// Parse the aggregate `cpu` line into per-column counters
pub fn parse_proc_stat(contents: &str) -> Result<Vec<TaskRunTime>, PlatformError> {
    let line = contents
        .lines()
        .find(|line| line.split_whitespace().next() == Some("cpu"))
        .ok_or(PlatformError::Failed(-1))?;

    let values: Vec<u64> = line
        .split_whitespace()
        .skip(1)
        .map(|field| field.parse::<u64>().map_err(|_| PlatformError::Failed(-1)))
        .collect::<Result<_, _>>()?;

    // Kernels before 2.6.11 stop after softirq
    Ok(COLUMNS
        .iter()
        .enumerate()
        .map(|(i, name)| TaskRunTime::new(*name, values.get(i).copied().unwrap_or(0) as u32))
        .collect())
}
