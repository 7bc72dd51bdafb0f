//! CPU usage derived from scheduler run-time counters.
//!
//! Usage is a sliding-window rate: every sample is compared against the one
//! before it and then becomes the new baseline. Deltas use wrapping `u32`
//! arithmetic, so at most one counter wraparound between two samples is
//! tolerated. More than one is an accepted platform limitation.

use super::platform::SchedulerAccounting;
use crate::error::{MetricsError, Result};

/// Default name of the scheduler's idle task
pub const DEFAULT_IDLE_TASK: &str = "IDLE";

/// Run-time counter of a single scheduler task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRunTime {
    pub name: String,
    pub run_time: u32,
}

impl TaskRunTime {
    pub fn new<S: Into<String>>(name: S, run_time: u32) -> Self {
        Self {
            name: name.into(),
            run_time,
        }
    }
}

/// Last scheduler snapshot, used as the reference for the next delta.
/// Both counters at zero means no baseline has been taken yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuBaseline {
    pub total_run_time: u32,
    pub idle_run_time: u32,
}

impl CpuBaseline {
    pub fn is_unset(&self) -> bool {
        self.total_run_time == 0 && self.idle_run_time == 0
    }

    /// Compute usage since the stored baseline, then replace the baseline
    /// with the new counters regardless of the outcome.
    pub fn advance(&mut self, total_run_time: u32, idle_run_time: u32) -> f32 {
        let usage = if self.is_unset() {
            0.0
        } else {
            let total_delta = total_run_time.wrapping_sub(self.total_run_time);
            let idle_delta = idle_run_time.wrapping_sub(self.idle_run_time);
            usage_percent(total_delta, idle_delta)
        };

        self.total_run_time = total_run_time;
        self.idle_run_time = idle_run_time;

        usage
    }
}

/// Busy share of `total_delta`, in percent
pub fn usage_percent(total_delta: u32, idle_delta: u32) -> f32 {
    if total_delta == 0 {
        return 0.0;
    }

    let usage = 100.0 - (idle_delta as f32 * 100.0 / total_delta as f32);
    usage.clamp(0.0, 100.0)
}

/// Run time of the idle task, zero when no task carries `idle_task`
pub fn idle_run_time(tasks: &[TaskRunTime], idle_task: &str) -> u32 {
    tasks
        .iter()
        .find(|task| task.name == idle_task)
        .map(|task| task.run_time)
        .unwrap_or(0)
}

/// Take one scheduler snapshot and return `(total, idle)` run times.
///
/// The snapshot buffer is sized to the live task count and dropped on
/// every return path.
pub fn sample_scheduler(
    scheduler: &dyn SchedulerAccounting,
    idle_task: &str,
) -> Result<(u32, u32)> {
    let task_count = scheduler.task_count();

    let mut tasks: Vec<TaskRunTime> = Vec::new();
    tasks.try_reserve_exact(task_count).map_err(|_| {
        MetricsError::no_memory(format!("task snapshot buffer for {} tasks", task_count))
    })?;

    let total = scheduler.system_state(&mut tasks)?;
    let idle = idle_run_time(&tasks, idle_task);

    log::trace!(
        "Scheduler snapshot: {} tasks, total={}, idle={}",
        tasks.len(),
        total,
        idle
    );

    Ok((total, idle))
}
