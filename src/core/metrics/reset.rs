use serde::Serialize;
use std::fmt;

/// Label for reset codes outside the known table
pub const UNKNOWN_REASON_LABEL: &str = "Unknown reason";

/// Cause of the last reset, in the platform's ordinal order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetCause {
    Unknown = 0,
    PowerOn = 1,
    External = 2,
    Software = 3,
    Panic = 4,
    InterruptWatchdog = 5,
    TaskWatchdog = 6,
    OtherWatchdog = 7,
    Brownout = 8,
    Peripheral = 9,
    DeepSleep = 10,
    Bootstrap = 11,
}

impl ResetCause {
    /// Every known cause, indexed by its code
    pub const ALL: [ResetCause; 12] = [
        ResetCause::Unknown,
        ResetCause::PowerOn,
        ResetCause::External,
        ResetCause::Software,
        ResetCause::Panic,
        ResetCause::InterruptWatchdog,
        ResetCause::TaskWatchdog,
        ResetCause::OtherWatchdog,
        ResetCause::Brownout,
        ResetCause::Peripheral,
        ResetCause::DeepSleep,
        ResetCause::Bootstrap,
    ];

    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    pub fn code(&self) -> u32 {
        *self as u32
    }

    pub fn label(&self) -> &'static str {
        match self {
            ResetCause::Unknown => "Unknown",
            ResetCause::PowerOn => "Power-on reset",
            ResetCause::External => "External pin reset",
            ResetCause::Software => "Software reset",
            ResetCause::Panic => "Watchdog reset",
            ResetCause::InterruptWatchdog => "Interrupt watchdog reset",
            ResetCause::TaskWatchdog => "Task watchdog reset",
            ResetCause::OtherWatchdog => "Other watchdog reset",
            ResetCause::Brownout => "Brownout reset",
            ResetCause::Peripheral => "SDIO reset",
            ResetCause::DeepSleep => "Deepsleep reset",
            ResetCause::Bootstrap => "Bootstrapping reset",
        }
    }
}

/// Reboot reason captured once at initialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RebootReason {
    /// Raw code read from the reset register
    pub code: u32,
    /// `None` when the code is outside the known table
    pub cause: Option<ResetCause>,
    pub label: &'static str,
}

impl RebootReason {
    pub fn from_code(code: u32) -> Self {
        let cause = ResetCause::from_code(code);
        Self {
            code,
            cause,
            label: cause.map_or(UNKNOWN_REASON_LABEL, |c| c.label()),
        }
    }

    pub fn is_brownout(&self) -> bool {
        self.cause == Some(ResetCause::Brownout)
    }
}

impl fmt::Display for RebootReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.label, self.code)
    }
}
