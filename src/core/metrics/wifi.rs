//! Wireless link types, connection status and the data-rate heuristic.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::PlatformError;

/// Operating mode of the wireless stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WifiMode {
    Null,
    Station,
    AccessPoint,
    AccessPointStation,
}

impl WifiMode {
    pub fn has_station(&self) -> bool {
        matches!(self, WifiMode::Station | WifiMode::AccessPointStation)
    }
}

/// Position of the bonded secondary channel, if any
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SecondaryChannel {
    #[default]
    None,
    Above,
    Below,
}

/// Physical-layer mode negotiated with the access point
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhyMode {
    /// 802.11b, the slowest legacy mode
    #[default]
    Legacy11b,
    Legacy11g,
    /// 802.11n high throughput
    Ht,
    /// 802.11ac very high throughput
    Vht,
    /// 802.11ax high efficiency
    He,
    /// Vendor long-range mode
    LongRange,
}

/// Associated access-point record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApRecord {
    pub rssi: i8,
    pub primary_channel: u8,
    pub secondary_channel: SecondaryChannel,
}

/// Connection status reported to embedders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WifiStatus {
    Connected,
    Disconnected,
    Connecting,
    Disconnecting,
    NotInitialized,
}

impl fmt::Display for WifiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            WifiStatus::Connected => "Connected",
            WifiStatus::Disconnected => "Disconnected",
            WifiStatus::Connecting => "Connecting",
            WifiStatus::Disconnecting => "Disconnecting",
            WifiStatus::NotInitialized => "Not initialized",
        };
        write!(f, "{}", text)
    }
}

/// Status for a station whose AP-record query returned `record`.
pub fn status_from_ap_query<T>(record: &Result<T, PlatformError>) -> WifiStatus {
    match record {
        Ok(_) => WifiStatus::Connected,
        Err(PlatformError::WifiNotConnected) => WifiStatus::Disconnected,
        Err(_) => WifiStatus::NotInitialized,
    }
}

/// Nominal rate in Mbps for a PHY mode, before signal derating
pub fn base_rate_mbps(phy_mode: PhyMode, secondary_channel: SecondaryChannel) -> f32 {
    let bonded = secondary_channel != SecondaryChannel::None;

    match phy_mode {
        PhyMode::LongRange => 0.5,
        PhyMode::Ht if bonded => 144.0,
        PhyMode::Ht => 72.0,
        PhyMode::Vht if bonded => 200.0,
        PhyMode::Vht => 96.0,
        _ => 11.0,
    }
}

/// Linear derating applied below -90 dBm, never below one half
pub fn signal_factor(rssi: i8) -> f32 {
    let shortfall = (-90 - rssi as i32).max(0) as f32;
    (1.0 - shortfall / 40.0).max(0.5)
}

/// Rough data-rate estimate in Mbps.
///
/// This is a heuristic, not the rate the PHY actually negotiated: a fixed
/// constant per PHY mode and channel width, derated linearly with signal
/// strength.
pub fn estimate_data_rate(phy_mode: PhyMode, record: &ApRecord) -> f32 {
    base_rate_mbps(phy_mode, record.secondary_channel) * signal_factor(record.rssi)
}
