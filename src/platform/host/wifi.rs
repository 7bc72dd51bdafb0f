//! Wireless link status from `/proc/net/wireless`.
//!
//! The kernel only exposes link quality and signal level there, so the
//! negotiated PHY mode is reported as unsupported.

use std::fs;
use std::path::PathBuf;

use crate::core::metrics::{ApRecord, PhyMode, SecondaryChannel, WifiLink, WifiMode};
use crate::error::PlatformError;

const PROC_NET_WIRELESS: &str = "/proc/net/wireless";

/// One interface row of `/proc/net/wireless`
#[derive(Debug, Clone, PartialEq)]
pub struct WirelessEntry {
    pub interface: String,
    pub link_quality: f32,
    pub level_dbm: i32,
}

pub struct ProcWirelessLink {
    path: PathBuf,
    interface: Option<String>,
}

impl ProcWirelessLink {
    /// Watch `interface`, or the first wireless interface when `None`
    pub fn new(interface: Option<String>) -> Self {
        Self::with_path(PROC_NET_WIRELESS, interface)
    }

    pub fn with_path<P: Into<PathBuf>>(path: P, interface: Option<String>) -> Self {
        Self {
            path: path.into(),
            interface,
        }
    }

    fn entry(&self) -> Result<Option<WirelessEntry>, PlatformError> {
        let contents =
            fs::read_to_string(&self.path).map_err(|_| PlatformError::WifiNotInitialized)?;

        Ok(parse_proc_wireless(&contents).into_iter().find(|entry| {
            self.interface
                .as_deref()
                .map_or(true, |name| entry.interface == name)
        }))
    }
}

impl WifiLink for ProcWirelessLink {
    fn mode(&self) -> Result<WifiMode, PlatformError> {
        Ok(match self.entry()? {
            Some(_) => WifiMode::Station,
            None => WifiMode::Null,
        })
    }

    fn ap_record(&self) -> Result<ApRecord, PlatformError> {
        let entry = self.entry()?.ok_or(PlatformError::WifiNotConnected)?;

        if entry.link_quality <= 0.0 {
            return Err(PlatformError::WifiNotConnected);
        }

        Ok(ApRecord {
            rssi: entry.level_dbm.clamp(i8::MIN as i32, 0) as i8,
            primary_channel: 0,
            secondary_channel: SecondaryChannel::None,
        })
    }

    fn negotiated_phy_mode(&self) -> Result<PhyMode, PlatformError> {
        Err(PlatformError::NotSupported)
    }
}

fn parse_number(field: &str) -> Option<f32> {
    field.trim_end_matches('.').parse().ok()
}

/// Parse interface rows, skipping the two header lines
pub fn parse_proc_wireless(contents: &str) -> Vec<WirelessEntry> {
    contents
        .lines()
        .skip(2)
        .filter_map(|line| {
            let (interface, rest) = line.split_once(':')?;
            let mut fields = rest.split_whitespace();
            let _status = fields.next()?;
            let link_quality = parse_number(fields.next()?)?;
            let level = parse_number(fields.next()?)?;

            Some(WirelessEntry {
                interface: interface.trim().to_string(),
                link_quality,
                level_dbm: level as i32,
            })
        })
        .collect()
}
