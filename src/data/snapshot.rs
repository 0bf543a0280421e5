use crate::error::SampleError;
use chrono::{DateTime, Local};
use std::path::PathBuf;

/// Raw cumulative network byte counters, summed over all interfaces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NetCounters {
    pub bytes_sent: u64,
    pub bytes_received: u64,
}

/// Raw memory figures as reported by the platform, in bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemoryStats {
    pub total: u64,
    pub available: u64,
    pub used: u64,
    pub free: u64,
    pub swap_total: u64,
    pub swap_used: u64,
}

/// Usage of the filesystem backing one configured path, in bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DiskUsage {
    pub total: u64,
    pub used: u64,
    pub free: u64,
    pub percent: f64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CpuSnapshot {
    pub overall: f32,
    pub per_core: Vec<f32>,
    /// Whether `overall` is the mean of `per_core` or the platform aggregate.
    pub averaged: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MemorySnapshot {
    pub total: u64,
    pub available: u64,
    pub used: u64,
    pub used_percent: f64,
    pub free: u64,
    pub swap_total: u64,
    pub swap_used: u64,
    pub swap_percent: f64,
}

#[derive(Debug)]
pub struct DiskReport {
    pub path: PathBuf,
    pub usage: Result<DiskUsage, SampleError>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NetworkRates {
    pub upload_bps: f64,
    pub download_bps: f64,
    pub total_sent: u64,
    pub total_received: u64,
}

/// One temperature value from either sensor source, in Celsius.
#[derive(Clone, Debug, PartialEq)]
pub struct TemperatureReading {
    pub group: String,
    pub label: String,
    pub current: f64,
    pub high: Option<f64>,
    pub critical: Option<f64>,
}

/// Readings sharing a hardware item or sensor chip, in discovery order.
#[derive(Clone, Debug, PartialEq)]
pub struct TemperatureGroup {
    pub name: String,
    pub readings: Vec<TemperatureReading>,
}

/// What the primary hardware backend produced this cycle.
#[derive(Clone, Debug, PartialEq)]
pub enum PrimaryOutcome {
    /// Backend failed to load at startup; never attempted.
    Unavailable { reason: String },
    Failed(String),
    /// No hardware item exposed a temperature sensor.
    NoSensors,
    /// Sensors exist but none reported a finite value.
    NoValidValues,
    Reported(Vec<TemperatureGroup>),
}

/// What the OS-level sensor API produced this cycle.
#[derive(Clone, Debug, PartialEq)]
pub enum FallbackOutcome {
    Failed(String),
    NotSupported,
    Reported(Vec<TemperatureGroup>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct TemperatureReport {
    pub primary_source: String,
    pub primary: PrimaryOutcome,
    pub fallback_source: String,
    /// `None` when the primary source succeeded.
    pub fallback: Option<FallbackOutcome>,
}

impl TemperatureReport {
    pub fn readings(&self) -> impl Iterator<Item = &TemperatureReading> {
        let primary: &[TemperatureGroup] = match &self.primary {
            PrimaryOutcome::Reported(groups) => groups.as_slice(),
            _ => &[],
        };
        let fallback: &[TemperatureGroup] = match &self.fallback {
            Some(FallbackOutcome::Reported(groups)) => groups.as_slice(),
            _ => &[],
        };
        primary
            .iter()
            .chain(fallback.iter())
            .flat_map(|g| g.readings.iter())
    }
}

/// Everything gathered during one cycle.
#[derive(Debug)]
pub struct SystemSnapshot {
    pub taken_at: DateTime<Local>,
    pub hostname: String,
    pub update_interval_secs: u64,
    pub cpu: CpuSnapshot,
    pub memory: MemorySnapshot,
    pub disks: Vec<DiskReport>,
    pub network: NetworkRates,
    pub temperatures: TemperatureReport,
}
