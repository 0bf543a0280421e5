use crate::data::snapshot::{
    DiskUsage, MemoryStats, NetCounters, TemperatureGroup, TemperatureReading,
};
use crate::error::{SampleError, SensorError};
use crate::utils::percent_of;
use std::io;
use std::path::Path;
use sysinfo::{ComponentExt, CpuExt, NetworkExt, NetworksExt, System, SystemExt};
use tracing::debug;

/// Source of OS-level counters.
///
/// Each call returns the values at that instant. CPU usage is relative to the
/// previous CPU call, the provider keeps that state itself.
pub trait MetricsProvider {
    /// Per-core utilization in percent. May be empty.
    fn per_core_usage(&mut self) -> Vec<f32>;

    /// Whole-machine utilization in percent.
    fn aggregate_usage(&mut self) -> f32;

    fn memory(&mut self) -> MemoryStats;

    fn disk_usage(&mut self, path: &Path) -> Result<DiskUsage, SampleError>;

    /// Cumulative bytes sent/received since boot, over all interfaces.
    fn network_counters(&mut self) -> NetCounters;

    /// OS-level temperature sensors, grouped by chip.
    fn temperatures(&mut self) -> Result<Vec<TemperatureGroup>, SensorError>;

    /// Name shown next to readings from [`MetricsProvider::temperatures`].
    fn sensor_source_name(&self) -> &str;
}

/// [`MetricsProvider`] backed by `sysinfo`.
pub struct SysinfoProvider {
    system: System,
}

impl Default for SysinfoProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SysinfoProvider {
    pub fn new() -> Self {
        // Only load the lists we actually read
        let mut system = System::new();
        system.refresh_cpu();
        system.refresh_networks_list();
        system.refresh_components_list();

        Self { system }
    }
}

impl MetricsProvider for SysinfoProvider {
    fn per_core_usage(&mut self) -> Vec<f32> {
        self.system.refresh_cpu();
        self.system.cpus().iter().map(|cpu| cpu.cpu_usage()).collect()
    }

    fn aggregate_usage(&mut self) -> f32 {
        self.system.refresh_cpu();
        self.system.global_cpu_info().cpu_usage()
    }

    fn memory(&mut self) -> MemoryStats {
        self.system.refresh_memory();
        MemoryStats {
            total: self.system.total_memory(),
            available: self.system.available_memory(),
            used: self.system.used_memory(),
            free: self.system.free_memory(),
            swap_total: self.system.total_swap(),
            swap_used: self.system.used_swap(),
        }
    }

    fn disk_usage(&mut self, path: &Path) -> Result<DiskUsage, SampleError> {
        filesystem_usage(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => {
                SampleError::PathNotFound(path.to_path_buf())
            }
            _ => SampleError::Io(e),
        })
    }

    fn network_counters(&mut self) -> NetCounters {
        self.system.refresh_networks_list();
        self.system.refresh_networks();

        self.system
            .networks()
            .iter()
            .fold(NetCounters::default(), |acc, (_, data)| NetCounters {
                bytes_sent: acc.bytes_sent.saturating_add(data.total_transmitted()),
                bytes_received: acc.bytes_received.saturating_add(data.total_received()),
            })
    }

    fn temperatures(&mut self) -> Result<Vec<TemperatureGroup>, SensorError> {
        self.system.refresh_components();

        let mut groups: Vec<TemperatureGroup> = Vec::new();
        for component in self.system.components() {
            let reading = component_reading(
                component.label(),
                component.temperature(),
                component.critical(),
            );
            match groups.iter_mut().find(|g| g.name == reading.group) {
                Some(existing) => existing.readings.push(reading),
                None => groups.push(TemperatureGroup {
                    name: reading.group.clone(),
                    readings: vec![reading],
                }),
            }
        }
        debug!("sysinfo reported {} sensor groups", groups.len());
        Ok(groups)
    }

    fn sensor_source_name(&self) -> &str {
        "sysinfo"
    }
}

/// Maps one sysinfo component to a reading.
///
/// sysinfo 0.29 keeps the `temp*_max` threshold private and its `max()` is the
/// highest value seen so far, so no high threshold is reported.
fn component_reading(label: &str, current: f32, critical: Option<f32>) -> TemperatureReading {
    let (group, label) = split_component_label(label);
    TemperatureReading {
        group: group.to_string(),
        label: label.to_string(),
        current: f64::from(current),
        high: None,
        critical: critical.map(f64::from),
    }
}

/// Space used and left on the filesystem holding `path`.
#[cfg(unix)]
fn filesystem_usage(path: &Path) -> io::Result<DiskUsage> {
    let stats = nix::sys::statvfs::statvfs(path)?;
    let fragment = stats.fragment_size() as u64;
    let fragment = if fragment > 0 {
        fragment
    } else {
        stats.block_size() as u64
    };
    Ok(usage_from_blocks(
        fragment,
        stats.blocks() as u64,
        stats.blocks_free() as u64,
        stats.blocks_available() as u64,
    ))
}

#[cfg(windows)]
fn filesystem_usage(path: &Path) -> io::Result<DiskUsage> {
    use std::os::windows::ffi::OsStrExt;
    use windows_sys::Win32::Storage::FileSystem::GetDiskFreeSpaceExW;

    let wide: Vec<u16> = path
        .as_os_str()
        .encode_wide()
        .chain(std::iter::once(0))
        .collect();
    let (mut available, mut total, mut free) = (0u64, 0u64, 0u64);
    // SAFETY: `wide` is NUL-terminated and outlives the call.
    let ok = unsafe {
        GetDiskFreeSpaceExW(wide.as_ptr(), &mut available, &mut total, &mut free)
    };
    if ok == 0 {
        return Err(io::Error::last_os_error());
    }
    let used = total.saturating_sub(free);
    Ok(DiskUsage {
        total,
        used,
        free,
        percent: percent_of(used, total),
    })
}

/// Usage from statvfs block counts. Blocks reserved for root are neither used
/// nor free, so the percentage is of the space unprivileged users can fill.
#[cfg(unix)]
fn usage_from_blocks(
    fragment: u64,
    blocks: u64,
    blocks_free: u64,
    blocks_available: u64,
) -> DiskUsage {
    let used = blocks.saturating_sub(blocks_free) * fragment;
    let free = blocks_available * fragment;
    DiskUsage {
        total: blocks * fragment,
        used,
        free,
        percent: percent_of(used, used + free),
    }
}

/// Splits a component label into chip and sensor label.
///
/// On Linux sysinfo labels are `"<hwmon name> <sensor label>"`, e.g.
/// `"coretemp Package id 0"`. Elsewhere the label names the sensor as a whole.
fn split_component_label(label: &str) -> (&str, &str) {
    if cfg!(target_os = "linux") {
        match label.split_once(' ') {
            Some((chip, rest)) => (chip, rest.trim()),
            None => (label, ""),
        }
    } else {
        (label, "")
    }
}
