use crate::config::AppConfig;
use crate::data::hardware::Capability;
use crate::data::network::NetworkRateCalculator;
use crate::data::provider::MetricsProvider;
use crate::data::snapshot::{CpuSnapshot, DiskReport, MemorySnapshot, SystemSnapshot};
use crate::data::temperature::TemperatureAggregator;
use crate::utils::percent_of;
use std::path::PathBuf;
use std::time::Instant;
use tracing::debug;

/// Runs one sampling cycle: sampler, network rates, temperatures.
pub struct DataCollector<P> {
    provider: P,
    disks: Vec<PathBuf>,
    network: NetworkRateCalculator,
    temperatures: TemperatureAggregator,
    hostname: String,
    update_interval_secs: u64,
}

impl<P: MetricsProvider> DataCollector<P> {
    /// Takes the initial CPU and network samples that later cycles measure from.
    pub fn new(mut provider: P, capability: Capability, config: &AppConfig) -> Self {
        let _ = provider.per_core_usage();
        let network = NetworkRateCalculator::new(provider.network_counters(), Instant::now());

        Self {
            provider,
            disks: config.disks.clone(),
            network,
            temperatures: TemperatureAggregator::new(capability),
            hostname: Self::get_hostname(),
            update_interval_secs: config.update_interval_secs,
        }
    }

    pub fn collect(&mut self) -> SystemSnapshot {
        let cpu = sample_cpu(&mut self.provider);
        let memory = sample_memory(&mut self.provider);
        let disks = sample_disks(&mut self.provider, &self.disks);

        let counters = self.provider.network_counters();
        let network = self.network.compute_rate(counters, Instant::now());

        let temperatures = self.temperatures.collect(&mut self.provider);

        SystemSnapshot {
            taken_at: chrono::Local::now(),
            hostname: self.hostname.clone(),
            update_interval_secs: self.update_interval_secs,
            cpu,
            memory,
            disks,
            network,
            temperatures,
        }
    }

    pub fn capability(&self) -> &Capability {
        self.temperatures.capability()
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    fn get_hostname() -> String {
        hostname::get()
            .map(|h| h.to_string_lossy().into_owned())
            .unwrap_or_else(|_| "unknown".to_string())
    }
}

/// Per-core usage, averaged; falls back to the platform aggregate when the
/// per-core list is empty.
pub fn sample_cpu<P: MetricsProvider + ?Sized>(provider: &mut P) -> CpuSnapshot {
    let per_core = provider.per_core_usage();
    if per_core.is_empty() {
        return CpuSnapshot {
            overall: provider.aggregate_usage(),
            per_core,
            averaged: false,
        };
    }

    let overall = per_core.iter().sum::<f32>() / per_core.len() as f32;
    CpuSnapshot {
        overall,
        per_core,
        averaged: true,
    }
}

pub fn sample_memory<P: MetricsProvider + ?Sized>(provider: &mut P) -> MemorySnapshot {
    let stats = provider.memory();
    MemorySnapshot {
        total: stats.total,
        available: stats.available,
        used: stats.used,
        used_percent: percent_of(stats.total.saturating_sub(stats.available), stats.total),
        free: stats.free,
        swap_total: stats.swap_total,
        swap_used: stats.swap_used,
        swap_percent: percent_of(stats.swap_used, stats.swap_total),
    }
}

/// Queries every path independently; failures stay attached to their path.
pub fn sample_disks<P: MetricsProvider + ?Sized>(
    provider: &mut P,
    paths: &[PathBuf],
) -> Vec<DiskReport> {
    paths
        .iter()
        .map(|path| {
            let usage = provider.disk_usage(path);
            if let Err(e) = &usage {
                debug!("Disk {}: {}", path.display(), e);
            }
            DiskReport {
                path: path.clone(),
                usage,
            }
        })
        .collect()
}
