//! Network throughput from cumulative byte counters.

use crate::data::snapshot::{NetCounters, NetworkRates};
use std::time::Instant;

/// Counters and instant of the previous measurement.
#[derive(Clone, Copy, Debug)]
pub struct NetworkBaseline {
    pub bytes_sent: u64,
    pub bytes_received: u64,
    pub timestamp: Instant,
}

/// Turns successive counter samples into bytes/second.
///
/// Rates cover only the window since the previous call, not the process lifetime.
#[derive(Debug)]
pub struct NetworkRateCalculator {
    baseline: NetworkBaseline,
}

impl NetworkRateCalculator {
    /// Starts from an initial sample; the first [`compute_rate`](Self::compute_rate)
    /// measures from here.
    pub fn new(initial: NetCounters, at: Instant) -> Self {
        Self {
            baseline: NetworkBaseline {
                bytes_sent: initial.bytes_sent,
                bytes_received: initial.bytes_received,
                timestamp: at,
            },
        }
    }

    pub fn baseline(&self) -> &NetworkBaseline {
        &self.baseline
    }

    pub fn compute_rate(&mut self, current: NetCounters, now: Instant) -> NetworkRates {
        let elapsed = now
            .saturating_duration_since(self.baseline.timestamp)
            .as_secs_f64();
        if elapsed == 0.0 {
            return NetworkRates {
                upload_bps: 0.0,
                download_bps: 0.0,
                total_sent: current.bytes_sent,
                total_received: current.bytes_received,
            };
        }

        // Counters that went backwards (interface reset) count as no traffic
        let sent_diff = current.bytes_sent.saturating_sub(self.baseline.bytes_sent);
        let received_diff = current
            .bytes_received
            .saturating_sub(self.baseline.bytes_received);

        self.baseline = NetworkBaseline {
            bytes_sent: current.bytes_sent,
            bytes_received: current.bytes_received,
            timestamp: now,
        };

        NetworkRates {
            upload_bps: sent_diff as f64 / elapsed,
            download_bps: received_diff as f64 / elapsed,
            total_sent: current.bytes_sent,
            total_received: current.bytes_received,
        }
    }
}
