//! Temperature aggregation over two sources.
//!
//! The primary hardware backend is tried first (when the startup probe found
//! it). If it yields at least one finite reading its groups are reported and
//! the OS-level sensor API is not consulted. Otherwise the fallback source is
//! queried. Results from the two sources are never merged.

use crate::data::hardware::{Capability, HardwareBackend, SensorClasses, SensorKind};
use crate::data::provider::MetricsProvider;
use crate::data::snapshot::{
    FallbackOutcome, PrimaryOutcome, TemperatureGroup, TemperatureReading, TemperatureReport,
};
use crate::error::SensorError;
use tracing::debug;

pub struct TemperatureAggregator {
    capability: Capability,
    classes: SensorClasses,
}

impl TemperatureAggregator {
    pub fn new(capability: Capability) -> Self {
        Self {
            capability,
            classes: SensorClasses::CPU_AND_GPU,
        }
    }

    pub fn capability(&self) -> &Capability {
        &self.capability
    }

    pub fn collect<P>(&self, provider: &mut P) -> TemperatureReport
    where
        P: MetricsProvider + ?Sized,
    {
        let primary = match &self.capability {
            Capability::Available(backend) => read_primary(backend.as_ref(), self.classes),
            Capability::Unavailable { reason, .. } => PrimaryOutcome::Unavailable {
                reason: reason.clone(),
            },
        };

        let fallback = match primary {
            PrimaryOutcome::Reported(_) => None,
            _ => Some(read_fallback(provider)),
        };

        TemperatureReport {
            primary_source: self.capability.backend_name().to_string(),
            primary,
            fallback_source: provider.sensor_source_name().to_string(),
            fallback,
        }
    }
}

fn read_primary(backend: &dyn HardwareBackend, classes: SensorClasses) -> PrimaryOutcome {
    let groups = match query_primary(backend, classes) {
        Ok(groups) => groups,
        Err(e) => {
            debug!("{} temperature query failed: {}", backend.name(), e);
            return PrimaryOutcome::Failed(e.to_string());
        }
    };

    if groups.iter().all(|g| g.readings.is_empty()) {
        return PrimaryOutcome::NoSensors;
    }

    // Groups left without a finite value are dropped; one valid group is enough.
    let valid: Vec<TemperatureGroup> = groups
        .into_iter()
        .filter_map(|mut group| {
            group.readings.retain(|r| r.current.is_finite());
            (!group.readings.is_empty()).then_some(group)
        })
        .collect();

    if valid.is_empty() {
        PrimaryOutcome::NoValidValues
    } else {
        PrimaryOutcome::Reported(valid)
    }
}

/// Opens a session, reads temperature sensors grouped by hardware item.
/// The session is dropped before this returns, whatever the outcome.
fn query_primary(
    backend: &dyn HardwareBackend,
    classes: SensorClasses,
) -> Result<Vec<TemperatureGroup>, SensorError> {
    let mut session = backend.open(classes)?;
    let items = session.hardware()?;

    let mut groups: Vec<TemperatureGroup> = Vec::new();
    for item in items.into_iter().filter(|item| classes.contains(item.class)) {
        let readings: Vec<TemperatureReading> = item
            .sensors
            .into_iter()
            .filter(|sensor| sensor.kind == SensorKind::Temperature)
            .map(|sensor| TemperatureReading {
                group: item.name.clone(),
                label: sensor.name,
                current: sensor.value.map(f64::from).unwrap_or(f64::NAN),
                high: None,
                critical: None,
            })
            .collect();
        if readings.is_empty() {
            continue;
        }

        match groups.iter_mut().find(|g| g.name == item.name) {
            Some(existing) => existing.readings.extend(readings),
            None => groups.push(TemperatureGroup {
                name: item.name,
                readings,
            }),
        }
    }
    debug!("{} reported {} temperature groups", backend.name(), groups.len());
    Ok(groups)
}

fn read_fallback<P>(provider: &mut P) -> FallbackOutcome
where
    P: MetricsProvider + ?Sized,
{
    match provider.temperatures() {
        Ok(groups) => {
            // Unreadable sensors come back as NaN
            let groups: Vec<TemperatureGroup> = groups
                .into_iter()
                .filter_map(|mut group| {
                    group.readings.retain(|r| r.current.is_finite());
                    (!group.readings.is_empty()).then_some(group)
                })
                .collect();
            if groups.is_empty() {
                FallbackOutcome::NotSupported
            } else {
                FallbackOutcome::Reported(groups)
            }
        }
        Err(SensorError::Unsupported) => FallbackOutcome::NotSupported,
        Err(e) => {
            debug!("{} temperature query failed: {}", provider.sensor_source_name(), e);
            FallbackOutcome::Failed(e.to_string())
        }
    }
}
