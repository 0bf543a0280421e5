use crate::{
    components::Component,
    data::snapshot::{FallbackOutcome, PrimaryOutcome, SystemSnapshot, TemperatureReport},
};
use std::fmt::{self, Write};

pub struct TemperatureComponent;

impl Component for TemperatureComponent {
    fn render(&self, snapshot: &SystemSnapshot, out: &mut dyn Write) -> fmt::Result {
        writeln!(out, "--- System Temperatures ---")?;
        render_report(&snapshot.temperatures, out)?;
        writeln!(out)
    }
}

fn render_report(report: &TemperatureReport, out: &mut dyn Write) -> fmt::Result {
    let primary = report.primary_source.as_str();
    match &report.primary {
        PrimaryOutcome::Unavailable { reason } => {
            writeln!(
                out,
                "  {} not found or failed to load. Error: {}",
                primary, reason
            )?;
            writeln!(
                out,
                "  (For GPU temperature monitoring, install the NVIDIA driver, which ships the NVML library.)"
            )?;
        }
        outcome => {
            writeln!(out, "  Attempting to read temperatures using {}...", primary)?;
            match outcome {
                PrimaryOutcome::Failed(e) => {
                    writeln!(out, "  {}: Failed. Error: {}", primary, e)?;
                }
                PrimaryOutcome::NoSensors => writeln!(
                    out,
                    "  {}: No temperature sensors found or no data reported by sensors.",
                    primary
                )?,
                PrimaryOutcome::NoValidValues => writeln!(
                    out,
                    "  {}: Sensors might be detected, but no valid temperature values available.",
                    primary
                )?,
                PrimaryOutcome::Reported(groups) => {
                    for group in groups {
                        writeln!(out, "  Sensor Group ({} - {}):", primary, group.name)?;
                        for reading in &group.readings {
                            writeln!(out, "    {}: {:.1}°C", reading.label, reading.current)?;
                        }
                    }
                }
                PrimaryOutcome::Unavailable { .. } => {}
            }
        }
    }

    let Some(fallback) = &report.fallback else {
        return Ok(());
    };
    let source = report.fallback_source.as_str();
    writeln!(out)?;
    writeln!(
        out,
        "  Attempting fallback with {} for temperatures...",
        source
    )?;
    match fallback {
        FallbackOutcome::NotSupported => {
            writeln!(
                out,
                "  {}: Temperature sensors not found or not supported on this system.",
                source
            )?;
            if !cfg!(windows) {
                writeln!(
                    out,
                    "  (On Linux, you might need 'lm-sensors' installed and configured.)"
                )?;
            }
        }
        FallbackOutcome::Failed(e) => {
            writeln!(out, "  {}: Could not retrieve temperatures: {}", source, e)?;
        }
        FallbackOutcome::Reported(groups) => {
            for group in groups {
                writeln!(out, "  Sensor Group ({} - {}):", source, group.name)?;
                for reading in &group.readings {
                    if reading.label.is_empty() {
                        writeln!(out, "    {:.1}°C", reading.current)?;
                    } else {
                        writeln!(out, "    {:.1}°C ({})", reading.current, reading.label)?;
                    }
                    if let Some(high) = threshold(reading.high) {
                        writeln!(out, "      High: {:.1}°C", high)?;
                    }
                    if let Some(critical) = threshold(reading.critical) {
                        writeln!(out, "      Critical: {:.1}°C", critical)?;
                    }
                }
            }
        }
    }
    Ok(())
}

/// Thresholds are shown only when the sensor actually reports one.
fn threshold(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0 && v.is_finite())
}
