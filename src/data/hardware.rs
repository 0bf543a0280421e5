//! Primary hardware-sensor backend.
//!
//! A backend is probed once at startup and the loaded library stays
//! initialised for the whole process. Every cycle opens a short-lived session
//! that acquires the per-device handles for the enabled hardware classes,
//! reads them and drops them again. Sessions release their handles in `Drop`,
//! so early returns and panics close them too.

use crate::error::SensorError;
use nvml_wrapper::enum_wrappers::device::TemperatureSensor;
use nvml_wrapper::{Device, Nvml};
use tracing::{debug, info, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HardwareClass {
    Cpu,
    GpuNvidia,
    GpuAmd,
}

/// Which hardware classes a session should read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SensorClasses {
    pub cpu: bool,
    pub gpu_nvidia: bool,
    pub gpu_amd: bool,
}

impl SensorClasses {
    pub const CPU_AND_GPU: Self = Self {
        cpu: true,
        gpu_nvidia: true,
        gpu_amd: true,
    };

    pub fn contains(&self, class: HardwareClass) -> bool {
        match class {
            HardwareClass::Cpu => self.cpu,
            HardwareClass::GpuNvidia => self.gpu_nvidia,
            HardwareClass::GpuAmd => self.gpu_amd,
        }
    }
}

/// What a sensor measures. Only temperatures are read; backends may report
/// other kinds alongside them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SensorKind {
    Temperature,
    Load,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Sensor {
    pub kind: SensorKind,
    pub name: String,
    /// `None` when the hardware did not report a value this time.
    pub value: Option<f32>,
}

/// One refreshed piece of hardware and its sensors.
#[derive(Clone, Debug, PartialEq)]
pub struct HardwareItem {
    pub name: String,
    pub class: HardwareClass,
    pub sensors: Vec<Sensor>,
}

/// An open handle on a backend. Closed on drop.
pub trait HardwareSession {
    /// Refreshes every enabled hardware item and returns its sensors.
    fn hardware(&mut self) -> Result<Vec<HardwareItem>, SensorError>;
}

pub trait HardwareBackend {
    fn name(&self) -> &str;

    fn open(&self, classes: SensorClasses)
        -> Result<Box<dyn HardwareSession + '_>, SensorError>;
}

/// Result of the startup probe, reused for the whole process lifetime.
pub enum Capability {
    Available(Box<dyn HardwareBackend>),
    Unavailable { backend: String, reason: String },
}

impl Capability {
    /// Tries to load NVML.
    pub fn probe() -> Self {
        match NvmlBackend::init() {
            Ok(backend) => {
                info!("Hardware sensor backend {} loaded", backend.name());
                Capability::Available(Box::new(backend))
            }
            Err(e) => {
                info!("Hardware sensor backend NVML unavailable: {}", e);
                Capability::Unavailable {
                    backend: NVML_NAME.to_string(),
                    reason: e.to_string(),
                }
            }
        }
    }

    pub fn backend_name(&self) -> &str {
        match self {
            Capability::Available(backend) => backend.name(),
            Capability::Unavailable { backend, .. } => backend,
        }
    }

    pub fn unavailable_reason(&self) -> Option<&str> {
        match self {
            Capability::Available(_) => None,
            Capability::Unavailable { reason, .. } => Some(reason),
        }
    }

    /// Remediation text for a fatal `error` that looks like it came from
    /// loading the backend. `None` if the backend loaded or the error is unrelated.
    pub fn load_failure_hint(&self, error: &str) -> Option<String> {
        let Capability::Unavailable { backend, reason } = self else {
            return None;
        };
        let related = error.contains(backend.as_str())
            || NVML_LIBRARIES.iter().any(|lib| error.contains(lib));
        if !related {
            return None;
        }
        Some(format!(
            "This might be related to loading the {backend} library.\n\
             Ensure the NVIDIA driver is installed; it provides {}.\n\
             Original load error: {reason}",
            NVML_LIBRARIES.join(" / ")
        ))
    }
}

impl std::fmt::Debug for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Capability::Available(backend) => {
                f.debug_tuple("Available").field(&backend.name()).finish()
            }
            Capability::Unavailable { backend, reason } => f
                .debug_struct("Unavailable")
                .field("backend", backend)
                .field("reason", reason)
                .finish(),
        }
    }
}

const NVML_NAME: &str = "NVML";
const NVML_LIBRARIES: [&str; 2] = ["libnvidia-ml", "nvml.dll"];

/// NVIDIA Management Library. Only serves [`HardwareClass::GpuNvidia`].
pub struct NvmlBackend {
    nvml: Nvml,
}

impl NvmlBackend {
    pub fn init() -> Result<Self, SensorError> {
        let nvml = Nvml::init()?;
        Ok(Self { nvml })
    }
}

impl HardwareBackend for NvmlBackend {
    fn name(&self) -> &str {
        NVML_NAME
    }

    fn open(
        &self,
        classes: SensorClasses,
    ) -> Result<Box<dyn HardwareSession + '_>, SensorError> {
        if !classes.contains(HardwareClass::GpuNvidia) {
            return Ok(Box::new(NvmlSession {
                devices: Vec::new(),
            }));
        }

        let device_count = self.nvml.device_count()?;
        let mut devices = Vec::with_capacity(device_count as usize);
        for i in 0..device_count {
            match self.nvml.device_by_index(i) {
                Ok(device) => devices.push((i, device)),
                Err(e) => warn!("Skipping NVIDIA device {}: {}", i, e),
            }
        }
        debug!("Opened NVML session with {} devices", devices.len());
        Ok(Box::new(NvmlSession { devices }))
    }
}

/// Device handles acquired for one cycle, with their NVML index.
struct NvmlSession<'a> {
    devices: Vec<(u32, Device<'a>)>,
}

impl HardwareSession for NvmlSession<'_> {
    fn hardware(&mut self) -> Result<Vec<HardwareItem>, SensorError> {
        let items = self
            .devices
            .iter()
            .map(|(i, device)| {
                let name = device
                    .name()
                    .unwrap_or_else(|_| format!("NVIDIA GPU {}", i));
                let temperature = device
                    .temperature(TemperatureSensor::Gpu)
                    .map(|t| t as f32)
                    .ok();
                HardwareItem {
                    name,
                    class: HardwareClass::GpuNvidia,
                    sensors: vec![Sensor {
                        kind: SensorKind::Temperature,
                        name: "GPU Core".to_string(),
                        value: temperature,
                    }],
                }
            })
            .collect();
        Ok(items)
    }
}

impl Drop for NvmlSession<'_> {
    fn drop(&mut self) {
        debug!("Closing NVML session, releasing {} devices", self.devices.len());
        self.devices.clear();
    }
}
