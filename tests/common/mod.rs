// Fake metrics provider and hardware backend shared by integration tests

#![allow(dead_code)]

use std::cell::Cell;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use syscheck::data::hardware::{
    HardwareBackend, HardwareClass, HardwareItem, HardwareSession, Sensor, SensorClasses,
    SensorKind,
};
use syscheck::data::provider::MetricsProvider;
use syscheck::data::snapshot::{
    DiskUsage, MemoryStats, NetCounters, TemperatureGroup, TemperatureReading,
};
use syscheck::error::{SampleError, SensorError};

pub struct FakeProvider {
    pub per_core: Vec<f32>,
    pub aggregate: f32,
    pub memory: MemoryStats,
    pub disks: HashMap<PathBuf, DiskUsage>,
    /// Paths whose query fails with an I/O error instead of "not found".
    pub failing_disks: Vec<PathBuf>,
    pub counters: NetCounters,
    pub temperatures: Result<Vec<TemperatureGroup>, String>,
    pub memory_calls: usize,
    pub temperature_calls: usize,
}

impl Default for FakeProvider {
    fn default() -> Self {
        Self {
            per_core: vec![10.0, 30.0],
            aggregate: 20.0,
            memory: MemoryStats {
                total: 8 * 1024 * 1024 * 1024,
                available: 6 * 1024 * 1024 * 1024,
                used: 2 * 1024 * 1024 * 1024,
                free: 5 * 1024 * 1024 * 1024,
                swap_total: 2 * 1024 * 1024 * 1024,
                swap_used: 512 * 1024 * 1024,
            },
            disks: HashMap::from([(PathBuf::from("/"), disk(100 * GIB, 25 * GIB))]),
            failing_disks: Vec::new(),
            counters: NetCounters {
                bytes_sent: 1000,
                bytes_received: 2000,
            },
            temperatures: Ok(vec![group(
                "coretemp",
                vec![reading("coretemp", "Package id 0", 45.0)],
            )]),
            memory_calls: 0,
            temperature_calls: 0,
        }
    }
}

impl MetricsProvider for FakeProvider {
    fn per_core_usage(&mut self) -> Vec<f32> {
        self.per_core.clone()
    }

    fn aggregate_usage(&mut self) -> f32 {
        self.aggregate
    }

    fn memory(&mut self) -> MemoryStats {
        self.memory_calls += 1;
        self.memory
    }

    fn disk_usage(&mut self, path: &Path) -> Result<DiskUsage, SampleError> {
        if self.failing_disks.iter().any(|p| p == path) {
            return Err(SampleError::Io(io::Error::new(
                io::ErrorKind::Other,
                "device not ready",
            )));
        }
        self.disks
            .get(path)
            .copied()
            .ok_or_else(|| SampleError::PathNotFound(path.to_path_buf()))
    }

    fn network_counters(&mut self) -> NetCounters {
        self.counters
    }

    fn temperatures(&mut self) -> Result<Vec<TemperatureGroup>, SensorError> {
        self.temperature_calls += 1;
        self.temperatures.clone().map_err(SensorError::Backend)
    }

    fn sensor_source_name(&self) -> &str {
        "fake-os"
    }
}

pub const GIB: u64 = 1024 * 1024 * 1024;

pub fn disk(total: u64, used: u64) -> DiskUsage {
    DiskUsage {
        total,
        used,
        free: total - used,
        percent: used as f64 / total as f64 * 100.0,
    }
}

pub fn reading(group: &str, label: &str, current: f64) -> TemperatureReading {
    TemperatureReading {
        group: group.to_string(),
        label: label.to_string(),
        current,
        high: None,
        critical: None,
    }
}

pub fn group(name: &str, readings: Vec<TemperatureReading>) -> TemperatureGroup {
    TemperatureGroup {
        name: name.to_string(),
        readings,
    }
}

pub fn temp_sensor(name: &str, value: Option<f32>) -> Sensor {
    Sensor {
        kind: SensorKind::Temperature,
        name: name.to_string(),
        value,
    }
}

pub fn gpu(name: &str, sensors: Vec<Sensor>) -> HardwareItem {
    HardwareItem {
        name: name.to_string(),
        class: HardwareClass::GpuNvidia,
        sensors,
    }
}

/// Backend returning canned hardware items; counts session opens and closes.
pub struct FakeBackend {
    pub items: Result<Vec<HardwareItem>, String>,
    pub fail_open: bool,
    pub opened: Rc<Cell<usize>>,
    pub closed: Rc<Cell<usize>>,
}

impl FakeBackend {
    pub fn with_items(items: Vec<HardwareItem>) -> Self {
        Self {
            items: Ok(items),
            fail_open: false,
            opened: Rc::new(Cell::new(0)),
            closed: Rc::new(Cell::new(0)),
        }
    }
}

impl HardwareBackend for FakeBackend {
    fn name(&self) -> &str {
        "fake-hw"
    }

    fn open(
        &self,
        _classes: SensorClasses,
    ) -> Result<Box<dyn HardwareSession + '_>, SensorError> {
        if self.fail_open {
            return Err(SensorError::Backend("device busy".to_string()));
        }
        self.opened.set(self.opened.get() + 1);
        Ok(Box::new(FakeSession {
            items: self.items.clone(),
            closed: self.closed.clone(),
        }))
    }
}

struct FakeSession {
    items: Result<Vec<HardwareItem>, String>,
    closed: Rc<Cell<usize>>,
}

impl HardwareSession for FakeSession {
    fn hardware(&mut self) -> Result<Vec<HardwareItem>, SensorError> {
        self.items.clone().map_err(SensorError::Backend)
    }
}

impl Drop for FakeSession {
    fn drop(&mut self) {
        self.closed.set(self.closed.get() + 1);
    }
}
