// Main loop: frames, shutdown between cycles

mod common;

use common::*;
use std::path::PathBuf;
use std::time::Duration;
use syscheck::config::AppConfig;
use syscheck::data::collector::DataCollector;
use syscheck::data::hardware::Capability;
use syscheck::data::{calibrate, DataManager};
use syscheck::tui::Screen;
use tokio::sync::oneshot;

fn manager(interval: Duration) -> DataManager<FakeProvider> {
    let config = AppConfig {
        update_interval_secs: 2,
        disks: vec![PathBuf::from("/"), PathBuf::from("/mnt/missing")],
    };
    let capability = Capability::Unavailable {
        backend: "NVML".to_string(),
        reason: "not loaded".to_string(),
    };
    let collector = DataCollector::new(FakeProvider::default(), capability, &config);
    DataManager::new(collector, interval)
}

#[tokio::test]
async fn shutdown_during_sleep_stops_before_next_cycle() {
    let mut manager = manager(Duration::from_secs(60));
    let mut screen = Screen::new(Vec::new());
    let (tx, rx) = oneshot::channel();
    tx.send(()).unwrap();

    let cycles = manager.run(&mut screen, rx).await.unwrap();

    assert_eq!(cycles, 1);
    assert_eq!(manager.collector.provider().memory_calls, 1);

    let out = String::from_utf8(screen.into_inner()).unwrap();
    assert_eq!(out.matches("Last updated:").count(), 1);
    // the single frame is complete
    assert!(out.trim_end().ends_with("Updating in 2 seconds..."));
}

#[tokio::test]
async fn keeps_cycling_until_shutdown() {
    let mut manager = manager(Duration::from_millis(5));
    let mut screen = Screen::new(Vec::new());
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(60)).await;
        let _ = tx.send(());
    });

    let cycles = manager.run(&mut screen, rx).await.unwrap();

    assert!(cycles >= 2, "expected several cycles, got {}", cycles);
    let out = String::from_utf8(screen.into_inner()).unwrap();
    assert_eq!(out.matches("Last updated:").count() as u64, cycles);
}

#[tokio::test]
async fn frame_sections_are_in_order() {
    let mut manager = manager(Duration::from_secs(60));
    let mut screen = Screen::new(Vec::new());
    let (tx, rx) = oneshot::channel();
    tx.send(()).unwrap();

    manager.run(&mut screen, rx).await.unwrap();

    let out = String::from_utf8(screen.into_inner()).unwrap();
    let order = [
        "System Performance & Temperature Monitor",
        "--- CPU Usage ---",
        "--- Memory Usage (RAM) ---",
        "--- Disk Usage ---",
        "--- Network Activity ---",
        "--- System Temperatures ---",
        "Updating in 2 seconds...",
    ];
    let positions: Vec<usize> = order
        .iter()
        .map(|s| out.find(s).unwrap_or_else(|| panic!("missing {:?}", s)))
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));

    assert!(out.contains("  Overall: 20.0% (avg of cores)"));
    assert!(out.contains("  Core 2:   30.0%"));
    assert!(out.contains("  Disk (/):\n    Total:     100.00GB"));
    assert!(out.contains("  Disk (/mnt/missing): Not found or inaccessible."));
    assert!(out.contains("  Total Sent:      1000.00B"));
    assert!(out.contains("  Upload Speed:    0.00B/s"));
    assert!(out.contains("NVML not found or failed to load. Error: not loaded"));
    assert!(out.contains("  Sensor Group (fake-os - coretemp):\n    45.0°C (Package id 0)"));
}

#[tokio::test]
async fn disk_io_error_is_shown_inline() {
    let config = AppConfig {
        update_interval_secs: 2,
        disks: vec![PathBuf::from("/mnt/flaky"), PathBuf::from("/")],
    };
    let provider = FakeProvider {
        failing_disks: vec![PathBuf::from("/mnt/flaky")],
        ..FakeProvider::default()
    };
    let capability = Capability::Unavailable {
        backend: "NVML".to_string(),
        reason: "not loaded".to_string(),
    };
    let collector = DataCollector::new(provider, capability, &config);
    let mut manager = DataManager::new(collector, Duration::from_secs(60));
    let mut screen = Screen::new(Vec::new());
    let (tx, rx) = oneshot::channel();
    tx.send(()).unwrap();

    manager.run(&mut screen, rx).await.unwrap();

    let out = String::from_utf8(screen.into_inner()).unwrap();
    assert!(out.contains("  Disk (/mnt/flaky): Error - I/O error: device not ready\n"));
    // the failing path does not hide the next one
    assert!(out.contains("  Disk (/):\n    Total:     100.00GB"));
}

#[tokio::test]
async fn interrupt_during_calibration_skips_the_loop() {
    let (tx, rx) = oneshot::channel();
    tx.send(()).unwrap();

    assert!(calibrate(rx).await.is_none());
}

#[tokio::test]
async fn calibration_hands_back_a_live_receiver() {
    let (tx, rx) = oneshot::channel();
    let rx = calibrate(rx).await.expect("not interrupted");
    tx.send(()).unwrap();

    let mut manager = manager(Duration::from_secs(60));
    let mut screen = Screen::new(Vec::new());
    assert_eq!(manager.run(&mut screen, rx).await.unwrap(), 1);
}

#[tokio::test]
async fn lost_signal_listener_keeps_monitor_running() {
    let (tx, rx) = oneshot::channel::<()>();
    drop(tx);
    let rx = calibrate(rx).await.expect("not interrupted");

    let mut manager = manager(Duration::from_millis(5));
    let mut screen = Screen::new(Vec::new());
    let run = manager.run(&mut screen, rx);
    // never stops on its own
    assert!(tokio::time::timeout(Duration::from_millis(40), run)
        .await
        .is_err());
}
