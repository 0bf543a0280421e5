//! Terminal system monitor: CPU, memory, disks, network throughput and
//! temperatures, redrawn every few seconds.

pub mod components;
pub mod config;
pub mod data;
pub mod error;
pub mod tui;
pub mod utils;
