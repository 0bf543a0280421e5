use crate::data::snapshot::SystemSnapshot;
use std::fmt::{self, Write};

pub mod cpu;
pub mod disk;
pub mod header;
pub mod memory;
pub mod network;
pub mod temperature;

/// The Component trait defines the interface that every display section implements
pub trait Component {
    /// Append this section's lines for `snapshot`
    fn render(&self, snapshot: &SystemSnapshot, out: &mut dyn Write) -> fmt::Result;
}

/// Sections in display order.
const SECTIONS: [&dyn Component; 6] = [
    &header::HeaderComponent,
    &cpu::CpuComponent,
    &memory::MemoryComponent,
    &disk::DiskComponent,
    &network::NetworkComponent,
    &temperature::TemperatureComponent,
];

/// Renders a full frame, footer included.
pub fn render_frame(snapshot: &SystemSnapshot) -> Result<String, fmt::Error> {
    let mut out = String::new();
    for section in SECTIONS {
        section.render(snapshot, &mut out)?;
    }
    writeln!(
        out,
        "\nUpdating in {} seconds...",
        snapshot.update_interval_secs
    )?;
    Ok(out)
}
