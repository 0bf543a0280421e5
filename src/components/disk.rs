use crate::{
    components::Component, data::snapshot::SystemSnapshot, error::SampleError,
    utils::format_bytes,
};
use std::fmt::{self, Write};

pub struct DiskComponent;

impl Component for DiskComponent {
    fn render(&self, snapshot: &SystemSnapshot, out: &mut dyn Write) -> fmt::Result {
        writeln!(out, "--- Disk Usage ---")?;
        for report in &snapshot.disks {
            let path = report.path.display();
            match &report.usage {
                Ok(disk) => {
                    writeln!(out, "  Disk ({}):", path)?;
                    writeln!(out, "    Total:     {}", format_bytes(disk.total as f64))?;
                    writeln!(
                        out,
                        "    Used:      {} ({:.1}%)",
                        format_bytes(disk.used as f64),
                        disk.percent
                    )?;
                    writeln!(out, "    Free:      {}", format_bytes(disk.free as f64))?;
                }
                Err(SampleError::PathNotFound(_)) => {
                    writeln!(out, "  Disk ({}): Not found or inaccessible.", path)?;
                }
                Err(e) => {
                    writeln!(out, "  Disk ({}): Error - {}", path, e)?;
                }
            }
        }
        writeln!(out)
    }
}
