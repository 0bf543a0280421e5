use crate::{components::Component, data::snapshot::SystemSnapshot};
use std::fmt::{self, Write};

pub struct CpuComponent;

impl Component for CpuComponent {
    fn render(&self, snapshot: &SystemSnapshot, out: &mut dyn Write) -> fmt::Result {
        let cpu = &snapshot.cpu;
        writeln!(out, "--- CPU Usage ---")?;
        if cpu.averaged {
            writeln!(out, "  Overall: {:.1}% (avg of cores)", cpu.overall)?;
        } else {
            writeln!(out, "  Overall: {:.1}%", cpu.overall)?;
        }

        for (i, usage) in cpu.per_core.iter().enumerate() {
            writeln!(out, "  Core {}:   {:.1}%", i + 1, usage)?;
        }
        writeln!(out)
    }
}
