use crate::{components::Component, data::snapshot::SystemSnapshot, utils::format_bytes};
use std::fmt::{self, Write};

pub struct MemoryComponent;

impl Component for MemoryComponent {
    fn render(&self, snapshot: &SystemSnapshot, out: &mut dyn Write) -> fmt::Result {
        let mem = &snapshot.memory;
        writeln!(out, "--- Memory Usage (RAM) ---")?;
        writeln!(out, "  Total:     {}", format_bytes(mem.total as f64))?;
        writeln!(out, "  Available: {}", format_bytes(mem.available as f64))?;
        writeln!(
            out,
            "  Used:      {} ({:.1}%)",
            format_bytes(mem.used as f64),
            mem.used_percent
        )?;
        writeln!(out, "  Free:      {}", format_bytes(mem.free as f64))?;
        writeln!(out, "  Swap Total: {}", format_bytes(mem.swap_total as f64))?;
        writeln!(
            out,
            "  Swap Used:  {} ({:.1}%)",
            format_bytes(mem.swap_used as f64),
            mem.swap_percent
        )?;
        writeln!(out)
    }
}
