use crate::{components::Component, data::snapshot::SystemSnapshot};
use std::fmt::{self, Write};

pub struct HeaderComponent;

impl Component for HeaderComponent {
    fn render(&self, snapshot: &SystemSnapshot, out: &mut dyn Write) -> fmt::Result {
        writeln!(out, "System Performance & Temperature Monitor")?;
        writeln!(out, "----------------------------------------")?;
        writeln!(
            out,
            "Last updated: {}",
            snapshot.taken_at.format("%Y-%m-%d %H:%M:%S")
        )?;
        writeln!(out, "Host: {}", snapshot.hostname)?;
        writeln!(out, "Press Ctrl+C to exit.")?;
        writeln!(out)
    }
}
