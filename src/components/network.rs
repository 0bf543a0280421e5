use crate::{components::Component, data::snapshot::SystemSnapshot, utils::format_bytes};
use std::fmt::{self, Write};

pub struct NetworkComponent;

impl Component for NetworkComponent {
    fn render(&self, snapshot: &SystemSnapshot, out: &mut dyn Write) -> fmt::Result {
        let net = &snapshot.network;
        writeln!(out, "--- Network Activity ---")?;
        writeln!(out, "  Total Sent:      {}", format_bytes(net.total_sent as f64))?;
        writeln!(
            out,
            "  Total Received:  {}",
            format_bytes(net.total_received as f64)
        )?;
        writeln!(out, "  Upload Speed:    {}/s", format_bytes(net.upload_bps))?;
        writeln!(out, "  Download Speed:  {}/s", format_bytes(net.download_bps))?;
        writeln!(out)
    }
}
