/// Utility functions for the application

const UNITS: [&str; 6] = ["", "K", "M", "G", "T", "P"];

/// Convert bytes to human-readable format using 1024-based units.
///
/// Picks the largest unit whose scaled value stays below 1024; `P` has no
/// upper bound.
///
/// ```
/// assert_eq!(syscheck::utils::format_bytes(1_253_656.0), "1.20MB");
/// ```
pub fn format_bytes(bytes: f64) -> String {
    let mut size = bytes;
    let mut unit_idx = 0;

    while size >= 1024.0 && unit_idx < UNITS.len() - 1 {
        size /= 1024.0;
        unit_idx += 1;
    }

    format!("{:.2}{}B", size, UNITS[unit_idx])
}

/// Percentage of `part` in `total`, 0 when `total` is 0.
pub fn percent_of(part: u64, total: u64) -> f64 {
    if total > 0 {
        (part as f64 / total as f64) * 100.0
    } else {
        0.0
    }
}
