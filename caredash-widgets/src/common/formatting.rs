// caredash-widgets/src/common/formatting.rs

/// Format a count with thousands separators
///
/// # Example
/// ```rust
/// use caredash_widgets::format_count;
/// assert_eq!(format_count(23910), "23,910");
/// ```
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Percentage change from `previous` to `current`; zero when there is no baseline
pub fn percent_change(current: u64, previous: u64) -> f64 {
    if previous == 0 {
        return 0.0;
    }
    (current as f64 - previous as f64) * 100.0 / previous as f64
}

/// Signed change with an arrow, e.g. "▲ 2.1%"
pub fn format_change(change: f64) -> String {
    let arrow = if change > 0.0 {
        "▲"
    } else if change < 0.0 {
        "▼"
    } else {
        "="
    };
    format!("{} {:.1}%", arrow, change.abs())
}

/// Share of `part` in `whole` as a percentage
pub fn percent_of(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Compact age of an event given in minutes
pub fn format_minutes_ago(minutes: u32) -> String {
    match minutes {
        0 => "just now".to_string(),
        1..=59 => format!("{}m ago", minutes),
        60..=1439 => format!("{}h ago", minutes / 60),
        _ => format!("{}d ago", minutes / 1440),
    }
}

/// Compact age given in hours
pub fn format_hours(hours: u32) -> String {
    if hours < 24 {
        format!("{}h", hours)
    } else {
        format!("{}d {}h", hours / 24, hours % 24)
    }
}
