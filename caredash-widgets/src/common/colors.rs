// caredash-widgets/src/common/colors.rs
use crate::data::{DeviceStatus, Priority, ProtocolState};
use ratatui::style::Color;

/// Threshold constants for rate-based coloring
pub const LOW_THRESHOLD: f64 = 30.0;
pub const HIGH_THRESHOLD: f64 = 60.0;

/// Color for a response or completion rate (0.0 - 100.0)
///
/// Low rates need attention, so the scale runs red → yellow → green.
pub fn rate_color(percentage: f64) -> Color {
    if percentage < LOW_THRESHOLD {
        Color::Red
    } else if percentage < HIGH_THRESHOLD {
        Color::Yellow
    } else {
        Color::Green
    }
}

/// Green for growth, red for decline, gray for flat
pub fn trend_color(change: f64) -> Color {
    if change > 0.0 {
        Color::Green
    } else if change < 0.0 {
        Color::Red
    } else {
        Color::DarkGray
    }
}

pub fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::Urgent => Color::Red,
        Priority::High => Color::LightRed,
        Priority::Normal => Color::Yellow,
        Priority::Low => Color::DarkGray,
    }
}

pub fn device_color(status: DeviceStatus) -> Color {
    match status {
        DeviceStatus::Online => Color::Green,
        DeviceStatus::Maintenance => Color::Yellow,
        DeviceStatus::Offline => Color::Red,
    }
}

pub fn protocol_color(state: ProtocolState) -> Color {
    match state {
        ProtocolState::Active => Color::Green,
        ProtocolState::Review => Color::Cyan,
        ProtocolState::Draft => Color::DarkGray,
    }
}
