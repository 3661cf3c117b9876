//! Shared fixtures for core tests: a small registry and buffer helpers.

#![cfg(test)]

use crate::{
    Widget, WidgetCategory, WidgetDescriptor, WidgetRegistry, WidgetSize, register_widget,
};
use ratatui::{buffer::Buffer, layout::Rect, style::Style};
use std::sync::Arc;

/// Content that prints its instance id
pub struct IdLabel {
    id: String,
}

impl IdLabel {
    pub fn new(id: &str) -> Self {
        Self { id: id.to_string() }
    }
}

impl Widget for IdLabel {
    fn render(&mut self, area: Rect, buf: &mut Buffer) {
        if area.height > 0 {
            buf.set_stringn(area.x, area.y, &self.id, area.width as usize, Style::default());
        }
    }
}

pub fn sample_registry() -> Arc<WidgetRegistry> {
    let mut registry = WidgetRegistry::new();
    let descriptors = [
        (
            "metrics-hospitals",
            "Hospitals",
            "Registered hospitals",
            WidgetSize::Small,
            WidgetCategory::Metrics,
        ),
        (
            "metrics-clinics",
            "Clinics",
            "Active clinics",
            WidgetSize::Small,
            WidgetCategory::Metrics,
        ),
        (
            "chart-patient-visits",
            "Patient Visits",
            "Visits over the last week",
            WidgetSize::Medium,
            WidgetCategory::Charts,
        ),
        (
            "activity-recent",
            "Recent Activity",
            "",
            WidgetSize::Large,
            WidgetCategory::Activity,
        ),
    ];

    for (kind, title, description, size, category) in descriptors {
        register_widget!(
            registry,
            WidgetDescriptor::new(kind, title, description, size, category),
            IdLabel
        )
        .expect("fixture kinds are unique");
    }

    Arc::new(registry)
}

/// All text of one buffer row
pub fn row_text(buffer: &Buffer, row: u16) -> String {
    let area = buffer.area();
    (0..area.width)
        .map(|col| {
            buffer
                .cell((area.x + col, area.y + row))
                .map(|cell| cell.symbol())
                .unwrap_or(" ")
        })
        .collect()
}

/// Number of rows containing `text`
pub fn count_rows_with(buffer: &Buffer, text: &str) -> usize {
    (0..buffer.area().height)
        .filter(|&row| row_text(buffer, row).contains(text))
        .count()
}

pub fn buffer_contains(buffer: &Buffer, text: &str) -> bool {
    count_rows_with(buffer, text) > 0
}
