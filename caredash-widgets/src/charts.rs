// caredash-widgets/src/charts.rs
use caredash_core::{Event, EventResult, Widget};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Gauge, Paragraph, Sparkline, Widget as RatatuiWidget},
};

use crate::common::{device_color, format_count, percent_of};
use crate::data::{DEVICE_STATUS, QUARTER_VISITS, WEEKLY_VISITS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitsView {
    Week,
    Quarter,
}

/// Patient visit volume as daily bars or a weekly trend line
///
/// # Keyboard Shortcuts
/// - `v` - Switch between the last week and the last quarter
pub struct PatientVisitsChart {
    instance_id: String,
    view: VisitsView,
}

impl PatientVisitsChart {
    pub fn new(instance_id: &str) -> Self {
        Self {
            instance_id: instance_id.to_string(),
            view: VisitsView::Week,
        }
    }

    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    pub fn view(&self) -> VisitsView {
        self.view
    }

    fn render_week(&self, area: Rect, buf: &mut Buffer) {
        let bars: Vec<Bar> = WEEKLY_VISITS
            .iter()
            .map(|(day, visits)| {
                Bar::default()
                    .label(Line::from(*day))
                    .value(*visits)
                    .text_value(format!("{:.1}k", *visits as f64 / 1000.0))
            })
            .collect();

        // Spread the bars over the available width
        let bar_width = (area.width / WEEKLY_VISITS.len() as u16)
            .saturating_sub(1)
            .max(1);

        BarChart::default()
            .data(BarGroup::default().bars(&bars))
            .bar_width(bar_width)
            .bar_gap(1)
            .bar_style(Style::default().fg(Color::Cyan))
            .value_style(Style::default().fg(Color::Black).bg(Color::Cyan))
            .render(area, buf);
    }

    fn render_quarter(&self, area: Rect, buf: &mut Buffer) {
        if area.height < 2 {
            return;
        }

        let total: u64 = QUARTER_VISITS.iter().sum();
        let summary = Rect::new(area.x, area.y, area.width, 1);
        let chart = Rect::new(area.x, area.y + 1, area.width, area.height - 1);

        Paragraph::new(format!(
            "{} visits over {} weeks",
            format_count(total),
            QUARTER_VISITS.len()
        ))
        .style(Style::default().fg(Color::Gray))
        .render(summary, buf);

        Sparkline::default()
            .data(&QUARTER_VISITS)
            .style(Style::default().fg(Color::Cyan))
            .render(chart, buf);
    }
}

impl Widget for PatientVisitsChart {
    fn on_event(&mut self, event: Event) -> EventResult {
        use crossterm::event::KeyCode;

        if let Event::Key(key) = event
            && key.code == KeyCode::Char('v')
        {
            self.view = match self.view {
                VisitsView::Week => VisitsView::Quarter,
                VisitsView::Quarter => VisitsView::Week,
            };
            return EventResult::Consumed;
        }

        EventResult::Ignored
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer) {
        match self.view {
            VisitsView::Week => self.render_week(area, buf),
            VisitsView::Quarter => self.render_quarter(area, buf),
        }
    }
}

/// Fleet breakdown by device status
pub struct DeviceStatusChart {
    instance_id: String,
}

impl DeviceStatusChart {
    pub fn new(instance_id: &str) -> Self {
        Self {
            instance_id: instance_id.to_string(),
        }
    }

    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }
}

impl Widget for DeviceStatusChart {
    fn render(&mut self, area: Rect, buf: &mut Buffer) {
        let fleet: u64 = DEVICE_STATUS.iter().map(|(_, count)| count).sum();

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                DEVICE_STATUS
                    .iter()
                    .map(|_| Constraint::Length(1))
                    .chain(std::iter::once(Constraint::Min(0))),
            )
            .split(area);

        for ((status, count), row) in DEVICE_STATUS.iter().zip(rows.iter()) {
            let percent = percent_of(*count, fleet);
            Gauge::default()
                .gauge_style(Style::default().fg(device_color(*status)).bg(Color::Black))
                .ratio(percent / 100.0)
                .label(format!(
                    "{} {} ({:.1}%)",
                    status.label(),
                    format_count(*count),
                    percent
                ))
                .render(*row, buf);
        }
    }
}
