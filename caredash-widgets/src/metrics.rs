// caredash-widgets/src/metrics.rs
use caredash_core::{Event, EventResult, Widget};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget as RatatuiWidget},
};

use crate::common::{format_change, format_count, percent_change, percent_of, trend_color};
use crate::data::{self, MetricSample};

/// Which headline number a metric card shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Hospitals,
    Clinics,
    Providers,
    Devices,
}

impl Metric {
    pub fn sample(self) -> MetricSample {
        match self {
            Self::Hospitals => data::HOSPITALS,
            Self::Clinics => data::CLINICS,
            Self::Providers => data::PROVIDERS,
            Self::Devices => data::DEVICES,
        }
    }

    /// Label for the `active` figure
    fn active_label(self) -> &'static str {
        match self {
            Self::Hospitals | Self::Clinics => "operational",
            Self::Providers => "credentialed",
            Self::Devices => "online",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Month,
    Quarter,
}

impl Period {
    fn label(self) -> &'static str {
        match self {
            Self::Month => "vs last month",
            Self::Quarter => "vs last quarter",
        }
    }
}

/// Single headline figure with its trend
///
/// # Keyboard Shortcuts
/// - `p` - Toggle comparison period (month / quarter)
pub struct MetricCard {
    instance_id: String,
    metric: Metric,
    period: Period,
}

impl MetricCard {
    pub fn new(instance_id: &str, metric: Metric) -> Self {
        Self {
            instance_id: instance_id.to_string(),
            metric,
            period: Period::Month,
        }
    }

    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    pub fn period(&self) -> Period {
        self.period
    }

    fn change(&self) -> f64 {
        let sample = self.metric.sample();
        let baseline = match self.period {
            Period::Month => sample.last_month,
            Period::Quarter => sample.last_quarter,
        };
        percent_change(sample.total, baseline)
    }
}

impl Widget for MetricCard {
    fn on_event(&mut self, event: Event) -> EventResult {
        use crossterm::event::KeyCode;

        if let Event::Key(key) = event
            && key.code == KeyCode::Char('p')
        {
            self.period = match self.period {
                Period::Month => Period::Quarter,
                Period::Quarter => Period::Month,
            };
            return EventResult::Consumed;
        }

        EventResult::Ignored
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer) {
        let sample = self.metric.sample();
        let change = self.change();

        let lines = vec![
            Line::from(Span::styled(
                format_count(sample.total),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![
                Span::styled(format_change(change), Style::default().fg(trend_color(change))),
                Span::styled(
                    format!(" {}", self.period.label()),
                    Style::default().fg(Color::DarkGray),
                ),
            ]),
            Line::from(Span::styled(
                format!(
                    "{} {} ({:.0}%)",
                    format_count(sample.active),
                    self.metric.active_label(),
                    percent_of(sample.active, sample.total)
                ),
                Style::default().fg(Color::Gray),
            )),
        ];

        Paragraph::new(lines)
            .alignment(Alignment::Left)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent};

    fn rendered(card: &mut MetricCard) -> Vec<String> {
        let area = Rect::new(0, 0, 40, 3);
        let mut buf = Buffer::empty(area);
        card.render(area, &mut buf);
        (0..3)
            .map(|row| {
                (0..40)
                    .map(|col| buf.cell((col, row)).map(|c| c.symbol()).unwrap_or(" "))
                    .collect::<String>()
            })
            .collect()
    }

    #[test]
    fn test_card_shows_total_trend_and_active() {
        let mut card = MetricCard::new("metrics-hospitals-1", Metric::Hospitals);
        let rows = rendered(&mut card);

        assert!(rows[0].starts_with("148"));
        assert!(rows[1].contains("▲ 2.1% vs last month"), "{:?}", rows[1]);
        assert!(rows[2].contains("139 operational (94%)"), "{:?}", rows[2]);
        assert_eq!(card.instance_id(), "metrics-hospitals-1");
    }

    #[test]
    fn test_period_toggle() {
        let mut card = MetricCard::new("metrics-clinics-1", Metric::Clinics);
        let key = Event::Key(KeyEvent::from(KeyCode::Char('p')));

        assert_eq!(card.on_event(key.clone()), EventResult::Consumed);
        assert_eq!(card.period(), Period::Quarter);
        let rows = rendered(&mut card);
        assert!(rows[1].contains("▼"), "clinics shrank over the quarter");

        assert_eq!(
            card.on_event(Event::Key(KeyEvent::from(KeyCode::Char('x')))),
            EventResult::Ignored
        );
        card.on_event(key);
        assert_eq!(card.period(), Period::Month);
    }
}
