// caredash-widgets/src/management.rs
use caredash_core::{Event, EventResult, Widget};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, List, ListItem, Row, Table, Widget as RatatuiWidget},
};

use crate::common::{
    format_count, format_hours, percent_of, priority_color, protocol_color, rate_color,
};
use crate::data::{OPEN_TICKETS, PROTOCOLS, ProtocolState, SURVEYS, Ticket};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketSort {
    Priority,
    Age,
    Facility,
}

impl TicketSort {
    fn next(self) -> Self {
        match self {
            Self::Priority => Self::Age,
            Self::Age => Self::Facility,
            Self::Facility => Self::Priority,
        }
    }
}

/// Open support tickets
///
/// # Keyboard Shortcuts
/// - `s` - Cycle sort order (priority → age → facility)
pub struct TicketsWidget {
    instance_id: String,
    sort_by: TicketSort,
}

impl TicketsWidget {
    pub fn new(instance_id: &str) -> Self {
        Self {
            instance_id: instance_id.to_string(),
            sort_by: TicketSort::Priority,
        }
    }

    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    pub fn sort_by(&self) -> TicketSort {
        self.sort_by
    }

    /// Tickets in display order
    pub fn tickets(&self) -> Vec<Ticket> {
        let mut tickets = OPEN_TICKETS.to_vec();
        match self.sort_by {
            TicketSort::Priority => {
                tickets.sort_by(|a, b| a.priority.cmp(&b.priority).then(a.age_hours.cmp(&b.age_hours)))
            }
            TicketSort::Age => tickets.sort_by(|a, b| b.age_hours.cmp(&a.age_hours)),
            TicketSort::Facility => tickets.sort_by(|a, b| a.facility.cmp(b.facility)),
        }
        tickets
    }
}

impl Widget for TicketsWidget {
    fn on_event(&mut self, event: Event) -> EventResult {
        use crossterm::event::KeyCode;

        if let Event::Key(key) = event
            && key.code == KeyCode::Char('s')
        {
            self.sort_by = self.sort_by.next();
            return EventResult::Consumed;
        }

        EventResult::Ignored
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer) {
        let header = Row::new(vec!["#", "Subject", "Facility", "Priority", "Age"]).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

        let rows: Vec<Row> = self
            .tickets()
            .into_iter()
            .map(|t| {
                Row::new(vec![
                    Cell::from(t.number.to_string()),
                    Cell::from(t.subject),
                    Cell::from(t.facility),
                    Cell::from(t.priority.label())
                        .style(Style::default().fg(priority_color(t.priority))),
                    Cell::from(format_hours(t.age_hours)),
                ])
            })
            .collect();

        let widths = [
            Constraint::Length(5),
            Constraint::Percentage(35),
            Constraint::Percentage(30),
            Constraint::Length(8),
            Constraint::Length(7),
        ];

        Table::new(rows, widths)
            .header(header)
            .render(area, buf);
    }
}

/// Clinical protocols and where they are rolled out
pub struct ProtocolsWidget {
    instance_id: String,
}

impl ProtocolsWidget {
    pub fn new(instance_id: &str) -> Self {
        Self {
            instance_id: instance_id.to_string(),
        }
    }

    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }
}

impl Widget for ProtocolsWidget {
    fn render(&mut self, area: Rect, buf: &mut Buffer) {
        let items: Vec<ListItem> = PROTOCOLS
            .iter()
            .map(|p| {
                let reach = match p.state {
                    ProtocolState::Active => format!(" · {} sites", p.sites),
                    _ => String::new(),
                };
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{:<10}", p.state.label()),
                        Style::default().fg(protocol_color(p.state)),
                    ),
                    Span::raw(format!("{} v{}", p.name, p.version)),
                    Span::styled(reach, Style::default().fg(Color::DarkGray)),
                ]))
            })
            .collect();

        List::new(items).render(area, buf);
    }
}

/// Patient and staff surveys with response rates
pub struct SurveysWidget {
    instance_id: String,
}

impl SurveysWidget {
    pub fn new(instance_id: &str) -> Self {
        Self {
            instance_id: instance_id.to_string(),
        }
    }

    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }
}

impl Widget for SurveysWidget {
    fn render(&mut self, area: Rect, buf: &mut Buffer) {
        let header = Row::new(vec!["Survey", "Sent", "Responses", "Rate", "Closes"]).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

        let rows: Vec<Row> = SURVEYS
            .iter()
            .map(|s| {
                let rate = percent_of(u64::from(s.responses), u64::from(s.sent));
                let closes = match s.days_left {
                    0 => "today".to_string(),
                    1 => "in 1 day".to_string(),
                    days => format!("in {} days", days),
                };
                Row::new(vec![
                    Cell::from(s.title),
                    Cell::from(format_count(u64::from(s.sent))),
                    Cell::from(format_count(u64::from(s.responses))),
                    Cell::from(format!("{:.0}%", rate))
                        .style(Style::default().fg(rate_color(rate))),
                    Cell::from(closes),
                ])
            })
            .collect();

        let widths = [
            Constraint::Min(20),
            Constraint::Length(8),
            Constraint::Length(10),
            Constraint::Length(6),
            Constraint::Length(12),
        ];

        Table::new(rows, widths)
            .header(header)
            .render(area, buf);
    }
}
