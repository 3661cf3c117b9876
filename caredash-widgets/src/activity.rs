// caredash-widgets/src/activity.rs
use caredash_core::{Event, EventResult, Widget};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, StatefulWidget},
};

use crate::common::format_minutes_ago;
use crate::data::RECENT_ACTIVITY;

/// Newest-first feed of portal events
///
/// # Keyboard Shortcuts
/// - `Up`/`k`, `Down`/`j` - Move the selection
pub struct ActivityFeed {
    instance_id: String,
    state: ListState,
}

impl ActivityFeed {
    pub fn new(instance_id: &str) -> Self {
        Self {
            instance_id: instance_id.to_string(),
            state: ListState::default(),
        }
    }

    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    pub fn selected(&self) -> Option<usize> {
        self.state.selected()
    }
}

impl Widget for ActivityFeed {
    fn on_mount(&mut self) {
        self.state.select(Some(0));
    }

    fn on_event(&mut self, event: Event) -> EventResult {
        use crossterm::event::KeyCode;

        if let Event::Key(key) = event {
            let last = RECENT_ACTIVITY.len() - 1;
            let current = self.state.selected().unwrap_or(0);
            match key.code {
                KeyCode::Down | KeyCode::Char('j') => {
                    self.state.select(Some((current + 1).min(last)));
                    return EventResult::Consumed;
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    self.state.select(Some(current.saturating_sub(1)));
                    return EventResult::Consumed;
                }
                _ => {}
            }
        }

        EventResult::Ignored
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer) {
        let items: Vec<ListItem> = RECENT_ACTIVITY
            .iter()
            .map(|entry| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{:>9} ", format_minutes_ago(entry.minutes_ago)),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(entry.actor, Style::default().fg(Color::Cyan)),
                    Span::raw(format!(" {} ", entry.action)),
                    Span::styled(entry.subject, Style::default().fg(Color::White)),
                ]))
            })
            .collect();

        let list = List::new(items)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

        StatefulWidget::render(list, area, buf, &mut self.state);
    }
}
