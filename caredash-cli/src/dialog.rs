// caredash-cli/src/dialog.rs
use caredash_core::{WidgetCategory, WidgetRegistry};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, StatefulWidget, Widget},
};

struct Choice {
    kind: String,
    category: WidgetCategory,
    title: String,
    size: String,
}

/// Popup listing every registered widget type, grouped by category
pub struct AddDialog {
    choices: Vec<Choice>,
    state: ListState,
}

impl AddDialog {
    pub fn new(registry: &WidgetRegistry) -> Self {
        let choices: Vec<Choice> = WidgetCategory::ALL
            .iter()
            .flat_map(|&category| registry.by_category(category))
            .map(|d| Choice {
                kind: d.kind.clone(),
                category: d.category,
                title: d.title.clone(),
                size: d.default_size.to_string(),
            })
            .collect();

        let mut state = ListState::default();
        if !choices.is_empty() {
            state.select(Some(0));
        }

        Self { choices, state }
    }

    pub fn selected_kind(&self) -> Option<&str> {
        self.state
            .selected()
            .and_then(|i| self.choices.get(i))
            .map(|c| c.kind.as_str())
    }

    pub fn next(&mut self) {
        if self.choices.is_empty() {
            return;
        }
        let i = self.state.selected().map_or(0, |i| (i + 1) % self.choices.len());
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        if self.choices.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(0) | None => self.choices.len() - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer) {
        let popup = centered(area, 56, self.choices.len() as u16 + 4);
        Clear.render(popup, buf);

        let items: Vec<ListItem> = self
            .choices
            .iter()
            .map(|c| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{:<11}", c.category.label()),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::raw(format!("{:<20}", c.title)),
                    Span::styled(c.size.clone(), Style::default().fg(Color::Cyan)),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(Color::Yellow))
                    .title(" Add widget ")
                    .title_bottom(Line::from(" Enter add · Esc close ").right_aligned()),
            )
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");

        StatefulWidget::render(list, popup, buf, &mut self.state);
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
