// caredash-core/src/shell.rs
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Widget as RatatuiWidget},
};

pub const DRAG_HANDLE: &str = "⠿";
pub const REMOVE_BUTTON: &str = "[x]";

/// Consistent chrome around one widget instance.
///
/// Draws the border, title and optional description, plus the drag handle
/// and remove button while the dashboard is being edited. The content is
/// never looked at; it only receives the area left inside the chrome.
#[derive(Debug, Clone)]
pub struct WidgetShell<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub is_editing: bool,
    pub focused: bool,
}

impl<'a> WidgetShell<'a> {
    pub fn new(title: &'a str) -> Self {
        Self {
            title,
            description: None,
            is_editing: false,
            focused: false,
        }
    }

    pub fn description(mut self, description: &'a str) -> Self {
        self.description = Some(description).filter(|d| !d.is_empty());
        self
    }

    pub fn editing(mut self, is_editing: bool) -> Self {
        self.is_editing = is_editing;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn border_style(&self) -> Style {
        match (self.focused, self.is_editing) {
            (true, _) => Style::default().fg(Color::Yellow),
            (false, true) => Style::default().fg(Color::Cyan),
            (false, false) => Style::default().fg(Color::DarkGray),
        }
    }

    /// Draw the chrome and return the area left for content
    pub fn render(&self, area: Rect, buf: &mut Buffer) -> Rect {
        let title = if self.is_editing {
            format!(" {} {} ", DRAG_HANDLE, self.title)
        } else {
            format!(" {} ", self.title)
        };

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(if self.is_editing {
                BorderType::Double
            } else {
                BorderType::Rounded
            })
            .border_style(self.border_style())
            .title_top(Line::from(title).style(Style::default().add_modifier(Modifier::BOLD)));

        if self.is_editing {
            block = block.title_top(
                Line::from(REMOVE_BUTTON)
                    .style(Style::default().fg(Color::Red))
                    .right_aligned(),
            );
        }

        let inner = block.inner(area);
        block.render(area, buf);

        match self.description {
            Some(description) if inner.height > 1 => {
                buf.set_stringn(
                    inner.x,
                    inner.y,
                    description,
                    inner.width as usize,
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC),
                );
                Rect::new(inner.x, inner.y + 1, inner.width, inner.height - 1)
            }
            _ => inner,
        }
    }

    /// Cells covered by the remove button, when it is shown
    pub fn remove_button_area(&self, area: Rect) -> Option<Rect> {
        let width = REMOVE_BUTTON.len() as u16;
        if !self.is_editing || area.width < width + 2 || area.height == 0 {
            return None;
        }
        Some(Rect::new(area.right() - 1 - width, area.y, width, 1))
    }

    /// Whether a click at (column, row) lands on the remove button
    pub fn remove_hit(&self, area: Rect, column: u16, row: u16) -> bool {
        self.remove_button_area(area)
            .is_some_and(|button| button.contains((column, row).into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{buffer_contains, row_text};

    #[test]
    fn test_viewing_shell_has_title_without_edit_affordances() {
        let area = Rect::new(0, 0, 30, 6);
        let mut buf = Buffer::empty(area);
        let shell = WidgetShell::new("Hospitals").description("All sites");

        let content = shell.render(area, &mut buf);

        assert!(row_text(&buf, 0).contains("Hospitals"));
        assert!(!buffer_contains(&buf, DRAG_HANDLE));
        assert!(!buffer_contains(&buf, REMOVE_BUTTON));
        assert!(row_text(&buf, 1).contains("All sites"));
        assert_eq!(content, Rect::new(1, 2, 28, 3));
        assert!(shell.remove_button_area(area).is_none());
    }

    #[test]
    fn test_editing_shell_shows_handle_and_remove_button() {
        let area = Rect::new(0, 0, 30, 6);
        let mut buf = Buffer::empty(area);
        let shell = WidgetShell::new("Hospitals").editing(true);

        let content = shell.render(area, &mut buf);

        let top = row_text(&buf, 0);
        assert!(top.contains(DRAG_HANDLE));
        assert!(top.contains("Hospitals"));
        assert!(top.ends_with("[x]╗"), "got {:?}", top);
        assert_eq!(content, Rect::new(1, 1, 28, 4));
    }

    #[test]
    fn test_remove_hit_covers_only_the_button() {
        let area = Rect::new(10, 5, 20, 6);
        let shell = WidgetShell::new("Title").editing(true);

        assert_eq!(shell.remove_button_area(area), Some(Rect::new(26, 5, 3, 1)));
        assert!(shell.remove_hit(area, 26, 5));
        assert!(shell.remove_hit(area, 28, 5));
        assert!(!shell.remove_hit(area, 29, 5)); // corner
        assert!(!shell.remove_hit(area, 27, 6));

        let viewing = WidgetShell::new("Title");
        assert!(!viewing.remove_hit(area, 26, 5));
    }

    #[test]
    fn test_empty_description_is_omitted() {
        let area = Rect::new(0, 0, 20, 5);
        let mut buf = Buffer::empty(area);
        let content = WidgetShell::new("Title")
            .description("")
            .render(area, &mut buf);
        assert_eq!(content, Rect::new(1, 1, 18, 3));
    }
}
