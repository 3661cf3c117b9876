// caredash-cli/src/app.rs
use caredash_core::{
    AddPolicy, ControllerError, DashboardRenderer, Event, LayoutController, MoveDirection, Notice,
    Subscription, View,
};
use crossbeam::channel::Receiver;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::dialog::AddDialog;

const VIEW_HINTS: &str = "q quit · tab focus · c customize · a add";
const EDIT_HINTS: &str =
    "s save · esc cancel · a add · x remove · + size · [ ] move · h hide · H show all";

struct Status {
    text: String,
    warning: bool,
}

/// Terminal front end: routes input to the controller and draws the dashboard
pub struct App {
    controller: LayoutController,
    renderer: DashboardRenderer,
    dialog: Option<AddDialog>,
    focused: Option<String>,
    focus_hint: usize,
    status: Option<Status>,
    notices: Receiver<Notice>,
    _subscription: Subscription,
    should_quit: bool,
}

impl App {
    /// `feed` must be subscribed to the controller's bus before the controller
    /// was built, so warnings about the saved layout are not missed
    pub fn new(
        controller: LayoutController,
        renderer: DashboardRenderer,
        feed: (Subscription, Receiver<Notice>),
    ) -> Self {
        let (subscription, notices) = feed;

        let mut app = Self {
            controller,
            renderer,
            dialog: None,
            focused: None,
            focus_hint: 0,
            status: None,
            notices,
            _subscription: subscription,
            should_quit: false,
        };
        app.drain_notices();
        app
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn controller(&self) -> &LayoutController {
        &self.controller
    }

    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    pub fn status_text(&self) -> Option<&str> {
        self.status.as_ref().map(|s| s.text.as_str())
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        // Only handle key press events, not key release
        if key.kind != KeyEventKind::Press {
            return;
        }

        if self.dialog.is_some() {
            self.handle_dialog_key(key);
            self.drain_notices();
            return;
        }

        let editing = self.controller.is_editing();
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Tab => self.cycle_focus(true),
            KeyCode::BackTab => self.cycle_focus(false),
            KeyCode::Char('a') => self.open_dialog(),
            KeyCode::Char('c') if !editing => self.apply(|c| c.customize()),
            KeyCode::Char('s') if editing => self.apply(|c| c.save()),
            KeyCode::Esc if editing => self.apply(|c| c.cancel()),
            KeyCode::Char('x') | KeyCode::Delete if editing => {
                self.edit_focused(|c, id| c.remove_widget(id))
            }
            KeyCode::Char('+') if editing => self.edit_focused(|c, id| c.cycle_size(id)),
            KeyCode::Char('[') if editing => {
                self.edit_focused(|c, id| c.move_widget(id, MoveDirection::Earlier))
            }
            KeyCode::Char(']') if editing => {
                self.edit_focused(|c, id| c.move_widget(id, MoveDirection::Later))
            }
            KeyCode::Char('h') if editing => self.edit_focused(|c, id| c.set_visible(id, false)),
            KeyCode::Char('H') if editing => self.show_hidden(),
            _ => {
                if let Some(id) = self.focused.as_deref() {
                    self.renderer.handle_event(id, Event::Key(key));
                }
            }
        }

        self.drain_notices();
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.dialog.is_some() || mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }

        if self.controller.is_editing()
            && let Some(id) = self.renderer.remove_hit(mouse.column, mouse.row)
        {
            let id = id.to_string();
            if let Err(e) = self.controller.remove_widget(&id) {
                self.report(e);
            }
            self.drain_notices();
            return;
        }

        if let Some(id) = self.renderer.slot_at(mouse.column, mouse.row) {
            self.focused = Some(id.to_string());
        }
    }

    /// Periodic work between frames
    pub fn tick(&mut self) {
        self.renderer.update();
        self.drain_notices();
    }

    pub fn shutdown(&mut self) {
        self.renderer.clear();
    }

    pub fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let [header, body, footer] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .areas(area);

        frame.render_widget(Paragraph::new(self.header_line()), header);

        let view = View {
            is_editing: self.controller.is_editing(),
            focused: self.focused.as_deref(),
        };
        self.renderer.render(
            self.controller.layout(),
            self.controller.registry(),
            view,
            body,
            frame.buffer_mut(),
        );
        self.sync_focus();

        self.render_footer(frame, footer);

        if let Some(dialog) = self.dialog.as_mut() {
            dialog.render(area, frame.buffer_mut());
        }
    }

    fn header_line(&self) -> Line<'static> {
        let (mode, color) = if self.controller.is_editing() {
            ("EDITING", Color::Yellow)
        } else {
            ("VIEWING", Color::Green)
        };

        let mut spans = vec![
            Span::styled(" caredash ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(
                format!(" {} ", mode),
                Style::default().fg(Color::Black).bg(color),
            ),
        ];
        if self.controller.is_dirty() {
            spans.push(Span::styled(" unsaved changes", Style::default().fg(Color::Yellow)));
        }
        if self.controller.is_degraded() {
            spans.push(Span::styled(" not persisted", Style::default().fg(Color::Red)));
        }
        Line::from(spans)
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let hints = if self.controller.is_editing() {
            EDIT_HINTS
        } else {
            VIEW_HINTS
        };

        let mut lines = vec![Line::from(Span::styled(
            format!(" {}", hints),
            Style::default().fg(Color::DarkGray),
        ))];
        if let Some(status) = &self.status {
            let color = if status.warning {
                Color::Yellow
            } else {
                Color::Green
            };
            lines.push(Line::from(Span::styled(
                format!(" {}", status.text),
                Style::default().fg(color),
            )));
        }

        frame.render_widget(Paragraph::new(lines), area);
    }

    fn handle_dialog_key(&mut self, key: KeyEvent) {
        let Some(dialog) = self.dialog.as_mut() else {
            return;
        };

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => dialog.previous(),
            KeyCode::Down | KeyCode::Char('j') => dialog.next(),
            KeyCode::Esc => self.dialog = None,
            KeyCode::Enter => {
                let kind = dialog.selected_kind().map(str::to_string);
                self.dialog = None;
                if let Some(kind) = kind {
                    match self.controller.add_widget(&kind) {
                        Ok(Some(id)) => self.focused = Some(id),
                        Ok(None) => {}
                        Err(e) => self.report(e),
                    }
                }
            }
            _ => {}
        }
    }

    fn open_dialog(&mut self) {
        if self.controller.policy() == AddPolicy::Deferred && !self.controller.is_editing() {
            self.report(ControllerError::NotEditing("add"));
            return;
        }
        self.dialog = Some(AddDialog::new(self.controller.registry()));
    }

    fn apply(&mut self, action: impl FnOnce(&mut LayoutController) -> Result<(), ControllerError>) {
        if let Err(e) = action(&mut self.controller) {
            self.report(e);
        }
    }

    fn edit_focused(
        &mut self,
        action: impl FnOnce(&mut LayoutController, &str) -> Result<bool, ControllerError>,
    ) {
        let Some(id) = self.focused.clone() else {
            return;
        };
        if let Err(e) = action(&mut self.controller, &id) {
            self.report(e);
        }
    }

    fn show_hidden(&mut self) {
        let hidden: Vec<String> = self
            .controller
            .layout()
            .iter()
            .filter(|w| !w.visible)
            .map(|w| w.id.clone())
            .collect();

        for id in hidden {
            if let Err(e) = self.controller.set_visible(&id, true) {
                self.report(e);
                return;
            }
        }
    }

    fn cycle_focus(&mut self, forward: bool) {
        let placed = self.renderer.placed();
        if placed.is_empty() {
            return;
        }

        let current = self
            .focused
            .as_deref()
            .and_then(|id| placed.iter().position(|p| p.id == id));
        let next = match (current, forward) {
            (Some(i), true) => (i + 1) % placed.len(),
            (Some(0), false) | (None, false) => placed.len() - 1,
            (Some(i), false) => i - 1,
            (None, true) => 0,
        };

        self.focused = Some(placed[next].id.clone());
        self.focus_hint = next;
    }

    /// Keep focus on a placed slot, falling back to the nearest one
    fn sync_focus(&mut self) {
        let placed = self.renderer.placed();
        if placed.is_empty() {
            self.focused = None;
            return;
        }

        if let Some(id) = self.focused.as_deref()
            && let Some(i) = placed.iter().position(|p| p.id == id)
        {
            self.focus_hint = i;
            return;
        }

        let i = self.focus_hint.min(placed.len() - 1);
        self.focused = Some(placed[i].id.clone());
        self.focus_hint = i;
    }

    fn drain_notices(&mut self) {
        while let Ok(notice) = self.notices.try_recv() {
            // A plain change notice must not hide a pending warning
            if matches!(notice, Notice::LayoutChanged { .. })
                && self.status.as_ref().is_some_and(|s| s.warning)
            {
                continue;
            }
            self.status = Some(Status {
                text: notice.message(),
                warning: notice.is_warning(),
            });
        }
    }

    fn report(&mut self, error: ControllerError) {
        tracing::debug!("Rejected action: {}", error);
        self.status = Some(Status {
            text: error.to_string(),
            warning: true,
        });
    }
}
