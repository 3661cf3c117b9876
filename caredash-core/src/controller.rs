// caredash-core/src/controller.rs
use crate::{
    LayoutStore, Loaded, Notice, NoticeBus, WidgetInstance, WidgetRegistry, WidgetSize,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    #[error("Cannot {transition:?} while {from:?}")]
    InvalidTransition { from: Mode, transition: Transition },
    #[error("{0} is only available in edit mode")]
    NotEditing(&'static str),
    #[error("{0} is not available in edit mode")]
    Editing(&'static str),
}

/// Dashboard interaction state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Viewing,
    Editing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Customize,
    Save,
    Cancel,
}

impl Mode {
    pub fn transition(self, transition: Transition) -> Result<Mode, ControllerError> {
        match (self, transition) {
            (Mode::Viewing, Transition::Customize) => Ok(Mode::Editing),
            (Mode::Editing, Transition::Save | Transition::Cancel) => Ok(Mode::Viewing),
            (from, transition) => Err(ControllerError::InvalidTransition { from, transition }),
        }
    }
}

/// When additions reach the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddPolicy {
    /// Adds work in any mode and are written at once; cancel keeps them
    #[default]
    Immediate,
    /// Adds need edit mode and are written on save; cancel drops them
    Deferred,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Earlier,
    Later,
}

/// Owns the user's layout and the view/edit state machine.
///
/// `layout` is what the dashboard shows. `committed` mirrors what the store
/// should hold; it is what cancel falls back to when the store cannot be
/// trusted.
pub struct LayoutController {
    registry: Arc<WidgetRegistry>,
    store: Box<dyn LayoutStore>,
    notices: NoticeBus,
    policy: AddPolicy,
    mode: Mode,
    layout: Vec<WidgetInstance>,
    committed: Vec<WidgetInstance>,
    from_store: bool,
    dirty: bool,
    degraded: bool,
}

impl LayoutController {
    /// Load the saved layout, announcing on `notices` anything wrong with it
    pub fn new(
        registry: Arc<WidgetRegistry>,
        store: Box<dyn LayoutStore>,
        notices: NoticeBus,
    ) -> Self {
        let loaded = match store.read() {
            Loaded::Layout(layout) => Some(layout),
            Loaded::Missing => None,
            Loaded::Unreadable(reason) => {
                notices.publish(Notice::LayoutUnreadable { reason });
                None
            }
        };
        let from_store = loaded.is_some();
        let layout = loaded.unwrap_or_default();

        tracing::debug!(
            "Layout controller starting with {} widgets (saved: {})",
            layout.len(),
            from_store
        );

        let controller = Self {
            registry,
            store,
            notices,
            policy: AddPolicy::default(),
            mode: Mode::Viewing,
            committed: layout.clone(),
            layout,
            from_store,
            dirty: false,
            degraded: false,
        };
        controller.report_unknown_kinds();
        controller
    }

    pub fn with_policy(mut self, policy: AddPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Seed the layout from widget kinds when the store had nothing usable
    pub fn with_defaults(mut self, kinds: &[String]) -> Self {
        if !self.from_store {
            self.layout = self.build(kinds);
            self.committed = self.layout.clone();
        }
        self
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        self.mode == Mode::Editing
    }

    pub fn policy(&self) -> AddPolicy {
        self.policy
    }

    /// Unsaved edits pending in the current session
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Last write to the store failed; the layout lives in memory only
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    pub fn registry(&self) -> &Arc<WidgetRegistry> {
        &self.registry
    }

    pub fn notices(&self) -> &NoticeBus {
        &self.notices
    }

    /// Current layout, in storage order
    pub fn layout(&self) -> &[WidgetInstance] {
        &self.layout
    }

    pub fn instance(&self, id: &str) -> Option<&WidgetInstance> {
        self.layout.iter().find(|w| w.id == id)
    }

    pub fn customize(&mut self) -> Result<(), ControllerError> {
        self.mode = self.mode.transition(Transition::Customize)?;
        tracing::debug!("Entered edit mode");
        Ok(())
    }

    /// Commit the edit session and write it to the store
    pub fn save(&mut self) -> Result<(), ControllerError> {
        self.mode = self.mode.transition(Transition::Save)?;
        self.committed = self.layout.clone();
        self.dirty = false;
        self.persist();
        Ok(())
    }

    /// Drop the edit session and reload what the store holds
    pub fn cancel(&mut self) -> Result<(), ControllerError> {
        self.mode = self.mode.transition(Transition::Cancel)?;

        let restored = if self.degraded {
            tracing::warn!("Store unavailable, restoring last committed layout");
            self.committed.clone()
        } else {
            match self.store.read() {
                Loaded::Layout(layout) => layout,
                Loaded::Missing => self.committed.clone(),
                Loaded::Unreadable(reason) => {
                    self.notices.publish(Notice::LayoutUnreadable { reason });
                    self.committed.clone()
                }
            }
        };

        tracing::debug!(
            "Edit session cancelled, {} -> {} widgets",
            self.layout.len(),
            restored.len()
        );

        self.committed = restored.clone();
        self.layout = restored;
        self.dirty = false;
        self.publish_changed();
        Ok(())
    }

    /// Place a new widget of `kind` at the end of the layout.
    ///
    /// Returns the new instance id, or `None` when no such widget type exists.
    pub fn add_widget(&mut self, kind: &str) -> Result<Option<String>, ControllerError> {
        if self.policy == AddPolicy::Deferred && !self.is_editing() {
            return Err(ControllerError::NotEditing("add"));
        }

        let Some(descriptor) = self.registry.descriptor(kind) else {
            tracing::warn!("Cannot add unknown widget type '{}'", kind);
            self.notices.publish(Notice::UnknownWidget {
                kind: kind.to_string(),
            });
            return Ok(None);
        };

        let instance = WidgetInstance {
            id: self.next_id(kind),
            kind: kind.to_string(),
            size: descriptor.default_size,
            position: self.layout.len() as u32,
            visible: true,
        };
        let id = instance.id.clone();

        tracing::debug!("Adding widget {} at position {}", id, instance.position);
        self.layout.push(instance.clone());

        match self.policy {
            AddPolicy::Immediate => {
                self.committed.push(instance);
                self.persist();
            }
            AddPolicy::Deferred => self.dirty = true,
        }

        self.publish_changed();
        Ok(Some(id))
    }

    /// Remove a widget; returns whether anything was removed
    pub fn remove_widget(&mut self, id: &str) -> Result<bool, ControllerError> {
        self.require_editing("remove")?;

        let before = self.layout.len();
        self.layout.retain(|w| w.id != id);
        let removed = self.layout.len() != before;

        if removed {
            tracing::debug!("Removed widget {}", id);
            self.dirty = true;
            self.publish_changed();
        }
        Ok(removed)
    }

    pub fn resize_widget(&mut self, id: &str, size: WidgetSize) -> Result<bool, ControllerError> {
        self.require_editing("resize")?;

        let Some(instance) = self.layout.iter_mut().find(|w| w.id == id) else {
            return Ok(false);
        };
        if instance.size == size {
            return Ok(false);
        }

        tracing::debug!("Resized widget {} from {} to {}", id, instance.size, size);
        instance.size = size;
        self.dirty = true;
        self.publish_changed();
        Ok(true)
    }

    /// Step a widget to the next size, wrapping from full back to small
    pub fn cycle_size(&mut self, id: &str) -> Result<bool, ControllerError> {
        self.require_editing("resize")?;

        match self.instance(id).map(|w| w.size.next()) {
            Some(next) => self.resize_widget(id, next),
            None => Ok(false),
        }
    }

    /// Swap a visible widget with its neighbour in render order
    pub fn move_widget(&mut self, id: &str, direction: MoveDirection) -> Result<bool, ControllerError> {
        self.require_editing("move")?;

        let order = render_order(&self.layout);
        let Some(at) = order.iter().position(|&i| self.layout[i].id == id) else {
            return Ok(false);
        };
        let neighbour = match direction {
            MoveDirection::Earlier if at > 0 => order[at - 1],
            MoveDirection::Later if at + 1 < order.len() => order[at + 1],
            _ => return Ok(false),
        };
        let current = order[at];

        let a = self.layout[current].position;
        let b = self.layout[neighbour].position;
        self.layout[current].position = b;
        self.layout[neighbour].position = a;
        if a == b {
            // Equal positions render in storage order
            self.layout.swap(current, neighbour);
        }

        tracing::debug!("Moved widget {} {:?}", id, direction);
        self.dirty = true;
        self.publish_changed();
        Ok(true)
    }

    /// Hide a widget without deleting it, or bring it back
    pub fn set_visible(&mut self, id: &str, visible: bool) -> Result<bool, ControllerError> {
        self.require_editing("hide")?;

        let Some(instance) = self.layout.iter_mut().find(|w| w.id == id) else {
            return Ok(false);
        };
        if instance.visible == visible {
            return Ok(false);
        }

        instance.visible = visible;
        self.dirty = true;
        self.publish_changed();
        Ok(true)
    }

    /// Replace the layout with widgets of the given kinds and write it
    pub fn reset_to(&mut self, kinds: &[String]) -> Result<(), ControllerError> {
        if self.is_editing() {
            return Err(ControllerError::Editing("reset"));
        }

        self.layout = self.build(kinds);
        self.committed = self.layout.clone();
        self.dirty = false;
        self.persist();
        self.publish_changed();
        Ok(())
    }

    fn require_editing(&self, action: &'static str) -> Result<(), ControllerError> {
        if self.is_editing() {
            Ok(())
        } else {
            Err(ControllerError::NotEditing(action))
        }
    }

    fn build(&self, kinds: &[String]) -> Vec<WidgetInstance> {
        let mut layout: Vec<WidgetInstance> = Vec::with_capacity(kinds.len());

        for kind in kinds {
            let Some(descriptor) = self.registry.descriptor(kind) else {
                tracing::warn!("Skipping unknown default widget type '{}'", kind);
                self.notices.publish(Notice::UnknownWidget { kind: kind.clone() });
                continue;
            };
            let id = unique_id(kind, |candidate| layout.iter().any(|w| w.id == candidate));
            layout.push(WidgetInstance {
                id,
                kind: kind.clone(),
                size: descriptor.default_size,
                position: layout.len() as u32,
                visible: true,
            });
        }

        layout
    }

    /// Saved instances stay in the layout even when their type is gone
    fn report_unknown_kinds(&self) {
        let mut seen = HashSet::new();
        for instance in &self.layout {
            if !self.registry.contains(&instance.kind) && seen.insert(instance.kind.as_str()) {
                tracing::warn!("Saved layout uses unknown widget type '{}'", instance.kind);
                self.notices.publish(Notice::UnknownWidget {
                    kind: instance.kind.clone(),
                });
            }
        }
    }

    fn next_id(&self, kind: &str) -> String {
        unique_id(kind, |candidate| {
            self.layout
                .iter()
                .chain(self.committed.iter())
                .any(|w| w.id == candidate)
        })
    }

    fn persist(&mut self) {
        match self.store.save(&self.committed) {
            Ok(()) => {
                if self.degraded {
                    tracing::info!("Layout store writable again");
                }
                self.degraded = false;
                self.notices.publish(Notice::LayoutSaved {
                    widgets: self.committed.len(),
                });
            }
            Err(e) => {
                tracing::error!("Failed to save layout: {}", e);
                self.degraded = true;
                self.notices.publish(Notice::PersistFailed {
                    reason: e.to_string(),
                });
            }
        }
    }

    fn publish_changed(&self) {
        self.notices.publish(Notice::LayoutChanged {
            widgets: self.layout.len(),
        });
    }
}

/// Indices of visible instances, ascending by position, ties in storage order
pub fn render_order(layout: &[WidgetInstance]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..layout.len()).filter(|&i| layout[i].visible).collect();
    order.sort_by_key(|&i| layout[i].position);
    order
}

/// `<kind>-<unix millis>`, bumped forward until `taken` rejects it
fn unique_id(kind: &str, taken: impl Fn(&str) -> bool) -> String {
    let mut millis = chrono::Utc::now().timestamp_millis();
    loop {
        let candidate = format!("{}-{}", kind, millis);
        if !taken(&candidate) {
            return candidate;
        }
        millis += 1;
    }
}
