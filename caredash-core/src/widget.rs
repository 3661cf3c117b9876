// caredash-core/src/widget.rs
use ratatui::{buffer::Buffer, layout::Rect};
use std::time::{Duration, Instant};

/// Content renderer for one placed widget instance.
///
/// The dashboard shell draws the border and header; implementors only
/// paint the inner area they are handed.
pub trait Widget: Send {
    /// Called once when the instance first appears on the dashboard
    fn on_mount(&mut self) {}

    /// Called every tick with delta time since last update
    fn on_update(&mut self, _delta: Duration) {}

    /// Handle input events routed to the focused instance
    fn on_event(&mut self, _event: Event) -> EventResult {
        EventResult::Ignored
    }

    /// Render the content into the shell's inner area
    fn render(&mut self, area: Rect, buf: &mut Buffer);

    /// Whether the content needs regular updates (for polling/animation)
    fn needs_update(&self) -> bool {
        false
    }

    /// Cleanup when the instance leaves the dashboard
    fn on_unmount(&mut self) {}
}

#[derive(Debug, Clone)]
pub enum Event {
    Key(crossterm::event::KeyEvent),
    Mouse(crossterm::event::MouseEvent),
    Resize(u16, u16),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Consumed, // Stop propagation
    Ignored,  // Continue to the dashboard
}

/// Owns one content renderer and its lifecycle, keyed by instance id
pub struct WidgetContainer {
    widget: Box<dyn Widget>,
    instance_id: String,
    last_update: Instant,
    mounted: bool,
}

impl WidgetContainer {
    pub fn new(instance_id: impl Into<String>, widget: Box<dyn Widget>) -> Self {
        Self {
            widget,
            instance_id: instance_id.into(),
            last_update: Instant::now(),
            mounted: false,
        }
    }

    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn mount(&mut self) {
        if !self.mounted {
            self.widget.on_mount();
            self.mounted = true;
            self.last_update = Instant::now();
        }
    }

    pub fn update(&mut self) {
        let now = Instant::now();
        let delta = now.duration_since(self.last_update);

        if self.mounted && self.widget.needs_update() {
            self.widget.on_update(delta);
        }

        self.last_update = now;
    }

    /// Unmounted content never sees input
    pub fn handle_event(&mut self, event: Event) -> EventResult {
        if !self.mounted {
            return EventResult::Ignored;
        }
        self.widget.on_event(event)
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer) {
        self.widget.render(area, buf);
    }

    pub fn unmount(&mut self) {
        if self.mounted {
            self.widget.on_unmount();
            self.mounted = false;
        }
    }
}

impl Drop for WidgetContainer {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Counting {
        mounts: Arc<AtomicUsize>,
        unmounts: Arc<AtomicUsize>,
    }

    impl Widget for Counting {
        fn on_mount(&mut self) {
            self.mounts.fetch_add(1, Ordering::SeqCst);
        }

        fn render(&mut self, _area: Rect, _buf: &mut Buffer) {}

        fn on_unmount(&mut self) {
            self.unmounts.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_mount_and_unmount_run_once() {
        let widget = Counting::default();
        let mounts = widget.mounts.clone();
        let unmounts = widget.unmounts.clone();

        let mut container = WidgetContainer::new("metrics-hospitals-1", Box::new(widget));
        container.mount();
        container.mount();
        assert!(container.is_mounted());
        assert_eq!(mounts.load(Ordering::SeqCst), 1);

        container.unmount();
        container.unmount();
        assert_eq!(unmounts.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_drop_unmounts_mounted_widget() {
        let widget = Counting::default();
        let unmounts = widget.unmounts.clone();

        {
            let mut container = WidgetContainer::new("x", Box::new(widget));
            container.mount();
        }

        assert_eq!(unmounts.load(Ordering::SeqCst), 1);
    }
}
