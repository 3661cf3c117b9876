// caredash-core/src/notice.rs
use crossbeam::channel::{Receiver, Sender, unbounded};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

/// Something the layout subsystem wants the user to know about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    LayoutChanged { widgets: usize },
    LayoutSaved { widgets: usize },
    PersistFailed { reason: String },
    LayoutUnreadable { reason: String },
    UnknownWidget { kind: String },
}

impl Notice {
    /// Dotted topic used for subscription matching
    pub fn topic(&self) -> &'static str {
        match self {
            Notice::LayoutChanged { .. } => "layout.changed",
            Notice::LayoutSaved { .. } => "layout.saved",
            Notice::PersistFailed { .. } => "layout.warning.persist",
            Notice::LayoutUnreadable { .. } => "layout.warning.read",
            Notice::UnknownWidget { .. } => "registry.miss",
        }
    }

    /// Whether the notice should stay visible until replaced
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            Notice::PersistFailed { .. }
                | Notice::LayoutUnreadable { .. }
                | Notice::UnknownWidget { .. }
        )
    }

    /// Short status-line text
    pub fn message(&self) -> String {
        match self {
            Notice::LayoutChanged { widgets } => format!("Layout has {} widgets", widgets),
            Notice::LayoutSaved { widgets } => format!("Layout saved ({} widgets)", widgets),
            Notice::PersistFailed { reason } => {
                format!("Layout not saved, changes kept in memory: {}", reason)
            }
            Notice::LayoutUnreadable { reason } => {
                format!("Saved layout unreadable, starting over: {}", reason)
            }
            Notice::UnknownWidget { kind } => format!("Unknown widget type '{}'", kind),
        }
    }
}

/// Subscription handle - dropping this unsubscribes
pub struct Subscription {
    id: usize,
    bus: Arc<NoticeBusInner>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let mut subs = self
            .bus
            .subscriptions
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        subs.remove(&self.id);
    }
}

struct NoticeBusInner {
    subscriptions: RwLock<HashMap<usize, (String, Sender<Notice>)>>,
    next_id: AtomicUsize,
}

/// Topic-based pub/sub for layout notices
#[derive(Clone)]
pub struct NoticeBus {
    inner: Arc<NoticeBusInner>,
}

impl Default for NoticeBus {
    fn default() -> Self {
        Self::new()
    }
}

impl NoticeBus {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(NoticeBusInner {
                subscriptions: RwLock::new(HashMap::new()),
                next_id: AtomicUsize::new(0),
            }),
        }
    }

    /// Deliver a notice to every subscriber whose pattern matches its topic
    pub fn publish(&self, notice: Notice) {
        let subs = self
            .inner
            .subscriptions
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        for (pattern, tx) in subs.values() {
            if topic_matches(notice.topic(), pattern) {
                // Receiver may already be gone
                let _ = tx.send(notice.clone());
            }
        }
    }

    /// Subscribe with `*` wildcard support; drop the Subscription to unsubscribe
    pub fn subscribe(&self, pattern: impl Into<String>) -> (Subscription, Receiver<Notice>) {
        let (tx, rx) = unbounded();
        let id = self.inner.next_id.fetch_add(1, Ordering::SeqCst);

        self.inner
            .subscriptions
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(id, (pattern.into(), tx));

        let sub = Subscription {
            id,
            bus: self.inner.clone(),
        };

        (sub, rx)
    }
}

fn topic_matches(topic: &str, pattern: &str) -> bool {
    if topic == pattern {
        return true;
    }

    let topic_parts: Vec<&str> = topic.split('.').collect();
    let pattern_parts: Vec<&str> = pattern.split('.').collect();

    if pattern_parts.len() > topic_parts.len() {
        return false;
    }

    for (i, part) in pattern_parts.iter().enumerate() {
        if *part == "*" {
            // Trailing wildcard swallows the rest
            if i == pattern_parts.len() - 1 {
                return true;
            }
            continue;
        }

        if topic_parts[i] != *part {
            return false;
        }
    }

    pattern_parts.len() == topic_parts.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_matching() {
        assert!(topic_matches("layout.saved", "layout.saved"));
        assert!(topic_matches("layout.saved", "layout.*"));
        assert!(topic_matches("layout.warning.persist", "layout.*"));
        assert!(topic_matches("layout.warning.persist", "*.warning.*"));
        assert!(!topic_matches("registry.miss", "layout.*"));
        assert!(!topic_matches("layout", "layout.saved"));
        assert!(topic_matches("any.thing.here", "*"));
    }

    #[test]
    fn test_publish_reaches_matching_subscribers_only() {
        let bus = NoticeBus::new();
        let (_layout_sub, layout_rx) = bus.subscribe("layout.*");
        let (_registry_sub, registry_rx) = bus.subscribe("registry.*");

        bus.publish(Notice::LayoutSaved { widgets: 2 });

        assert_eq!(
            layout_rx.try_recv().unwrap(),
            Notice::LayoutSaved { widgets: 2 }
        );
        assert!(registry_rx.try_recv().is_err());
    }

    #[test]
    fn test_unsubscribe_on_drop() {
        let bus = NoticeBus::new();
        let (sub, rx) = bus.subscribe("layout.*");

        bus.publish(Notice::LayoutChanged { widgets: 1 });
        assert!(rx.recv().is_ok());

        drop(sub);

        bus.publish(Notice::LayoutChanged { widgets: 2 });
        assert!(rx.recv().is_err()); // Sender dropped with the subscription
    }

    #[test]
    fn test_warning_classification() {
        assert!(
            Notice::PersistFailed {
                reason: "disk full".into()
            }
            .is_warning()
        );
        assert!(!Notice::LayoutSaved { widgets: 0 }.is_warning());
        assert!(
            Notice::PersistFailed {
                reason: "disk full".into()
            }
            .message()
            .contains("kept in memory")
        );

        let unreadable = Notice::LayoutUnreadable {
            reason: "expected value".into(),
        };
        assert!(unreadable.is_warning());
        assert!(topic_matches(unreadable.topic(), "layout.warning.*"));
        assert!(unreadable.message().contains("unreadable"));
    }
}
