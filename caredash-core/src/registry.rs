use crate::Widget;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Builds the content renderer for one placed instance, given its instance id
pub type WidgetFactory = Box<dyn Fn(&str) -> Box<dyn Widget> + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Widget type already registered: {0}")]
    Duplicate(String),
}

/// Footprint of a widget on the dashboard grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetSize {
    Small,
    Medium,
    Large,
    Full,
}

impl WidgetSize {
    /// Number of grid units this size spans in a 4-unit row
    pub fn span(self) -> u16 {
        match self {
            Self::Small => 1,
            Self::Medium => 2,
            Self::Large => 3,
            Self::Full => 4,
        }
    }

    /// Cycle to the next size
    pub fn next(self) -> Self {
        match self {
            Self::Small => Self::Medium,
            Self::Medium => Self::Large,
            Self::Large => Self::Full,
            Self::Full => Self::Small,
        }
    }
}

impl fmt::Display for WidgetSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
            Self::Full => "full",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetCategory {
    Metrics,
    Charts,
    Activity,
    Management,
}

impl WidgetCategory {
    pub const ALL: [WidgetCategory; 4] = [
        WidgetCategory::Metrics,
        WidgetCategory::Charts,
        WidgetCategory::Activity,
        WidgetCategory::Management,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Metrics => "Metrics",
            Self::Charts => "Charts",
            Self::Activity => "Activity",
            Self::Management => "Management",
        }
    }
}

/// Static definition of a widget type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetDescriptor {
    pub kind: String,
    pub title: String,
    pub description: String,
    pub default_size: WidgetSize,
    pub category: WidgetCategory,
}

impl WidgetDescriptor {
    pub fn new(
        kind: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        default_size: WidgetSize,
        category: WidgetCategory,
    ) -> Self {
        Self {
            kind: kind.into(),
            title: title.into(),
            description: description.into(),
            default_size,
            category,
        }
    }
}

struct Entry {
    descriptor: WidgetDescriptor,
    factory: WidgetFactory,
}

/// Catalogue of widget types, filled once at startup and read-only afterwards
pub struct WidgetRegistry {
    entries: Vec<Entry>,
    index: HashMap<String, usize>,
}

impl Default for WidgetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl WidgetRegistry {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn register(
        &mut self,
        descriptor: WidgetDescriptor,
        factory: WidgetFactory,
    ) -> Result<(), RegistryError> {
        if self.index.contains_key(&descriptor.kind) {
            return Err(RegistryError::Duplicate(descriptor.kind));
        }

        self.index
            .insert(descriptor.kind.clone(), self.entries.len());
        self.entries.push(Entry {
            descriptor,
            factory,
        });
        Ok(())
    }

    pub fn descriptor(&self, kind: &str) -> Option<&WidgetDescriptor> {
        self.index.get(kind).map(|&i| &self.entries[i].descriptor)
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.index.contains_key(kind)
    }

    /// Instantiate the content renderer for a placed instance
    pub fn create(&self, kind: &str, instance_id: &str) -> Option<Box<dyn Widget>> {
        self.index
            .get(kind)
            .map(|&i| (self.entries[i].factory)(instance_id))
    }

    /// Descriptors in registration order
    pub fn descriptors(&self) -> impl Iterator<Item = &WidgetDescriptor> {
        self.entries.iter().map(|e| &e.descriptor)
    }

    pub fn by_category(&self, category: WidgetCategory) -> Vec<&WidgetDescriptor> {
        self.descriptors()
            .filter(|d| d.category == category)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Register a widget type whose constructor takes the instance id
#[macro_export]
macro_rules! register_widget {
    ($registry:expr, $descriptor:expr, $widget_type:ty) => {
        $registry.register(
            $descriptor,
            Box::new(|id: &str| -> Box<dyn $crate::Widget> {
                Box::new(<$widget_type>::new(id))
            }),
        )
    };
}
