pub mod config;
pub mod controller;
pub mod layout;
pub mod notice;
pub mod registry;
pub mod renderer;
pub mod shell;
pub mod store;
pub mod widget;

#[cfg(test)]
mod test_utils;

pub use config::{ConfigError, ConfigFile};
pub use controller::{
    AddPolicy, ControllerError, LayoutController, Mode, MoveDirection, Transition, render_order,
};
pub use layout::Grid;
pub use notice::{Notice, NoticeBus, Subscription};
pub use registry::{
    RegistryError, WidgetCategory, WidgetDescriptor, WidgetFactory, WidgetRegistry, WidgetSize,
};
pub use renderer::{DashboardRenderer, EMPTY_MESSAGE, PlacedSlot, Slot, View};
pub use shell::WidgetShell;
pub use store::{
    FileLayoutStore, LayoutStore, Loaded, MemoryLayoutStore, StoreError, WidgetInstance,
};
pub use widget::{Event, EventResult, Widget, WidgetContainer};
