pub mod activity;
pub mod catalog;
pub mod charts;
pub mod common;
pub mod data;
pub mod management;
pub mod metrics;

pub use activity::ActivityFeed;
pub use catalog::{builtin_registry, register_builtin};
pub use charts::{DeviceStatusChart, PatientVisitsChart, VisitsView};
pub use common::*;
pub use management::{ProtocolsWidget, SurveysWidget, TicketSort, TicketsWidget};
pub use metrics::{Metric, MetricCard, Period};
