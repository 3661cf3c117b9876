// caredash-widgets/src/catalog.rs
use caredash_core::{
    RegistryError, Widget, WidgetCategory, WidgetDescriptor, WidgetRegistry, WidgetSize,
    register_widget,
};

use crate::activity::ActivityFeed;
use crate::charts::{DeviceStatusChart, PatientVisitsChart};
use crate::management::{ProtocolsWidget, SurveysWidget, TicketsWidget};
use crate::metrics::{Metric, MetricCard};

fn register_metric(
    registry: &mut WidgetRegistry,
    kind: &str,
    title: &str,
    description: &str,
    metric: Metric,
) -> Result<(), RegistryError> {
    registry.register(
        WidgetDescriptor::new(
            kind,
            title,
            description,
            WidgetSize::Small,
            WidgetCategory::Metrics,
        ),
        Box::new(move |id: &str| -> Box<dyn Widget> { Box::new(MetricCard::new(id, metric)) }),
    )
}

/// Register every built-in widget type
pub fn register_builtin(registry: &mut WidgetRegistry) -> Result<(), RegistryError> {
    register_metric(
        registry,
        "metrics-hospitals",
        "Hospitals",
        "Registered hospitals",
        Metric::Hospitals,
    )?;
    register_metric(
        registry,
        "metrics-clinics",
        "Clinics",
        "Outpatient clinics",
        Metric::Clinics,
    )?;
    register_metric(
        registry,
        "metrics-providers",
        "Providers",
        "Credentialed providers",
        Metric::Providers,
    )?;
    register_metric(
        registry,
        "metrics-devices",
        "Devices",
        "Connected medical devices",
        Metric::Devices,
    )?;

    register_widget!(
        registry,
        WidgetDescriptor::new(
            "chart-patient-visits",
            "Patient Visits",
            "Visits per day and per week",
            WidgetSize::Medium,
            WidgetCategory::Charts,
        ),
        PatientVisitsChart
    )?;
    register_widget!(
        registry,
        WidgetDescriptor::new(
            "chart-device-status",
            "Device Status",
            "Fleet by online state",
            WidgetSize::Medium,
            WidgetCategory::Charts,
        ),
        DeviceStatusChart
    )?;
    register_widget!(
        registry,
        WidgetDescriptor::new(
            "activity-recent",
            "Recent Activity",
            "Latest changes across the portal",
            WidgetSize::Large,
            WidgetCategory::Activity,
        ),
        ActivityFeed
    )?;
    register_widget!(
        registry,
        WidgetDescriptor::new(
            "management-tickets",
            "Support Tickets",
            "Open tickets by priority",
            WidgetSize::Medium,
            WidgetCategory::Management,
        ),
        TicketsWidget
    )?;
    register_widget!(
        registry,
        WidgetDescriptor::new(
            "management-protocols",
            "Protocols",
            "Clinical protocol rollout",
            WidgetSize::Medium,
            WidgetCategory::Management,
        ),
        ProtocolsWidget
    )?;
    register_widget!(
        registry,
        WidgetDescriptor::new(
            "management-surveys",
            "Surveys",
            "Response rates of running surveys",
            WidgetSize::Full,
            WidgetCategory::Management,
        ),
        SurveysWidget
    )?;

    Ok(())
}

/// A registry holding the built-in widgets
pub fn builtin_registry() -> Result<WidgetRegistry, RegistryError> {
    let mut registry = WidgetRegistry::new();
    register_builtin(&mut registry)?;
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{buffer::Buffer, layout::Rect};

    #[test]
    fn test_builtin_catalogue() {
        let registry = builtin_registry().unwrap();
        assert_eq!(registry.len(), 10);

        let sizes: Vec<(&str, WidgetSize)> = registry
            .descriptors()
            .map(|d| (d.kind.as_str(), d.default_size))
            .collect();
        assert!(sizes.contains(&("metrics-devices", WidgetSize::Small)));
        assert!(sizes.contains(&("activity-recent", WidgetSize::Large)));
        assert!(sizes.contains(&("management-surveys", WidgetSize::Full)));

        assert_eq!(registry.by_category(WidgetCategory::Metrics).len(), 4);
        assert_eq!(registry.by_category(WidgetCategory::Charts).len(), 2);
        assert_eq!(registry.by_category(WidgetCategory::Activity).len(), 1);
        assert_eq!(registry.by_category(WidgetCategory::Management).len(), 3);
    }

    #[test]
    fn test_register_twice_is_rejected() {
        let mut registry = builtin_registry().unwrap();
        assert!(matches!(
            register_builtin(&mut registry),
            Err(RegistryError::Duplicate(kind)) if kind == "metrics-hospitals"
        ));
        assert_eq!(registry.len(), 10);
    }

    #[test]
    fn test_every_kind_renders() {
        let registry = builtin_registry().unwrap();
        let kinds: Vec<String> = registry.descriptors().map(|d| d.kind.clone()).collect();

        for kind in kinds {
            let id = format!("{}-1", kind);
            let mut widget = registry.create(&kind, &id).unwrap();
            let area = Rect::new(0, 0, 60, 8);
            let mut buf = Buffer::empty(area);
            widget.on_mount();
            widget.render(area, &mut buf);

            let painted = buf.content().iter().any(|cell| cell.symbol() != " ");
            assert!(painted, "{} drew nothing", kind);
        }
    }

    #[test]
    fn test_metric_factory_picks_metric() {
        let registry = builtin_registry().unwrap();
        let mut widget = registry
            .create("metrics-providers", "metrics-providers-42")
            .unwrap();
        let area = Rect::new(0, 0, 30, 3);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);

        let first: String = (0..30)
            .map(|col| buf.cell((col, 0)).map(|c| c.symbol()).unwrap_or(" "))
            .collect();
        assert!(first.starts_with("23,910"));
    }
}
