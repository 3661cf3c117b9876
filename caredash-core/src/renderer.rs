// caredash-core/src/renderer.rs
use crate::controller::render_order;
use crate::{
    Event, EventResult, Grid, WidgetContainer, WidgetInstance, WidgetRegistry, WidgetShell,
};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Paragraph, Widget as RatatuiWidget},
};
use std::collections::{HashMap, HashSet};

pub const EMPTY_MESSAGE: &str = "This dashboard is empty";

/// One widget resolved for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub id: String,
    pub kind: String,
    pub title: String,
    pub description: String,
    pub span: u16,
}

/// A slot that made it onto the screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedSlot {
    pub id: String,
    pub area: Rect,
}

/// Per-frame view state handed down by the app
#[derive(Debug, Clone, Copy, Default)]
pub struct View<'a> {
    pub is_editing: bool,
    pub focused: Option<&'a str>,
}

/// Maps a layout onto the grid and keeps each instance's content mounted
pub struct DashboardRenderer {
    grid: Grid,
    mounted: HashMap<String, WidgetContainer>,
    placed: Vec<PlacedSlot>,
    reported: HashSet<String>,
}

impl DashboardRenderer {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            mounted: HashMap::new(),
            placed: Vec::new(),
            reported: HashSet::new(),
        }
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Visible instances in position order, with unknown types skipped
    pub fn plan(&self, layout: &[WidgetInstance], registry: &WidgetRegistry) -> Vec<Slot> {
        render_order(layout)
            .into_iter()
            .filter_map(|i| {
                let instance = &layout[i];
                let descriptor = registry.descriptor(&instance.kind)?;
                Some(Slot {
                    id: instance.id.clone(),
                    kind: instance.kind.clone(),
                    title: descriptor.title.clone(),
                    description: descriptor.description.clone(),
                    span: self.grid.clamp_span(instance.size.span()),
                })
            })
            .collect()
    }

    /// Mount content for new slots and unmount content whose slot is gone
    fn sync(&mut self, plan: &[Slot], registry: &WidgetRegistry) {
        let live: HashSet<&str> = plan.iter().map(|s| s.id.as_str()).collect();

        self.mounted.retain(|id, container| {
            let keep = live.contains(id.as_str());
            if !keep {
                tracing::debug!("Unmounting widget {}", id);
                container.unmount();
            }
            keep
        });

        for slot in plan {
            if self.mounted.contains_key(&slot.id) {
                continue;
            }
            if let Some(widget) = registry.create(&slot.kind, &slot.id) {
                tracing::debug!("Mounting widget {}", slot.id);
                let mut container = WidgetContainer::new(slot.id.clone(), widget);
                container.mount();
                self.mounted.insert(slot.id.clone(), container);
            }
        }
    }

    fn report_misses(&mut self, layout: &[WidgetInstance], registry: &WidgetRegistry) {
        for instance in layout {
            if !registry.contains(&instance.kind) && self.reported.insert(instance.kind.clone()) {
                tracing::warn!(
                    "Skipping widget {}: unknown type '{}'",
                    instance.id,
                    instance.kind
                );
            }
        }
    }

    /// Draw the dashboard and return the slots that were placed
    pub fn render(
        &mut self,
        layout: &[WidgetInstance],
        registry: &WidgetRegistry,
        view: View<'_>,
        area: Rect,
        buf: &mut Buffer,
    ) -> &[PlacedSlot] {
        self.report_misses(layout, registry);
        let plan = self.plan(layout, registry);
        self.sync(&plan, registry);
        self.placed.clear();

        if plan.is_empty() {
            render_empty(area, buf);
            return &self.placed;
        }

        let spans: Vec<u16> = plan.iter().map(|s| s.span).collect();
        let areas = self.grid.place(&spans, area);

        for (slot, slot_area) in plan.iter().zip(areas) {
            let Some(slot_area) = slot_area else {
                continue;
            };

            let content = WidgetShell::new(&slot.title)
                .description(&slot.description)
                .editing(view.is_editing)
                .focused(view.focused == Some(slot.id.as_str()))
                .render(slot_area, buf);

            if let Some(container) = self.mounted.get_mut(&slot.id)
                && !content.is_empty()
            {
                container.render(content, buf);
            }

            self.placed.push(PlacedSlot {
                id: slot.id.clone(),
                area: slot_area,
            });
        }

        &self.placed
    }

    /// Slots placed by the last render
    pub fn placed(&self) -> &[PlacedSlot] {
        &self.placed
    }

    /// Instance under a screen cell
    pub fn slot_at(&self, column: u16, row: u16) -> Option<&str> {
        self.placed
            .iter()
            .find(|p| p.area.contains((column, row).into()))
            .map(|p| p.id.as_str())
    }

    /// Instance whose remove button sits under a screen cell
    pub fn remove_hit(&self, column: u16, row: u16) -> Option<&str> {
        self.placed
            .iter()
            .find(|p| {
                WidgetShell::new("")
                    .editing(true)
                    .remove_hit(p.area, column, row)
            })
            .map(|p| p.id.as_str())
    }

    pub fn is_mounted(&self, id: &str) -> bool {
        self.mounted.get(id).is_some_and(|c| c.is_mounted())
    }

    /// Tick every mounted instance
    pub fn update(&mut self) {
        for container in self.mounted.values_mut() {
            container.update();
        }
    }

    /// Route an input event to one instance's content
    pub fn handle_event(&mut self, id: &str, event: Event) -> EventResult {
        match self.mounted.get_mut(id) {
            Some(container) => container.handle_event(event),
            None => EventResult::Ignored,
        }
    }

    /// Unmount everything, e.g. on shutdown
    pub fn clear(&mut self) {
        for container in self.mounted.values_mut() {
            container.unmount();
        }
        self.mounted.clear();
        self.placed.clear();
    }
}

fn render_empty(area: Rect, buf: &mut Buffer) {
    let lines = vec![
        Line::from(EMPTY_MESSAGE).style(Style::default().fg(Color::White)),
        Line::from("Press 'a' to add a widget").style(Style::default().fg(Color::DarkGray)),
    ];
    let top = area.y + area.height.saturating_sub(lines.len() as u16) / 2;
    let message_area = Rect::new(area.x, top, area.width, area.height.min(lines.len() as u16));

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(message_area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{buffer_contains, count_rows_with, row_text, sample_registry};
    use crate::{LayoutController, MemoryLayoutStore, NoticeBus, WidgetSize};

    fn instance(id: &str, kind: &str, size: WidgetSize, position: u32) -> WidgetInstance {
        WidgetInstance {
            id: id.to_string(),
            kind: kind.to_string(),
            size,
            position,
            visible: true,
        }
    }

    fn draw(
        renderer: &mut DashboardRenderer,
        layout: &[WidgetInstance],
        view: View<'_>,
    ) -> (Buffer, Vec<PlacedSlot>) {
        let registry = sample_registry();
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        let placed = renderer
            .render(layout, &registry, view, area, &mut buf)
            .to_vec();
        (buf, placed)
    }

    #[test]
    fn test_empty_layout_renders_empty_state() {
        let mut renderer = DashboardRenderer::new(Grid::default());
        let (buf, placed) = draw(&mut renderer, &[], View::default());

        assert!(placed.is_empty());
        assert!(buffer_contains(&buf, EMPTY_MESSAGE));
    }

    #[test]
    fn test_single_small_widget_spans_one_unit() {
        let registry = sample_registry();
        let mut ctl = LayoutController::new(
            registry.clone(),
            Box::new(MemoryLayoutStore::new()),
            NoticeBus::new(),
        );
        let id = ctl.add_widget("metrics-hospitals").unwrap().unwrap();

        let mut renderer = DashboardRenderer::new(Grid::default());
        let plan = renderer.plan(ctl.layout(), &registry);
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].title, "Hospitals");
        assert_eq!(plan[0].span, 1);

        let (buf, placed) = draw(&mut renderer, ctl.layout(), View::default());
        assert_eq!(placed.len(), 1);
        assert_eq!(placed[0].id, id);
        assert_eq!(placed[0].area.width, 20); // one of four units across 80 columns
        assert_eq!(count_rows_with(&buf, "Hospitals"), 1);
        assert!(!buffer_contains(&buf, EMPTY_MESSAGE));
        // Content prints its instance id, clipped to the 18 inner columns
        assert!(buffer_contains(&buf, &id[..18]));
    }

    #[test]
    fn test_removed_widget_leaves_survivor_position_untouched() {
        let registry = sample_registry();
        let mut ctl = LayoutController::new(
            registry.clone(),
            Box::new(MemoryLayoutStore::new()),
            NoticeBus::new(),
        );
        let a = ctl.add_widget("metrics-hospitals").unwrap().unwrap();
        let b = ctl.add_widget("metrics-clinics").unwrap().unwrap();
        ctl.customize().unwrap();
        ctl.remove_widget(&a).unwrap();

        let mut renderer = DashboardRenderer::new(Grid::default());
        let (buf, placed) = draw(&mut renderer, ctl.layout(), View::default());

        assert_eq!(placed.len(), 1);
        assert_eq!(placed[0].id, b);
        assert_eq!(ctl.instance(&b).unwrap().position, 1);
        assert!(!buffer_contains(&buf, "Hospitals"));
        assert!(buffer_contains(&buf, "Clinics"));
    }

    #[test]
    fn test_plan_filters_sorts_and_skips_unknown() {
        let registry = sample_registry();
        let mut hidden = instance("h", "metrics-clinics", WidgetSize::Small, 0);
        hidden.visible = false;
        let layout = vec![
            instance("late", "activity-recent", WidgetSize::Large, 9),
            hidden,
            instance("ghost", "metrics-unicorns", WidgetSize::Small, 1),
            instance("early", "chart-patient-visits", WidgetSize::Medium, 2),
            instance("tie", "metrics-hospitals", WidgetSize::Full, 2),
        ];

        let renderer = DashboardRenderer::new(Grid::default());
        let ids: Vec<_> = renderer
            .plan(&layout, &registry)
            .into_iter()
            .map(|s| (s.id, s.span))
            .collect();

        assert_eq!(
            ids,
            vec![
                ("early".to_string(), 2),
                ("tie".to_string(), 4),
                ("late".to_string(), 3),
            ]
        );
    }

    #[test]
    fn test_spans_clamped_to_narrow_grid() {
        let registry = sample_registry();
        let layout = vec![instance("a", "activity-recent", WidgetSize::Full, 0)];
        let renderer = DashboardRenderer::new(Grid::new(2, 8));
        assert_eq!(renderer.plan(&layout, &registry)[0].span, 2);
    }

    #[test]
    fn test_content_mounted_once_and_unmounted_when_gone() {
        let mut renderer = DashboardRenderer::new(Grid::default());
        let a = instance("a", "metrics-hospitals", WidgetSize::Small, 0);
        let b = instance("b", "metrics-clinics", WidgetSize::Small, 1);

        draw(&mut renderer, &[a.clone(), b.clone()], View::default());
        assert!(renderer.is_mounted("a"));
        assert!(renderer.is_mounted("b"));

        draw(&mut renderer, &[b], View::default());
        assert!(!renderer.is_mounted("a"));
        assert!(renderer.is_mounted("b"));
    }

    #[test]
    fn test_editing_view_exposes_remove_hits() {
        let mut renderer = DashboardRenderer::new(Grid::default());
        let layout = vec![
            instance("a", "metrics-hospitals", WidgetSize::Small, 0),
            instance("b", "chart-patient-visits", WidgetSize::Medium, 1),
        ];

        let view = View {
            is_editing: true,
            focused: Some("b"),
        };
        let (buf, placed) = draw(&mut renderer, &layout, view);

        let b_area = placed[1].area;
        assert_eq!(b_area.x, 20);
        assert_eq!(b_area.width, 40);
        assert!(row_text(&buf, 0).contains("[x]"));
        assert_eq!(renderer.remove_hit(b_area.right() - 3, b_area.y), Some("b"));
        assert_eq!(renderer.remove_hit(b_area.x + 1, b_area.y), None);
        assert_eq!(renderer.slot_at(b_area.x + 1, b_area.y + 1), Some("b"));
    }

    #[test]
    fn test_rows_beyond_the_screen_are_not_placed() {
        let mut renderer = DashboardRenderer::new(Grid::new(4, 10));
        let layout: Vec<_> = (0..4)
            .map(|i| instance(&format!("w{}", i), "metrics-hospitals", WidgetSize::Full, i))
            .collect();

        let (_, placed) = draw(&mut renderer, &layout, View::default());
        assert_eq!(placed.len(), 2); // 24 lines hold two rows of 10
    }
}
