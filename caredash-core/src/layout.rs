// caredash-core/src/layout.rs
use ratatui::layout::{Constraint, Layout, Rect};

/// Fixed-width grid that packs spans into rows, left to right
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    columns: u16,
    row_height: u16,
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            columns: 4,
            row_height: 8,
        }
    }
}

impl Grid {
    /// At least one column, and rows tall enough for a border and a line
    pub fn new(columns: u16, row_height: u16) -> Self {
        Self {
            columns: columns.max(1),
            row_height: row_height.max(3),
        }
    }

    pub fn columns(&self) -> u16 {
        self.columns
    }

    pub fn row_height(&self) -> u16 {
        self.row_height
    }

    /// Clamp a requested span to the grid width
    pub fn clamp_span(&self, span: u16) -> u16 {
        span.clamp(1, self.columns)
    }

    /// Row index and starting column of each span
    pub fn cells(&self, spans: &[u16]) -> Vec<(usize, u16)> {
        let mut row = 0usize;
        let mut column = 0u16;

        spans
            .iter()
            .map(|&span| {
                let span = self.clamp_span(span);
                if column + span > self.columns {
                    row += 1;
                    column = 0;
                }
                let cell = (row, column);
                column += span;
                cell
            })
            .collect()
    }

    /// Top edge of `row` when the whole row fits inside `area`
    fn row_top(&self, row: usize, area: Rect) -> Option<u16> {
        let top = u32::from(area.y) + row as u32 * u32::from(self.row_height);
        let bottom = top + u32::from(self.row_height);
        if bottom > u32::from(area.bottom()) {
            return None;
        }
        u16::try_from(top).ok()
    }

    /// Screen area of each span; `None` for spans on rows below the visible area
    pub fn place(&self, spans: &[u16], area: Rect) -> Vec<Option<Rect>> {
        let columns = Layout::horizontal(vec![Constraint::Fill(1); self.columns as usize])
            .split(area);

        self.cells(spans)
            .into_iter()
            .zip(spans)
            .map(|((row, column), &span)| {
                let y = self.row_top(row, area)?;
                let span = self.clamp_span(span);
                let first = columns[column as usize];
                let last = columns[(column + span - 1) as usize];
                Some(Rect::new(
                    first.x,
                    y,
                    last.right() - first.x,
                    self.row_height,
                ))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_wraps_spans_that_do_not_fit() {
        let grid = Grid::default();
        // small, medium, medium -> second medium wraps
        let cells = grid.cells(&[1, 2, 2, 4, 1]);
        assert_eq!(cells, vec![(0, 0), (0, 1), (1, 0), (2, 0), (3, 0)]);
    }

    #[test]
    fn test_grid_places_spans_on_unit_columns() {
        let grid = Grid::new(4, 8);
        let area = Rect::new(0, 0, 80, 40);
        let placed = grid.place(&[1, 3, 4], area);

        assert_eq!(placed[0], Some(Rect::new(0, 0, 20, 8)));
        assert_eq!(placed[1], Some(Rect::new(20, 0, 60, 8)));
        assert_eq!(placed[2], Some(Rect::new(0, 8, 80, 8)));
    }

    #[test]
    fn test_grid_clamps_span_and_hides_overflow_rows() {
        let grid = Grid::new(2, 10);
        let area = Rect::new(0, 0, 40, 25);
        let placed = grid.place(&[4, 1, 1, 2], area);

        assert_eq!(placed[0], Some(Rect::new(0, 0, 40, 10)));
        assert_eq!(placed[1], Some(Rect::new(0, 10, 20, 10)));
        assert_eq!(placed[2], Some(Rect::new(20, 10, 20, 10)));
        assert_eq!(placed[3], None); // third row only has 5 of 10 lines
    }

    #[test]
    fn test_grid_respects_area_offset() {
        let grid = Grid::new(2, 5);
        let area = Rect::new(3, 2, 40, 10);
        let placed = grid.place(&[1, 1, 1], area);

        assert_eq!(placed[0], Some(Rect::new(3, 2, 20, 5)));
        assert_eq!(placed[1], Some(Rect::new(23, 2, 20, 5)));
        assert_eq!(placed[2], Some(Rect::new(3, 7, 20, 5)));
    }

    #[test]
    fn test_degenerate_grid_is_clamped() {
        let grid = Grid::new(0, 0);
        assert_eq!(grid.columns(), 1);
        assert_eq!(grid.row_height(), 3);
        assert_eq!(grid.clamp_span(4), 1);

        let placed = grid.place(&[0, 2], Rect::new(0, 0, 10, 6));
        assert_eq!(placed[0], Some(Rect::new(0, 0, 10, 3)));
        assert_eq!(placed[1], Some(Rect::new(0, 3, 10, 3)));
    }
}
