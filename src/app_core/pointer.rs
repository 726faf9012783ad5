//! Pixel to cell translation for the web runtime.
//!
//! The browser reports mouse positions in CSS pixels while the reducer works
//! in terminal cells. The geometry is read from the DOM by the web runtime
//! and handed to [`DomGrid::cell_at`], which stays pure and testable.

/// Pixel-space rectangle of the rendered terminal grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelRect {
    fn local(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return None;
        }
        let (lx, ly) = (x - self.left, y - self.top);
        if lx < 0.0 || ly < 0.0 || lx >= self.width || ly >= self.height {
            return None;
        }
        Some((lx, ly))
    }
}

/// Measured geometry of the DOM grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomGrid {
    pub rect: PixelRect,
    /// Width and height of one rendered cell, when the first cell could be measured.
    pub cell_px: Option<(f64, f64)>,
    /// Terminal size in cells from the last frame.
    pub cells: Option<(u16, u16)>,
}

impl DomGrid {
    /// Cell under the pixel position, or `None` outside the grid.
    ///
    /// Measured cell size wins; otherwise the position is mapped
    /// proportionally onto the last known terminal size.
    pub fn cell_at(&self, x: f64, y: f64) -> Option<(u16, u16)> {
        let (lx, ly) = self.rect.local(x, y)?;
        let bounds = self.cells.filter(|&(cols, rows)| cols > 0 && rows > 0);
        let clamp = |col: u16, row: u16| match bounds {
            Some((cols, rows)) => (col.min(cols - 1), row.min(rows - 1)),
            None => (col, row),
        };

        if let Some((cw, ch)) = self.cell_px.filter(|&(w, h)| w > 0.0 && h > 0.0) {
            return Some(clamp((lx / cw).floor() as u16, (ly / ch).floor() as u16));
        }

        let (cols, rows) = bounds?;
        let col = ((lx / self.rect.width) * cols as f64).floor() as u16;
        let row = ((ly / self.rect.height) * rows as f64).floor() as u16;
        Some(clamp(col, row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect() -> PixelRect {
        PixelRect {
            left: 10.0,
            top: 20.0,
            width: 100.0,
            height: 50.0,
        }
    }

    #[test]
    fn test_measured_cells_win() {
        let grid = DomGrid {
            rect: rect(),
            cell_px: Some((10.0, 10.0)),
            cells: Some((10, 5)),
        };
        assert_eq!(grid.cell_at(15.0, 25.0), Some((0, 0)));
        assert_eq!(grid.cell_at(35.0, 45.0), Some((2, 2)));
    }

    #[test]
    fn test_proportional_fallback() {
        let grid = DomGrid {
            rect: rect(),
            cell_px: None,
            cells: Some((20, 10)),
        };
        assert_eq!(grid.cell_at(60.0, 45.0), Some((10, 5)));
    }

    #[test]
    fn test_outside_or_unmeasured_is_none() {
        let grid = DomGrid {
            rect: rect(),
            cell_px: None,
            cells: None,
        };
        assert_eq!(grid.cell_at(60.0, 45.0), None);

        let grid = DomGrid {
            cells: Some((10, 5)),
            ..grid
        };
        assert_eq!(grid.cell_at(5.0, 45.0), None);
        assert_eq!(grid.cell_at(60.0, 70.0), None);
    }

    #[test]
    fn test_clamps_to_last_cell() {
        let grid = DomGrid {
            rect: rect(),
            cell_px: Some((9.0, 9.0)),
            cells: Some((10, 5)),
        };
        assert_eq!(grid.cell_at(109.9, 69.9), Some((9, 4)));
    }
}
