//! Edge-indexed flow between neighbouring cells.
//!
//! `flow_x[x, y]` is the flow from cell `(x, y)` to `(x + 1, y)`; `flow_y[x, y]`
//! is the flow from `(x, y)` to `(x, y + 1)`. Positive values move fluid toward
//! the higher index. Both arrays cover `(width - 1) x (height - 1)` edges, so the
//! rightmost column has no `flow_y` and the bottom row has no `flow_x`.

use serde::{Deserialize, Serialize};

use super::error::FluidError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowField {
    /// Edge columns (`grid width - 1`).
    pub edges_x: usize,
    /// Edge rows (`grid height - 1`).
    pub edges_y: usize,
    pub flow_x: Vec<f64>,
    pub flow_y: Vec<f64>,
    /// Previous-tick pair, read only while spreading.
    pub flow_x_prev: Vec<f64>,
    pub flow_y_prev: Vec<f64>,
}

impl FlowField {
    /// Flow field for a `grid_width x grid_height` cell grid.
    pub fn new(grid_width: usize, grid_height: usize) -> Self {
        let edges_x = grid_width.saturating_sub(1);
        let edges_y = grid_height.saturating_sub(1);
        let len = edges_x * edges_y;
        Self {
            edges_x,
            edges_y,
            flow_x: vec![0.0; len],
            flow_y: vec![0.0; len],
            flow_x_prev: vec![0.0; len],
            flow_y_prev: vec![0.0; len],
        }
    }

    #[inline]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.edges_x && y < self.edges_y
    }

    /// # Panics
    /// If `(x, y)` is outside the edge domain.
    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        assert!(
            self.in_bounds(x, y),
            "edge ({x}, {y}) out of bounds for {}x{} flow field",
            self.edges_x,
            self.edges_y
        );
        y * self.edges_x + x
    }

    pub fn checked_index(&self, x: usize, y: usize) -> Result<usize, FluidError> {
        if self.in_bounds(x, y) {
            Ok(y * self.edges_x + x)
        } else {
            Err(FluidError::EdgeOutOfBounds {
                x,
                y,
                edges_x: self.edges_x,
                edges_y: self.edges_y,
            })
        }
    }

    #[inline]
    pub fn flow_x_at(&self, x: usize, y: usize) -> f64 {
        self.flow_x[self.index(x, y)]
    }

    #[inline]
    pub fn flow_y_at(&self, x: usize, y: usize) -> f64 {
        self.flow_y[self.index(x, y)]
    }

    pub fn set_flow_x(&mut self, x: usize, y: usize, value: f64) {
        let idx = self.index(x, y);
        self.flow_x[idx] = value;
    }

    pub fn set_flow_y(&mut self, x: usize, y: usize, value: f64) {
        let idx = self.index(x, y);
        self.flow_y[idx] = value;
    }

    /// Exchange the current and previous buffers.
    ///
    /// The buffer just written becomes the read-only source and the stale one
    /// becomes the write target. No element is copied.
    pub fn rotate(&mut self) {
        std::mem::swap(&mut self.flow_x, &mut self.flow_x_prev);
        std::mem::swap(&mut self.flow_y, &mut self.flow_y_prev);
    }

    pub fn clear(&mut self) {
        for buf in [
            &mut self.flow_x,
            &mut self.flow_y,
            &mut self.flow_x_prev,
            &mut self.flow_y_prev,
        ] {
            buf.iter_mut().for_each(|f| *f = 0.0);
        }
    }

    /// Largest absolute flow over both axes of the current buffers.
    pub fn max_abs_flow(&self) -> f64 {
        self.flow_x
            .iter()
            .chain(self.flow_y.iter())
            .fold(0.0_f64, |acc, f| acc.max(f.abs()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flow_field_dimensions() {
        let field = FlowField::new(5, 4);
        assert_eq!(field.edges_x, 4);
        assert_eq!(field.edges_y, 3);
        assert_eq!(field.flow_x.len(), 12);
        assert_eq!(field.flow_y.len(), 12);
        assert_eq!(field.flow_x_prev.len(), 12);
        assert_eq!(field.flow_y_prev.len(), 12);
        assert!(field.flow_x.iter().all(|&f| f == 0.0));
    }

    #[test]
    fn test_flow_field_single_cell_grid_is_empty() {
        let field = FlowField::new(1, 1);
        assert_eq!(field.edges_x, 0);
        assert_eq!(field.edges_y, 0);
        assert!(field.flow_x.is_empty());
        assert!(!field.in_bounds(0, 0));
    }

    #[test]
    fn test_flow_field_get_set() {
        let mut field = FlowField::new(4, 4);
        field.set_flow_x(2, 1, 1.25);
        field.set_flow_y(0, 2, -0.5);
        assert_eq!(field.flow_x_at(2, 1), 1.25);
        assert_eq!(field.flow_y_at(0, 2), -0.5);
        assert_eq!(field.flow_x[field.index(2, 1)], 1.25);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_flow_field_index_rejects_last_column() {
        let field = FlowField::new(4, 4);
        // Cell column 3 has no rightward edge.
        let _ = field.flow_x_at(3, 0);
    }

    #[test]
    fn test_flow_field_checked_index() {
        let field = FlowField::new(3, 3);
        assert_eq!(field.checked_index(1, 1), Ok(3));
        assert!(matches!(
            field.checked_index(2, 0),
            Err(FluidError::EdgeOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_rotate_exchanges_buffers_without_copy() {
        let mut field = FlowField::new(3, 3);
        field.flow_x[0] = 1.0;
        field.flow_y[1] = 2.0;
        field.flow_x_prev[0] = -1.0;
        let current_ptr = field.flow_x.as_ptr();
        let prev_ptr = field.flow_x_prev.as_ptr();

        field.rotate();

        assert_eq!(field.flow_x_prev[0], 1.0);
        assert_eq!(field.flow_y_prev[1], 2.0);
        assert_eq!(field.flow_x[0], -1.0);
        assert_eq!(field.flow_x_prev.as_ptr(), current_ptr);
        assert_eq!(field.flow_x.as_ptr(), prev_ptr);
    }

    #[test]
    fn test_clear_zeroes_all_buffers() {
        let mut field = FlowField::new(3, 3);
        field.flow_x[0] = 1.0;
        field.flow_y_prev[3] = 4.0;
        field.clear();
        assert_eq!(field.max_abs_flow(), 0.0);
        assert!(field.flow_y_prev.iter().all(|&f| f == 0.0));
    }

    #[test]
    fn test_max_abs_flow() {
        let mut field = FlowField::new(3, 3);
        field.set_flow_x(1, 0, 0.5);
        field.set_flow_y(0, 1, -3.0);
        assert_eq!(field.max_abs_flow(), 3.0);
    }
}
