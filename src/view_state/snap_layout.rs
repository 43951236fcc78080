//! Centered-snap horizontal layout for the month strip.
//!
//! Cells sit in a single row with fixed spacing. A centering inset of
//! `(viewport - item_width) / 2` on both ends lets every cell, including the
//! first and last, be scrolled to the exact viewport center.
//!
//! Coordinates are content-space columns as `f64` so that drag and
//! deceleration can move by fractional amounts; rendering rounds.

use std::ops::Range;

/// Default cell width in columns.
pub const DEFAULT_ITEM_WIDTH: f64 = 14.0;
/// Default gap between cells in columns.
pub const DEFAULT_SPACING: f64 = 2.0;
/// Distance from the viewport center within which cells get emphasis.
pub const DEFAULT_ACTIVE_DISTANCE: f64 = 20.0;
/// Extra scale applied to a perfectly centered cell.
pub const DEFAULT_ZOOM_FACTOR: f64 = 0.2;

/// Horizontal extent of a cell in content coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellFrame {
    /// Left edge.
    pub x: f64,
    /// Width.
    pub width: f64,
}

impl CellFrame {
    /// Horizontal center.
    pub fn center(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Right edge (exclusive).
    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }
}

/// Per-cell layout output for one pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellAttributes {
    /// Item index in the strip.
    pub index: usize,
    /// Cell frame in content coordinates.
    pub frame: CellFrame,
    /// Emphasis scale, `1.0` outside the active distance.
    pub scale: f64,
    /// Stacking order, `round(scale)` inside the active distance.
    pub z_index: i32,
    /// Weight towards the inactive style: `0.0` is fully active, `1.0`
    /// fully inactive. `None` outside the active distance.
    pub blend: Option<f64>,
}

impl CellAttributes {
    /// Whether the cell is within the active distance of the center.
    pub fn is_emphasized(&self) -> bool {
        self.blend.is_some()
    }
}

/// Layout parameters for the centered-snap strip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapLayout {
    item_width: f64,
    spacing: f64,
    active_distance: f64,
    zoom_factor: f64,
}

impl Default for SnapLayout {
    fn default() -> Self {
        Self::new(
            DEFAULT_ITEM_WIDTH,
            DEFAULT_SPACING,
            DEFAULT_ACTIVE_DISTANCE,
            DEFAULT_ZOOM_FACTOR,
        )
    }
}

impl SnapLayout {
    /// Create a layout. Non-positive widths and distances are raised to 1.
    pub fn new(item_width: f64, spacing: f64, active_distance: f64, zoom_factor: f64) -> Self {
        Self {
            item_width: item_width.max(1.0),
            spacing: spacing.max(0.0),
            active_distance: active_distance.max(1.0),
            zoom_factor,
        }
    }

    /// Cell width.
    pub fn item_width(&self) -> f64 {
        self.item_width
    }

    /// Distance between the left edges of neighbouring cells.
    pub fn stride(&self) -> f64 {
        self.item_width + self.spacing
    }

    /// Layout depends on the viewport, so any bounds change invalidates it.
    pub fn invalidates_on_bounds_change(&self) -> bool {
        true
    }

    /// Frame of the cell at `index`.
    pub fn frame(&self, index: usize) -> CellFrame {
        CellFrame {
            x: index as f64 * self.stride(),
            width: self.item_width,
        }
    }

    /// Total width of `count` cells without insets.
    pub fn content_width(&self, count: usize) -> f64 {
        if count == 0 {
            return 0.0;
        }
        count as f64 * self.stride() - self.spacing
    }

    /// Scrollable offset range `(min, max)` including the centering inset.
    pub fn offset_bounds(&self, count: usize, viewport_width: f64) -> (f64, f64) {
        let inset = (viewport_width - self.item_width) / 2.0;
        let min = -inset;
        let max = (self.content_width(count) - viewport_width + inset).max(min);
        (min, max)
    }

    /// Clamp an offset into [`Self::offset_bounds`].
    pub fn clamp_offset(&self, offset: f64, count: usize, viewport_width: f64) -> f64 {
        let (min, max) = self.offset_bounds(count, viewport_width);
        offset.clamp(min, max)
    }

    /// Offset that puts the center of cell `index` at the viewport center.
    pub fn centering_offset(&self, index: usize, viewport_width: f64) -> f64 {
        self.frame(index).center() - viewport_width / 2.0
    }

    /// Indices of cells intersecting `[min_x, max_x)`.
    pub fn indices_in_rect(&self, min_x: f64, max_x: f64, count: usize) -> Range<usize> {
        if count == 0 || max_x <= min_x {
            return 0..0;
        }
        let stride = self.stride();
        let lo = ((min_x - self.item_width) / stride).floor() + 1.0;
        let hi = (max_x / stride).ceil();
        let lo = lo.max(0.0) as usize;
        let hi = (hi.max(0.0) as usize).min(count);
        lo.min(hi)..hi
    }

    /// Indices of cells visible at `offset`.
    pub fn visible_indices(&self, offset: f64, viewport_width: f64, count: usize) -> Range<usize> {
        self.indices_in_rect(offset, offset + viewport_width, count)
    }

    /// Attributes for every cell visible at `offset`.
    pub fn attributes_in_rect(
        &self,
        offset: f64,
        viewport_width: f64,
        count: usize,
    ) -> Vec<CellAttributes> {
        let center = offset + viewport_width / 2.0;
        self.visible_indices(offset, viewport_width, count)
            .map(|index| {
                let frame = self.frame(index);
                let distance = center - frame.center();
                if distance.abs() < self.active_distance {
                    let normalized = distance / self.active_distance;
                    let scale = 1.0 + self.zoom_factor * (1.0 - normalized.abs());
                    CellAttributes {
                        index,
                        frame,
                        scale,
                        z_index: scale.round() as i32,
                        blend: Some((normalized.abs() * 10.0).clamp(0.0, 1.0)),
                    }
                } else {
                    CellAttributes {
                        index,
                        frame,
                        scale: 1.0,
                        z_index: 0,
                        blend: None,
                    }
                }
            })
            .collect()
    }

    /// Visible cell whose center is closest to the viewport center.
    pub fn nearest_to_center(&self, offset: f64, viewport_width: f64, count: usize) -> Option<usize> {
        let center = offset + viewport_width / 2.0;
        self.visible_indices(offset, viewport_width, count)
            .min_by(|a, b| {
                let da = (self.frame(*a).center() - center).abs();
                let db = (self.frame(*b).center() - center).abs();
                da.total_cmp(&db)
            })
    }

    /// Snap a proposed resting offset so one cell ends up exactly centered.
    ///
    /// The cell is chosen by proximity to the proposed center only, so a fling
    /// of any velocity still lands on a single cell.
    pub fn target_offset(
        &self,
        proposed: f64,
        _velocity: f64,
        viewport_width: f64,
        count: usize,
    ) -> f64 {
        let center = proposed + viewport_width / 2.0;
        let mut adjustment = f64::MAX;
        for index in self.visible_indices(proposed, viewport_width, count) {
            let delta = self.frame(index).center() - center;
            if delta.abs() < adjustment.abs() {
                adjustment = delta;
            }
        }
        if adjustment == f64::MAX {
            return proposed;
        }
        proposed + adjustment
    }
}
