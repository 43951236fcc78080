//! View-state layer - layout computation and hit-testing.
//!
//! # Module Structure
//!
//! - `snap_layout`: centered-snap horizontal layout for the month strip
//! - `cell_pool`: index-addressed pool of recyclable cells
//! - `month_cell`: display state of one month strip cell
//! - `grid_geometry`: day grid placement for rendering and mouse hit-testing

pub mod cell_pool;
pub mod grid_geometry;
pub mod month_cell;
pub mod snap_layout;

pub use cell_pool::{CellPool, ReusableCell};
pub use grid_geometry::GridGeometry;
pub use month_cell::MonthCell;
pub use snap_layout::{CellAttributes, CellFrame, SnapLayout};
