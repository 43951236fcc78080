//! UI state (pure).
//!
//! The picker components and every state transition live here and are
//! testable without a terminal.
//!
//! - `month_strip`: virtualized, centered-snap month strip
//! - `month_grid`: one month of days
//! - `day_grid_pager`: lazily built previous/current/next month pages
//! - `sync`: relay keeping strip and pager on the same month
//! - `picker`: the combined picker
//! - `app_state`, `picker_handler`, `mouse_handler`: application state and
//!   input handling

pub mod app_state;
pub mod day_grid_pager;
pub mod month_grid;
pub mod month_strip;
pub mod mouse_handler;
pub mod picker;
pub mod picker_handler;
pub mod sync;

// Re-export for convenience
pub use app_state::{AppState, FocusPane};
pub use day_grid_pager::{
    DayGridDataSource, DayGridDelegate, DayGridPager, Page, PageSlot, PagerDelegate, PagerEvent,
    PagerState, SwipeDirection, TransitionFrame,
};
pub use month_grid::{GridFactory, GridSpec, MonthGrid};
pub use month_strip::{MonthStrip, MonthStripDelegate, StripConfig, StripEvent};
pub use picker::PagingDateAndMonthPicker;
pub use picker_handler::handle_picker_action;
pub use sync::{synchronize, SyncController};
