//! monthpick
//!
//! A horizontally scrolling month strip and a paging day grid, kept on the
//! same month by a synchronization relay, with a terminal host application.
//!
//! The picker components live in [`state`] and are pure: they are driven by
//! method calls and `tick(dt)` and never touch the terminal. [`view`] is the
//! impure shell that draws them with ratatui and feeds them crossterm input.

pub mod config;
pub mod logging;
pub mod model;
pub mod state;
pub mod view;
pub mod view_state;

#[cfg(test)]
mod test_harness;

#[cfg(test)]
mod tests;
