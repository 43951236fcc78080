//! Internal test modules - whitebox tests with crate access
//!
//! Tests here drive the TUI app through the acceptance harness or render
//! widgets directly into ratatui buffers.
