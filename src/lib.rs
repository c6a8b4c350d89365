//! bulletin — a terminal news browser.
//!
//! Queries a news-article search API by category, accumulates pages of
//! results as the user scrolls, and renders article cards in the terminal.
//!
//! The crate is split into:
//!
//! - [`api`] - HTTP client for the upstream article-search API
//! - [`app`] - central application state (categories, progress bar, events)
//! - [`config`] - optional TOML configuration file
//! - [`feed`] - the per-category paginated feed controller
//! - [`theme`] - color palettes for the TUI
//! - [`ui`] - event loop, input handling, and rendering
//! - [`util`] - text helpers shared across the UI

pub mod api;
pub mod app;
pub mod config;
pub mod feed;
pub mod theme;
pub mod ui;
pub mod util;
