//! TUI module: Terminal User Interface using Ratatui.
//!
//! A single screen with:
//! - Drop zone / preview of the selected leaf photo
//! - Analyze and Clear actions with a loader
//! - Error area
//! - Tabbed result panel with a confidence gauge

mod app;
mod styles;
mod ui;
mod worker;

pub use app::App;
pub use styles::LeafTheme;
pub use worker::{PredictionProgress, PredictionWorker, PredictionWorkerHandle};
