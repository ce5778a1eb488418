//! # Schedule formatting
//!
//! Pure rendering from records to chat text plus navigation affordances. Nothing here performs I/O
//! or validates page indexes; the dialog controller owns both.
//!
//! - [`views`] – day, week and month schedule views ([`render`])
//! - [`navigation`] – [`ViewMode`] with prev/next stepping and callback encoding
//! - [`pagination`] – page arithmetic over flat sequences
//! - [`materials`] – paginated material list
//! - [`labels`] – weekday/month names, HTML escaping

pub mod labels;
pub mod materials;
pub mod navigation;
pub mod pagination;
pub mod views;

pub use materials::{parse_page_callback, render_materials, MATERIALS_CALLBACK_PREFIX};
pub use navigation::{parse_date, parse_month, ViewMode, VIEW_CALLBACK_PREFIX};
pub use pagination::{paginate, total_pages, Page};
pub use views::{day_view, month_view, render, week_view, RenderedView};
