//! Clipsift: smart-clipboard capture core.
//!
//! Pure text pipeline: eligibility filter → category classifier →
//! category-specific normalizer → output bundle. The surrounding layer
//! (clipboard reads, hotkeys, active-window queries, UI) calls into this
//! crate and handles every OS side effect itself.

pub mod classify;
pub mod config;
pub mod context;
pub mod error;
pub mod filter;
pub mod normalize;
pub mod pipeline;
