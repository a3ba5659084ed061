//! Derived view-state for an influenza forecast dashboard.
//!
//! [`data`] loads seasons, scores and distributions; [`derive`] turns them
//! plus the current [`selection::Selection`] into chart-ready slices;
//! [`state::AppState`] ties both together for the viewer.

pub mod color;
pub mod config;
pub mod data;
pub mod derive;
pub mod error;
pub mod selection;
pub mod state;
