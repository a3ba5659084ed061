//! Data layer: core types, loading, and reference tables.
//!
//! Architecture:
//! ```text
//!  metadata.json / season-*.json / scores-*.json / dist-*.json
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse files → DataFile → Dataset
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐      ┌──────────────────┐
//!   │ Dataset   │      │ PopulationTable   │  code → population (csv)
//!   └──────────┘      └──────────────────┘
//!        │                     │
//!        ▼                     ▼
//!   ┌────────────────────────────┐
//!   │  derive::View               │  selection → chart data
//!   └────────────────────────────┘
//! ```

pub mod loader;
pub mod model;
pub mod population;
