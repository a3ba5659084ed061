use serde::{Deserialize, Serialize};

/// Current UI selection. Indices point into the metadata season list,
/// the metadata region list, the score catalog and the selected season's
/// weeks respectively.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub season: usize,
    pub region: usize,
    pub score: usize,
    pub week: usize,
    /// Show the choropleth relative to each region's baseline.
    pub choropleth_relative: bool,
}

impl Selection {
    /// Index into [`crate::derive::CHOROPLETHS`].
    pub fn choropleth_index(&self) -> usize {
        usize::from(self.choropleth_relative)
    }
}
