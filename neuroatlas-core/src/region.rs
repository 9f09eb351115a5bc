use serde::{Deserialize, Serialize};

/// Broad anatomical class of a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RegionCategory {
    Cortical,
    Subcortical,
    WhiteMatter,
    Csf,
    Background,
}

impl RegionCategory {
    pub fn label(self) -> &'static str {
        match self {
            Self::Cortical => "cortical",
            Self::Subcortical => "subcortical",
            Self::WhiteMatter => "white-matter",
            Self::Csf => "csf",
            Self::Background => "background",
        }
    }
}

/// A labelled anatomical structure occupying a coordinate, with its
/// occupancy probability where the atlas provides one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub id: u32,
    pub name: String,
    pub category: RegionCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probability: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Region {
    /// Id of the synthetic sentinel returned when the atlas has no entry.
    pub const BACKGROUND_ID: u32 = 0;

    /// The sentinel region resolution falls back to, so lookups are total.
    pub fn background() -> Self {
        Self {
            id: Self::BACKGROUND_ID,
            name: "Background".to_string(),
            category: RegionCategory::Background,
            probability: Some(1.0),
            description: None,
        }
    }

    pub fn is_background(&self) -> bool {
        self.id == Self::BACKGROUND_ID
    }
}
