//! General application configuration.

use serde::{Deserialize, Serialize};

/// Default result limit.
const fn default_limit() -> u32 {
    20
}

const fn default_max_images() -> usize {
    2
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Default result limit for list/search commands.
    #[serde(default = "default_limit")]
    pub default_limit: u32,

    /// Maximum number of image URLs a parcel may carry.
    #[serde(default = "default_max_images")]
    pub max_images_per_parcel: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_images_per_parcel: default_max_images(),
        }
    }
}
