use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::area::Area;

/// Append-only record of a parcel's area moving from `area_before` to `area_after`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AreaChangeAudit {
    pub id: String,
    pub parcel_id: String,
    pub area_before: Area,
    pub area_after: Area,
    pub reason: Option<String>,
    pub changed_by: String,
    pub changed_at: DateTime<Utc>,
}

impl AreaChangeAudit {
    #[must_use]
    pub fn delta(&self) -> Area {
        self.area_after - self.area_before
    }
}
