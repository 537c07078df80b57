use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::area::Area;

/// One approved construction and/or demolition event. Immutable once written.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ConstructionRecord {
    pub id: String,
    pub parcel_id: String,
    pub built_area: Area,
    pub demolished_area: Area,
    pub approved_on: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl ConstructionRecord {
    /// Built minus demolished.
    #[must_use]
    pub fn net_delta(&self) -> Area {
        self.built_area - self.demolished_area
    }
}
