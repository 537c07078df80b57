//! Parcel update builder.
//!
//! Covers descriptive fields and images only. Area changes go through the
//! ledger operations so every change leaves an audit row.

use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct ParcelUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iptu_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cadastral_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subdivision: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lot_number: Option<String>,
    /// Replaces the whole image list when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
}

impl ParcelUpdate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.iptu_number.is_none()
            && self.cadastral_number.is_none()
            && self.subdivision.is_none()
            && self.block.is_none()
            && self.lot_number.is_none()
            && self.images.is_none()
    }
}

#[derive(Default)]
pub struct ParcelUpdateBuilder(ParcelUpdate);

impl ParcelUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(ParcelUpdate::default())
    }

    #[must_use]
    pub fn iptu_number(mut self, iptu_number: impl Into<String>) -> Self {
        self.0.iptu_number = Some(iptu_number.into());
        self
    }

    #[must_use]
    pub fn cadastral_number(mut self, cadastral_number: impl Into<String>) -> Self {
        self.0.cadastral_number = Some(cadastral_number.into());
        self
    }

    #[must_use]
    pub fn subdivision(mut self, subdivision: impl Into<String>) -> Self {
        self.0.subdivision = Some(subdivision.into());
        self
    }

    #[must_use]
    pub fn block(mut self, block: impl Into<String>) -> Self {
        self.0.block = Some(block.into());
        self
    }

    #[must_use]
    pub fn lot_number(mut self, lot_number: impl Into<String>) -> Self {
        self.0.lot_number = Some(lot_number.into());
        self
    }

    #[must_use]
    pub fn images(mut self, images: Vec<String>) -> Self {
        self.0.images = Some(images);
        self
    }

    #[must_use]
    pub fn build(self) -> ParcelUpdate {
        self.0
    }
}
