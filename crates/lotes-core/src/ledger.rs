//! Area ledger planning.
//!
//! A parcel's `total_area` is the running sum of every construction or
//! demolition applied to it, plus any direct administrative edits. This module
//! decides *what* a change does to the area: the resulting value, the audit
//! motive, and whether the change is allowed at all. It performs no I/O.
//! `lotes-db` executes the resulting plan inside a single transaction.
//!
//! Batches are a left fold: entry `i` starts from the area produced by entry
//! `i - 1`. If any entry fails, the whole batch fails and nothing is written.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::area::Area;
use crate::errors::ValidationError;

/// One construction/demolition event to apply to a parcel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AreaChange {
    pub built: Area,
    #[serde(default)]
    pub demolished: Area,
    pub approved_on: NaiveDate,
}

impl AreaChange {
    #[must_use]
    pub const fn new(built: Area, demolished: Area, approved_on: NaiveDate) -> Self {
        Self {
            built,
            demolished,
            approved_on,
        }
    }

    /// Signed net change: built minus demolished.
    #[must_use]
    pub fn delta(&self) -> Area {
        self.built - self.demolished
    }

    /// Check the inputs on their own, independent of any parcel.
    ///
    /// # Errors
    ///
    /// Negative built or demolished area, or an approval date after `today`.
    pub fn validate(&self, today: NaiveDate) -> Result<(), ValidationError> {
        if self.built.is_negative() {
            return Err(ValidationError::NegativeBuiltArea(self.built));
        }
        if self.demolished.is_negative() {
            return Err(ValidationError::NegativeDemolishedArea(self.demolished));
        }
        if self.approved_on > today {
            return Err(ValidationError::FutureApprovalDate(self.approved_on));
        }
        Ok(())
    }
}

/// The outcome of planning one [`AreaChange`] against a baseline area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct LedgerStep {
    pub change: AreaChange,
    pub area_before: Area,
    pub area_after: Area,
    pub motive: String,
}

impl LedgerStep {
    #[must_use]
    pub fn delta(&self) -> Area {
        self.area_after - self.area_before
    }
}

/// Plan a single change starting from `current`.
///
/// # Errors
///
/// Any [`AreaChange::validate`] failure, or
/// `ValidationError::NegativeResultingArea` when the result would drop below zero.
pub fn plan_change(
    current: Area,
    change: &AreaChange,
    today: NaiveDate,
) -> Result<LedgerStep, ValidationError> {
    change.validate(today)?;

    let delta = change.delta();
    let result = current + delta;
    if result.is_negative() {
        return Err(ValidationError::NegativeResultingArea {
            current,
            delta,
            result,
        });
    }

    Ok(LedgerStep {
        change: *change,
        area_before: current,
        area_after: result,
        motive: generate_motive(change.built, change.demolished),
    })
}

/// Plan an ordered batch as a left fold over `changes`.
///
/// An empty batch yields an empty plan.
///
/// # Errors
///
/// The first failing entry, wrapped in `ValidationError::BatchEntry` with its
/// zero-based index.
pub fn plan_batch(
    current: Area,
    changes: &[AreaChange],
    today: NaiveDate,
) -> Result<Vec<LedgerStep>, ValidationError> {
    let mut steps = Vec::with_capacity(changes.len());
    let mut area = current;
    for (index, change) in changes.iter().enumerate() {
        let step = plan_change(area, change, today).map_err(|source| {
            ValidationError::BatchEntry {
                index,
                source: Box::new(source),
            }
        })?;
        area = step.area_after;
        steps.push(step);
    }
    Ok(steps)
}

/// A manual correction of a parcel's area that bypasses construction records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct DirectEdit {
    pub area_before: Area,
    pub area_after: Area,
    pub reason: Option<String>,
}

/// Plan a direct edit from `current` to `new_area`. A blank `reason` is stored as `None`.
///
/// # Errors
///
/// `NonPositiveArea` when `new_area <= 0`, `UnchangedArea` when it equals `current`.
pub fn plan_direct_edit(
    current: Area,
    new_area: Area,
    reason: Option<&str>,
) -> Result<DirectEdit, ValidationError> {
    if !new_area.is_positive() {
        return Err(ValidationError::NonPositiveArea(new_area));
    }
    if new_area == current {
        return Err(ValidationError::UnchangedArea(current));
    }
    let reason = reason
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(ToString::to_string);

    Ok(DirectEdit {
        area_before: current,
        area_after: new_area,
        reason,
    })
}

/// Human-readable audit motive for a construction/demolition event.
///
/// Net growth reads as a construction, anything else as a demolition. The
/// secondary quantity is appended only when non-zero.
#[must_use]
pub fn generate_motive(built: Area, demolished: Area) -> String {
    if (built - demolished).is_positive() {
        let mut motive = format!("Construção: +{built}m² construídos");
        if demolished.is_positive() {
            motive.push_str(&format!(" e -{demolished}m² demolidos"));
        }
        motive
    } else {
        let mut motive = format!("Demolição: -{demolished}m² demolidos");
        if built.is_positive() {
            motive.push_str(&format!(" e +{built}m² construídos"));
        }
        motive
    }
}
