//! Activity validation, normalization and schedule state.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::error::ActivityError;
use super::types::{AssumedReason, BillingType, CatalogRefs, ScheduleState};

/// The planned/actual date pairs of an activity.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActivityDates {
    /// Planned start.
    pub planned_start: Option<NaiveDate>,
    /// Planned end.
    pub planned_end: Option<NaiveDate>,
    /// Actual start, set by the first time entry.
    pub actual_start: Option<NaiveDate>,
    /// Actual end, advanced by approved time entries.
    pub actual_end: Option<NaiveDate>,
}

/// Validates an activity's catalog chain, dates, rate and assumed reason.
///
/// # Errors
///
/// Returns all violated invariants.
pub fn validate_activity(
    catalog: &CatalogRefs,
    dates: &ActivityDates,
    consultant_hourly_rate: Option<Decimal>,
    billing_type: BillingType,
    assumed_reason: Option<AssumedReason>,
) -> Result<(), Vec<ActivityError>> {
    let mut errors = Vec::new();

    if let Some(rate) = consultant_hourly_rate
        && rate < Decimal::ZERO
    {
        errors.push(ActivityError::NegativeConsultantRate);
    }
    if catalog.module_product != catalog.product {
        errors.push(ActivityError::ModuleNotInProduct);
    }
    if catalog.submodule_module != catalog.module {
        errors.push(ActivityError::SubmoduleNotInModule);
    }
    if catalog.submodule_product != catalog.product {
        errors.push(ActivityError::SubmoduleNotInProduct);
    }
    if let (Some(start), Some(end)) = (dates.planned_start, dates.planned_end)
        && end < start
    {
        errors.push(ActivityError::PlannedEndBeforeStart);
    }
    if let (Some(start), Some(end)) = (dates.actual_start, dates.actual_end)
        && end < start
    {
        errors.push(ActivityError::ActualEndBeforeStart);
    }
    if billing_type == BillingType::AssumedCompany && assumed_reason.is_none() {
        errors.push(ActivityError::AssumedReasonRequired);
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Clears a stale assumed reason when the billing type no longer
/// requires one. Silent normalization, not an error.
#[must_use]
pub fn normalize_assumed_reason(
    billing_type: BillingType,
    assumed_reason: Option<AssumedReason>,
) -> Option<AssumedReason> {
    if billing_type == BillingType::AssumedCompany {
        assumed_reason
    } else {
        None
    }
}

/// Where the activity sits relative to its planned window.
///
/// Returns `None` when no planned dates exist. A recorded actual end is
/// judged against the planned end; an activity that has started is late
/// once today passes the planned end.
#[must_use]
pub fn schedule_state(dates: &ActivityDates, today: NaiveDate) -> Option<ScheduleState> {
    if dates.planned_start.is_none() && dates.planned_end.is_none() {
        return None;
    }
    let planned_end = dates.planned_end.or(dates.planned_start);
    if let (Some(actual_end), Some(end)) = (dates.actual_end, planned_end) {
        return Some(if actual_end > end {
            ScheduleState::Late
        } else {
            ScheduleState::OnTime
        });
    }
    if let (Some(_), Some(end)) = (dates.actual_start, planned_end) {
        return Some(if today > end {
            ScheduleState::Late
        } else {
            ScheduleState::OnTime
        });
    }
    if let Some(start) = dates.planned_start
        && today < start
    {
        return Some(ScheduleState::NotStarted);
    }
    if let Some(end) = planned_end
        && today > end
    {
        return Some(ScheduleState::Late);
    }
    Some(ScheduleState::OnTime)
}
