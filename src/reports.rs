//! Derived-value computations over the persisted collections.
//!
//! These are the aggregates every admin page of the original app
//! recomputed inline: stay pricing, per-type occupancy, and revenue.
//! Each function is pure -- collections and the reference day come in as
//! arguments, nothing reads the store -- so they are testable in isolation
//! and deterministic regardless of when they run.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;

use crate::catalog::RoomType;
use crate::model::InHouseGuest;

/// Number of nights between two calendar dates, clamped to zero.
///
/// The original computed a negative (or NaN) difference for inverted
/// ranges and multiplied anyway; here an inverted range is simply zero
/// nights, and input forms reject it earlier as a validation error.
pub fn nights_between(check_in: NaiveDate, check_out: NaiveDate) -> u32 {
    (check_out - check_in).num_days().max(0) as u32
}

/// Total amount for a stay: `nightly_rate * max(nights, 1)`.
///
/// A stay always bills at least one night, so a same-day checkout costs
/// one full night. An explicit `payment_amount` (a prepaid booking)
/// overrides the arithmetic entirely.
pub fn stay_total(
    room_type: RoomType,
    check_in: NaiveDate,
    until: NaiveDate,
    payment_amount: Option<u64>,
) -> u64 {
    if let Some(amount) = payment_amount {
        return amount;
    }
    let nights = u64::from(nights_between(check_in, until).max(1));
    room_type.nightly_rate() * nights
}

/// [`stay_total`] for an in-house record, billed from the reservation's
/// check-in date up to `as_of`.
pub fn guest_total(guest: &InHouseGuest, as_of: NaiveDate) -> u64 {
    stay_total(
        guest.room_type,
        guest.check_in_date,
        as_of,
        guest.payment_amount,
    )
}

/// Occupancy of one room category.
#[derive(Debug, Clone, PartialEq)]
pub struct OccupancySlice {
    /// Distinct occupied rooms of this category.
    pub occupied: usize,
    /// Fixed catalog count for this category.
    pub total: usize,
    /// `occupied / total`, as a percentage.
    pub percentage: f64,
}

/// Per-category occupancy derived from the in-house collection.
///
/// `occupied` counts distinct room numbers, capped at the category's fixed
/// catalog count, so the grand total across categories can never exceed
/// the 100-room catalog even if stored data is inconsistent.
pub fn occupancy_breakdown(in_house: &[InHouseGuest]) -> BTreeMap<RoomType, OccupancySlice> {
    let mut rooms_by_type: BTreeMap<RoomType, HashSet<&str>> = BTreeMap::new();
    for guest in in_house {
        rooms_by_type
            .entry(guest.room_type)
            .or_default()
            .insert(guest.room_number.as_str());
    }

    let mut breakdown = BTreeMap::new();
    for room_type in RoomType::ALL {
        let total = room_type.catalog_count();
        let occupied = rooms_by_type
            .get(&room_type)
            .map_or(0, HashSet::len)
            .min(total);
        breakdown.insert(
            room_type,
            OccupancySlice {
                occupied,
                total,
                percentage: occupied as f64 / total as f64 * 100.0,
            },
        );
    }
    breakdown
}

/// Revenue aggregates over the in-house collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevenueSummary {
    /// Sum of [`guest_total`] across every in-house guest.
    pub total: u64,
    /// Same sum restricted to guests whose check-in instant falls on the
    /// reference day.
    pub today: u64,
}

/// Total and today's revenue as of `today`.
pub fn revenue_breakdown(in_house: &[InHouseGuest], today: NaiveDate) -> RevenueSummary {
    let mut summary = RevenueSummary::default();
    for guest in in_house {
        let amount = guest_total(guest, today);
        summary.total += amount;
        if guest.check_in_time.date_naive() == today {
            summary.today += amount;
        }
    }
    summary
}
