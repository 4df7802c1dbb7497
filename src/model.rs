//! Persisted record shapes for the guest lifecycle collections.
//!
//! Every struct serializes with camelCase field names so that the on-disk
//! JSON matches the layout the original app persisted (`guestName`,
//! `roomNumber`, ...). Status values are closed enums rather than loose
//! strings; an absent `status` field deserializes as `pending`, which is
//! what the original records meant by omitting it.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::RoomType;

// ---------------------------------------------------------------------------
// Status enums
// ---------------------------------------------------------------------------

/// Lifecycle state of a guest record.
///
/// `reserved` → `checked-in` → `checked-out` (terminal), with `cancelled`
/// as a side branch that keeps the record in the arrivals collection.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum ReservationStatus {
    /// Expected for check-in; the default when the stored field is absent.
    #[default]
    Pending,
    /// Currently in-house.
    CheckedIn,
    /// Cancelled before check-in; the record persists in arrivals.
    Cancelled,
    /// Checked out; terminal.
    CheckedOut,
}

/// Workflow state of a guest service request.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// Awaiting triage; the default for new requests.
    #[default]
    Pending,
    /// Assigned and being worked.
    InProgress,
    /// Done.
    Completed,
    /// Withdrawn or rejected.
    Cancelled,
}

/// Urgency of a guest service request.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum RequestPriority {
    Low,
    #[default]
    Normal,
    High,
    Urgent,
}

// ---------------------------------------------------------------------------
// Guest lifecycle records
// ---------------------------------------------------------------------------

/// A reservation expected or in progress for check-in.
///
/// Lives in the `todayArrivals` collection from creation until checkout or
/// deletion. `check_in_time` is stamped (and `status` becomes `checked-in`)
/// at the moment the guest moves in-house.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Arrival {
    /// Unique guest id, shared across all three lifecycle collections.
    pub id: String,
    pub guest_name: String,
    pub email: String,
    pub phone: String,
    pub room_number: String,
    pub room_type: RoomType,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    /// Present once the guest has checked in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_in_time: Option<DateTime<Utc>>,
    /// Absent in stored data means `pending`.
    #[serde(default)]
    pub status: ReservationStatus,
    pub booking_number: String,
    /// Explicit prepaid amount; when present it overrides the nightly-rate
    /// arithmetic at checkout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_amount: Option<u64>,
}

impl Arrival {
    /// Whether this reservation can still be checked in.
    pub fn is_pending(&self) -> bool {
        self.status == ReservationStatus::Pending
    }
}

/// A guest currently checked into a room.
///
/// Superset of [`Arrival`]: `check_in_time` is always present and `status`
/// is always `checked-in`. Lives in the `currentlyInHouse` collection,
/// unique by id, until checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InHouseGuest {
    pub id: String,
    pub guest_name: String,
    pub email: String,
    pub phone: String,
    pub room_number: String,
    pub room_type: RoomType,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub check_in_time: DateTime<Utc>,
    pub status: ReservationStatus,
    pub booking_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_amount: Option<u64>,
}

impl InHouseGuest {
    /// Build the in-house record for an arrival at the moment of check-in.
    pub fn from_arrival(arrival: &Arrival, check_in_time: DateTime<Utc>) -> Self {
        Self {
            id: arrival.id.clone(),
            guest_name: arrival.guest_name.clone(),
            email: arrival.email.clone(),
            phone: arrival.phone.clone(),
            room_number: arrival.room_number.clone(),
            room_type: arrival.room_type,
            check_in_date: arrival.check_in_date,
            check_out_date: arrival.check_out_date,
            check_in_time,
            status: ReservationStatus::CheckedIn,
            booking_number: arrival.booking_number.clone(),
            payment_amount: arrival.payment_amount,
        }
    }
}

/// A completed stay, appended to the `checkoutHistory` collection at
/// checkout time and never mutated thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRecord {
    pub id: String,
    pub guest_name: String,
    pub email: String,
    pub phone: String,
    pub room_number: String,
    pub room_type: RoomType,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub check_in_time: DateTime<Utc>,
    pub check_out_time: DateTime<Utc>,
    pub status: ReservationStatus,
    pub booking_number: String,
    /// Final billed amount for the stay.
    pub total_amount: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

impl CheckoutRecord {
    /// Build the terminal record for a guest at the moment of checkout.
    pub fn from_guest(
        guest: &InHouseGuest,
        check_out_time: DateTime<Utc>,
        total_amount: u64,
        feedback: Option<String>,
    ) -> Self {
        Self {
            id: guest.id.clone(),
            guest_name: guest.guest_name.clone(),
            email: guest.email.clone(),
            phone: guest.phone.clone(),
            room_number: guest.room_number.clone(),
            room_type: guest.room_type,
            check_in_date: guest.check_in_date,
            check_out_date: check_out_time.date_naive(),
            check_in_time: guest.check_in_time,
            check_out_time,
            status: ReservationStatus::CheckedOut,
            booking_number: guest.booking_number.clone(),
            total_amount,
            feedback,
        }
    }
}

// ---------------------------------------------------------------------------
// Guest service requests
// ---------------------------------------------------------------------------

/// A guest service request, created guest-side and worked by admins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingRequest {
    pub id: String,
    pub guest_name: String,
    pub room_number: String,
    /// Free-form category (e.g. "housekeeping", "maintenance").
    pub request_type: String,
    pub request_title: String,
    pub request_details: String,
    #[serde(default)]
    pub status: RequestStatus,
    #[serde(default)]
    pub priority: RequestPriority,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub assigned_to: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_arrival() -> Arrival {
        Arrival {
            id: "g-1".into(),
            guest_name: "Alice Martin".into(),
            email: "alice@example.com".into(),
            phone: "555-0100".into(),
            room_number: "204".into(),
            room_type: RoomType::Deluxe,
            check_in_date: NaiveDate::from_ymd_opt(2026, 8, 6).expect("valid date"),
            check_out_date: NaiveDate::from_ymd_opt(2026, 8, 9).expect("valid date"),
            check_in_time: None,
            status: ReservationStatus::Pending,
            booking_number: "BK-1A2B3C4D".into(),
            payment_amount: None,
        }
    }

    #[test]
    fn arrival_serializes_with_camel_case_keys() {
        let json = serde_json::to_value(sample_arrival()).expect("serialize");
        assert!(json.get("guestName").is_some());
        assert!(json.get("roomNumber").is_some());
        assert!(json.get("bookingNumber").is_some());
        // Absent optionals are omitted entirely, matching the original layout.
        assert!(json.get("checkInTime").is_none());
        assert!(json.get("paymentAmount").is_none());
    }

    #[test]
    fn absent_status_deserializes_as_pending() {
        let json = r#"{
            "id": "g-2",
            "guestName": "Bob",
            "email": "bob@example.com",
            "phone": "555-0101",
            "roomNumber": "101",
            "roomType": "Standard Room",
            "checkInDate": "2026-08-06",
            "checkOutDate": "2026-08-07",
            "bookingNumber": "BK-0"
        }"#;
        let arrival: Arrival = serde_json::from_str(json).expect("deserialize");
        assert_eq!(arrival.status, ReservationStatus::Pending);
        assert!(arrival.is_pending());
    }

    #[test]
    fn reservation_status_uses_kebab_case_strings() {
        assert_eq!(
            serde_json::to_string(&ReservationStatus::CheckedIn).expect("serialize"),
            "\"checked-in\""
        );
        assert_eq!(
            serde_json::to_string(&ReservationStatus::CheckedOut).expect("serialize"),
            "\"checked-out\""
        );
    }

    #[test]
    fn request_status_uses_snake_case_strings() {
        assert_eq!(
            serde_json::to_string(&RequestStatus::InProgress).expect("serialize"),
            "\"in_progress\""
        );
    }

    #[test]
    fn in_house_guest_copies_arrival_identity() {
        let arrival = sample_arrival();
        let check_in_time = DateTime::parse_from_rfc3339("2026-08-06T14:30:00Z")
            .expect("valid timestamp")
            .with_timezone(&Utc);
        let guest = InHouseGuest::from_arrival(&arrival, check_in_time);
        assert_eq!(guest.id, arrival.id);
        assert_eq!(guest.booking_number, arrival.booking_number);
        assert_eq!(guest.status, ReservationStatus::CheckedIn);
        assert_eq!(guest.check_in_time, check_in_time);
    }

    #[test]
    fn checkout_record_is_terminal_and_dated_from_the_instant() {
        let arrival = sample_arrival();
        let check_in_time = DateTime::parse_from_rfc3339("2026-08-06T14:30:00Z")
            .expect("valid timestamp")
            .with_timezone(&Utc);
        let guest = InHouseGuest::from_arrival(&arrival, check_in_time);
        let check_out_time = DateTime::parse_from_rfc3339("2026-08-09T11:05:00Z")
            .expect("valid timestamp")
            .with_timezone(&Utc);
        let record = CheckoutRecord::from_guest(&guest, check_out_time, 897, None);
        assert_eq!(record.status, ReservationStatus::CheckedOut);
        assert_eq!(
            record.check_out_date,
            NaiveDate::from_ymd_opt(2026, 8, 9).expect("valid date")
        );
        assert_eq!(record.total_amount, 897);
    }

    #[test]
    fn arrival_round_trips_through_json() {
        let mut arrival = sample_arrival();
        arrival.check_in_time = Some(Utc::now());
        arrival.status = ReservationStatus::CheckedIn;
        let json = serde_json::to_string(&arrival).expect("serialize");
        let back: Arrival = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, arrival);
    }
}
