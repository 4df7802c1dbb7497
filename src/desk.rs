//! The front desk: single authority for guest lifecycle transitions.
//!
//! Every admin page of the original app mutated the store on its own,
//! which is how duplicate in-house entries and torn multi-key states crept
//! in. [`FrontDesk`] centralizes the transitions instead: each operation
//! validates first, stages every affected collection into one
//! [`WriteBatch`], commits the batch in a single storage call, and only
//! then emits the affected notifications in a fixed order. Subscribers
//! never observe a payload that was not durably written.
//!
//! The state machine, keyed by guest id:
//!
//! ```text
//! reserved (todayArrivals, no checkInTime)
//!     | check_in / walk_in
//!     v
//! checked-in (currentlyInHouse, checkInTime set)
//!     | check_out
//!     v
//! checked-out (checkoutHistory only; terminal)
//!
//! reserved --cancel--> cancelled (stays in todayArrivals)
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::bus::EventBus;
use crate::catalog::RoomType;
use crate::context::OpContext;
use crate::error::{DeskError, StorageError, ValidationError};
use crate::event::Notification;
use crate::model::{
    Arrival, CheckoutRecord, InHouseGuest, PendingRequest, RequestPriority, RequestStatus,
    ReservationStatus,
};
use crate::reports::guest_total;
use crate::store::{FileStore, MemoryStore, Storage, Store, StoreKey, WriteBatch};

/// Input for creating a reservation (the check-in wizard and the on-site
/// reservation form both produce one of these).
#[derive(Debug, Clone)]
pub struct NewReservation {
    pub guest_name: String,
    pub email: String,
    pub phone: String,
    pub room_number: String,
    pub room_type: RoomType,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    /// Prepaid amount, if the booking was paid up front.
    pub payment_amount: Option<u64>,
}

impl NewReservation {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.guest_name.trim().is_empty() {
            return Err(ValidationError::MissingField("guestName"));
        }
        if self.email.trim().is_empty() {
            return Err(ValidationError::MissingField("email"));
        }
        if self.phone.trim().is_empty() {
            return Err(ValidationError::MissingField("phone"));
        }
        if self.room_number.trim().is_empty() {
            return Err(ValidationError::MissingField("roomNumber"));
        }
        if self.check_out_date < self.check_in_date {
            return Err(ValidationError::InvalidDateRange {
                check_in: self.check_in_date,
                check_out: self.check_out_date,
            });
        }
        Ok(())
    }
}

/// Input for a guest service request.
#[derive(Debug, Clone)]
pub struct NewRequest {
    pub guest_name: String,
    pub room_number: String,
    pub request_type: String,
    pub request_title: String,
    pub request_details: String,
    pub priority: RequestPriority,
}

impl NewRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.guest_name.trim().is_empty() {
            return Err(ValidationError::MissingField("guestName"));
        }
        if self.request_title.trim().is_empty() {
            return Err(ValidationError::MissingField("requestTitle"));
        }
        Ok(())
    }
}

/// A guest record located by [`FrontDesk::find_guest`], tagged with the
/// lifecycle stage it was found in.
#[derive(Debug, Clone, PartialEq)]
pub enum GuestRecord {
    /// Still in arrivals (pending or cancelled).
    Reserved(Arrival),
    /// Currently checked in.
    InHouse(InHouseGuest),
    /// Terminal record from the checkout history.
    CheckedOut(CheckoutRecord),
}

/// The centralized guest lifecycle service.
///
/// `Clone` is cheap -- the store backend and the subscriber list are both
/// `Arc`-wrapped, so clones operate on the same state.
#[derive(Debug, Clone)]
pub struct FrontDesk {
    store: Store,
    bus: EventBus,
}

impl FrontDesk {
    /// Assemble a front desk from an existing store and bus.
    pub fn new(store: Store, bus: EventBus) -> Self {
        Self { store, bus }
    }

    /// Start configuring a front desk.
    pub fn builder() -> FrontDeskBuilder {
        FrontDeskBuilder::new()
    }

    /// The underlying typed store.
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// The bus views subscribe to.
    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    // -- reads ---------------------------------------------------------

    /// Current contents of the arrivals collection.
    pub fn arrivals(&self) -> Result<Vec<Arrival>, StorageError> {
        self.store.get_list(StoreKey::TodayArrivals)
    }

    /// Current contents of the in-house collection.
    pub fn in_house(&self) -> Result<Vec<InHouseGuest>, StorageError> {
        self.store.get_list(StoreKey::CurrentlyInHouse)
    }

    /// The append-only checkout history.
    pub fn checkout_history(&self) -> Result<Vec<CheckoutRecord>, StorageError> {
        self.store.get_list(StoreKey::CheckoutHistory)
    }

    /// Current contents of the pending-requests collection.
    pub fn pending_requests(&self) -> Result<Vec<PendingRequest>, StorageError> {
        self.store.get_list(StoreKey::PendingRequests)
    }

    /// Locate a guest id anywhere in the lifecycle -- the "find my stay"
    /// and guest-profile lookups.
    ///
    /// The in-house record wins if the id somehow appears in several
    /// collections.
    ///
    /// # Errors
    ///
    /// Returns [`DeskError::GuestNotFound`] if the id appears nowhere.
    pub fn find_guest(&self, guest_id: &str) -> Result<GuestRecord, DeskError> {
        if let Some(guest) = self.in_house()?.into_iter().find(|g| g.id == guest_id) {
            return Ok(GuestRecord::InHouse(guest));
        }
        if let Some(arrival) = self.arrivals()?.into_iter().find(|a| a.id == guest_id) {
            return Ok(GuestRecord::Reserved(arrival));
        }
        if let Some(record) = self
            .checkout_history()?
            .into_iter()
            .find(|r| r.id == guest_id)
        {
            return Ok(GuestRecord::CheckedOut(record));
        }
        Err(DeskError::GuestNotFound(guest_id.to_owned()))
    }

    // -- guest lifecycle ----------------------------------------------

    /// Create a pending reservation.
    ///
    /// # Errors
    ///
    /// Returns [`DeskError::Validation`] for missing fields or an inverted
    /// date range, [`DeskError::Storage`] if the write fails.
    pub fn reserve(&self, new: NewReservation, ctx: &OpContext) -> Result<Arrival, DeskError> {
        new.validate()?;
        let arrival = build_arrival(new);

        let mut arrivals = self.arrivals()?;
        arrivals.push(arrival.clone());

        let mut batch = WriteBatch::new();
        batch.put_list(StoreKey::TodayArrivals, &arrivals)?;
        self.commit(batch, vec![Notification::ArrivalsUpdated { arrivals }])?;

        tracing::info!(
            guest_id = %arrival.id,
            booking = %arrival.booking_number,
            actor = ctx.actor.as_deref().unwrap_or("guest"),
            "reservation created"
        );
        Ok(arrival)
    }

    /// Check in a pending arrival by guest id.
    ///
    /// Stamps the arrival's check-in time, flips its status, and inserts
    /// the guest into the in-house collection -- deduplicated by id
    /// unconditionally -- as one atomic two-key transition.
    ///
    /// # Errors
    ///
    /// Returns [`DeskError::GuestNotFound`] if the id is not in arrivals,
    /// [`DeskError::ReservationCancelled`] for cancelled reservations,
    /// [`DeskError::AlreadyCheckedIn`] if the guest is already in-house,
    /// and [`DeskError::AlreadyCheckedOut`] if the id is already terminal.
    pub fn check_in(&self, guest_id: &str, ctx: &OpContext) -> Result<InHouseGuest, DeskError> {
        let mut arrivals = self.arrivals()?;
        let mut in_house = self.in_house()?;
        let history = self.checkout_history()?;

        if history.iter().any(|r| r.id == guest_id) {
            return Err(DeskError::AlreadyCheckedOut(guest_id.to_owned()));
        }
        let arrival = arrivals
            .iter_mut()
            .find(|a| a.id == guest_id)
            .ok_or_else(|| DeskError::GuestNotFound(guest_id.to_owned()))?;
        match arrival.status {
            ReservationStatus::Cancelled => {
                return Err(DeskError::ReservationCancelled(guest_id.to_owned()));
            }
            ReservationStatus::CheckedIn => {
                return Err(DeskError::AlreadyCheckedIn(guest_id.to_owned()));
            }
            ReservationStatus::CheckedOut => {
                return Err(DeskError::AlreadyCheckedOut(guest_id.to_owned()));
            }
            ReservationStatus::Pending => {}
        }

        arrival.check_in_time = Some(ctx.now);
        arrival.status = ReservationStatus::CheckedIn;
        let guest = InHouseGuest::from_arrival(arrival, ctx.now);

        // Unconditional uniqueness by id, regardless of how the record
        // got here.
        in_house.retain(|g| g.id != guest_id);
        in_house.push(guest.clone());

        let mut batch = WriteBatch::new();
        batch.put_list(StoreKey::TodayArrivals, &arrivals)?;
        batch.put_list(StoreKey::CurrentlyInHouse, &in_house)?;
        self.commit(
            batch,
            vec![
                Notification::ArrivalsUpdated { arrivals },
                Notification::InHouseUpdated { in_house },
            ],
        )?;

        tracing::info!(
            guest_id = %guest.id,
            room = %guest.room_number,
            actor = ctx.actor.as_deref().unwrap_or("guest"),
            "guest checked in"
        );
        Ok(guest)
    }

    /// Create a reservation and check it in immediately -- the guest-facing
    /// wizard path -- as one atomic transition.
    ///
    /// # Errors
    ///
    /// Returns [`DeskError::Validation`] for bad input,
    /// [`DeskError::Storage`] if the write fails.
    pub fn walk_in(&self, new: NewReservation, ctx: &OpContext) -> Result<InHouseGuest, DeskError> {
        new.validate()?;
        let mut arrival = build_arrival(new);
        arrival.check_in_time = Some(ctx.now);
        arrival.status = ReservationStatus::CheckedIn;
        let guest = InHouseGuest::from_arrival(&arrival, ctx.now);

        let mut arrivals = self.arrivals()?;
        let mut in_house = self.in_house()?;
        arrivals.push(arrival);
        in_house.retain(|g| g.id != guest.id);
        in_house.push(guest.clone());

        let mut batch = WriteBatch::new();
        batch.put_list(StoreKey::TodayArrivals, &arrivals)?;
        batch.put_list(StoreKey::CurrentlyInHouse, &in_house)?;
        self.commit(
            batch,
            vec![
                Notification::ArrivalsUpdated { arrivals },
                Notification::InHouseUpdated { in_house },
            ],
        )?;

        tracing::info!(
            guest_id = %guest.id,
            room = %guest.room_number,
            actor = ctx.actor.as_deref().unwrap_or("guest"),
            "walk-in checked in"
        );
        Ok(guest)
    }

    /// Check out an in-house guest.
    ///
    /// Computes the final amount, removes the guest from both active
    /// collections, and appends the terminal record to the checkout
    /// history -- one atomic three-key transition.
    ///
    /// # Errors
    ///
    /// Returns [`DeskError::AlreadyCheckedOut`] if the id is only in the
    /// history, [`DeskError::GuestNotFound`] if it is nowhere.
    pub fn check_out(
        &self,
        guest_id: &str,
        feedback: Option<String>,
        ctx: &OpContext,
    ) -> Result<CheckoutRecord, DeskError> {
        let mut arrivals = self.arrivals()?;
        let mut in_house = self.in_house()?;
        let mut history = self.checkout_history()?;

        let Some(pos) = in_house.iter().position(|g| g.id == guest_id) else {
            if history.iter().any(|r| r.id == guest_id) {
                return Err(DeskError::AlreadyCheckedOut(guest_id.to_owned()));
            }
            return Err(DeskError::GuestNotFound(guest_id.to_owned()));
        };
        let guest = in_house.remove(pos);

        let total_amount = guest_total(&guest, ctx.today());
        let record = CheckoutRecord::from_guest(&guest, ctx.now, total_amount, feedback);

        arrivals.retain(|a| a.id != guest_id);
        history.push(record.clone());

        let mut batch = WriteBatch::new();
        batch.put_list(StoreKey::TodayArrivals, &arrivals)?;
        batch.put_list(StoreKey::CurrentlyInHouse, &in_house)?;
        batch.put_list(StoreKey::CheckoutHistory, &history)?;
        self.commit(
            batch,
            vec![
                Notification::ArrivalsUpdated { arrivals },
                Notification::InHouseUpdated { in_house },
                Notification::CheckoutUpdated { checkouts: history },
            ],
        )?;

        tracing::info!(
            guest_id = %record.id,
            total = record.total_amount,
            actor = ctx.actor.as_deref().unwrap_or("guest"),
            "guest checked out"
        );
        Ok(record)
    }

    /// Cancel a pending reservation. The record stays in the arrivals
    /// collection with status `cancelled`.
    ///
    /// # Errors
    ///
    /// Returns [`DeskError::GuestNotFound`] if the id is not in arrivals,
    /// [`DeskError::AlreadyCheckedIn`] once the guest is in-house.
    pub fn cancel_reservation(&self, guest_id: &str) -> Result<Arrival, DeskError> {
        let mut arrivals = self.arrivals()?;
        let arrival = arrivals
            .iter_mut()
            .find(|a| a.id == guest_id)
            .ok_or_else(|| DeskError::GuestNotFound(guest_id.to_owned()))?;
        match arrival.status {
            ReservationStatus::CheckedIn => {
                return Err(DeskError::AlreadyCheckedIn(guest_id.to_owned()));
            }
            ReservationStatus::CheckedOut => {
                return Err(DeskError::AlreadyCheckedOut(guest_id.to_owned()));
            }
            ReservationStatus::Pending | ReservationStatus::Cancelled => {}
        }
        arrival.status = ReservationStatus::Cancelled;
        let cancelled = arrival.clone();

        let mut batch = WriteBatch::new();
        batch.put_list(StoreKey::TodayArrivals, &arrivals)?;
        self.commit(batch, vec![Notification::ArrivalsUpdated { arrivals }])?;

        tracing::info!(guest_id = %cancelled.id, "reservation cancelled");
        Ok(cancelled)
    }

    /// Delete a guest from all three lifecycle collections as one
    /// transition -- never just one of them.
    ///
    /// # Errors
    ///
    /// Returns [`DeskError::GuestNotFound`] if the id appears in none of
    /// the collections.
    pub fn delete_guest(&self, guest_id: &str) -> Result<(), DeskError> {
        let mut arrivals = self.arrivals()?;
        let mut in_house = self.in_house()?;
        let mut history = self.checkout_history()?;

        let before = arrivals.len() + in_house.len() + history.len();
        arrivals.retain(|a| a.id != guest_id);
        in_house.retain(|g| g.id != guest_id);
        history.retain(|r| r.id != guest_id);
        if arrivals.len() + in_house.len() + history.len() == before {
            return Err(DeskError::GuestNotFound(guest_id.to_owned()));
        }

        let mut batch = WriteBatch::new();
        batch.put_list(StoreKey::TodayArrivals, &arrivals)?;
        batch.put_list(StoreKey::CurrentlyInHouse, &in_house)?;
        batch.put_list(StoreKey::CheckoutHistory, &history)?;
        self.commit(
            batch,
            vec![
                Notification::ArrivalsUpdated { arrivals },
                Notification::InHouseUpdated { in_house },
                Notification::CheckoutUpdated { checkouts: history },
            ],
        )?;

        tracing::info!(guest_id = %guest_id, "guest deleted from all collections");
        Ok(())
    }

    // -- guest service requests ---------------------------------------

    /// Submit a new guest service request.
    ///
    /// # Errors
    ///
    /// Returns [`DeskError::Validation`] for missing fields,
    /// [`DeskError::Storage`] if the write fails.
    pub fn submit_request(
        &self,
        new: NewRequest,
        ctx: &OpContext,
    ) -> Result<PendingRequest, DeskError> {
        new.validate()?;
        let request = PendingRequest {
            id: new_id(),
            guest_name: new.guest_name,
            room_number: new.room_number,
            request_type: new.request_type,
            request_title: new.request_title,
            request_details: new.request_details,
            status: RequestStatus::Pending,
            priority: new.priority,
            timestamp: ctx.now,
            assigned_to: None,
        };

        let mut requests = self.pending_requests()?;
        requests.push(request.clone());
        self.write_requests(requests)?;

        tracing::info!(request_id = %request.id, title = %request.request_title, "request submitted");
        Ok(request)
    }

    /// Move a request to a new workflow status.
    ///
    /// # Errors
    ///
    /// Returns [`DeskError::RequestNotFound`] for unknown ids.
    pub fn set_request_status(
        &self,
        request_id: &str,
        status: RequestStatus,
    ) -> Result<PendingRequest, DeskError> {
        self.update_request(request_id, |request| request.status = status)
    }

    /// Assign (or unassign) a request.
    ///
    /// # Errors
    ///
    /// Returns [`DeskError::RequestNotFound`] for unknown ids.
    pub fn assign_request(
        &self,
        request_id: &str,
        assignee: Option<String>,
    ) -> Result<PendingRequest, DeskError> {
        self.update_request(request_id, |request| request.assigned_to = assignee)
    }

    /// Delete a request outright.
    ///
    /// # Errors
    ///
    /// Returns [`DeskError::RequestNotFound`] for unknown ids.
    pub fn delete_request(&self, request_id: &str) -> Result<(), DeskError> {
        let mut requests = self.pending_requests()?;
        let before = requests.len();
        requests.retain(|r| r.id != request_id);
        if requests.len() == before {
            return Err(DeskError::RequestNotFound(request_id.to_owned()));
        }
        self.write_requests(requests)?;
        tracing::info!(request_id = %request_id, "request deleted");
        Ok(())
    }

    /// Emit the payload-less navigation signal back to the dashboard.
    pub fn back_to_dashboard(&self) {
        self.bus.emit(&Notification::AdminBackToDashboard);
    }

    // -- internals -----------------------------------------------------

    /// Commit the staged writes, then emit the notifications in order.
    /// Nothing is emitted if the commit fails.
    fn commit(
        &self,
        batch: WriteBatch,
        notifications: Vec<Notification>,
    ) -> Result<(), StorageError> {
        self.store.commit(batch)?;
        for notification in &notifications {
            self.bus.emit(notification);
        }
        Ok(())
    }

    fn update_request(
        &self,
        request_id: &str,
        mutate: impl FnOnce(&mut PendingRequest),
    ) -> Result<PendingRequest, DeskError> {
        let mut requests = self.pending_requests()?;
        let request = requests
            .iter_mut()
            .find(|r| r.id == request_id)
            .ok_or_else(|| DeskError::RequestNotFound(request_id.to_owned()))?;
        mutate(request);
        let updated = request.clone();
        self.write_requests(requests)?;
        Ok(updated)
    }

    fn write_requests(&self, requests: Vec<PendingRequest>) -> Result<(), StorageError> {
        let mut batch = WriteBatch::new();
        batch.put_list(StoreKey::PendingRequests, &requests)?;
        self.commit(
            batch,
            vec![Notification::PendingRequestsUpdated { requests }],
        )
    }
}

/// Generate an opaque guest or request id.
fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Generate a guest-facing booking number.
fn new_booking_number() -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("BK-{}", id[..8].to_uppercase())
}

fn build_arrival(new: NewReservation) -> Arrival {
    Arrival {
        id: new_id(),
        guest_name: new.guest_name,
        email: new.email,
        phone: new.phone,
        room_number: new.room_number,
        room_type: new.room_type,
        check_in_date: new.check_in_date,
        check_out_date: new.check_out_date,
        check_in_time: None,
        status: ReservationStatus::Pending,
        booking_number: new_booking_number(),
        payment_amount: new.payment_amount,
    }
}

/// Builder for configuring and opening a [`FrontDesk`].
///
/// Selects the storage backend; defaults to an in-memory store when none
/// is chosen.
///
/// # Examples
///
/// ```
/// use swiftstay_core::FrontDesk;
///
/// let desk = FrontDesk::builder().in_memory().open().expect("open");
/// assert!(desk.arrivals().expect("read").is_empty());
/// ```
pub struct FrontDeskBuilder {
    backend: BackendChoice,
}

enum BackendChoice {
    Memory,
    Dir(PathBuf),
    Custom(Arc<dyn Storage>),
}

impl FrontDeskBuilder {
    /// Create a builder with the default in-memory backend.
    pub fn new() -> Self {
        Self {
            backend: BackendChoice::Memory,
        }
    }

    /// Persist collections as JSON files under `path`.
    pub fn base_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.backend = BackendChoice::Dir(path.into());
        self
    }

    /// Keep collections in memory only.
    pub fn in_memory(mut self) -> Self {
        self.backend = BackendChoice::Memory;
        self
    }

    /// Use a caller-provided storage backend.
    pub fn storage(mut self, backend: Arc<dyn Storage>) -> Self {
        self.backend = BackendChoice::Custom(backend);
        self
    }

    /// Open the configured front desk.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if a directory backend cannot be opened.
    pub fn open(self) -> Result<FrontDesk, StorageError> {
        let backend: Arc<dyn Storage> = match self.backend {
            BackendChoice::Memory => Arc::new(MemoryStore::new()),
            BackendChoice::Dir(path) => Arc::new(FileStore::open(path)?),
            BackendChoice::Custom(backend) => backend,
        };
        Ok(FrontDesk::new(Store::new(backend), EventBus::new()))
    }
}

impl Default for FrontDeskBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn fixed_ctx() -> OpContext {
        OpContext::at(
            DateTime::parse_from_rfc3339("2026-08-06T14:30:00Z")
                .expect("valid timestamp")
                .with_timezone(&Utc),
        )
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn reservation() -> NewReservation {
        NewReservation {
            guest_name: "Alice Martin".into(),
            email: "alice@example.com".into(),
            phone: "555-0100".into(),
            room_number: "204".into(),
            room_type: RoomType::Deluxe,
            check_in_date: date(2026, 8, 6),
            check_out_date: date(2026, 8, 9),
            payment_amount: None,
        }
    }

    fn desk() -> FrontDesk {
        FrontDesk::builder().in_memory().open().expect("open desk")
    }

    #[test]
    fn reserve_creates_a_pending_arrival() {
        let desk = desk();
        let arrival = desk.reserve(reservation(), &fixed_ctx()).expect("reserve");
        assert_eq!(arrival.status, ReservationStatus::Pending);
        assert!(arrival.check_in_time.is_none());
        assert!(arrival.booking_number.starts_with("BK-"));

        let arrivals = desk.arrivals().expect("read arrivals");
        assert_eq!(arrivals.len(), 1);
        assert_eq!(arrivals[0], arrival);
    }

    #[test]
    fn reserve_rejects_blank_guest_name_without_writing() {
        let desk = desk();
        let mut new = reservation();
        new.guest_name = "   ".into();
        let err = desk
            .reserve(new, &fixed_ctx())
            .expect_err("should be rejected");
        assert!(matches!(
            err,
            DeskError::Validation(ValidationError::MissingField("guestName"))
        ));
        assert!(desk.arrivals().expect("read").is_empty());
    }

    #[test]
    fn reserve_rejects_inverted_date_range() {
        let desk = desk();
        let mut new = reservation();
        new.check_out_date = date(2026, 8, 1);
        let err = desk
            .reserve(new, &fixed_ctx())
            .expect_err("should be rejected");
        assert!(matches!(
            err,
            DeskError::Validation(ValidationError::InvalidDateRange { .. })
        ));
    }

    #[test]
    fn check_in_moves_guest_in_house_and_stamps_the_arrival() {
        let desk = desk();
        let ctx = fixed_ctx();
        let arrival = desk.reserve(reservation(), &ctx).expect("reserve");
        let guest = desk.check_in(&arrival.id, &ctx).expect("check in");

        assert_eq!(guest.id, arrival.id);
        assert_eq!(guest.check_in_time, ctx.now);

        let arrivals = desk.arrivals().expect("read arrivals");
        assert_eq!(arrivals[0].status, ReservationStatus::CheckedIn);
        assert_eq!(arrivals[0].check_in_time, Some(ctx.now));

        let in_house = desk.in_house().expect("read in-house");
        assert_eq!(in_house.len(), 1);
        assert!(desk.checkout_history().expect("read history").is_empty());
    }

    #[test]
    fn check_in_twice_is_rejected_and_never_duplicates() {
        let desk = desk();
        let ctx = fixed_ctx();
        let arrival = desk.reserve(reservation(), &ctx).expect("reserve");
        desk.check_in(&arrival.id, &ctx).expect("first check-in");

        let err = desk
            .check_in(&arrival.id, &ctx)
            .expect_err("second check-in should fail");
        assert!(matches!(err, DeskError::AlreadyCheckedIn(_)));

        let in_house = desk.in_house().expect("read in-house");
        assert_eq!(
            in_house.iter().filter(|g| g.id == arrival.id).count(),
            1,
            "guest id must appear exactly once"
        );
    }

    #[test]
    fn check_in_of_unknown_guest_is_not_found() {
        let desk = desk();
        let err = desk
            .check_in("missing", &fixed_ctx())
            .expect_err("should fail");
        assert!(matches!(err, DeskError::GuestNotFound(_)));
    }

    #[test]
    fn check_in_of_cancelled_reservation_is_rejected() {
        let desk = desk();
        let ctx = fixed_ctx();
        let arrival = desk.reserve(reservation(), &ctx).expect("reserve");
        desk.cancel_reservation(&arrival.id).expect("cancel");

        let err = desk
            .check_in(&arrival.id, &ctx)
            .expect_err("should be rejected");
        assert!(matches!(err, DeskError::ReservationCancelled(_)));
        assert!(desk.in_house().expect("read").is_empty());
    }

    #[test]
    fn walk_in_creates_and_checks_in_atomically() {
        let desk = desk();
        let guest = desk.walk_in(reservation(), &fixed_ctx()).expect("walk in");

        let arrivals = desk.arrivals().expect("read arrivals");
        let in_house = desk.in_house().expect("read in-house");
        assert_eq!(arrivals.len(), 1);
        assert_eq!(arrivals[0].id, guest.id);
        assert_eq!(arrivals[0].status, ReservationStatus::CheckedIn);
        assert_eq!(in_house.len(), 1);
    }

    #[test]
    fn check_out_moves_guest_to_history_with_computed_total() {
        let desk = desk();
        let ctx = fixed_ctx();
        let guest = desk.walk_in(reservation(), &ctx).expect("walk in");

        // Same-day checkout on a Deluxe room: 1-night minimum at 299.
        let record = desk
            .check_out(&guest.id, Some("great stay".into()), &ctx)
            .expect("check out");
        assert_eq!(record.total_amount, 299);
        assert_eq!(record.status, ReservationStatus::CheckedOut);
        assert_eq!(record.feedback.as_deref(), Some("great stay"));

        assert!(desk.in_house().expect("read").is_empty());
        assert!(desk.arrivals().expect("read").is_empty());
        let history = desk.checkout_history().expect("read history");
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, guest.id);
    }

    #[test]
    fn check_out_twice_reports_already_checked_out() {
        let desk = desk();
        let ctx = fixed_ctx();
        let guest = desk.walk_in(reservation(), &ctx).expect("walk in");
        desk.check_out(&guest.id, None, &ctx).expect("first checkout");

        let err = desk
            .check_out(&guest.id, None, &ctx)
            .expect_err("second checkout should fail");
        assert!(matches!(err, DeskError::AlreadyCheckedOut(_)));
        assert_eq!(desk.checkout_history().expect("read").len(), 1);
    }

    #[test]
    fn check_out_honors_prepaid_amount() {
        let desk = desk();
        let ctx = fixed_ctx();
        let mut new = reservation();
        new.payment_amount = Some(1_250);
        let guest = desk.walk_in(new, &ctx).expect("walk in");
        let record = desk.check_out(&guest.id, None, &ctx).expect("check out");
        assert_eq!(record.total_amount, 1_250);
    }

    #[test]
    fn cancel_keeps_the_record_in_arrivals() {
        let desk = desk();
        let arrival = desk.reserve(reservation(), &fixed_ctx()).expect("reserve");
        let cancelled = desk.cancel_reservation(&arrival.id).expect("cancel");
        assert_eq!(cancelled.status, ReservationStatus::Cancelled);

        let arrivals = desk.arrivals().expect("read arrivals");
        assert_eq!(arrivals.len(), 1);
        assert_eq!(arrivals[0].status, ReservationStatus::Cancelled);
    }

    #[test]
    fn cancel_of_checked_in_guest_is_rejected() {
        let desk = desk();
        let ctx = fixed_ctx();
        let guest = desk.walk_in(reservation(), &ctx).expect("walk in");
        let err = desk
            .cancel_reservation(&guest.id)
            .expect_err("should be rejected");
        assert!(matches!(err, DeskError::AlreadyCheckedIn(_)));
    }

    #[test]
    fn delete_guest_clears_every_collection_at_once() {
        let desk = desk();
        let ctx = fixed_ctx();
        let guest = desk.walk_in(reservation(), &ctx).expect("walk in");
        desk.check_out(&guest.id, None, &ctx).expect("check out");

        desk.delete_guest(&guest.id).expect("delete");
        assert!(desk.arrivals().expect("read").is_empty());
        assert!(desk.in_house().expect("read").is_empty());
        assert!(desk.checkout_history().expect("read").is_empty());
    }

    #[test]
    fn delete_of_unknown_guest_is_not_found() {
        let desk = desk();
        let err = desk.delete_guest("missing").expect_err("should fail");
        assert!(matches!(err, DeskError::GuestNotFound(_)));
    }

    fn request() -> NewRequest {
        NewRequest {
            guest_name: "Alice Martin".into(),
            room_number: "204".into(),
            request_type: "housekeeping".into(),
            request_title: "Extra towels".into(),
            request_details: "Two bath towels, please.".into(),
            priority: RequestPriority::Normal,
        }
    }

    #[test]
    fn submit_request_starts_pending_and_unassigned() {
        let desk = desk();
        let ctx = fixed_ctx();
        let created = desk.submit_request(request(), &ctx).expect("submit");
        assert_eq!(created.status, RequestStatus::Pending);
        assert_eq!(created.assigned_to, None);
        assert_eq!(created.timestamp, ctx.now);

        let requests = desk.pending_requests().expect("read requests");
        assert_eq!(requests, vec![created]);
    }

    #[test]
    fn submit_request_rejects_blank_title() {
        let desk = desk();
        let mut new = request();
        new.request_title = "".into();
        let err = desk
            .submit_request(new, &fixed_ctx())
            .expect_err("should be rejected");
        assert!(matches!(
            err,
            DeskError::Validation(ValidationError::MissingField("requestTitle"))
        ));
    }

    #[test]
    fn request_status_and_assignment_round_trip() {
        let desk = desk();
        let created = desk.submit_request(request(), &fixed_ctx()).expect("submit");

        let assigned = desk
            .assign_request(&created.id, Some("staff-7".into()))
            .expect("assign");
        assert_eq!(assigned.assigned_to.as_deref(), Some("staff-7"));

        let in_progress = desk
            .set_request_status(&created.id, RequestStatus::InProgress)
            .expect("set status");
        assert_eq!(in_progress.status, RequestStatus::InProgress);

        let stored = desk.pending_requests().expect("read requests");
        assert_eq!(stored[0].status, RequestStatus::InProgress);
        assert_eq!(stored[0].assigned_to.as_deref(), Some("staff-7"));
    }

    #[test]
    fn delete_request_removes_it() {
        let desk = desk();
        let created = desk.submit_request(request(), &fixed_ctx()).expect("submit");
        desk.delete_request(&created.id).expect("delete");
        assert!(desk.pending_requests().expect("read").is_empty());

        let err = desk
            .delete_request(&created.id)
            .expect_err("second delete should fail");
        assert!(matches!(err, DeskError::RequestNotFound(_)));
    }

    #[test]
    fn find_guest_reports_the_lifecycle_stage() {
        let desk = desk();
        let ctx = fixed_ctx();

        let arrival = desk.reserve(reservation(), &ctx).expect("reserve");
        assert!(matches!(
            desk.find_guest(&arrival.id).expect("find reserved"),
            GuestRecord::Reserved(_)
        ));

        desk.check_in(&arrival.id, &ctx).expect("check in");
        assert!(matches!(
            desk.find_guest(&arrival.id).expect("find in-house"),
            GuestRecord::InHouse(_)
        ));

        desk.check_out(&arrival.id, None, &ctx).expect("check out");
        assert!(matches!(
            desk.find_guest(&arrival.id).expect("find checked out"),
            GuestRecord::CheckedOut(_)
        ));

        let err = desk.find_guest("missing").expect_err("unknown id");
        assert!(matches!(err, DeskError::GuestNotFound(_)));
    }

    #[test]
    fn generated_ids_are_unique() {
        let a = new_id();
        let b = new_id();
        assert_ne!(a, b);
        assert!(new_booking_number().starts_with("BK-"));
    }
}
