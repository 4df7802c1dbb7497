//! Client-side state core for the SwiftStay hotel self-check-in app.
//!
//! The original product is a single-page app whose "backend" is a
//! browser key-value store plus in-page custom events, with every view
//! reading, mutating, and re-broadcasting shared collections on its own.
//! This crate is that shared architecture built deliberately:
//!
//! - [`Store`] -- a durable key-value map from named keys to JSON
//!   collections, behind an injectable [`Storage`] backend.
//! - [`EventBus`] -- a synchronous same-session notifier with a closed
//!   [`Topic`]/[`Notification`] event surface.
//! - [`FrontDesk`] -- the single authority for guest lifecycle
//!   transitions, committing every multi-key change as one batch before
//!   notifying subscribers.
//! - [`reports`] -- pure derived values (nights, stay totals, occupancy,
//!   revenue) recomputed from the collections, never stored.

mod bus;
pub use bus::{EventBus, Subscription};
mod catalog;
pub use catalog::{Room, RoomStatus, RoomType, catalog_with_occupancy, room_catalog};
mod context;
pub use context::OpContext;
mod desk;
pub use desk::{FrontDesk, FrontDeskBuilder, GuestRecord, NewRequest, NewReservation};
mod error;
pub use error::{DeskError, StorageError, ValidationError};
mod event;
pub use event::{Notification, Topic};
mod model;
pub use model::{
    Arrival, CheckoutRecord, InHouseGuest, PendingRequest, RequestPriority, RequestStatus,
    ReservationStatus,
};
pub mod reports;
pub use reports::{
    OccupancySlice, RevenueSummary, guest_total, nights_between, occupancy_breakdown,
    revenue_breakdown, stay_total,
};
mod session;
pub use session::{ADMIN_PASSWORD, ADMIN_USERNAME, AdminSession, AdminUser, AuthError};
mod store;
pub use store::{FileStore, MemoryStore, Storage, Store, StoreKey, WriteBatch};
