//! Typed event names and payloads for the same-session notifier.
//!
//! The original app scattered event-name strings across every component
//! and shipped at least one silent typo between an emit site and a cleanup
//! path. Here the event surface is a closed pair of enums: [`Topic`] is the
//! name, [`Notification`] is the name plus its payload, and the compiler
//! rules out mismatches.

use crate::model::{Arrival, CheckoutRecord, InHouseGuest, PendingRequest};

/// The closed set of event names.
///
/// The string form of each topic matches the event name the original app
/// dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    /// The arrivals collection was replaced.
    ArrivalsUpdated,
    /// The in-house collection was replaced.
    InHouseUpdated,
    /// The checkout history was replaced.
    CheckoutUpdated,
    /// The pending-requests collection was replaced.
    PendingRequestsUpdated,
    /// Navigation signal back to the admin dashboard; no payload.
    AdminBackToDashboard,
}

impl Topic {
    /// All topics, in emission order for multi-key transitions.
    pub const ALL: [Topic; 5] = [
        Topic::ArrivalsUpdated,
        Topic::InHouseUpdated,
        Topic::CheckoutUpdated,
        Topic::PendingRequestsUpdated,
        Topic::AdminBackToDashboard,
    ];

    /// The event name as the original app dispatched it.
    pub fn as_str(self) -> &'static str {
        match self {
            Topic::ArrivalsUpdated => "arrivalsUpdated",
            Topic::InHouseUpdated => "inHouseUpdated",
            Topic::CheckoutUpdated => "checkoutUpdated",
            Topic::PendingRequestsUpdated => "pendingRequestsUpdated",
            Topic::AdminBackToDashboard => "adminBackToDashboard",
        }
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An event plus its payload snapshot.
///
/// Each collection variant carries the full replacement collection, not a
/// delta: subscribers replace their local state wholesale and never need
/// to re-read the store.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    /// New contents of the arrivals collection.
    ArrivalsUpdated { arrivals: Vec<Arrival> },
    /// New contents of the in-house collection.
    InHouseUpdated { in_house: Vec<InHouseGuest> },
    /// New contents of the checkout history.
    CheckoutUpdated { checkouts: Vec<CheckoutRecord> },
    /// New contents of the pending-requests collection.
    PendingRequestsUpdated { requests: Vec<PendingRequest> },
    /// Payload-less navigation signal.
    AdminBackToDashboard,
}

impl Notification {
    /// The topic this notification is delivered on.
    pub fn topic(&self) -> Topic {
        match self {
            Notification::ArrivalsUpdated { .. } => Topic::ArrivalsUpdated,
            Notification::InHouseUpdated { .. } => Topic::InHouseUpdated,
            Notification::CheckoutUpdated { .. } => Topic::CheckoutUpdated,
            Notification::PendingRequestsUpdated { .. } => Topic::PendingRequestsUpdated,
            Notification::AdminBackToDashboard => Topic::AdminBackToDashboard,
        }
    }
}
