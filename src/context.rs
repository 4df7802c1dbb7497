//! Cross-cutting operation context.

use chrono::{DateTime, NaiveDate, Utc};

/// Cross-cutting metadata passed alongside a lifecycle operation.
///
/// Carries the instant the operation is considered to happen at, plus an
/// optional actor identity for audit logging. Taking the clock as data
/// keeps every transition deterministic under test.
///
/// # Examples
///
/// ```
/// use swiftstay_core::OpContext;
///
/// let ctx = OpContext::now().with_actor("front-desk-1");
/// assert_eq!(ctx.actor.as_deref(), Some("front-desk-1"));
/// ```
#[derive(Debug, Clone)]
pub struct OpContext {
    /// The instant stamped on check-ins, check-outs, and requests.
    pub now: DateTime<Utc>,
    /// Identity of whoever performed the operation, for logs.
    pub actor: Option<String>,
}

impl OpContext {
    /// Context anchored at the current wall-clock instant.
    pub fn now() -> Self {
        Self {
            now: Utc::now(),
            actor: None,
        }
    }

    /// Context anchored at a fixed instant; the form tests use.
    pub fn at(now: DateTime<Utc>) -> Self {
        Self { now, actor: None }
    }

    /// Set the actor identity.
    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }

    /// The calendar day of this context's instant, in UTC.
    pub fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }
}

impl Default for OpContext {
    fn default() -> Self {
        Self::now()
    }
}
