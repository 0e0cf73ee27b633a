//! Per-call cancellation and deadlines.
//!
//! Every admin operation takes a [`RequestContext`]. A context may carry a
//! [`CancellationToken`] shared with the caller, a deadline, both, or
//! neither. Operations check the context before sending and race the
//! in-flight request against it, failing with
//! [`CancelReason::Canceled`] or [`CancelReason::DeadlineExceeded`].
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use kong_admin::RequestContext;
//! use tokio_util::sync::CancellationToken;
//!
//! let token = CancellationToken::new();
//! let ctx = RequestContext::with_cancellation(token.clone())
//!     .with_timeout(Duration::from_secs(5));
//!
//! token.cancel();
//! assert!(ctx.canceled().is_some());
//! ```

use std::fmt;
use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Why an operation stopped before completing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CancelReason {
    /// The caller's cancellation token fired.
    Canceled,
    /// The context deadline passed.
    DeadlineExceeded,
}

impl fmt::Display for CancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Canceled => f.write_str("canceled by caller"),
            Self::DeadlineExceeded => f.write_str("deadline exceeded"),
        }
    }
}

/// Caller-supplied cancellation and deadline for a single operation.
///
/// Cloning a context shares the same token; deadlines are absolute, so a
/// cloned context expires at the same instant.
#[derive(Clone, Debug, Default)]
pub struct RequestContext {
    cancel: Option<CancellationToken>,
    deadline: Option<Instant>,
}

impl RequestContext {
    /// A context that never cancels and has no deadline.
    #[must_use]
    pub fn background() -> Self {
        Self::default()
    }

    /// A context canceled when `token` is canceled.
    #[must_use]
    pub const fn with_cancellation(token: CancellationToken) -> Self {
        Self {
            cancel: Some(token),
            deadline: None,
        }
    }

    /// Sets a deadline `timeout` from now, keeping an earlier deadline if
    /// one is already set.
    #[must_use]
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Sets an absolute deadline, keeping an earlier deadline if one is
    /// already set.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(self.deadline.map_or(deadline, |d| d.min(deadline)));
        self
    }

    /// Returns the cancellation token, if any.
    #[must_use]
    pub const fn cancellation_token(&self) -> Option<&CancellationToken> {
        self.cancel.as_ref()
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns the reason this context is already done, if it is.
    #[must_use]
    pub fn canceled(&self) -> Option<CancelReason> {
        if self.cancel.as_ref().is_some_and(CancellationToken::is_cancelled) {
            return Some(CancelReason::Canceled);
        }
        if self.deadline.is_some_and(|d| Instant::now() >= d) {
            return Some(CancelReason::DeadlineExceeded);
        }
        None
    }

    /// Runs `fut` to completion unless the context is canceled or its
    /// deadline passes first. The future is dropped on cancellation.
    pub(crate) async fn run<F: Future>(&self, fut: F) -> Result<F::Output, CancelReason> {
        if let Some(reason) = self.canceled() {
            return Err(reason);
        }

        let canceled = async {
            match &self.cancel {
                Some(token) => token.cancelled().await,
                None => std::future::pending().await,
            }
        };
        let expired = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending().await,
            }
        };

        tokio::select! {
            biased;

            () = canceled => Err(CancelReason::Canceled),
            () = expired => Err(CancelReason::DeadlineExceeded),
            output = fut => Ok(output),
        }
    }
}
