// SPDX-License-Identifier: MIT
//! Cooperative cancellation for in-flight playback.
//!
//! [`CancelToken`] is a cheap, cloneable signal a playback task observes,
//! either by polling [`is_cancelled`](CancelToken::is_cancelled) between
//! pipeline stages or by awaiting [`cancelled`](CancelToken::cancelled) in a
//! `select!`. The controlling side holds the [`CancelSource`]. Browsers
//! hand this job to `AbortController` / `AbortSignal`; this is the
//! async-Rust equivalent the player builds its preemption on.

#![forbid(unsafe_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Notify;

/// A cloneable cancellation signal observed by a playback task.
#[derive(Clone)]
pub struct CancelToken {
    inner: Arc<CancelInner>,
}

/// The control handle that triggers cancellation.
///
/// Dropping the source does **not** cancel the token; cancellation only
/// happens through an explicit [`cancel`](Self::cancel) call.
pub struct CancelSource {
    inner: Arc<CancelInner>,
}

struct CancelInner {
    cancelled: AtomicBool,
    notify: Notify,
}

impl CancelSource {
    /// Create a new source with an uncancelled token.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(CancelInner {
                cancelled: AtomicBool::new(false),
                notify: Notify::new(),
            }),
        }
    }

    /// Obtain a cloneable token that observes this source's state.
    pub fn token(&self) -> CancelToken {
        CancelToken {
            inner: Arc::clone(&self.inner),
        }
    }

    /// Signal cancellation. All tokens derived from this source observe
    /// `is_cancelled() == true` and pending `cancelled()` waits wake.
    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::Release);
        self.inner.notify.notify_waiters();
    }

    /// Check whether cancellation has already been requested.
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Acquire)
    }
}

impl Default for CancelSource {
    fn default() -> Self {
        Self::new()
    }
}

impl CancelToken {
    /// Returns `true` if cancellation has been requested.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Acquire)
    }

    /// Wait until cancellation is requested.
    ///
    /// Returns immediately if the token is already cancelled. Safe against
    /// the signal racing the registration: interest in the notification is
    /// enabled before the final flag check.
    pub async fn cancelled(&self) {
        loop {
            if self.is_cancelled() {
                return;
            }
            let notified = self.inner.notify.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }
}
