//! Cancellation and deadlines for in-flight renders.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::RenderError;

/// Shared flag that asks a running render to stop.
///
/// Clones share the same flag, so one can be handed to another thread and
/// cancelled from there.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Renders notice at the next pixel boundary.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Stop conditions checked between pixels.
#[derive(Debug, Clone, Default)]
pub struct RenderControl {
    token: CancelToken,
    deadline: Option<Instant>,
}

impl RenderControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an existing cancellation token.
    pub fn with_token(mut self, token: CancelToken) -> Self {
        self.token = token;
        self
    }

    /// Stop the render once `deadline` has passed.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Stop the render `timeout` from now.
    ///
    /// A timeout too large to represent as an `Instant` never expires.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.deadline = Instant::now().checked_add(timeout);
        self
    }

    pub fn token(&self) -> &CancelToken {
        &self.token
    }

    /// Returns an error if the render should stop.
    pub fn check(&self) -> Result<(), RenderError> {
        if self.token.is_cancelled() {
            return Err(RenderError::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(RenderError::DeadlineExceeded),
            _ => Ok(()),
        }
    }
}
