//! Deferred work owned by a field.

use tokio::task::JoinHandle;

/// A cancellable deferred task.
#[derive(Debug, Default)]
pub enum PendingRequest {
    #[default]
    Idle,
    Pending(JoinHandle<()>),
}

/// Deferred work of one field. Only the validating debounce today.
#[derive(Debug, Default)]
pub struct FieldRequests {
    validate: PendingRequest,
}

impl FieldRequests {
    /// Replace any pending debounce with `handle`.
    pub fn arm_validate(&mut self, handle: JoinHandle<()>) {
        self.cancel_validate();
        self.validate = PendingRequest::Pending(handle);
    }

    /// Abort the pending debounce, if any.
    pub fn cancel_validate(&mut self) {
        if let PendingRequest::Pending(handle) = std::mem::take(&mut self.validate) {
            handle.abort();
        }
    }

    /// Whether a debounce is armed and has not fired yet.
    pub fn validate_pending(&self) -> bool {
        matches!(&self.validate, PendingRequest::Pending(handle) if !handle.is_finished())
    }
}

impl Drop for FieldRequests {
    fn drop(&mut self) {
        self.cancel_validate();
    }
}
