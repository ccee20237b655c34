//! Error types for queue operations

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueError {
    /// Backing storage could not be obtained, or the queue handle is absent.
    #[error("allocation failed")]
    Allocation,

    /// Removal from an absent or empty queue.
    #[error("queue is empty")]
    Empty,
}

pub type Result<T> = std::result::Result<T, QueueError>;
