pub mod error;
pub mod handle;
pub mod queue;

#[cfg(test)]
mod fail_alloc;

pub use crate::error::{QueueError, Result};
pub use crate::queue::StrQueue;
