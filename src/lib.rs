pub mod config;
pub mod error;
pub mod message;
pub mod replay;
pub mod sync;
pub mod tracker;

pub use crate::error::TrackerError;
pub use crate::message::{MessageRecord, Tracked};
pub use crate::sync::SharedTracker;
pub use crate::tracker::{Admission, MessageTracker};
