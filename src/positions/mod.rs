//! Position event handling.
//!
//! The thin layer between decoded events and the math core: parses the
//! event's numeric fields, computes the position's token amounts and writes
//! them out. A bad event is logged and skipped so one malformed input never
//! stops the stream.

mod event;
mod handler;

pub use event::{PositionAmounts, PositionEvent};
pub use handler::{PositionError, PositionHandler, RunSummary};
