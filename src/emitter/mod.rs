//! Generic typed event emitter
//!
//! Single-threaded publish/subscribe with per-listener call quotas, a
//! type-safe catch-all slot, and snapshot-safe synchronous dispatch.

mod emitter;
mod listener;

pub use emitter::{EventEmitter, EventKey};
pub use listener::{AnyFn, EventFn};
