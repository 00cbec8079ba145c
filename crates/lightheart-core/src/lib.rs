//! Light Heart Tales Core — shared capability abstractions.
//!
//! This crate defines the capabilities the reading session is driven through
//! (key-value storage, location, timers) and the domain error type. It
//! contains no file or runtime infrastructure; the in-memory implementations
//! here are the defaults used when nothing durable is available.

pub mod error;
pub mod navigation;
pub mod storage;
pub mod timer;
