//! Structured events emitted by state transitions.

pub mod event;

pub use event::GameEvent;
