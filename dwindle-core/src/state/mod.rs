//! State machine for a countdown session
//!
//! The state machine is explicit, finite, and deterministic.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::SessionState;
