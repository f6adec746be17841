//! Connection lifecycle state machine
//!
//! The state machine is explicit, finite, and deterministic. The remote
//! owns the data attached to each state (peripheral handle, session) and
//! keeps it consistent with the current state.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::ConnectionState;
