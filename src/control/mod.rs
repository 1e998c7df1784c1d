//! Timing primitives driven by the session state machine.

pub mod countdown;
