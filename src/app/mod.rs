//! Application core: pure domain logic, zero I/O.
//!
//! Business rules for a shake-driven work/break timer: gesture
//! interpretation, session state orchestration and countdown bookkeeping.
//! All interaction with the platform happens through **port traits**
//! defined in [`ports`], keeping this layer fully testable without real
//! sensors or speakers.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
