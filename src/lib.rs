//! pomoshake library.
//!
//! A shake-to-start work/break timer.  Raw accelerometer and orientation
//! samples become discrete gestures, gestures and one-second ticks drive a
//! session state machine, and the machine asks the host for sounds,
//! vibration and text through an actuator port.
//!
//! The core (`sensors`, `control`, `fsm`, `app`) does no I/O; `adapters`
//! and `drivers` connect it to a console, a config file, a recorded sensor
//! trace, or real output pins.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod control;
pub mod drivers;
pub mod error;
pub mod events;
pub mod fsm;
pub mod sensors;
