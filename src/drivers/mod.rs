//! Output drivers, generic over `embedded-hal` pins.

pub mod buzzer;
pub mod vibration;
