//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements   | Connects to                      |
//! |----------------|--------------|----------------------------------|
//! | `config_file`  | ConfigPort   | JSON file on disk                |
//! | `console`      | ActuatorPort | stdout (host binary)             |
//! | `hardware`     | ActuatorPort | vibration motor GPIO, buzzer PWM |
//! | `log_sink`     | EventSink    | `log` facade                     |
//! | `trace`        | SensorFeed   | JSON-lines sensor recording      |

pub mod config_file;
pub mod console;
pub mod hardware;
pub mod log_sink;
pub mod trace;
