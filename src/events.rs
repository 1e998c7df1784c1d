//! Single-consumer input queue.
//!
//! Everything that can change the session funnels through one bounded
//! `embassy-sync` channel and is processed one input at a time by the
//! control loop.
//!
//! ```text
//! ┌──────────────┐
//! │ Sensor feed  │──▶┌──────────────┐     ┌──────────────┐
//! │ Tick source  │──▶│ SessionInbox │────▶│ Control loop │
//! │ Host / UI    │──▶│  (bounded)   │     │  (consumer)  │
//! └──────────────┘   └──────────────┘     └──────────────┘
//! ```
//!
//! Producers never block: a full inbox rejects the input and hands it back.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Sender, TrySendError};

use crate::app::commands::AppCommand;
use crate::sensors::SensorBatch;

/// Default inbox depth for the host binary.
pub const INBOX_DEPTH: usize = 16;

/// One unit of work for the control loop.
#[derive(Debug, Clone)]
pub enum SessionInput {
    /// A batch of raw sensor records.
    Sensors(SensorBatch),
    /// One second elapsed.
    Tick,
    /// Host command.
    Command(AppCommand),
    /// Begin (or resume) accepting sensor input.
    Start,
    /// Stop accepting sensor input.  Running timers keep counting.
    Stop,
    /// Producers are done; the consumer should exit after this.
    Shutdown,
}

/// Bounded multi-producer, single-consumer queue of [`SessionInput`]s.
///
/// `const`-constructible so it can live in a `static` shared by producer
/// threads and the control loop.
pub struct SessionInbox<const N: usize> {
    channel: Channel<CriticalSectionRawMutex, SessionInput, N>,
}

impl<const N: usize> SessionInbox<N> {
    pub const fn new() -> Self {
        Self {
            channel: Channel::new(),
        }
    }

    /// Producer handle for async senders.
    pub fn sender(&self) -> Sender<'_, CriticalSectionRawMutex, SessionInput, N> {
        self.channel.sender()
    }

    /// Enqueue without blocking.  Returns the input if the inbox is full.
    pub fn try_send(&self, input: SessionInput) -> Result<(), SessionInput> {
        self.channel.try_send(input).map_err(|e| match e {
            TrySendError::Full(input) => input,
        })
    }

    /// Enqueue, waiting for room if the inbox is full.
    pub async fn send(&self, input: SessionInput) {
        self.channel.send(input).await
    }

    /// Wait for the next input.
    pub async fn next(&self) -> SessionInput {
        self.channel.receive().await
    }

    /// Feed every pending input to `handler` in FIFO order.  Returns how
    /// many were processed.
    pub fn drain(&self, mut handler: impl FnMut(SessionInput)) -> usize {
        let mut n = 0;
        while let Ok(input) = self.channel.try_receive() {
            handler(input);
            n += 1;
        }
        n
    }

    pub fn len(&self) -> usize {
        self.channel.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channel.is_empty()
    }
}

impl<const N: usize> Default for SessionInbox<N> {
    fn default() -> Self {
        Self::new()
    }
}
