//! pomoshake: replay a recorded sensor trace through the session timer.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  producer thread                  control loop (main thread) │
//! │                                                              │
//! │  JsonTraceFeed ──▶ Tick × n ──┐                              │
//! │                   Sensors ────┼──▶ SessionInbox ──▶ Session  │
//! │  Start / Shutdown ────────────┘                     Service  │
//! │                                        ConsoleActuator ◀─┤   │
//! │                                        LogEventSink    ◀─┘   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Usage: `pomoshake <trace.jsonl> [config.json]`
//!
//! Ticks are synthesised from trace time: one per whole second elapsed
//! since the first record, delivered before the batch that crosses it.
#![deny(unused_must_use)]

use std::fs::File;
use std::io::BufReader;
use std::thread;

use anyhow::{Context, Result, anyhow};
use futures_lite::future::block_on;
use log::{info, warn};

use pomoshake::adapters::config_file::JsonConfigFile;
use pomoshake::adapters::console::ConsoleActuator;
use pomoshake::adapters::log_sink::LogEventSink;
use pomoshake::adapters::trace::{JsonTraceFeed, batch_end_ms};
use pomoshake::app::ports::{ConfigPort, SensorFeed};
use pomoshake::app::service::SessionService;
use pomoshake::config::SessionConfig;
use pomoshake::events::{INBOX_DEPTH, SessionInbox, SessionInput};

const TICK_MS: u64 = 1_000;

static INBOX: SessionInbox<INBOX_DEPTH> = SessionInbox::new();

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("pomoshake v{}", env!("CARGO_PKG_VERSION"));

    // ── 1. Arguments ──────────────────────────────────────────
    let mut args = std::env::args().skip(1);
    let trace_path = args
        .next()
        .context("usage: pomoshake <trace.jsonl> [config.json]")?;
    let config = match args.next() {
        Some(path) => JsonConfigFile::new(&path)
            .load()
            .with_context(|| format!("loading config from {path}"))?,
        None => SessionConfig::default(),
    };
    info!(
        "Work {}s, break {}s, after break: {:?}",
        config.work_duration_secs, config.break_duration_secs, config.after_break
    );

    // ── 2. Service ────────────────────────────────────────────
    let mut service = SessionService::new(config).context("invalid configuration")?;
    let mut hw = ConsoleActuator::stdout();
    let mut sink = LogEventSink::new();

    // ── 3. Producer ───────────────────────────────────────────
    let file = File::open(&trace_path).with_context(|| format!("opening trace {trace_path}"))?;
    let producer = thread::Builder::new()
        .name("trace-replay".into())
        .spawn(move || replay(JsonTraceFeed::new(BufReader::new(file))))
        .context("spawning trace producer")?;

    // ── 4. Control loop ───────────────────────────────────────
    block_on(async {
        loop {
            let input = INBOX.next().await;
            let last = matches!(input, SessionInput::Shutdown);
            if let Err(e) = service.handle_input(input, &mut hw, &mut sink) {
                warn!("Input rejected: {}", e);
            }
            if last {
                break;
            }
        }
    });

    let skipped = producer
        .join()
        .map_err(|_| anyhow!("trace producer panicked"))?;

    let snap = service.snapshot();
    info!(
        "Replay finished in {:?}: {} session(s) completed, {} tick(s), \
         {} sample(s) rejected, {} trace line(s) skipped",
        snap.state, snap.completed_sessions, snap.tick_count, snap.rejected_samples, skipped
    );
    Ok(())
}

/// Push the whole trace into the inbox.  Returns the number of skipped lines.
fn replay<R: std::io::BufRead>(mut feed: JsonTraceFeed<R>) -> usize {
    block_on(async {
        INBOX.send(SessionInput::Start).await;

        let mut next_tick_ms: Option<u64> = None;
        while let Some(batch) = feed.next_batch() {
            if let Some(end) = batch_end_ms(&batch) {
                let due = next_tick_ms.get_or_insert(end + TICK_MS);
                while end >= *due {
                    INBOX.send(SessionInput::Tick).await;
                    *due += TICK_MS;
                }
            }
            INBOX.send(SessionInput::Sensors(batch)).await;
        }

        INBOX.send(SessionInput::Shutdown).await;
    });
    feed.skipped()
}
