//! Function-pointer finite state machine engine.
//!
//! Classic embedded FSM pattern, driven by discrete events instead of a
//! polling tick:
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────────┐
//! │  StateTable                                                        │
//! │  ┌─────────────────┬──────────┬─────────┬──────────────┬─────────┐ │
//! │  │ StateId         │ on_enter │ on_exit │ on_event     │ falls   │ │
//! │  ├─────────────────┼──────────┼─────────┼──────────────┼─────────┤ │
//! │  │ Idle            │ -        │ -       │ fn(ctx, ev)  │ -       │ │
//! │  │ Running         │ fn(ctx)  │ -       │ fn(ctx, ev)  │ -       │ │
//! │  │ Celebrating     │ fn(ctx)  │ -       │ fn(ctx, ev)  │ OnBreak │ │
//! │  │ OnBreak         │ fn(ctx)  │ fn(ctx) │ fn(ctx, ev)  │ -       │ │
//! │  │ WaitingForShake │ fn(ctx)  │ -       │ fn(ctx, ev)  │ -       │ │
//! │  └─────────────────┴──────────┴─────────┴──────────────┴─────────┘ │
//! └────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each event goes to `on_event` of the **current** state.  If it returns
//! `Some(next_id)`, the engine runs `on_exit` for the current state, then
//! `on_enter` for the next, and updates the current pointer.  A state with
//! a `fall_through` target is left again immediately after its `on_enter`,
//! inside the same dispatch, so it is never observable between events.
//! All functions receive `&mut SessionContext`, which holds both
//! countdowns, the config, and the actuator outbox.

pub mod context;
pub mod states;

use context::SessionContext;
use log::info;

use crate::control::countdown::CountdownState;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Enumeration of all possible session states.
/// Must stay in sync with the state table built in [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StateId {
    Idle = 0,
    Running = 1,
    Celebrating = 2,
    OnBreak = 3,
    WaitingForShake = 4,
}

impl StateId {
    /// Total number of states, used to size the table array.
    pub const COUNT: usize = 5;

    /// Convert a table index back to `StateId`.  Panics on out-of-range in
    /// debug builds; returns `Idle` in release.
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::Idle,
            1 => Self::Running,
            2 => Self::Celebrating,
            3 => Self::OnBreak,
            4 => Self::WaitingForShake,
            _ => {
                debug_assert!(false, "invalid state index: {idx}");
                Self::Idle
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Discrete inputs to the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    ShakeDetected,
    OrientationPortrait,
    OrientationLandscape,
    WorkExpired,
    BreakExpired,
}

// ---------------------------------------------------------------------------
// Observable state
// ---------------------------------------------------------------------------

/// Sub-phase of `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdlePhase {
    /// Nothing to resume; a shake starts a fresh work session.
    Fresh,
    /// Work timer frozen part-way, carrying its snapshot.
    Paused(CountdownState),
}

/// The session state as seen from outside the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle(IdlePhase),
    Running,
    Celebrating,
    OnBreak,
    WaitingForShake,
}

impl SessionState {
    pub fn id(&self) -> StateId {
        match self {
            Self::Idle(_) => StateId::Idle,
            Self::Running => StateId::Running,
            Self::Celebrating => StateId::Celebrating,
            Self::OnBreak => StateId::OnBreak,
            Self::WaitingForShake => StateId::WaitingForShake,
        }
    }
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for `on_enter` and `on_exit` actions.
/// These run exactly once on each state transition.
pub type StateActionFn = fn(&mut SessionContext);

/// Signature for the per-event handler.
/// Returns `Some(next)` to trigger a transition, or `None` to stay.
pub type StateEventFn = fn(&mut SessionContext, SessionEvent) -> Option<StateId>;

// ---------------------------------------------------------------------------
// State descriptor (one row in the table)
// ---------------------------------------------------------------------------

/// Static descriptor for a single FSM state.
/// Stored in a fixed-size array: no heap, no `dyn`.
pub struct StateDescriptor {
    pub id: StateId,
    pub name: &'static str,
    pub on_enter: Option<StateActionFn>,
    pub on_exit: Option<StateActionFn>,
    pub on_event: StateEventFn,
    /// Pseudo-states name the state they hand over to right after `on_enter`.
    pub fall_through: Option<StateId>,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

/// The finite state machine engine.
///
/// Owns the state table (array of [`StateDescriptor`]) and the index of
/// the current state; the [`SessionContext`] is passed in on every call.
pub struct Fsm {
    /// Fixed-size table indexed by `StateId as usize`.
    table: [StateDescriptor; StateId::COUNT],
    /// Index of the currently active state.
    current: usize,
    /// Events dispatched since startup.
    event_count: u64,
    /// Transitions taken since startup, self-transitions included.
    transition_count: u64,
}

impl Fsm {
    /// Construct a new FSM with the given state table, starting in `initial`.
    pub fn new(table: [StateDescriptor; StateId::COUNT], initial: StateId) -> Self {
        Self {
            table,
            current: initial as usize,
            event_count: 0,
            transition_count: 0,
        }
    }

    /// Run the initial `on_enter` for the starting state.
    /// Call once after construction, before the first `dispatch()`.
    pub fn start(&mut self, ctx: &mut SessionContext) {
        info!("FSM starting in state: {}", self.table[self.current].name);
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }

    /// Feed one event to the current state.
    ///
    /// 1. Call `on_event` for the current state.
    /// 2. If it returns `Some(next)`, execute the transition:
    ///    `on_exit(current)` → update pointer → `on_enter(next)`,
    ///    following any fall-through chain.
    pub fn dispatch(&mut self, ctx: &mut SessionContext, event: SessionEvent) {
        self.event_count += 1;

        let next = (self.table[self.current].on_event)(ctx, event);

        if let Some(next_id) = next {
            self.transition(next_id, ctx);
        }
    }

    /// Force an immediate transition (used by the session reset command).
    pub fn force_transition(&mut self, next: StateId, ctx: &mut SessionContext) {
        if next as usize != self.current {
            self.transition(next, ctx);
        }
    }

    /// The current state's identity.
    pub fn current_state(&self) -> StateId {
        StateId::from_index(self.current)
    }

    /// Current state with the idle sub-phase resolved from the work timer.
    pub fn session_state(&self, ctx: &SessionContext) -> SessionState {
        match self.current_state() {
            StateId::Idle if ctx.work.can_resume() => {
                SessionState::Idle(IdlePhase::Paused(ctx.work.state()))
            }
            StateId::Idle => SessionState::Idle(IdlePhase::Fresh),
            StateId::Running => SessionState::Running,
            StateId::Celebrating => SessionState::Celebrating,
            StateId::OnBreak => SessionState::OnBreak,
            StateId::WaitingForShake => SessionState::WaitingForShake,
        }
    }

    pub fn event_count(&self) -> u64 {
        self.event_count
    }

    pub fn transition_count(&self) -> u64 {
        self.transition_count
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn transition(&mut self, next_id: StateId, ctx: &mut SessionContext) {
        let mut next_idx = next_id as usize;

        loop {
            info!(
                "FSM transition: {} -> {}",
                self.table[self.current].name, self.table[next_idx].name
            );

            // Exit current state
            if let Some(exit) = self.table[self.current].on_exit {
                exit(ctx);
            }

            self.current = next_idx;
            self.transition_count += 1;

            // Enter new state
            if let Some(enter) = self.table[self.current].on_enter {
                enter(ctx);
            }

            match self.table[self.current].fall_through {
                Some(then) => next_idx = then as usize,
                None => break,
            }
        }
    }
}
