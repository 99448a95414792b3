//! Per-widget UI state and the trigger cycle that drives it.
//!
//! A trigger enters `Loading` synchronously and gets a [`Ticket`]. Only the
//! newest ticket may settle the state; an older ticket still in flight is
//! counted as superseded and its response is dropped.

#[derive(Debug, Clone, PartialEq)]
pub enum UiState<R> {
    Idle,
    Loading,
    Displaying(R),
    Error(String),
}

impl<R> Default for UiState<R> {
    fn default() -> Self {
        UiState::Idle
    }
}

impl<R> UiState<R> {
    pub fn is_loading(&self) -> bool {
        matches!(self, UiState::Loading)
    }

    pub fn record(&self) -> Option<&R> {
        match self {
            UiState::Displaying(record) => Some(record),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            UiState::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Handle for one in-flight trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// How many cycles entered `Loading` and how each one left it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleStats {
    pub started: u64,
    pub settled: u64,
    pub superseded: u64,
}

impl CycleStats {
    /// True when every started cycle has left `Loading` exactly once.
    pub fn balanced(&self) -> bool {
        self.started == self.settled + self.superseded
    }
}

#[derive(Debug)]
pub struct Cycle<R> {
    state: UiState<R>,
    latest: u64,
    in_flight: bool,
    stats: CycleStats,
}

impl<R: Clone> Cycle<R> {
    pub fn new() -> Self {
        Self {
            state: UiState::Idle,
            latest: 0,
            in_flight: false,
            stats: CycleStats::default(),
        }
    }

    pub fn state(&self) -> &UiState<R> {
        &self.state
    }

    pub fn stats(&self) -> CycleStats {
        self.stats
    }

    /// Enter `Loading` for a new trigger. A cycle still in flight is superseded.
    pub fn begin(&mut self) -> Ticket {
        if self.in_flight {
            self.stats.superseded += 1;
        }
        self.latest += 1;
        self.in_flight = true;
        self.stats.started += 1;
        self.state = UiState::Loading;
        Ticket(self.latest)
    }

    /// Settle the cycle owning `ticket`. Returns `false` and leaves the state
    /// untouched when a newer trigger has taken over.
    pub fn settle<E: ToString>(&mut self, ticket: Ticket, outcome: Result<R, E>) -> bool {
        if ticket.0 != self.latest || !self.in_flight {
            return false;
        }
        self.in_flight = false;
        self.stats.settled += 1;
        self.state = match outcome {
            Ok(record) => UiState::Displaying(record),
            Err(err) => UiState::Error(err.to_string()),
        };
        true
    }

    /// Fail without a fetch (validation, unsupported capability). Never enters
    /// `Loading`, and supersedes whatever was in flight.
    pub fn reject<E: ToString>(&mut self, err: E) {
        if self.in_flight {
            self.in_flight = false;
            self.stats.superseded += 1;
        }
        self.latest += 1;
        self.state = UiState::Error(err.to_string());
    }
}

impl<R: Clone> Default for Cycle<R> {
    fn default() -> Self {
        Self::new()
    }
}
