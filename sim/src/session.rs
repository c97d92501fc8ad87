/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OverReason {
    Crashed { planet: usize },
    /// All rings collected; `elapsed` is the race time in seconds.
    Won { elapsed: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SessionPhase {
    #[default]
    NotStarted,
    Running,
    Over(OverReason),
}

/// Outcome of recording a ring pickup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RingTally {
    Remaining(usize),
    Won { elapsed: f64 },
}

/// One playthrough: NotStarted -> Running -> Over. Over is terminal.
#[derive(Debug, Clone, Default)]
pub struct Session {
    phase: SessionPhase,
    rings_collected: usize,
    start_time: Option<f64>,
    end_time: Option<f64>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, SessionPhase::Over(_))
    }

    pub fn rings_collected(&self) -> usize {
        self.rings_collected
    }

    pub fn start_time(&self) -> Option<f64> {
        self.start_time
    }

    /// Returns false unless the session was waiting to start.
    pub fn start(&mut self, now: f64) -> bool {
        if self.phase != SessionPhase::NotStarted {
            return false;
        }
        self.phase = SessionPhase::Running;
        self.start_time = Some(now);
        true
    }

    pub fn crash(&mut self, planet: usize, now: f64) -> bool {
        if !self.is_running() {
            return false;
        }
        self.phase = SessionPhase::Over(OverReason::Crashed { planet });
        self.end_time = Some(now);
        true
    }

    /// Count one ring. Reaching `total` ends the session as won.
    /// Returns `None` when the session is not running.
    pub fn record_ring(&mut self, total: usize, now: f64) -> Option<RingTally> {
        if !self.is_running() {
            return None;
        }
        self.rings_collected += 1;
        if self.rings_collected >= total {
            let elapsed = self.elapsed(now);
            self.phase = SessionPhase::Over(OverReason::Won { elapsed });
            self.end_time = Some(now);
            return Some(RingTally::Won { elapsed });
        }
        Some(RingTally::Remaining(total - self.rings_collected))
    }

    /// Seconds since start, frozen once the session is over.
    pub fn elapsed(&self, now: f64) -> f64 {
        match self.start_time {
            Some(start) => (self.end_time.unwrap_or(now) - start).max(0.0),
            None => 0.0,
        }
    }
}
