use std::time::Duration;

/// Turns wall-clock time into whole-second countdown ticks.
///
/// The countdown only accumulates time while armed. Disarming it, or
/// switching to a different round, throws away the partial second so a
/// stale interval can never decrement the next round.
#[derive(Debug, Clone)]
pub struct Countdown {
    period: Duration,
    elapsed: Duration,
    armed_for: Option<u64>,
}

impl Countdown {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            elapsed: Duration::ZERO,
            armed_for: None,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed_for.is_some()
    }

    /// Arm for `round` if `active`, cancel otherwise.
    pub fn sync(&mut self, active: bool, round: u64) {
        if !active {
            self.cancel();
            return;
        }
        if self.armed_for != Some(round) {
            self.elapsed = Duration::ZERO;
            self.armed_for = Some(round);
        }
    }

    pub fn cancel(&mut self) {
        self.armed_for = None;
        self.elapsed = Duration::ZERO;
    }

    /// Feed elapsed time and return how many whole periods are due.
    pub fn advance(&mut self, dt: Duration) -> u32 {
        if !self.is_armed() || self.period.is_zero() {
            return 0;
        }
        self.elapsed += dt;

        let mut due = 0;
        while self.elapsed >= self.period {
            self.elapsed -= self.period;
            due += 1;
        }
        due
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}
