use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};

/// What the game loop reacts to
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Key(KeyEvent),
    Resize,
    /// Wall time since the previous tick, fed to the round countdown.
    Tick(Duration),
}

/// Source of terminal input
pub trait GameEventSource: Send + 'static {
    /// Wait up to `timeout` for input. Terminal sources never produce `Tick`;
    /// the runner adds its own.
    fn recv_timeout(&self, timeout: Duration) -> Result<GameEvent, RecvTimeoutError>;
}

/// Key presses and resizes read from crossterm on a background thread
pub struct CrosstermEventSource {
    rx: Receiver<GameEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || loop {
            let evt = match event::read() {
                // windows reports releases too; a guess must count once
                Ok(CtEvent::Key(key)) if key.kind != KeyEventKind::Release => GameEvent::Key(key),
                Ok(CtEvent::Resize(_, _)) => GameEvent::Resize,
                Ok(_) => continue,
                Err(err) => {
                    tracing::warn!(%err, "terminal input reader stopped");
                    break;
                }
            };
            if tx.send(evt).is_err() {
                break;
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl GameEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<GameEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// How often the runner reports elapsed time
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Channel-fed input for tests
pub struct TestEventSource {
    rx: Receiver<GameEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<GameEvent>) -> Self {
        Self { rx }
    }
}

impl GameEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<GameEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Interleaves terminal input with `Tick(elapsed)` events.
///
/// A tick is due once per ticker interval even while input keeps arriving,
/// so the countdown cannot be starved by a player mashing keys. Tick
/// durations add up to the wall time since the runner was created.
pub struct Runner<E: GameEventSource, T: Ticker> {
    event_source: E,
    ticker: T,
    last_tick: Instant,
    disconnected: bool,
}

impl<E: GameEventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
            last_tick: Instant::now(),
            disconnected: false,
        }
    }

    /// Block until the next input or the next due tick, whichever comes first.
    pub fn step(&mut self) -> GameEvent {
        let interval = self.ticker.interval();
        let since = self.last_tick.elapsed();
        if since >= interval {
            return self.tick();
        }
        let wait = interval - since;

        if !self.disconnected {
            match self.event_source.recv_timeout(wait) {
                Ok(ev) => return ev,
                Err(RecvTimeoutError::Timeout) => return self.tick(),
                Err(RecvTimeoutError::Disconnected) => {
                    tracing::debug!("input source disconnected, ticking only");
                    self.disconnected = true;
                }
            }
        }
        // without input there is nothing to wait on but the clock
        thread::sleep(interval.saturating_sub(self.last_tick.elapsed()));
        self.tick()
    }

    fn tick(&mut self) -> GameEvent {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_tick);
        self.last_tick = now;
        GameEvent::Tick(elapsed)
    }
}
