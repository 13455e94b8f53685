use std::fmt;

use rand::{rngs::ThreadRng, Rng};
use thiserror::Error;
use tracing::{debug, info};

use crate::words::{parse_words, WordPool, DEFAULT_WORDS};

pub const DEFAULT_ROUND_SECONDS: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Phase {
    Setup,
    Playing,
    Finished,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Enter at least one word!")]
    EmptyWordList,
    #[error("a game can only be started from setup (currently {0})")]
    NotInSetup(Phase),
}

/// What the player typed on the setup screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub raw_words_text: String,
    pub round_seconds: u32,
}

impl Configuration {
    /// Round length is clamped to at least one second.
    pub fn new(raw_words_text: impl Into<String>, round_seconds: u32) -> Self {
        Self {
            raw_words_text: raw_words_text.into(),
            round_seconds: round_seconds.max(1),
        }
    }

    pub fn words(&self) -> Vec<String> {
        parse_words(&self.raw_words_text)
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new(DEFAULT_WORDS, DEFAULT_ROUND_SECONDS)
    }
}

/// One word's countdown episode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    pub word: String,
    pub seconds_remaining: u32,
    pub is_counting_down: bool,
}

impl Round {
    pub fn has_expired(&self) -> bool {
        self.seconds_remaining == 0
    }
}

/// The game session: phase, score, the pool of remaining words and the active round.
///
/// Every operation checks its own precondition. Calls made in the wrong
/// phase or sub-state leave the session untouched and return `false`.
pub struct Game<R: Rng = ThreadRng> {
    phase: Phase,
    score: u32,
    config: Configuration,
    pool: WordPool,
    total_words: usize,
    round: Option<Round>,
    round_serial: u64,
    rng: R,
}

impl Game<ThreadRng> {
    pub fn new() -> Self {
        Self::with_rng(rand::thread_rng())
    }
}

impl Default for Game<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> fmt::Debug for Game<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("phase", &self.phase)
            .field("score", &self.score)
            .field("config", &self.config)
            .field("pool", &self.pool)
            .field("total_words", &self.total_words)
            .field("round", &self.round)
            .field("round_serial", &self.round_serial)
            .finish_non_exhaustive()
    }
}

impl<R: Rng> Game<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            phase: Phase::Setup,
            score: 0,
            config: Configuration::default(),
            pool: WordPool::default(),
            total_words: 0,
            round: None,
            round_serial: 0,
            rng,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    pub fn pool(&self) -> &WordPool {
        &self.pool
    }

    pub fn words_left(&self) -> usize {
        self.pool.len()
    }

    pub fn total_words(&self) -> usize {
        self.total_words
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    /// Incremented every time a word is drawn
    pub fn round_serial(&self) -> u64 {
        self.round_serial
    }

    pub fn is_counting_down(&self) -> bool {
        self.round.as_ref().is_some_and(|r| r.is_counting_down)
    }

    pub fn seconds_remaining(&self) -> Option<u32> {
        self.round.as_ref().map(|r| r.seconds_remaining)
    }

    pub fn round_has_expired(&self) -> bool {
        self.phase == Phase::Playing && self.round.as_ref().is_some_and(Round::has_expired)
    }

    /// Begin a playthrough from setup. An empty word list, or a call from
    /// any other phase, is rejected and nothing changes.
    pub fn start_game(&mut self, config: Configuration) -> Result<(), GameError> {
        if self.phase != Phase::Setup {
            return Err(GameError::NotInSetup(self.phase));
        }
        let words = config.words();
        if words.is_empty() {
            debug!("rejected start: word list is empty");
            return Err(GameError::EmptyWordList);
        }

        info!(
            phase = %Phase::Playing,
            words = words.len(),
            round_seconds = config.round_seconds,
            "game started"
        );
        self.score = 0;
        self.total_words = words.len();
        self.pool = WordPool::new(words);
        self.config = config;
        self.phase = Phase::Playing;
        self.draw_round();
        Ok(())
    }

    /// Draw the next word, or finish the game when the pool is empty.
    pub fn draw_round(&mut self) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }

        match self.pool.draw(&mut self.rng) {
            Some(word) => {
                self.round_serial += 1;
                debug!(serial = self.round_serial, left = self.pool.len(), "round drawn");
                self.round = Some(Round {
                    word,
                    seconds_remaining: self.config.round_seconds,
                    is_counting_down: true,
                });
            }
            None => {
                info!(phase = %Phase::Finished, score = self.score, "game finished");
                self.round = None;
                self.phase = Phase::Finished;
            }
        }
        true
    }

    pub fn record_correct_guess(&mut self) -> bool {
        if !self.has_live_round() {
            return false;
        }
        self.score += 1;
        debug!(score = self.score, "correct guess");
        self.draw_round()
    }

    /// Pause or resume the running round.
    pub fn toggle_countdown(&mut self) -> bool {
        if !self.has_live_round() {
            return false;
        }
        let Some(round) = self.round.as_mut() else {
            return false;
        };
        round.is_counting_down = !round.is_counting_down;
        debug!(counting = round.is_counting_down, "countdown toggled");
        true
    }

    /// One second elapsed on the countdown.
    pub fn tick(&mut self) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }
        let Some(round) = self.round.as_mut() else {
            return false;
        };
        if !round.is_counting_down || round.seconds_remaining == 0 {
            return false;
        }

        round.seconds_remaining -= 1;
        if round.seconds_remaining == 0 {
            round.is_counting_down = false;
            info!(word = %round.word, "round expired");
        }
        true
    }

    /// Move on after the timer ran out. No points are awarded.
    pub fn advance_after_expiry(&mut self) -> bool {
        if !self.round_has_expired() {
            return false;
        }
        self.draw_round()
    }

    pub fn quit_to_setup(&mut self) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }
        info!(from = %self.phase, score = self.score, "quit to setup");
        self.back_to_setup();
        true
    }

    pub fn reset_from_finished(&mut self) -> bool {
        if self.phase != Phase::Finished {
            return false;
        }
        info!(from = %self.phase, "back to setup");
        self.back_to_setup();
        true
    }

    fn back_to_setup(&mut self) {
        // score stays visible until the next start
        self.round = None;
        self.pool = WordPool::default();
        self.phase = Phase::Setup;
    }

    fn has_live_round(&self) -> bool {
        self.phase == Phase::Playing && self.round.as_ref().is_some_and(|r| !r.has_expired())
    }
}
