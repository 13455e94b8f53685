use rand::Rng;

/// Word list the setup form starts with
pub const DEFAULT_WORDS: &str = "Champagne, Fireworks, New Year's Eve, Resolution, Hangover, Confetti, Midnight, Countdown, Potato salad, Home Alone";

/// Split a comma separated list into trimmed, non-empty words, keeping input order.
pub fn parse_words(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

/// Words not yet drawn in the current playthrough.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WordPool {
    words: Vec<String>,
}

impl WordPool {
    pub fn new(words: Vec<String>) -> Self {
        Self { words }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Remove and return a uniformly random word, or None once exhausted.
    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<String> {
        if self.words.is_empty() {
            return None;
        }
        let idx = rng.gen_range(0..self.words.len());
        // order is irrelevant, so the O(1) removal is fine
        Some(self.words.swap_remove(idx))
    }
}
