pub mod mutation;
pub mod runner;

pub use self::runner::{
    BestResult, Optimizer, ProgressCallback, RestartReport, SearchOptions, SearchOutcome, Silent,
};

use crate::ciphertext::Ciphertext;
use crate::key::Key;
use crate::scorer::{score, FrequencyModel};
use fastrand::Rng;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    /// Both letters drawn were the same; nothing was evaluated.
    Skipped,
    Accepted(f64),
    Rejected,
}

/// Search state of a single restart: the current key, its decryption and score.
pub struct Climber<'a> {
    model: &'a FrequencyModel,
    cipher: &'a Ciphertext,
    pub key: Key,
    pub plaintext: Vec<u8>,
    pub score: f64,
}

impl<'a> Climber<'a> {
    pub fn new(model: &'a FrequencyModel, cipher: &'a Ciphertext, rng: &mut Rng) -> Self {
        Self::with_key(model, cipher, Key::random(rng))
    }

    pub fn with_key(model: &'a FrequencyModel, cipher: &'a Ciphertext, key: Key) -> Self {
        let mut plaintext = vec![0u8; cipher.len()];
        key.apply_into(cipher.as_bytes(), &mut plaintext);
        let score = score(model, &plaintext);
        Self {
            model,
            cipher,
            key,
            plaintext,
            score,
        }
    }

    #[inline(always)]
    fn patch(&mut self, c: usize) {
        let p = b'A' + self.key.plain_of(c) as u8;
        for &i in self.cipher.positions(c) {
            self.plaintext[i] = p;
        }
    }

    /// Swaps `a` and `b`, keeping the swap only on a strict score improvement.
    #[inline]
    pub fn try_swap(&mut self, a: usize, b: usize) -> StepOutcome {
        if a == b {
            return StepOutcome::Skipped;
        }

        self.key.swap(a, b);
        self.patch(a);
        self.patch(b);

        let new_score = score(self.model, &self.plaintext);
        if new_score > self.score {
            self.score = new_score;
            StepOutcome::Accepted(new_score)
        } else {
            self.key.swap(a, b);
            self.patch(a);
            self.patch(b);
            StepOutcome::Rejected
        }
    }

    #[inline]
    pub fn step(&mut self, rng: &mut Rng) -> StepOutcome {
        match mutation::draw_pair(rng) {
            Some((a, b)) => self.try_swap(a, b),
            None => StepOutcome::Skipped,
        }
    }

    pub fn plaintext_str(&self) -> String {
        String::from_utf8_lossy(&self.plaintext).into_owned()
    }
}
