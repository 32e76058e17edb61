use serde::Serialize;
use std::time::Duration;

/// 26!, the number of monoalphabetic substitution keys.
pub const KEY_SPACE: f64 = 4.032_914_611_266_056_4e26;

#[derive(Debug, Clone, Serialize)]
pub struct SearchStats {
    /// Keys drawn during the run, `steps * restarts`.
    pub keys_explored: u64,
    pub explored_log2: Option<f64>,
    pub key_space: f64,
    pub key_space_log2: f64,
    /// Score evaluations actually performed (skipped draws excluded).
    pub evaluations: u64,
    pub elapsed_secs: f64,
    pub evaluations_per_sec: f64,
}

impl SearchStats {
    pub fn new(steps: usize, restarts: usize, evaluations: u64, elapsed: Duration) -> Self {
        let keys_explored = (steps as u64).saturating_mul(restarts as u64);
        let elapsed_secs = elapsed.as_secs_f64();
        let evaluations_per_sec = if elapsed_secs > 0.0 {
            evaluations as f64 / elapsed_secs
        } else {
            0.0
        };

        Self {
            keys_explored,
            explored_log2: explored_log2(keys_explored),
            key_space: KEY_SPACE,
            key_space_log2: KEY_SPACE.log2(),
            evaluations,
            elapsed_secs,
            evaluations_per_sec,
        }
    }

    /// Share of the key space covered, as a fraction.
    pub fn coverage(&self) -> f64 {
        self.keys_explored as f64 / self.key_space
    }
}

pub fn explored_log2(keys: u64) -> Option<f64> {
    if keys == 0 {
        None
    } else {
        Some((keys as f64).log2())
    }
}
