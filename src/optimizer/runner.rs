use crate::ciphertext::Ciphertext;
use crate::config::SearchParams;
use crate::error::{CrackError, CrackResult};
use crate::key::Key;
use crate::optimizer::mutation::restart_rng;
use crate::optimizer::{Climber, StepOutcome};
use crate::scorer::FrequencyModel;
use crate::stats::SearchStats;
use rayon::prelude::*;
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub steps: usize,
    pub restarts: usize,
    pub seed: Option<u64>,
    pub threads: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self::from(&SearchParams::default())
    }
}

impl From<&SearchParams> for SearchOptions {
    fn from(params: &SearchParams) -> Self {
        Self {
            steps: params.steps,
            restarts: params.restarts,
            seed: params.seed,
            threads: params.threads,
        }
    }
}

impl SearchOptions {
    pub fn validate(&self) -> CrackResult<()> {
        if self.restarts == 0 {
            return Err(CrackError::Validation(
                "restarts must be at least 1".to_string(),
            ));
        }
        if self.threads == 0 {
            return Err(CrackError::Validation(
                "threads must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Best key seen so far and where it was found.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestResult {
    pub key: Key,
    pub score: f64,
    pub restart: usize,
    /// `None` for the initial evaluation of a restart.
    pub step: Option<usize>,
}

impl Default for BestResult {
    fn default() -> Self {
        Self {
            key: Key::identity(),
            score: f64::NEG_INFINITY,
            restart: 0,
            step: None,
        }
    }
}

impl BestResult {
    /// Replaces the record only on a strictly higher score; ties keep the first writer.
    pub fn offer(&mut self, candidate: &BestResult) -> bool {
        if candidate.score > self.score {
            *self = *candidate;
            true
        } else {
            false
        }
    }

    pub fn is_set(&self) -> bool {
        self.score.is_finite()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RestartReport {
    pub index: usize,
    pub initial_score: f64,
    pub final_score: f64,
    pub accepted: usize,
    pub rejected: usize,
    pub skipped: usize,
}

/// Receives search progress. Hooks fire in restart order on the calling thread, so the
/// scores passed to `on_new_best` never decrease.
pub trait ProgressCallback: Send + Sync {
    fn on_restart(&self, _report: &RestartReport) {}
    fn on_new_best(&self, _best: &BestResult) {}
}

pub struct Silent;

impl ProgressCallback for Silent {}

#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub best: BestResult,
    pub restarts: Vec<RestartReport>,
    pub stats: SearchStats,
    /// Wall-clock time of the whole search.
    pub elapsed: Duration,
}

struct RestartRun {
    report: RestartReport,
    best: BestResult,
}

pub struct Optimizer {
    model: Arc<FrequencyModel>,
    cipher: Arc<Ciphertext>,
    options: SearchOptions,
}

impl Optimizer {
    pub fn new(
        model: Arc<FrequencyModel>,
        cipher: Arc<Ciphertext>,
        options: SearchOptions,
    ) -> CrackResult<Self> {
        options.validate()?;
        Ok(Self {
            model,
            cipher,
            options,
        })
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Runs one restart from a fresh random key. `on_accept` sees the initial evaluation
    /// and every accepted step.
    fn run_restart<F>(&self, index: usize, mut on_accept: F) -> RestartReport
    where
        F: FnMut(&BestResult),
    {
        // 1. Fresh random key, evaluated once
        let mut rng = restart_rng(self.options.seed, index);
        let mut climber = Climber::new(&self.model, &self.cipher, &mut rng);

        let initial_score = climber.score;
        on_accept(&BestResult {
            key: climber.key,
            score: climber.score,
            restart: index,
            step: None,
        });

        // 2. Climb: keep strict improvements, undo everything else
        let mut accepted = 0;
        let mut rejected = 0;
        let mut skipped = 0;

        for step in 0..self.options.steps {
            match climber.step(&mut rng) {
                StepOutcome::Accepted(score) => {
                    accepted += 1;
                    on_accept(&BestResult {
                        key: climber.key,
                        score,
                        restart: index,
                        step: Some(step),
                    });
                }
                StepOutcome::Rejected => rejected += 1,
                StepOutcome::Skipped => skipped += 1,
            }
        }

        debug!(
            "Restart {:3} | start {:.2} -> end {:.2} | accepted {} | skipped {}",
            index, initial_score, climber.score, accepted, skipped
        );

        RestartReport {
            index,
            initial_score,
            final_score: climber.score,
            accepted,
            rejected,
            skipped,
        }
    }

    fn run_isolated(&self, index: usize) -> RestartRun {
        let mut best = BestResult::default();
        let report = self.run_restart(index, |candidate| {
            best.offer(candidate);
        });
        RestartRun { report, best }
    }

    pub fn run<CB: ProgressCallback>(&self, callback: &CB) -> CrackResult<SearchOutcome> {
        let opts = &self.options;
        info!(
            "🔥 Starting decryption on {} characters ({} restarts x {} steps, {} thread(s))",
            self.cipher.len(),
            opts.restarts,
            opts.steps,
            opts.threads
        );

        // 1. Global State
        let start_time = Instant::now();
        let mut best = BestResult::default();
        let mut reports = Vec::with_capacity(opts.restarts);

        // 2. Restarts (sequential, or one per task on a dedicated pool)
        if opts.threads == 1 {
            for index in 0..opts.restarts {
                let report = self.run_restart(index, |candidate| {
                    if best.offer(candidate) {
                        callback.on_new_best(&best);
                    }
                });
                callback.on_restart(&report);
                reports.push(report);
            }
        } else {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(opts.threads)
                .build()
                .map_err(|e| {
                    CrackError::Validation(format!(
                        "cannot start {} worker threads: {}",
                        opts.threads, e
                    ))
                })?;

            let runs: Vec<RestartRun> = pool.install(|| {
                (0..opts.restarts)
                    .into_par_iter()
                    .map(|index| self.run_isolated(index))
                    .collect()
            });

            // Ordered reduction: the lowest restart index wins ties.
            for run in runs {
                if best.offer(&run.best) {
                    callback.on_new_best(&best);
                }
                callback.on_restart(&run.report);
                reports.push(run.report);
            }
        }

        // 3. Statistics
        let elapsed = start_time.elapsed();
        let evaluations = reports
            .iter()
            .map(|r| 1 + r.accepted + r.rejected)
            .sum::<usize>() as u64;
        let stats = SearchStats::new(opts.steps, opts.restarts, evaluations, elapsed);

        info!("🏆 Best score {:.2} (restart {})", best.score, best.restart);

        Ok(SearchOutcome {
            best,
            restarts: reports,
            stats,
            elapsed,
        })
    }
}
