mod common;

use quadcrack::error::CrackError;
use quadcrack::optimizer::mutation::{draw_pair, restart_rng};
use quadcrack::optimizer::{
    BestResult, Climber, Optimizer, ProgressCallback, RestartReport, SearchOptions, Silent,
    StepOutcome,
};
use quadcrack::scorer::score;
use quadcrack::{Ciphertext, FrequencyModel, Key};
use std::sync::{Arc, Mutex};

const SECRET: &str = "QWERTYUIOPASDFGHJKLZXCVBNM";

fn english_cipher() -> Ciphertext {
    let key = Key::from_plain_alphabet(SECRET).unwrap();
    let plain = "THE FARMER WATCHES THE CHILDREN PLAY IN THE FIELD NEAR THE RIVER";
    Ciphertext::new(&key.encrypt(plain.replace(' ', "").as_bytes()))
}

fn optimizer(
    model: FrequencyModel,
    cipher: Ciphertext,
    steps: usize,
    restarts: usize,
    seed: Option<u64>,
    threads: usize,
) -> Optimizer {
    Optimizer::new(
        Arc::new(model),
        Arc::new(cipher),
        SearchOptions {
            steps,
            restarts,
            seed,
            threads,
        },
    )
    .expect("valid options")
}

#[derive(Default)]
struct Recorder {
    bests: Mutex<Vec<BestResult>>,
    restarts: Mutex<Vec<usize>>,
}

impl ProgressCallback for Recorder {
    fn on_restart(&self, report: &RestartReport) {
        self.restarts.lock().unwrap().push(report.index);
    }

    fn on_new_best(&self, best: &BestResult) {
        self.bests.lock().unwrap().push(*best);
    }
}

// --- CLIMBER ---

#[test]
fn test_climber_state_stays_consistent() {
    let model = common::corpus_model();
    let cipher = english_cipher();
    let mut rng = fastrand::Rng::with_seed(11);
    let mut climber = Climber::new(&model, &cipher, &mut rng);

    for _ in 0..500 {
        let before_key = climber.key;
        let before_score = climber.score;

        match climber.step(&mut rng) {
            StepOutcome::Accepted(s) => {
                assert!(s > before_score);
                assert_eq!(s, climber.score);
            }
            StepOutcome::Rejected | StepOutcome::Skipped => {
                assert_eq!(climber.key, before_key);
                assert_eq!(climber.score, before_score);
            }
        }

        assert!(climber.key.is_permutation());
        assert_eq!(climber.plaintext_str(), climber.key.apply(cipher.as_bytes()));
        assert_eq!(climber.score, score(&model, &climber.plaintext));
    }
}

#[test]
fn test_try_swap_same_letter_is_skipped() {
    let model = common::corpus_model();
    let cipher = english_cipher();
    let mut climber = Climber::with_key(&model, &cipher, Key::identity());
    let score_before = climber.score;

    assert_eq!(climber.try_swap(4, 4), StepOutcome::Skipped);
    assert_eq!(climber.key, Key::identity());
    assert_eq!(climber.score, score_before);
}

#[test]
fn test_try_swap_rejects_worse_key() {
    let model = common::corpus_model();
    let cipher = english_cipher();
    let secret = Key::from_plain_alphabet(SECRET).unwrap();
    let mut climber = Climber::with_key(&model, &cipher, secret);

    // Plain T comes from cipher E and plain H from cipher P under the secret key.
    let t = (b'E' - b'A') as usize;
    let h = (b'P' - b'A') as usize;
    assert_eq!(secret.plain_of(t), (b'T' - b'A') as usize);
    assert_eq!(secret.plain_of(h), (b'H' - b'A') as usize);
    assert_eq!(climber.try_swap(t, h), StepOutcome::Rejected);
    assert_eq!(climber.key, secret);
}

#[test]
fn test_equal_draws_consume_steps() {
    let mut rng = fastrand::Rng::with_seed(3);
    let draws: Vec<_> = (0..2600).map(|_| draw_pair(&mut rng)).collect();
    let skipped = draws.iter().filter(|d| d.is_none()).count();
    assert!(skipped > 0, "no equal pairs drawn");
    assert!(draws.iter().flatten().all(|(a, b)| a != b && *a < 26 && *b < 26));
}

#[test]
fn test_restart_report_accounts_for_every_step() {
    let opt = optimizer(common::corpus_model(), english_cipher(), 4000, 2, Some(5), 1);
    let outcome = opt.run(&Silent).unwrap();

    for r in &outcome.restarts {
        assert_eq!(r.accepted + r.rejected + r.skipped, 4000);
        assert!(r.skipped > 0);
        assert!(r.final_score >= r.initial_score);
    }
}

// --- OPTIMIZER ---

#[test]
fn test_zero_steps_returns_initial_key() {
    let cipher = english_cipher();
    let model = common::corpus_model();

    let expected_key = Key::random(&mut restart_rng(Some(99), 0));
    let expected_score = score(&model, expected_key.apply(cipher.as_bytes()).as_bytes());

    let opt = optimizer(model, cipher, 0, 1, Some(99), 1);
    let outcome = opt.run(&Silent).unwrap();

    assert_eq!(outcome.best.key, expected_key);
    assert_eq!(outcome.best.score, expected_score);
    assert_eq!(outcome.best.restart, 0);
    assert_eq!(outcome.best.step, None);
    assert_eq!(outcome.stats.keys_explored, 0);
    assert_eq!(outcome.stats.explored_log2, None);
}

#[test]
fn test_global_best_is_monotonic() {
    let opt = optimizer(common::corpus_model(), english_cipher(), 1500, 6, Some(21), 1);
    let recorder = Recorder::default();
    let outcome = opt.run(&recorder).unwrap();

    let bests = recorder.bests.lock().unwrap();
    assert!(!bests.is_empty());
    assert_eq!(bests[0].restart, 0);
    assert_eq!(bests[0].step, None);
    for pair in bests.windows(2) {
        assert!(pair[1].score > pair[0].score);
    }
    assert_eq!(bests.last().unwrap().score, outcome.best.score);

    let best_report_score = outcome
        .restarts
        .iter()
        .map(|r| r.final_score)
        .fold(f64::NEG_INFINITY, f64::max);
    assert_eq!(outcome.best.score, best_report_score);
    assert_eq!(*recorder.restarts.lock().unwrap(), (0..6).collect::<Vec<_>>());
}

#[test]
fn test_parallel_matches_sequential() {
    let seq = optimizer(common::corpus_model(), english_cipher(), 1000, 8, Some(7), 1)
        .run(&Silent)
        .unwrap();

    let recorder = Recorder::default();
    let par = optimizer(common::corpus_model(), english_cipher(), 1000, 8, Some(7), 4)
        .run(&recorder)
        .unwrap();

    assert_eq!(seq.best, par.best);
    let seq_finals: Vec<f64> = seq.restarts.iter().map(|r| r.final_score).collect();
    let par_finals: Vec<f64> = par.restarts.iter().map(|r| r.final_score).collect();
    assert_eq!(seq_finals, par_finals);
    assert_eq!(*recorder.restarts.lock().unwrap(), (0..8).collect::<Vec<_>>());
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let a = optimizer(common::corpus_model(), english_cipher(), 800, 3, Some(1234), 1)
        .run(&Silent)
        .unwrap();
    let b = optimizer(common::corpus_model(), english_cipher(), 800, 3, Some(1234), 1)
        .run(&Silent)
        .unwrap();
    assert_eq!(a.best, b.best);
}

#[test]
fn test_search_improves_on_random_start() {
    let opt = optimizer(common::corpus_model(), english_cipher(), 3000, 5, Some(8), 1);
    let outcome = opt.run(&Silent).unwrap();
    let worst_start = outcome
        .restarts
        .iter()
        .map(|r| r.initial_score)
        .fold(f64::INFINITY, f64::min);
    assert!(outcome.best.score > worst_start);
    assert_eq!(outcome.stats.keys_explored, 15_000);
    assert_eq!(outcome.elapsed.as_secs_f64(), outcome.stats.elapsed_secs);
}

#[test]
fn test_invalid_options_are_rejected() {
    let make = |restarts, threads| {
        Optimizer::new(
            Arc::new(common::corpus_model()),
            Arc::new(english_cipher()),
            SearchOptions {
                steps: 10,
                restarts,
                seed: None,
                threads,
            },
        )
    };
    assert!(matches!(make(0, 1), Err(CrackError::Validation(_))));
    assert!(matches!(make(1, 0), Err(CrackError::Validation(_))));
    assert!(make(1, 1).is_ok());
}
