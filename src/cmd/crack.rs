use crate::reports::{self, CrackReport};
use clap::Args;
use quadcrack::config::{InputPaths, SearchParams};
use quadcrack::error::CrackResult;
use quadcrack::optimizer::{BestResult, Optimizer, ProgressCallback, RestartReport, SearchOptions};
use quadcrack::scorer::loader::load_ciphertext;
use quadcrack::{Ciphertext, FrequencyModel};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Args, Debug, Clone)]
pub struct CrackArgs {
    #[command(flatten)]
    pub search: SearchParams,

    /// Also write the result as JSON
    #[arg(long)]
    pub json: Option<PathBuf>,
}

struct ConsoleProgress;

impl ProgressCallback for ConsoleProgress {
    fn on_restart(&self, r: &RestartReport) {
        println!(
            "Restart {:4} | Start: {:10.2} | Final: {:10.2} | Accepted: {}",
            r.index, r.initial_score, r.final_score, r.accepted
        );
    }

    fn on_new_best(&self, best: &BestResult) {
        debug!(
            "New global best {:.2} (restart {}, step {:?})",
            best.score, best.restart, best.step
        );
    }
}

pub fn run(args: CrackArgs, paths: &InputPaths, debug: bool) -> CrackResult<()> {
    // Length is checked before the model is loaded so short input never triggers a search.
    let cipher = Ciphertext::new(&load_ciphertext(&paths.cipher)?);
    cipher.validate(args.search.min_length)?;

    let model = FrequencyModel::from_path(&paths.quadgrams)?;
    info!("Quadgrams loaded successfully.");

    let cipher = Arc::new(cipher);
    let optimizer = Optimizer::new(
        Arc::new(model),
        cipher.clone(),
        SearchOptions::from(&args.search),
    )?;

    let outcome = optimizer.run(&ConsoleProgress)?;
    let plaintext = outcome.best.key.apply(cipher.as_bytes());

    reports::print_decryption(&plaintext, outcome.best.score);
    reports::print_key_table(&outcome.best.key);
    if debug {
        reports::print_restart_table(&outcome.restarts, &outcome.best);
    }
    reports::print_statistics(&outcome.stats);

    if let Some(path) = &args.json {
        let report = CrackReport::new(cipher.len(), plaintext, &outcome);
        reports::write_json_report(path, &report)?;
        info!("📝 Report written to {}", path.display());
    }

    Ok(())
}
