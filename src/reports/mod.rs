use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use quadcrack::error::{CrackError, CrackResult};
use quadcrack::optimizer::{BestResult, RestartReport, SearchOutcome};
use quadcrack::stats::SearchStats;
use quadcrack::Key;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Serialized form of a finished crack, written by `crack --json`.
#[derive(Debug, Serialize)]
pub struct CrackReport {
    pub ciphertext_len: usize,
    pub plaintext: String,
    pub key: String,
    pub score: f64,
    pub best_restart: usize,
    pub best_step: Option<usize>,
    pub restarts: Vec<RestartReport>,
    pub stats: SearchStats,
}

impl CrackReport {
    pub fn new(ciphertext_len: usize, plaintext: String, outcome: &SearchOutcome) -> Self {
        Self {
            ciphertext_len,
            plaintext,
            key: outcome.best.key.to_string(),
            score: outcome.best.score,
            best_restart: outcome.best.restart,
            best_step: outcome.best.step,
            restarts: outcome.restarts.clone(),
            stats: outcome.stats.clone(),
        }
    }
}

pub fn write_json_report(path: &Path, report: &CrackReport) -> CrackResult<()> {
    let file = File::create(path).map_err(|e| CrackError::io(path, e))?;
    serde_json::to_writer_pretty(BufWriter::new(file), report)?;
    Ok(())
}

pub fn print_decryption(plaintext: &str, score: f64) {
    println!("\n--- FINAL DECRYPTED TEXT ---\n");
    println!("{}", plaintext);
    println!("\nScore: {:.2}", score);
}

/// Cipher -> plain mapping as two aligned rows.
pub fn print_key_table(key: &Key) {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);

    let cipher_row: Vec<Cell> = std::iter::once(Cell::new("Cipher").add_attribute(Attribute::Bold))
        .chain((0..26u8).map(|c| {
            Cell::new((b'A' + c) as char).set_alignment(CellAlignment::Center)
        }))
        .collect();
    let plain_row: Vec<Cell> = std::iter::once(Cell::new("Plain").add_attribute(Attribute::Bold))
        .chain((0..26usize).map(|c| {
            Cell::new((b'A' + key.plain_of(c) as u8) as char)
                .fg(Color::Cyan)
                .set_alignment(CellAlignment::Center)
        }))
        .collect();

    table.add_row(cipher_row);
    table.add_row(plain_row);
    println!("\nKey: {}", key);
    println!("{}", table);
}

pub fn print_restart_table(reports: &[RestartReport], best: &BestResult) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Restart").add_attribute(Attribute::Bold),
        Cell::new("Start"),
        Cell::new("Final").fg(Color::Cyan),
        Cell::new("Accepted"),
        Cell::new("Rejected"),
        Cell::new("Skipped"),
    ]);

    for i in 1..=5 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for r in reports {
        let name = if r.index == best.restart {
            Cell::new(format!("#{}", r.index))
                .fg(Color::Green)
                .add_attribute(Attribute::Bold)
        } else {
            Cell::new(format!("#{}", r.index))
        };
        table.add_row(vec![
            name,
            Cell::new(format!("{:.2}", r.initial_score)),
            Cell::new(format!("{:.2}", r.final_score)),
            Cell::new(r.accepted),
            Cell::new(r.rejected),
            Cell::new(r.skipped),
        ]);
    }
    println!("\n{}", table);
}

pub fn print_statistics(stats: &SearchStats) {
    let explored_log2 = match stats.explored_log2 {
        Some(v) => format!("2^{:.2}", v),
        None => "-".to_string(),
    };

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("--- STATISTICS ---").add_attribute(Attribute::Bold),
        Cell::new("Scientific"),
        Cell::new("Log2"),
    ]);
    table.add_row(vec![
        Cell::new("Keys Explored"),
        Cell::new(format!("{:.6e}", stats.keys_explored as f64)),
        Cell::new(explored_log2),
    ]);
    table.add_row(vec![
        Cell::new("Total Space (26!)"),
        Cell::new(format!("{:.6e}", stats.key_space)),
        Cell::new(format!("2^{:.2}", stats.key_space_log2)),
    ]);
    table.add_row(vec![
        Cell::new("Evaluations"),
        Cell::new(stats.evaluations),
        Cell::new(format!("{:.2}M/s", stats.evaluations_per_sec / 1_000_000.0)),
    ]);
    table.add_row(vec![
        Cell::new("Elapsed"),
        Cell::new(format!("{:.3}s", stats.elapsed_secs)),
        Cell::new(""),
    ]);

    for i in 1..=2 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
    println!("\n{}", table);
}
