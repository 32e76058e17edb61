use crate::error::{CrackError, CrackResult};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info, warn};

/// Raw quadgram counts as read from a frequency table.
#[derive(Debug, Clone, Default)]
pub struct QuadgramCounts {
    pub entries: Vec<([u8; 4], u64)>,
    pub lines_read: usize,
    pub skipped: usize,
}

impl QuadgramCounts {
    /// Sum of all counts, or `None` if it does not fit in a `u64`.
    pub fn total(&self) -> Option<u64> {
        self.entries
            .iter()
            .try_fold(0u64, |acc, (_, c)| acc.checked_add(*c))
    }
}

fn parse_quad(token: &str) -> Option<[u8; 4]> {
    let bytes = token.as_bytes();
    if bytes.len() != 4 || !bytes.iter().all(u8::is_ascii_alphabetic) {
        return None;
    }
    let mut quad = [0u8; 4];
    for (dst, src) in quad.iter_mut().zip(bytes) {
        *dst = src.to_ascii_uppercase();
    }
    Some(quad)
}

/// Parses `<QUAD> <COUNT>` lines. Malformed lines are skipped, duplicates are summed.
pub fn parse_quadgram_counts<R: BufRead>(reader: R) -> CrackResult<QuadgramCounts> {
    let mut merged: HashMap<[u8; 4], u64> = HashMap::new();
    let mut order = Vec::new();
    let mut lines_read = 0;
    let mut skipped = 0;

    for line in reader.lines() {
        let line = line.map_err(|e| CrackError::Parse(format!("unreadable line: {}", e)))?;
        lines_read += 1;

        let mut tokens = line.split_whitespace();
        let (Some(quad_raw), Some(count_raw)) = (tokens.next(), tokens.next()) else {
            skipped += 1;
            continue;
        };

        let Some(quad) = parse_quad(quad_raw) else {
            skipped += 1;
            continue;
        };

        let count: u64 = match count_raw.parse() {
            Ok(c) if c > 0 => c,
            _ => {
                skipped += 1;
                continue;
            }
        };

        let slot = merged.entry(quad).or_insert_with(|| {
            order.push(quad);
            0
        });
        *slot = slot.checked_add(count).ok_or_else(|| {
            CrackError::Parse(format!(
                "count for '{}' overflows at line {}",
                String::from_utf8_lossy(&quad),
                lines_read
            ))
        })?;
    }

    if skipped > 0 {
        warn!("Skipped {} malformed quadgram lines", skipped);
    }

    let entries = order.into_iter().map(|q| (q, merged[&q])).collect();

    Ok(QuadgramCounts {
        entries,
        lines_read,
        skipped,
    })
}

pub fn load_quadgram_counts<P: AsRef<Path>>(path: P) -> CrackResult<QuadgramCounts> {
    let path = path.as_ref();
    info!("📂 Loading quadgrams from: {}", path.display());

    let file = File::open(path).map_err(|e| CrackError::io(path, e))?;
    let counts = parse_quadgram_counts(BufReader::new(file))?;

    debug!(
        "Scanned {} lines, kept {} quadgrams",
        counts.lines_read,
        counts.entries.len()
    );
    Ok(counts)
}

/// Keeps ASCII letters only, uppercased.
pub fn clean_ciphertext(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

pub fn load_ciphertext<P: AsRef<Path>>(path: P) -> CrackResult<String> {
    let path = path.as_ref();
    info!("📂 Loading ciphertext from: {}", path.display());

    let raw = std::fs::read_to_string(path).map_err(|e| CrackError::io(path, e))?;
    Ok(clean_ciphertext(&raw))
}

/// Rejects ciphertexts too short to score meaningfully.
pub fn validate_ciphertext(cipher: &str, min_length: usize) -> CrackResult<()> {
    if cipher.len() < min_length {
        return Err(CrackError::Validation(format!(
            "Ciphertext is too short or empty: {} letters (minimum {})",
            cipher.len(),
            min_length
        )));
    }
    Ok(())
}
