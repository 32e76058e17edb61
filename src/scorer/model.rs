use crate::error::{CrackError, CrackResult};
use crate::scorer::loader::{load_quadgram_counts, parse_quadgram_counts, QuadgramCounts};
use std::io::BufRead;
use std::path::Path;
use tracing::info;

/// Number of distinct quadgrams over a 26-letter alphabet.
pub const QUAD_SPACE: usize = 26 * 26 * 26 * 26;

const ABSENT: f64 = f64::NEG_INFINITY;

/// Base-26 index of an uppercase quadgram, or `None` if any byte is not `A..=Z`.
#[inline(always)]
pub fn quad_index(quad: &[u8]) -> Option<usize> {
    if quad.len() != 4 {
        return None;
    }
    let mut idx = 0usize;
    for &b in quad {
        if !b.is_ascii_uppercase() {
            return None;
        }
        idx = idx * 26 + (b - b'A') as usize;
    }
    Some(idx)
}

fn quad_from_index(mut idx: usize) -> String {
    let mut bytes = [b'A'; 4];
    for slot in bytes.iter_mut().rev() {
        *slot = b'A' + (idx % 26) as u8;
        idx /= 26;
    }
    bytes.iter().map(|&b| b as char).collect()
}

/// Immutable log10 probability table over all 4-letter sequences.
#[derive(Clone)]
pub struct FrequencyModel {
    log_probs: Vec<f64>,
    entries: usize,
    total: u64,
}

impl std::fmt::Debug for FrequencyModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrequencyModel")
            .field("entries", &self.entries)
            .field("total", &self.total)
            .finish()
    }
}

impl FrequencyModel {
    /// Normalizes raw counts by their sum and stores `log10(count / total)`.
    ///
    /// Entries that are not four uppercase letters are ignored and do not contribute
    /// to the total. A total that overflows `u64` is a parse error.
    pub fn build(counts: &QuadgramCounts) -> CrackResult<Self> {
        let overflow = || {
            CrackError::Parse(format!(
                "frequency table counts overflow a 64-bit total ({} lines read)",
                counts.lines_read
            ))
        };

        let mut raw = vec![0u64; QUAD_SPACE];
        let mut total = 0u64;
        for &(ref quad, count) in &counts.entries {
            if let Some(idx) = quad_index(quad) {
                raw[idx] = raw[idx].checked_add(count).ok_or_else(overflow)?;
                total = total.checked_add(count).ok_or_else(overflow)?;
            }
        }

        if total == 0 {
            return Err(CrackError::Parse(format!(
                "frequency table has no usable entries ({} lines read, {} skipped)",
                counts.lines_read, counts.skipped
            )));
        }

        let total_f = total as f64;
        let mut log_probs = vec![ABSENT; QUAD_SPACE];
        let mut entries = 0;
        for (slot, &count) in log_probs.iter_mut().zip(&raw) {
            if count > 0 {
                *slot = (count as f64 / total_f).log10();
                entries += 1;
            }
        }

        info!("✅ Quadgram model built: {} entries, total count {}", entries, total);

        Ok(Self {
            log_probs,
            entries,
            total,
        })
    }

    pub fn from_reader<R: BufRead>(reader: R) -> CrackResult<Self> {
        Self::build(&parse_quadgram_counts(reader)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> CrackResult<Self> {
        Self::build(&load_quadgram_counts(path)?)
    }

    pub fn lookup(&self, quad: &str) -> Option<f64> {
        quad_index(quad.as_bytes()).and_then(|idx| self.lookup_index(idx))
    }

    #[inline(always)]
    pub fn lookup_index(&self, idx: usize) -> Option<f64> {
        let v = self.log_probs[idx];
        if v == ABSENT {
            None
        } else {
            Some(v)
        }
    }

    pub fn len(&self) -> usize {
        self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }

    /// Sum of the raw counts the model was normalized by.
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn iter(&self) -> impl Iterator<Item = (String, f64)> + '_ {
        self.log_probs
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v != ABSENT)
            .map(|(idx, &v)| (quad_from_index(idx), v))
    }
}
