use crate::scorer::model::FrequencyModel;

/// Score added for a window the model has never seen.
pub const PENALTY: f64 = -20.0;

const WINDOW_MOD: usize = 26 * 26 * 26;

/// Log-likelihood of `text` under the quadgram model.
///
/// Slides a 4-byte window with stride 1 and sums the stored log10 probability of each
/// window, or [`PENALTY`] when absent. Windows touching a non `A..=Z` byte count as
/// absent. Texts shorter than 4 bytes score 0.
///
/// The window index is rolled in base 26, so no per-call allocation takes place.
#[inline]
pub fn score(model: &FrequencyModel, text: &[u8]) -> f64 {
    if text.len() < 4 {
        return 0.0;
    }

    let mut total = 0.0;
    let mut idx = 0usize;
    // Letters since the last non-letter byte; a window is valid once this reaches 4.
    let mut run = 0usize;

    for (i, &b) in text.iter().enumerate() {
        if b.is_ascii_uppercase() {
            idx = (idx % WINDOW_MOD) * 26 + (b - b'A') as usize;
            run += 1;
        } else {
            idx = 0;
            run = 0;
        }

        if i >= 3 {
            total += if run >= 4 {
                model.lookup_index(idx).unwrap_or(PENALTY)
            } else {
                PENALTY
            };
        }
    }
    total
}

pub fn score_str(model: &FrequencyModel, text: &str) -> f64 {
    score(model, text.as_bytes())
}
