use crate::error::CrackResult;
use crate::scorer::loader::{clean_ciphertext, validate_ciphertext};
use crate::ALPHABET_LEN;

/// Cleaned ciphertext plus, for every cipher letter, the positions it occupies.
///
/// The position index lets a key swap patch only the affected bytes of a decryption.
#[derive(Debug, Clone)]
pub struct Ciphertext {
    text: String,
    positions: [Vec<usize>; ALPHABET_LEN],
}

impl Ciphertext {
    /// Strips everything but ASCII letters and uppercases the rest.
    pub fn new(raw: &str) -> Self {
        let text = clean_ciphertext(raw);
        let mut positions: [Vec<usize>; ALPHABET_LEN] = std::array::from_fn(|_| Vec::new());
        for (i, b) in text.bytes().enumerate() {
            positions[(b - b'A') as usize].push(i);
        }
        Self { text, positions }
    }

    pub fn validate(&self, min_length: usize) -> CrackResult<()> {
        validate_ciphertext(&self.text, min_length)
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Offsets at which cipher letter `c` (0..26) occurs.
    #[inline(always)]
    pub fn positions(&self, c: usize) -> &[usize] {
        &self.positions[c]
    }
}
