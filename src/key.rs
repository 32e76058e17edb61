use crate::error::{CrackError, CrackResult};
use crate::ALPHABET_LEN;
use fastrand::Rng;
use std::fmt;

/// Bijective substitution over `A..=Z`.
///
/// `forward[c]` is the plain letter (0..26) for cipher letter `c`; `inverse` is kept in
/// sync so both directions are O(1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key {
    forward: [u8; ALPHABET_LEN],
    inverse: [u8; ALPHABET_LEN],
}

impl Default for Key {
    fn default() -> Self {
        Self::identity()
    }
}

impl Key {
    pub fn identity() -> Self {
        let mut forward = [0u8; ALPHABET_LEN];
        for (i, slot) in forward.iter_mut().enumerate() {
            *slot = i as u8;
        }
        Self {
            forward,
            inverse: forward,
        }
    }

    fn from_forward(forward: [u8; ALPHABET_LEN]) -> Self {
        let mut inverse = [0u8; ALPHABET_LEN];
        for (c, &p) in forward.iter().enumerate() {
            inverse[p as usize] = c as u8;
        }
        Self { forward, inverse }
    }

    /// Uniformly random permutation, assigned cipher letter by cipher letter.
    pub fn random(rng: &mut Rng) -> Self {
        let mut forward = Self::identity().forward;
        rng.shuffle(&mut forward);
        Self::from_forward(forward)
    }

    /// Parses the plain images of `A..=Z` in order, e.g. `"QWERTYUIOPASDFGHJKLZXCVBNM"`.
    pub fn from_plain_alphabet(alphabet: &str) -> CrackResult<Self> {
        let bytes = alphabet.trim().as_bytes();
        if bytes.len() != ALPHABET_LEN {
            return Err(CrackError::Validation(format!(
                "key must have {} letters, got {}",
                ALPHABET_LEN,
                bytes.len()
            )));
        }

        let mut forward = [0u8; ALPHABET_LEN];
        let mut seen = [false; ALPHABET_LEN];
        for (slot, &b) in forward.iter_mut().zip(bytes) {
            if !b.is_ascii_alphabetic() {
                return Err(CrackError::Validation(format!(
                    "key contains non-letter '{}'",
                    b as char
                )));
            }
            let p = b.to_ascii_uppercase() - b'A';
            if seen[p as usize] {
                return Err(CrackError::Validation(format!(
                    "key maps two letters to '{}'",
                    (b'A' + p) as char
                )));
            }
            seen[p as usize] = true;
            *slot = p;
        }
        Ok(Self::from_forward(forward))
    }

    /// Plain letter index for cipher letter index `c`.
    #[inline(always)]
    pub fn plain_of(&self, c: usize) -> usize {
        self.forward[c] as usize
    }

    #[inline(always)]
    pub fn cipher_of(&self, p: usize) -> usize {
        self.inverse[p] as usize
    }

    /// Exchanges the plain images of cipher letters `a` and `b`. Self-inverse.
    #[inline(always)]
    pub fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.forward.swap(a, b);
        self.inverse[self.forward[a] as usize] = a as u8;
        self.inverse[self.forward[b] as usize] = b as u8;
    }

    #[inline(always)]
    pub fn decrypt_byte(&self, c: u8) -> u8 {
        if c.is_ascii_uppercase() {
            b'A' + self.forward[(c - b'A') as usize]
        } else {
            c
        }
    }

    #[inline(always)]
    pub fn encrypt_byte(&self, p: u8) -> u8 {
        if p.is_ascii_uppercase() {
            b'A' + self.inverse[(p - b'A') as usize]
        } else {
            p
        }
    }

    /// Decrypts into `out`, which must be at least as long as `cipher`.
    #[inline]
    pub fn apply_into(&self, cipher: &[u8], out: &mut [u8]) {
        for (dst, &c) in out.iter_mut().zip(cipher) {
            *dst = self.decrypt_byte(c);
        }
    }

    /// Decrypts `cipher`; bytes outside `A..=Z` pass through unchanged.
    pub fn apply(&self, cipher: &[u8]) -> String {
        cipher.iter().map(|&c| self.decrypt_byte(c) as char).collect()
    }

    pub fn encrypt(&self, plain: &[u8]) -> String {
        plain.iter().map(|&p| self.encrypt_byte(p) as char).collect()
    }

    pub fn is_permutation(&self) -> bool {
        let mut seen = [false; ALPHABET_LEN];
        for (c, &p) in self.forward.iter().enumerate() {
            let p = p as usize;
            if p >= ALPHABET_LEN || seen[p] || self.inverse[p] as usize != c {
                return false;
            }
            seen[p] = true;
        }
        true
    }

    /// Plain images of `A..=Z` as a 26-letter string.
    pub fn plain_alphabet(&self) -> String {
        self.forward.iter().map(|&p| (b'A' + p) as char).collect()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.plain_alphabet())
    }
}
