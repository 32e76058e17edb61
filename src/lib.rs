pub mod ciphertext;
pub mod config;
pub mod error;
pub mod key;
pub mod optimizer;
pub mod scorer;
pub mod stats;

pub use ciphertext::Ciphertext;
pub use error::{CrackError, CrackResult};
pub use key::Key;
pub use scorer::model::FrequencyModel;

/// Size of the substitution alphabet (uppercase Latin letters).
pub const ALPHABET_LEN: usize = 26;
