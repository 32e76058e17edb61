use crate::reports;
use clap::Args;
use quadcrack::config::InputPaths;
use quadcrack::error::CrackResult;
use quadcrack::scorer::loader::load_ciphertext;
use quadcrack::scorer::score;
use quadcrack::{Ciphertext, FrequencyModel, Key};

#[derive(Args, Debug, Clone)]
pub struct DecryptArgs {
    /// Plain images of A..Z, e.g. QWERTYUIOPASDFGHJKLZXCVBNM
    #[arg(short, long)]
    pub key: String,
}

pub fn run(args: DecryptArgs, paths: &InputPaths) -> CrackResult<()> {
    let key = Key::from_plain_alphabet(&args.key)?;
    let cipher = Ciphertext::new(&load_ciphertext(&paths.cipher)?);
    let model = FrequencyModel::from_path(&paths.quadgrams)?;

    let plaintext = key.apply(cipher.as_bytes());
    let plain_score = score(&model, plaintext.as_bytes());

    reports::print_decryption(&plaintext, plain_score);
    reports::print_key_table(&key);
    Ok(())
}
