use clap::Args;

#[derive(Args, Debug, Clone)]
pub struct InputPaths {
    /// Quadgram frequency table (`<QUAD> <COUNT>` per line)
    #[arg(global = true, short, long, default_value = "english_quadgrams.txt")]
    pub quadgrams: String,

    /// Ciphertext file; only letters are kept
    #[arg(global = true, short, long, default_value = "cipher.txt")]
    pub cipher: String,
}

#[derive(Args, Debug, Clone)]
pub struct SearchParams {
    /// Local moves attempted per restart
    #[arg(long, default_value_t = 4000)]
    pub steps: usize,

    /// Independent random restarts
    #[arg(long, default_value_t = 20)]
    pub restarts: usize,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,

    /// Worker threads; 1 runs the restarts sequentially
    #[arg(short = 'j', long, default_value_t = 1)]
    pub threads: usize,

    /// Minimum ciphertext length (letters) required before searching
    #[arg(long, default_value_t = 10)]
    pub min_length: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            steps: 4000,
            restarts: 20,
            seed: None,
            threads: 1,
            min_length: 10,
        }
    }
}
