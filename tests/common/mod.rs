#![allow(dead_code)]

use quadcrack::FrequencyModel;
use std::collections::HashMap;
use std::fs::File;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

pub const PANGRAM_TEXT: &str = "THE QUICK BROWN FOX JUMPS OVER THE LAZY DOG WHILE THE FARMER \
    WATCHES FROM THE PORCH AND THE CHILDREN PLAY IN THE FIELD NEAR THE RIVER \
    THERE IS NOTHING MORE PLEASANT THAN AN EVENING SPENT WITH FRIENDS AND GOOD \
    CONVERSATION ABOUT THE STATE OF THE NATION AND THE WEATHER OF THE SEASON";

/// Quadgram table in the on-disk `<QUAD> <COUNT>` format, counted from `corpus`.
pub fn quadgram_table(corpus: &str) -> String {
    let letters: Vec<u8> = corpus
        .bytes()
        .filter(u8::is_ascii_alphabetic)
        .map(|b| b.to_ascii_uppercase())
        .collect();

    let mut counts: HashMap<&[u8], u64> = HashMap::new();
    for window in letters.windows(4) {
        *counts.entry(window).or_default() += 1;
    }

    let mut lines: Vec<String> = counts
        .into_iter()
        .map(|(q, c)| format!("{} {}", String::from_utf8_lossy(q), c))
        .collect();
    lines.sort();
    lines.join("\n")
}

pub fn model_from_table(table: &str) -> FrequencyModel {
    FrequencyModel::from_reader(Cursor::new(table)).expect("model should build")
}

pub fn corpus_model() -> FrequencyModel {
    model_from_table(&quadgram_table(PANGRAM_TEXT))
}

pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    let mut file = File::create(&path).expect("Failed to create fixture");
    write!(file, "{}", contents).expect("Failed to write fixture");
    path
}
