pub mod engine;
pub mod loader;
pub mod model;

pub use self::engine::{score, score_str, PENALTY};
pub use self::loader::QuadgramCounts;
pub use self::model::FrequencyModel;
