//! Session bookkeeping: high score persistence and end-of-session summaries

pub mod store;
pub mod tracker;

pub use store::{HighScoreStore, JsonFileStore, MemoryStore, HIGH_SCORE_KEY};
pub use tracker::{Session, SessionSummary};
