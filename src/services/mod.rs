pub mod eligibility;
pub mod failed_row_writer;
pub mod leaderboard;
pub mod matching_service;
pub mod normalizer;

pub use eligibility::aggregate;
pub use failed_row_writer::FailedRowWriter;
pub use leaderboard::{rank, LeaderboardEntry, Ranking, Standing};
pub use matching_service::MatchingService;
pub use normalizer::{normalize, Catalog, CatalogIndex};
