pub mod catalog;
pub mod evidence;
pub mod participant;

pub use catalog::{CatalogKind, ARCADE_GAMES, SKILL_BADGES};
pub use evidence::{Eligibility, Extraction};
pub use participant::{columns, CellValue, StoredCount, StoredProgress, Verdict, ERROR_SENTINEL};
