pub mod leaderboard_store;
pub mod markup;
pub mod sheet_store;

pub use leaderboard_store::{load_entries, read_standings, save_entries};
pub use markup::TitleExtractor;
pub use sheet_store::{seed_headers, MemoryGrid, SheetGrid, XlsxWorkbook};
