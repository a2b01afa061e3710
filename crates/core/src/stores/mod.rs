pub mod sqlite;

pub use sqlite::{ResetPolicy, SqliteRecordStore};
