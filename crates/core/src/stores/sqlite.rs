use crate::codec::{decode_embedding, encode_embedding};
use crate::traits::RecordStore;
use crate::{FileType, StoreError, StoredRecord};
use rusqlite::{params, Connection};
use std::path::Path;
use tracing::{debug, info};

pub const DEFAULT_DATABASE_PATH: &str = "file_texts.db";

/// What happens to an existing `texts` table when the store is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResetPolicy {
    /// Drop and recreate the table, so each run starts empty.
    #[default]
    Recreate,
    /// Keep rows from earlier runs.
    Keep,
}

pub struct SqliteRecordStore {
    conn: Connection,
    dimensions: Option<usize>,
}

impl SqliteRecordStore {
    pub fn open(path: impl AsRef<Path>, policy: ResetPolicy) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        info!(path = %path.display(), ?policy, "opening record store");
        Self::init(conn, policy)
    }

    /// Opens `path` to read back what earlier runs stored. The table is never
    /// dropped here, whatever reset policy an ingest run uses.
    pub fn open_for_listing(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::open(path, ResetPolicy::Keep)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?, ResetPolicy::Recreate)
    }

    fn init(conn: Connection, policy: ResetPolicy) -> Result<Self, StoreError> {
        if policy == ResetPolicy::Recreate {
            conn.execute_batch("DROP TABLE IF EXISTS texts;")?;
        }
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS texts (
                file_name TEXT PRIMARY KEY,
                file_type TEXT,
                content TEXT,
                embedding BLOB
            );",
        )?;

        Ok(Self {
            conn,
            dimensions: None,
        })
    }

    /// Rejects embeddings whose length differs from `dimensions` on upsert.
    pub fn with_dimensions(mut self, dimensions: usize) -> Self {
        self.dimensions = Some(dimensions);
        self
    }

    pub fn close(self) -> Result<(), StoreError> {
        self.conn.close().map_err(|(_, error)| StoreError::Sqlite(error))
    }
}

impl RecordStore for SqliteRecordStore {
    fn upsert(&self, record: &StoredRecord) -> Result<(), StoreError> {
        if let Some(expected) = self.dimensions {
            if record.embedding.len() != expected {
                return Err(StoreError::DimensionMismatch {
                    expected,
                    actual: record.embedding.len(),
                });
            }
        }

        self.conn.execute(
            "INSERT OR REPLACE INTO texts (file_name, file_type, content, embedding)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                record.file_name,
                record.file_type.as_str(),
                record.content,
                encode_embedding(&record.embedding),
            ],
        )?;
        debug!(file_name = %record.file_name, "record upserted");
        Ok(())
    }

    fn scan_all(&self) -> Result<Vec<StoredRecord>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT file_name, file_type, content, embedding FROM texts ORDER BY rowid",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, Vec<u8>>(3)?,
            ))
        })?;

        let mut records = Vec::new();
        for row in rows {
            let (file_name, file_type, content, embedding) = row?;
            let file_type = file_type.parse::<FileType>().map_err(|value| {
                StoreError::UnknownFileType {
                    file_name: file_name.clone(),
                    value,
                }
            })?;
            records.push(StoredRecord {
                file_name,
                file_type,
                content,
                embedding: decode_embedding(&embedding)?,
            });
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::{ResetPolicy, SqliteRecordStore};
    use crate::traits::RecordStore;
    use crate::{FileType, StoreError, StoredRecord};
    use tempfile::tempdir;

    fn record(file_name: &str, content: &str, embedding: Vec<f32>) -> StoredRecord {
        StoredRecord {
            file_name: file_name.to_string(),
            file_type: FileType::Pdf,
            content: content.to_string(),
            embedding,
        }
    }

    #[test]
    fn upserted_record_is_scanned_back() -> Result<(), Box<dyn std::error::Error>> {
        let store = SqliteRecordStore::open_in_memory()?;
        let stored = record("report.pdf", "Hello World", vec![0.25, -0.5, 1.0]);
        store.upsert(&stored)?;

        assert_eq!(store.scan_all()?, vec![stored]);
        Ok(())
    }

    #[test]
    fn same_name_overwrites_instead_of_duplicating() -> Result<(), Box<dyn std::error::Error>> {
        let store = SqliteRecordStore::open_in_memory()?;
        store.upsert(&record("a.pdf", "first", vec![1.0]))?;
        store.upsert(&record("b.pdf", "other", vec![2.0]))?;
        store.upsert(&record("a.pdf", "second", vec![3.0]))?;

        let records = store.scan_all()?;
        let matching: Vec<_> = records.iter().filter(|r| r.file_name == "a.pdf").collect();
        assert_eq!(records.len(), 2);
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0].content, "second");
        assert_eq!(matching[0].embedding, vec![3.0]);
        Ok(())
    }

    #[test]
    fn reopening_recreates_the_table() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("texts.db");

        let first_run = SqliteRecordStore::open(&path, ResetPolicy::Recreate)?;
        first_run.upsert(&record("a.pdf", "kept?", vec![1.0]))?;
        first_run.close()?;

        let second_run = SqliteRecordStore::open(&path, ResetPolicy::Recreate)?;
        assert!(second_run.scan_all()?.is_empty());
        Ok(())
    }

    #[test]
    fn keep_policy_preserves_earlier_runs() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("texts.db");

        let first_run = SqliteRecordStore::open(&path, ResetPolicy::Keep)?;
        first_run.upsert(&record("a.pdf", "kept", vec![1.0]))?;
        first_run.close()?;

        let second_run = SqliteRecordStore::open(&path, ResetPolicy::Keep)?;
        let records = second_run.scan_all()?;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].content, "kept");
        Ok(())
    }

    #[test]
    fn listing_does_not_wipe_kept_history() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("texts.db");

        let ingest_run = SqliteRecordStore::open(&path, ResetPolicy::Keep)?;
        ingest_run.upsert(&record("a.pdf", "saved earlier", vec![1.0]))?;
        ingest_run.close()?;

        let listing = SqliteRecordStore::open_for_listing(&path)?;
        let listed = listing.scan_all()?;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].content, "saved earlier");
        listing.close()?;

        let next_run = SqliteRecordStore::open(&path, ResetPolicy::Keep)?;
        assert_eq!(next_run.scan_all()?.len(), 1);
        Ok(())
    }

    #[test]
    fn declared_dimensions_are_enforced() -> Result<(), Box<dyn std::error::Error>> {
        let store = SqliteRecordStore::open_in_memory()?.with_dimensions(3);
        let error = store
            .upsert(&record("a.pdf", "x", vec![1.0, 2.0]))
            .unwrap_err();

        assert!(matches!(
            error,
            StoreError::DimensionMismatch {
                expected: 3,
                actual: 2
            }
        ));
        assert!(store.scan_all()?.is_empty());
        Ok(())
    }

    #[test]
    fn unknown_stored_type_is_reported() -> Result<(), Box<dyn std::error::Error>> {
        let store = SqliteRecordStore::open_in_memory()?;
        store.conn.execute(
            "INSERT INTO texts VALUES ('x.txt', 'TXT', 'text', x'')",
            [],
        )?;

        assert!(matches!(
            store.scan_all(),
            Err(StoreError::UnknownFileType { .. })
        ));
        Ok(())
    }
}
