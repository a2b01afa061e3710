use crate::{StoreError, StoredRecord};

pub trait RecordStore {
    /// Inserts `record`, replacing any row with the same file name.
    fn upsert(&self, record: &StoredRecord) -> Result<(), StoreError>;

    fn scan_all(&self) -> Result<Vec<StoredRecord>, StoreError>;
}
