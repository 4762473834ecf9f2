use crate::bmi::{latest_bmi, BmiRecord};
use crate::error::LabtrendError;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Persistence seam for BMI records. Records are append-only.
pub trait BmiStore {
    fn append(&mut self, record: BmiRecord) -> Result<(), LabtrendError>;

    /// All records for a user, in insertion order.
    fn records_for(&self, user_id: &str) -> Result<Vec<BmiRecord>, LabtrendError>;

    /// The user's record with the greatest `created_at`, if any.
    fn latest(&self, user_id: &str) -> Result<Option<BmiRecord>, LabtrendError> {
        let records = self.records_for(user_id)?;
        Ok(latest_bmi(&records, user_id).cloned())
    }
}

#[derive(Debug, Default)]
pub struct MemoryBmiStore {
    records: Vec<BmiRecord>,
}

impl MemoryBmiStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BmiStore for MemoryBmiStore {
    fn append(&mut self, record: BmiRecord) -> Result<(), LabtrendError> {
        self.records.push(record);
        Ok(())
    }

    fn records_for(&self, user_id: &str) -> Result<Vec<BmiRecord>, LabtrendError> {
        Ok(self
            .records
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }
}

/// BMI records kept as a JSON array in a single file.
///
/// A missing file reads as an empty store. Writes go to a temporary file
/// in the same directory which then replaces the original.
#[derive(Debug, Clone)]
pub struct JsonFileBmiStore {
    path: PathBuf,
}

impl JsonFileBmiStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<BmiRecord>, LabtrendError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.store_error(e)),
        };
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&content).map_err(|e| self.store_error(e))
    }

    fn save(&self, records: &[BmiRecord]) -> Result<(), LabtrendError> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| self.store_error(e))?;
        let json = serde_json::to_string_pretty(records)?;
        tmp.write_all(json.as_bytes())
            .map_err(|e| self.store_error(e))?;
        tmp.persist(&self.path)
            .map_err(|e| self.store_error(e.error))?;
        Ok(())
    }

    fn store_error(&self, reason: impl ToString) -> LabtrendError {
        LabtrendError::Store {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }
}

impl BmiStore for JsonFileBmiStore {
    fn append(&mut self, record: BmiRecord) -> Result<(), LabtrendError> {
        let mut records = self.load()?;
        records.push(record);
        self.save(&records)?;
        tracing::info!(
            path = %self.path.display(),
            count = records.len(),
            "saved BMI record"
        );
        Ok(())
    }

    fn records_for(&self, user_id: &str) -> Result<Vec<BmiRecord>, LabtrendError> {
        Ok(self
            .load()?
            .into_iter()
            .filter(|r| r.user_id == user_id)
            .collect())
    }
}
