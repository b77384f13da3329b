use crate::foundation::storage::{ArtistRecord, StoreError};
use log::{debug, warn};
use serde_json::{Map, Value};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Where the store lives when no path is configured.
pub const DEFAULT_STORE_PATH: &str = "./data.json";

/// A flat list of artist records persisted as one pretty-printed JSON array.
///
/// Nothing is cached: every operation reads the whole file, and every mutation
/// rewrites it. No lock is taken, so two writers working on the same file can
/// lose each other's updates (add, update and rename all check, then write).
/// Use one store per file at a time.
#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    /// Opens the store at `path`, creating it as an empty array if it does not exist.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use artistore::RecordStore;
    ///
    /// let store = RecordStore::open("library.json")?;
    /// store.add_artist("Massive Attack", ["Massive"])?;
    /// # Ok::<(), artistore::StoreError>(())
    /// ```
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let store = Self { path: path.into() };
        store.initialize()?;
        Ok(store)
    }

    /// Opens the store at [`DEFAULT_STORE_PATH`].
    pub fn open_default() -> Result<Self, StoreError> {
        Self::open(DEFAULT_STORE_PATH)
    }

    /// Location of the JSON file backing this store.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True if the path points at an existing regular file.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn initialize(&self) -> Result<(), StoreError> {
        if !self.exists() {
            debug!("Creating empty store at {}", self.path.display());
            self.write_all(&[])?;
        }
        Ok(())
    }

    /// Reads and parses every record in the file.
    pub fn read_all(&self) -> Result<Vec<ArtistRecord>, StoreError> {
        let content = fs::read_to_string(&self.path).map_err(|source| StoreError::Read {
            path: self.path.clone(),
            source,
        })?;

        let records: Vec<ArtistRecord> =
            serde_json::from_str(&content).map_err(|source| StoreError::Parse {
                path: self.path.clone(),
                source,
            })?;

        debug!("Read {} records from {}", records.len(), self.path.display());
        Ok(records)
    }

    /// Replaces the file content with `records`, indented by two spaces.
    pub fn write_all(&self, records: &[ArtistRecord]) -> Result<(), StoreError> {
        let serialized = serde_json::to_string_pretty(records).map_err(|e| StoreError::Write {
            path: self.path.clone(),
            source: io::Error::new(io::ErrorKind::Other, e),
        })?;

        fs::write(&self.path, serialized).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })?;

        debug!("Wrote {} records to {}", records.len(), self.path.display());
        Ok(())
    }

    /// Returns every record whose name is exactly `name`.
    ///
    /// Names are compared as-is (case-sensitive). The result normally holds zero
    /// or one record, but uniqueness is not checked here.
    pub fn find_by_name(&self, name: &str) -> Result<Vec<ArtistRecord>, StoreError> {
        Ok(self
            .read_all()?
            .into_iter()
            .filter(|record| record.name == name)
            .collect())
    }

    /// Appends a new artist. Returns `Ok(false)` if the name is already taken.
    ///
    /// # Arguments
    ///
    /// * `name` - Name of the artist, used as its key in the store.
    /// * `alternative_names` - Other spellings or aliases, kept in the given order.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use artistore::RecordStore;
    ///
    /// let store = RecordStore::open_default()?;
    /// assert!(store.add_artist("Aphex Twin", ["AFX", "Polygon Window"])?);
    /// assert!(!store.add_artist("Aphex Twin", Vec::<String>::new())?);
    /// # Ok::<(), artistore::StoreError>(())
    /// ```
    pub fn add_artist<I, S>(&self, name: &str, alternative_names: I) -> Result<bool, StoreError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if !self.find_by_name(name)?.is_empty() {
            debug!("Artist '{}' already exists", name);
            return Ok(false);
        }

        let mut records = self.read_all()?;
        records.push(ArtistRecord::new(name, alternative_names));
        self.write_all(&records)?;
        Ok(true)
    }

    /// Merges `updates` into the single record named `name`.
    ///
    /// Keys overwrite existing fields or add new ones. Returns `Ok(false)` when
    /// zero or several records carry the name, or when `updates` tries to set
    /// `name` (use [`RecordStore::rename_artist`] for that). A value of the wrong
    /// shape for `alternative_names` is an [`StoreError::InvalidField`] and
    /// nothing is written.
    ///
    /// The updated record moves to the end of the file, see
    /// [`RecordStore::overwrite_artist`].
    ///
    /// # Arguments
    ///
    /// * `name` - Name of the artist to change.
    /// * `updates` - Field names and the JSON values to store under them.
    pub fn update_artist(
        &self,
        name: &str,
        updates: Map<String, Value>,
    ) -> Result<bool, StoreError> {
        let mut matches = self.find_by_name(name)?;
        if matches.len() != 1 {
            debug!("Expected one artist named '{}', found {}", name, matches.len());
            return Ok(false);
        }
        if updates.contains_key("name") {
            warn!("Refusing to change the name of '{}' through an update", name);
            return Ok(false);
        }

        let mut artist = matches.remove(0);
        for (key, value) in updates {
            apply_field(&mut artist, key, value)?;
        }

        self.overwrite_artist(name, artist)?;
        Ok(true)
    }

    /// Renames the single record named `old_name` to `new_name`, keeping its other fields.
    ///
    /// Returns `Ok(false)` if `new_name` is taken or `old_name` does not match
    /// exactly one record.
    pub fn rename_artist(&self, old_name: &str, new_name: &str) -> Result<bool, StoreError> {
        if !self.find_by_name(new_name)?.is_empty() {
            debug!("Cannot rename '{}': '{}' already exists", old_name, new_name);
            return Ok(false);
        }

        let mut matches = self.find_by_name(old_name)?;
        if matches.len() != 1 {
            debug!(
                "Expected one artist named '{}', found {}",
                old_name,
                matches.len()
            );
            return Ok(false);
        }

        let mut artist = matches.remove(0);
        artist.name = new_name.to_string();
        self.overwrite_artist(old_name, artist)
    }

    /// Replaces the first record named `key_name` with `artist`.
    ///
    /// The old record is removed from its position and `artist` is appended at
    /// the end, so updated records drift to the back of the file. Returns
    /// `Ok(false)` without writing when no record matches.
    pub fn overwrite_artist(
        &self,
        key_name: &str,
        artist: ArtistRecord,
    ) -> Result<bool, StoreError> {
        let mut records = self.read_all()?;

        match records.iter().position(|record| record.name == key_name) {
            Some(index) => {
                records.remove(index);
                records.push(artist);
                self.write_all(&records)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Drops every record. Returns false if the empty array could not be written.
    pub fn truncate(&self) -> bool {
        match self.write_all(&[]) {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to truncate store: {}", e);
                false
            }
        }
    }

    /// Removes the store file. Any failure, a missing file included, gives false.
    pub fn delete_store(&self) -> bool {
        match fs::remove_file(&self.path) {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to delete {}: {}", self.path.display(), e);
                false
            }
        }
    }
}

fn apply_field(artist: &mut ArtistRecord, key: String, value: Value) -> Result<(), StoreError> {
    if key == "alternative_names" {
        artist.alternative_names =
            serde_json::from_value(value).map_err(|source| StoreError::InvalidField {
                field: key,
                source,
            })?;
    } else {
        artist.extra.insert(key, value);
    }
    Ok(())
}
