//! The quickshare vault: local persistence for contact info, settings, and
//! the passcode.
//!
//! The vault is a `SQLite`-backed key-value store standing in for the mobile
//! platform's encrypted secure store. It holds exactly three logical records,
//! each serialized to a single string under a fixed key:
//!
//! - `professional_info`: the JSON-serialized contact record
//! - `app_settings`: the JSON-serialized settings record
//! - `passcode`: the raw 4-digit passcode string
//!
//! Loads treat malformed data the same as absent data: a record that fails
//! to deserialize is reported as "no data" rather than an error, and the
//! caller falls back to its default flow.

pub mod migrations;
pub mod schema;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info, warn};

use crate::contact::ContactRecord;
use crate::error::{Error, Result};
use crate::passcode;
use crate::settings::AppSettings;

/// Logical key for the contact record.
pub const KEY_CONTACT: &str = "professional_info";

/// Logical key for the settings record.
pub const KEY_SETTINGS: &str = "app_settings";

/// Logical key for the passcode string.
pub const KEY_PASSCODE: &str = "passcode";

/// Local persistent store for the three quickshare records.
#[derive(Debug)]
pub struct Vault {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

impl Vault {
    /// Open or create a vault database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist.
    /// Initializes the schema if this is a new database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema
    /// initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening vault at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        // Enable WAL mode for better concurrent read performance
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

        migrations::initialize_schema(&conn)?;

        info!("Vault opened at {}", path.display());
        Ok(Self { path, conn })
    }

    /// Create an in-memory vault for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        migrations::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn,
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write a string value under a logical key, overwriting any previous
    /// value.
    fn put(&self, key: &str, value: &str) -> Result<()> {
        let updated_at = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT OR REPLACE INTO records (key, value, updated_at) VALUES (?1, ?2, ?3)",
            params![key, value, updated_at],
        )?;
        debug!("Wrote record '{}'", key);
        Ok(())
    }

    /// Read the string value for a logical key, if present.
    fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM records WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    /// Delete the value for a logical key.
    ///
    /// Returns `true` if a record was deleted, `false` if not found.
    fn delete(&self, key: &str) -> Result<bool> {
        let affected = self
            .conn
            .execute("DELETE FROM records WHERE key = ?1", [key])?;
        Ok(affected > 0)
    }

    /// When a logical key was last written, if present.
    fn updated_at(&self, key: &str) -> Result<Option<DateTime<Utc>>> {
        let value: Option<String> = self
            .conn
            .query_row(
                "SELECT updated_at FROM records WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()?;

        Ok(value
            .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
            .map(|dt| dt.with_timezone(&Utc)))
    }

    // === Contact record ===

    /// Save the contact record, overwriting the whole record.
    ///
    /// The record is normalized and validated before it is written; records
    /// are never partially updated.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the record is incomplete, or a database
    /// error if the write fails.
    pub fn save_contact(&self, record: &ContactRecord) -> Result<()> {
        let normalized = record.normalized();
        normalized.validate()?;
        let json = serde_json::to_string(&normalized)?;
        self.put(KEY_CONTACT, &json)
    }

    /// Load the contact record.
    ///
    /// Returns `Ok(None)` if no record was ever written or if the stored
    /// data fails to deserialize.
    ///
    /// # Errors
    ///
    /// Returns an error only if the database read itself fails.
    pub fn load_contact(&self) -> Result<Option<ContactRecord>> {
        let Some(json) = self.get(KEY_CONTACT)? else {
            return Ok(None);
        };
        match serde_json::from_str(&json) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                warn!("Stored contact record is malformed, treating as absent: {e}");
                Ok(None)
            }
        }
    }

    // === App settings ===

    /// Save the app settings, overwriting both flags together.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the database write fails.
    pub fn save_settings(&self, settings: &AppSettings) -> Result<()> {
        let json = serde_json::to_string(settings)?;
        self.put(KEY_SETTINGS, &json)
    }

    /// Load the app settings.
    ///
    /// Returns `Ok(None)` if no settings were ever written or if the stored
    /// data fails to deserialize.
    ///
    /// # Errors
    ///
    /// Returns an error only if the database read itself fails.
    pub fn load_settings(&self) -> Result<Option<AppSettings>> {
        let Some(json) = self.get(KEY_SETTINGS)? else {
            return Ok(None);
        };
        match serde_json::from_str(&json) {
            Ok(settings) => Ok(Some(settings)),
            Err(e) => {
                warn!("Stored settings record is malformed, treating as absent: {e}");
                Ok(None)
            }
        }
    }

    // === Passcode ===

    /// Save the passcode.
    ///
    /// The passcode is stored as a plaintext string and compared by exact
    /// equality, matching the companion mobile app's persisted layout. This
    /// is a known weakness accepted for compatibility, not a recommended
    /// control.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PasscodeInvalid`] if the string is not exactly four
    /// digits, or a database error if the write fails.
    pub fn save_passcode(&self, code: &str) -> Result<()> {
        passcode::check_well_formed(code)?;
        self.put(KEY_PASSCODE, code)
    }

    /// Load the stored passcode, if one was set.
    ///
    /// # Errors
    ///
    /// Returns an error if the database read fails.
    pub fn load_passcode(&self) -> Result<Option<String>> {
        self.get(KEY_PASSCODE)
    }

    /// Compare an input against the stored passcode.
    ///
    /// An absent stored passcode never matches.
    ///
    /// # Errors
    ///
    /// Returns an error if the database read fails.
    pub fn verify_passcode(&self, input: &str) -> Result<bool> {
        Ok(self.load_passcode()?.as_deref() == Some(input))
    }

    // === Maintenance ===

    /// Delete all three records.
    ///
    /// Deletion is non-atomic: each key is deleted independently and a
    /// partial clear is possible. Any failure is reported as a single
    /// detail-free [`Error::VaultClear`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::VaultClear`] if any deletion fails.
    pub fn clear_all(&self) -> Result<()> {
        let mut failed = false;
        for key in [KEY_CONTACT, KEY_SETTINGS, KEY_PASSCODE] {
            if let Err(e) = self.delete(key) {
                warn!("Failed to delete record '{}': {e}", key);
                failed = true;
            }
        }
        if failed {
            return Err(Error::VaultClear);
        }
        info!("Vault cleared");
        Ok(())
    }

    /// Get a summary of what the vault holds.
    ///
    /// # Errors
    ///
    /// Returns an error if a database read fails.
    pub fn status(&self) -> Result<VaultStatus> {
        let has_contact = self.load_contact()?.is_some();
        let has_settings = self.load_settings()?.is_some();
        let has_passcode = self.load_passcode()?.is_some();
        let contact_updated_at = self.updated_at(KEY_CONTACT)?;

        // Get database file size
        let db_size_bytes = if self.path.to_string_lossy() == ":memory:" {
            0
        } else {
            std::fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
        };

        Ok(VaultStatus {
            has_contact,
            has_settings,
            has_passcode,
            contact_updated_at,
            db_size_bytes,
        })
    }
}

/// A summary of the vault's contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultStatus {
    /// Whether a loadable contact record is stored.
    pub has_contact: bool,
    /// Whether a loadable settings record is stored.
    pub has_settings: bool,
    /// Whether a passcode is stored.
    pub has_passcode: bool,
    /// When the contact record was last written.
    pub contact_updated_at: Option<DateTime<Utc>>,
    /// Size of the database file in bytes.
    pub db_size_bytes: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_vault() -> Vault {
        Vault::open_in_memory().expect("failed to create test vault")
    }

    fn sample_contact() -> ContactRecord {
        ContactRecord::new("Ada Lovelace", "Engineer", "Analytical Engines", "ada@ae.co")
    }

    #[test]
    fn test_open_in_memory() {
        let vault = Vault::open_in_memory();
        assert!(vault.is_ok());
    }

    #[test]
    fn test_save_and_load_contact() {
        let vault = create_test_vault();
        let record = sample_contact();

        vault.save_contact(&record).unwrap();
        let loaded = vault.load_contact().unwrap();
        assert_eq!(loaded, Some(record));
    }

    #[test]
    fn test_load_contact_absent() {
        let vault = create_test_vault();
        assert_eq!(vault.load_contact().unwrap(), None);
    }

    #[test]
    fn test_save_contact_overwrites_whole_record() {
        let vault = create_test_vault();

        let mut record = sample_contact();
        record.work_phone = Some("+1 555 0100".to_string());
        vault.save_contact(&record).unwrap();

        // A save without the phone removes it entirely
        vault.save_contact(&sample_contact()).unwrap();
        let loaded = vault.load_contact().unwrap().unwrap();
        assert!(loaded.work_phone.is_none());
    }

    #[test]
    fn test_save_contact_rejects_invalid() {
        let vault = create_test_vault();
        let mut record = sample_contact();
        record.work_email = "nope".to_string();

        assert!(vault.save_contact(&record).is_err());
        assert_eq!(vault.load_contact().unwrap(), None);
    }

    #[test]
    fn test_malformed_contact_treated_as_absent() {
        let vault = create_test_vault();
        vault.put(KEY_CONTACT, "{not json").unwrap();

        assert_eq!(vault.load_contact().unwrap(), None);
    }

    #[test]
    fn test_save_and_load_settings() {
        let vault = create_test_vault();
        let settings = AppSettings::completed_setup(true);

        vault.save_settings(&settings).unwrap();
        assert_eq!(vault.load_settings().unwrap(), Some(settings));
    }

    #[test]
    fn test_load_settings_absent() {
        let vault = create_test_vault();
        assert_eq!(vault.load_settings().unwrap(), None);
    }

    #[test]
    fn test_malformed_settings_treated_as_absent() {
        let vault = create_test_vault();
        vault.put(KEY_SETTINGS, "42").unwrap();

        assert_eq!(vault.load_settings().unwrap(), None);
    }

    #[test]
    fn test_save_and_verify_passcode() {
        let vault = create_test_vault();
        vault.save_passcode("1234").unwrap();

        assert_eq!(vault.load_passcode().unwrap(), Some("1234".to_string()));
        assert!(vault.verify_passcode("1234").unwrap());
        assert!(!vault.verify_passcode("1235").unwrap());
        assert!(!vault.verify_passcode("").unwrap());
    }

    #[test]
    fn test_verify_passcode_absent_never_matches() {
        let vault = create_test_vault();
        assert!(!vault.verify_passcode("1234").unwrap());
        assert!(!vault.verify_passcode("").unwrap());
    }

    #[test]
    fn test_save_passcode_rejects_malformed() {
        let vault = create_test_vault();
        assert!(vault.save_passcode("123").is_err());
        assert!(vault.save_passcode("12345").is_err());
        assert!(vault.save_passcode("12a4").is_err());
        assert_eq!(vault.load_passcode().unwrap(), None);
    }

    #[test]
    fn test_clear_all() {
        let vault = create_test_vault();
        vault.save_contact(&sample_contact()).unwrap();
        vault
            .save_settings(&AppSettings::completed_setup(true))
            .unwrap();
        vault.save_passcode("1234").unwrap();

        vault.clear_all().unwrap();

        assert_eq!(vault.load_contact().unwrap(), None);
        assert_eq!(vault.load_settings().unwrap(), None);
        assert_eq!(vault.load_passcode().unwrap(), None);
    }

    #[test]
    fn test_clear_all_empty_vault() {
        let vault = create_test_vault();
        // Clearing an empty vault is not an error
        assert!(vault.clear_all().is_ok());
    }

    #[test]
    fn test_status_empty() {
        let vault = create_test_vault();
        let status = vault.status().unwrap();

        assert!(!status.has_contact);
        assert!(!status.has_settings);
        assert!(!status.has_passcode);
        assert!(status.contact_updated_at.is_none());
    }

    #[test]
    fn test_status_with_data() {
        let vault = create_test_vault();
        vault.save_contact(&sample_contact()).unwrap();
        vault.save_passcode("1234").unwrap();

        let status = vault.status().unwrap();
        assert!(status.has_contact);
        assert!(!status.has_settings);
        assert!(status.has_passcode);
        assert!(status.contact_updated_at.is_some());
    }

    #[test]
    fn test_path() {
        let vault = create_test_vault();
        assert_eq!(vault.path().to_string_lossy(), ":memory:");
    }

    #[test]
    fn test_open_file_based() {
        let temp_dir = std::env::temp_dir();
        let db_path = temp_dir.join(format!("quickshare_test_{}.db", std::process::id()));

        let vault = Vault::open(&db_path).unwrap();
        vault.save_contact(&sample_contact()).unwrap();
        assert!(vault.load_contact().unwrap().is_some());
        assert_eq!(vault.path(), db_path);

        // Clean up
        drop(vault);
        let _ = std::fs::remove_file(&db_path);
        let _ = std::fs::remove_file(db_path.with_extension("db-wal"));
        let _ = std::fs::remove_file(db_path.with_extension("db-shm"));
    }

    #[test]
    fn test_open_creates_parent_dirs() {
        let temp_dir = std::env::temp_dir();
        let nested_path = temp_dir.join(format!(
            "quickshare_test_{}/nested/vault.db",
            std::process::id()
        ));

        if let Some(parent) = nested_path.parent() {
            let _ = std::fs::remove_dir_all(parent);
        }

        let vault = Vault::open(&nested_path).unwrap();
        assert!(nested_path.exists());

        drop(vault);
        if let Some(parent) = nested_path.parent() {
            let _ = std::fs::remove_dir_all(parent.parent().unwrap());
        }
    }

    #[test]
    fn test_persisted_layout_matches_mobile_app() {
        let vault = create_test_vault();
        vault
            .save_settings(&AppSettings::completed_setup(true))
            .unwrap();

        // The stored string must be readable by the mobile app's decoder
        let raw = vault.get(KEY_SETTINGS).unwrap().unwrap();
        assert!(raw.contains("\"hasPasscode\":true"));
        assert!(raw.contains("\"isFirstLaunch\":false"));
    }

    #[test]
    fn test_unicode_contact_roundtrip() {
        let vault = create_test_vault();
        let mut record = sample_contact();
        record.full_name = "Ана Каренина".to_string();

        vault.save_contact(&record).unwrap();
        let loaded = vault.load_contact().unwrap().unwrap();
        assert_eq!(loaded.full_name, "Ана Каренина");
    }
}
