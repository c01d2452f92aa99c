//! Credential File Storage
//!
//! Persists one OAuth credential record per profile as a flat JSON file in
//! the backend's storage directory, and restores it on the next start.
//!
//! ## On-disk layout
//!
//! `tidal-oauth-<profile>.json` for a named profile, `tidal-oauth.json` for
//! the unnamed default. The file contains exactly the four credential fields
//! as flat string values:
//!
//! ```json
//! {"session_id":"...","token_type":"Bearer","access_token":"...","refresh_token":"..."}
//! ```
//!
//! An earlier serialization scheme wrapped every value in an object with a
//! nested `data` field. [`TokenStore::read`] detects that layout
//! structurally (any composite top-level value) and reports
//! [`StoreError::LegacyFormat`] so the caller can run a one-time in-place
//! [`TokenStore::migrate`] and retry.
//!
//! Files are single-writer: one backend process owns a profile's file, so
//! writes are plain overwrites with no locking.

use crate::error::StoreError;
use crate::profiles::Profile;
use bridge_traits::SessionCredentials;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File name used for the unnamed default profile.
const DEFAULT_FILE_NAME: &str = "tidal-oauth.json";

/// On-disk shape of a credential record.
#[derive(Serialize, Deserialize)]
struct StoredRecord {
    session_id: String,
    token_type: String,
    access_token: String,
    refresh_token: String,
}

impl From<&SessionCredentials> for StoredRecord {
    fn from(creds: &SessionCredentials) -> Self {
        Self {
            session_id: creds.session_id.clone(),
            token_type: creds.token_type.clone(),
            access_token: creds.access_token.clone(),
            refresh_token: creds.refresh_token.clone(),
        }
    }
}

impl From<StoredRecord> for SessionCredentials {
    fn from(record: StoredRecord) -> Self {
        Self {
            session_id: record.session_id,
            token_type: record.token_type,
            access_token: record.access_token,
            refresh_token: record.refresh_token,
        }
    }
}

/// Reads and writes per-profile credential files.
#[derive(Debug, Clone)]
pub struct TokenStore {
    storage_dir: PathBuf,
}

impl TokenStore {
    pub fn new(storage_dir: impl Into<PathBuf>) -> Self {
        Self {
            storage_dir: storage_dir.into(),
        }
    }

    /// Deterministic path of a profile's credential file.
    pub fn path_for(&self, profile: &Profile) -> PathBuf {
        let file_name = match profile.name() {
            Some(name) => format!("tidal-oauth-{name}.json"),
            None => DEFAULT_FILE_NAME.to_string(),
        };
        self.storage_dir.join(file_name)
    }

    /// Load the credential record stored at `path`.
    ///
    /// # Errors
    ///
    /// - [`StoreError::NotFound`] when the file is absent or unreadable
    /// - [`StoreError::Malformed`] when the content is not valid JSON or is
    ///   missing one of the four required string fields
    /// - [`StoreError::LegacyFormat`] when any top-level value is a
    ///   composite; the caller migrates and retries
    pub async fn read(&self, path: &Path) -> Result<SessionCredentials, StoreError> {
        debug!(path = %path.display(), "loading OAuth session data");
        let raw = tokio::fs::read(path).await.map_err(StoreError::NotFound)?;
        let data: Value =
            serde_json::from_slice(&raw).map_err(|e| StoreError::Malformed(e.to_string()))?;

        let map = data
            .as_object()
            .ok_or_else(|| StoreError::Malformed("expected a JSON object".to_string()))?;

        // Composite top-level values mean the obsolete wrapped layout.
        if map.values().any(|v| v.is_object() || v.is_array()) {
            return Err(StoreError::LegacyFormat);
        }

        let record: StoredRecord =
            serde_json::from_value(data).map_err(|e| StoreError::Malformed(e.to_string()))?;
        Ok(record.into())
    }

    /// Rewrite a legacy-layout file in place, unwrapping each value's nested
    /// `data` scalar while preserving every key.
    ///
    /// Only valid on a file that [`read`](Self::read) reported as
    /// [`StoreError::LegacyFormat`]; calling it on a flat file is out of
    /// contract.
    pub async fn migrate(&self, path: &Path) -> Result<(), StoreError> {
        let raw = tokio::fs::read(path).await.map_err(StoreError::NotFound)?;
        let data: Value =
            serde_json::from_slice(&raw).map_err(|e| StoreError::Malformed(e.to_string()))?;
        let map = data
            .as_object()
            .ok_or_else(|| StoreError::Malformed("expected a JSON object".to_string()))?;

        let mut flat = serde_json::Map::with_capacity(map.len());
        for (key, value) in map {
            let inner = value.get("data").cloned().ok_or_else(|| {
                StoreError::Malformed(format!("wrapped value for '{key}' has no data field"))
            })?;
            flat.insert(key.clone(), inner);
        }

        let body = serde_json::to_vec(&Value::Object(flat))
            .map_err(|e| StoreError::Malformed(e.to_string()))?;
        tokio::fs::write(path, body)
            .await
            .map_err(StoreError::Write)?;

        info!(path = %path.display(), "rewrote legacy credential file in place");
        Ok(())
    }

    /// Serialize `record` as flat JSON at `path`, overwriting any previous
    /// content.
    pub async fn write(
        &self,
        path: &Path,
        record: &SessionCredentials,
    ) -> Result<(), StoreError> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(StoreError::Write)?;
        }

        let body = serde_json::to_vec(&StoredRecord::from(record))
            .map_err(|e| StoreError::Malformed(e.to_string()))?;
        tokio::fs::write(path, body)
            .await
            .map_err(StoreError::Write)?;

        info!(path = %path.display(), "OAuth session data stored");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, TokenStore) {
        let dir = TempDir::new().expect("temp dir");
        let store = TokenStore::new(dir.path());
        (dir, store)
    }

    fn sample_credentials() -> SessionCredentials {
        SessionCredentials {
            session_id: "s1".to_string(),
            token_type: "Bearer".to_string(),
            access_token: "a1".to_string(),
            refresh_token: "r1".to_string(),
        }
    }

    #[test]
    fn path_for_appends_profile_name() {
        let store = TokenStore::new("/data");
        assert_eq!(
            store.path_for(&Profile::named("alice")),
            PathBuf::from("/data/tidal-oauth-alice.json")
        );
        assert_eq!(
            store.path_for(&Profile::Default),
            PathBuf::from("/data/tidal-oauth.json")
        );
        // Naming is stable across calls.
        assert_eq!(
            store.path_for(&Profile::named("alice")),
            store.path_for(&Profile::named("alice"))
        );
    }

    #[tokio::test]
    async fn write_then_read_round_trips() {
        let (_dir, store) = store();
        let path = store.path_for(&Profile::named("alice"));
        let creds = sample_credentials();

        store.write(&path, &creds).await.unwrap();
        let loaded = store.read(&path).await.unwrap();

        assert_eq!(loaded, creds);
    }

    #[tokio::test]
    async fn read_missing_file_is_not_found() {
        let (_dir, store) = store();
        let path = store.path_for(&Profile::named("nobody"));
        assert!(matches!(
            store.read(&path).await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn read_invalid_json_is_malformed_and_untouched() {
        let (_dir, store) = store();
        let path = store.path_for(&Profile::Default);
        std::fs::write(&path, b"not json {").unwrap();

        assert!(matches!(
            store.read(&path).await,
            Err(StoreError::Malformed(_))
        ));
        // The broken file is left as it was, never auto-repaired.
        assert_eq!(std::fs::read(&path).unwrap(), b"not json {");
    }

    #[tokio::test]
    async fn read_missing_field_is_malformed() {
        let (_dir, store) = store();
        let path = store.path_for(&Profile::Default);
        std::fs::write(&path, br#"{"session_id":"s1","token_type":"Bearer"}"#).unwrap();

        assert!(matches!(
            store.read(&path).await,
            Err(StoreError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn read_non_object_is_malformed() {
        let (_dir, store) = store();
        let path = store.path_for(&Profile::Default);
        std::fs::write(&path, b"[1,2,3]").unwrap();

        assert!(matches!(
            store.read(&path).await,
            Err(StoreError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn legacy_layout_is_detected_and_migrated() {
        let (_dir, store) = store();
        let path = store.path_for(&Profile::named("alice"));
        std::fs::write(
            &path,
            br#"{"session_id":{"data":"s1"},"token_type":{"data":"Bearer"},"access_token":{"data":"a1"},"refresh_token":{"data":"r1"}}"#,
        )
        .unwrap();

        assert!(matches!(
            store.read(&path).await,
            Err(StoreError::LegacyFormat)
        ));

        store.migrate(&path).await.unwrap();

        let loaded = store.read(&path).await.unwrap();
        assert_eq!(loaded, sample_credentials());

        // The rewritten file is flat JSON with plain string values.
        let on_disk: Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        for key in ["session_id", "token_type", "access_token", "refresh_token"] {
            assert!(on_disk[key].is_string(), "{key} should be a flat string");
        }
    }

    #[tokio::test]
    async fn single_legacy_value_triggers_detection() {
        let (_dir, store) = store();
        let path = store.path_for(&Profile::Default);
        std::fs::write(
            &path,
            br#"{"session_id":"s1","token_type":"Bearer","access_token":{"data":"a1"},"refresh_token":"r1"}"#,
        )
        .unwrap();

        assert!(matches!(
            store.read(&path).await,
            Err(StoreError::LegacyFormat)
        ));
    }

    #[tokio::test]
    async fn migrate_wrapper_without_data_is_malformed() {
        let (_dir, store) = store();
        let path = store.path_for(&Profile::Default);
        std::fs::write(
            &path,
            br#"{"session_id":{"value":"s1"},"token_type":{"data":"Bearer"},"access_token":{"data":"a1"},"refresh_token":{"data":"r1"}}"#,
        )
        .unwrap();

        assert!(matches!(
            store.migrate(&path).await,
            Err(StoreError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn write_overwrites_previous_record() {
        let (_dir, store) = store();
        let path = store.path_for(&Profile::named("alice"));

        store.write(&path, &sample_credentials()).await.unwrap();
        let newer = SessionCredentials {
            session_id: "s2".to_string(),
            token_type: "Bearer".to_string(),
            access_token: "a2".to_string(),
            refresh_token: "r2".to_string(),
        };
        store.write(&path, &newer).await.unwrap();

        assert_eq!(store.read(&path).await.unwrap(), newer);
    }

    #[tokio::test]
    async fn write_creates_missing_storage_dir() {
        let dir = TempDir::new().unwrap();
        let store = TokenStore::new(dir.path().join("nested"));
        let path = store.path_for(&Profile::Default);

        store.write(&path, &sample_credentials()).await.unwrap();
        assert!(path.exists());
    }
}
