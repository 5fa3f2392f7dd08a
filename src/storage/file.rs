use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::warn;

use super::KeyValueStore;
use crate::error::{ClientError, ClientResult};

/// Key-value store persisted as one JSON object on disk.
///
/// The whole document is rewritten on every mutation (temp file + rename), which is
/// fine for the handful of keys a session holds. A missing file starts empty; an
/// unreadable or malformed file is logged and treated as empty so a corrupt session
/// never blocks startup.
#[derive(Clone)]
pub struct FileStore {
    path: PathBuf,
    map: Arc<RwLock<BTreeMap<String, String>>>,
}

impl FileStore {
    pub fn open<P: AsRef<Path>>(path: P) -> ClientResult<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let map = match fs::read(&path) {
            Ok(bytes) => match serde_json::from_slice::<BTreeMap<String, String>>(&bytes) {
                Ok(m) => m,
                Err(e) => {
                    warn!(target: "salon::session", path = %path.display(), "discarding malformed session file: {}", e);
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                warn!(target: "salon::session", path = %path.display(), "session file unreadable: {}", e);
                BTreeMap::new()
            }
        };
        Ok(Self { path, map: Arc::new(RwLock::new(map)) })
    }

    pub fn path(&self) -> &Path { &self.path }

    fn flush(&self, map: &BTreeMap<String, String>) -> ClientResult<()> {
        let tmp = self.path.with_extension("tmp");
        let bytes = serde_json::to_vec_pretty(map).map_err(|e| ClientError::storage(e.to_string()))?;
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.map.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        let mut map = self.map.write();
        let previous = map.insert(key.to_string(), value.to_string());
        if let Err(e) = self.flush(&map) {
            match previous {
                Some(v) => map.insert(key.to_string(), v),
                None => map.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> ClientResult<()> {
        let mut map = self.map.write();
        if let Some(previous) = map.remove(key) {
            if let Err(e) = self.flush(&map) {
                map.insert(key.to_string(), previous);
                return Err(e);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn values_survive_reopen() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("session.json");
        {
            let s = FileStore::open(&path).unwrap();
            s.set("token", "tok-1").unwrap();
            s.set("userInfo", r#"{"id":7}"#).unwrap();
        }
        let s = FileStore::open(&path).unwrap();
        assert_eq!(s.get("token").as_deref(), Some("tok-1"));
        assert_eq!(s.get("userInfo").as_deref(), Some(r#"{"id":7}"#));
        s.remove("token").unwrap();
        let again = FileStore::open(&path).unwrap();
        assert!(again.get("token").is_none());
    }

    #[test]
    fn malformed_file_opens_empty() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("nested").join("session.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, b"{not json").unwrap();
        let s = FileStore::open(&path).unwrap();
        assert!(s.get("token").is_none());
        s.set("token", "fresh").unwrap();
        assert_eq!(FileStore::open(&path).unwrap().get("token").as_deref(), Some("fresh"));
    }

    #[test]
    fn failed_write_leaves_memory_unchanged() {
        let tmp = tempdir().unwrap();
        let dir = tmp.path().join("gone");
        let s = FileStore::open(dir.join("session.json")).unwrap();
        s.set("token", "kept").unwrap();
        fs::remove_dir_all(&dir).unwrap();

        assert!(s.set("token", "lost").is_err());
        assert!(s.set("userInfo", "{}").is_err());
        assert!(s.remove("token").is_err());
        assert_eq!(s.get("token").as_deref(), Some("kept"));
        assert!(s.get("userInfo").is_none());
    }
}
