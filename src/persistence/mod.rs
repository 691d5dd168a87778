use std::{
    fs,
    path::{
        Path,
        PathBuf,
    },
};

use log::{
    debug,
    warn,
};
use serde::{
    Deserialize,
    Serialize,
};

use crate::core::BunsekiError;

const APP_NAME: &str = "bunseki";

pub fn get_app_data_dir() -> PathBuf {
    if let Some(data_dir) = dirs::data_local_dir() {
        let app_dir = data_dir.join(APP_NAME);
        let _ = fs::create_dir_all(&app_dir);
        app_dir
    } else {
        PathBuf::from(".")
    }
}

pub fn get_data_file_path(filename: &str) -> PathBuf {
    get_app_data_dir().join(filename)
}

/// Sibling file the JSON is staged in before it replaces `path`.
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(format!(".{}.tmp", std::process::id()));
    path.with_file_name(name)
}

/// Pretty JSON, parent directories created on demand. The file is replaced
/// with a rename, so readers see either the old or the new content.
pub fn save_json<T: Serialize>(data: &T, path: &Path) -> Result<(), BunsekiError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(data)?;

    let staging = staging_path(path);
    fs::write(&staging, json)?;
    if let Err(e) = fs::rename(&staging, path) {
        let _ = fs::remove_file(&staging);
        return Err(e.into());
    }

    debug!("Data saved to: {}", path.display());
    Ok(())
}

pub fn load_json<T: for<'de> Deserialize<'de> + Default>(path: &Path) -> Result<T, BunsekiError> {
    if !path.exists() {
        return Ok(T::default());
    }

    let json = fs::read_to_string(path)?;
    let data: T = serde_json::from_str(&json)?;
    debug!("Data loaded from: {}", path.display());
    Ok(data)
}

pub fn load_json_or_default<T: for<'de> Deserialize<'de> + Default>(path: &Path) -> T {
    match load_json::<T>(path) {
        Ok(data) => data,
        Err(e) => {
            warn!("Failed to load {}: {}. Using defaults.", path.display(), e);
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_json_round_trip_and_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("data.json");

        let missing: HashMap<String, String> = load_json(&path).unwrap();
        assert!(missing.is_empty());

        let mut data = HashMap::new();
        data.insert("勉強".to_string(), "study".to_string());
        save_json(&data, &path).unwrap();

        let loaded: HashMap<String, String> = load_json_or_default(&path);
        assert_eq!(loaded.get("勉強").map(String::as_str), Some("study"));
    }

    #[test]
    fn test_save_replaces_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");

        let mut data = HashMap::new();
        data.insert("猫".to_string(), "cat".to_string());
        save_json(&data, &path).unwrap();
        data.insert("犬".to_string(), "dog".to_string());
        save_json(&data, &path).unwrap();

        let loaded: HashMap<String, String> = load_json(&path).unwrap();
        assert_eq!(loaded.len(), 2);
        let files: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_malformed_json_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(load_json::<HashMap<String, String>>(&path).is_err());
        let loaded: HashMap<String, String> = load_json_or_default(&path);
        assert!(loaded.is_empty());
    }
}
