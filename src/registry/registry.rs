use std::{
    collections::HashMap,
    fmt::Debug,
    fs,
    hash::Hash,
    path::{Path, PathBuf},
};

use serde::de::DeserializeOwned;
use tracing::warn;

/// Immutable keyed configuration rows. Spawn-time code looks a row up once
/// and copies what it needs into components; nothing reads the registry at
/// runtime after that.
#[derive(Debug, Clone)]
pub struct Registry<K, V> {
    pub entries: HashMap<K, V>,
}

pub trait RegistryEntry {
    type Id: Eq + Hash + Clone + Debug;

    fn id(&self) -> Self::Id;
}

#[derive(Debug)]
pub enum RegistryError {
    DuplicateId(String),
    Load(std::io::Error),
}

impl From<std::io::Error> for RegistryError {
    fn from(err: std::io::Error) -> Self {
        RegistryError::Load(err)
    }
}

impl<K, V> Registry<K, V>
where
    K: Eq + Hash + Clone + Debug,
    V: RegistryEntry<Id = K> + DeserializeOwned,
{
    /// Loads every `*.json` file in `directory` as one row. Files that fail
    /// to deserialize are skipped with a warning; duplicate ids are an
    /// error.
    pub fn load_from_directory(directory: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let mut entries = HashMap::new();

        for entry in fs::read_dir(directory)? {
            let entry = entry?;
            let path: PathBuf = entry.path();

            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }

            let file_contents = fs::read_to_string(&path)?;
            let value = match serde_json::from_str::<V>(&file_contents) {
                Ok(value) => value,
                Err(e) => {
                    warn!("failed to deserialize {:?}: {}", path, e);
                    continue;
                }
            };

            let id = value.id();
            if entries.insert(id.clone(), value).is_some() {
                return Err(RegistryError::DuplicateId(format!(
                    "duplicate id {:?} in file {:?}",
                    id, path
                )));
            }
        }

        Ok(Self { entries })
    }
}

impl<K: Eq + Hash, V> Registry<K, V> {
    pub fn get(&self, id: &K) -> Option<&V> {
        self.entries.get(id)
    }
}
