//! In-memory storage provider for development and tests.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use dashmap::DashMap;

use vaultdocs_core::error::AppError;
use vaultdocs_core::result::AppResult;
use vaultdocs_core::traits::storage::{ByteStream, StorageObjectMeta, StorageProvider};

use super::normalize_key;

/// Size of the chunks yielded by [`MemoryStorageProvider::read`].
const READ_CHUNK_SIZE: usize = 64 * 1024;

#[derive(Debug, Clone)]
struct StoredObject {
    data: Bytes,
    modified: DateTime<Utc>,
}

/// Storage provider keeping objects in a concurrent map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorageProvider {
    objects: Arc<DashMap<String, StoredObject>>,
}

impl MemoryStorageProvider {
    /// Create an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether no objects are stored.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    fn get(&self, path: &str) -> AppResult<StoredObject> {
        let key = normalize_key(path)?;
        self.objects
            .get(&key)
            .map(|o| o.value().clone())
            .ok_or_else(|| AppError::not_found(format!("File not found: {path}")))
    }
}

#[async_trait]
impl StorageProvider for MemoryStorageProvider {
    fn provider_type(&self) -> &str {
        "memory"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn read(&self, path: &str) -> AppResult<ByteStream> {
        let object = self.get(path)?;
        let data = object.data;
        let chunks: Vec<Result<Bytes, std::io::Error>> = (0..data.len())
            .step_by(READ_CHUNK_SIZE)
            .map(|start| Ok(data.slice(start..(start + READ_CHUNK_SIZE).min(data.len()))))
            .collect();
        Ok(Box::pin(futures::stream::iter(chunks)))
    }

    async fn read_bytes(&self, path: &str) -> AppResult<Bytes> {
        Ok(self.get(path)?.data)
    }

    async fn write(&self, path: &str, data: Bytes) -> AppResult<()> {
        let key = normalize_key(path)?;
        self.objects.insert(
            key,
            StoredObject {
                data,
                modified: Utc::now(),
            },
        );
        Ok(())
    }

    async fn delete(&self, path: &str) -> AppResult<()> {
        let key = normalize_key(path)?;
        self.objects.remove(&key);
        Ok(())
    }

    async fn rename(&self, from: &str, to: &str) -> AppResult<()> {
        let from_key = normalize_key(from)?;
        let to_key = normalize_key(to)?;
        let (_, object) = self
            .objects
            .remove(&from_key)
            .ok_or_else(|| AppError::not_found(format!("File not found: {from}")))?;
        self.objects.insert(to_key, object);
        Ok(())
    }

    async fn exists(&self, path: &str) -> AppResult<bool> {
        let key = normalize_key(path)?;
        Ok(self.objects.contains_key(&key))
    }

    async fn metadata(&self, path: &str) -> AppResult<StorageObjectMeta> {
        let object = self.get(path)?;
        Ok(StorageObjectMeta {
            path: path.to_string(),
            size_bytes: object.data.len() as u64,
            last_modified: Some(object.modified),
            is_directory: false,
        })
    }

    async fn list(&self, path: &str) -> AppResult<Vec<StorageObjectMeta>> {
        let prefix = normalize_key(path)?;
        let lead = if prefix.is_empty() {
            String::new()
        } else {
            format!("{prefix}/")
        };

        let mut entries: BTreeMap<String, StorageObjectMeta> = BTreeMap::new();
        for item in self.objects.iter() {
            let Some(rest) = item.key().strip_prefix(&lead) else {
                continue;
            };
            match rest.split_once('/') {
                Some((dir, _)) => {
                    let dir_path = format!("{lead}{dir}");
                    entries
                        .entry(dir_path.clone())
                        .or_insert_with(|| StorageObjectMeta {
                            path: dir_path,
                            size_bytes: 0,
                            last_modified: None,
                            is_directory: true,
                        });
                }
                None => {
                    entries.insert(
                        item.key().clone(),
                        StorageObjectMeta {
                            path: item.key().clone(),
                            size_bytes: item.value().data.len() as u64,
                            last_modified: Some(item.value().modified),
                            is_directory: false,
                        },
                    );
                }
            }
        }

        let mut entries: Vec<StorageObjectMeta> = entries.into_values().collect();
        entries.sort_by(|a, b| {
            b.is_directory
                .cmp(&a.is_directory)
                .then(a.path.cmp(&b.path))
        });
        Ok(entries)
    }
}
