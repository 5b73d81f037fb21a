//! On-disk cache of parsed parameter tables, one bincode file per request.

use crate::power::error::FetchError;
use crate::power::request::PowerRequest;
use crate::power::response::ParameterTable;
use bincode::config::{Configuration, Fixint, LittleEndian};
use log::debug;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const BINCODE_CONFIG: Configuration<LittleEndian, Fixint> =
    bincode::config::standard().with_fixed_int_encoding();

#[derive(Debug, Clone)]
pub struct ResponseCache {
    dir: PathBuf,
}

impl ResponseCache {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, request: &PowerRequest) -> PathBuf {
        self.dir.join(request.cache_key())
    }

    /// Returns the cached table for `request`, or `None` on a cache miss.
    pub async fn load(&self, request: &PowerRequest) -> Result<Option<ParameterTable>, FetchError> {
        let path = self.path_for(request);
        if tokio::fs::metadata(&path).await.is_err() {
            return Ok(None);
        }
        let table = tokio::task::spawn_blocking(move || Self::read_table(&path)).await??;
        Ok(Some(table))
    }

    fn read_table(path: &Path) -> Result<ParameterTable, FetchError> {
        let bytes =
            std::fs::read(path).map_err(|e| FetchError::CacheRead(path.to_path_buf(), e))?;
        let (table, _) = bincode::serde::decode_from_slice::<ParameterTable, _>(&bytes, BINCODE_CONFIG)
            .map_err(|e| FetchError::CacheDecode(path.to_path_buf(), e))?;
        Ok(table)
    }

    /// Writes `table` to a temp file in the cache directory and renames it into place.
    pub async fn store(&self, request: &PowerRequest, table: ParameterTable) -> Result<(), FetchError> {
        let dir = self.dir.clone();
        let path = self.path_for(request);
        tokio::task::spawn_blocking(move || {
            std::fs::create_dir_all(&dir)
                .map_err(|e| FetchError::CacheDir(dir.clone(), e))?;
            let bytes = bincode::serde::encode_to_vec(&table, BINCODE_CONFIG)
                .map_err(FetchError::CacheEncode)?;
            let mut temp_file = NamedTempFile::new_in(&dir)
                .map_err(|e| FetchError::CacheWrite(path.clone(), e))?;
            temp_file
                .write_all(&bytes)
                .map_err(|e| FetchError::CacheWrite(path.clone(), e))?;
            temp_file
                .persist(&path)
                .map_err(|e| FetchError::CacheWrite(path.clone(), e.error))?;
            debug!("Cached {} bytes to {}", bytes.len(), path.display());
            Ok(())
        })
        .await?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::power::request::Resolution;
    use crate::types::location::LatLon;
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    fn request() -> PowerRequest {
        PowerRequest {
            resolution: Resolution::Daily,
            location: LatLon(52.52, 13.405),
            community: "RE".to_string(),
            start: NaiveDate::from_ymd_opt(2010, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2010, 12, 31).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_store_then_load() -> Result<(), FetchError> {
        let dir = tempfile::tempdir().map_err(|e| FetchError::CacheRead(PathBuf::new(), e))?;
        let cache = ResponseCache::new(dir.path().join("nested"));

        assert!(cache.load(&request()).await?.is_none());

        let mut table = ParameterTable::new();
        table.insert(
            "T2M_MAX".to_string(),
            BTreeMap::from([
                ("20100101".to_string(), Some(1.5)),
                ("20100102".to_string(), None),
            ]),
        );
        cache.store(&request(), table.clone()).await?;

        assert!(cache.path_for(&request()).exists());
        assert_eq!(cache.load(&request()).await?, Some(table));
        Ok(())
    }

    #[tokio::test]
    async fn test_corrupt_file_is_a_decode_error() -> Result<(), FetchError> {
        let dir = tempfile::tempdir().map_err(|e| FetchError::CacheRead(PathBuf::new(), e))?;
        let cache = ResponseCache::new(dir.path().to_path_buf());
        std::fs::write(cache.path_for(&request()), [0xff, 0x01])
            .map_err(|e| FetchError::CacheWrite(PathBuf::new(), e))?;

        let result = cache.load(&request()).await;
        assert!(matches!(result, Err(FetchError::CacheDecode(..))));
        Ok(())
    }
}
