//! Catalog file handling.
//!
//! The catalog is a JSON array of product records, each carrying its
//! reviews. A missing file is an empty catalog. Writers go through
//! [`update`], which holds an exclusive lock on `<catalog>.lock` for the
//! whole load-modify-save cycle so concurrent `grocer` processes cannot
//! overwrite each other's changes.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use grocer_storefront::catalog::{InMemoryCatalog, ProductRecord};
use grocer_storefront::error::Result;
use grocer_storefront::storage::StorageError;

/// Exclusive hold on a catalog file, released on drop.
struct CatalogLock {
    file: File,
}

impl CatalogLock {
    fn acquire(path: &Path) -> Result<Self> {
        create_parent(path)?;
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(sibling(path, ".lock"))
            .map_err(StorageError::from)?;
        file.lock().map_err(StorageError::from)?;
        Ok(Self { file })
    }
}

impl Drop for CatalogLock {
    fn drop(&mut self) {
        if let Err(e) = self.file.unlock() {
            tracing::warn!(error = %e, "Failed to unlock catalog");
        }
    }
}

/// Load the catalog at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if two records
/// share a product id.
pub fn load(path: &Path) -> Result<InMemoryCatalog> {
    let records: Vec<ProductRecord> = match fs::read_to_string(path) {
        Ok(text) => serde_json::from_str(&text).map_err(StorageError::from)?,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "Catalog file not found, using empty catalog");
            Vec::new()
        }
        Err(e) => return Err(StorageError::from(e).into()),
    };

    Ok(InMemoryCatalog::from_records(records)?)
}

/// Load the catalog under an exclusive lock, run `f`, and save the result.
///
/// Nothing is written if `f` fails.
///
/// # Errors
///
/// Returns an error if the lock cannot be taken, the catalog cannot be
/// loaded or saved, or `f` fails.
pub fn update<T>(path: &Path, f: impl FnOnce(&InMemoryCatalog) -> Result<T>) -> Result<T> {
    let _lock = CatalogLock::acquire(path)?;
    let catalog = load(path)?;
    let out = f(&catalog)?;
    save(path, &catalog)?;
    Ok(out)
}

/// Write `catalog` to `path` through a temporary file renamed into place.
fn save(path: &Path, catalog: &InMemoryCatalog) -> Result<()> {
    let records = catalog.records()?;
    let text = serde_json::to_string_pretty(&records).map_err(StorageError::from)?;

    create_parent(path)?;
    let tmp = sibling(path, ".tmp");
    fs::write(&tmp, text).map_err(StorageError::from)?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(StorageError::from(e).into());
    }
    Ok(())
}

fn create_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(StorageError::from)?;
    }
    Ok(())
}

/// `path` with `suffix` appended to its file name.
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use grocer_core::{ProductId, UserId};
    use grocer_storefront::catalog::Catalog;
    use grocer_storefront::services::reviews::ReviewService;

    use super::*;

    const SEED: &str = r#"[{"product": {"id": 1, "name": "Plums", "price": "2.40", "stock": 30}}]"#;

    fn seeded_catalog() -> (PathBuf, PathBuf) {
        let dir = std::env::temp_dir().join(format!("grocer-catalog-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("catalog.json");
        fs::write(&path, SEED).unwrap();
        (dir, path)
    }

    #[test]
    fn test_concurrent_updates_are_not_lost() {
        let (dir, path) = seeded_catalog();
        let writers = 8;

        std::thread::scope(|s| {
            for author in 1..=writers {
                let path = &path;
                s.spawn(move || {
                    update(path, |catalog| {
                        Ok(ReviewService::new(catalog).add_review(
                            ProductId::new(1),
                            UserId::new(author),
                            4,
                            "",
                        )?)
                    })
                    .unwrap();
                });
            }
        });

        let catalog = load(&path).unwrap();
        let product = catalog.get_by_id(ProductId::new(1)).unwrap();
        assert_eq!(product.review_count, 8);
        assert_eq!(catalog.reviews(ProductId::new(1)).unwrap().len(), 8);

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_failed_update_writes_nothing() {
        let (dir, path) = seeded_catalog();

        let result = update(&path, |catalog| {
            Ok(ReviewService::new(catalog).add_review(
                ProductId::new(1),
                UserId::new(1),
                9,
                "",
            )?)
        });
        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), SEED);

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_save_replaces_file_without_leftovers() {
        let (dir, path) = seeded_catalog();

        update(&path, |_| Ok(())).unwrap();
        let catalog = load(&path).unwrap();
        assert_eq!(catalog.records().unwrap().len(), 1);
        assert!(!sibling(&path, ".tmp").exists());

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_missing_file_is_empty_catalog() {
        let dir = std::env::temp_dir().join(format!("grocer-catalog-{}", uuid::Uuid::new_v4()));
        let catalog = load(&dir.join("catalog.json")).unwrap();
        assert!(catalog.records().unwrap().is_empty());
    }
}
