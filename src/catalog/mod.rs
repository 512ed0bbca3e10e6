//! Contextualisation catalog
//!
//! The catalog holds everything the list views and the dashboard read:
//!
//! - [`tables`]: source tables and their knowledge-graph status
//! - [`forms`]: form templates and submitted responses
//! - [`sync_jobs`]: manual, scheduled and event-based sync jobs
//!
//! It is stored as a single JSON file (`catalog.json` in the data directory
//! unless overridden) and written atomically.

pub mod forms;
pub mod sync_jobs;
pub mod tables;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use forms::{FormEntry, FormResponse, FormStatus, FormType};
pub use sync_jobs::{JobStatus, JobType, SyncJob, SyncMetrics, SyncScope};
pub use tables::{KgStatus, TableEntry, TableUpdate};

use crate::utils::get_data_dir;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Environment variable overriding the catalog location
pub const CATALOG_ENV: &str = "KGDASH_CATALOG";

const CATALOG_FILE: &str = "catalog.json";

/// Error type for catalog operations
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Data directory not available")]
    DataDirUnavailable,
}

/// The list views offered over the catalog
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ListKind {
    Tables,
    Forms,
    Jobs,
    Responses,
}

impl ListKind {
    /// Column each view sorts by when the user has not picked one
    pub const fn default_sort_field(self) -> &'static str {
        match self {
            ListKind::Tables | ListKind::Forms | ListKind::Jobs => "name",
            ListKind::Responses => "submitted_at",
        }
    }
}

/// All catalog collections
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    #[serde(default)]
    pub tables: Vec<TableEntry>,
    #[serde(default)]
    pub forms: Vec<FormEntry>,
    #[serde(default)]
    pub sync_jobs: Vec<SyncJob>,
    #[serde(default)]
    pub responses: Vec<FormResponse>,
}

impl Catalog {
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
            && self.forms.is_empty()
            && self.sync_jobs.is_empty()
            && self.responses.is_empty()
    }

    pub fn find_table(&self, id: &str) -> Option<&TableEntry> {
        self.tables.iter().find(|t| t.id == id)
    }

    /// Applies a metadata update to one table.
    pub fn update_table(&mut self, update: &TableUpdate) -> Result<&TableEntry, CatalogError> {
        let table = self
            .tables
            .iter_mut()
            .find(|t| t.id == update.id)
            .ok_or_else(|| CatalogError::NotFound {
                kind: "Table",
                id: update.id.clone(),
            })?;
        update.apply_to(table);
        tracing::debug!(id = %update.id, "updated table metadata");
        Ok(table)
    }

    /// Applies several updates, all or nothing: if any id is unknown no table
    /// is modified.
    pub fn bulk_update_tables(&mut self, updates: &[TableUpdate]) -> Result<usize, CatalogError> {
        if let Some(missing) = updates.iter().find(|u| self.find_table(&u.id).is_none()) {
            return Err(CatalogError::NotFound {
                kind: "Table",
                id: missing.id.clone(),
            });
        }
        for update in updates {
            self.update_table(update)?;
        }
        Ok(updates.len())
    }
}

/// Resolves the catalog file: explicit path, then [`CATALOG_ENV`], then the
/// data directory.
pub fn resolve_catalog_path(explicit: Option<&Path>) -> Result<PathBuf, CatalogError> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    if let Some(path) = std::env::var_os(CATALOG_ENV).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    let mut path = get_data_dir().ok_or(CatalogError::DataDirUnavailable)?;
    path.push(CATALOG_FILE);
    Ok(path)
}

/// Loads the catalog at `path`. A missing file is an empty catalog.
///
/// # Async
/// Uses `tokio::fs` for non-blocking file I/O.
pub async fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    if !tokio::fs::try_exists(path).await? {
        tracing::info!(path = %path.display(), "no catalog file, starting empty");
        return Ok(Catalog::default());
    }

    let json = tokio::fs::read_to_string(path).await?;
    let catalog: Catalog = serde_json::from_str(&json)?;
    tracing::debug!(
        tables = catalog.tables.len(),
        forms = catalog.forms.len(),
        jobs = catalog.sync_jobs.len(),
        responses = catalog.responses.len(),
        "loaded catalog"
    );
    Ok(catalog)
}

/// Saves the catalog atomically: write a temp file in the same directory,
/// flush it, then rename it over the target.
///
/// The temp file is created with mode 0o600 on Unix, so the catalog is never
/// briefly world-readable.
pub async fn save_catalog(path: &Path, catalog: &Catalog) -> Result<(), CatalogError> {
    let json = serde_json::to_string_pretty(catalog)?;
    let path = path.to_path_buf();

    tokio::task::spawn_blocking(move || write_atomic(&path, json.as_bytes()))
        .await
        .map_err(|e| CatalogError::Io(std::io::Error::other(e)))??;

    tracing::info!(tables = catalog.tables.len(), "saved catalog");
    Ok(())
}

fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), CatalogError> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir)?;

    let mut file = tempfile::NamedTempFile::new_in(&dir)?;
    file.write_all(contents)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| {
        if e.error.kind() == std::io::ErrorKind::StorageFull {
            std::io::Error::new(
                std::io::ErrorKind::StorageFull,
                "Disk full: cannot save catalog. Free up space and try again.",
            )
        } else {
            e.error
        }
    })?;
    Ok(())
}
