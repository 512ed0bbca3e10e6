use crate::catalog::ListKind;
use crate::charts::Palette;
use crate::utils::get_data_dir;
use crate::validators::{validate_hex_color, validate_page_size};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "config.json";

/// Rows per page for each list view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSizes {
    #[serde(default = "default_tables_page")]
    pub tables: usize,
    #[serde(default = "default_forms_page")]
    pub forms: usize,
    #[serde(default = "default_jobs_page")]
    pub jobs: usize,
    #[serde(default = "default_responses_page")]
    pub responses: usize,
}

impl Default for PageSizes {
    fn default() -> Self {
        Self {
            tables: default_tables_page(),
            forms: default_forms_page(),
            jobs: default_jobs_page(),
            responses: default_responses_page(),
        }
    }
}

impl PageSizes {
    pub fn get(&self, kind: ListKind) -> usize {
        match kind {
            ListKind::Tables => self.tables,
            ListKind::Forms => self.forms,
            ListKind::Jobs => self.jobs,
            ListKind::Responses => self.responses,
        }
    }

    /// Page size for a view, falling back to the built-in default when the
    /// configured value is out of range.
    pub fn for_kind(&self, kind: ListKind) -> NonZeroUsize {
        validate_page_size(self.get(kind))
            .or_else(|_| validate_page_size(PageSizes::default().get(kind)))
            .unwrap_or(NonZeroUsize::MIN)
    }
}

fn default_tables_page() -> usize {
    10
}

fn default_forms_page() -> usize {
    25
}

fn default_jobs_page() -> usize {
    15
}

fn default_responses_page() -> usize {
    50
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub page_sizes: PageSizes,
    #[serde(default)]
    pub palette: Palette,
    /// Width and height of square dashboard widgets, in SVG user units
    #[serde(default = "default_chart_size")]
    pub chart_size: f64,
    /// Catalog location; `None` uses `catalog.json` in the data directory
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
    #[serde(default = "default_true")]
    pub log_to_file: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            page_sizes: PageSizes::default(),
            palette: Palette::default(),
            chart_size: default_chart_size(),
            catalog_path: None,
            log_to_file: true,
        }
    }
}

fn default_chart_size() -> f64 {
    120.0
}

fn default_true() -> bool {
    true
}

impl AppConfig {
    /// Checks every value a user could have edited by hand.
    ///
    /// # Errors
    ///
    /// Returns the first problem found, prefixed with the offending key.
    pub fn validate(&self) -> Result<(), String> {
        for (name, size) in [
            ("tables", self.page_sizes.tables),
            ("forms", self.page_sizes.forms),
            ("jobs", self.page_sizes.jobs),
            ("responses", self.page_sizes.responses),
        ] {
            validate_page_size(size).map_err(|e| format!("page_sizes.{name}: {e}"))?;
        }
        for (name, color) in self.palette.entries() {
            validate_hex_color(color).map_err(|e| format!("palette.{name}: {e}"))?;
        }
        if !(self.chart_size.is_finite() && (16.0..=2048.0).contains(&self.chart_size)) {
            return Err(format!(
                "chart_size: must be between 16 and 2048, got {}",
                self.chart_size
            ));
        }
        Ok(())
    }
}

/// Default config file location
pub fn config_path() -> Option<PathBuf> {
    get_data_dir().map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

/// Saves the config to the data directory using an atomic write pattern.
///
/// Does nothing when no data directory can be determined.
///
/// # Errors
///
/// Returns any I/O error from writing or renaming the file.
pub async fn save_config(config: &AppConfig) -> std::io::Result<()> {
    match config_path() {
        Some(path) => save_config_to(&path, config).await,
        None => Ok(()),
    }
}

/// Saves the config to `path`.
/// 1. Writes to a temporary file next to it.
/// 2. Sets restrictive permissions (0o600).
/// 3. Atomically renames to the target path.
///
/// # Security
///
/// On Unix the file is created with mode 0o600 (user read/write only) before
/// any data is written. On Windows it inherits directory permissions.
///
/// # Errors
///
/// Returns any I/O error from writing or renaming the file.
pub async fn save_config_to(path: &Path, config: &AppConfig) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(config)?;
    let temp_path = path.with_extension("json.tmp");

    #[cfg(unix)]
    {
        use tokio::fs::OpenOptions;
        use tokio::io::AsyncWriteExt;

        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .mode(0o600)
            .open(&temp_path)
            .await?;

        file.write_all(json.as_bytes()).await?;
        file.sync_all().await?;
    }

    #[cfg(not(unix))]
    {
        use tokio::io::AsyncWriteExt;

        let mut file = tokio::fs::File::create(&temp_path).await?;
        file.write_all(json.as_bytes()).await?;
        file.sync_all().await?;
    }

    tokio::fs::rename(&temp_path, path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::StorageFull {
            std::io::Error::new(
                std::io::ErrorKind::StorageFull,
                "Disk full: cannot save configuration. Free up space and try again.",
            )
        } else {
            e
        }
    })?;
    tracing::info!(path = %path.display(), "saved config");
    Ok(())
}

/// Config read at startup, plus the reason the file was ignored if the
/// defaults had to be substituted
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedConfig {
    pub config: AppConfig,
    pub warning: Option<String>,
}

impl LoadedConfig {
    fn defaults(warning: Option<String>) -> Self {
        Self {
            config: AppConfig::default(),
            warning,
        }
    }
}

/// Loads the config from the data directory, or returns default if not found.
pub async fn load_config() -> LoadedConfig {
    match config_path() {
        Some(path) => load_config_from(&path).await,
        None => LoadedConfig::defaults(None),
    }
}

/// Loads the config at `path`.
///
/// A missing file yields the defaults. A file that cannot be parsed, or that
/// parses but fails [`AppConfig::validate`], also yields the defaults, with
/// the problem in [`LoadedConfig::warning`]. Nothing is logged here: this runs
/// before the subscriber is installed, so the caller reports the warning.
pub async fn load_config_from(path: &Path) -> LoadedConfig {
    let Ok(json) = tokio::fs::read_to_string(path).await else {
        return LoadedConfig::defaults(None);
    };
    match serde_json::from_str::<AppConfig>(&json) {
        Ok(config) => match config.validate() {
            Ok(()) => LoadedConfig {
                config,
                warning: None,
            },
            Err(e) => LoadedConfig::defaults(Some(format!(
                "invalid config {}, using defaults: {e}",
                path.display()
            ))),
        },
        Err(e) => LoadedConfig::defaults(Some(format!(
            "unreadable config {}, using defaults: {e}",
            path.display()
        ))),
    }
}

/// Synchronous wrapper for `load_config()` for use during startup, before the
/// runtime that serves commands exists.
pub fn load_config_blocking() -> LoadedConfig {
    if let Ok(handle) = tokio::runtime::Handle::try_current() {
        handle.block_on(load_config())
    } else {
        match tokio::runtime::Builder::new_current_thread().enable_all().build() {
            Ok(runtime) => runtime.block_on(load_config()),
            Err(e) => LoadedConfig::defaults(Some(format!(
                "could not start runtime to read config, using defaults: {e}"
            ))),
        }
    }
}
