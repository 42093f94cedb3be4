//! JSON File Repository - Atomic Quote Collection Persistence
//!
//! Stores the whole collection as a pretty-printed JSON array using
//! atomic writes (write to tmp file, then rename). The file is always
//! either the old or the new collection, never a partial write.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::fs;
use tracing::{info, instrument, warn};

use crate::domain::{Quote, ReplacementQuote, build_replacement};
use crate::ports::QuoteRepository;

/// Atomic JSON file store for the quote collection.
pub struct JsonFileRepository {
    /// Path to the collection file.
    data_path: PathBuf,
    /// Temporary path for atomic writes.
    tmp_path: PathBuf,
    /// Loaded instead of the data file until the first save.
    seed_path: Option<PathBuf>,
}

impl JsonFileRepository {
    /// Create a repository backed by `data_path`.
    ///
    /// Creates the parent directory if it doesn't exist.
    pub async fn new(data_path: impl AsRef<Path>) -> Result<Self> {
        let data_path = data_path.as_ref().to_path_buf();
        if let Some(dir) = data_path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .await
                .with_context(|| format!("Failed to create data directory {}", dir.display()))?;
        }

        let mut tmp_name = data_path.file_name().unwrap_or_default().to_os_string();
        tmp_name.push(".tmp");
        let tmp_path = data_path.with_file_name(tmp_name);

        Ok(Self {
            data_path,
            tmp_path,
            seed_path: None,
        })
    }

    /// Bootstrap from `seed_path` while the data file does not exist.
    ///
    /// Seed records may omit ids and use either `text` or `quote`.
    #[must_use]
    pub fn with_seed(mut self, seed_path: impl Into<PathBuf>) -> Self {
        self.seed_path = Some(seed_path.into());
        self
    }

    async fn load_seed(&self, seed_path: &Path) -> Result<Vec<Quote>> {
        let json = fs::read_to_string(seed_path)
            .await
            .with_context(|| format!("Failed to read seed file {}", seed_path.display()))?;
        let candidates: Vec<ReplacementQuote> =
            serde_json::from_str(&json).context("Failed to parse seed JSON")?;
        let quotes = build_replacement(candidates).context("Invalid seed collection")?;

        info!(
            path = %seed_path.display(),
            count = quotes.len(),
            "Quote collection seeded"
        );
        Ok(quotes)
    }
}

#[async_trait]
impl QuoteRepository for JsonFileRepository {
    #[instrument(skip(self), fields(path = %self.data_path.display()))]
    async fn load(&self) -> Result<Vec<Quote>> {
        let data_exists = fs::try_exists(&self.data_path)
            .await
            .context("Failed to check for quote file")?;
        if !data_exists {
            if let Some(seed_path) = &self.seed_path {
                let seed_exists = fs::try_exists(seed_path)
                    .await
                    .context("Failed to check for seed file")?;
                if seed_exists {
                    return self.load_seed(seed_path).await;
                }
                warn!(seed = %seed_path.display(), "Seed file not found");
            }
            info!("No quote file found, starting empty");
            return Ok(Vec::new());
        }

        let json = fs::read_to_string(&self.data_path)
            .await
            .context("Failed to read quote file")?;
        if json.trim().is_empty() {
            return Ok(Vec::new());
        }

        let stored: Vec<Quote> =
            serde_json::from_str(&json).context("Failed to parse quote file JSON")?;
        // Every stored id is present, so nothing is renumbered here.
        let quotes = build_replacement(stored.into_iter().map(ReplacementQuote::from).collect())
            .context("Invalid quote file")?;

        info!(count = quotes.len(), "Quote collection loaded");
        Ok(quotes)
    }

    #[instrument(skip(self, quotes), fields(count = quotes.len()))]
    async fn save(&self, quotes: &[Quote]) -> Result<()> {
        let json = serde_json::to_string_pretty(quotes)
            .context("Failed to serialize quote collection")?;

        // Write to tmp file
        fs::write(&self.tmp_path, &json)
            .await
            .context("Failed to write tmp quote file")?;

        // Atomic rename
        fs::rename(&self.tmp_path, &self.data_path)
            .await
            .context("Failed to rename quote file")?;

        info!(path = %self.data_path.display(), "Quote collection saved");
        Ok(())
    }

    async fn is_healthy(&self) -> bool {
        let Some(dir) = self.data_path.parent() else {
            return false;
        };
        let dir = if dir.as_os_str().is_empty() { Path::new(".") } else { dir };
        let probe = dir.join(".health_check");
        let result = fs::write(&probe, b"ok").await;
        let _ = fs::remove_file(&probe).await;
        result.is_ok()
    }
}
