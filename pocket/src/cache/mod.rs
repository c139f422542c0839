use pocket_api::endpoints::{accounts::Ledger, postings::Posting, AccountId};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("no cache directory available")]
    NoCacheDir,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedAccounts {
    pub accounts: Vec<Ledger>,
    pub cached_at: i64, // Unix timestamp
}

/// First page of a ledger's postings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedPostings {
    pub postings: Vec<Posting>,
    pub next_page: bool,
    pub cached_at: i64,
}

/// Async cache layer using tokio::fs for non-blocking file I/O
#[derive(Clone)]
pub struct Cache {
    cache_dir: PathBuf,
}

impl Cache {
    /// Open the cache under the user's cache directory
    pub async fn new() -> Result<Self, CacheError> {
        let cache_dir = dirs::cache_dir()
            .ok_or(CacheError::NoCacheDir)?
            .join("pocket")
            .join("data");
        Self::at(cache_dir).await
    }

    pub async fn at(cache_dir: PathBuf) -> Result<Self, CacheError> {
        fs::create_dir_all(&cache_dir).await?;
        Ok(Self { cache_dir })
    }

    // Accounts cache
    pub async fn get_accounts(&self) -> Result<Option<CachedAccounts>, CacheError> {
        self.read(&self.cache_dir.join("accounts.json")).await
    }

    pub async fn set_accounts(&self, accounts: &[Ledger]) -> Result<(), CacheError> {
        let cached = CachedAccounts {
            accounts: accounts.to_vec(),
            cached_at: chrono::Utc::now().timestamp(),
        };
        self.write(&self.cache_dir.join("accounts.json"), &cached)
            .await
    }

    // Postings cache
    pub async fn get_postings(
        &self,
        account: &AccountId,
    ) -> Result<Option<CachedPostings>, CacheError> {
        self.read(&self.postings_path(account)).await
    }

    pub async fn set_postings(
        &self,
        account: &AccountId,
        postings: &[Posting],
        next_page: bool,
    ) -> Result<(), CacheError> {
        let cached = CachedPostings {
            postings: postings.to_vec(),
            next_page,
            cached_at: chrono::Utc::now().timestamp(),
        };
        self.write(&self.postings_path(account), &cached).await
    }

    /// Account ids are opaque strings; hex keeps distinct ids on distinct files
    fn postings_path(&self, account: &AccountId) -> PathBuf {
        self.cache_dir
            .join(format!("postings_{}.json", hex::encode(account.as_str())))
    }

    async fn read<T: DeserializeOwned>(&self, path: &Path) -> Result<Option<T>, CacheError> {
        if !path.exists() {
            return Ok(None);
        }

        let data = fs::read_to_string(path).await?;
        Ok(Some(serde_json::from_str(&data)?))
    }

    async fn write<T: Serialize>(&self, path: &Path, value: &T) -> Result<(), CacheError> {
        let json = serde_json::to_string_pretty(value)?;
        fs::write(path, json).await?;
        Ok(())
    }
}
