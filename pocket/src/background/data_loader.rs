use crate::cache::Cache;
use crate::events::DataEvent;
use pocket_api::{endpoints::accounts::Ledger, Client, Request};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Data loader that implements cache-first loading
///
/// Cached data is sent first so the screen paints immediately; the API answer
/// follows and refreshes the cache.
#[derive(Clone)]
pub struct DataLoader {
    pub api_client: Arc<Client>,
    pub cache: Arc<Cache>,
    pub data_tx: mpsc::UnboundedSender<DataEvent>,
    pub page_size: u32,
}

impl DataLoader {
    pub fn new(
        api_client: Arc<Client>,
        cache: Arc<Cache>,
        data_tx: mpsc::UnboundedSender<DataEvent>,
        page_size: u32,
    ) -> Self {
        Self {
            api_client,
            cache,
            data_tx,
            page_size,
        }
    }

    /// Load the ledger list, cache first unless `force_refresh`
    pub async fn load_accounts(&self, force_refresh: bool) {
        tracing::info!("Loading accounts (force_refresh={})", force_refresh);

        if !force_refresh {
            match self.cache.get_accounts().await {
                Ok(Some(cached)) => {
                    tracing::debug!("Loaded {} accounts from cache", cached.accounts.len());
                    let _ = self.data_tx.send(DataEvent::AccountsCacheLoaded {
                        accounts: cached.accounts,
                    });
                }
                Ok(None) => tracing::debug!("No cached accounts found"),
                Err(e) => tracing::warn!("Ignoring unreadable accounts cache: {}", e),
            }
        }

        match self.api_client.fetch(Request::accounts().list()).await {
            Ok(accounts) => {
                tracing::info!("Loaded {} accounts from API", accounts.len());
                let _ = self.data_tx.send(DataEvent::AccountsLoaded {
                    accounts: accounts.clone(),
                });

                let cache = self.cache.clone();
                tokio::spawn(async move {
                    if let Err(e) = cache.set_accounts(&accounts).await {
                        tracing::warn!("Failed to cache accounts: {}", e);
                    }
                });
            }
            Err(e) => {
                tracing::error!("Failed to load accounts from API: {}", e);
                let _ = self
                    .data_tx
                    .send(DataEvent::AccountsLoadFailed { error: e.to_string() });
            }
        }
    }

    /// Load the first page of a ledger's postings, cache first unless `force_refresh`
    pub async fn load_postings(&self, ledger: Ledger, request_id: u64, force_refresh: bool) {
        tracing::info!(
            "Loading postings for ledger {} (request={}, force_refresh={})",
            ledger.account,
            request_id,
            force_refresh
        );

        if !force_refresh {
            match self.cache.get_postings(&ledger.account).await {
                Ok(Some(cached)) => {
                    tracing::debug!("Loaded {} postings from cache", cached.postings.len());
                    let _ = self.data_tx.send(DataEvent::PostingsCacheLoaded {
                        ledger: ledger.clone(),
                        request_id,
                        postings: cached.postings,
                        next_page: cached.next_page,
                    });
                }
                Ok(None) => tracing::debug!("No cached postings for {}", ledger.account),
                Err(e) => tracing::warn!("Ignoring unreadable postings cache: {}", e),
            }
        }

        let req = Request::postings()
            .with_limit(self.page_size)
            .list(ledger.account.clone());
        match self.api_client.fetch(req).await {
            Ok(page) => {
                tracing::info!(
                    "Loaded {} postings for ledger {} (next page: {})",
                    page.postings.len(),
                    ledger.account,
                    page.has_next_page()
                );

                let cache = self.cache.clone();
                let account = ledger.account.clone();
                let postings = page.postings.clone();
                let next_page = page.has_next_page();
                tokio::spawn(async move {
                    if let Err(e) = cache.set_postings(&account, &postings, next_page).await {
                        tracing::warn!("Failed to cache postings: {}", e);
                    }
                });

                let _ = self.data_tx.send(DataEvent::PostingsLoaded {
                    ledger,
                    request_id,
                    page,
                });
            }
            Err(e) => {
                tracing::error!("Failed to load postings for {}: {}", ledger.account, e);
                let _ = self.data_tx.send(DataEvent::PostingsLoadFailed {
                    ledger,
                    request_id,
                    more: false,
                    error: e.to_string(),
                });
            }
        }
    }

    /// Load the page following `cursor`. Later pages are never cached.
    pub async fn load_more_postings(&self, ledger: Ledger, cursor: String, request_id: u64) {
        tracing::info!(
            "Loading more postings for ledger {} after {}",
            ledger.account,
            cursor
        );

        let req = Request::postings()
            .with_limit(self.page_size)
            .more(ledger.account.clone(), cursor);
        match self.api_client.fetch(req).await {
            Ok(page) => {
                tracing::info!(
                    "Loaded {} more postings for ledger {}",
                    page.postings.len(),
                    ledger.account
                );
                let _ = self.data_tx.send(DataEvent::MorePostingsLoaded {
                    ledger,
                    request_id,
                    page,
                });
            }
            Err(e) => {
                tracing::error!("Failed to load more postings for {}: {}", ledger.account, e);
                let _ = self.data_tx.send(DataEvent::PostingsLoadFailed {
                    ledger,
                    request_id,
                    more: true,
                    error: e.to_string(),
                });
            }
        }
    }
}
