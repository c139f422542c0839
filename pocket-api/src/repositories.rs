use crate::endpoints::{
    AccountId,
    accounts::ListAccounts,
    postings::{DEFAULT_PAGE_SIZE, ListPostings},
};

#[derive(Default)]
pub struct AccountRepository;

impl AccountRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn list(&self) -> ListAccounts {
        ListAccounts::new()
    }
}

pub struct PostingRepository {
    limit: u32,
}

impl PostingRepository {
    pub fn new() -> Self {
        Self {
            limit: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// First page for a ledger
    pub fn list(&self, account_id: AccountId) -> ListPostings {
        ListPostings::new(account_id).limit(self.limit)
    }

    /// Page that follows `cursor`, the action key of the oldest posting already loaded
    pub fn more(&self, account_id: AccountId, cursor: impl Into<String>) -> ListPostings {
        ListPostings::new(account_id)
            .limit(self.limit)
            .last_evaluated_key(cursor.into())
    }
}

impl Default for PostingRepository {
    fn default() -> Self {
        Self::new()
    }
}
