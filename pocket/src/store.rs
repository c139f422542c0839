//! User state store shared by every screen.
//!
//! Holds the ledgers and the postings cached per ledger. Writers go through
//! [`UserStore::dispatch`]; observers hold a [`watch::Receiver`] from
//! [`UserStore::subscribe`] that is bumped on every effective change.

use pocket_api::endpoints::{accounts::Ledger, postings::Posting, AccountId};
use std::collections::{HashMap, HashSet};
use tokio::sync::watch;

/// Postings loaded so far for one ledger
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LedgerPostings {
    pub transactions: Vec<Posting>,
    /// The server reported another page after the last one loaded
    pub next_page: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserState {
    pub accounts: Vec<Ledger>,
    pub all_transactions: HashMap<AccountId, LedgerPostings>,
    pub active_ledger: Option<Ledger>,
}

impl UserState {
    pub fn postings(&self, account: &AccountId) -> Option<&LedgerPostings> {
        self.all_transactions.get(account)
    }

    pub fn has_next_page(&self, account: &AccountId) -> bool {
        self.postings(account).is_some_and(|p| p.next_page)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UserAction {
    SetAccounts(Vec<Ledger>),
    /// Replace the cached postings of a ledger with a first page
    SetTransactions {
        account: AccountId,
        postings: Vec<Posting>,
        next_page: bool,
    },
    /// Add a further page to the cached postings of a ledger
    AppendTransactions {
        account: AccountId,
        postings: Vec<Posting>,
        next_page: bool,
    },
    SetActiveLedger(Ledger),
}

#[derive(Debug)]
pub struct UserStore {
    state: UserState,
    revision: watch::Sender<u64>,
}

impl UserStore {
    pub fn new() -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            state: UserState::default(),
            revision,
        }
    }

    pub fn state(&self) -> &UserState {
        &self.state
    }

    /// Receiver that observes a new revision after every effective change
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    /// Apply an action. Returns whether the state changed.
    pub fn dispatch(&mut self, action: UserAction) -> bool {
        let changed = reduce(&mut self.state, action);
        if changed {
            self.revision.send_modify(|rev| *rev += 1);
        }
        changed
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}

fn reduce(state: &mut UserState, action: UserAction) -> bool {
    match action {
        UserAction::SetAccounts(accounts) => {
            // Keep the active ledger in step with refreshed balances
            let refreshed_active = state.active_ledger.as_ref().and_then(|active| {
                accounts
                    .iter()
                    .find(|l| l.account == active.account)
                    .cloned()
            });
            let mut changed = state.accounts != accounts;
            state.accounts = accounts;
            if let Some(ledger) = refreshed_active {
                if state.active_ledger.as_ref() != Some(&ledger) {
                    state.active_ledger = Some(ledger);
                    changed = true;
                }
            }
            changed
        }
        UserAction::SetTransactions {
            account,
            postings,
            next_page,
        } => {
            let entry = LedgerPostings {
                transactions: postings,
                next_page,
            };
            if state.all_transactions.get(&account) == Some(&entry) {
                return false;
            }
            state.all_transactions.insert(account, entry);
            true
        }
        UserAction::AppendTransactions {
            account,
            postings,
            next_page,
        } => {
            let entry = state.all_transactions.entry(account).or_default();
            let known: HashSet<String> = entry
                .transactions
                .iter()
                .map(|p| p.action_key.clone())
                .collect();
            let before = entry.transactions.len();
            entry.transactions.extend(
                postings
                    .into_iter()
                    .filter(|p| !known.contains(&p.action_key)),
            );
            let changed = entry.transactions.len() != before || entry.next_page != next_page;
            entry.next_page = next_page;
            changed
        }
        UserAction::SetActiveLedger(ledger) => {
            if state.active_ledger.as_ref() == Some(&ledger) {
                return false;
            }
            state.active_ledger = Some(ledger);
            true
        }
    }
}
