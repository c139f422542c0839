use pocket_api::endpoints::{
    accounts::Ledger,
    postings::{Posting, PostingsPage},
};

/// Commands to execute (user actions and timers → state changes and loads)
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    SelectNext,
    SelectPrevious,
    NavigateToTop,
    NavigateToBottom,

    // Ledger tabs
    ChooseActiveLedger { index: usize },
    NextLedger,
    PreviousLedger,

    // Data loading
    LoadAccounts { force_refresh: bool },
    LoadMoreTransactions,
    Refresh,

    // Navigation
    OpenTransaction,
    SendMoney,
    NavigateBack,

    ToggleHelp,

    // System
    Quit,
}

/// Background work requested by the controller, carried out by a [`DataEventHandler`]
///
/// [`DataEventHandler`]: crate::app_core::DataEventHandler
#[derive(Debug, Clone, PartialEq)]
pub enum LoadRequest {
    Accounts {
        force_refresh: bool,
    },
    /// First page of a ledger's postings
    Postings {
        ledger: Ledger,
        request_id: u64,
        force_refresh: bool,
    },
    /// The page after `cursor`
    MorePostings {
        ledger: Ledger,
        cursor: String,
        request_id: u64,
    },
}

impl LoadRequest {
    /// Id under which the background task runs; a new task with the same id aborts the old one
    pub fn task_id(&self) -> String {
        match self {
            LoadRequest::Accounts { .. } => "load_accounts".to_string(),
            LoadRequest::Postings { .. } => "load_postings".to_string(),
            LoadRequest::MorePostings { ledger, .. } => {
                format!("load_more_postings_{}", ledger.account)
            }
        }
    }
}

/// Events from background tasks (responses to load requests)
#[derive(Debug, Clone)]
pub enum DataEvent {
    // Cache events (instant)
    AccountsCacheLoaded {
        accounts: Vec<Ledger>,
    },
    PostingsCacheLoaded {
        ledger: Ledger,
        request_id: u64,
        postings: Vec<Posting>,
        next_page: bool,
    },

    // API events (slower)
    AccountsLoaded {
        accounts: Vec<Ledger>,
    },
    PostingsLoaded {
        ledger: Ledger,
        request_id: u64,
        page: PostingsPage,
    },
    MorePostingsLoaded {
        ledger: Ledger,
        request_id: u64,
        page: PostingsPage,
    },

    // Errors
    AccountsLoadFailed {
        error: String,
    },
    PostingsLoadFailed {
        ledger: Ledger,
        request_id: u64,
        more: bool,
        error: String,
    },
}
