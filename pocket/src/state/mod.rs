pub mod reducer;

use crate::home::{
    group_by_day, Debouncer, ScrollGeometry, ScrollState, Section, SectionLabels, SnapPoint,
};
use crate::settings::Settings;
use crate::store::{UserState, UserStore};
use crate::ui::screens::Screen;
use chrono::{DateTime, Local, TimeDelta};
use pocket_api::endpoints::{accounts::Ledger, postings::Posting, AccountId};
use ratatui::widgets::TableState;
use std::cell::{Cell, RefCell};
use std::time::{Duration, Instant};
use throbber_widgets_tui::ThrobberState;
use tokio::sync::watch;

/// Represents loading state separate from data state
#[derive(Default, Debug, Clone, PartialEq)]
pub enum LoadingState {
    #[default]
    NotStarted,
    Loading(ThrobberState),
    Loaded,
    Error(String),
}

impl LoadingState {
    pub fn loading() -> Self {
        LoadingState::Loading(ThrobberState::default())
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadingState::Loading(_))
    }
}

/// A point in time as seen by both the timers and the calendar
#[derive(Debug, Clone, Copy)]
pub struct Moment {
    pub instant: Instant,
    pub local: DateTime<Local>,
}

impl Moment {
    pub fn now() -> Self {
        Self {
            instant: Instant::now(),
            local: Local::now(),
        }
    }

    pub fn after(&self, elapsed: Duration) -> Self {
        Self {
            instant: self.instant + elapsed,
            local: self.local + TimeDelta::from_std(elapsed).unwrap_or_default(),
        }
    }
}

/// Number of animation ticks the list border flashes after fresh data arrived
pub const LAYOUT_TRANSITION_TICKS: u8 = 6;

/// Share of a viewport left below the selection at which the next page is requested
pub const LOAD_MORE_THRESHOLD: f32 = 0.3;

#[derive(Debug)]
pub struct HomeState {
    /// Ledger picked in the tab row, applied immediately
    pub active_ledger: Option<Ledger>,
    /// Ledger whose postings are shown; follows `active_ledger` once the debounce fires
    pub settled_ledger: Option<Ledger>,
    pub debouncer: Debouncer<Ledger>,

    pub sections: Vec<Section>,
    pub loading: LoadingState,
    pub accounts_loading: LoadingState,

    /// Latest first-page request; only its answer may update the list
    pub latest_request: Option<(AccountId, u64)>,
    /// Outstanding load-more request
    pub more_request: Option<u64>,
    next_request_id: u64,

    pub scroll: ScrollState,
    pub geometry: ScrollGeometry,
    pub units_per_row: f32,
    /// Index of the selected posting across all sections
    pub selected: Option<usize>,
    pub table_state: RefCell<TableState>,
    /// Rows the list occupied in the last frame
    pub viewport_rows: Cell<u16>,
    pub layout_transition: u8,

    pub labels: SectionLabels,
}

impl HomeState {
    pub fn new(debounce: Duration) -> Self {
        Self {
            active_ledger: None,
            settled_ledger: None,
            debouncer: Debouncer::new(debounce),
            sections: Vec::new(),
            loading: LoadingState::default(),
            accounts_loading: LoadingState::default(),
            latest_request: None,
            more_request: None,
            next_request_id: 0,
            scroll: ScrollState::default(),
            geometry: ScrollGeometry::default(),
            units_per_row: 25.0,
            selected: None,
            table_state: RefCell::default(),
            viewport_rows: Cell::new(0),
            layout_transition: 0,
            labels: SectionLabels::default(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            geometry: settings.home.geometry.clone(),
            units_per_row: settings.home.units_per_row,
            labels: settings.labels.clone(),
            ..Self::new(settings.home.debounce())
        }
    }

    pub fn allocate_request_id(&mut self) -> u64 {
        self.next_request_id += 1;
        self.next_request_id
    }

    pub fn posting_count(&self) -> usize {
        self.sections.iter().map(|s| s.postings.len()).sum()
    }

    pub fn postings(&self) -> impl Iterator<Item = &Posting> {
        self.sections.iter().flat_map(|s| s.postings.iter())
    }

    pub fn selected_posting(&self) -> Option<&Posting> {
        self.selected.and_then(|i| self.postings().nth(i))
    }

    /// The list reacts to scrolling only with data on screen and no load running
    pub fn is_list_interactive(&self) -> bool {
        self.settled_ledger.is_some() && !self.sections.is_empty() && !self.loading.is_loading()
    }

    /// The selection is within the load-more threshold of the end of the list
    pub fn is_near_end(&self) -> bool {
        let count = self.posting_count();
        let Some(selected) = self.selected else {
            return false;
        };
        let remaining = count.saturating_sub(selected + 1);
        remaining as f32 <= LOAD_MORE_THRESHOLD * f32::from(self.viewport_rows.get())
    }

    /// Rebuild the day sections from the store's postings for the settled ledger
    pub fn regroup(&mut self, store: &UserState, now: &DateTime<Local>) {
        let postings = self
            .settled_ledger
            .as_ref()
            .and_then(|ledger| store.postings(&ledger.account))
            .map(|p| p.transactions.as_slice());
        self.sections = group_by_day(postings, now, &self.labels);

        let count = self.posting_count();
        self.selected = match self.selected {
            _ if count == 0 => None,
            Some(i) => Some(i.min(count - 1)),
            None => None,
        };
    }

    /// Collapse the header onto the postings and select the newest one
    pub fn focus_transactions(&mut self) {
        if self.sections.is_empty() {
            return;
        }
        self.scroll.snap_to(SnapPoint::Transactions);
        self.selected = Some(0);
        self.table_state.borrow_mut().select(Some(0));
    }
}

impl Default for HomeState {
    fn default() -> Self {
        Self::new(Duration::from_millis(400))
    }
}

/// Recipient picker opened from the home screen's send action
#[derive(Debug, Clone, PartialEq)]
pub struct RecipientState {
    pub ledger: Ledger,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailsState {
    pub posting: Posting,
    pub ledger: Ledger,
}

#[derive(Debug)]
pub struct AppState {
    pub history: Vec<Screen>,
    pub home: HomeState,

    pub store: UserStore,
    store_changes: watch::Receiver<u64>,

    // UI state
    pub help_visible: bool,

    // System
    pub should_quit: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_home(HomeState::default())
    }

    pub fn with_home(home: HomeState) -> Self {
        let store = UserStore::new();
        let store_changes = store.subscribe();
        Self {
            history: vec![Screen::Home],
            home,
            store,
            store_changes,
            help_visible: false,
            should_quit: false,
        }
    }

    /// Get the current screen (last in navigation stack)
    pub fn current_screen(&self) -> &Screen {
        self.history
            .last()
            .expect("Navigation stack should never be empty")
    }

    pub fn is_home(&self) -> bool {
        matches!(self.current_screen(), Screen::Home)
    }

    /// Navigate to a new screen (push to stack)
    pub fn navigate_to(&mut self, screen: Screen) {
        tracing::debug!(
            "Navigating to new screen, stack depth: {} -> {}",
            self.history.len(),
            self.history.len() + 1
        );
        self.history.push(screen);
    }

    /// Navigate back (pop from stack)
    /// Returns true if navigation succeeded, false if already at root
    pub fn navigate_back(&mut self) -> bool {
        if self.history.len() > 1 {
            tracing::debug!(
                "Navigating back, stack depth: {} -> {}",
                self.history.len(),
                self.history.len() - 1
            );
            self.history.pop();
            true
        } else {
            tracing::debug!("Cannot navigate back, already at root screen");
            false
        }
    }

    /// Whether the store changed since the last call; marks the change as seen
    pub fn take_store_change(&mut self) -> bool {
        match self.store_changes.has_changed() {
            Ok(true) => {
                let _ = self.store_changes.borrow_and_update();
                true
            }
            _ => false,
        }
    }

    pub fn loading_state(&mut self) -> Option<&mut ThrobberState> {
        if let LoadingState::Loading(ref mut throbber_state) = self.home.loading {
            return Some(throbber_state);
        }
        if let LoadingState::Loading(ref mut throbber_state) = self.home.accounts_loading {
            return Some(throbber_state);
        }
        None
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::UserAction;
    use pocket_api::endpoints::postings::PostingStatus;
    use rust_decimal::Decimal;

    fn ledger(id: &str) -> Ledger {
        Ledger {
            account: AccountId::from(id),
            title: id.to_string(),
            currency: "EUR".to_string(),
            available: Decimal::ZERO,
        }
    }

    fn posting(key: &str) -> Posting {
        Posting {
            action_key: key.to_string(),
            action: "Rent".to_string(),
            created: None,
            status: PostingStatus::Completed,
            currency: "EUR".to_string(),
            debit: Some(Decimal::new(90000, 2)),
            credit: None,
        }
    }

    #[test]
    fn regroup_reads_the_settled_ledger_only() {
        let mut store = UserStore::new();
        store.dispatch(UserAction::SetTransactions {
            account: AccountId::from("a"),
            postings: vec![posting("2024-06-15T08:00:00Z"), posting("2024-06-14T08:00:00Z")],
            next_page: false,
        });

        let mut home = HomeState::default();
        home.active_ledger = Some(ledger("a"));
        home.regroup(store.state(), &Local::now());
        assert!(home.sections.is_empty());

        home.settled_ledger = Some(ledger("a"));
        home.regroup(store.state(), &Local::now());
        assert_eq!(home.posting_count(), 2);
    }

    #[test]
    fn near_end_uses_a_share_of_the_viewport() {
        let mut store = UserStore::new();
        let postings = (0..10)
            .map(|i| posting(&format!("2024-06-{:02}T08:00:00Z", 20 - i)))
            .collect();
        store.dispatch(UserAction::SetTransactions {
            account: AccountId::from("a"),
            postings,
            next_page: true,
        });
        let mut home = HomeState::default();
        home.settled_ledger = Some(ledger("a"));
        home.regroup(store.state(), &Local::now());
        home.viewport_rows.set(10);

        home.selected = Some(5);
        assert!(!home.is_near_end());
        home.selected = Some(6);
        assert!(home.is_near_end());
    }

    #[test]
    fn store_changes_are_observed_once() {
        let mut state = AppState::new();
        assert!(!state.take_store_change());
        state.store.dispatch(UserAction::SetActiveLedger(ledger("a")));
        assert!(state.take_store_change());
        assert!(!state.take_store_change());
    }

    #[test]
    fn navigation_stack_never_pops_home() {
        let mut state = AppState::new();
        assert!(!state.navigate_back());
        assert!(state.is_home());
    }
}
