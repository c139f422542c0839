use super::{AppState, LoadingState, Moment, LAYOUT_TRANSITION_TICKS};
use crate::commands::executor;
use crate::events::{DataEvent, LoadRequest};
use crate::store::UserAction;
use pocket_api::endpoints::AccountId;

/// State transition for data events coming back from background tasks
///
/// Returns follow-up loads; none of the current events need one, but choosing
/// the initial ledger goes through the same path as a user selection.
pub fn reduce_data_event(state: &mut AppState, event: DataEvent, now: &Moment) -> Vec<LoadRequest> {
    match event {
        DataEvent::AccountsCacheLoaded { accounts } => {
            state.store.dispatch(UserAction::SetAccounts(accounts));
            ensure_ledger_selected(state, now);
        }

        DataEvent::AccountsLoaded { accounts } => {
            state.store.dispatch(UserAction::SetAccounts(accounts));
            state.home.accounts_loading = LoadingState::Loaded;
            ensure_ledger_selected(state, now);
        }

        DataEvent::AccountsLoadFailed { error } => {
            tracing::warn!("Accounts could not be loaded: {}", error);
            state.home.accounts_loading = LoadingState::Error(error);
        }

        DataEvent::PostingsCacheLoaded {
            ledger,
            request_id,
            postings,
            next_page,
        } => {
            // Disk cache only fills a gap; never override what is already in memory
            if state.store.state().postings(&ledger.account).is_none() {
                tracing::debug!(
                    "Painting {} cached postings for {} (request {})",
                    postings.len(),
                    ledger.account,
                    request_id
                );
                state.store.dispatch(UserAction::SetTransactions {
                    account: ledger.account,
                    postings,
                    next_page,
                });
            }
        }

        DataEvent::PostingsLoaded {
            ledger,
            request_id,
            page,
        } => {
            let accepted = is_latest_request(state, &ledger.account, request_id);
            if !accepted && is_pending_for(state, &ledger.account) {
                tracing::debug!(
                    "Dropping superseded postings response {} for {}",
                    request_id,
                    ledger.account
                );
                return Vec::new();
            }

            let differs = state
                .store
                .state()
                .postings(&ledger.account)
                .is_none_or(|cached| cached.transactions != page.postings);
            let next_page = page.has_next_page();
            let has_postings = !page.postings.is_empty();
            state.store.dispatch(UserAction::SetTransactions {
                account: ledger.account,
                postings: page.postings,
                next_page,
            });

            if !accepted {
                // Cached for its ledger, but the view belongs to another one now
                return Vec::new();
            }

            let home = &mut state.home;
            home.loading = LoadingState::Loaded;
            if differs && has_postings {
                home.layout_transition = LAYOUT_TRANSITION_TICKS;
            }
            home.regroup(state.store.state(), &now.local);
            home.focus_transactions();
        }

        DataEvent::MorePostingsLoaded {
            ledger,
            request_id,
            page,
        } => {
            if state.home.more_request == Some(request_id) {
                state.home.more_request = None;
            }
            let next_page = page.has_next_page();
            state.store.dispatch(UserAction::AppendTransactions {
                account: ledger.account,
                postings: page.postings,
                next_page,
            });
        }

        DataEvent::PostingsLoadFailed {
            ledger,
            request_id,
            more,
            error,
        } => {
            if more {
                if state.home.more_request == Some(request_id) {
                    state.home.more_request = None;
                }
            } else if is_latest_request(state, &ledger.account, request_id) {
                // Keep whatever is on screen, just stop the spinner
                state.home.loading = LoadingState::Error(error);
            }
        }
    }

    Vec::new()
}

/// Bring the home screen in line with the store after any change to it
///
/// Covers updates the screen did not cause itself. A fresher copy of the
/// current ledger (say a periodic refresh reporting a new balance) replaces
/// the local copy without fetching anything; another screen picking a
/// different ledger is followed like a tab change, through the debounce.
pub fn on_store_changed(state: &mut AppState, now: &Moment) {
    if let Some(ledger) = state.store.state().active_ledger.clone() {
        let local = state.home.active_ledger.clone();
        if local.as_ref().is_none_or(|active| active.account != ledger.account) {
            tracing::debug!("Store switched the active ledger to {}", ledger.account);
            executor::select_ledger(state, ledger, now);
        } else if local.as_ref() != Some(&ledger) {
            tracing::debug!("Active ledger changed in store, replacing local copy");
            state.home.active_ledger = Some(ledger);
        }
    }

    let store = state.store.state();
    let home = &mut state.home;

    if let Some(settled) = home.settled_ledger.as_mut() {
        if let Some(fresh) = store.accounts.iter().find(|l| l.account == settled.account) {
            if fresh != settled {
                *settled = fresh.clone();
            }
        }
    }

    home.regroup(store, &now.local);
}

fn is_latest_request(state: &AppState, account: &AccountId, request_id: u64) -> bool {
    matches!(&state.home.latest_request, Some((latest, id)) if latest == account && *id == request_id)
}

fn is_pending_for(state: &AppState, account: &AccountId) -> bool {
    matches!(&state.home.latest_request, Some((latest, _)) if latest == account)
}

/// Pick the first ledger when nothing (or a ledger that no longer exists) is selected
fn ensure_ledger_selected(state: &mut AppState, now: &Moment) {
    let accounts = &state.store.state().accounts;
    let still_present = state
        .home
        .active_ledger
        .as_ref()
        .is_some_and(|active| accounts.iter().any(|l| l.account == active.account));
    if still_present {
        return;
    }

    if let Some(first) = accounts.first().cloned() {
        executor::select_ledger(state, first, now);
    }
}
