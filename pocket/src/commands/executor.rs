use crate::events::{AppCommand, LoadRequest};
use crate::home::SnapPoint;
use crate::state::*;
use crate::store::UserAction;
use crate::ui::screens::Screen;
use pocket_api::endpoints::{accounts::Ledger, postings::Posting};

/// Execute a command against the state
///
/// Side effects are returned as [`LoadRequest`]s for the caller's handler to
/// carry out, so this function never touches the network itself.
pub fn execute_command(command: AppCommand, state: &mut AppState, now: &Moment) -> Vec<LoadRequest> {
    let mut requests = Vec::new();

    match command {
        AppCommand::SelectNext => {
            let home = &mut state.home;
            if home.is_list_interactive() {
                if home.scroll.target() == SnapPoint::Top {
                    // First step down collapses the header onto the list
                    home.focus_transactions();
                } else {
                    let last = home.posting_count().saturating_sub(1);
                    home.selected = Some(home.selected.map_or(0, |i| (i + 1).min(last)));
                }
                requests.extend(load_more_if_near_end(state));
            }
        }

        AppCommand::SelectPrevious => {
            let home = &mut state.home;
            if home.is_list_interactive() {
                match home.selected {
                    Some(i) if i > 0 => home.selected = Some(i - 1),
                    _ => home.scroll.snap_to(SnapPoint::Top),
                }
            }
        }

        AppCommand::NavigateToTop => {
            let home = &mut state.home;
            if home.is_list_interactive() {
                home.selected = Some(0);
                home.scroll.snap_to(SnapPoint::Top);
            }
        }

        AppCommand::NavigateToBottom => {
            let home = &mut state.home;
            if home.is_list_interactive() {
                home.selected = Some(home.posting_count().saturating_sub(1));
                home.scroll.snap_to(SnapPoint::Transactions);
                requests.extend(load_more_if_near_end(state));
            }
        }

        AppCommand::ChooseActiveLedger { index } => {
            if let Some(ledger) = state.store.state().accounts.get(index).cloned() {
                select_ledger(state, ledger, now);
            }
        }

        AppCommand::NextLedger | AppCommand::PreviousLedger => {
            let forward = matches!(command, AppCommand::NextLedger);
            let accounts = &state.store.state().accounts;
            let current = state
                .home
                .active_ledger
                .as_ref()
                .and_then(|active| accounts.iter().position(|l| l.account == active.account));
            let target = match current {
                Some(i) if forward => (i + 1).min(accounts.len().saturating_sub(1)),
                Some(i) => i.saturating_sub(1),
                None => 0,
            };
            if let Some(ledger) = accounts.get(target).cloned() {
                select_ledger(state, ledger, now);
            }
        }

        AppCommand::LoadAccounts { force_refresh } => {
            if !state.home.accounts_loading.is_loading() {
                state.home.accounts_loading = LoadingState::loading();
            }
            requests.push(LoadRequest::Accounts { force_refresh });
        }

        AppCommand::LoadMoreTransactions => {
            requests.extend(request_more(state));
        }

        AppCommand::Refresh => {
            state.home.accounts_loading = LoadingState::loading();
            requests.push(LoadRequest::Accounts {
                force_refresh: true,
            });
            requests.extend(request_first_page(state, true));
        }

        AppCommand::OpenTransaction => {
            let home = &state.home;
            if state.is_home() && home.is_list_interactive() {
                if let (Some(posting), Some(ledger)) =
                    (home.selected_posting(), home.settled_ledger.as_ref())
                {
                    let details = DetailsState {
                        posting: posting.clone(),
                        ledger: ledger.clone(),
                    };
                    state.navigate_to(Screen::TransactionDetails(Box::new(details)));
                }
            }
        }

        AppCommand::SendMoney => {
            if state.is_home() {
                if let Some(ledger) = state.home.active_ledger.clone() {
                    state.navigate_to(Screen::ChooseRecipient(RecipientState { ledger }));
                }
            }
        }

        AppCommand::NavigateBack => {
            if state.navigate_back() && state.is_home() {
                tracing::debug!("Home screen regained focus, reloading postings");
                requests.extend(request_first_page(state, true));
            }
        }

        AppCommand::ToggleHelp => {
            state.help_visible = !state.help_visible;
        }

        AppCommand::Quit => {
            state.should_quit = true;
        }
    }

    requests
}

/// Advance timers: release a debounced ledger selection and step the animations
pub fn on_tick(state: &mut AppState, now: &Moment) -> Vec<LoadRequest> {
    let mut requests = Vec::new();

    if let Some(ledger) = state.home.debouncer.poll(now.instant) {
        tracing::info!("Ledger selection settled on {}", ledger.account);
        let home = &mut state.home;
        home.settled_ledger = Some(ledger);
        home.more_request = None;
        home.regroup(state.store.state(), &now.local);
        requests.extend(request_first_page(state, false));
    }

    let home = &mut state.home;
    home.scroll.step(&home.geometry);
    home.layout_transition = home.layout_transition.saturating_sub(1);

    if let Some(throbber_state) = state.loading_state() {
        throbber_state.calc_next();
    }

    requests
}

/// Switch the active ledger immediately; the postings reload waits for the debounce
///
/// Coming back to the ledger the list already shows while a switch is staged
/// cancels the staged switch instead of reloading.
pub fn select_ledger(state: &mut AppState, ledger: Ledger, now: &Moment) {
    let home = &mut state.home;
    let is_settled = home
        .settled_ledger
        .as_ref()
        .is_some_and(|settled| settled.account == ledger.account);

    if home.debouncer.is_pending() {
        if home.active_ledger.as_ref() == Some(&ledger) {
            return;
        }
        if is_settled {
            tracing::debug!("Back on {} before the switch settled", ledger.account);
            home.debouncer.cancel();
            home.active_ledger = Some(ledger.clone());
            state.store.dispatch(UserAction::SetActiveLedger(ledger));
            return;
        }
    } else if is_settled {
        return;
    }

    tracing::debug!("Selecting ledger {}", ledger.account);
    home.active_ledger = Some(ledger.clone());
    home.debouncer.stage(ledger.clone(), now.instant);
    home.more_request = None;
    home.focus_transactions();
    state.store.dispatch(UserAction::SetActiveLedger(ledger));
}

/// Issue a first-page request for the settled ledger and show the spinner
fn request_first_page(state: &mut AppState, force_refresh: bool) -> Option<LoadRequest> {
    let ledger = state.home.settled_ledger.clone()?;
    let request_id = state.home.allocate_request_id();
    state.home.latest_request = Some((ledger.account.clone(), request_id));
    state.home.loading = LoadingState::loading();

    Some(LoadRequest::Postings {
        ledger,
        request_id,
        force_refresh,
    })
}

fn load_more_if_near_end(state: &mut AppState) -> Option<LoadRequest> {
    if state.home.is_near_end() {
        request_more(state)
    } else {
        None
    }
}

/// Request the page after the oldest loaded posting, if the server has one
fn request_more(state: &mut AppState) -> Option<LoadRequest> {
    let ledger = state.home.settled_ledger.clone()?;
    if state.home.more_request.is_some() || state.home.loading.is_loading() {
        return None;
    }

    let cached = state.store.state().postings(&ledger.account)?;
    if !cached.next_page {
        tracing::debug!("No further page for {}", ledger.account);
        return None;
    }
    let cursor = oldest_cursor(&cached.transactions)?;

    let request_id = state.home.allocate_request_id();
    state.home.more_request = Some(request_id);
    Some(LoadRequest::MorePostings {
        ledger,
        cursor,
        request_id,
    })
}

/// Action key of the oldest posting; undated postings fall back to list order
fn oldest_cursor(postings: &[Posting]) -> Option<String> {
    postings
        .iter()
        .filter_map(|p| p.action_time().map(|t| (t, p)))
        .min_by_key(|(t, _)| *t)
        .map(|(_, p)| p)
        .or_else(|| postings.last())
        .map(|p| p.action_key.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pocket_api::endpoints::{postings::PostingStatus, AccountId};
    use rust_decimal::Decimal;
    use std::time::Duration;

    fn ledger(id: &str) -> Ledger {
        Ledger {
            account: AccountId::from(id),
            title: id.to_string(),
            currency: "EUR".to_string(),
            available: Decimal::TEN,
        }
    }

    fn posting(key: &str) -> Posting {
        Posting {
            action_key: key.to_string(),
            action: "Transfer".to_string(),
            created: None,
            status: PostingStatus::Completed,
            currency: "EUR".to_string(),
            debit: Some(Decimal::ONE),
            credit: None,
        }
    }

    #[test]
    fn oldest_cursor_prefers_the_earliest_timestamp() {
        let postings = vec![
            posting("2024-06-10T08:00:00Z"),
            posting("2024-06-01T08:00:00Z"),
            posting("not a date"),
        ];
        assert_eq!(
            oldest_cursor(&postings).as_deref(),
            Some("2024-06-01T08:00:00Z")
        );
        assert_eq!(
            oldest_cursor(&[posting("x"), posting("y")]).as_deref(),
            Some("y")
        );
        assert_eq!(oldest_cursor(&[]), None);
    }

    #[test]
    fn debounced_selection_requests_the_first_page() {
        let now = Moment::now();
        let mut state = AppState::new();
        state
            .store
            .dispatch(UserAction::SetAccounts(vec![ledger("a"), ledger("b")]));

        let requests = execute_command(AppCommand::ChooseActiveLedger { index: 1 }, &mut state, &now);
        assert!(requests.is_empty());
        assert_eq!(state.home.active_ledger, Some(ledger("b")));
        assert_eq!(state.store.state().active_ledger, Some(ledger("b")));

        assert!(on_tick(&mut state, &now.after(Duration::from_millis(100))).is_empty());

        let requests = on_tick(&mut state, &now.after(Duration::from_millis(400)));
        assert_eq!(
            requests,
            vec![LoadRequest::Postings {
                ledger: ledger("b"),
                request_id: 1,
                force_refresh: false,
            }]
        );
        assert!(state.home.loading.is_loading());
        assert_eq!(state.home.settled_ledger, Some(ledger("b")));
    }

    #[test]
    fn returning_to_the_settled_ledger_cancels_the_staged_switch() {
        let now = Moment::now();
        let mut state = AppState::new();
        state
            .store
            .dispatch(UserAction::SetAccounts(vec![ledger("a"), ledger("b")]));
        state.home.settled_ledger = Some(ledger("a"));
        state.home.active_ledger = Some(ledger("a"));

        select_ledger(&mut state, ledger("b"), &now);
        assert!(state.home.debouncer.is_pending());

        select_ledger(&mut state, ledger("a"), &now);
        assert!(!state.home.debouncer.is_pending());
        assert_eq!(state.home.active_ledger, Some(ledger("a")));
        assert_eq!(state.store.state().active_ledger, Some(ledger("a")));
        assert!(on_tick(&mut state, &now.after(Duration::from_secs(1))).is_empty());
    }

    #[test]
    fn out_of_range_ledger_index_is_ignored() {
        let now = Moment::now();
        let mut state = AppState::new();
        state.store.dispatch(UserAction::SetAccounts(vec![ledger("a")]));
        execute_command(AppCommand::ChooseActiveLedger { index: 3 }, &mut state, &now);
        assert_eq!(state.home.active_ledger, None);
        assert!(!state.home.debouncer.is_pending());
    }

    #[test]
    fn send_money_opens_the_recipient_picker() {
        let now = Moment::now();
        let mut state = AppState::new();
        state.home.active_ledger = Some(ledger("a"));

        execute_command(AppCommand::SendMoney, &mut state, &now);
        assert_eq!(
            state.current_screen(),
            &Screen::ChooseRecipient(RecipientState { ledger: ledger("a") })
        );
    }

    #[test]
    fn tick_counts_down_the_layout_transition() {
        let now = Moment::now();
        let mut state = AppState::new();
        state.home.layout_transition = 2;
        on_tick(&mut state, &now);
        on_tick(&mut state, &now);
        on_tick(&mut state, &now);
        assert_eq!(state.home.layout_transition, 0);
    }
}
