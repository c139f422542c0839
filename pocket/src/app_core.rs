use crate::commands::{executor, handlers};
use crate::events::{AppCommand, DataEvent, LoadRequest};
use crate::input::KeyEvent;
use crate::state::{reducer, AppState, Moment};
use crate::store::UserAction;
use std::time::Instant;

/// Carries out load requests (production = background tasks, test = recorder)
///
/// This trait abstracts the side effects of the controller, allowing tests to
/// inject a handler that doesn't spawn tasks or make API calls.
pub trait DataEventHandler {
    fn handle_request(&mut self, request: LoadRequest);
}

/// Testable application core without terminal dependencies
///
/// Generic over H (handler). Every entry point runs the controller, hands the
/// resulting requests to the handler and then lets the screen catch up with
/// any store change.
pub struct AppCore<H: DataEventHandler> {
    ui_state: AppState,
    handler: H,
}

impl<H: DataEventHandler> AppCore<H> {
    pub fn new(handler: H) -> Self {
        Self::with_state(AppState::new(), handler)
    }

    pub fn with_state(ui_state: AppState, handler: H) -> Self {
        Self { ui_state, handler }
    }

    /// Handle keyboard input and execute the resulting command
    pub fn handle_key(&mut self, event: KeyEvent) {
        self.handle_key_at(event, Moment::now());
    }

    pub fn handle_key_at(&mut self, event: KeyEvent, now: Moment) {
        if let Some(command) = handlers::handle_key_input(event, &self.ui_state) {
            tracing::debug!("Executing command: {:?}", command);
            self.execute(command, now);
        }
    }

    /// Execute a command that did not come from a key press (startup, timers)
    pub fn execute(&mut self, command: AppCommand, now: Moment) {
        let requests = executor::execute_command(command, &mut self.ui_state, &now);
        self.dispatch(requests, &now);
    }

    /// Handle a data event (async results, or injected by tests)
    pub fn handle_data_event(&mut self, event: DataEvent) {
        self.handle_data_event_at(event, Moment::now());
    }

    pub fn handle_data_event_at(&mut self, event: DataEvent, now: Moment) {
        let requests = reducer::reduce_data_event(&mut self.ui_state, event, &now);
        self.dispatch(requests, &now);
    }

    /// Write to the store from outside the home screen (other screens, periodic jobs)
    pub fn update_store(&mut self, action: UserAction, now: Moment) {
        self.ui_state.store.dispatch(action);
        self.sync_store(&now);
    }

    /// Advance the debounce and the animations
    pub fn tick(&mut self, now: Moment) {
        let requests = executor::on_tick(&mut self.ui_state, &now);
        self.dispatch(requests, &now);
    }

    /// Earliest instant at which [`AppCore::tick`] has pending work besides animating
    pub fn next_deadline(&self) -> Option<Instant> {
        self.ui_state.home.debouncer.deadline()
    }

    fn dispatch(&mut self, requests: Vec<LoadRequest>, now: &Moment) {
        for request in requests {
            self.handler.handle_request(request);
        }
        self.sync_store(now);
    }

    fn sync_store(&mut self, now: &Moment) {
        if self.ui_state.take_store_change() {
            reducer::on_store_changed(&mut self.ui_state, now);
        }
    }

    /// Get read-only access to the current UI state (for rendering or assertions)
    pub fn state(&self) -> &AppState {
        &self.ui_state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.ui_state
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    /// Check if the application should quit
    pub fn should_quit(&self) -> bool {
        self.ui_state.should_quit
    }
}
