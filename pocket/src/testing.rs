use crate::app_core::{AppCore, DataEventHandler};
use crate::events::{AppCommand, DataEvent, LoadRequest};
use crate::input::{Key, KeyEvent};
use crate::state::{AppState, Moment};
use crate::store::UserAction;
use crate::ui::screens::Screen;
use std::time::Duration;

/// Data handler for tests: records requests instead of spawning tasks
#[derive(Debug, Default)]
pub struct RecordingHandler {
    pub requests: Vec<LoadRequest>,
}

impl RecordingHandler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DataEventHandler for RecordingHandler {
    fn handle_request(&mut self, request: LoadRequest) {
        self.requests.push(request);
    }
}

/// Application core driven by a manual clock
///
/// Time only moves when the test calls [`TestApp::advance`], so debounce
/// behaviour is deterministic.
pub struct TestApp {
    core: AppCore<RecordingHandler>,
    now: Moment,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_state(AppState::new())
    }

    pub fn with_state(state: AppState) -> Self {
        Self {
            core: AppCore::with_state(state, RecordingHandler::new()),
            now: Moment::now(),
        }
    }

    pub fn now(&self) -> Moment {
        self.now
    }

    /// Send a single key event
    pub fn send_key(&mut self, key: Key) {
        self.core.handle_key_at(KeyEvent::new(key), self.now);
    }

    /// Send a key event with modifiers
    pub fn send_key_event(&mut self, event: KeyEvent) {
        self.core.handle_key_at(event, self.now);
    }

    /// Send multiple keys in sequence
    pub fn send_keys(&mut self, keys: &[Key]) {
        for key in keys {
            self.send_key(*key);
        }
    }

    pub fn execute(&mut self, command: AppCommand) {
        self.core.execute(command, self.now);
    }

    /// Inject a data event (simulate API response or cache load)
    pub fn send_data_event(&mut self, event: DataEvent) {
        self.core.handle_data_event_at(event, self.now);
    }

    /// Write to the store the way another screen would
    pub fn update_store(&mut self, action: UserAction) {
        self.core.update_store(action, self.now);
    }

    /// Move the clock forward and run one tick
    pub fn advance(&mut self, elapsed: Duration) {
        self.now = self.now.after(elapsed);
        self.core.tick(self.now);
    }

    /// Tick until the scroll animation has settled
    pub fn settle_animation(&mut self) {
        for _ in 0..100 {
            if self.state().home.scroll.is_settled(&self.state().home.geometry) {
                return;
            }
            self.advance(Duration::from_millis(50));
        }
    }

    /// Get read-only access to current state
    pub fn state(&self) -> &AppState {
        self.core.state()
    }

    /// Every load request issued so far
    pub fn requests(&self) -> &[LoadRequest] {
        &self.core.handler().requests
    }

    /// Take the requests issued so far, leaving the record empty
    pub fn take_requests(&mut self) -> Vec<LoadRequest> {
        std::mem::take(&mut self.core.handler_mut().requests)
    }

    /// Assert that the app is on a specific screen type
    ///
    /// Uses discriminant comparison to check screen type without
    /// requiring full equality of state.
    pub fn assert_screen_type(&self, expected_discriminant: std::mem::Discriminant<Screen>) {
        let current = self.state().current_screen();
        assert_eq!(
            std::mem::discriminant(current),
            expected_discriminant,
            "Expected different screen. Current: {:?}",
            current
        );
    }

    /// Assert that the app should quit
    pub fn assert_should_quit(&self) {
        assert!(
            self.core.should_quit(),
            "App should be marked for quit but is not"
        );
    }

    /// Assert that the app should NOT quit
    pub fn assert_not_quit(&self) {
        assert!(
            !self.core.should_quit(),
            "App should NOT be marked for quit but is"
        );
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}
