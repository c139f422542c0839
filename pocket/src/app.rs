use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::sync::Arc;
use std::time::Duration;

use crate::app_core::{AppCore, DataEventHandler};
use crate::background::{data_loader::DataLoader, BackgroundTaskManager};
use crate::cache::Cache;
use crate::commands::AppCommand;
use crate::error::{AppError, Result};
use crate::events::LoadRequest;
use crate::input::KeyEvent;
use crate::settings::Settings;
use crate::state::{AppState, HomeState, Moment};
use pocket_api::Client;

/// Animation frame period
const FRAME: Duration = Duration::from_millis(50);

/// Runs load requests as background tasks feeding the data channel
pub struct LiveHandler {
    task_manager: BackgroundTaskManager,
    data_loader: DataLoader,
}

impl DataEventHandler for LiveHandler {
    fn handle_request(&mut self, request: LoadRequest) {
        tracing::debug!("Spawning load task for {:?}", request);
        let task_id = request.task_id();
        let data_loader = self.data_loader.clone();
        let future = async move {
            match request {
                LoadRequest::Accounts { force_refresh } => {
                    data_loader.load_accounts(force_refresh).await
                }
                LoadRequest::Postings {
                    ledger,
                    request_id,
                    force_refresh,
                } => {
                    data_loader
                        .load_postings(ledger, request_id, force_refresh)
                        .await
                }
                LoadRequest::MorePostings {
                    ledger,
                    cursor,
                    request_id,
                } => {
                    data_loader
                        .load_more_postings(ledger, cursor, request_id)
                        .await
                }
            }
        };

        self.task_manager.spawn_load_task(task_id, future);
    }
}

pub struct App {
    settings: Settings,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub async fn run(&self) -> Result<()> {
        tracing::info!("pocket starting");

        let token = self
            .settings
            .api
            .token
            .as_ref()
            .ok_or_else(|| AppError::InvalidConfig("api.token is required".to_string()))?;
        let api_client = Arc::new(Client::new(&self.settings.api.base_url, token));
        let cache = Arc::new(Cache::new().await?);

        let (data_tx, mut data_rx) = tokio::sync::mpsc::unbounded_channel();
        let data_loader = DataLoader::new(api_client, cache, data_tx, self.settings.home.page_size);
        let handler = LiveHandler {
            task_manager: BackgroundTaskManager::new(),
            data_loader,
        };

        let ui_state = AppState::with_home(HomeState::from_settings(&self.settings));
        let mut core = AppCore::with_state(ui_state, handler);

        let mut terminal = self.init()?;
        let result = self.event_loop(&mut terminal, &mut core, &mut data_rx).await;

        tracing::info!("Cleaning up application");
        core.handler_mut().task_manager.cancel_all();
        self.exit(terminal)?;

        result
    }

    async fn event_loop(
        &self,
        terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
        core: &mut AppCore<LiveHandler>,
        data_rx: &mut tokio::sync::mpsc::UnboundedReceiver<crate::events::DataEvent>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        tracing::info!("Loading accounts");
        core.execute(AppCommand::LoadAccounts { force_refresh: false }, Moment::now());

        let mut frames = tokio::time::interval(FRAME);
        let refresh_period = self.settings.refresh.accounts_interval();
        // Disabled refresh still needs a timer for select!, it just never fires
        let mut refresh = tokio::time::interval(refresh_period.unwrap_or(Duration::from_secs(3600)));
        refresh.tick().await;

        tracing::info!("Entering main event loop");
        loop {
            terminal.draw(|f| crate::ui::render_app(f, core.state()))?;

            let debounce_deadline = core.next_deadline();
            tokio::select! {
                _ = frames.tick() => {
                    core.tick(Moment::now());
                }
                _ = async {
                    match debounce_deadline {
                        Some(deadline) => tokio::time::sleep_until(deadline.into()).await,
                        None => std::future::pending().await,
                    }
                } => {
                    core.tick(Moment::now());
                }
                _ = refresh.tick(), if refresh_period.is_some() => {
                    tracing::debug!("Periodic account refresh");
                    core.execute(AppCommand::LoadAccounts { force_refresh: true }, Moment::now());
                }
                Some(Ok(event)) = event_stream.next() => {
                    if let Event::Key(key) = event {
                        if key.kind == KeyEventKind::Press {
                            tracing::debug!("Key press: {:?}", key);
                            core.handle_key(KeyEvent::from(key));
                        }
                    }
                }
                Some(data_event) = data_rx.recv() => {
                    tracing::debug!("Received data event: {:?}", data_event);
                    core.handle_data_event(data_event);
                }
            }

            if core.should_quit() {
                tracing::info!("Quit requested, exiting event loop");
                return Ok(());
            }
        }
    }

    fn init(&self) -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        Ok(Terminal::new(backend)?)
    }

    fn exit(&self, mut terminal: Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        Ok(())
    }
}
