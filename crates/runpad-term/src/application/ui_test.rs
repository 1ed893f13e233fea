use anyhow::Result;
use async_trait::async_trait;
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use tokio::sync::mpsc;

use super::run_loop;
use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::PreferenceStore;
use crate::domain::models::Preferences;
use crate::domain::models::RunJob;
use crate::domain::models::RunnerClient;
use crate::domain::models::RunnerName;
use crate::domain::services::AppState;
use crate::domain::services::AppStateProps;
use crate::domain::services::EventsService;

struct StubRunner {}

#[async_trait]
impl RunnerClient for StubRunner {
    fn name(&self) -> RunnerName {
        RunnerName::Http
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }

    async fn run(&self, _job: RunJob) -> Result<String> {
        Ok(String::new())
    }
}

struct StubStore {}

#[async_trait]
impl PreferenceStore for StubStore {
    async fn load(&self) -> Result<Preferences> {
        Ok(Preferences::default())
    }

    async fn save(&self, _preferences: &Preferences) -> Result<()> {
        Ok(())
    }
}

async fn stub_state() -> AppState<'static> {
    AppState::new(AppStateProps {
        runner_client: Box::new(StubRunner {}),
        preferences: Box::new(StubStore {}),
    })
    .await
    .unwrap()
}

#[tokio::test]
async fn test_quit_aborts_in_flight_exchange() {
    let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
    let mut app_state = stub_state().await;
    app_state.waiting_for_runner = true;

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let (event_tx, event_rx) = mpsc::unbounded_channel::<Event>();
    let mut events_service = EventsService::new(event_rx);

    event_tx.send(Event::KeyboardCTRLC).unwrap();

    run_loop(
        &mut terminal,
        &mut app_state,
        &mut events_service,
        &action_tx,
    )
    .await
    .unwrap();

    assert!(matches!(action_rx.try_recv(), Ok(Action::RunnerAbort())));
}

#[tokio::test]
async fn test_loop_returns_for_teardown_when_actions_channel_closes() {
    let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
    let mut app_state = stub_state().await;

    let (action_tx, action_rx) = mpsc::unbounded_channel::<Action>();
    drop(action_rx);
    let (event_tx, event_rx) = mpsc::unbounded_channel::<Event>();
    let mut events_service = EventsService::new(event_rx);

    // A run trigger must send on the closed channel and surface the error
    // to the caller, where the terminal teardown runs.
    event_tx.send(Event::KeyboardCTRLR).unwrap();

    let res = run_loop(
        &mut terminal,
        &mut app_state,
        &mut events_service,
        &action_tx,
    )
    .await;

    assert!(res.is_err());
}
