use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::RunOutcome;
use crate::domain::models::RunnerClientBox;

pub struct ActionsService {}

impl ActionsService {
    /// Consumes actions from the UI loop. Each run request is served by one
    /// spawned worker whose handle is kept so an abort can cancel the
    /// in-flight exchange on teardown.
    pub async fn start(
        runner_client: RunnerClientBox,
        event_tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        let runner_client_arc = Arc::new(runner_client);

        #[allow(unused_assignments)]
        let mut worker: JoinHandle<Result<()>> = tokio::spawn(async { Ok(()) });

        while let Some(action) = rx.recv().await {
            match action {
                Action::RunnerAbort() => {
                    worker.abort();
                }
                Action::RunnerRequest(job) => {
                    let client_worker = runner_client_arc.clone();
                    let worker_event_tx = event_tx.clone();
                    worker = tokio::spawn(async move {
                        let outcome = match client_worker.run(job).await {
                            Ok(text) => RunOutcome::success(text),
                            Err(err) => {
                                tracing::error!(error = ?err, "runner request failed");
                                RunOutcome::failure(&err)
                            }
                        };
                        worker_event_tx.send(Event::RunnerDone(outcome))?;
                        Ok(())
                    });
                }
            }
        }

        return Ok(());
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use anyhow::anyhow;
    use anyhow::bail;
    use async_trait::async_trait;
    use tokio::sync::mpsc;

    use super::*;
    use crate::domain::models::RunJob;
    use crate::domain::models::RunnerClient;
    use crate::domain::models::RunnerName;

    struct MockRunnerClient {
        run_fn: Box<dyn Fn(RunJob) -> Result<String> + Send + Sync>,
    }

    #[async_trait]
    impl RunnerClient for MockRunnerClient {
        fn name(&self) -> RunnerName {
            RunnerName::Http
        }

        async fn health_check(&self) -> Result<()> {
            Ok(())
        }

        async fn run(&self, job: RunJob) -> Result<String> {
            (self.run_fn)(job)
        }
    }

    struct StalledRunnerClient {}

    #[async_trait]
    impl RunnerClient for StalledRunnerClient {
        fn name(&self) -> RunnerName {
            RunnerName::Http
        }

        async fn health_check(&self) -> Result<()> {
            Ok(())
        }

        async fn run(&self, _job: RunJob) -> Result<String> {
            futures::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_abort_cancels_the_in_flight_worker() {
        let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();
        let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

        tokio::spawn(async move {
            ActionsService::start(Box::new(StalledRunnerClient {}), event_tx, &mut action_rx)
                .await
                .unwrap();
        });

        action_tx
            .send(Action::RunnerRequest(RunJob::default()))
            .unwrap();
        action_tx.send(Action::RunnerAbort()).unwrap();

        // The cancelled worker never settles, so no completion event may
        // arrive.
        let settled = tokio::time::timeout(Duration::from_millis(200), event_rx.recv()).await;
        assert!(settled.is_err());
    }

    #[tokio::test]
    async fn test_run_request_forwards_output() {
        let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();
        let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

        let runner_client = MockRunnerClient {
            run_fn: Box::new(|job| {
                assert_eq!(job.input, "20\n3");
                Ok("Quotient = 6".to_string())
            }),
        };

        tokio::spawn(async move {
            ActionsService::start(Box::new(runner_client), event_tx, &mut action_rx)
                .await
                .unwrap();
        });

        action_tx
            .send(Action::RunnerRequest(RunJob {
                code: "int main() {}".to_string(),
                input: "20\n3".to_string(),
            }))
            .unwrap();

        match event_rx.recv().await.unwrap() {
            Event::RunnerDone(outcome) => {
                assert_eq!(outcome.text, "Quotient = 6");
                assert!(!outcome.failure);
            }
            event => panic!("unexpected event: {event:?}"),
        }
    }

    #[tokio::test]
    async fn test_run_request_failure_collapses_to_one_message() {
        let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();
        let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

        let runner_client = MockRunnerClient {
            run_fn: Box::new(|_| Err(anyhow!("HTTP error! Status: 500"))),
        };

        tokio::spawn(async move {
            ActionsService::start(Box::new(runner_client), event_tx, &mut action_rx)
                .await
                .unwrap();
        });

        action_tx
            .send(Action::RunnerRequest(RunJob::default()))
            .unwrap();

        match event_rx.recv().await.unwrap() {
            Event::RunnerDone(outcome) => {
                assert_eq!(
                    outcome.text,
                    "Error: HTTP error! Status: 500. Make sure the server is running."
                );
                assert!(outcome.failure);
            }
            event => panic!("unexpected event: {event:?}"),
        }
    }

    #[tokio::test]
    async fn test_transport_failure_uses_thrown_message() {
        let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();
        let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

        let runner_client = MockRunnerClient {
            run_fn: Box::new(|_| bail!("connection refused")),
        };

        tokio::spawn(async move {
            ActionsService::start(Box::new(runner_client), event_tx, &mut action_rx)
                .await
                .unwrap();
        });

        action_tx
            .send(Action::RunnerRequest(RunJob::default()))
            .unwrap();

        match event_rx.recv().await.unwrap() {
            Event::RunnerDone(outcome) => {
                assert_eq!(
                    outcome.text,
                    "Error: connection refused. Make sure the server is running."
                );
            }
            event => panic!("unexpected event: {event:?}"),
        }
    }
}
