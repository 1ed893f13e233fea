use anyhow::Result;
use async_trait::async_trait;
use strum_macros::Display;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum RunnerName {
    #[default]
    Http,
}

/// A single execution job: the source text plus the stdin to feed it.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunJob {
    pub code: String,
    pub input: String,
}

/// What the output pane shows once an exchange settles.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub text: String,
    pub failure: bool,
}

impl RunOutcome {
    pub fn success(text: String) -> RunOutcome {
        return RunOutcome {
            text,
            failure: false,
        };
    }

    /// Transport failures, error statuses, and parse failures all collapse
    /// into this one user-visible message.
    pub fn failure(err: &anyhow::Error) -> RunOutcome {
        return RunOutcome {
            text: format!("Error: {err}. Make sure the server is running."),
            failure: true,
        };
    }
}

#[async_trait]
pub trait RunnerClient: Send + Sync {
    fn name(&self) -> RunnerName;
    async fn health_check(&self) -> Result<()>;
    async fn run(&self, job: RunJob) -> Result<String>;
}

pub type RunnerClientBox = Box<dyn RunnerClient>;
