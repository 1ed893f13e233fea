use super::RunJob;

#[derive(Debug, Clone)]
pub enum Action {
    RunnerAbort(),
    RunnerRequest(RunJob),
}
