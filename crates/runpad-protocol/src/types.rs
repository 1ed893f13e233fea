//! Core types for the runner wire protocol.

use serde::{Deserialize, Serialize};

/// A request to execute a program on the runner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRequest {
    /// The source text to compile and run.
    pub code: String,
    /// Text fed to the program's standard input.
    pub input: String,
}

impl RunRequest {
    pub fn new(code: String, input: String) -> Self {
        Self { code, input }
    }
}

/// The runner's response to a [`RunRequest`].
///
/// Runners may attach additional fields (timings, exit codes, diagnostics);
/// clients are required to ignore anything they do not recognize, so this
/// struct deserializes leniently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResponse {
    /// Captured output of the executed program. Absent when the runner
    /// produced nothing to show.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

impl RunResponse {
    pub fn with_output(output: String) -> Self {
        Self {
            output: Some(output),
        }
    }
}
