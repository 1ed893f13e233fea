pub mod http;

use anyhow::Result;

use crate::domain::models::RunnerClientBox;
use crate::domain::models::RunnerName;

pub struct RunnerManager {}

impl RunnerManager {
    pub fn get(name: RunnerName) -> Result<RunnerClientBox> {
        match name {
            RunnerName::Http => return Ok(Box::<http::HttpRunner>::default()),
        }
    }
}
