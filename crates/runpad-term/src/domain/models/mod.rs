mod action;
mod defaults;
mod event;
mod preferences;
mod runner;

pub use action::*;
pub use defaults::*;
pub use event::*;
pub use preferences::*;
pub use runner::*;
