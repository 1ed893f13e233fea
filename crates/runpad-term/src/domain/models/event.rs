use tui_textarea::Input;

use super::RunOutcome;

#[derive(Debug)]
pub enum Event {
    KeyboardCharInput(Input),
    KeyboardCTRLC,
    KeyboardCTRLN,
    KeyboardCTRLR,
    KeyboardCTRLT,
    KeyboardEsc,
    KeyboardPaste(String),
    KeyboardTab,
    RunnerDone(RunOutcome),
    UIFontLarger,
    UIFontSmaller,
    UIScrollDown,
    UIScrollUp,
    UITick,
}
