//! Terminal presentation for the geocoin CLI
//!
//! Uses `cliclack` for prompts and log lines when attached to a terminal,
//! and falls back to plain bracketed output in scripts and CI.

mod context;
mod output;
mod progress;
mod prompts;

pub use context::UiContext;
pub use output::{
    intro, key_value, note, outro_success, outro_warn, remark, section, step_info, step_ok,
    step_warn, step_warn_hint,
};
pub use progress::WalkProgress;
pub use prompts::confirm;
