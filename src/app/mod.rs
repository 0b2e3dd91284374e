//! Binary-local application orchestration helpers.
//!
//! `main.rs` only parses arguments; this module wires config, logging and
//! the subcommands together.

pub(crate) mod check_mode;
pub(crate) mod entry;
pub(crate) mod init_flow;
pub(crate) mod logging;
pub(crate) mod present_mode;
