//! # hashgate-cli — Operator Tooling for the Hashstore Gateway
//!
//! Subcommand implementations live here so they can be tested without
//! spawning the binary; `main.rs` only parses arguments and dispatches.
//!
//! Every command prints its result to stdout (JSON for structured
//! output, raw XML for sysmeta) and returns a process exit code.

pub mod authorize;
pub mod resolve;
pub mod sysmeta;
