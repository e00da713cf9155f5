#![deny(missing_docs)]

//! # hashgate-authz — Read-Authorization Engine
//!
//! Decides whether a request may read the object behind a PID. The
//! decision combines two sources, strictly in order:
//!
//! 1. the access policy embedded in the PID's system metadata — if it
//!    grants public read (or no metadata exists at all), access is
//!    granted locally and **no remote call is made**;
//! 2. otherwise, exactly one round trip to the coordinating node's
//!    `isAuthorized` endpoint, forwarding the caller's bearer token
//!    verbatim. No retries.
//!
//! ## Default-Open
//!
//! An object with no system metadata is treated as **publicly readable**.
//! This is a deliberate, security-relevant design choice inherited from
//! the store's semantics — missing metadata means open access, not
//! denial. See [`engine::is_public`].
//!
//! Every outcome — granted, denied, remote error — is a well-formed
//! [`ReadDecision`] value. Nothing here is thrown at the caller.

pub mod client;
pub mod config;
pub mod decision;
pub mod engine;

pub use client::{CnClient, CnError};
pub use config::{CnConfig, ConfigError};
pub use decision::ReadDecision;
pub use engine::{is_public, AuthzEngine};
