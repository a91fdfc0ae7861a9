// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jd-handlers: Command handlers for the jobdrop polling daemon
//!
//! The [`Handler`] trait is the contract between the daemon loop and the
//! code that executes one command; [`HandlerRegistry`] is the startup-time
//! mapping from command name to handler.

pub mod decon;
pub mod handler;

pub use decon::{DeconConfig, DeconHandler};
pub use handler::{Handler, HandlerError, HandlerRegistry};
