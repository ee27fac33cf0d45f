//! Test helpers module
//!
//! This module provides utilities and helpers for testing the IdBot application.
//! It includes a recording messenger, a scripted transcoder, a mock Bot API
//! server and update builders.

#![allow(dead_code)]

pub mod messenger_mock;
pub mod telegram_mock;
pub mod test_context;
pub mod test_data;

pub use messenger_mock::*;
pub use telegram_mock::*;
pub use test_context::*;
pub use test_data::*;
