//! Test helpers module
//!
//! This module provides utilities and helpers for testing Housemate: a mock
//! Telegram Bot API, update builders and a seeded in-memory household.

#![allow(dead_code)]

pub mod household;
pub mod telegram_mock;
pub mod test_data;

pub use household::*;
pub use telegram_mock::*;
pub use test_data::*;
