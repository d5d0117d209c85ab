//! Integration tests for tickpulse-bot.
//!
//! These tests verify the interaction between components:
//! - Feed connection lifecycle against a mock feed
//! - Tick flow from the socket to published events

pub mod common;
