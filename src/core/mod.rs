//! Core application modules
//!
//! This module contains configuration, constants, logging, identity
//! verification, key lookup and the provider adapters.

pub mod client;
pub mod config;
pub mod constants;
pub mod identity;
pub mod keys;
pub mod logging;
pub mod provider;
pub mod providers;

#[cfg(test)]
pub mod test_support;
