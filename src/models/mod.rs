//! API data models
//!
//! This module contains the inbound mentor bodies and the wire formats of
//! the two upstream providers.

pub mod anthropic;
pub mod mentor;
pub mod openai;
