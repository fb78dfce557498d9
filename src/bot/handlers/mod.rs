//! Discord interaction handlers
//!
//! This module provides handlers for Discord interactions that are not commands
//! themselves, such as autocomplete.

/// Autocomplete handlers for bet amounts
pub mod autocomplete;
