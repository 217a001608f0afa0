//! Shared building blocks for the zonecal crates: protocol constants, the
//! core error type and layered configuration.

pub mod config;
pub mod constants;
pub mod error;
