//! Core infrastructure for rxtree.
//!
//! This crate provides the pieces shared by the AST crate and the CLI:
//! - Error types and exit codes
//! - Byte spans into pattern source
//! - JSON output types for CLI responses
//! - Configuration loading

pub mod config;
pub mod error;
pub mod output;
pub mod text;
