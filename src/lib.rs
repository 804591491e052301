//! The OpenDrive CLI client library.
//!
//! This crate provides the session handling, file operations and upload
//! logic behind the `odcli` binary.
//!
//! # Modules
//!
//! - `actions`: Execution of parsed CLI commands
//! - `commands`: CLI command parsing
//! - `configuration`: Configuration file loading and credential resolution
//! - `file_ops`: File operations on an authenticated session
//! - `http_utils`: HTTP transport and request configuration
//! - `logging`: Leveled console logging
//! - `model`: Request payloads, response documents and value types
//! - `session`: Login, logout and session liveness
//! - `upload`: Checksums and file upload

pub mod actions;
pub mod commands;
pub mod configuration;
pub mod error;
pub mod exit_codes;
pub mod file_ops;
pub mod http_utils;
pub mod logging;
pub mod model;
pub mod session;
pub mod upload;
