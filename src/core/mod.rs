//! Core types shared by every command
//!
//! - [`error`]: Error type, `Result` alias and user-facing translations

pub mod error;
