//! Core domain types and logic.

pub mod bar;
pub mod indicator;
pub mod indicator_helpers;
pub mod engine;
pub mod rolling;
pub mod config_validation;
pub mod error;
