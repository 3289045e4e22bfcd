//! Concrete adapter implementations for ports.

pub mod csv_adapter;
pub mod csv_sink;
pub mod file_config_adapter;
