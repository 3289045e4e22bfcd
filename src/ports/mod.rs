//! Port traits at the edges of the indicator engine.

pub mod config_port;
pub mod data_port;
pub mod sink_port;
