//! Port traits at the I/O seams.

pub mod catalog_port;
pub mod config_port;
pub mod exchange_port;
pub mod aggregator_port;
pub mod report_port;
