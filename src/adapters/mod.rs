//! Concrete adapter implementations for ports.

pub mod http;
pub mod csv_catalog_adapter;
pub mod file_config_adapter;
pub mod nse_adapter;
pub mod moneycontrol_adapter;
pub mod text_report;
pub mod json_report;
