//! Core domain types and logic.

pub mod error;
pub mod lookup;
pub mod symbol;
pub mod catalog;
pub mod security;
pub mod payload;
pub mod classify;
pub mod pipeline;
pub mod settings;
pub mod report;
