//! Satker Processor
//!
//! Lapisan presentasi (CLI & sesi interaktif) di atas pipeline satker_common.

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod interactive;
pub mod progress;
pub mod reader;
pub mod session;
