//! fintrack - Personal finance tracking from the command line
//!
//! Tracks incomes, expenses, subscriptions and budgets in local JSON
//! files. The heart of the crate is the funding engine: income is
//! earmarked to budgets through dated allocation records, budgets
//! derive a funding status from their funded, spent and target
//! amounts, and every mutation keeps the income and budget sides of
//! the ledger in balance.
//!
//! # Architecture
//!
//! - `config`: Data directory resolution
//! - `error`: Custom error types
//! - `models`: Core data models (incomes, expenses, budgets, ...)
//! - `storage`: JSON file storage layer
//! - `services`: Business logic, including the funding engine
//! - `export`: Full-dataset interchange in JSON and YAML
//! - `cli`: clap command handlers

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{FintrackError, FintrackResult};
