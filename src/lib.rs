//! Saldo - personal finance derivation engine
//!
//! This library turns the raw records of a personal finance backend
//! (expenses, incomes and savings goals, as returned by its REST API) into
//! the figures a dashboard shows: the net balance of a month, spending per
//! category, and how far each goal is from its linear pace.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Record snapshots and the period selector
//! - `services`: The derivation engine (filter, aggregate, balance, goals,
//!   search, sort) and bank SMS parsing
//! - `reports`: Report builders with terminal and CSV output
//! - `display`: Formatting helpers and record tables
//! - `snapshot`: JSON snapshot loading
//! - `cli`: Command handlers for the `saldo` binary
//!
//! # Example
//!
//! ```rust
//! use saldo::models::{Expense, Income, PeriodSelector};
//! use saldo::services::compute_summary_in;
//!
//! let expenses = vec![Expense::new(1, 100.0, "2024-03-05T12:00:00", None)];
//! let incomes = vec![Income::new(1, 500.0, "2024-03-10T12:00:00", None)];
//! let march = PeriodSelector::new(2, 2024).unwrap();
//!
//! let summary = compute_summary_in(&expenses, &incomes, march, &chrono::Utc);
//! assert_eq!(summary.net_balance, 400.0);
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod snapshot;

pub use error::{SaldoError, SaldoResult};
