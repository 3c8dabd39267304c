//! Core business logic for Finora.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `category` - Income and expense categorization
//! - `budget` - Budget tracking, spending accrual, and pacing projections
//! - `goal` - Savings goals and contribution tracking
//! - `currency` - Multi-currency handling and exchange rates
//! - `tax` - Tax rates with date-bounded effectiveness
//! - `expense` - Expense records and aggregation
//!
//! Nothing here reads a clock or performs I/O: timestamps and "today"
//! dates are passed in by the caller, so every calculation is
//! deterministic under test.

pub mod budget;
pub mod category;
pub mod currency;
pub mod expense;
pub mod goal;
pub mod tax;
