//! Core business rules for ShiftPay.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `allowance` - Entry types and the allowance rule table
//! - `calendar` - Month keys, the edit window and month locks
//! - `entry` - Validation of a single-day entry write
//! - `auth` - User roles and what they may do
//! - `team` - Manager assignment rules and team visibility
//! - `summary` - Monthly totals and team analytics
//! - `query` - Manager queries about an employee's entry

pub mod allowance;
pub mod auth;
pub mod calendar;
pub mod entry;
pub mod query;
pub mod summary;
pub mod team;
