//! Shared types, errors, and configuration for ShiftPay.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Application-wide error types
//! - Configuration management
//! - JWT claims and token validation
//! - The notification sender contract

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;
pub mod notify;
pub mod types;


pub use auth::Claims;
pub use config::{AppConfig, DirectoryConfig};
pub use error::{AppError, AppResult};
pub use jwt::{JwtConfig, JwtError, JwtService};
pub use notify::{LogNotificationSender, Notification, NotificationSender};
