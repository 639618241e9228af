//! pd-hook-audit: PagerDuty webhook auditor
//!
//! A library for auditing PagerDuty services for the Opsmatic webhook
//! and installing it where missing.

pub mod api;
pub mod config;
pub mod install;
pub mod reconcile;
pub mod report;
pub mod run;
