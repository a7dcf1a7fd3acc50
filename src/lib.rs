//! Robokassa Gateway - payment integration for the Robokassa acquiring service
//!
//! Builds signed payment requests (redirect form or inline widget) with a
//! fiscal receipt, and validates ResultURL notifications before marking a
//! payment completed.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
