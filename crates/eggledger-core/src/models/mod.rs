//! Data models.

pub mod config;
pub mod egg;
pub mod purchase;
