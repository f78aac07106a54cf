//! Postline - A minimal post board service
//!
//! This library provides the core functionality for the Postline service:
//! user signup and login with bearer tokens, and per-user text posts with a
//! read-through cache in front of PostgreSQL.

pub mod api;
pub mod cache;
pub mod config;
pub mod db;
pub mod models;
pub mod services;
