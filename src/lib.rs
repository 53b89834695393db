//! Skill Swap - Peer-to-peer skill exchange marketplace backend
//!
//! This crate implements the swap request lifecycle, rating aggregation,
//! and moderation surface behind a JSON-over-HTTP API.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
