//! LendFriend Backend Library
//!
//! This library exports the core modules for the LendFriend scoring server.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod scoring;
pub mod services;
pub mod state;
