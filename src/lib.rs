//! `siemulate` - SOC analyst training backend
//!
//! This library provides a scenario engine that drips simulated security
//! events to trainees over a polling HTTP API, grades their triage
//! responses, and scores knowledge quizzes.

pub mod api;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod observability;
pub mod quiz;
pub mod server;
