//! Budget Intake - Conversational budget onboarding
//!
//! This crate runs a short chat with a user, in casual Indonesian, to learn
//! their salary, city, and lifestyle, then asks a generative model for a
//! monthly budget, validates it, and stores one allocation per category.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
