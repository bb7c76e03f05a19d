//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors)
//! - `normalization` - Canonicalizing informal salary, city, and lifestyle text
//! - `conversation` - Intake session lifecycle, intent detection, prompts
//! - `budget` - Model payload extraction and persisted allocations

pub mod budget;
pub mod conversation;
pub mod foundation;
pub mod normalization;
