//! # chore-core
//!
//! Foundation types and utilities for choreworld.
//!
//! This crate provides the shared vocabulary that the other choreworld
//! crates depend on:
//!
//! - **Model**: [`model::Chore`] and [`model::ChoreGroup`] as immutable
//!   value types with structural equality and hashing
//! - **Text**: [`text::title_case`] for default display names
//! - **Logging**: [`logging::init`] tracing subscriber setup
//!
//! ## Crate Position
//!
//! Foundation crate. Depended on by all other choreworld crates.

#![deny(unsafe_code)]

pub mod logging;
pub mod model;
pub mod text;
