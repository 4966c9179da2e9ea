//! Test utilities and helpers for the simvec workspace.
//!
//! This crate provides:
//! - Element types that observe how a container treats its values
//!   (move-only values, live-instance tracking, panicking clone/default)
//! - Random operation sequences for model-checking containers against `Vec`
//!
//! # Usage
//!
//! This crate is intended for use as a dev-dependency within the workspace.

pub mod data_gen;
pub mod elements;
