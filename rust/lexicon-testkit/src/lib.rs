//! Test utilities and helpers for the lexicon project.
//!
//! This crate provides:
//! - Data generation for creating deterministic synthetic words and texts
//! - Naive reference implementations that trie results are checked against
//!
//! # Usage
//!
//! This crate is primarily intended for use within the lexicon project's test suite.

pub mod data_gen;
pub mod reference;
