//! Integration test crate for Cutline.
//!
//! This crate exists solely to hold cross-crate integration tests.
//! It depends on every cutline crate to verify they work together.

#[cfg(test)]
mod timeline;

#[cfg(test)]
mod project;
