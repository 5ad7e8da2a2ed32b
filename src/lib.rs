// src/lib.rs

//! feed-digest Library
//!
//! Aggregates a fixed catalog of RSS/Atom feeds into a JSON snapshot, renders
//! a weekly digest page for a static site, and posts the same digest to
//! Dev.to once a week.

pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
