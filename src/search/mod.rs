#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Choosing iteration counts and verifying what the backend measures.

pub mod controller;
pub mod iterations;
pub mod outcome;
pub mod sampler;
pub mod schedule;
