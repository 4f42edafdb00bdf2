#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Circuit synthesis and execution: gates, the CNF oracle, the amplification
//! circuit around it, and the backends that run it.

pub mod amplification;
pub mod backend;
pub mod circuit;
pub mod emulator;
pub mod gate;
pub mod histogram;
pub mod layout;
pub mod oracle;
pub mod reversible;
pub mod simulator;
