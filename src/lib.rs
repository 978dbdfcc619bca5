//!
//! hmmer2fsm
//!
//! Converts a HMMER2 "Plan-7" profile HMM into an explicit finite-state
//! model of named states, transitions and emissions, and writes it as
//! a HMMoC XML document.
//!
pub mod cli;
pub mod error;
pub mod fsm;
pub mod io;
pub mod params;
pub mod plan7;
pub mod prelude;
pub mod prob;

#[cfg(test)]
#[macro_use]
extern crate approx;
