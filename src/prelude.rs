//!
//! globally-available parts
//!
pub use crate::error::{Plan7Error, Result};
pub use crate::fsm::{FiniteStateModel, State, StateId, Transition};
pub use crate::io::hmmoc::RealType;
pub use crate::params::ConvertParams;
pub use crate::plan7::{Alphabet, Node, Plan7Model};
