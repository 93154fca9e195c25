// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The two phases of Irving's algorithm.
//!
//! # Organization
//!
//! - `proposal`: ProposalPhase, sequential proposals to the first-reduced table
//! - `rotation`: Rotation values and the RotationFinder
//! - `elimination`: RotationEliminator and RotationPhase

pub mod elimination;
pub mod proposal;
pub mod rotation;

pub use elimination::{RotationEliminator, RotationPhase};
pub use proposal::ProposalPhase;
pub use rotation::{Rotation, RotationFinder, RotationMode};
