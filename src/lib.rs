//! Position-level kinematics of planar closed-loop linkages.
//!
//! Solves the joint and coupler-point trajectories of four-bar, geared
//! five-bar, Klann-type six-bar, and Jansen-type leg mechanisms from a
//! reference configuration and an input crank sweep.
//!
//! A solve runs in two strictly ordered steps:
//!
//! 1. [`Mechanism::calibrate`] derives the link lengths and rigid offsets
//!    from the reference data and fixes the assembly branch of every
//!    two-circle loop, once.
//! 2. [`SolveModel::trajectory`] sweeps the input crank, composing the
//!    circle-intersection, arc, and offset primitives of [`geom`] into the
//!    per-sample joint positions while reusing the frozen branch choices.
//!
//! Samples are pure functions of the crank angle and the calibrated
//! constants, so a trajectory has no inter-sample state beyond the branch
//! choices fixed up front. Every failure reports the joint it occurred at
//! and, for trajectory samples, the offending sample index; no partial
//! trajectory is ever returned.
//!
//! ```
//! use planar_linkage::{FourBar, Mechanism, SolveModel, Sweep};
//!
//! let model = FourBar::example().calibrate()?;
//! let path = model.trajectory(&Sweep::full_turn(24))?;
//! assert_eq!(path.coupler.len(), 24);
//! # Ok::<_, planar_linkage::SolveError>(())
//! ```
#![cfg_attr(doc_cfg, feature(doc_cfg))]
#![warn(missing_docs)]
pub use crate::error::*;
pub use crate::geom::*;
pub use crate::mech::*;
pub use crate::stat::*;

#[cfg(feature = "csv")]
#[cfg_attr(doc_cfg, doc(cfg(feature = "csv")))]
pub mod csv;
mod error;
pub mod geom;
pub mod mech;
#[cfg(feature = "plot")]
#[cfg_attr(doc_cfg, doc(cfg(feature = "plot")))]
pub mod plot;
mod stat;
#[cfg(test)]
mod tests;
