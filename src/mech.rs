//! Linkage mechanism topologies.
//!
//! Each supported family is a fixed solving pipeline, not a general
//! constraint graph: a reference/parameter struct implementing
//! [`Mechanism`] is calibrated once into an immutable model, and the model
//! sweeps the input crank into one trajectory per tracked joint.
pub use self::{fb::*, gfb::*, jansen::*, klann::*};

use crate::error::SolveError;
use crate::geom::{linspace, Coord};

pub mod fb;
pub mod gfb;
pub mod jansen;
pub mod klann;

/// Angular sweep of the input crank.
///
/// Angles are radians. `end < start` runs the crank clockwise and the range
/// may exceed one revolution.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sweep {
    /// Start angle
    pub start: f64,
    /// End angle
    pub end: f64,
    /// Number of samples, both endpoints included (at least 1)
    pub res: usize,
}

impl Sweep {
    /// Create a new sweep.
    pub const fn new(start: f64, end: f64, res: usize) -> Self {
        Self { start, end, res }
    }

    /// One full counter-clockwise revolution from angle zero.
    pub const fn full_turn(res: usize) -> Self {
        Self::new(0., std::f64::consts::TAU, res)
    }

    /// The sampled crank angles, in sweep order.
    pub fn angles(&self) -> impl ExactSizeIterator<Item = f64> + Clone {
        linspace(self.start, self.end, self.res)
    }
}

/// A mechanism definition that can be calibrated into a solving model.
pub trait Mechanism {
    /// The calibrated model.
    type Model: SolveModel;

    /// Derive the link lengths and rigid offsets from the reference data
    /// and fix the assembly branch of every two-circle loop.
    ///
    /// Runs once, strictly before any trajectory sample; the branch choices
    /// frozen here are reused unmodified across the whole sweep.
    fn calibrate(&self) -> Result<Self::Model, SolveError>;
}

/// A calibrated model producing trajectories.
pub trait SolveModel {
    /// The named trajectory bundle of this topology.
    type Path: Columns;

    /// Solve every sample of the sweep.
    ///
    /// Any sample failure aborts the solve with the offending joint and
    /// sample index; no partial trajectory is returned.
    fn trajectory(&self, sweep: &Sweep) -> Result<Self::Path, SolveError>;
}

/// An owned named trajectory table.
pub type Table = Vec<(&'static str, Vec<Coord>)>;

/// Named trajectory columns, aligned by sample index.
pub trait Columns {
    /// Column names and their point sequences, in output order.
    ///
    /// Sample `i` of every column corresponds to the same crank angle.
    fn columns(&self) -> Vec<(&'static str, &[Coord])>;

    /// Clone into an owned column table.
    fn to_table(&self) -> Table {
        self.columns()
            .into_iter()
            .map(|(name, c)| (name, c.to_vec()))
            .collect()
    }
}

/// The supported linkage topologies.
///
/// Dispatches the per-family solvers behind one calibrate-then-sweep call
/// for callers that only consume the named trajectory table.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Debug, PartialEq)]
pub enum Topology {
    /// Four-bar linkage
    FourBar(FourBar),
    /// Geared five-bar linkage
    GearedFiveBar(GearedFiveBar),
    /// Klann-type six-bar linkage
    Klann(Klann),
    /// Jansen-type leg
    Jansen(Jansen),
}

impl Topology {
    /// Calibrate, then solve the whole sweep into a named table.
    pub fn solve(&self, sweep: &Sweep) -> Result<Table, SolveError> {
        match self {
            Self::FourBar(m) => Ok(m.calibrate()?.trajectory(sweep)?.to_table()),
            Self::GearedFiveBar(m) => Ok(m.calibrate()?.trajectory(sweep)?.to_table()),
            Self::Klann(m) => Ok(m.calibrate()?.trajectory(sweep)?.to_table()),
            Self::Jansen(m) => Ok(m.calibrate()?.trajectory(sweep)?.to_table()),
        }
    }
}

/// Grashof condition over the loop lengths `[l1, l2, l3, l4]`.
///
/// True when the longest and shortest links sum to no more than the other
/// two, i.e. the shortest link can rotate fully.
pub fn is_grashof(mut lengths: [f64; 4]) -> bool {
    lengths.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap());
    let [s, p, q, l] = lengths;
    s + l <= p + q
}
