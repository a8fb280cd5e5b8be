//! Jansen-type leg linkage.
//!
//! The reduced, symmetric form of the Jansen walking leg: one crank, two
//! frame points, and a mirror-symmetric pair of rockers meeting at the
//! foot. The upper/lower pair comes from a single circle intersection, so
//! no branch calibration is needed; the fixed left/right solution order
//! identifies each side.
use super::{Columns, Mechanism, SolveModel, Sweep};
use crate::error::{Kind, SolveError};
use crate::geom::{circ_circ, polar, Coord, RigidOffset};
use crate::stat::Assembly;

/// Jansen-type leg parameters.
///
/// Defined by link lengths and frame data rather than a reference pose.
/// The second frame point sits at `p1 - l1 * [cos(alpha), sin(alpha)]`.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Jansen {
    /// Fixed crank pivot
    pub p1: Coord,
    /// Crank length
    pub la: f64,
    /// Crank-tip-to-rocker length, shared by the symmetric pair
    pub le: f64,
    /// Frame-to-rocker length, also the bent-link arm
    pub ld: f64,
    /// Foot link length, shared by both sides
    pub lf: f64,
    /// Ground link length
    pub l1: f64,
    /// Ground link angle
    pub alpha: f64,
    /// Bent-link angle of the lower triangle
    pub gamma: f64,
}

impl Jansen {
    /// The reduced leg of the reference design.
    pub const fn example() -> Self {
        Self {
            p1: [0., 0.],
            la: 26.,
            le: 56.,
            ld: 77.,
            lf: 75.,
            l1: 53.,
            alpha: 0.085,
            gamma: 2.97 - std::f64::consts::PI,
        }
    }
}

impl Mechanism for Jansen {
    type Model = JansenModel;

    fn calibrate(&self) -> Result<JansenModel, SolveError> {
        let calib = |joint| move |kind| SolveError::Calibration { joint, kind };
        for (joint, l) in [
            ("crank", self.la),
            ("joint3", self.le),
            ("joint3", self.ld),
            ("foot", self.lf),
            ("frame", self.l1),
        ] {
            if l <= 0. {
                return Err(calib(joint)(Kind::InvalidLinkLength));
            }
        }
        let p2 = polar(self.p1, -self.l1, self.alpha);
        Ok(JansenModel {
            p1: self.p1,
            p2,
            la: self.la,
            le: self.le,
            ld: self.ld,
            lf: self.lf,
            knee: RigidOffset { r: self.ld, gamma: self.gamma },
        })
    }
}

/// Calibrated Jansen-type leg model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JansenModel {
    /// Fixed crank pivot
    pub p1: Coord,
    /// Second frame point
    pub p2: Coord,
    /// Crank length
    pub la: f64,
    /// Crank-tip-to-rocker length
    pub le: f64,
    /// Frame-to-rocker length
    pub ld: f64,
    /// Foot link length
    pub lf: f64,
    /// Bent-link offset producing `joint5` about the frame point
    pub knee: RigidOffset,
}

impl JansenModel {
    /// Joint positions `[crank, joint3, joint4, joint5, foot]` at one crank
    /// angle.
    pub fn pos(&self, theta: f64) -> Result<[Coord; 5], Kind> {
        self.pos_at(theta).map_err(|(_, kind)| kind)
    }

    fn pos_at(&self, theta: f64) -> Result<[Coord; 5], (&'static str, Kind)> {
        let crank = polar(self.p1, self.la, theta);
        // Upper and lower rockers are mirror images through the frame
        // line; the intersection order tells them apart
        let pair =
            circ_circ(crank, self.le, self.p2, self.ld).map_err(|kind| ("joint3", kind))?;
        let joint4 = Assembly::Left.pick(pair);
        let joint3 = Assembly::Right.pick(pair);
        let joint5 = self
            .knee
            .apply(joint3, self.p2)
            .map_err(|kind| ("joint5", kind))?;
        let foot = circ_circ(joint5, self.lf, joint4, self.lf)
            .map(|c| Assembly::Right.pick(c))
            .map_err(|kind| ("foot", kind))?;
        Ok([crank, joint3, joint4, joint5, foot])
    }
}

impl SolveModel for JansenModel {
    type Path = JansenPath;

    fn trajectory(&self, sweep: &Sweep) -> Result<JansenPath, SolveError> {
        let mut path = JansenPath::default();
        for (sample, theta) in sweep.angles().enumerate() {
            let [crank, joint3, joint4, joint5, foot] = self
                .pos_at(theta)
                .map_err(|(joint, kind)| SolveError::Sample { joint, sample, kind })?;
            path.crank.push(crank);
            path.joint3.push(joint3);
            path.joint4.push(joint4);
            path.joint5.push(joint5);
            path.foot.push(foot);
        }
        Ok(path)
    }
}

/// Jansen-type leg trajectories, aligned by sample index.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct JansenPath {
    /// Crank tip path
    pub crank: Vec<Coord>,
    /// Lower rocker joint path
    pub joint3: Vec<Coord>,
    /// Upper rocker joint path
    pub joint4: Vec<Coord>,
    /// Bent-link knee path
    pub joint5: Vec<Coord>,
    /// Foot path
    pub foot: Vec<Coord>,
}

impl Columns for JansenPath {
    fn columns(&self) -> Vec<(&'static str, &[Coord])> {
        vec![
            ("crank", self.crank.as_slice()),
            ("joint3", self.joint3.as_slice()),
            ("joint4", self.joint4.as_slice()),
            ("joint5", self.joint5.as_slice()),
            ("foot", self.foot.as_slice()),
        ]
    }
}
