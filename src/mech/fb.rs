//! Planar four-bar linkage.
use super::{Columns, Mechanism, SolveModel, Sweep};
use crate::error::{Kind, SolveError};
use crate::geom::{circ_circ, dist, link_len, polar, Coord, RigidOffset};
use crate::stat::Assembly;

/// Four-bar linkage reference configuration.
///
/// Joints are named by the links they connect: `joint23` is the pin between
/// the driver (link 2) and the coupler (link 3). `joint12` and `joint14`
/// are the frame pivots; link 1 is the ground.
///
/// The moving joints give one physically assembled pose, from which the
/// link lengths, the coupler offset, and the assembly branch are derived.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FourBar {
    /// Fixed driver pivot
    pub joint12: Coord,
    /// Driver-coupler joint at the reference crank angle
    pub joint23: Coord,
    /// Coupler-follower joint in the reference pose
    pub joint34: Coord,
    /// Fixed follower pivot
    pub joint14: Coord,
    /// Coupler point rigidly attached to link 3
    pub coupler: Coord,
}

impl FourBar {
    /// An example crank rocker.
    pub const fn example() -> Self {
        Self {
            joint12: [0., 0.],
            joint23: [3., 0.],
            joint34: [9., 8.],
            joint14: [9., 2.],
            coupler: [5., 5.],
        }
    }
}

impl Mechanism for FourBar {
    type Model = FbModel;

    fn calibrate(&self) -> Result<FbModel, SolveError> {
        let calib = |joint| move |kind| SolveError::Calibration { joint, kind };
        let l2 = link_len(self.joint12, self.joint23).map_err(calib("joint23"))?;
        let l3 = link_len(self.joint23, self.joint34).map_err(calib("joint34"))?;
        let l4 = link_len(self.joint34, self.joint14).map_err(calib("joint34"))?;
        let cp = RigidOffset::from_ref(self.joint34, self.joint23, self.coupler)
            .map_err(calib("coupler"))?;
        let candidates =
            circ_circ(self.joint23, l3, self.joint14, l4).map_err(calib("joint34"))?;
        let asm = Assembly::select(&candidates, self.joint34).map_err(calib("joint34"))?;
        Ok(FbModel {
            joint12: self.joint12,
            joint14: self.joint14,
            l2,
            l3,
            l4,
            cp,
            asm,
        })
    }
}

/// Calibrated four-bar model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FbModel {
    /// Fixed driver pivot
    pub joint12: Coord,
    /// Fixed follower pivot
    pub joint14: Coord,
    /// Driver link length
    pub l2: f64,
    /// Coupler link length
    pub l3: f64,
    /// Follower link length
    pub l4: f64,
    /// Coupler point offset on link 3
    pub cp: RigidOffset,
    /// Frozen assembly branch of the loop
    pub asm: Assembly,
}

impl FbModel {
    /// Joint and coupler positions `[joint23, joint34, coupler]` at one
    /// crank angle.
    pub fn pos(&self, theta: f64) -> Result<[Coord; 3], Kind> {
        self.pos_at(theta).map_err(|(_, kind)| kind)
    }

    /// The loop lengths `[l1, l2, l3, l4]`, e.g. for
    /// [`is_grashof`](super::is_grashof).
    pub fn planar_loop(&self) -> [f64; 4] {
        [dist(self.joint12, self.joint14), self.l2, self.l3, self.l4]
    }

    fn pos_at(&self, theta: f64) -> Result<[Coord; 3], (&'static str, Kind)> {
        let joint23 = polar(self.joint12, self.l2, theta);
        let joint34 = circ_circ(joint23, self.l3, self.joint14, self.l4)
            .map(|c| self.asm.pick(c))
            .map_err(|kind| ("joint34", kind))?;
        let coupler = self
            .cp
            .apply(joint34, joint23)
            .map_err(|kind| ("coupler", kind))?;
        Ok([joint23, joint34, coupler])
    }
}

impl SolveModel for FbModel {
    type Path = FbPath;

    fn trajectory(&self, sweep: &Sweep) -> Result<FbPath, SolveError> {
        let mut path = FbPath::default();
        for (sample, theta) in sweep.angles().enumerate() {
            let [joint23, joint34, coupler] = self
                .pos_at(theta)
                .map_err(|(joint, kind)| SolveError::Sample { joint, sample, kind })?;
            path.joint23.push(joint23);
            path.joint34.push(joint34);
            path.coupler.push(coupler);
        }
        Ok(path)
    }
}

/// Four-bar trajectories, aligned by sample index.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FbPath {
    /// Driver-coupler joint path
    pub joint23: Vec<Coord>,
    /// Coupler-follower joint path
    pub joint34: Vec<Coord>,
    /// Coupler point path
    pub coupler: Vec<Coord>,
}

impl Columns for FbPath {
    fn columns(&self) -> Vec<(&'static str, &[Coord])> {
        vec![
            ("joint23", self.joint23.as_slice()),
            ("joint34", self.joint34.as_slice()),
            ("coupler", self.coupler.as_slice()),
        ]
    }
}
