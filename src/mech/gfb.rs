//! Geared five-bar linkage.
//!
//! Two driven cranks with one degree of freedom: the gear train keeps the
//! output crank slaved to the input crank, and a single loop closure
//! locates the coupler joint between them.
use super::{Columns, Mechanism, SolveModel, Sweep};
use crate::error::{Kind, SolveError};
use crate::geom::{circ_circ, dir, link_len, polar, Coord, RigidOffset};
use crate::stat::Assembly;

/// Geared five-bar reference configuration.
///
/// Joints run around the loop in series from the fixed input pivot
/// `joint12` to the fixed output pivot `joint15`; the coupler point rides
/// on link 4.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GearedFiveBar {
    /// Fixed input pivot
    pub joint12: Coord,
    /// Input crank tip at the reference angle
    pub joint23: Coord,
    /// Coupler joint in the reference pose
    pub joint34: Coord,
    /// Output crank tip at the reference angle
    pub joint45: Coord,
    /// Fixed output pivot
    pub joint15: Coord,
    /// Coupler point rigidly attached to link 4
    pub coupler: Coord,
    /// Input gear rotations per output rotation; negative when the gears
    /// mesh directly, positive for a belt or idler drive
    pub ratio: f64,
}

impl Mechanism for GearedFiveBar {
    type Model = GfbModel;

    fn calibrate(&self) -> Result<GfbModel, SolveError> {
        let calib = |joint| move |kind| SolveError::Calibration { joint, kind };
        if self.ratio == 0. || !self.ratio.is_finite() {
            // The output sweep divides by the ratio
            return Err(SolveError::Calibration { joint: "joint45", kind: Kind::Degenerate });
        }
        let l2 = link_len(self.joint12, self.joint23).map_err(calib("joint23"))?;
        let l3 = link_len(self.joint23, self.joint34).map_err(calib("joint34"))?;
        let l4 = link_len(self.joint34, self.joint45).map_err(calib("joint34"))?;
        let l5 = link_len(self.joint15, self.joint45).map_err(calib("joint45"))?;
        // Both cranks start from their reference angles and stay
        // synchronized through the gear train
        let theta2 = dir(self.joint12, self.joint23).map_err(calib("joint23"))?;
        let theta5 = dir(self.joint15, self.joint45).map_err(calib("joint45"))?;
        let cp = RigidOffset::from_ref(self.joint45, self.joint34, self.coupler)
            .map_err(calib("coupler"))?;
        let candidates =
            circ_circ(self.joint23, l3, self.joint45, l4).map_err(calib("joint34"))?;
        let asm = Assembly::select(&candidates, self.joint34).map_err(calib("joint34"))?;
        Ok(GfbModel {
            joint12: self.joint12,
            joint15: self.joint15,
            l2,
            l3,
            l4,
            l5,
            theta2,
            theta5,
            ratio: self.ratio,
            cp,
            asm,
        })
    }
}

/// Calibrated geared five-bar model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GfbModel {
    /// Fixed input pivot
    pub joint12: Coord,
    /// Fixed output pivot
    pub joint15: Coord,
    /// Input crank length
    pub l2: f64,
    /// Link 3 length
    pub l3: f64,
    /// Link 4 length
    pub l4: f64,
    /// Output crank length
    pub l5: f64,
    /// Input crank reference angle
    pub theta2: f64,
    /// Output crank reference angle
    pub theta5: f64,
    /// Gear ratio
    pub ratio: f64,
    /// Coupler point offset on link 4
    pub cp: RigidOffset,
    /// Frozen assembly branch of the loop
    pub asm: Assembly,
}

impl GfbModel {
    /// Joint and coupler positions `[joint23, joint34, joint45, coupler]`
    /// at one input crank angle.
    pub fn pos(&self, theta: f64) -> Result<[Coord; 4], Kind> {
        self.pos_at(theta).map_err(|(_, kind)| kind)
    }

    /// Output crank angle geared to the input crank angle.
    pub fn output_angle(&self, theta: f64) -> f64 {
        self.theta5 + (theta - self.theta2) / self.ratio
    }

    /// Sweep of the input crank over `range`, starting at the reference
    /// angle. The range may be negative or exceed one revolution.
    pub fn sweep(&self, range: f64, res: usize) -> Sweep {
        Sweep::new(self.theta2, self.theta2 + range, res)
    }

    fn pos_at(&self, theta: f64) -> Result<[Coord; 4], (&'static str, Kind)> {
        let joint23 = polar(self.joint12, self.l2, theta);
        let joint45 = polar(self.joint15, self.l5, self.output_angle(theta));
        let joint34 = circ_circ(joint23, self.l3, joint45, self.l4)
            .map(|c| self.asm.pick(c))
            .map_err(|kind| ("joint34", kind))?;
        let coupler = self
            .cp
            .apply(joint45, joint34)
            .map_err(|kind| ("coupler", kind))?;
        Ok([joint23, joint34, joint45, coupler])
    }
}

impl SolveModel for GfbModel {
    type Path = GfbPath;

    fn trajectory(&self, sweep: &Sweep) -> Result<GfbPath, SolveError> {
        let mut path = GfbPath::default();
        for (sample, theta) in sweep.angles().enumerate() {
            let [joint23, joint34, joint45, coupler] = self
                .pos_at(theta)
                .map_err(|(joint, kind)| SolveError::Sample { joint, sample, kind })?;
            path.joint23.push(joint23);
            path.joint34.push(joint34);
            path.joint45.push(joint45);
            path.coupler.push(coupler);
        }
        Ok(path)
    }
}

/// Geared five-bar trajectories, aligned by sample index.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GfbPath {
    /// Input crank tip path
    pub joint23: Vec<Coord>,
    /// Coupler joint path
    pub joint34: Vec<Coord>,
    /// Output crank tip path
    pub joint45: Vec<Coord>,
    /// Coupler point path
    pub coupler: Vec<Coord>,
}

impl Columns for GfbPath {
    fn columns(&self) -> Vec<(&'static str, &[Coord])> {
        vec![
            ("joint23", self.joint23.as_slice()),
            ("joint34", self.joint34.as_slice()),
            ("joint45", self.joint45.as_slice()),
            ("coupler", self.coupler.as_slice()),
        ]
    }
}
