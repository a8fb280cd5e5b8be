//! Klann-type six-bar leg linkage.
//!
//! Two chained loops. Loop 1 closes the crank against the frame pivot
//! `joint14` and carries the bent-link elbow `joint36`; loop 2 treats the
//! `joint36` path as its driven point, closes against `joint15`, and
//! carries the foot. Each loop freezes its own assembly branch.
use super::{Columns, Mechanism, SolveModel, Sweep};
use crate::error::{Kind, SolveError};
use crate::geom::{circ_circ, link_len, polar, Coord, RigidOffset};
use crate::stat::Assembly;

/// Klann-type six-bar reference configuration.
///
/// Three frame points and one physically assembled pose of the moving
/// joints, ending at the foot.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Klann {
    /// Fixed crank pivot
    pub joint12: Coord,
    /// Fixed pivot of link 4
    pub joint14: Coord,
    /// Fixed pivot of link 5
    pub joint15: Coord,
    /// Crank tip at the reference angle
    pub joint23: Coord,
    /// Link 3-4 joint in the reference pose
    pub joint34: Coord,
    /// Bent-link elbow of link 3 in the reference pose
    pub joint36: Coord,
    /// Link 5-6 joint in the reference pose
    pub joint56: Coord,
    /// Foot point in the reference pose
    pub foot: Coord,
}

impl Mechanism for Klann {
    type Model = KlannModel;

    fn calibrate(&self) -> Result<KlannModel, SolveError> {
        let calib = |joint| move |kind| SolveError::Calibration { joint, kind };
        let l2 = link_len(self.joint12, self.joint23).map_err(calib("joint23"))?;
        let l3 = link_len(self.joint23, self.joint34).map_err(calib("joint34"))?;
        let l4 = link_len(self.joint14, self.joint34).map_err(calib("joint34"))?;
        let l5 = link_len(self.joint15, self.joint56).map_err(calib("joint56"))?;
        let l6 = link_len(self.joint56, self.joint36).map_err(calib("joint56"))?;
        let elbow = RigidOffset::from_ref(self.joint23, self.joint34, self.joint36)
            .map_err(calib("joint36"))?;
        let toe =
            RigidOffset::from_ref(self.joint56, self.joint36, self.foot).map_err(calib("foot"))?;
        // Loop 1 first: its branch and its reproduced reference elbow gate
        // the loop 2 calibration
        let candidates =
            circ_circ(self.joint23, l3, self.joint14, l4).map_err(calib("joint34"))?;
        let asm1 = Assembly::select(&candidates, self.joint34).map_err(calib("joint34"))?;
        let joint34 = asm1.pick(candidates);
        let joint36 = elbow
            .apply(self.joint23, joint34)
            .map_err(calib("joint36"))?;
        let candidates = circ_circ(joint36, l6, self.joint15, l5).map_err(calib("joint56"))?;
        let asm2 = Assembly::select(&candidates, self.joint56).map_err(calib("joint56"))?;
        Ok(KlannModel {
            joint12: self.joint12,
            joint14: self.joint14,
            joint15: self.joint15,
            l2,
            l3,
            l4,
            l5,
            l6,
            elbow,
            toe,
            asm1,
            asm2,
        })
    }
}

/// Calibrated Klann-type six-bar model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KlannModel {
    /// Fixed crank pivot
    pub joint12: Coord,
    /// Fixed pivot of link 4
    pub joint14: Coord,
    /// Fixed pivot of link 5
    pub joint15: Coord,
    /// Crank length
    pub l2: f64,
    /// Link 3 length
    pub l3: f64,
    /// Link 4 length
    pub l4: f64,
    /// Link 5 length
    pub l5: f64,
    /// Link 6 length
    pub l6: f64,
    /// Bent-link offset of `joint36` on link 3
    pub elbow: RigidOffset,
    /// Bent-link offset of the foot on link 6
    pub toe: RigidOffset,
    /// Frozen branch of the crank loop
    pub asm1: Assembly,
    /// Frozen branch of the output loop
    pub asm2: Assembly,
}

impl KlannModel {
    /// Joint positions `[joint23, joint34, joint36, joint56, foot]` at one
    /// crank angle.
    pub fn pos(&self, theta: f64) -> Result<[Coord; 5], Kind> {
        self.pos_at(theta).map_err(|(_, kind)| kind)
    }

    fn pos_at(&self, theta: f64) -> Result<[Coord; 5], (&'static str, Kind)> {
        let joint23 = polar(self.joint12, self.l2, theta);
        let joint34 = circ_circ(joint23, self.l3, self.joint14, self.l4)
            .map(|c| self.asm1.pick(c))
            .map_err(|kind| ("joint34", kind))?;
        let joint36 = self
            .elbow
            .apply(joint23, joint34)
            .map_err(|kind| ("joint36", kind))?;
        let joint56 = circ_circ(joint36, self.l6, self.joint15, self.l5)
            .map(|c| self.asm2.pick(c))
            .map_err(|kind| ("joint56", kind))?;
        let foot = self
            .toe
            .apply(joint56, joint36)
            .map_err(|kind| ("foot", kind))?;
        Ok([joint23, joint34, joint36, joint56, foot])
    }
}

impl SolveModel for KlannModel {
    type Path = KlannPath;

    fn trajectory(&self, sweep: &Sweep) -> Result<KlannPath, SolveError> {
        let mut path = KlannPath::default();
        for (sample, theta) in sweep.angles().enumerate() {
            let [joint23, joint34, joint36, joint56, foot] = self
                .pos_at(theta)
                .map_err(|(joint, kind)| SolveError::Sample { joint, sample, kind })?;
            path.joint23.push(joint23);
            path.joint34.push(joint34);
            path.joint36.push(joint36);
            path.joint56.push(joint56);
            path.foot.push(foot);
        }
        Ok(path)
    }
}

/// Klann-type six-bar trajectories, aligned by sample index.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KlannPath {
    /// Crank tip path
    pub joint23: Vec<Coord>,
    /// Link 3-4 joint path
    pub joint34: Vec<Coord>,
    /// Bent-link elbow path
    pub joint36: Vec<Coord>,
    /// Link 5-6 joint path
    pub joint56: Vec<Coord>,
    /// Foot path
    pub foot: Vec<Coord>,
}

impl Columns for KlannPath {
    fn columns(&self) -> Vec<(&'static str, &[Coord])> {
        vec![
            ("joint23", self.joint23.as_slice()),
            ("joint34", self.joint34.as_slice()),
            ("joint36", self.joint36.as_slice()),
            ("joint56", self.joint56.as_slice()),
            ("foot", self.foot.as_slice()),
        ]
    }
}
