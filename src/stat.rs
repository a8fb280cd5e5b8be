//! Assembly branch state of a two-circle loop.
use crate::error::Kind;
use crate::geom::{close_pt, Coord};

/// Which of the two circle intersections assembles a loop.
///
/// [`crate::geom::circ_circ`] orders its solutions left first, so a variant
/// names a geometric side, not an array position. The choice is fixed once
/// per loop from the reference configuration and reused for every sample of
/// the trajectory; a mechanism does not switch branches during continuous
/// motion.
#[repr(u8)]
#[derive(Debug, PartialEq, Eq, Copy, Clone, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Assembly {
    /// Left of the first-to-second center direction
    #[default]
    Left = 0,
    /// Right of the first-to-second center direction
    Right = 1,
}

impl std::fmt::Display for Assembly {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Left => write!(f, "left branch"),
            Self::Right => write!(f, "right branch"),
        }
    }
}

impl TryFrom<u8> for Assembly {
    type Error = Kind;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Left),
            1 => Ok(Self::Right),
            _ => Err(Kind::AmbiguousAssembly),
        }
    }
}

impl Assembly {
    /// Match the reference joint against the two intersection candidates.
    ///
    /// Exactly one candidate must match within tolerance. Neither matching
    /// means the reference data is inconsistent with the derived link
    /// lengths; both matching means the reference itself sits on a tangent
    /// configuration. Either way the branch cannot be fixed.
    pub fn select(candidates: &[Coord; 2], reference: Coord) -> Result<Self, Kind> {
        match (
            close_pt(candidates[0], reference),
            close_pt(candidates[1], reference),
        ) {
            (true, false) => Ok(Self::Left),
            (false, true) => Ok(Self::Right),
            _ => Err(Kind::AmbiguousAssembly),
        }
    }

    /// Pick this branch from an intersection pair.
    pub fn pick(self, candidates: [Coord; 2]) -> Coord {
        candidates[self as usize]
    }
}
