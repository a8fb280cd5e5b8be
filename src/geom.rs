//! Geometric primitives shared by all linkage solvers.
//!
//! Coordinates are `[x, y]` pairs in the same unit as the link lengths and
//! all angles are radians. Everything here is a pure function; the solvers
//! in [`crate::mech`] compose these into loop closures.
use crate::error::Kind;

/// A planar coordinate.
pub type Coord = [f64; 2];

/// Absolute tolerance of [`close`].
pub const ATOL: f64 = 1e-8;
/// Relative tolerance of [`close`].
pub const RTOL: f64 = 1e-5;

/// Tolerance comparison of two scalars.
///
/// Reference data and recomputed intersections differ by floating-point
/// noise, so equality is always checked through this band.
pub fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= ATOL + RTOL * b.abs()
}

/// Tolerance comparison of two coordinates, component-wise.
pub fn close_pt([x1, y1]: Coord, [x2, y2]: Coord) -> bool {
    close(x1, x2) && close(y1, y2)
}

/// Distance between two coordinates.
pub fn dist([x1, y1]: Coord, [x2, y2]: Coord) -> f64 {
    (x2 - x1).hypot(y2 - y1)
}

/// Direction angle of the `from -> to` vector, quadrant-correct.
///
/// A zero-length vector has no direction.
pub fn dir(from: Coord, to: Coord) -> Result<f64, Kind> {
    let [dx, dy] = [to[0] - from[0], to[1] - from[1]];
    if dx.abs() <= ATOL && dy.abs() <= ATOL {
        return Err(Kind::Degenerate);
    }
    Ok(dy.atan2(dx))
}

/// Move from `p` a distance `d` along direction `a`.
pub fn polar([x, y]: Coord, d: f64, a: f64) -> Coord {
    [x + d * a.cos(), y + d * a.sin()]
}

/// Link length between two reference joints.
///
/// A link must connect two distinct joints, so a zero length is rejected.
pub fn link_len(a: Coord, b: Coord) -> Result<f64, Kind> {
    let d = dist(a, b);
    if d <= ATOL {
        Err(Kind::InvalidLinkLength)
    } else {
        Ok(d)
    }
}

/// Evenly spaced values from `start` to `end`, both endpoints included.
///
/// `res == 1` yields only `start`; `end < start` counts downwards. The
/// iterator is restartable, identical inputs replay identical values.
pub fn linspace(start: f64, end: f64, res: usize) -> impl ExactSizeIterator<Item = f64> + Clone {
    let step = if res > 1 {
        (end - start) / (res - 1) as f64
    } else {
        0.
    };
    (0..res).map(move |i| start + i as f64 * step)
}

/// Points of a circular arc about `center`, both endpoints included.
///
/// A reversed angle range traverses the arc clockwise.
pub fn arc_points(center: Coord, radius: f64, start: f64, end: f64, res: usize) -> Vec<Coord> {
    linspace(start, end, res)
        .map(|a| polar(center, radius, a))
        .collect()
}

/// Intersection of two circles.
///
/// Given two known joint positions and two link lengths, the returned pair
/// holds the two candidate positions of the third joint. Solution 0 lies on
/// the left of the `c1 -> c2` direction and solution 1 on the right; every
/// solver relies on this order staying fixed.
pub fn circ_circ(c1: Coord, r1: f64, c2: Coord, r2: f64) -> Result<[Coord; 2], Kind> {
    if r1 < 0. || r2 < 0. {
        return Err(Kind::InvalidLinkLength);
    }
    let d = dist(c1, c2);
    if d > r1 + r2 + ATOL || r1 > r2 + d + ATOL || r2 > r1 + d + ATOL {
        return Err(Kind::NoIntersection);
    }
    if d <= ATOL {
        // Coincident centers; the separation test above leaves only
        // identical circles, which intersect everywhere
        return Err(Kind::Degenerate);
    }
    let phi = dir(c1, c2)?;
    let arg = (d * d + r1 * r1 - r2 * r2) / (2. * r1 * d);
    // NaN falls through the comparison
    if !(arg.abs() <= 1. + RTOL) {
        return Err(Kind::Degenerate);
    }
    let alpha = arg.clamp(-1., 1.).acos();
    Ok([polar(c1, r1, phi + alpha), polar(c1, r1, phi - alpha)])
}

/// Third point rigidly attached to the `from -> to` segment.
///
/// Travel from `from` to `to`, turn counter-clockwise by `gamma`, then
/// proceed a distance `r`. Serves both coupler points and "bent link"
/// joints of a kinematic chain.
pub fn offset_point(from: Coord, to: Coord, r: f64, gamma: f64) -> Result<Coord, Kind> {
    if r < 0. {
        return Err(Kind::InvalidLinkLength);
    }
    Ok(polar(to, r, dir(from, to)? + gamma))
}

/// A point rigidly attached to a reference segment.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RigidOffset {
    /// Distance from the segment's end point
    pub r: f64,
    /// Angle from the segment direction, counter-clockwise
    pub gamma: f64,
}

impl RigidOffset {
    /// Derive the offset that reproduces `target` from the reference
    /// `from -> to` segment.
    ///
    /// Held constant afterwards; [`RigidOffset::apply`] on the reference
    /// segment returns `target` again.
    pub fn from_ref(from: Coord, to: Coord, target: Coord) -> Result<Self, Kind> {
        let r = dist(to, target);
        let gamma = if r <= ATOL {
            0.
        } else {
            dir(to, target)? - dir(from, to)?
        };
        Ok(Self { r, gamma })
    }

    /// Apply the offset to a segment of the moving linkage.
    pub fn apply(&self, from: Coord, to: Coord) -> Result<Coord, Kind> {
        offset_point(from, to, self.r, self.gamma)
    }
}
