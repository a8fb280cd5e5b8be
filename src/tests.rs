use crate::*;
use approx::assert_abs_diff_eq;
use std::f64::consts::{FRAC_PI_2, PI};

const EPS: f64 = 1e-6;

fn assert_pt(p: Coord, q: Coord) {
    assert_abs_diff_eq!(p[0], q[0], epsilon = EPS);
    assert_abs_diff_eq!(p[1], q[1], epsilon = EPS);
}

fn rot([x, y]: Coord, t: f64) -> Coord {
    [x * t.cos() - y * t.sin(), x * t.sin() + y * t.cos()]
}

#[test]
fn intersection_points_and_order() {
    // 3-4-5 triangles on both sides of the center line
    let [a, b] = circ_circ([0., 0.], 5., [6., 0.], 5.).unwrap();
    // Solution 0 is on the left when traveling from c1 to c2
    assert_pt(a, [3., 4.]);
    assert_pt(b, [3., -4.]);
    for (c1, r1, c2, r2) in [
        ([0., 0.], 5., [6., 0.], 5.),
        ([1., 2.], 3., [4.5, -1.], 2.),
        ([-3., 0.5], 10., [2., 4.], 7.5),
    ] {
        let [a, b] = circ_circ(c1, r1, c2, r2).unwrap();
        for p in [a, b] {
            assert_abs_diff_eq!(dist(p, c1), r1, epsilon = EPS);
            assert_abs_diff_eq!(dist(p, c2), r2, epsilon = EPS);
        }
    }
}

#[test]
fn intersection_order_is_rigid_motion_invariant() {
    let (c1, r1, c2, r2) = ([1., 2.], 3., [4.5, -1.], 2.);
    let [a, b] = circ_circ(c1, r1, c2, r2).unwrap();
    for t in [0.3, 1.9, -2.4] {
        let [ra, rb] = circ_circ(rot(c1, t), r1, rot(c2, t), r2).unwrap();
        assert_pt(ra, rot(a, t));
        assert_pt(rb, rot(b, t));
    }
    let shift = |[x, y]: Coord| [x - 7.5, y + 2.25];
    let [sa, sb] = circ_circ(shift(c1), r1, shift(c2), r2).unwrap();
    assert_pt(sa, shift(a));
    assert_pt(sb, shift(b));
}

#[test]
fn intersection_failures() {
    // Too far apart
    assert_eq!(
        circ_circ([0., 0.], 1., [10., 0.], 1.),
        Err(Kind::NoIntersection)
    );
    // One circle inside the other
    assert_eq!(
        circ_circ([0., 0.], 1., [0., 0.], 5.),
        Err(Kind::NoIntersection)
    );
    // Identical circles
    assert_eq!(circ_circ([0., 0.], 2., [0., 0.], 2.), Err(Kind::Degenerate));
    // Negative link length
    assert_eq!(
        circ_circ([0., 0.], -1., [3., 0.], 2.),
        Err(Kind::InvalidLinkLength)
    );
}

#[test]
fn intersection_tangency_collapses_to_one_point() {
    let [a, b] = circ_circ([0., 0.], 1., [2., 0.], 1.).unwrap();
    assert_pt(a, [1., 0.]);
    assert_pt(b, [1., 0.]);
}

#[test]
fn arc_sampling() {
    let pts = arc_points([0., 0.], 5., 0., PI, 3);
    assert_eq!(pts.len(), 3);
    assert_pt(pts[0], [5., 0.]);
    assert_pt(pts[1], [0., 5.]);
    assert_pt(pts[2], [-5., 0.]);
    // Reversed range runs clockwise
    let back = arc_points([0., 0.], 5., PI, 0., 3);
    assert_pt(back[0], [-5., 0.]);
    assert_pt(back[2], [5., 0.]);
}

#[test]
fn linspace_endpoints_and_restart() {
    let it = linspace(0.5, -1.5, 5);
    assert_eq!(it.len(), 5);
    let first = it.clone().collect::<Vec<_>>();
    assert_eq!(first, it.collect::<Vec<_>>());
    assert_abs_diff_eq!(first[0], 0.5);
    assert_abs_diff_eq!(first[4], -1.5);
    assert_eq!(linspace(1.2, 9., 1).collect::<Vec<_>>(), vec![1.2]);
}

#[test]
fn offset_point_quadrants() {
    assert_pt(offset_point([0., 0.], [1., 0.], 1., FRAC_PI_2).unwrap(), [1., 1.]);
    // Direction pointing into the third quadrant
    assert_pt(
        offset_point([1., 1.], [0., 0.], 2f64.sqrt(), 0.).unwrap(),
        [-1., -1.],
    );
    assert_eq!(
        offset_point([1., 1.], [1., 1.], 1., 0.),
        Err(Kind::Degenerate)
    );
    assert_eq!(
        offset_point([0., 0.], [1., 0.], -1., 0.),
        Err(Kind::InvalidLinkLength)
    );
}

#[test]
fn rigid_offset_reproduces_reference() {
    let (from, to, target) = ([0.3, 1.2], [2.1, 0.4], [1.5, 2.2]);
    let off = RigidOffset::from_ref(from, to, target).unwrap();
    assert_pt(off.apply(from, to).unwrap(), target);
    // The offset is rigid: it follows the segment through a rotation
    for t in [0.9, -2.1] {
        assert_pt(off.apply(rot(from, t), rot(to, t)).unwrap(), rot(target, t));
    }
}

#[test]
fn assembly_selection() {
    let candidates = [[3., 4.], [3., -4.]];
    assert_eq!(Assembly::select(&candidates, [3., 4.]), Ok(Assembly::Left));
    assert_eq!(Assembly::select(&candidates, [3., -4.]), Ok(Assembly::Right));
    // Idempotent
    assert_eq!(Assembly::select(&candidates, [3., 4.]), Ok(Assembly::Left));
    // The selector tracks geometry, not array position
    let swapped = [[3., -4.], [3., 4.]];
    assert_eq!(Assembly::select(&swapped, [3., 4.]), Ok(Assembly::Right));
    // Neither candidate matches
    assert_eq!(
        Assembly::select(&candidates, [0., 0.]),
        Err(Kind::AmbiguousAssembly)
    );
    // Both candidates match (tangent reference)
    assert_eq!(
        Assembly::select(&[[1., 0.], [1., 0.]], [1., 0.]),
        Err(Kind::AmbiguousAssembly)
    );
    assert_eq!(Assembly::try_from(0), Ok(Assembly::Left));
    assert_eq!(Assembly::try_from(1), Ok(Assembly::Right));
    assert_eq!(Assembly::try_from(2), Err(Kind::AmbiguousAssembly));
    assert_eq!(Assembly::Right.pick([[1., 2.], [3., 4.]]), [3., 4.]);
}

#[test]
fn grashof_condition() {
    assert!(is_grashof([9., 3., 10., 6.]));
    assert!(!is_grashof([5., 10., 6., 4.]));
}

#[test]
fn four_bar_full_turn() {
    // Grashof crank rocker: l1=9, l2=3, l3=10, l4=6
    let joint12 = [0., 0.];
    let joint14 = [9., 0.];
    let joint23 = [3., 0.];
    let joint34 = circ_circ(joint23, 10., joint14, 6.).unwrap()[0];
    let coupler = offset_point(joint34, joint23, 5., 0.8).unwrap();
    let fb = FourBar { joint12, joint23, joint34, joint14, coupler };
    let model = fb.calibrate().unwrap();
    assert_eq!(model.asm, Assembly::Left);
    assert!(is_grashof(model.planar_loop()));
    // Calibration is deterministic
    assert_eq!(model, fb.calibrate().unwrap());
    let path = model.trajectory(&Sweep::full_turn(24)).unwrap();
    assert_eq!(path.joint23.len(), 24);
    assert_eq!(path.joint34.len(), 24);
    assert_eq!(path.coupler.len(), 24);
    // Sample 0 reproduces the reference pose
    assert_pt(path.joint23[0], joint23);
    assert_pt(path.joint34[0], joint34);
    assert_pt(path.coupler[0], coupler);
    for i in 0..24 {
        assert_abs_diff_eq!(dist(path.joint23[i], joint12), 3., epsilon = EPS);
        assert_abs_diff_eq!(dist(path.joint34[i], path.joint23[i]), 10., epsilon = EPS);
        assert_abs_diff_eq!(dist(path.joint34[i], joint14), 6., epsilon = EPS);
    }
    // No branch flip: a flip would jump about twice the chord height
    // (around 10 units here), real motion steps stay small
    for w in path.joint34.windows(2) {
        assert!(dist(w[0], w[1]) < 4.);
    }
}

#[test]
fn four_bar_reports_failing_sample() {
    // Non-Grashof loop: the crank cannot complete a revolution
    let joint12 = [0., 0.];
    let joint14 = [9., 0.];
    let joint23 = [5., 0.];
    let joint34 = circ_circ(joint23, 3., joint14, 2.).unwrap()[0];
    let coupler = offset_point(joint34, joint23, 1., 0.3).unwrap();
    let fb = FourBar { joint12, joint23, joint34, joint14, coupler };
    let model = fb.calibrate().unwrap();
    let err = model.trajectory(&Sweep::full_turn(24)).unwrap_err();
    assert_eq!(
        err,
        SolveError::Sample { joint: "joint34", sample: 2, kind: Kind::NoIntersection }
    );
    assert_eq!(err.joint(), "joint34");
    assert_eq!(err.kind(), Kind::NoIntersection);
    assert_eq!(
        err.to_string(),
        "joint34 at sample 2: circles do not intersect"
    );
}

#[test]
fn four_bar_tangent_reference_is_ambiguous() {
    // Collinear reference: both intersections coincide with the joint
    let fb = FourBar {
        joint12: [-3., 0.],
        joint23: [0., 0.],
        joint34: [4., 0.],
        joint14: [9., 0.],
        coupler: [4., 1.],
    };
    let err = fb.calibrate().unwrap_err();
    assert_eq!(
        err,
        SolveError::Calibration { joint: "joint34", kind: Kind::AmbiguousAssembly }
    );
    assert_eq!(
        err.to_string(),
        "calibration of joint34: neither or both intersections match the reference joint"
    );
}

#[test]
fn geared_five_bar_sweep() {
    let gfb = GearedFiveBar {
        joint12: [0., 0.],
        joint23: [0., 1.],
        joint34: [2., 2.5],
        joint45: [4., 1.],
        joint15: [4., 0.],
        coupler: [3., 2.],
        ratio: -2.,
    };
    let model = gfb.calibrate().unwrap();
    assert_eq!(model.asm, Assembly::Left);
    assert_abs_diff_eq!(model.theta2, FRAC_PI_2, epsilon = EPS);
    assert_abs_diff_eq!(model.theta5, FRAC_PI_2, epsilon = EPS);
    let sweep = model.sweep(0.4, 9);
    let path = model.trajectory(&sweep).unwrap();
    // Sample 0 reproduces the reference pose
    assert_pt(path.joint23[0], gfb.joint23);
    assert_pt(path.joint34[0], gfb.joint34);
    assert_pt(path.joint45[0], gfb.joint45);
    assert_pt(path.coupler[0], gfb.coupler);
    for (i, theta2) in sweep.angles().enumerate() {
        // Loop closure holds at every sample
        assert_abs_diff_eq!(dist(path.joint34[i], path.joint23[i]), 2.5, epsilon = EPS);
        assert_abs_diff_eq!(dist(path.joint34[i], path.joint45[i]), 2.5, epsilon = EPS);
        // The output crank obeys the gear constraint
        let [x, y] = path.joint45[i];
        let theta5 = (y - gfb.joint15[1]).atan2(x - gfb.joint15[0]);
        assert_abs_diff_eq!(theta5, model.output_angle(theta2), epsilon = EPS);
    }
}

#[test]
fn geared_five_bar_rejects_zero_ratio() {
    let gfb = GearedFiveBar {
        joint12: [0., 0.],
        joint23: [0., 1.],
        joint34: [2., 2.5],
        joint45: [4., 1.],
        joint15: [4., 0.],
        coupler: [3., 2.],
        ratio: 0.,
    };
    assert_eq!(
        gfb.calibrate().unwrap_err(),
        SolveError::Calibration { joint: "joint45", kind: Kind::Degenerate }
    );
}

fn klann_example() -> Klann {
    Klann {
        joint12: [0., 0.],
        joint14: [-2., 0.],
        joint15: [0., 2.],
        joint23: [1., 0.],
        joint34: [-2., 2.],
        joint36: [-1., 3.],
        joint56: [-1., 1.5],
        foot: [-1.8, 0.2],
    }
}

#[test]
fn klann_chained_loops() {
    let klann = klann_example();
    let model = klann.calibrate().unwrap();
    // Both loops calibrated independently against the reference pose
    assert_eq!(model.asm1, Assembly::Right);
    assert_eq!(model.asm2, Assembly::Right);
    let path = model.trajectory(&Sweep::new(0., 0.5, 6)).unwrap();
    // Sample 0 (the reference crank angle) reproduces the reference pose,
    // through both loops and both bent links
    assert_pt(path.joint23[0], klann.joint23);
    assert_pt(path.joint34[0], klann.joint34);
    assert_pt(path.joint36[0], klann.joint36);
    assert_pt(path.joint56[0], klann.joint56);
    assert_pt(path.foot[0], klann.foot);
    let l3 = dist(klann.joint23, klann.joint34);
    let l5 = dist(klann.joint15, klann.joint56);
    let elbow_arm = dist(klann.joint23, klann.joint36);
    for i in 0..6 {
        assert_abs_diff_eq!(dist(path.joint23[i], path.joint34[i]), l3, epsilon = EPS);
        assert_abs_diff_eq!(dist(path.joint56[i], klann.joint15), l5, epsilon = EPS);
        // Link 3 is one rigid body: crank pin, joint34 and the elbow keep
        // their mutual distances
        assert_abs_diff_eq!(dist(path.joint23[i], path.joint36[i]), elbow_arm, epsilon = EPS);
    }
}

#[test]
fn klann_inconsistent_output_loop_fails_calibration() {
    // Move joint56 onto the line between joint36 and joint15: the output
    // loop collapses to its tangent configuration while loop 1 stays valid
    let mut klann = klann_example();
    klann.joint56 = [-0.5, 2.5];
    assert_eq!(
        klann.calibrate().unwrap_err(),
        SolveError::Calibration { joint: "joint56", kind: Kind::AmbiguousAssembly }
    );
}

#[test]
fn jansen_leg_sweep() {
    let leg = Jansen::example();
    let model = leg.calibrate().unwrap();
    let path = model.trajectory(&Sweep::new(1.4, 1.4 + 1.95 * PI, 24)).unwrap();
    assert_eq!(path.foot.len(), 24);
    for i in 0..24 {
        // Symmetric rocker pair
        assert_abs_diff_eq!(dist(path.joint3[i], path.crank[i]), leg.le, epsilon = EPS);
        assert_abs_diff_eq!(dist(path.joint4[i], path.crank[i]), leg.le, epsilon = EPS);
        assert_abs_diff_eq!(dist(path.joint3[i], model.p2), leg.ld, epsilon = EPS);
        assert_abs_diff_eq!(dist(path.joint4[i], model.p2), leg.ld, epsilon = EPS);
        // Bent link and foot triangle
        assert_abs_diff_eq!(dist(path.joint5[i], model.p2), leg.ld, epsilon = EPS);
        assert_abs_diff_eq!(dist(path.foot[i], path.joint5[i]), leg.lf, epsilon = EPS);
        assert_abs_diff_eq!(dist(path.foot[i], path.joint4[i]), leg.lf, epsilon = EPS);
    }
}

#[test]
fn topology_dispatch() {
    let table = Topology::FourBar(FourBar::example())
        .solve(&Sweep::full_turn(12))
        .unwrap();
    let names = table.iter().map(|(n, _)| *n).collect::<Vec<_>>();
    assert_eq!(names, ["joint23", "joint34", "coupler"]);
    assert!(table.iter().all(|(_, c)| c.len() == 12));
}

#[cfg(feature = "csv")]
mod csv {
    use crate::csv::{dump_table, read_four_bar, TableError};

    const FB_TABLE: &str = "\
# joint12, joint23, joint34, joint14, coupler
0.0\t0.0
3.0\t0.0
9.0\t8.0
9.0\t2.0
5.0\t5.0
";

    #[test]
    fn read_joint_table() {
        let fb = read_four_bar(FB_TABLE).unwrap();
        assert_eq!(fb.joint34, [9., 8.]);
        assert_eq!(fb.coupler, [5., 5.]);
    }

    #[test]
    fn reject_wrong_row_count() {
        let short = "0.0\t0.0\n1.0\t2.0\n";
        match read_four_bar(short) {
            Err(TableError::RowCount { expected: 5, got: 2 }) => (),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn dump_trajectory_table() {
        let table = vec![
            ("joint23", vec![[1., 2.], [3., 4.]]),
            ("coupler", vec![[5., 6.], [7., 8.]]),
        ];
        let s = dump_table(&table).unwrap();
        let mut lines = s.lines();
        assert_eq!(lines.next(), Some("# joint23(x,y),\tcoupler(x,y)"));
        assert_eq!(lines.next(), Some("1.00\t2.00\t5.00\t6.00"));
        assert_eq!(lines.next(), Some("3.00\t4.00\t7.00\t8.00"));
    }
}
