use super::*;
use nalgebra::Vector2;
use proptest::prelude::*;

#[test]
fn normalize_and_circular_distance() {
    assert_eq!(normalize_deg(-10.0), 350.0);
    assert_eq!(normalize_deg(360.0), 0.0);
    assert_eq!(normalize_deg(-0.0).to_bits(), 0.0f64.to_bits());
    assert!(normalize_deg(-1e-20) < 360.0);
    assert!((circular_diff(350.0, 10.0) - 20.0).abs() < 1e-12);
    assert!((circular_diff(10.0, 190.0) - 180.0).abs() < 1e-12);
    assert_eq!(circular_diff(45.0, 45.0), 0.0);
}

#[test]
fn polar_roundtrip() {
    let p = polar_to_cartesian(135.0, 2.0);
    let (a, r) = cartesian_to_polar(p);
    assert!((a - 135.0).abs() < 1e-9);
    assert!((r - 2.0).abs() < 1e-12);
}

#[test]
fn sample_angles_half_and_full() {
    let half = sample_angles(45.0, false);
    assert_eq!(half, vec![0.0, 45.0, 90.0, 135.0, 180.0]);
    let odd = sample_angles(70.0, false);
    assert_eq!(odd, vec![0.0, 70.0, 140.0, 180.0]);
    let full = sample_angles(90.0, true);
    assert_eq!(full, vec![0.0, 90.0, 180.0, 270.0]);
}

#[test]
fn sample_angles_step_has_a_floor() {
    let tiny = sample_angles(1e-300, true);
    assert!(tiny.len() <= 36_001);
    assert_eq!(tiny.len(), sample_angles(MIN_SAMPLE_STEP, true).len());
    assert!(tiny.iter().all(|a| *a < 360.0));
}

#[test]
fn bracket_cases() {
    let g = [0.0, 10.0, 20.0];
    assert_eq!(bracket(&g, -1.0), Bracket::Below);
    assert_eq!(bracket(&g, 21.0), Bracket::Above);
    assert_eq!(bracket(&g, 0.0), Bracket::Inside { lo: 0, t: 0.0 });
    assert_eq!(bracket(&g, 10.0), Bracket::Inside { lo: 1, t: 0.0 });
    assert_eq!(bracket(&g, 20.0), Bracket::Inside { lo: 1, t: 1.0 });
    assert_eq!(bracket(&g, 15.0), Bracket::Inside { lo: 1, t: 0.5 });
    assert_eq!(bracket(&[5.0], 5.0), Bracket::Inside { lo: 0, t: 0.0 });
    assert_eq!(bracket(&[5.0], 6.0), Bracket::Above);
    assert_eq!(bracket(&[], 6.0), Bracket::Below);
}

#[test]
fn lerp_hits_endpoints_exactly() {
    let (a, b) = (0.1 + 0.2, 7.3);
    assert_eq!(lerp(a, b, 0.0), a);
    assert_eq!(lerp(a, b, 1.0), b);
    assert_eq!(lerp(5.0, 8.0, 0.5), 6.5);
    assert_eq!(linspace(10.0, 20.0, 3), vec![10.0, 15.0, 20.0]);
    assert_eq!(linspace(3.0, 9.0, 1), vec![3.0]);
}

#[test]
fn hull_drops_interior_points_and_sorts_by_angle() {
    let pts = vec![
        (270.0, 1.0),
        (0.0, 1.0),
        (45.0, 0.1),
        (180.0, 1.0),
        (90.0, 1.0),
    ];
    let hull = convex_hull(&pts);
    assert_eq!(
        hull,
        vec![(0.0, 1.0), (90.0, 1.0), (180.0, 1.0), (270.0, 1.0)]
    );
}

#[test]
fn hull_degenerate_inputs() {
    let two = vec![(20.0, 2.0), (10.0, 1.0)];
    assert_eq!(convex_hull(&two), two);
    let dup = vec![(10.0, 1.0), (10.0, 1.0), (20.0, 2.0)];
    assert_eq!(convex_hull(&dup), dup);
    // All on the 0°/180° axis: only the extremes survive.
    let line = vec![(0.0, 1.0), (0.0, 2.0), (180.0, 3.0), (0.0, 4.0)];
    assert_eq!(convex_hull(&line), vec![(0.0, 4.0), (180.0, 3.0)]);
    assert!(convex_hull(&[]).is_empty());
}

#[test]
fn member_hull_tags_bridging_edges() {
    let sail_a = vec![(0.0, 5.0), (90.0, 1.0), (270.0, 4.0)];
    let sail_b = vec![(90.0, 6.0), (180.0, 5.0)];
    let h = member_hull(&[sail_a, sail_b]);
    assert_eq!(h.vertices.len(), 4);
    assert_eq!(h.edges.len(), 4);
    for e in &h.edges {
        let (mf, mt) = (h.vertices[e.from].member, h.vertices[e.to].member);
        if mf == mt {
            assert_eq!(e.member, Some(mf));
        } else {
            assert_eq!(e.member, None);
        }
    }
    assert_eq!(h.edges.iter().filter(|e| e.member.is_none()).count(), 2);
    assert!(!h.vertices.iter().any(|v| v.angle == 90.0 && v.radius == 1.0));
}

#[test]
fn member_hull_small_inputs() {
    assert!(member_hull(&[]).edges.is_empty());
    let h = member_hull(&[vec![(0.0, 1.0)], vec![(90.0, 2.0)]]);
    assert_eq!(h.vertices.len(), 2);
    assert_eq!(h.edges, vec![HullEdge { from: 0, to: 1, member: None }]);
}

fn cross(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>) -> f64 {
    let ab = b - a;
    let ac = c - a;
    ab.x * ac.y - ab.y * ac.x
}

proptest! {
    #[test]
    fn hull_is_convex_subset_and_encloses(
        pts in prop::collection::vec((0.0f64..360.0, 0.1f64..20.0), 3..40)
    ) {
        let cart: Vec<Vector2<f64>> = pts.iter().map(|&(a, r)| polar_to_cartesian(a, r)).collect();
        let idx = hull_ccw(&cart);
        if idx.len() >= 3 {
            let n = idx.len();
            for k in 0..n {
                let (p, q, r) = (cart[idx[k]], cart[idx[(k + 1) % n]], cart[idx[(k + 2) % n]]);
                prop_assert!(cross(p, q, r) > 0.0);
                for c in &cart {
                    prop_assert!(cross(p, q, *c) >= -1e-6);
                }
            }
        }

        let polar = convex_hull(&pts);
        for v in &polar {
            prop_assert!(pts.contains(v));
        }
        for w in polar.windows(2) {
            prop_assert!(w[0].0 <= w[1].0);
        }
    }
}
