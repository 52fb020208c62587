use crate::constants::AU;
use crate::coordinates::*;
use crate::grid::*;

#[test]
fn test_cartesian_to_spherical_roundtrip() {
    let positions = [
        CartesianPosition::new(1.0, 0.0, 0.0),
        CartesianPosition::new(0.0, 1.0, 0.0),
        CartesianPosition::new(0.0, 0.0, 1.0),
        CartesianPosition::new(1.0, 1.0, 1.0),
        CartesianPosition::from_au(1.0, 0.0, 0.0),
        CartesianPosition::from_au(5.2, 0.3, -0.1),
    ];

    for pos in positions {
        let spherical = pos.to_spherical();
        let back = spherical.to_cartesian();

        let tolerance = pos.magnitude() * 1e-10; // Relative tolerance
        assert!((pos.x - back.x).abs() < tolerance, "x mismatch");
        assert!((pos.y - back.y).abs() < tolerance, "y mismatch");
        assert!((pos.z - back.z).abs() < tolerance, "z mismatch");
    }
}

#[test]
fn test_normalize_angle_range() {
    let two_pi = 2.0 * std::f64::consts::PI;
    for raw in [-10.0, -two_pi, -0.1, 0.0, 0.1, two_pi, 123.456] {
        let a = normalize_angle(raw);
        assert!((0.0..two_pi).contains(&a), "angle {} out of range", a);
    }
}

#[test]
fn test_normalize_angle_identity() {
    // Angles already in range pass through unchanged
    for a in [0.0, 1.0, 3.0, 6.0] {
        assert!((normalize_angle(a) - a).abs() < 1e-15);
    }
}

#[test]
fn test_distance_to_symmetry() {
    let a = CartesianPosition::from_au(1.0, 0.0, 0.0);
    let b = CartesianPosition::from_au(0.0, 1.0, 0.0);
    assert!((a.distance_to(&b) - b.distance_to(&a)).abs() < 1e-6);
    assert!((a.distance_to(&b) - AU * 2.0_f64.sqrt()).abs() < 1.0);
}

#[test]
fn test_ring_radii_increase() {
    let grid = ReferenceGrid::with_defaults();

    for k in 0..30 {
        assert!(
            grid.ring_radius(k + 1) > grid.ring_radius(k),
            "ring {} not larger than ring {}",
            k + 1,
            k
        );
    }
}

#[test]
fn test_ring_doubling() {
    let grid = ReferenceGrid::with_defaults();

    // With base 2, each ring should double in radius
    for k in 0..30 {
        let ratio = grid.ring_radius(k + 1) / grid.ring_radius(k);
        assert!(
            (ratio - 2.0).abs() < 1e-10,
            "ring {} ratio is {} (expected 2.0)",
            k,
            ratio
        );
    }
}

#[test]
fn test_ring_count_covers_neptune() {
    let grid = ReferenceGrid::with_defaults();

    let count = grid.ring_count_for(30.07 * AU);
    // 4.6e10 * 2^k >= 30 AU at k ≈ 6.6, so 7 rings inside plus ring 0
    assert!(count >= 6 && count <= 8, "count = {}", count);

    let radii = grid.ring_radii(30.07 * AU);
    assert_eq!(radii.len(), count as usize);
    assert!(radii.last().unwrap() <= &(30.07 * AU));
}

#[test]
fn test_ring_polyline_closes() {
    let grid = ReferenceGrid::with_defaults();
    let ring = grid.ring_polyline(3);

    let first = ring.first().unwrap();
    let last = ring.last().unwrap();
    assert!((first.x - last.x).abs() < 1e-3);
    assert!((first.y - last.y).abs() < 1e-3);

    // Every sample sits on the ring radius, in the ecliptic plane
    let r = grid.ring_radius(3);
    for p in &ring {
        assert!((p.magnitude() - r).abs() < r * 1e-12);
        assert_eq!(p.z, 0.0);
    }
}

#[test]
fn test_spoke_angles_even() {
    let grid = ReferenceGrid::with_defaults();
    let n = grid.config().n_spokes;

    let step = grid.spoke_angle(1) - grid.spoke_angle(0);
    assert!((step - 2.0 * std::f64::consts::PI / n as f64).abs() < 1e-12);

    let [inner, outer] = grid.spoke_polyline(0, 10.0 * AU);
    assert!((inner.magnitude() - grid.config().r_min).abs() < 1e-3);
    assert!((outer.magnitude() - 10.0 * AU).abs() < 1e-3);
}
