#![warn(clippy::pedantic)]

use barframe::{point, LcsError, LocalAxisProvider, Point, Structure, StructureEditError};
use nalgebra::Vector3;

#[derive(Debug, Clone, Copy)]
struct Expected {
    y_prime: Vector3<f64>,
    z_prime: Vector3<f64>,
    origin: Point,
}

fn assert_frame(start: Point, end: Point, k_point: Option<Point>, expected: Expected) {
    let frame = LocalAxisProvider::new()
        .compute_lcs(start, end, k_point)
        .expect("frame is computed");
    assert_eq!(frame.y_prime(), expected.y_prime, "y' for {start:?} -> {end:?}");
    assert_eq!(frame.z_prime(), expected.z_prime, "z' for {start:?} -> {end:?}");
    assert_eq!(frame.origin(), expected.origin, "origin for {start:?} -> {end:?}");
}

#[test]
fn bar_along_x_without_k_point() {
    let frame = LocalAxisProvider::new()
        .compute_lcs(point(0.0, 0.0, 0.0), point(2.0, 0.0, 0.0), None)
        .expect("frame is computed");
    assert_eq!(frame.x_prime(), Vector3::x());
    assert_frame(
        point(0.0, 0.0, 0.0),
        point(2.0, 0.0, 0.0),
        None,
        Expected {
            y_prime: Vector3::y(),
            z_prime: Vector3::z(),
            origin: point(1.0, 0.0, 0.0),
        },
    );
}

#[test]
fn valid_k_point_is_used() {
    assert_frame(
        point(0.0, 0.0, 0.0),
        point(1.0, 0.0, 0.0),
        Some(point(0.0, 1.0, 0.0)),
        Expected {
            y_prime: Vector3::y(),
            z_prime: Vector3::z(),
            origin: point(0.5, 0.0, 0.0),
        },
    );
}

#[test]
fn coincident_end_points_are_rejected() {
    let error = LocalAxisProvider::new()
        .compute_lcs(point(1.0, 1.0, 1.0), point(1.0, 1.0, 1.0), None)
        .expect_err("zero length bar");
    assert!(matches!(error, LcsError::DegenerateBar { .. }));
    assert_eq!(error.to_string(), "bar length too small (0e0)");
}

#[test]
fn sub_tolerance_bar_is_rejected() {
    let error = LocalAxisProvider::new()
        .compute_lcs(point(0.0, 0.0, 0.0), point(0.0, 0.0, 1.0e-10), None)
        .expect_err("sub-tolerance bar");
    assert!(matches!(error, LcsError::DegenerateBar { .. }));
}

#[test]
fn k_point_at_start_node_falls_back() {
    assert_frame(
        point(0.0, 0.0, 0.0),
        point(1.0, 0.0, 0.0),
        Some(point(1.0e-10, 0.0, 0.0)),
        Expected {
            y_prime: Vector3::y(),
            z_prime: Vector3::z(),
            origin: point(0.5, 0.0, 0.0),
        },
    );
}

#[test]
fn collinear_k_point_falls_back() {
    assert_frame(
        point(0.0, 0.0, 0.0),
        point(1.0, 0.0, 0.0),
        Some(point(5.0, 0.0, 0.0)),
        Expected {
            y_prime: Vector3::y(),
            z_prime: Vector3::z(),
            origin: point(0.5, 0.0, 0.0),
        },
    );
    // Behind the start node the K-point direction is anti-parallel.
    assert_frame(
        point(0.0, 0.0, 0.0),
        point(1.0, 0.0, 0.0),
        Some(point(-3.0, 0.0, 0.0)),
        Expected {
            y_prime: Vector3::y(),
            z_prime: Vector3::z(),
            origin: point(0.5, 0.0, 0.0),
        },
    );
}

#[test]
fn vertical_bar_uses_global_x() {
    assert_frame(
        point(0.0, 0.0, 0.0),
        point(0.0, 0.0, 1.0),
        None,
        Expected {
            y_prime: Vector3::x(),
            z_prime: Vector3::y(),
            origin: point(0.0, 0.0, 0.5),
        },
    );
}

#[test]
fn bar_along_y_uses_global_x() {
    assert_frame(
        point(0.0, 0.0, 0.0),
        point(0.0, 3.0, 0.0),
        None,
        Expected {
            y_prime: Vector3::x(),
            z_prime: -Vector3::z(),
            origin: point(0.0, 1.5, 0.0),
        },
    );
}

#[test]
fn coarse_tolerance_changes_k_point_acceptance() {
    let start = point(0.0, 0.0, 0.0);
    let end = point(1.0, 0.0, 0.0);
    let k_point = Some(point(0.6, 0.0, 0.8));

    let mut provider = LocalAxisProvider::new();
    let accepted = provider.compute_lcs(start, end, k_point).expect("frame");
    assert!((accepted.y_prime() - Vector3::z()).norm() < 1.0e-12);

    provider.set_parallel_epsilon(0.5);
    let rejected = provider.compute_lcs(start, end, k_point).expect("frame");
    assert_eq!(rejected.y_prime(), Vector3::y());
    assert_eq!(rejected.z_prime(), Vector3::z());
}

#[test]
fn structure_refuses_zero_length_bars() {
    let mut structure = Structure::new();
    let a = structure.add_node(point(2.0, 2.0, 2.0));
    let b = structure.add_node(point(2.0, 2.0, 2.0));
    let error = structure.add_bar(a, b, None).expect_err("bar length too small");
    assert!(matches!(
        error,
        StructureEditError::InvalidGeometry {
            source: LcsError::DegenerateBar { .. },
            ..
        }
    ));
    assert_eq!(structure.bar_count(), 0);
}

#[test]
fn portal_frame_orientation() {
    let mut structure = Structure::new();
    let base_left = structure.add_node(point(0.0, 0.0, 0.0));
    let top_left = structure.add_node(point(0.0, 0.0, 4.0));
    let top_right = structure.add_node(point(6.0, 0.0, 4.0));
    let base_right = structure.add_node(point(6.0, 0.0, 0.0));

    // Orient the columns so their local y axes face the frame interior.
    let left = structure
        .add_bar(base_left, top_left, Some(point(6.0, 0.0, 0.0)))
        .expect("left column");
    let beam = structure
        .add_bar(top_left, top_right, None)
        .expect("beam");
    let right = structure
        .add_bar(base_right, top_right, Some(point(0.0, 0.0, 0.0)))
        .expect("right column");

    let left_frame = structure.bar_frame(left).expect("left frame");
    assert_eq!(left_frame.x_prime(), Vector3::z());
    assert_eq!(left_frame.y_prime(), Vector3::x());
    assert_eq!(left_frame.origin(), point(0.0, 0.0, 2.0));

    let right_frame = structure.bar_frame(right).expect("right frame");
    assert_eq!(right_frame.y_prime(), -Vector3::x());

    let beam_frame = structure.bar_frame(beam).expect("beam frame");
    assert_eq!(beam_frame.y_prime(), Vector3::y());
    assert_eq!(beam_frame.origin(), point(3.0, 0.0, 4.0));

    assert_eq!(structure.frames().count(), 3);
    assert!(structure
        .frames()
        .all(|(_, frame)| frame.is_orthonormal(1.0e-12)));
}
