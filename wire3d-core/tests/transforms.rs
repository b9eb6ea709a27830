use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use approx::assert_relative_eq;
use nalgebra::Vector3;
use wire3d_core::shapes::{cuboid, spheroid};
use wire3d_core::{node, Axis, Mesh, Scene, Transform, WireframeError};

fn sample_mesh() -> Mesh {
    let mut mesh = cuboid([100.0, 100.0, 10.0], [20.0, 30.0, 40.0]);
    mesh.add_nodes([[-3.5, 7.25, 1e3], [0.0, 0.0, 0.0]]);
    mesh
}

fn assert_same_nodes(a: &Mesh, b: &Mesh) {
    assert_eq!(a.node_count(), b.node_count());
    for (p, q) in a.nodes().iter().zip(b.nodes()) {
        assert_relative_eq!(*p, *q, epsilon = 1e-7);
    }
}

#[test]
fn translations_add_up() {
    let (v1, v2) = (Vector3::new(4.0, -3.0, 1.5), Vector3::new(-10.0, 0.25, 7.0));
    let mut stepwise = sample_mesh();
    stepwise.apply_transform(&Transform::translation(v1.x, v1.y, v1.z));
    stepwise.apply_transform(&Transform::translation(v2.x, v2.y, v2.z));

    let mut direct = sample_mesh();
    let sum = v1 + v2;
    direct.apply_transform(&Transform::translation(sum.x, sum.y, sum.z));
    assert_same_nodes(&stepwise, &direct);
}

#[test]
fn rotation_round_trips() {
    let original = sample_mesh();
    let pivot = Vector3::new(12.0, -4.0, 30.0);
    let axes = [
        Vector3::x(),
        Vector3::y(),
        Vector3::z(),
        Vector3::new(1.0, 2.0, 3.0),
        Vector3::new(-1.0, 0.0, 0.5),
    ];
    for direction in axes {
        for angle in [0.0, FRAC_PI_4, FRAC_PI_2, PI, 3.0 * FRAC_PI_2] {
            let mut mesh = original.clone();
            mesh.apply_transform(&Transform::rotation_about_axis(&pivot, &direction, angle).unwrap());
            mesh.apply_transform(&Transform::rotation_about_axis(&pivot, &direction, -angle).unwrap());
            assert_same_nodes(&mesh, &original);
        }
    }
    for axis in [Axis::X, Axis::Y, Axis::Z] {
        let mut mesh = original.clone();
        mesh.rotate(axis, 1.234, &pivot);
        mesh.rotate(axis, -1.234, &pivot);
        assert_same_nodes(&mesh, &original);
    }
}

#[test]
fn scaling_round_trips() {
    let original = sample_mesh();
    let centre = Vector3::new(100.0, 150.0, 200.0);
    for s in [2.0, 0.8, -3.0, 1e-3] {
        let mut mesh = original.clone();
        mesh.scale(s, &centre);
        mesh.scale(1.0 / s, &centre);
        assert_same_nodes(&mesh, &original);
    }
}

#[test]
fn nodes_stay_homogeneous_under_transforms() {
    let mut mesh = spheroid([0.0, 0.0, 0.0], [10.0, 20.0, 30.0], 6);
    mesh.apply_transform(&Transform::compose(&[
        Transform::scaling(3.0, &Vector3::new(1.0, 1.0, 1.0)),
        Transform::rotation_about_axis(&Vector3::new(5.0, 0.0, 0.0), &Vector3::new(0.3, 1.0, 0.2), 0.7).unwrap(),
        Transform::translation(-2.0, 8.0, 1.0),
    ]));
    assert!(mesh.nodes().iter().all(|n| n.w == 1.0));
}

#[test]
fn triangle_translation_scenario() {
    let mut triangle = Mesh::from_nodes([[100.0, 200.0, 10.0], [200.0, 200.0, 10.0], [125.0, 100.0, 500.0]]);
    assert!(triangle.add_edges([(0, 1), (1, 2), (2, 0)]).is_clean());
    triangle.apply_transform(&Transform::translation(4.0, 3.0, 1.0));
    assert_eq!(triangle.nodes()[0], node(104.0, 203.0, 11.0));
}

#[test]
fn faces_by_depth_is_a_permutation() {
    let mut mesh = spheroid([0.0, 0.0, 0.0], [50.0, 50.0, 50.0], 10);
    mesh.rotate(Axis::X, 0.4, &Vector3::zeros());
    let mut order: Vec<usize> = mesh.faces_by_depth().collect();
    let keys: Vec<f64> = order.iter().map(|&f| mesh.face_min_z(f).unwrap()).collect();
    assert!(keys.windows(2).all(|w| w[0] <= w[1]));
    order.sort_unstable();
    assert_eq!(order, (0..mesh.face_count()).collect::<Vec<_>>());
}

#[test]
fn two_cuboid_scene_centroid() {
    let mut scene = Scene::new();
    scene.add_mesh("cube1", cuboid([0.0, 0.0, 0.0], [10.0, 10.0, 10.0]));
    scene.add_mesh("cube2", cuboid([100.0, 0.0, 0.0], [50.0, 20.0, 10.0]));
    // Box spans x 0..150, y 0..20, z 0..10
    assert_relative_eq!(scene.centroid().unwrap(), Vector3::new(75.0, 10.0, 5.0));
}

#[test]
fn empty_collections_fail_explicitly() {
    assert_eq!(Mesh::new().bounding_box(), Err(WireframeError::EmptyCollection("mesh")));
    assert_eq!(Scene::new().bounding_box(), Err(WireframeError::EmptyCollection("scene")));
}
