//! Nodes, edges and faces of a single rigid mesh
use std::collections::HashSet;
use std::fmt;
use std::ops::Range;

use nalgebra::{Matrix4, RowVector4, Vector3};

use crate::color::Color;
use crate::constants::{DEFAULT_FACE_COLOR, EPSILON};
use crate::error::{Result, WireframeError};
use crate::transform::{Axis, Transform};

/// A point in homogeneous row-vector form `(x, y, z, 1)`
pub type Node = RowVector4<f64>;

/// Lift a 3D point to a homogeneous node
pub fn node(x: f64, y: f64, z: f64) -> Node {
    RowVector4::new(x, y, z, 1.0)
}

/// A connection between two node indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub start: usize,
    pub stop: usize,
}

impl Edge {
    pub fn new(start: usize, stop: usize) -> Self {
        Self { start, stop }
    }

    /// Orientation-free key, so (a, b) and (b, a) compare equal
    fn key(self) -> (usize, usize) {
        (self.start.min(self.stop), self.start.max(self.stop))
    }
}

/// A planar polygon given by node indices in winding order
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    pub nodes: Vec<usize>,
    pub color: Color,
}

/// Axis-aligned bounds of a set of nodes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Vector3<f64>,
    pub max: Vector3<f64>,
}

impl BoundingBox {
    pub fn from_point(p: Vector3<f64>) -> Self {
        Self { min: p, max: p }
    }

    /// Grow the box to contain `p`
    pub fn include(&mut self, p: &Vector3<f64>) {
        self.min = self.min.inf(p);
        self.max = self.max.sup(p);
    }

    /// Smallest box containing both boxes
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    /// Midpoint of the box
    pub fn centre(&self) -> Vector3<f64> {
        (self.min + self.max) * 0.5
    }
}

/// Outcome of a batch insertion; rejected items are skipped, not fatal
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ingest {
    pub added: usize,
    pub rejected: Vec<WireframeError>,
}

impl Ingest {
    fn record(&mut self, outcome: Result<bool>) {
        match outcome {
            Ok(true) => self.added += 1,
            Ok(false) => {}
            Err(e) => {
                log::warn!("Skipping geometry: {}", e);
                self.rejected.push(e);
            }
        }
    }

    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// A 3D mesh of nodes joined by edges and faces.
///
/// Meshes only grow: nodes, edges and faces are appended and never removed or
/// reindexed, so an index handed out once stays valid.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    edge_keys: HashSet<(usize, usize)>,
    faces: Vec<Face>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_nodes<I>(points: I) -> Self
    where
        I: IntoIterator<Item = [f64; 3]>,
    {
        let mut mesh = Self::new();
        mesh.add_nodes(points);
        mesh
    }

    /// Append points and return the index range they were given
    pub fn add_nodes<I>(&mut self, points: I) -> Range<usize>
    where
        I: IntoIterator<Item = [f64; 3]>,
    {
        let first = self.nodes.len();
        self.nodes
            .extend(points.into_iter().map(|[x, y, z]| node(x, y, z)));
        first..self.nodes.len()
    }

    /// Add one edge; `Ok(false)` if the unordered pair is already present
    pub fn add_edge(&mut self, start: usize, stop: usize) -> Result<bool> {
        self.check_index(start)?;
        self.check_index(stop)?;
        if start == stop {
            return Err(WireframeError::DegenerateEdge { node: start });
        }

        let edge = Edge::new(start, stop);
        if !self.edge_keys.insert(edge.key()) {
            return Ok(false);
        }
        self.edges.push(edge);
        Ok(true)
    }

    /// Add edges, skipping duplicates and rejecting pairs with a bad index
    pub fn add_edges<I>(&mut self, pairs: I) -> Ingest
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut report = Ingest::default();
        for (start, stop) in pairs {
            report.record(self.add_edge(start, stop));
        }
        report
    }

    /// Add one face and its boundary edges, returning the new face index
    pub fn add_face(&mut self, indices: &[usize], color: Color) -> Result<usize> {
        if indices.len() < 3 {
            return Err(WireframeError::DegenerateFace { face: indices.to_vec() });
        }
        for &i in indices {
            self.check_index(i)?;
        }
        let boundary = cyclic_pairs(indices);
        if boundary.iter().any(|(a, b)| a == b) {
            return Err(WireframeError::DegenerateFace { face: indices.to_vec() });
        }

        for (a, b) in boundary {
            self.add_edge(a, b)?;
        }
        self.faces.push(Face {
            nodes: indices.to_vec(),
            color,
        });
        Ok(self.faces.len() - 1)
    }

    /// Add faces in the default colour
    pub fn add_faces<I, F>(&mut self, faces: I) -> Ingest
    where
        I: IntoIterator<Item = F>,
        F: AsRef<[usize]>,
    {
        self.add_faces_with_color(faces, DEFAULT_FACE_COLOR)
    }

    /// Add faces, skipping any list that is too short or references a missing node
    pub fn add_faces_with_color<I, F>(&mut self, faces: I, color: Color) -> Ingest
    where
        I: IntoIterator<Item = F>,
        F: AsRef<[usize]>,
    {
        let mut report = Ingest::default();
        for face in faces {
            report.record(self.add_face(face.as_ref(), color).map(|_| true));
        }
        report
    }

    pub fn set_face_color(&mut self, face: usize, color: Color) -> Result<()> {
        let len = self.faces.len();
        let target = self
            .faces
            .get_mut(face)
            .ok_or(WireframeError::IndexOutOfRange { index: face, len })?;
        target.color = color;
        Ok(())
    }

    /// Replace every node with `node * matrix`
    pub fn apply_transform(&mut self, matrix: &Matrix4<f64>) {
        for n in &mut self.nodes {
            *n = *n * matrix;
        }
    }

    pub fn translate(&mut self, dx: f64, dy: f64, dz: f64) {
        self.apply_transform(&Transform::translation(dx, dy, dz));
    }

    pub fn scale(&mut self, s: f64, centre: &Vector3<f64>) {
        self.apply_transform(&Transform::scaling(s, centre));
    }

    pub fn rotate(&mut self, axis: Axis, radians: f64, centre: &Vector3<f64>) {
        self.apply_transform(&Transform::rotation_about_pivot(axis, radians, centre));
    }

    /// Per-axis bounds over all nodes
    pub fn bounding_box(&self) -> Result<BoundingBox> {
        let mut points = self.nodes.iter().map(position);
        let first = points.next().ok_or(WireframeError::EmptyCollection("mesh"))?;
        let mut bounds = BoundingBox::from_point(first);
        for p in points {
            bounds.include(&p);
        }
        Ok(bounds)
    }

    /// Centre of the bounding box (not the mean of the nodes)
    pub fn centroid(&self) -> Result<Vector3<f64>> {
        Ok(self.bounding_box()?.centre())
    }

    /// Smallest z among a face's nodes, `None` for a missing face
    pub fn face_min_z(&self, face: usize) -> Option<f64> {
        self.faces.get(face).map(|f| self.min_z(f))
    }

    // Face node indices are checked on insertion
    fn min_z(&self, face: &Face) -> f64 {
        face.nodes
            .iter()
            .map(|&i| self.nodes[i].z)
            .fold(f64::INFINITY, f64::min)
    }

    /// Face indices ordered by ascending nearest-vertex z; ties keep insertion order
    pub fn faces_by_depth(&self) -> impl Iterator<Item = usize> + '_ {
        let keys: Vec<f64> = self.faces.iter().map(|f| self.min_z(f)).collect();
        let mut order: Vec<usize> = (0..self.faces.len()).collect();
        order.sort_by(|&a, &b| keys[a].total_cmp(&keys[b]));
        order.into_iter()
    }

    /// Painter's order for a viewer looking along +z: farthest key first,
    /// ties keep insertion order
    pub fn faces_back_to_front(&self) -> impl Iterator<Item = usize> + '_ {
        let keys: Vec<f64> = self.faces.iter().map(|f| self.min_z(f)).collect();
        let mut order: Vec<usize> = (0..self.faces.len()).collect();
        order.sort_by(|&a, &b| keys[b].total_cmp(&keys[a]));
        order.into_iter()
    }

    /// Unit normal from the first two edge vectors of the face
    pub fn face_normal(&self, face: usize) -> Result<Vector3<f64>> {
        let indices = &self
            .faces
            .get(face)
            .ok_or(WireframeError::IndexOutOfRange {
                index: face,
                len: self.faces.len(),
            })?
            .nodes;
        if indices.len() < 3 {
            return Err(WireframeError::DegenerateFace { face: indices.clone() });
        }
        let origin = position(&self.nodes[indices[0]]);
        let v1 = position(&self.nodes[indices[1]]) - origin;
        let v2 = position(&self.nodes[indices[2]]) - origin;

        let normal = v1.cross(&v2);
        let length = normal.norm();
        if length < EPSILON {
            return Err(WireframeError::DegenerateFace { face: indices.clone() });
        }
        Ok(normal / length)
    }

    /// Cartesian position of node `i`
    pub fn position(&self, i: usize) -> Option<Vector3<f64>> {
        self.nodes.get(i).map(position)
    }

    pub fn node(&self, i: usize) -> Option<&Node> {
        self.nodes.get(i)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.nodes.len() {
            Ok(())
        } else {
            Err(WireframeError::IndexOutOfRange {
                index,
                len: self.nodes.len(),
            })
        }
    }
}

fn position(n: &Node) -> Vector3<f64> {
    Vector3::new(n.x, n.y, n.z)
}

/// Consecutive index pairs, wrapping last to first
fn cyclic_pairs(indices: &[usize]) -> Vec<(usize, usize)> {
    indices
        .iter()
        .zip(indices.iter().cycle().skip(1))
        .map(|(&a, &b)| (a, b))
        .collect()
}

impl fmt::Display for Mesh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Nodes ---")?;
        for (i, n) in self.nodes.iter().enumerate() {
            writeln!(f, "{:3}: ({:.2}, {:.2}, {:.2})", i, n.x, n.y, n.z)?;
        }
        writeln!(f, "--- Edges ---")?;
        for (i, e) in self.edges.iter().enumerate() {
            writeln!(f, "{:3}: {:3} -> {:3}", i, e.start, e.stop)?;
        }
        writeln!(f, "--- Faces ---")?;
        for (i, face) in self.faces.iter().enumerate() {
            writeln!(f, "{:3}: {:?}", i, face.nodes)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn triangle() -> Mesh {
        let mut mesh = Mesh::from_nodes([
            [100.0, 200.0, 10.0],
            [200.0, 200.0, 10.0],
            [125.0, 100.0, 500.0],
        ]);
        assert!(mesh.add_edges([(0, 1), (1, 2), (2, 0)]).is_clean());
        mesh
    }

    #[test]
    fn test_nodes_are_homogeneous() {
        let mesh = triangle();
        assert_eq!(mesh.node_count(), 3);
        assert!(mesh.nodes().iter().all(|n| n.w == 1.0));
    }

    #[test]
    fn test_add_nodes_returns_new_range() {
        let mut mesh = triangle();
        assert_eq!(mesh.add_nodes([[0.0; 3], [1.0; 3]]), 3..5);
    }

    #[test]
    fn test_duplicate_edges_are_ignored() {
        let mut mesh = Mesh::from_nodes([[0.0; 3]; 6]);
        let report = mesh.add_edges([(2, 5), (5, 2), (2, 5)]);
        assert_eq!(report.added, 1);
        assert!(report.is_clean());
        assert_eq!(mesh.edges(), &[Edge::new(2, 5)]);
    }

    #[test]
    fn test_out_of_range_edge_is_skipped() {
        let mut mesh = triangle();
        let report = mesh.add_edges([(0, 3), (7, 1)]);
        assert_eq!(report.added, 0);
        assert_eq!(
            report.rejected,
            vec![
                WireframeError::IndexOutOfRange { index: 3, len: 3 },
                WireframeError::IndexOutOfRange { index: 7, len: 3 },
            ]
        );
        assert_eq!(mesh.edge_count(), 3);
    }

    #[test]
    fn test_self_loop_is_rejected() {
        let mut mesh = triangle();
        assert_eq!(mesh.add_edge(1, 1), Err(WireframeError::DegenerateEdge { node: 1 }));
    }

    #[test]
    fn test_faces_add_boundary_edges() {
        let mut mesh = Mesh::from_nodes([[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]]);
        let report = mesh.add_faces([[0, 1, 2, 3]]);
        assert_eq!(report.added, 1);
        assert_eq!(mesh.edge_count(), 4);
        assert_eq!(mesh.edges()[3], Edge::new(3, 0));

        // A second face sharing an edge adds only the new ones
        mesh.add_faces([[0, 2, 3]]);
        assert_eq!(mesh.edge_count(), 5);
    }

    #[test]
    fn test_invalid_faces_are_skipped() {
        let mut mesh = triangle();
        let report = mesh.add_faces(vec![vec![0, 1], vec![0, 1, 9], vec![0, 1, 2]]);
        assert_eq!(report.added, 1);
        assert_eq!(report.rejected.len(), 2);
        assert!(matches!(report.rejected[0], WireframeError::DegenerateFace { .. }));
        assert!(matches!(report.rejected[1], WireframeError::IndexOutOfRange { index: 9, .. }));
        assert_eq!(mesh.face_count(), 1);
    }

    #[test]
    fn test_translate_triangle() {
        let mut mesh = triangle();
        mesh.apply_transform(&Transform::translation(4.0, 3.0, 1.0));
        assert_eq!(mesh.nodes()[0], node(104.0, 203.0, 11.0));
    }

    #[test]
    fn test_bounding_box_and_centroid() {
        let mesh = triangle();
        let bounds = mesh.bounding_box().unwrap();
        assert_eq!(bounds.min, Vector3::new(100.0, 100.0, 10.0));
        assert_eq!(bounds.max, Vector3::new(200.0, 200.0, 500.0));
        // Box midpoint, not the node average
        assert_relative_eq!(mesh.centroid().unwrap(), Vector3::new(150.0, 150.0, 255.0));
    }

    #[test]
    fn test_empty_mesh_has_no_bounds() {
        let mesh = Mesh::new();
        assert_eq!(mesh.bounding_box(), Err(WireframeError::EmptyCollection("mesh")));
        assert!(mesh.centroid().is_err());
    }

    #[test]
    fn test_faces_by_depth_is_stable_permutation() {
        let mut mesh = Mesh::from_nodes([
            [0.0, 0.0, 5.0],
            [1.0, 0.0, 5.0],
            [0.0, 1.0, 5.0],
            [0.0, 0.0, 1.0],
            [1.0, 0.0, 1.0],
            [0.0, 1.0, 1.0],
        ]);
        mesh.add_faces([[0, 1, 2], [3, 4, 5], [0, 1, 2], [2, 3, 4]]);
        // keys: 5, 1, 5, 1
        let order: Vec<usize> = mesh.faces_by_depth().collect();
        assert_eq!(order, vec![1, 3, 0, 2]);
        let back_to_front: Vec<usize> = mesh.faces_back_to_front().collect();
        assert_eq!(back_to_front, vec![0, 2, 1, 3]);
    }

    #[test]
    fn test_face_normal() {
        let mut mesh = Mesh::from_nodes([[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
        mesh.add_faces([[0, 1, 2]]);
        assert_relative_eq!(mesh.face_normal(0).unwrap(), Vector3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_collinear_face_normal_is_degenerate() {
        let mut mesh = Mesh::from_nodes([[0.0, 0.0, 0.0], [1.0, 1.0, 1.0], [2.0, 2.0, 2.0]]);
        assert!(mesh.add_faces([[0, 1, 2]]).is_clean());
        assert!(matches!(mesh.face_normal(0), Err(WireframeError::DegenerateFace { .. })));
    }

    #[test]
    fn test_missing_indices_do_not_panic() {
        let mut mesh = Mesh::from_nodes([[0.0, 0.0, 4.0], [1.0, 0.0, 2.0], [0.0, 1.0, 3.0]]);
        mesh.add_faces([[0, 1, 2]]);
        assert_eq!(mesh.face_min_z(0), Some(2.0));
        assert_eq!(mesh.face_min_z(1), None);
        assert_eq!(
            mesh.face_normal(7),
            Err(WireframeError::IndexOutOfRange { index: 7, len: 1 })
        );
        assert_eq!(mesh.position(2), Some(Vector3::new(0.0, 1.0, 3.0)));
        assert_eq!(mesh.position(3), None);
    }

    #[test]
    fn test_set_face_color() {
        let mut mesh = triangle();
        mesh.add_faces([[0, 1, 2]]);
        let red = Color::new(255, 0, 0);
        mesh.set_face_color(0, red).unwrap();
        assert_eq!(mesh.faces()[0].color, red);
        assert!(mesh.set_face_color(4, red).is_err());
    }

    #[test]
    fn test_display_dump() {
        let text = triangle().to_string();
        assert!(text.contains("  0: (100.00, 200.00, 10.00)"));
        assert!(text.contains("  2:   2 ->   0"));
    }
}
