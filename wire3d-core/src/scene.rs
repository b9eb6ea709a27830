//! A flat, named collection of meshes that move and render together
use std::fmt;

use nalgebra::{Matrix4, Vector3};

use crate::color::Color;
use crate::constants::DEFAULT_MESH_COLOR;
use crate::error::{Result, WireframeError};
use crate::geometry::{BoundingBox, Mesh};
use crate::transform::{Axis, Transform};

/// Per-frame behaviour attached to one mesh
pub type UpdateHook = Box<dyn FnMut(&mut Mesh)>;

struct SceneEntry {
    name: String,
    mesh: Mesh,
    color: Option<Color>,
    update: Option<UpdateHook>,
}

impl SceneEntry {
    fn new(name: String, mesh: Mesh) -> Self {
        Self {
            name,
            mesh,
            color: Some(DEFAULT_MESH_COLOR),
            update: None,
        }
    }
}

/// Named meshes kept in insertion order.
///
/// The scene owns its meshes; references obtained by name are only valid
/// until the next `add_mesh`/`remove_mesh`. Draw order follows insertion
/// order, and replacing a mesh keeps its slot.
#[derive(Default)]
pub struct Scene {
    entries: Vec<SceneEntry>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a mesh, returning the one it replaced.
    ///
    /// A replaced mesh's colour and update hook are reset.
    pub fn add_mesh(&mut self, name: impl Into<String>, mesh: Mesh) -> Option<Mesh> {
        let name = name.into();
        match self.position(&name) {
            Some(i) => {
                log::debug!("Replacing mesh `{}` ({} nodes)", name, mesh.node_count());
                let old = std::mem::replace(&mut self.entries[i], SceneEntry::new(name, mesh));
                Some(old.mesh)
            }
            None => {
                log::debug!("Adding mesh `{}` ({} nodes)", name, mesh.node_count());
                self.entries.push(SceneEntry::new(name, mesh));
                None
            }
        }
    }

    /// Remove a mesh by name; absent names are a no-op
    pub fn remove_mesh(&mut self, name: &str) -> Option<Mesh> {
        let i = self.position(name)?;
        Some(self.entries.remove(i).mesh)
    }

    /// Move every mesh of `other` into this scene, replacing by name
    pub fn extend(&mut self, other: Scene) {
        for entry in other.entries {
            match self.position(&entry.name) {
                Some(i) => self.entries[i] = entry,
                None => self.entries.push(entry),
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Mesh> {
        self.position(name).map(|i| &self.entries[i].mesh)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Mesh> {
        let i = self.position(name)?;
        Some(&mut self.entries[i].mesh)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Meshes in draw order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Mesh)> {
        self.entries.iter().map(|e| (e.name.as_str(), &e.mesh))
    }

    /// Meshes that have a display colour, in draw order
    pub fn visible(&self) -> impl Iterator<Item = (&str, &Mesh, Color)> {
        self.entries
            .iter()
            .filter_map(|e| e.color.map(|c| (e.name.as_str(), &e.mesh, c)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn color(&self, name: &str) -> Option<Color> {
        self.position(name).and_then(|i| self.entries[i].color)
    }

    /// Set a mesh's display colour; `None` hides it
    pub fn set_color(&mut self, name: &str, color: Option<Color>) -> Result<()> {
        let i = self.require(name)?;
        self.entries[i].color = color;
        Ok(())
    }

    /// Attach a hook that runs once per frame against the named mesh
    pub fn set_update<F>(&mut self, name: &str, hook: F) -> Result<()>
    where
        F: FnMut(&mut Mesh) + 'static,
    {
        let i = self.require(name)?;
        self.entries[i].update = Some(Box::new(hook));
        Ok(())
    }

    /// Run every mesh's update hook once
    pub fn update(&mut self) {
        for entry in &mut self.entries {
            if let Some(hook) = entry.update.as_mut() {
                hook(&mut entry.mesh);
            }
        }
    }

    /// Bounds over every member mesh
    pub fn bounding_box(&self) -> Result<BoundingBox> {
        self.entries
            .iter()
            .filter_map(|e| e.mesh.bounding_box().ok())
            .reduce(|a, b| a.union(&b))
            .ok_or(WireframeError::EmptyCollection("scene"))
    }

    /// Midpoint of the scene's bounding box
    pub fn centroid(&self) -> Result<Vector3<f64>> {
        Ok(self.bounding_box()?.centre())
    }

    /// Apply `matrix` to each mesh in turn
    pub fn apply_transform(&mut self, matrix: &Matrix4<f64>) {
        for entry in &mut self.entries {
            entry.mesh.apply_transform(matrix);
        }
    }

    pub fn translate(&mut self, dx: f64, dy: f64, dz: f64) {
        self.apply_transform(&Transform::translation(dx, dy, dz));
    }

    pub fn scale(&mut self, s: f64, centre: &Vector3<f64>) {
        self.apply_transform(&Transform::scaling(s, centre));
    }

    pub fn scale_about_centroid(&mut self, s: f64) -> Result<()> {
        let centre = self.centroid()?;
        self.scale(s, &centre);
        Ok(())
    }

    /// Rotate about the line parallel to `axis` through the scene centroid.
    ///
    /// `pivot` overrides the two centroid coordinates perpendicular to the
    /// axis, in (x, y, z) order: (y, z) for X, (x, z) for Y, (x, y) for Z.
    pub fn rotate_about_centroid(
        &mut self,
        axis: Axis,
        radians: f64,
        pivot: Option<(f64, f64)>,
    ) -> Result<()> {
        let mut centre = self.centroid()?;
        if let Some((a, b)) = pivot {
            let (i, j) = axis.perpendicular();
            centre[i] = a;
            centre[j] = b;
        }
        let matrix = Transform::rotation_about_axis(&centre, &axis.direction(), radians)?;
        self.apply_transform(&matrix);
        Ok(())
    }

    pub fn rotate_about_axis(
        &mut self,
        point: &Vector3<f64>,
        direction: &Vector3<f64>,
        radians: f64,
    ) -> Result<()> {
        let matrix = Transform::rotation_about_axis(point, direction, radians)?;
        self.apply_transform(&matrix);
        Ok(())
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.name == name)
    }

    fn require(&self, name: &str) -> Result<usize> {
        self.position(name)
            .ok_or_else(|| WireframeError::UnknownMesh(name.to_string()))
    }
}

impl fmt::Debug for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|e| (&e.name, &e.mesh)))
            .finish()
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "=== {} ===", entry.name)?;
            write!(f, "{}", entry.mesh)?;
        }
        Ok(())
    }
}
