//! Per-frame projection, shading and draw submission
use crate::color::Color;
use crate::constants::{
    DEFAULT_BACKGROUND, DEFAULT_MAX_LIGHT, DEFAULT_MIN_LIGHT, DEFAULT_NODE_RADIUS,
};
use crate::geometry::Mesh;
use crate::light::Light;
use crate::projection::{Projection, Viewport};
use crate::scene::Scene;

/// 2D drawing backend the renderer submits primitives to
pub trait Canvas {
    type Error;

    fn clear(&mut self, background: Color);
    fn draw_line(&mut self, from: (f64, f64), to: (f64, f64), color: Color);
    fn draw_filled_polygon(&mut self, points: &[(f64, f64)], color: Color);
    fn draw_disc(&mut self, centre: (f64, f64), radius: f64, color: Color);
    fn present(&mut self) -> Result<(), Self::Error>;
}

/// What to draw and how
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub viewport: Viewport,
    pub projection: Projection,
    pub display_faces: bool,
    pub display_edges: bool,
    pub display_nodes: bool,
    pub node_radius: f64,
    pub background: Color,
    pub min_light: f64,
    pub max_light: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            projection: Projection::Orthographic,
            display_faces: true,
            display_edges: true,
            display_nodes: false,
            node_radius: DEFAULT_NODE_RADIUS,
            background: DEFAULT_BACKGROUND,
            min_light: DEFAULT_MIN_LIGHT,
            max_light: DEFAULT_MAX_LIGHT,
        }
    }
}

/// Counters for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub faces_drawn: usize,
    pub faces_skipped: usize,
    pub edges_drawn: usize,
    pub edges_clipped: usize,
    pub nodes_drawn: usize,
}

/// Painter's-algorithm renderer for a [`Scene`]
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    pub options: RenderOptions,
    pub light: Light,
}

impl Renderer {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            light: Light::default(),
        }
    }

    /// Map a face/light cosine to a brightness.
    ///
    /// Faces turned away (`theta < 0`) get `min_light`; otherwise brightness
    /// rises linearly to `max_light` at `theta == 1`.
    pub fn brightness(&self, theta: f64) -> f64 {
        let RenderOptions { min_light, max_light, .. } = self.options;
        if theta < 0.0 {
            min_light
        } else {
            min_light + theta.min(1.0) * (max_light - min_light)
        }
    }

    /// Clear, draw every visible mesh, and present
    pub fn render_frame<C: Canvas>(&self, scene: &Scene, canvas: &mut C) -> Result<FrameStats, C::Error> {
        canvas.clear(self.options.background);
        let stats = self.draw_scene(scene, canvas);
        canvas.present()?;
        log::trace!("Frame: {:?}", stats);
        Ok(stats)
    }

    /// Submit draw calls for every visible mesh, in scene order
    pub fn draw_scene<C: Canvas>(&self, scene: &Scene, canvas: &mut C) -> FrameStats {
        let mut stats = FrameStats::default();
        for (_, mesh, color) in scene.visible() {
            self.draw_mesh(mesh, color, canvas, &mut stats);
        }
        stats
    }

    fn draw_mesh<C: Canvas>(&self, mesh: &Mesh, color: Color, canvas: &mut C, stats: &mut FrameStats) {
        let projection = &self.options.projection;
        let viewport = &self.options.viewport;
        let screen: Vec<Option<(f64, f64)>> = (0..mesh.node_count())
            .map(|i| mesh.position(i).and_then(|p| projection.project(&p, viewport)))
            .collect();

        if self.options.display_faces {
            let light = self.light.direction();
            for f in mesh.faces_back_to_front() {
                let face = &mesh.faces()[f];
                let points: Option<Vec<(f64, f64)>> = face.nodes.iter().map(|&i| screen[i]).collect();
                let points = match points {
                    Some(points) if points.len() >= 3 => points,
                    _ => {
                        log::trace!("Face {} crosses the near plane", f);
                        stats.faces_skipped += 1;
                        continue;
                    }
                };

                match mesh.face_normal(f) {
                    Ok(normal) => {
                        let shade = self.brightness(normal.dot(&light));
                        canvas.draw_filled_polygon(&points, face.color.shade(shade));
                        stats.faces_drawn += 1;
                    }
                    Err(e) => {
                        log::trace!("Skipping fill: {}", e);
                        stats.faces_skipped += 1;
                    }
                }
            }
        }

        if self.options.display_edges {
            for edge in mesh.edges() {
                match (screen[edge.start], screen[edge.stop]) {
                    (Some(from), Some(to)) => {
                        canvas.draw_line(from, to, color);
                        stats.edges_drawn += 1;
                    }
                    _ => stats.edges_clipped += 1,
                }
            }
        }

        if self.options.display_nodes {
            for point in screen.iter().flatten() {
                canvas.draw_disc(*point, self.options.node_radius, color);
                stats.nodes_drawn += 1;
            }
        }
    }
}
