//! Demo scenes for the terminal viewer
use std::f64::consts::PI;

use wire3d_core::shapes::{cuboid, fractal_landscape, horizontal_grid, spheroid};
use wire3d_core::{stl, Axis, Color, Result, Scene, Viewport};

pub const DEMOS: &[&str] = &["cube", "cubes", "sphere", "room", "terrain"];

/// Build a named demo scene for a viewport of the given size
pub fn build(name: &str, viewport: &Viewport) -> Result<Option<Scene>> {
    let scene = match name {
        "cube" => cube(viewport),
        "cubes" => cubes(viewport)?,
        "sphere" => sphere(viewport)?,
        "room" => room(viewport)?,
        "terrain" => terrain(viewport),
        _ => return Ok(None),
    };
    Ok(Some(scene))
}

/// A scene holding one STL model, turned y-down and fitted to the viewport
pub fn from_stl(name: &str, data: &[u8], viewport: &Viewport) -> Result<Scene> {
    let mut scene = Scene::new();
    scene.add_mesh(name, stl::parse_stl(data)?);

    // STL models are usually y-up; screen space is y-down
    scene.rotate_about_centroid(Axis::X, PI, None)?;
    fit_to_viewport(&mut scene, viewport, 0.7)?;
    Ok(scene)
}

/// A single solid cube in the middle of the view
pub fn cube(viewport: &Viewport) -> Scene {
    let side = viewport.height * 0.5;
    let (cx, cy) = viewport.centre();
    let mut scene = Scene::new();
    scene.add_mesh(
        "cube",
        cuboid([cx - side / 2.0, cy - side / 2.0, 0.0], [side, side, side]),
    );
    scene
}

/// Three coloured cubes in a row, receding into the screen, tipped toward the viewer
pub fn cubes(viewport: &Viewport) -> Result<Scene> {
    let side = viewport.height * 0.3;
    let palette = [
        ("cube1", Color::new(220, 60, 60)),
        ("cube2", Color::new(60, 200, 60)),
        ("cube3", Color::new(60, 90, 230)),
    ];

    let mut scene = Scene::new();
    for (i, (name, color)) in palette.into_iter().enumerate() {
        let x = viewport.width * (0.2 + 0.3 * i as f64) - side / 2.0;
        let mut cube = cuboid([x, viewport.height * 0.5 - side / 2.0, i as f64 * side], [side; 3]);
        for face in 0..cube.face_count() {
            cube.set_face_color(face, color)?;
        }
        scene.add_mesh(name, cube);
    }
    scene.rotate_about_centroid(Axis::Y, PI / 8.0, None)?;
    scene.rotate_about_centroid(Axis::X, -PI / 8.0, None)?;
    Ok(scene)
}

/// Random fractal terrain seen from slightly above
pub fn terrain(viewport: &Viewport) -> Scene {
    let (w, h) = (viewport.width, viewport.height);
    let land = fractal_landscape([w * 0.1, h * 0.75, 0.0], [w * 0.8, w * 0.8], 5, h * 0.25, &mut rand::rng());
    let mut scene = Scene::new();
    scene.add_mesh("terrain", land);
    scene
}

/// A sphere with a red polar cap
pub fn sphere(viewport: &Viewport) -> Result<Scene> {
    let resolution = 16;
    let radius = viewport.height * 0.4;
    let (cx, cy) = viewport.centre();
    let mut ball = spheroid([cx, cy, radius], [radius; 3], resolution);

    // The band of quads nearest the low pole, and that pole's fan
    let quads = resolution * (resolution - 2);
    let cap = (0..resolution).chain(quads..quads + resolution);
    for face in cap {
        ball.set_face_color(face, Color::new(220, 40, 40))?;
    }

    let mut scene = Scene::new();
    scene.add_mesh("sphere", ball);
    Ok(scene)
}

/// A floor grid, two blocks and a bouncing ball
pub fn room(viewport: &Viewport) -> Result<Scene> {
    let (w, h) = (viewport.width, viewport.height);
    let mut scene = Scene::new();
    scene.add_mesh(
        "floor",
        horizontal_grid([0.0, h * 0.9, 0.0], [w / 12.0, w / 12.0], [12, 12]),
    );
    scene.add_mesh(
        "block1",
        cuboid([w * 0.15, h * 0.6, w * 0.4], [w * 0.15, h * 0.3, w * 0.1]),
    );
    scene.add_mesh(
        "block2",
        cuboid([w * 0.65, h * 0.45, w * 0.6], [w * 0.12, h * 0.45, w * 0.12]),
    );

    let radius = h * 0.08;
    let ball = spheroid([w * 0.5, h * 0.4, w * 0.3], [radius; 3], 12);
    scene.add_mesh("ball", ball);

    let (top, floor) = (h * 0.2, h * 0.9 - radius);
    let mut velocity = h / 100.0;
    scene.set_update("ball", move |mesh| {
        if let Ok(centre) = mesh.centroid() {
            if centre.y >= floor || centre.y <= top {
                velocity = -velocity;
            }
        }
        mesh.translate(0.0, velocity, 0.0);
    })?;
    Ok(scene)
}

/// Scale and move the scene so it fills `fill` of the viewport's shorter side
/// and is centred on the viewport
pub fn fit_to_viewport(scene: &mut Scene, viewport: &Viewport, fill: f64) -> Result<()> {
    let bounds = scene.bounding_box()?;
    let size = bounds.max - bounds.min;
    let extent = size.x.max(size.y);
    if extent > 0.0 {
        scene.scale_about_centroid(fill * viewport.width.min(viewport.height) / extent)?;
    }

    let bounds = scene.bounding_box()?;
    let centre = bounds.centre();
    let (cx, cy) = viewport.centre();
    // Push the nearest point onto z = 0
    scene.translate(cx - centre.x, cy - centre.y, -bounds.min.z);
    Ok(())
}
