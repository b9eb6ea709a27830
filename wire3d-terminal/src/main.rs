//! Wire3D Terminal Demo
//!
//! Usage: wire3d-terminal [cube|cubes|sphere|room|terrain|path/to/model.stl]
//!
//! Controls:
//!   - Arrows / PgUp / PgDn: Move the scene
//!   - = / -: Scale about the scene centre
//!   - Q/W, A/S, Z/X: Rotate about x, y, z
//!   - J/K: Swing the light
//!   - F/E/N: Toggle faces, edges, nodes
//!   - P: Toggle perspective
//!   - ESC: Quit

use std::env;
use std::fs;
use std::io;
use std::path::Path;
use wire3d_core::{Projection, Viewport, WireframeError};
use wire3d_terminal::{demo, TerminalApp, ViewerConfig};

fn to_io(e: WireframeError) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, e)
}

fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let name = env::args().nth(1).unwrap_or_else(|| "cube".to_string());
    let viewport = Viewport::new(600, 400);

    let scene = if Path::new(&name).is_file() {
        let data = fs::read(&name)?;
        demo::from_stl(&name, &data, &viewport).map_err(to_io)?
    } else {
        demo::build(&name, &viewport).map_err(to_io)?.ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Unknown demo `{}`; choose one of {:?} or an STL file", name, demo::DEMOS),
            )
        })?
    };

    let mut config = ViewerConfig::new(viewport);
    match name.as_str() {
        "sphere" => config.render.display_edges = false,
        "room" | "terrain" => config.render.projection = Projection::perspective(300.0),
        _ => {}
    }

    log::info!("Starting `{}` with {} meshes", name, scene.len());

    let mut app = TerminalApp::new(scene, config)?;
    app.run()?;

    println!("Thank you for using Wire3D Terminal Viewer!");
    Ok(())
}
