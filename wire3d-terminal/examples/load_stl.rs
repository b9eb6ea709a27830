//! Example: Load and view an STL file in the terminal
//!
//! Usage: cargo run --example load_stl -- path/to/file.stl

use std::env;
use std::fs;
use std::io;
use wire3d_core::Viewport;
use wire3d_terminal::{demo, TerminalApp, ViewerConfig};

fn to_io(e: wire3d_core::WireframeError) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, e)
}

fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let viewport = Viewport::new(600, 400);
    let config = ViewerConfig::new(viewport);

    if args.len() < 2 {
        eprintln!("Usage: {} <stl-file>", args[0]);
        eprintln!("\nNo STL file provided, using default cube...");
        let mut app = TerminalApp::new(demo::cube(&viewport), config)?;
        return app.run();
    }

    let stl_path = &args[1];
    println!("Loading STL file: {}", stl_path);

    let data = fs::read(stl_path)
        .map_err(|e| io::Error::new(io::ErrorKind::NotFound, format!("Failed to read STL file: {}", e)))?;
    let scene = demo::from_stl(stl_path, &data, &viewport).map_err(to_io)?;
    if let Some(mesh) = scene.get(stl_path) {
        println!("Loaded {} nodes, {} faces", mesh.node_count(), mesh.face_count());
    }

    let mut app = TerminalApp::new(scene, config)?;
    app.run()?;

    println!("Thank you for using Wire3D Terminal Viewer!");
    Ok(())
}
