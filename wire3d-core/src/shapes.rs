//! Procedural meshes: cuboids, spheroids, flat grids and fractal terrain.
//!
//! Every face is wound so its normal points out of the solid.
use std::f64::consts::PI;

use rand::Rng;

use crate::geometry::Mesh;

/// Axis-aligned box with one corner at `origin` and the opposite at `origin + dimensions`.
///
/// Node `i` sits at corner `(i >> 2 & 1, i >> 1 & 1, i & 1)` along (x, y, z).
pub fn cuboid(origin: [f64; 3], dimensions: [f64; 3]) -> Mesh {
    let [x, y, z] = origin;
    let [w, h, d] = dimensions;

    let mut mesh = Mesh::new();
    mesh.add_nodes(
        [x, x + w]
            .into_iter()
            .flat_map(|nx| [y, y + h].into_iter().map(move |ny| (nx, ny)))
            .flat_map(|(nx, ny)| [z, z + d].into_iter().map(move |nz| [nx, ny, nz])),
    );

    const FACES: [[usize; 4]; 6] = [
        [0, 1, 3, 2], // x min
        [4, 6, 7, 5], // x max
        [0, 4, 5, 1], // y min
        [2, 3, 7, 6], // y max
        [1, 5, 7, 3], // z max
        [0, 2, 6, 4], // z min
    ];
    mesh.add_faces(FACES);
    mesh
}

/// Latitude/longitude spheroid centred on `centre` with per-axis `radii`.
///
/// `resolution` bands of latitude and longitude; the poles lie on the y-axis
/// and are closed with triangle fans.
pub fn spheroid(centre: [f64; 3], radii: [f64; 3], resolution: usize) -> Mesh {
    let [x, y, z] = centre;
    let [rx, ry, rz] = radii;
    let res = resolution.max(3);
    let rows = res - 1;

    let mut mesh = Mesh::new();
    let ring = |row: usize, col: usize| row * res + col % res;

    // Rings between the poles, from y - ry toward y + ry
    mesh.add_nodes((1..res).flat_map(|m| {
        let lat = m as f64 * PI / res as f64;
        (0..res).map(move |n| {
            let lon = n as f64 * 2.0 * PI / res as f64;
            [
                x + rx * lon.sin() * lat.sin(),
                y - ry * lat.cos(),
                z - rz * lon.cos() * lat.sin(),
            ]
        })
    }));

    let mut quads = Vec::with_capacity((rows - 1) * res);
    for row in 0..rows - 1 {
        for col in 0..res {
            quads.push([
                ring(row, col),
                ring(row + 1, col),
                ring(row + 1, col + 1),
                ring(row, col + 1),
            ]);
        }
    }
    mesh.add_faces(quads);

    let poles = mesh.add_nodes([[x, y - ry, z], [x, y + ry, z]]);
    let (low, high) = (poles.start, poles.start + 1);
    let last = rows - 1;
    mesh.add_faces((0..res).map(|col| [low, ring(0, col), ring(0, col + 1)]));
    mesh.add_faces((0..res).map(|col| [ring(last, col), high, ring(last, col + 1)]));

    mesh
}

/// Flat grid in the plane `y = origin.y`, `counts` cells along x and z,
/// each `step` wide. Edges only.
pub fn horizontal_grid(origin: [f64; 3], step: [f64; 2], counts: [usize; 2]) -> Mesh {
    let [x, y, z] = origin;
    let [dx, dz] = step;
    let [nx, nz] = counts;
    let index = |i: usize, k: usize| i * (nz + 1) + k;

    let mut mesh = Mesh::new();
    mesh.add_nodes(
        (0..=nx).flat_map(|i| (0..=nz).map(move |k| [x + i as f64 * dx, y, z + k as f64 * dz])),
    );
    mesh.add_edges((0..=nx).flat_map(|i| (0..nz).map(move |k| (index(i, k), index(i, k + 1)))));
    mesh.add_edges((0..nx).flat_map(|i| (0..=nz).map(move |k| (index(i, k), index(i + 1, k)))));
    mesh
}

/// Random terrain over the square `dimensions` (along x and z) in the plane
/// `y = origin.y`. Edges only.
///
/// Each pass doubles the grid resolution, placing new nodes at edge and cell
/// midpoints, then shifts every height by a uniform amount in
/// `±height / 2^(0.8 * pass) / 2`. After `iterations` passes the grid has
/// `2^iterations + 1` nodes per side.
pub fn fractal_landscape<R: Rng>(
    origin: [f64; 3],
    dimensions: [f64; 2],
    iterations: u32,
    height: f64,
    rng: &mut R,
) -> Mesh {
    let [x, y, z] = origin;
    let [dx, dz] = dimensions;

    let mut size = 2usize;
    let mut heights = vec![y; size * size];
    for pass in 0..iterations {
        let next = size * 2 - 1;
        let at = |r: usize, c: usize| heights[r * size + c];
        let mut refined = Vec::with_capacity(next * next);
        for row in 0..next {
            for col in 0..next {
                let (r, c) = (row / 2, col / 2);
                refined.push(match (row % 2, col % 2) {
                    (0, 0) => at(r, c),
                    (0, _) => (at(r, c) + at(r, c + 1)) / 2.0,
                    (_, 0) => (at(r, c) + at(r + 1, c)) / 2.0,
                    _ => (at(r, c) + at(r, c + 1) + at(r + 1, c) + at(r + 1, c + 1)) / 4.0,
                });
            }
        }

        let scale = height / 2f64.powf(0.8 * pass as f64);
        for h in &mut refined {
            *h += (rng.random::<f64>() - 0.5) * scale;
        }
        heights = refined;
        size = next;
    }

    let step = (size - 1) as f64;
    let heights = &heights;
    let mut mesh = Mesh::new();
    mesh.add_nodes((0..size).flat_map(move |row| {
        (0..size).map(move |col| {
            [
                x + col as f64 * dx / step,
                heights[row * size + col],
                z + row as f64 * dz / step,
            ]
        })
    }));
    let index = |row: usize, col: usize| row * size + col;
    mesh.add_edges((0..size).flat_map(|row| (0..size - 1).map(move |col| (index(row, col), index(row, col + 1)))));
    mesh.add_edges((0..size - 1).flat_map(|row| (0..size).map(move |col| (index(row, col), index(row + 1, col)))));
    mesh
}
