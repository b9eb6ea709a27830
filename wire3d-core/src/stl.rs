//! STL reader (binary and ASCII) producing indexed meshes
use std::collections::HashMap;

use nom::{
    bytes::complete::{tag, take, take_till},
    character::complete::{multispace0, multispace1},
    multi::{count, many0},
    number::complete::{float, le_f32, le_u32},
    sequence::{preceded, tuple},
    IResult,
};

use crate::error::{Result, WireframeError};
use crate::geometry::Mesh;

type Facet = [[f32; 3]; 3];

const HEADER_LEN: usize = 80;

/// Detect the format and parse an STL file
pub fn parse_stl(data: &[u8]) -> Result<Mesh> {
    if data.starts_with(b"solid") {
        if let Ok(text) = std::str::from_utf8(data) {
            match parse_ascii_stl(text) {
                Ok(mesh) => return Ok(mesh),
                Err(e) => log::debug!("Not ASCII STL ({}), trying binary", e),
            }
        }
    }
    parse_binary_stl(data)
}

/// Parse a binary STL file
pub fn parse_binary_stl(data: &[u8]) -> Result<Mesh> {
    if data.len() < HEADER_LEN + 4 {
        return Err(WireframeError::Stl("file too small to be a valid STL".to_string()));
    }
    match binary_facets(data) {
        Ok((_, facets)) => Ok(build_mesh(&facets)),
        Err(e) => Err(WireframeError::Stl(format!("truncated binary STL: {:?}", e.map(|e| e.code)))),
    }
}

/// Parse an ASCII STL file
pub fn parse_ascii_stl(input: &str) -> Result<Mesh> {
    match ascii_solid(input) {
        Ok((_, facets)) => Ok(build_mesh(&facets)),
        Err(e) => Err(WireframeError::Stl(format!("failed to parse ASCII STL: {:?}", e.map(|e| e.code)))),
    }
}

fn binary_facets(input: &[u8]) -> IResult<&[u8], Vec<Facet>> {
    let (input, _) = take(HEADER_LEN)(input)?;
    let (input, n) = le_u32(input)?;
    count(binary_facet, n as usize)(input)
}

fn binary_facet(input: &[u8]) -> IResult<&[u8], Facet> {
    // The stored normal is ignored; faces get normals from their winding
    let (input, _normal) = binary_vector(input)?;
    let (input, a) = binary_vector(input)?;
    let (input, b) = binary_vector(input)?;
    let (input, c) = binary_vector(input)?;
    let (input, _attributes) = take(2usize)(input)?;
    Ok((input, [a, b, c]))
}

fn binary_vector(input: &[u8]) -> IResult<&[u8], [f32; 3]> {
    let (input, (x, y, z)) = tuple((le_f32, le_f32, le_f32))(input)?;
    Ok((input, [x, y, z]))
}

fn ascii_solid(input: &str) -> IResult<&str, Vec<Facet>> {
    let (input, _) = preceded(multispace0, tag("solid"))(input)?;
    let (input, _name) = take_till(|c| c == '\n')(input)?;
    let (input, facets) = many0(ascii_facet)(input)?;
    let (input, _) = preceded(multispace0, tag("endsolid"))(input)?;
    Ok((input, facets))
}

fn ascii_facet(input: &str) -> IResult<&str, Facet> {
    let (input, _) = preceded(multispace0, tag("facet"))(input)?;
    let (input, _) = preceded(multispace1, tag("normal"))(input)?;
    let (input, _normal) = ascii_vector(input)?;
    let (input, _) = preceded(multispace0, tag("outer"))(input)?;
    let (input, _) = preceded(multispace1, tag("loop"))(input)?;
    let (input, a) = ascii_vertex(input)?;
    let (input, b) = ascii_vertex(input)?;
    let (input, c) = ascii_vertex(input)?;
    let (input, _) = preceded(multispace0, tag("endloop"))(input)?;
    let (input, _) = preceded(multispace0, tag("endfacet"))(input)?;
    Ok((input, [a, b, c]))
}

fn ascii_vertex(input: &str) -> IResult<&str, [f32; 3]> {
    preceded(preceded(multispace0, tag("vertex")), ascii_vector)(input)
}

fn ascii_vector(input: &str) -> IResult<&str, [f32; 3]> {
    let (input, _) = multispace0(input)?;
    let (input, x) = float(input)?;
    let (input, _) = multispace1(input)?;
    let (input, y) = float(input)?;
    let (input, _) = multispace1(input)?;
    let (input, z) = float(input)?;
    Ok((input, [x, y, z]))
}

/// Merge coincident vertices and turn each facet into a triangular face
fn build_mesh(facets: &[Facet]) -> Mesh {
    let mut mesh = Mesh::new();
    let mut seen: HashMap<[u32; 3], usize> = HashMap::new();
    let mut faces = Vec::with_capacity(facets.len());

    for facet in facets {
        let mut face = [0usize; 3];
        for (slot, vertex) in face.iter_mut().zip(facet) {
            let key = vertex.map(f32::to_bits);
            *slot = *seen.entry(key).or_insert_with(|| {
                let [x, y, z] = vertex.map(f64::from);
                mesh.add_nodes([[x, y, z]]).start
            });
        }
        faces.push(face);
    }

    let report = mesh.add_faces(faces);
    log::info!(
        "Loaded STL: {} nodes, {} faces ({} rejected)",
        mesh.node_count(),
        report.added,
        report.rejected.len()
    );
    mesh
}
