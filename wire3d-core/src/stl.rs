/// STL mesh importer for binary and ASCII formats
use nalgebra::Point3;
use nom::{
    bytes::complete::tag,
    character::complete::{multispace0, multispace1, not_line_ending},
    multi::many0,
    number::complete::float,
    sequence::preceded,
    IResult,
};

use crate::error::{Error, Result};
use crate::mesh::{Mesh, Triangle};

/// Parse a binary STL file.
pub fn parse_binary_stl(data: &[u8]) -> Result<Mesh> {
    if data.len() < 84 {
        return Err(Error::MeshParse(
            "file too small to be a valid STL".to_string(),
        ));
    }

    // Skip 80-byte header
    let data = &data[80..];

    // Triangle count (4 bytes, little-endian)
    let triangle_count = u32::from_le_bytes([data[0], data[1], data[2], data[3]]) as usize;

    let mut mesh = Mesh::with_capacity(triangle_count);
    let mut offset = 4;

    for _ in 0..triangle_count {
        if offset + 50 > data.len() {
            return Err(Error::MeshParse("unexpected end of file".to_string()));
        }

        // Skip the stored normal; the wireframe pipeline does not use it.
        offset += 12;

        let mut points = [Point3::origin(); 3];
        for point in &mut points {
            let x = read_f32(data, offset);
            let y = read_f32(data, offset + 4);
            let z = read_f32(data, offset + 8);
            *point = Point3::new(x as f64, y as f64, z as f64);
            offset += 12;
        }

        // Skip attribute byte count (2 bytes)
        offset += 2;

        mesh.add_triangle(Triangle::new(points[0], points[1], points[2]));
    }

    Ok(mesh)
}

fn read_f32(data: &[u8], offset: usize) -> f32 {
    f32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

/// Parse an ASCII STL file.
pub fn parse_ascii_stl(input: &str) -> Result<Mesh> {
    match parse_ascii_stl_impl(input) {
        Ok((_, mesh)) => Ok(mesh),
        Err(e) => Err(Error::MeshParse(format!("invalid ASCII STL: {:?}", e))),
    }
}

fn parse_ascii_stl_impl(input: &str) -> IResult<&str, Mesh> {
    let (input, _) = preceded(multispace0, tag("solid"))(input)?;
    let (input, _name) = not_line_ending(input)?;
    let (input, triangles) = many0(parse_facet)(input)?;
    let (input, _) = preceded(multispace0, tag("endsolid"))(input)?;

    let mut mesh = Mesh::with_capacity(triangles.len());
    for triangle in triangles {
        mesh.add_triangle(triangle);
    }

    Ok((input, mesh))
}

fn parse_facet(input: &str) -> IResult<&str, Triangle> {
    let (input, _) = preceded(multispace0, tag("facet"))(input)?;
    let (input, _) = preceded(multispace1, tag("normal"))(input)?;
    let (input, _normal) = parse_vector3(input)?;
    let (input, _) = preceded(multispace0, tag("outer"))(input)?;
    let (input, _) = preceded(multispace1, tag("loop"))(input)?;
    let (input, v1) = parse_vertex(input)?;
    let (input, v2) = parse_vertex(input)?;
    let (input, v3) = parse_vertex(input)?;
    let (input, _) = preceded(multispace0, tag("endloop"))(input)?;
    let (input, _) = preceded(multispace0, tag("endfacet"))(input)?;

    Ok((input, Triangle::new(v1, v2, v3)))
}

fn parse_vertex(input: &str) -> IResult<&str, Point3<f64>> {
    let (input, _) = preceded(multispace0, tag("vertex"))(input)?;
    let (input, (x, y, z)) = parse_vector3(input)?;
    Ok((input, Point3::new(x as f64, y as f64, z as f64)))
}

fn parse_vector3(input: &str) -> IResult<&str, (f32, f32, f32)> {
    let (input, _) = multispace0(input)?;
    let (input, x) = float(input)?;
    let (input, _) = multispace1(input)?;
    let (input, y) = float(input)?;
    let (input, _) = multispace1(input)?;
    let (input, z) = float(input)?;
    Ok((input, (x, y, z)))
}

/// Detect and parse an STL file (binary or ASCII).
pub fn parse_stl(data: &[u8]) -> Result<Mesh> {
    if data.len() > 5 && &data[0..5] == b"solid" {
        // Might be ASCII
        if let Ok(text) = std::str::from_utf8(data) {
            if let Ok(mesh) = parse_ascii_stl(text) {
                return Ok(mesh);
            }
        }
    }

    parse_binary_stl(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_header_with_zero_triangles() {
        let mut data = vec![0u8; 84];
        data[80..84].copy_from_slice(&0u32.to_le_bytes());

        let mesh = parse_binary_stl(&data).unwrap();
        assert_eq!(mesh.triangles.len(), 0);
    }

    #[test]
    fn binary_triangle_round_trips_coordinates() {
        let mut data = vec![0u8; 84 + 50];
        data[80..84].copy_from_slice(&1u32.to_le_bytes());
        let floats: [f32; 12] = [
            0.0, 0.0, 1.0, // normal
            1.0, 2.0, 3.0, // v0
            4.0, 5.0, 6.0, // v1
            7.0, 8.0, 9.0, // v2
        ];
        for (i, f) in floats.iter().enumerate() {
            data[84 + i * 4..88 + i * 4].copy_from_slice(&f.to_le_bytes());
        }

        let mesh = parse_binary_stl(&data).unwrap();
        assert_eq!(mesh.triangles.len(), 1);
        assert_eq!(mesh.triangles[0].points[1], Point3::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn truncated_binary_is_rejected() {
        let mut data = vec![0u8; 84 + 10];
        data[80..84].copy_from_slice(&1u32.to_le_bytes());
        assert!(matches!(parse_binary_stl(&data), Err(Error::MeshParse(_))));
    }

    #[test]
    fn ascii_facet_parses() {
        let input = "solid test\n\
            facet normal 0 0 1\n\
              outer loop\n\
                vertex 0 0 0\n\
                vertex 1 0 0\n\
                vertex 0 1 0\n\
              endloop\n\
            endfacet\n\
            endsolid test";
        let mesh = parse_ascii_stl(input).unwrap();
        assert_eq!(mesh.triangles.len(), 1);
        assert_eq!(mesh.triangles[0].points[2], Point3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn autodetect_handles_ascii_and_binary() {
        let ascii = b"solid s\nendsolid s";
        assert_eq!(parse_stl(ascii).unwrap().triangles.len(), 0);

        let mut binary = vec![0u8; 84];
        binary[80..84].copy_from_slice(&0u32.to_le_bytes());
        assert_eq!(parse_stl(&binary).unwrap().triangles.len(), 0);
    }
}
