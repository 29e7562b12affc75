//! Writers for binary STL and Wavefront OBJ.

use std::fmt::Write as _;
use std::path::Path;

use tracing::debug;

use crate::error::{MeshError, Result};
use crate::mesh::TriangleMesh;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Binary STL (positions and per-face normals only).
    Stl,
    /// Wavefront OBJ with per-vertex normals.
    Obj,
}

impl Format {
    /// Pick a format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        match ext.to_lowercase().as_str() {
            "stl" => Ok(Format::Stl),
            "obj" => Ok(Format::Obj),
            _ => Err(MeshError::UnsupportedFormat(ext.to_string())),
        }
    }
}

/// Encode a mesh as binary STL.
pub fn stl_bytes(mesh: &TriangleMesh) -> Result<Vec<u8>> {
    if mesh.is_empty() {
        return Err(MeshError::EmptyMesh);
    }
    let num_triangles = mesh.num_triangles();
    let mut data = Vec::with_capacity(84 + num_triangles * 50);

    // 80-byte header
    let mut header = [b' '; 80];
    let tag = b"molmesh STL export";
    header[..tag.len()].copy_from_slice(tag);
    data.extend_from_slice(&header);
    data.extend_from_slice(&(num_triangles as u32).to_le_bytes());

    for tri in mesh.triangles() {
        let v0 = mesh.vertex(tri[0] as usize);
        let v1 = mesh.vertex(tri[1] as usize);
        let v2 = mesh.vertex(tri[2] as usize);

        let e1 = [v1[0] - v0[0], v1[1] - v0[1], v1[2] - v0[2]];
        let e2 = [v2[0] - v0[0], v2[1] - v0[1], v2[2] - v0[2]];
        let nx = e1[1] * e2[2] - e1[2] * e2[1];
        let ny = e1[2] * e2[0] - e1[0] * e2[2];
        let nz = e1[0] * e2[1] - e1[1] * e2[0];
        let len = (nx * nx + ny * ny + nz * nz).sqrt();
        let n = if len > 1e-10 {
            [nx / len, ny / len, nz / len]
        } else {
            [0.0, 0.0, 1.0]
        };

        for v in [n, v0, v1, v2] {
            data.extend_from_slice(&v[0].to_le_bytes());
            data.extend_from_slice(&v[1].to_le_bytes());
            data.extend_from_slice(&v[2].to_le_bytes());
        }
        // Attribute byte count
        data.extend_from_slice(&0u16.to_le_bytes());
    }

    Ok(data)
}

/// Encode a mesh as Wavefront OBJ text (1-based indices, `f a//a` faces).
pub fn obj_string(mesh: &TriangleMesh) -> Result<String> {
    if mesh.is_empty() {
        return Err(MeshError::EmptyMesh);
    }
    let mut out = String::with_capacity(mesh.num_vertices() * 64 + mesh.num_triangles() * 32);
    out.push_str("# molmesh OBJ export\n");
    for v in mesh.vertices.chunks_exact(3) {
        let _ = writeln!(out, "v {} {} {}", v[0], v[1], v[2]);
    }
    for n in mesh.normals.chunks_exact(3) {
        let _ = writeln!(out, "vn {} {} {}", n[0], n[1], n[2]);
    }
    for [a, b, c] in mesh.triangles() {
        let (a, b, c) = (a + 1, b + 1, c + 1);
        let _ = writeln!(out, "f {a}//{a} {b}//{b} {c}//{c}");
    }
    Ok(out)
}

/// Write `mesh` to `path`, choosing the format from the extension.
pub fn export(mesh: &TriangleMesh, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let format = Format::from_path(path)?;
    mesh.validate()?;
    let bytes = match format {
        Format::Stl => stl_bytes(mesh)?,
        Format::Obj => obj_string(mesh)?.into_bytes(),
    };
    std::fs::write(path, &bytes)?;
    debug!(
        path = %path.display(),
        ?format,
        bytes = bytes.len(),
        triangles = mesh.num_triangles(),
        "wrote mesh"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> TriangleMesh {
        TriangleMesh {
            vertices: vec![
                0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0,
            ],
            normals: vec![0.0, 0.0, 1.0].repeat(4),
            indices: vec![0, 1, 2, 0, 2, 3],
            groups: vec![0; 4],
        }
    }

    #[test]
    fn test_stl_layout() {
        let bytes = stl_bytes(&quad()).unwrap();
        assert_eq!(bytes.len(), 84 + 2 * 50);
        assert_eq!(u32::from_le_bytes([bytes[80], bytes[81], bytes[82], bytes[83]]), 2);
        // first face normal is +Z
        let nz = f32::from_le_bytes([bytes[92], bytes[93], bytes[94], bytes[95]]);
        assert_eq!(nz, 1.0);
    }

    #[test]
    fn test_obj_faces_are_one_based() {
        let obj = obj_string(&quad()).unwrap();
        assert_eq!(obj.lines().filter(|l| l.starts_with("v ")).count(), 4);
        assert_eq!(obj.lines().filter(|l| l.starts_with("vn ")).count(), 4);
        assert!(obj.contains("f 1//1 2//2 3//3"));
        assert!(obj.contains("f 1//1 3//3 4//4"));
    }

    #[test]
    fn test_empty_mesh_rejected() {
        assert!(matches!(stl_bytes(&TriangleMesh::new()), Err(MeshError::EmptyMesh)));
        assert!(matches!(obj_string(&TriangleMesh::new()), Err(MeshError::EmptyMesh)));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(Format::from_path(Path::new("a.STL")).unwrap(), Format::Stl);
        assert_eq!(Format::from_path(Path::new("a.obj")).unwrap(), Format::Obj);
        assert!(matches!(
            Format::from_path(Path::new("a.glb")),
            Err(MeshError::UnsupportedFormat(_))
        ));
    }
}
