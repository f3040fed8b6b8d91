use super::{Mesh, QuadVertex, SurfaceVertex, TubeVertex};
use std::f32::consts::TAU;

/// Flat strip on the ground plane, `width` across and running from z = 0 to
/// z = -length. `uv.y` is the travel progress of each vertex.
pub fn road_plane(width: f32, length: f32, segments_x: u32, segments_z: u32) -> Mesh<SurfaceVertex> {
    let sx = segments_x.max(1);
    let sz = segments_z.max(1);
    let mut vertices = Vec::with_capacity(((sx + 1) * (sz + 1)) as usize);
    for iz in 0..=sz {
        let v = iz as f32 / sz as f32;
        for ix in 0..=sx {
            let u = ix as f32 / sx as f32;
            vertices.push(SurfaceVertex {
                position: [-width * 0.5 + width * u, 0.0, -length * v],
                uv: [u, v],
            });
        }
    }
    Mesh {
        vertices,
        indices: grid_indices(sx, sz),
    }
}

/// Open unit tube along -z: radius 1, depth 1. `along` is 0 at z = 0 and 1
/// at the far end.
pub fn tube(radial_segments: u32, length_segments: u32) -> Mesh<TubeVertex> {
    let radial = radial_segments.max(3);
    let rings = length_segments.max(1);
    let mut vertices = Vec::with_capacity(((radial + 1) * (rings + 1)) as usize);
    for j in 0..=rings {
        let along = j as f32 / rings as f32;
        for i in 0..=radial {
            let a = i as f32 / radial as f32 * TAU;
            vertices.push(TubeVertex {
                position: [a.cos(), a.sin(), -along],
                along,
            });
        }
    }
    Mesh {
        vertices,
        indices: grid_indices(radial, rings),
    }
}

/// Unit quad centered on the origin.
pub fn quad() -> Mesh<QuadVertex> {
    Mesh {
        vertices: vec![
            QuadVertex { corner: [-0.5, -0.5] },
            QuadVertex { corner: [0.5, -0.5] },
            QuadVertex { corner: [0.5, 0.5] },
            QuadVertex { corner: [-0.5, 0.5] },
        ],
        indices: vec![0, 1, 2, 0, 2, 3],
    }
}

// two triangles per cell of a (cols + 1) x (rows + 1) vertex lattice
fn grid_indices(cols: u32, rows: u32) -> Vec<u32> {
    let stride = cols + 1;
    let mut indices = Vec::with_capacity((cols * rows * 6) as usize);
    for r in 0..rows {
        for c in 0..cols {
            let a = r * stride + c;
            let b = a + 1;
            let d = a + stride;
            let e = d + 1;
            indices.extend_from_slice(&[a, d, b, b, d, e]);
        }
    }
    indices
}
