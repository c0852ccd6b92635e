//! Unit cube geometry.
//!
//! 36 non-indexed vertices: six faces, two triangles each, drawn with
//! `draw(0..36)`. Positions span [-0.5, 0.5] on every axis and UVs cover the
//! full texture on every face.

use bytemuck::{Pod, Zeroable};

/// Interleaved cube vertex (position + texture coordinates).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct CubeVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

impl CubeVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x2  // uv
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CubeVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

pub const CUBE_VERTEX_COUNT: u32 = 36;

const fn v(x: f32, y: f32, z: f32, u: f32, w: f32) -> CubeVertex {
    CubeVertex {
        position: [x, y, z],
        uv: [u, w],
    }
}

#[rustfmt::skip]
pub const CUBE_VERTICES: [CubeVertex; CUBE_VERTEX_COUNT as usize] = [
    // back (z = -0.5)
    v(-0.5, -0.5, -0.5, 0.0, 0.0), v( 0.5, -0.5, -0.5, 1.0, 0.0), v( 0.5,  0.5, -0.5, 1.0, 1.0),
    v( 0.5,  0.5, -0.5, 1.0, 1.0), v(-0.5,  0.5, -0.5, 0.0, 1.0), v(-0.5, -0.5, -0.5, 0.0, 0.0),
    // front (z = +0.5)
    v(-0.5, -0.5,  0.5, 0.0, 0.0), v( 0.5, -0.5,  0.5, 1.0, 0.0), v( 0.5,  0.5,  0.5, 1.0, 1.0),
    v( 0.5,  0.5,  0.5, 1.0, 1.0), v(-0.5,  0.5,  0.5, 0.0, 1.0), v(-0.5, -0.5,  0.5, 0.0, 0.0),
    // left (x = -0.5)
    v(-0.5,  0.5,  0.5, 1.0, 0.0), v(-0.5,  0.5, -0.5, 1.0, 1.0), v(-0.5, -0.5, -0.5, 0.0, 1.0),
    v(-0.5, -0.5, -0.5, 0.0, 1.0), v(-0.5, -0.5,  0.5, 0.0, 0.0), v(-0.5,  0.5,  0.5, 1.0, 0.0),
    // right (x = +0.5)
    v( 0.5,  0.5,  0.5, 1.0, 0.0), v( 0.5,  0.5, -0.5, 1.0, 1.0), v( 0.5, -0.5, -0.5, 0.0, 1.0),
    v( 0.5, -0.5, -0.5, 0.0, 1.0), v( 0.5, -0.5,  0.5, 0.0, 0.0), v( 0.5,  0.5,  0.5, 1.0, 0.0),
    // bottom (y = -0.5)
    v(-0.5, -0.5, -0.5, 0.0, 1.0), v( 0.5, -0.5, -0.5, 1.0, 1.0), v( 0.5, -0.5,  0.5, 1.0, 0.0),
    v( 0.5, -0.5,  0.5, 1.0, 0.0), v(-0.5, -0.5,  0.5, 0.0, 0.0), v(-0.5, -0.5, -0.5, 0.0, 1.0),
    // top (y = +0.5)
    v(-0.5,  0.5, -0.5, 0.0, 1.0), v( 0.5,  0.5, -0.5, 1.0, 1.0), v( 0.5,  0.5,  0.5, 1.0, 0.0),
    v( 0.5,  0.5,  0.5, 1.0, 0.0), v(-0.5,  0.5,  0.5, 0.0, 0.0), v(-0.5,  0.5, -0.5, 0.0, 1.0),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<CubeVertex>(), 20);
        assert_eq!(CubeVertex::layout().array_stride, 20);
    }

    #[test]
    fn every_vertex_on_the_unit_cube() {
        for vert in CUBE_VERTICES {
            assert!(vert.position.iter().all(|c| c.abs() == 0.5), "{vert:?}");
            assert!(vert.uv.iter().all(|c| (0.0..=1.0).contains(c)), "{vert:?}");
        }
    }

    #[test]
    fn each_face_is_planar() {
        // Every group of six vertices shares one fixed coordinate.
        for face in CUBE_VERTICES.chunks(6) {
            let planar = (0..3).any(|axis| {
                let c = face[0].position[axis];
                face.iter().all(|v| v.position[axis] == c)
            });
            assert!(planar, "{face:?}");
        }
    }

    #[test]
    fn faces_cover_all_six_sides() {
        let mut sides: Vec<(usize, i8)> = CUBE_VERTICES
            .chunks(6)
            .map(|face| {
                let axis = (0..3)
                    .find(|&a| face.iter().all(|v| v.position[a] == face[0].position[a]))
                    .unwrap();
                (axis, face[0].position[axis].signum() as i8)
            })
            .collect();
        sides.sort();
        sides.dedup();
        assert_eq!(sides.len(), 6);
    }

    #[test]
    fn uv_spans_full_texture_per_face() {
        for face in CUBE_VERTICES.chunks(6) {
            let us: Vec<f32> = face.iter().map(|v| v.uv[0]).collect();
            let vs: Vec<f32> = face.iter().map(|v| v.uv[1]).collect();
            assert!(us.contains(&0.0) && us.contains(&1.0));
            assert!(vs.contains(&0.0) && vs.contains(&1.0));
        }
    }
}
