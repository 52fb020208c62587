//! Procedural mesh generation for the scene

use bytemuck::{Pod, Zeroable};
use orrery_sim::OrbitalElements;

/// Number of polyline samples around an orbit path
pub const ORBIT_SAMPLES: usize = 96;

/// Vertex for lit, textured meshes (spheres, rings)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl MeshVertex {
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        const ATTRS: [wgpu::VertexAttribute; 3] =
            wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRS,
        }
    }
}

/// Vertex for unlit polylines (orbit paths, reference grids)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
}

impl LineVertex {
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRS,
        }
    }
}

/// Per-instance data for billboard particles (belts, stars)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct ParticleInstance {
    pub position: [f32; 3],
    pub size: f32,
    pub color: [f32; 4],
}

impl ParticleInstance {
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        const ATTRS: [wgpu::VertexAttribute; 3] =
            wgpu::vertex_attr_array![1 => Float32x3, 2 => Float32, 3 => Float32x4];
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ParticleInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &ATTRS,
        }
    }
}

/// Corner of the shared billboard quad, in [-0.5, 0.5]
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct QuadVertex {
    pub corner: [f32; 2],
}

impl QuadVertex {
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &wgpu::vertex_attr_array![0 => Float32x2],
        }
    }

    /// Two triangles covering the unit quad
    pub fn quad() -> ([QuadVertex; 4], [u32; 6]) {
        (
            [
                QuadVertex { corner: [-0.5, -0.5] },
                QuadVertex { corner: [0.5, -0.5] },
                QuadVertex { corner: [0.5, 0.5] },
                QuadVertex { corner: [-0.5, 0.5] },
            ],
            [0, 1, 2, 0, 2, 3],
        )
    }
}

#[derive(Clone, Copy, Debug)]
pub struct SphereOptions {
    pub radius: f32,
    pub stacks: u32,
    pub slices: u32,
}

impl Default for SphereOptions {
    fn default() -> Self {
        Self {
            radius: 1.0,
            stacks: 32,
            slices: 64,
        }
    }
}

/// Generate a UV sphere with poles along +Y and equirectangular UVs.
///
/// Returns `(vertices, indices)` as a CCW triangle list.
pub fn generate_uv_sphere(opts: SphereOptions) -> (Vec<MeshVertex>, Vec<u32>) {
    let stacks = opts.stacks.max(2);
    let slices = opts.slices.max(3);

    let mut vertices = Vec::with_capacity(((stacks + 1) * (slices + 1)) as usize);

    for stack in 0..=stacks {
        let v = stack as f32 / stacks as f32;
        let phi = v * std::f32::consts::PI;

        let sin_phi = phi.sin();
        let cos_phi = phi.cos();

        for slice in 0..=slices {
            let u = slice as f32 / slices as f32;
            let theta = u * (2.0 * std::f32::consts::PI);

            let nx = sin_phi * theta.cos();
            let ny = cos_phi;
            let nz = sin_phi * theta.sin();

            vertices.push(MeshVertex {
                position: [opts.radius * nx, opts.radius * ny, opts.radius * nz],
                normal: [nx, ny, nz],
                uv: [u, v],
            });
        }
    }

    let ring = slices + 1;
    let mut indices = Vec::with_capacity((stacks * slices * 6) as usize);

    for stack in 0..stacks {
        for slice in 0..slices {
            let i0 = stack * ring + slice;
            let i1 = i0 + 1;
            let i2 = (stack + 1) * ring + slice;
            let i3 = i2 + 1;

            // Two triangles per quad (CCW)
            indices.push(i0);
            indices.push(i2);
            indices.push(i1);

            indices.push(i1);
            indices.push(i2);
            indices.push(i3);
        }
    }

    (vertices, indices)
}

/// Generate a flat ring annulus in the XZ plane, normal +Y.
///
/// UVs run radially: u = 0 at the inner edge, 1 at the outer edge.
pub fn generate_ring(inner_radius: f32, outer_radius: f32, segments: u32) -> (Vec<MeshVertex>, Vec<u32>) {
    let segments = segments.max(3);
    let mut vertices = Vec::with_capacity(((segments + 1) * 2) as usize);

    for seg in 0..=segments {
        let theta = 2.0 * std::f32::consts::PI * seg as f32 / segments as f32;
        let (sin_t, cos_t) = theta.sin_cos();
        let v = seg as f32 / segments as f32;

        vertices.push(MeshVertex {
            position: [inner_radius * cos_t, 0.0, inner_radius * sin_t],
            normal: [0.0, 1.0, 0.0],
            uv: [0.0, v],
        });
        vertices.push(MeshVertex {
            position: [outer_radius * cos_t, 0.0, outer_radius * sin_t],
            normal: [0.0, 1.0, 0.0],
            uv: [1.0, v],
        });
    }

    let mut indices = Vec::with_capacity((segments * 6) as usize);
    for seg in 0..segments {
        let i0 = seg * 2;
        let i1 = i0 + 1;
        let i2 = i0 + 2;
        let i3 = i0 + 3;

        indices.push(i0);
        indices.push(i2);
        indices.push(i1);

        indices.push(i1);
        indices.push(i2);
        indices.push(i3);
    }

    (vertices, indices)
}

/// Sample an orbit's ellipse over one full revolution (ecliptic frame,
/// meters). The first and last samples coincide so the polyline closes.
pub fn orbit_path_points(elements: &OrbitalElements, samples: usize) -> Vec<[f64; 3]> {
    let samples = samples.max(8);
    let rot = elements.perifocal_to_ecliptic();

    (0..=samples)
        .map(|k| {
            let mean = 2.0 * std::f64::consts::PI * k as f64 / samples as f64;
            let nu = elements.true_anomaly(elements.eccentric_anomaly(mean));
            let (x_pf, y_pf) = elements.position_perifocal(nu);
            let p = rot * nalgebra::Vector3::new(x_pf, y_pf, 0.0);
            [p.x, p.y, p.z]
        })
        .collect()
}

/// Expand a polyline into line-list vertex pairs
pub fn polyline_to_segments(points: &[[f32; 3]]) -> Vec<LineVertex> {
    let mut out = Vec::with_capacity(points.len().saturating_sub(1) * 2);
    for pair in points.windows(2) {
        out.push(LineVertex { position: pair[0] });
        out.push(LineVertex { position: pair[1] });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_sim::Body;

    #[test]
    fn test_sphere_counts() {
        let opts = SphereOptions {
            radius: 1.0,
            stacks: 8,
            slices: 12,
        };
        let (vertices, indices) = generate_uv_sphere(opts);
        assert_eq!(vertices.len(), (9 * 13) as usize);
        assert_eq!(indices.len(), (8 * 12 * 6) as usize);
        assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));
    }

    #[test]
    fn test_sphere_on_radius_with_unit_normals() {
        let (vertices, _) = generate_uv_sphere(SphereOptions {
            radius: 2.5,
            ..Default::default()
        });
        for v in &vertices {
            let r = (v.position[0].powi(2) + v.position[1].powi(2) + v.position[2].powi(2)).sqrt();
            assert!((r - 2.5).abs() < 1e-4);
            let n = (v.normal[0].powi(2) + v.normal[1].powi(2) + v.normal[2].powi(2)).sqrt();
            assert!((n - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_sphere_poles() {
        let (vertices, _) = generate_uv_sphere(SphereOptions::default());
        assert!((vertices.first().unwrap().position[1] - 1.0).abs() < 1e-6);
        assert!((vertices.last().unwrap().position[1] + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_ring_counts_and_radii() {
        let (vertices, indices) = generate_ring(2.0, 3.0, 48);
        assert_eq!(vertices.len(), 49 * 2);
        assert_eq!(indices.len(), 48 * 6);

        for (i, v) in vertices.iter().enumerate() {
            let r = (v.position[0].powi(2) + v.position[2].powi(2)).sqrt();
            let expected = if i % 2 == 0 { 2.0 } else { 3.0 };
            assert!((r - expected).abs() < 1e-4);
            assert_eq!(v.position[1], 0.0);
        }
    }

    #[test]
    fn test_orbit_path_closes() {
        let elements = Body::Mars.j2000_elements().unwrap();
        let path = orbit_path_points(&elements, ORBIT_SAMPLES);

        assert_eq!(path.len(), ORBIT_SAMPLES + 1);
        let first = path.first().unwrap();
        let last = path.last().unwrap();
        for axis in 0..3 {
            assert!(
                (first[axis] - last[axis]).abs() < 1e3,
                "axis {} open by {}",
                axis,
                (first[axis] - last[axis]).abs()
            );
        }
    }

    #[test]
    fn test_orbit_path_radius_bounds() {
        let elements = Body::Pluto.j2000_elements().unwrap();
        let path = orbit_path_points(&elements, 64);

        let a = elements.a;
        let e = elements.e;
        for p in &path {
            let r = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
            assert!(r >= a * (1.0 - e) * 0.999 && r <= a * (1.0 + e) * 1.001);
        }
    }

    #[test]
    fn test_polyline_to_segments() {
        let points = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0]];
        let segments = polyline_to_segments(&points);
        assert_eq!(segments.len(), 4);
        assert_eq!(segments[1].position, [1.0, 0.0, 0.0]);
        assert_eq!(segments[2].position, [1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_quad_indices_in_range() {
        let (vertices, indices) = QuadVertex::quad();
        assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));
    }
}
