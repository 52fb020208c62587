//! Scene objects and world scaling
//!
//! The scene compresses heliocentric distances with a square-root
//! mapping so the inner planets and the Kuiper belt fit one view, and
//! exaggerates body radii and moon orbits so they are visible at all.
//! Kinematics stay epoch-exact; only the embedding is stylized.

use crate::config::ViewerConfig;
use crate::geometry::{
    self, generate_ring, generate_uv_sphere, LineVertex, MeshVertex, ParticleInstance, QuadVertex,
    SphereOptions, ORBIT_SAMPLES,
};
use crate::pipeline::{BindLayouts, ObjectUniforms, Pipelines};
use crate::starfield::generate_stars;
use crate::texture::{self, LoadedTexture, TextureKey};
use glam::{Mat4, Vec3};
use orrery_core::constants::AU;
use orrery_core::coordinates::CartesianPosition;
use orrery_core::grid::ReferenceGrid;
use orrery_sim::{epoch_to_jc, generate_belt, BeltSpec, Body, Moon, SolarSystem};
use wgpu::util::DeviceExt;

/// Scene units per sqrt(AU)
pub const DISTANCE_SCALE: f32 = 10.0;
/// Star backdrop radius (scene units), inside zfar
pub const STAR_DOME_RADIUS: f32 = 1800.0;
/// Grid and orbit paths extend past the Kuiper belt
const GRID_EXTENT_AU: f64 = 55.0;

/// Orbit path colors, Mercury through Pluto
const ORBIT_COLORS: [[f32; 3]; 9] = [
    [0.6, 0.5, 0.4],
    [0.8, 0.7, 0.4],
    [0.3, 0.5, 0.8],
    [0.7, 0.3, 0.2],
    [0.7, 0.6, 0.4],
    [0.7, 0.65, 0.4],
    [0.4, 0.6, 0.7],
    [0.3, 0.4, 0.7],
    [0.5, 0.45, 0.4],
];
const ORBIT_ALPHA: f32 = 0.25;
const GRID_COLOR: [f32; 4] = [0.3, 0.36, 0.42, 0.16];

/// Compress a heliocentric distance: scene = sqrt(AU) * DISTANCE_SCALE
pub fn scale_distance(meters: f64) -> f32 {
    ((meters / AU).max(0.0).sqrt() * DISTANCE_SCALE as f64) as f32
}

/// Map an ecliptic-frame position (meters) into scene units.
/// Ecliptic x/y span the scene XZ plane; ecliptic north is scene +Y.
pub fn scale_position(pos: &CartesianPosition) -> Vec3 {
    let r = pos.magnitude();
    if r < 1.0 {
        return Vec3::ZERO;
    }
    let dir = Vec3::new(
        (pos.x / r) as f32,
        (pos.z / r) as f32,
        (-pos.y / r) as f32,
    );
    dir * scale_distance(r)
}

fn scale_ecliptic_point(p: [f64; 3]) -> Vec3 {
    scale_position(&CartesianPosition::new(p[0], p[1], p[2]))
}

/// Hand-tuned display radius per body (scene units)
pub fn display_radius(body: Body) -> f32 {
    match body {
        Body::Sun => 3.0,
        Body::Mercury => 0.25,
        Body::Venus => 0.45,
        Body::Earth => 0.5,
        Body::Mars => 0.38,
        Body::Jupiter => 1.6,
        Body::Saturn => 1.35,
        Body::Uranus => 0.9,
        Body::Neptune => 0.85,
        Body::Pluto => 0.22,
    }
}

/// Moon display radius, from the true radius ratio, clamped visible
pub fn moon_display_radius(moon: Moon) -> f32 {
    let parent = display_radius(moon.parent());
    let ratio = (moon.radius() / moon.parent().radius()) as f32;
    parent * ratio.powf(0.4).clamp(0.12, 0.45)
}

/// Moon display offset from the parent center: clears the parent's
/// display radius (and its rings), spaced by position in the moon list
pub fn moon_display_offset(moon: Moon) -> f32 {
    let parent = display_radius(moon.parent());
    let base = if moon.parent().rings().is_some() { 2.8 } else { 1.8 };
    let index = Moon::of(moon.parent())
        .iter()
        .position(|m| *m == moon)
        .unwrap_or(0) as f32;
    parent * (base + 0.9 * index)
}

/// Scene position of a body at the system's current epoch
pub fn body_scene_position(system: &SolarSystem, body: Body) -> Vec3 {
    scale_position(&system.body_position(body))
}

/// Scene position of a moon: parent position plus the exaggerated
/// parent-relative offset along the moon's true direction
pub fn moon_scene_position(system: &SolarSystem, moon: Moon) -> Vec3 {
    let parent = body_scene_position(system, moon.parent());
    let rel = system.moon_offset(moon);
    let len = rel.norm();
    if len < 1.0 {
        return parent;
    }
    let dir = Vec3::new(
        (rel.x / len) as f32,
        (rel.z / len) as f32,
        (-rel.y / len) as f32,
    );
    parent + dir * moon_display_offset(moon)
}

struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl GpuMesh {
    fn new(device: &wgpu::Device, label: &str, vertices: &[MeshVertex], indices: &[u32]) -> Self {
        Self {
            vertex_buffer: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(vertices),
                usage: wgpu::BufferUsages::VERTEX,
            }),
            index_buffer: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(indices),
                usage: wgpu::BufferUsages::INDEX,
            }),
            index_count: indices.len() as u32,
        }
    }
}

struct LineMesh {
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
}

impl LineMesh {
    fn new(device: &wgpu::Device, label: &str, vertices: &[LineVertex]) -> Self {
        Self {
            vertex_buffer: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(vertices),
                usage: wgpu::BufferUsages::VERTEX,
            }),
            vertex_count: vertices.len() as u32,
        }
    }
}

struct ParticleSet {
    instance_buffer: wgpu::Buffer,
    instance_count: u32,
}

impl ParticleSet {
    fn new(device: &wgpu::Device, label: &str, instances: &[ParticleInstance]) -> Self {
        Self {
            instance_buffer: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(instances),
                usage: wgpu::BufferUsages::VERTEX,
            }),
            instance_count: instances.len() as u32,
        }
    }
}

/// One drawable: its uniforms, and a texture bind group where the
/// pipeline samples one
struct DrawObject {
    uniform_buffer: wgpu::Buffer,
    object_bind_group: wgpu::BindGroup,
    texture_bind_group: Option<wgpu::BindGroup>,
    uniforms: ObjectUniforms,
}

impl DrawObject {
    fn new(
        device: &wgpu::Device,
        layouts: &BindLayouts,
        label: &str,
        uniforms: ObjectUniforms,
        texture_view: Option<(&wgpu::TextureView, &wgpu::Sampler)>,
    ) -> Self {
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::bytes_of(&uniforms),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let object_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &layouts.object,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let texture_bind_group =
            texture_view.map(|(view, sampler)| make_texture_bind_group(device, layouts, view, sampler));

        Self {
            uniform_buffer,
            object_bind_group,
            texture_bind_group,
            uniforms,
        }
    }

    fn set_model(&mut self, queue: &wgpu::Queue, model: Mat4) {
        self.uniforms.model = model.to_cols_array_2d();
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&self.uniforms));
    }
}

fn make_texture_bind_group(
    device: &wgpu::Device,
    layouts: &BindLayouts,
    view: &wgpu::TextureView,
    sampler: &wgpu::Sampler,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Texture Bind Group"),
        layout: &layouts.texture,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    })
}

/// All GPU-resident scene state
pub struct Scene {
    sphere: GpuMesh,
    quad: GpuMesh,
    sampler: wgpu::Sampler,

    bodies: Vec<(Body, DrawObject)>,
    moons: Vec<(Moon, DrawObject)>,
    rings: Vec<(Body, GpuMesh, DrawObject)>,
    orbit_paths: Vec<(Body, LineMesh, DrawObject)>,
    grid: (LineMesh, DrawObject),
    belts: Vec<(BeltSpec, ParticleSet, DrawObject)>,
    stars: (ParticleSet, DrawObject),

    pub show_orbits: bool,
    pub show_grid: bool,
    pub show_belts: bool,
}

impl Scene {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layouts: &BindLayouts,
        config: &ViewerConfig,
    ) -> Self {
        let sampler = texture::create_sampler(device);

        let (sphere_vertices, sphere_indices) = generate_uv_sphere(SphereOptions::default());
        let sphere = GpuMesh::new(device, "Sphere Mesh", &sphere_vertices, &sphere_indices);

        let (quad_vertices, quad_indices) = QuadVertex::quad();
        let quad = GpuMesh::new_quad(device, &quad_vertices, &quad_indices);

        // Bodies: fallback texture is a 1x1 of the base color, swapped
        // out when the real texture arrives
        let bodies = Body::all()
            .iter()
            .map(|&body| {
                let view = texture::solid_color_view(device, queue, body.base_color());
                let uniforms = ObjectUniforms::new(
                    Mat4::IDENTITY.to_cols_array_2d(),
                    [1.0, 1.0, 1.0, 1.0],
                    body == Body::Sun,
                    false,
                );
                let object = DrawObject::new(
                    device,
                    layouts,
                    body.name(),
                    uniforms,
                    Some((&view, &sampler)),
                );
                (body, object)
            })
            .collect();

        let moons = Moon::all()
            .iter()
            .map(|&moon| {
                let view = texture::solid_color_view(device, queue, moon.base_color());
                let uniforms = ObjectUniforms::new(
                    Mat4::IDENTITY.to_cols_array_2d(),
                    [1.0, 1.0, 1.0, 1.0],
                    false,
                    false,
                );
                let object = DrawObject::new(
                    device,
                    layouts,
                    moon.name(),
                    uniforms,
                    Some((&view, &sampler)),
                );
                (moon, object)
            })
            .collect();

        // Ring systems: annulus mesh in body-local scene units with a
        // procedural band texture
        let rings = Body::all()
            .iter()
            .filter_map(|&body| body.rings().map(|spec| (body, spec)))
            .enumerate()
            .map(|(index, (body, spec))| {
                let to_scene = display_radius(body) / body.radius() as f32;
                let (vertices, indices) = generate_ring(
                    spec.inner_radius as f32 * to_scene,
                    spec.outer_radius as f32 * to_scene,
                    96,
                );
                let mesh = GpuMesh::new(device, "Ring Mesh", &vertices, &indices);

                let bands = texture::ring_band_image(spec.tint, config.seed + index as u64);
                let view = texture::upload_rgba(device, queue, &bands);
                let uniforms = ObjectUniforms::new(
                    Mat4::IDENTITY.to_cols_array_2d(),
                    [1.0, 1.0, 1.0, 1.0],
                    false,
                    true,
                );
                let object = DrawObject::new(
                    device,
                    layouts,
                    "Ring",
                    uniforms,
                    Some((&view, &sampler)),
                );
                (body, mesh, object)
            })
            .collect();

        // Orbit paths sampled from J2000 elements; secular drift over
        // the viewable range is far below a pixel
        let orbit_paths = Body::planets()
            .iter()
            .enumerate()
            .filter_map(|(index, &body)| body.j2000_elements().map(|el| (index, body, el)))
            .map(|(index, body, elements)| {
                let points: Vec<[f32; 3]> = geometry::orbit_path_points(&elements, ORBIT_SAMPLES)
                    .into_iter()
                    .map(|p| scale_ecliptic_point(p).to_array())
                    .collect();
                let mesh = LineMesh::new(
                    device,
                    "Orbit Path",
                    &geometry::polyline_to_segments(&points),
                );

                let c = ORBIT_COLORS[index];
                let uniforms = ObjectUniforms::new(
                    Mat4::IDENTITY.to_cols_array_2d(),
                    [c[0], c[1], c[2], ORBIT_ALPHA],
                    false,
                    false,
                );
                let object = DrawObject::new(device, layouts, "Orbit Path", uniforms, None);
                (body, mesh, object)
            })
            .collect();

        let grid = Self::build_grid(device, layouts);

        let belt_specs = [
            BeltSpec::asteroid_belt(config.asteroid_count, config.seed),
            BeltSpec::kuiper_belt(config.kuiper_count, config.seed + 1),
        ];
        let belts = belt_specs
            .into_iter()
            .map(|spec| {
                let particles = Self::build_belt_particles(&spec);
                let set = ParticleSet::new(device, spec.name, &particles);
                let uniforms = ObjectUniforms::new(
                    Mat4::IDENTITY.to_cols_array_2d(),
                    [1.0, 1.0, 1.0, 1.0],
                    false,
                    false,
                );
                let object = DrawObject::new(device, layouts, spec.name, uniforms, None);
                (spec, set, object)
            })
            .collect();

        let star_instances = generate_stars(config.star_count, config.seed + 2, STAR_DOME_RADIUS);
        let stars = (
            ParticleSet::new(device, "Star Field", &star_instances),
            DrawObject::new(
                device,
                layouts,
                "Star Field",
                ObjectUniforms::new(
                    Mat4::IDENTITY.to_cols_array_2d(),
                    [1.0, 1.0, 1.0, 1.0],
                    false,
                    false,
                ),
                None,
            ),
        );

        Self {
            sphere,
            quad,
            sampler,
            bodies,
            moons,
            rings,
            orbit_paths,
            grid,
            belts,
            stars,
            show_orbits: true,
            show_grid: true,
            show_belts: true,
        }
    }

    fn build_grid(device: &wgpu::Device, layouts: &BindLayouts) -> (LineMesh, DrawObject) {
        let grid = ReferenceGrid::with_defaults();
        let max_radius = GRID_EXTENT_AU * AU;

        let mut segments: Vec<LineVertex> = Vec::new();
        for k in 0..grid.ring_count_for(max_radius) {
            let ring: Vec<[f32; 3]> = grid
                .ring_polyline(k)
                .iter()
                .map(|p| scale_position(p).to_array())
                .collect();
            segments.extend(geometry::polyline_to_segments(&ring));
        }
        for s in 0..grid.config().n_spokes {
            let [a, b] = grid.spoke_polyline(s, max_radius);
            segments.push(LineVertex {
                position: scale_position(&a).to_array(),
            });
            segments.push(LineVertex {
                position: scale_position(&b).to_array(),
            });
        }

        let mesh = LineMesh::new(device, "Reference Grid", &segments);
        let object = DrawObject::new(
            device,
            layouts,
            "Reference Grid",
            ObjectUniforms::new(Mat4::IDENTITY.to_cols_array_2d(), GRID_COLOR, false, false),
            None,
        );
        (mesh, object)
    }

    fn build_belt_particles(spec: &BeltSpec) -> Vec<ParticleInstance> {
        // Particle size grows with belt distance so outer belts stay visible
        let size_scale = 0.018 * (spec.mid_radius() / AU).sqrt() as f32;

        generate_belt(spec)
            .iter()
            .map(|p| {
                let r = scale_distance(p.radius_au * AU);
                // Preserve the belt's angular thickness through compression
                let h = (p.height_au / p.radius_au) as f32 * r;
                ParticleInstance {
                    position: [r * p.angle.cos() as f32, h, r * p.angle.sin() as f32],
                    size: p.size * size_scale,
                    color: [p.tint[0], p.tint[1], p.tint[2], 0.85],
                }
            })
            .collect()
    }

    /// Refresh every model matrix from the simulation state
    pub fn update(&mut self, queue: &wgpu::Queue, system: &SolarSystem) {
        let jc = epoch_to_jc(system.epoch());

        for (body, object) in &mut self.bodies {
            let position = body_scene_position(system, *body);
            let model = Mat4::from_translation(position)
                * Mat4::from_rotation_x(body.axial_tilt() as f32)
                * Mat4::from_rotation_y(system.rotation_angle(*body) as f32)
                * Mat4::from_scale(Vec3::splat(display_radius(*body)));
            object.set_model(queue, model);
        }

        for (moon, object) in &mut self.moons {
            let position = moon_scene_position(system, *moon);
            let model = Mat4::from_translation(position)
                * Mat4::from_scale(Vec3::splat(moon_display_radius(*moon)));
            object.set_model(queue, model);
        }

        for (body, _, object) in &mut self.rings {
            let position = body_scene_position(system, *body);
            let model =
                Mat4::from_translation(position) * Mat4::from_rotation_x(body.axial_tilt() as f32);
            object.set_model(queue, model);
        }

        for (spec, _, object) in &mut self.belts {
            let model = Mat4::from_rotation_y(-spec.revolution_angle(jc) as f32);
            object.set_model(queue, model);
        }
    }

    /// Swap a body's fallback texture for the decoded one
    pub fn apply_texture(
        &mut self,
        device: &wgpu::Device,
        layouts: &BindLayouts,
        queue: &wgpu::Queue,
        loaded: &LoadedTexture,
    ) {
        let view = texture::upload_rgba(device, queue, &loaded.image);
        let bind_group = make_texture_bind_group(device, layouts, &view, &self.sampler);

        match loaded.key {
            TextureKey::Body(body) => {
                if let Some((_, object)) = self.bodies.iter_mut().find(|(b, _)| *b == body) {
                    object.texture_bind_group = Some(bind_group);
                }
            }
            TextureKey::Moon(moon) => {
                if let Some((_, object)) = self.moons.iter_mut().find(|(m, _)| *m == moon) {
                    object.texture_bind_group = Some(bind_group);
                }
            }
        }
    }

    /// Record every draw into the pass. The globals bind group must
    /// already be set at index 0.
    pub fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, pipelines: &Pipelines) {
        // Opaque spheres
        rpass.set_pipeline(&pipelines.body);
        rpass.set_vertex_buffer(0, self.sphere.vertex_buffer.slice(..));
        rpass.set_index_buffer(self.sphere.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        let spheres = self
            .bodies
            .iter()
            .map(|(_, object)| object)
            .chain(self.moons.iter().map(|(_, object)| object));
        for object in spheres {
            rpass.set_bind_group(1, &object.object_bind_group, &[]);
            if let Some(texture) = &object.texture_bind_group {
                rpass.set_bind_group(2, texture, &[]);
            }
            rpass.draw_indexed(0..self.sphere.index_count, 0, 0..1);
        }

        // Polylines
        rpass.set_pipeline(&pipelines.lines);
        if self.show_orbits {
            for (_, mesh, object) in &self.orbit_paths {
                rpass.set_bind_group(1, &object.object_bind_group, &[]);
                rpass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                rpass.draw(0..mesh.vertex_count, 0..1);
            }
        }
        if self.show_grid {
            let (mesh, object) = &self.grid;
            rpass.set_bind_group(1, &object.object_bind_group, &[]);
            rpass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
            rpass.draw(0..mesh.vertex_count, 0..1);
        }

        // Translucent ring annuli
        rpass.set_pipeline(&pipelines.ring);
        for (_, mesh, object) in &self.rings {
            rpass.set_bind_group(1, &object.object_bind_group, &[]);
            if let Some(texture) = &object.texture_bind_group {
                rpass.set_bind_group(2, texture, &[]);
            }
            rpass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
            rpass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..mesh.index_count, 0, 0..1);
        }

        // Billboard particles
        rpass.set_pipeline(&pipelines.points);
        rpass.set_vertex_buffer(0, self.quad.vertex_buffer.slice(..));
        rpass.set_index_buffer(self.quad.index_buffer.slice(..), wgpu::IndexFormat::Uint32);

        let (star_set, star_object) = &self.stars;
        rpass.set_bind_group(1, &star_object.object_bind_group, &[]);
        rpass.set_vertex_buffer(1, star_set.instance_buffer.slice(..));
        rpass.draw_indexed(0..self.quad.index_count, 0, 0..star_set.instance_count);

        if self.show_belts {
            for (_, set, object) in &self.belts {
                rpass.set_bind_group(1, &object.object_bind_group, &[]);
                rpass.set_vertex_buffer(1, set.instance_buffer.slice(..));
                rpass.draw_indexed(0..self.quad.index_count, 0, 0..set.instance_count);
            }
        }
    }
}

impl GpuMesh {
    fn new_quad(device: &wgpu::Device, vertices: &[QuadVertex; 4], indices: &[u32; 6]) -> Self {
        Self {
            vertex_buffer: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Billboard Quad"),
                contents: bytemuck::cast_slice(vertices),
                usage: wgpu::BufferUsages::VERTEX,
            }),
            index_buffer: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Billboard Quad"),
                contents: bytemuck::cast_slice(indices),
                usage: wgpu::BufferUsages::INDEX,
            }),
            index_count: indices.len() as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hifitime::Epoch;

    #[test]
    fn test_scale_distance_monotonic() {
        let mut last = 0.0;
        for au in [0.4, 1.0, 5.2, 30.0, 50.0] {
            let d = scale_distance(au * AU);
            assert!(d > last, "scale not monotonic at {} AU", au);
            last = d;
        }
    }

    #[test]
    fn test_scale_position_direction_preserved() {
        let pos = CartesianPosition::from_au(1.0, 1.0, 0.0);
        let scene = scale_position(&pos);

        // Ecliptic x -> scene x, ecliptic y -> scene -z, plane stays flat
        assert!(scene.x > 0.0);
        assert!(scene.z < 0.0);
        assert_eq!(scene.y, 0.0);
        assert!((scene.x.abs() - scene.z.abs()).abs() < 1e-4);
    }

    #[test]
    fn test_scale_position_origin() {
        assert_eq!(scale_position(&CartesianPosition::new(0.0, 0.0, 0.0)), Vec3::ZERO);
    }

    #[test]
    fn test_ecliptic_north_is_up() {
        let pos = CartesianPosition::from_au(0.0, 0.0, 2.0);
        let scene = scale_position(&pos);
        assert!(scene.y > 0.0);
        assert!(scene.x.abs() < 1e-6 && scene.z.abs() < 1e-6);
    }

    #[test]
    fn test_sun_largest_display_radius() {
        for body in Body::planets() {
            assert!(display_radius(*body) < display_radius(Body::Sun));
        }
    }

    #[test]
    fn test_moon_clears_parent_radius() {
        for moon in Moon::all() {
            assert!(
                moon_display_offset(*moon) > display_radius(moon.parent()),
                "{} sits inside its parent",
                moon.name()
            );
            assert!(moon_display_radius(*moon) < display_radius(moon.parent()));

            // Moons of ringed parents stay outside the ring annulus
            if let Some(rings) = moon.parent().rings() {
                let parent = moon.parent();
                let ring_outer = rings.outer_radius as f32 / parent.radius() as f32
                    * display_radius(parent);
                assert!(
                    moon_display_offset(*moon) > ring_outer,
                    "{} inside {}'s rings",
                    moon.name(),
                    parent.name()
                );
            }
        }
    }

    #[test]
    fn test_moon_offsets_increase_outward() {
        let jovian = Moon::of(Body::Jupiter);
        for pair in jovian.windows(2) {
            assert!(moon_display_offset(pair[0]) < moon_display_offset(pair[1]));
        }
    }

    #[test]
    fn test_moon_scene_position_tracks_parent() {
        let system = SolarSystem::at_epoch(Epoch::from_gregorian_utc(2005, 7, 1, 0, 0, 0, 0));
        for moon in Moon::all() {
            let parent = body_scene_position(&system, moon.parent());
            let pos = moon_scene_position(&system, *moon);
            let dist = (pos - parent).length();
            assert!(
                (dist - moon_display_offset(*moon)).abs() < 1e-3,
                "{} at {} scene units from parent",
                moon.name(),
                dist
            );
        }
    }

    #[test]
    fn test_belt_particles_inside_star_dome() {
        let spec = BeltSpec::kuiper_belt(500, 3);
        for p in Scene::build_belt_particles(&spec) {
            let r = (p.position[0].powi(2) + p.position[1].powi(2) + p.position[2].powi(2)).sqrt();
            assert!(r < STAR_DOME_RADIUS);
            assert!(p.size > 0.0);
        }
    }

    #[test]
    fn test_planets_inside_grid_extent() {
        let system = SolarSystem::new();
        let grid_edge = scale_distance(GRID_EXTENT_AU * AU);
        for body in Body::planets() {
            let r = body_scene_position(&system, *body).length();
            assert!(r < grid_edge, "{} outside the grid", body.name());
        }
    }
}
