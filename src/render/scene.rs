use super::helpers;
use super::mesh::{self, Mesh};
use super::targets::HDR_FORMAT;
use crate::constants::{MAX_OBJECTS, OBJECT_UNIFORM_STRIDE};
use glam::{Mat4, Vec3, Vec4};
use yantra_core::text::TextAtlas;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct GlobalsUniform {
    pub(crate) view_proj: [[f32; 4]; 4],
    pub(crate) eye: [f32; 4],
    pub(crate) ambient: [f32; 4],
    pub(crate) point_pos: [f32; 4],
    pub(crate) spot_pos: [f32; 4],
    pub(crate) spot_dir: [f32; 4],
    pub(crate) params: [f32; 4],
    pub(crate) backdrop: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct ObjectUniform {
    model: [[f32; 4]; 4],
    color: [f32; 4],
    uv_rect: [f32; 4],
    params: [f32; 4],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MeshKind {
    Quad,
    Cube,
}

/// One draw in the scene pass. Textured objects sample the glyph atlas and
/// are drawn after the opaque ones with alpha blending.
#[derive(Clone, Copy, Debug)]
pub struct DrawObject {
    pub mesh: MeshKind,
    pub model: Mat4,
    pub color: Vec4,
    pub uv_rect: [f32; 4],
    pub emissive: f32,
    pub textured: bool,
    pub lit: bool,
}

pub(crate) struct Globals {
    buffer: wgpu::Buffer,
    pub(crate) bind_group: wgpu::BindGroup,
}

pub(crate) struct SceneResources {
    pub(crate) main_globals: Globals,
    pub(crate) inset_globals: Globals,
    object_buffer: wgpu::Buffer,
    object_bg: wgpu::BindGroup,
    glyph_bg: wgpu::BindGroup,
    opaque: wgpu::RenderPipeline,
    blend: wgpu::RenderPipeline,
    pub(crate) backdrop: wgpu::RenderPipeline,
    quad: Mesh,
    cube: Mesh,
}

impl SceneResources {
    pub(crate) fn new(device: &wgpu::Device, queue: &wgpu::Queue, atlas: &TextAtlas) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(yantra_core::SCENE_WGSL.into()),
        });
        let uniform_entry = |dynamic: bool, min: Option<wgpu::BufferSize>| {
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: dynamic,
                    min_binding_size: min,
                },
                count: None,
            }
        };
        let bgl_globals = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bgl"),
            entries: &[uniform_entry(false, None)],
        });
        let object_size = std::mem::size_of::<ObjectUniform>() as u64;
        let bgl_object = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("object_bgl"),
            entries: &[uniform_entry(true, wgpu::BufferSize::new(object_size))],
        });
        let bgl_glyph = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("glyph_bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let make_globals = |label: &str| {
            let buffer = device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(label),
                size: std::mem::size_of::<GlobalsUniform>() as u64,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(label),
                layout: &bgl_globals,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                }],
            });
            Globals { buffer, bind_group }
        };
        let main_globals = make_globals("globals_main");
        let inset_globals = make_globals("globals_inset");

        let object_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("objects"),
            size: OBJECT_UNIFORM_STRIDE * MAX_OBJECTS as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let object_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("objects"),
            layout: &bgl_object,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &object_buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(object_size),
                }),
            }],
        });

        let glyph_bg = upload_atlas(device, queue, &bgl_glyph, atlas);

        let pl_scene = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl_scene"),
            bind_group_layouts: &[&bgl_globals, &bgl_object, &bgl_glyph],
            push_constant_ranges: &[],
        });
        let pl_backdrop = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl_backdrop"),
            bind_group_layouts: &[&bgl_globals],
            push_constant_ranges: &[],
        });

        Self {
            main_globals,
            inset_globals,
            object_buffer,
            object_bg,
            glyph_bg,
            opaque: helpers::make_scene_pipeline(device, &pl_scene, &shader, HDR_FORMAT, false),
            blend: helpers::make_scene_pipeline(device, &pl_scene, &shader, HDR_FORMAT, true),
            backdrop: helpers::make_backdrop_pipeline(device, &pl_backdrop, &shader, HDR_FORMAT),
            quad: mesh::create_quad(device),
            cube: mesh::create_cube(device),
        }
    }

    pub(crate) fn write_globals(queue: &wgpu::Queue, globals: &Globals, data: &GlobalsUniform) {
        queue.write_buffer(&globals.buffer, 0, bytemuck::bytes_of(data));
    }

    /// Packs objects at `OBJECT_UNIFORM_STRIDE`; returns how many fit.
    pub(crate) fn write_objects(&self, queue: &wgpu::Queue, objects: &[DrawObject]) -> usize {
        let count = objects.len().min(MAX_OBJECTS);
        if count < objects.len() {
            log::warn!("[render] dropping {} objects over the limit", objects.len() - count);
        }
        let stride = OBJECT_UNIFORM_STRIDE as usize;
        let mut staging = vec![0u8; stride * count];
        for (i, obj) in objects.iter().take(count).enumerate() {
            let u = ObjectUniform {
                model: obj.model.to_cols_array_2d(),
                color: obj.color.to_array(),
                uv_rect: obj.uv_rect,
                params: [
                    obj.emissive,
                    if obj.textured { 1.0 } else { 0.0 },
                    if obj.lit { 1.0 } else { 0.0 },
                    0.0,
                ],
            };
            let bytes = bytemuck::bytes_of(&u);
            staging[i * stride..i * stride + bytes.len()].copy_from_slice(bytes);
        }
        if !staging.is_empty() {
            queue.write_buffer(&self.object_buffer, 0, &staging);
        }
        count
    }

    /// Opaque meshes first, then blended text quads.
    pub(crate) fn draw_objects(
        &self,
        rpass: &mut wgpu::RenderPass<'_>,
        globals: &Globals,
        objects: &[DrawObject],
    ) {
        rpass.set_bind_group(0, &globals.bind_group, &[]);
        rpass.set_bind_group(2, &self.glyph_bg, &[]);
        for blended in [false, true] {
            rpass.set_pipeline(if blended { &self.blend } else { &self.opaque });
            for (i, obj) in objects.iter().enumerate() {
                if obj.textured != blended {
                    continue;
                }
                let offset = (i as u64 * OBJECT_UNIFORM_STRIDE) as u32;
                rpass.set_bind_group(1, &self.object_bg, &[offset]);
                match obj.mesh {
                    MeshKind::Quad => self.quad.draw(rpass),
                    MeshKind::Cube => self.cube.draw(rpass),
                }
            }
        }
    }
}

fn upload_atlas(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    layout: &wgpu::BindGroupLayout,
    atlas: &TextAtlas,
) -> wgpu::BindGroup {
    let bmp = &atlas.bitmap;
    let (tex, view) = helpers::create_texture(
        device,
        "glyph_atlas",
        bmp.width,
        bmp.height,
        wgpu::TextureFormat::R8Unorm,
        wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
    );
    if bmp.width > 0 && bmp.height > 0 {
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &tex,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &bmp.pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(bmp.width),
                rows_per_image: Some(bmp.height),
            },
            wgpu::Extent3d {
                width: bmp.width,
                height: bmp.height,
                depth_or_array_layers: 1,
            },
        );
    }
    let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("glyph_sampler"),
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        ..Default::default()
    });
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("glyph_bg"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(&sampler),
            },
        ],
    })
}

/// Pack per-view uniforms. `spot` is `(position, direction, cos_cutoff, intensity)`.
pub(crate) fn globals_uniform(
    view_proj: Mat4,
    eye: Vec3,
    ambient: f32,
    point: (Vec3, f32),
    spot: Option<(Vec3, Vec3, f32, f32)>,
    time: f32,
    glow: f32,
) -> GlobalsUniform {
    let (spot_pos, spot_dir, enabled) = match spot {
        Some((p, d, cos_cutoff, intensity)) => {
            (p.extend(cos_cutoff).to_array(), d.extend(intensity).to_array(), 1.0)
        }
        None => ([0.0; 4], [0.0, 0.0, -1.0, 0.0], 0.0),
    };
    GlobalsUniform {
        view_proj: view_proj.to_cols_array_2d(),
        eye: eye.extend(1.0).to_array(),
        ambient: [ambient, ambient, ambient, 1.0],
        point_pos: point.0.extend(point.1).to_array(),
        spot_pos,
        spot_dir,
        params: [time, glow, enabled, 0.0],
        backdrop: crate::constants::BACKDROP_RGBA,
    }
}
