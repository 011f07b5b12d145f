use super::helpers;
use super::targets::RenderTargets;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct PostUniforms {
    resolution: [f32; 2],
    time: f32,
    glow: f32,
    blur_dir: [f32; 2],
    bloom_strength: f32,
    threshold: f32,
}

/// Bright-pass, separable blur and composite for the headline glow.
///
/// Each pass owns its uniform buffer: writes made through the queue land
/// before the encoder is submitted, so passes cannot share one.
pub(crate) struct GlowChain {
    bgl0: wgpu::BindGroupLayout, // tex+sampler+uniform
    bgl1: wgpu::BindGroupLayout, // tex+sampler
    sampler: wgpu::Sampler,
    ub_base: wgpu::Buffer,
    ub_blur_h: wgpu::Buffer,
    ub_blur_v: wgpu::Buffer,
    bright_pipeline: wgpu::RenderPipeline,
    blur_pipeline: wgpu::RenderPipeline,
    composite_pipeline: wgpu::RenderPipeline,
    groups: GlowBindGroups,
}

struct GlowBindGroups {
    bright: wgpu::BindGroup,
    blur_h: wgpu::BindGroup,
    blur_v: wgpu::BindGroup,
    composite_scene: wgpu::BindGroup,
    composite_bloom: wgpu::BindGroup,
}

fn tex_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
            multisampled: false,
            view_dimension: wgpu::TextureViewDimension::D2,
            sample_type: wgpu::TextureSampleType::Float { filterable: true },
        },
        count: None,
    }
}

fn sampler_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
        count: None,
    }
}

impl GlowChain {
    pub(crate) fn new(
        device: &wgpu::Device,
        targets: &RenderTargets,
        swap_format: wgpu::TextureFormat,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("post_shader"),
            source: wgpu::ShaderSource::Wgsl(yantra_core::POST_WGSL.into()),
        });
        let bgl0 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("post_bgl0"),
            entries: &[
                tex_entry(0),
                sampler_entry(1),
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });
        let bgl1 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("post_bgl1"),
            entries: &[tex_entry(0), sampler_entry(1)],
        });
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("linear_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let make_ub = |label: &str| {
            device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(label),
                size: std::mem::size_of::<PostUniforms>() as u64,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            })
        };
        let ub_base = make_ub("post_uniforms");
        let ub_blur_h = make_ub("post_uniforms_blur_h");
        let ub_blur_v = make_ub("post_uniforms_blur_v");

        let pl_single = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl_post_0"),
            bind_group_layouts: &[&bgl0],
            push_constant_ranges: &[],
        });
        let pl_composite = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl_post_comp"),
            bind_group_layouts: &[&bgl0, &bgl1],
            push_constant_ranges: &[],
        });
        let hdr = super::targets::HDR_FORMAT;
        let bright_pipeline =
            helpers::make_post_pipeline(device, &pl_single, &shader, "fs_bright", hdr);
        let blur_pipeline = helpers::make_post_pipeline(device, &pl_single, &shader, "fs_blur", hdr);
        let composite_pipeline =
            helpers::make_post_pipeline(device, &pl_composite, &shader, "fs_composite", swap_format);

        let groups = Self::bind_groups(
            device, &bgl0, &bgl1, &sampler, &ub_base, &ub_blur_h, &ub_blur_v, targets,
        );
        Self {
            bgl0,
            bgl1,
            sampler,
            ub_base,
            ub_blur_h,
            ub_blur_v,
            bright_pipeline,
            blur_pipeline,
            composite_pipeline,
            groups,
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn bind_groups(
        device: &wgpu::Device,
        bgl0: &wgpu::BindGroupLayout,
        bgl1: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
        ub_base: &wgpu::Buffer,
        ub_blur_h: &wgpu::Buffer,
        ub_blur_v: &wgpu::Buffer,
        targets: &RenderTargets,
    ) -> GlowBindGroups {
        let with_uniforms = |label: &str, view: &wgpu::TextureView, ub: &wgpu::Buffer| {
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(label),
                layout: bgl0,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(sampler),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: ub.as_entire_binding(),
                    },
                ],
            })
        };
        GlowBindGroups {
            bright: with_uniforms("bg_bright", &targets.hdr_view, ub_base),
            blur_h: with_uniforms("bg_blur_h", &targets.bloom_a_view, ub_blur_h),
            blur_v: with_uniforms("bg_blur_v", &targets.bloom_b_view, ub_blur_v),
            composite_scene: with_uniforms("bg_composite", &targets.hdr_view, ub_base),
            composite_bloom: device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("bg_composite_bloom"),
                layout: bgl1,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(&targets.bloom_a_view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(sampler),
                    },
                ],
            }),
        }
    }

    /// Rebind after the render targets were recreated.
    pub(crate) fn retarget(&mut self, device: &wgpu::Device, targets: &RenderTargets) {
        self.groups = Self::bind_groups(
            device,
            &self.bgl0,
            &self.bgl1,
            &self.sampler,
            &self.ub_base,
            &self.ub_blur_h,
            &self.ub_blur_v,
            targets,
        );
    }

    pub(crate) fn write_uniforms(
        &self,
        queue: &wgpu::Queue,
        bloom_resolution: [f32; 2],
        time: f32,
        glow: f32,
    ) {
        let make = |blur_dir: [f32; 2]| PostUniforms {
            resolution: bloom_resolution,
            time,
            glow,
            blur_dir,
            bloom_strength: crate::constants::BLOOM_STRENGTH,
            threshold: crate::constants::BLOOM_THRESHOLD,
        };
        queue.write_buffer(&self.ub_base, 0, bytemuck::bytes_of(&make([0.0, 0.0])));
        queue.write_buffer(&self.ub_blur_h, 0, bytemuck::bytes_of(&make([1.0, 0.0])));
        queue.write_buffer(&self.ub_blur_v, 0, bytemuck::bytes_of(&make([0.0, 1.0])));
    }

    /// hdr -> bloom_a (bright) -> bloom_b (blur h) -> bloom_a (blur v) -> swapchain.
    pub(crate) fn encode(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        targets: &RenderTargets,
        output: &wgpu::TextureView,
    ) {
        let g = &self.groups;
        blit(encoder, "bright_pass", &targets.bloom_a_view, &self.bright_pipeline, &g.bright, None);
        blit(encoder, "blur_h", &targets.bloom_b_view, &self.blur_pipeline, &g.blur_h, None);
        blit(encoder, "blur_v", &targets.bloom_a_view, &self.blur_pipeline, &g.blur_v, None);
        blit(
            encoder,
            "composite",
            output,
            &self.composite_pipeline,
            &g.composite_scene,
            Some(&g.composite_bloom),
        );
    }
}

fn blit(
    encoder: &mut wgpu::CommandEncoder,
    label: &str,
    target: &wgpu::TextureView,
    pipeline: &wgpu::RenderPipeline,
    bg0: &wgpu::BindGroup,
    bg1: Option<&wgpu::BindGroup>,
) {
    let mut r = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some(label),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: target,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
    });
    r.set_pipeline(pipeline);
    r.set_bind_group(0, bg0, &[]);
    if let Some(g1) = bg1 {
        r.set_bind_group(1, g1, &[]);
    }
    r.draw(0..3, 0..1);
}
