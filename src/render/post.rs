use super::helpers;
use super::targets::{bloom_size, RenderTargets, HDR_FORMAT, LDR_FORMAT};
use crate::constants::{BLOOM_STRENGTH, BLOOM_THRESHOLD};
use crate::effect::PostUniforms;
use crate::programs::POST_WGSL;

/// One uniform buffer per post pass; each is rewritten only on resize so
/// every pass in a frame sees its own parameters.
struct PassUniforms {
    bright: wgpu::Buffer,
    blur_h: wgpu::Buffer,
    blur_v: wgpu::Buffer,
    composite: wgpu::Buffer,
    fxaa: wgpu::Buffer,
}

impl PassUniforms {
    fn values(width: u32, height: u32) -> [PostUniforms; 5] {
        let (bw, bh) = bloom_size(width, height);
        let half = PostUniforms {
            resolution: [bw as f32, bh as f32],
            blur_dir: [0.0, 0.0],
            bloom_strength: BLOOM_STRENGTH,
            threshold: BLOOM_THRESHOLD,
            _pad: [0.0; 2],
        };
        let full = PostUniforms {
            resolution: [width.max(1) as f32, height.max(1) as f32],
            ..half
        };
        [
            half,
            PostUniforms {
                blur_dir: [1.0, 0.0],
                ..half
            },
            PostUniforms {
                blur_dir: [0.0, 1.0],
                ..half
            },
            full,
            full,
        ]
    }

    fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let [bright, blur_h, blur_v, composite, fxaa] = Self::values(width, height);
        Self {
            bright: helpers::uniform_buffer(device, "post_bright_uniforms", &bright),
            blur_h: helpers::uniform_buffer(device, "post_blur_h_uniforms", &blur_h),
            blur_v: helpers::uniform_buffer(device, "post_blur_v_uniforms", &blur_v),
            composite: helpers::uniform_buffer(device, "post_composite_uniforms", &composite),
            fxaa: helpers::uniform_buffer(device, "post_fxaa_uniforms", &fxaa),
        }
    }

    fn write(&self, queue: &wgpu::Queue, width: u32, height: u32) {
        let values = Self::values(width, height);
        for (buffer, value) in self.all().into_iter().zip(values.iter()) {
            queue.write_buffer(buffer, 0, bytemuck::bytes_of(value));
        }
    }

    fn all(&self) -> [&wgpu::Buffer; 5] {
        [
            &self.bright,
            &self.blur_h,
            &self.blur_v,
            &self.composite,
            &self.fxaa,
        ]
    }
}

struct PostBindGroups {
    from_hdr_bright: wgpu::BindGroup,
    from_bloom_a: wgpu::BindGroup,
    from_bloom_b: wgpu::BindGroup,
    from_hdr_composite: wgpu::BindGroup,
    bloom_a_only: wgpu::BindGroup, // group1 for composite
    from_ldr: wgpu::BindGroup,
}

/// Bright pass, separable blur, composite and FXAA.
pub(crate) struct PostChain {
    bgl0: wgpu::BindGroupLayout, // tex+sampler+uniform
    bgl1: wgpu::BindGroupLayout, // tex+sampler
    sampler: wgpu::Sampler,
    uniforms: PassUniforms,
    groups: PostBindGroups,
    bright_pipeline: wgpu::RenderPipeline,
    blur_pipeline: wgpu::RenderPipeline,
    composite_pipeline: wgpu::RenderPipeline,
    fxaa_pipeline: wgpu::RenderPipeline,
}

fn texture_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
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

impl PostChain {
    pub(crate) fn new(
        device: &wgpu::Device,
        targets: &RenderTargets,
        swap_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("post_shader"),
            source: wgpu::ShaderSource::Wgsl(POST_WGSL.into()),
        });
        let bgl0 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("post_bgl0"),
            entries: &[
                texture_entry(0),
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
            entries: &[texture_entry(0), sampler_entry(1)],
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
        let uniforms = PassUniforms::new(device, width, height);

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
        let bright_pipeline = helpers::make_post_pipeline(
            device,
            "bright_pipeline",
            &pl_single,
            &shader,
            "fs_bright",
            HDR_FORMAT,
            None,
        );
        let blur_pipeline = helpers::make_post_pipeline(
            device,
            "blur_pipeline",
            &pl_single,
            &shader,
            "fs_blur",
            HDR_FORMAT,
            None,
        );
        let composite_pipeline = helpers::make_post_pipeline(
            device,
            "composite_pipeline",
            &pl_composite,
            &shader,
            "fs_composite",
            LDR_FORMAT,
            Some(wgpu::BlendState::REPLACE),
        );
        let fxaa_pipeline = helpers::make_post_pipeline(
            device,
            "fxaa_pipeline",
            &pl_single,
            &shader,
            "fs_fxaa",
            swap_format,
            Some(wgpu::BlendState::REPLACE),
        );

        let groups = Self::bind_groups(device, &bgl0, &bgl1, &sampler, &uniforms, targets);
        Self {
            bgl0,
            bgl1,
            sampler,
            uniforms,
            groups,
            bright_pipeline,
            blur_pipeline,
            composite_pipeline,
            fxaa_pipeline,
        }
    }

    fn bind_groups(
        device: &wgpu::Device,
        bgl0: &wgpu::BindGroupLayout,
        bgl1: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
        uniforms: &PassUniforms,
        targets: &RenderTargets,
    ) -> PostBindGroups {
        let source = |label: &str, view: &wgpu::TextureView, buffer: &wgpu::Buffer| {
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
                        resource: buffer.as_entire_binding(),
                    },
                ],
            })
        };
        PostBindGroups {
            from_hdr_bright: source("bg_hdr_bright", &targets.hdr_view, &uniforms.bright),
            from_bloom_a: source("bg_from_bloom_a", &targets.bloom_a_view, &uniforms.blur_h),
            from_bloom_b: source("bg_from_bloom_b", &targets.bloom_b_view, &uniforms.blur_v),
            from_hdr_composite: source(
                "bg_hdr_composite",
                &targets.hdr_view,
                &uniforms.composite,
            ),
            bloom_a_only: device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("bg_bloom_a_only"),
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
            from_ldr: source("bg_from_ldr", &targets.ldr_view, &uniforms.fxaa),
        }
    }

    /// Targets were recreated: point the bind groups at them and refresh sizes.
    pub(crate) fn resize(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        targets: &RenderTargets,
        width: u32,
        height: u32,
    ) {
        self.uniforms.write(queue, width, height);
        self.groups = Self::bind_groups(
            device,
            &self.bgl0,
            &self.bgl1,
            &self.sampler,
            &self.uniforms,
            targets,
        );
    }

    /// hdr -> bright -> blur h -> blur v -> composite (ldr) -> fxaa (surface)
    pub(crate) fn run(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        targets: &RenderTargets,
        surface_view: &wgpu::TextureView,
    ) {
        let g = &self.groups;
        blit(
            encoder,
            "bright_pass",
            &targets.bloom_a_view,
            &self.bright_pipeline,
            &g.from_hdr_bright,
            None,
        );
        blit(
            encoder,
            "blur_h",
            &targets.bloom_b_view,
            &self.blur_pipeline,
            &g.from_bloom_a,
            None,
        );
        blit(
            encoder,
            "blur_v",
            &targets.bloom_a_view,
            &self.blur_pipeline,
            &g.from_bloom_b,
            None,
        );
        blit(
            encoder,
            "composite",
            &targets.ldr_view,
            &self.composite_pipeline,
            &g.from_hdr_composite,
            Some(&g.bloom_a_only),
        );
        blit(
            encoder,
            "fxaa",
            surface_view,
            &self.fxaa_pipeline,
            &g.from_ldr,
            None,
        );
    }

    pub(crate) fn destroy(&self) {
        for buffer in self.uniforms.all() {
            buffer.destroy();
        }
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
    drop(r);
}
