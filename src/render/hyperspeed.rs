use super::helpers;
use super::post::PostChain;
use super::targets::{RenderTargets, DEPTH_FORMAT, HDR_FORMAT};
use crate::distortion::DistortionStrategy;
use crate::effect::{HyperspeedState, ObjectUniforms, SceneUniforms};
use crate::programs::{ProgramTemplate, CAR_LIGHTS_PROGRAM, LIGHT_STICKS_PROGRAM, ROAD_PROGRAM};
use crate::scene::{
    CarLightInstance, DrawCall, LightStickInstance, MeshId, QuadVertex, SurfaceVertex, TubeVertex,
};
use fnv::FnvHashMap;
use wgpu::util::DeviceExt;

const SURFACE_ATTRS: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x2];
const TUBE_ATTRS: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32];
const CAR_LIGHT_ATTRS: [wgpu::VertexAttribute; 3] =
    wgpu::vertex_attr_array![2 => Float32x3, 3 => Float32x3, 4 => Float32x3];
const QUAD_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];
const STICK_ATTRS: [wgpu::VertexAttribute; 3] =
    wgpu::vertex_attr_array![1 => Float32, 2 => Float32x2, 3 => Float32x3];

fn buffer_layout<T>(
    step_mode: wgpu::VertexStepMode,
    attributes: &'static [wgpu::VertexAttribute],
) -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<T>() as u64,
        step_mode,
        attributes,
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Program {
    Road,
    CarLights,
    LightSticks,
}

fn program_for(mesh: MeshId) -> Option<Program> {
    match mesh {
        MeshId::RoadLeft | MeshId::RoadRight | MeshId::Island => Some(Program::Road),
        MeshId::CarLightsLeft | MeshId::CarLightsRight => Some(Program::CarLights),
        MeshId::LightSticks => Some(Program::LightSticks),
        MeshId::FullscreenTriangle => None,
    }
}

struct MeshBuffers {
    vertex: wgpu::Buffer,
    index: wgpu::Buffer,
    instances: Option<wgpu::Buffer>,
    object: wgpu::Buffer,
    object_group: wgpu::BindGroup,
}

impl MeshBuffers {
    fn destroy(&self) {
        self.vertex.destroy();
        self.index.destroy();
        if let Some(b) = &self.instances {
            b.destroy();
        }
        self.object.destroy();
    }
}

struct SceneLayouts<'a> {
    device: &'a wgpu::Device,
    object_bgl: &'a wgpu::BindGroupLayout,
}

impl SceneLayouts<'_> {
    fn upload<V: bytemuck::Pod, I: bytemuck::Pod>(
        &self,
        label: &str,
        vertices: &[V],
        indices: &[u32],
        instances: Option<&[I]>,
        object: &ObjectUniforms,
    ) -> MeshBuffers {
        let device = self.device;
        let vertex = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let instances = instances.filter(|i| !i.is_empty()).map(|data| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(data),
                usage: wgpu::BufferUsages::VERTEX,
            })
        });
        let object_buffer = helpers::uniform_buffer(device, label, object);
        let object_group =
            helpers::uniform_bind_group(device, label, self.object_bgl, &object_buffer);
        MeshBuffers {
            vertex,
            index,
            instances,
            object: object_buffer,
            object_group,
        }
    }
}

/// Scene pass into the HDR target, then the post chain onto the surface.
pub(crate) struct HyperspeedPass {
    scene_buffer: wgpu::Buffer,
    scene_group: wgpu::BindGroup,
    road_pipeline: wgpu::RenderPipeline,
    car_light_pipeline: wgpu::RenderPipeline,
    stick_pipeline: wgpu::RenderPipeline,
    meshes: FnvHashMap<MeshId, MeshBuffers>,
    targets: RenderTargets,
    post: PostChain,
}

impl HyperspeedPass {
    pub(crate) fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        state: &HyperspeedState,
        width: u32,
        height: u32,
    ) -> Self {
        let stages = wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT;
        let scene_bgl = helpers::uniform_layout(device, "scene_bgl", stages);
        let object_bgl = helpers::uniform_layout(device, "object_bgl", stages);
        let scene_buffer = helpers::uniform_buffer(device, "scene_uniforms", &state.uniforms());
        let scene_group = helpers::uniform_bind_group(device, "scene_bg", &scene_bgl, &scene_buffer);
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&scene_bgl, &object_bgl],
            push_constant_ranges: &[],
        });

        let strategy = state.options().distortion.strategy();
        let builder = PipelineBuilder {
            device,
            layout: &layout,
            strategy,
        };
        let road_pipeline = builder.build(
            &ROAD_PROGRAM,
            &[buffer_layout::<SurfaceVertex>(
                wgpu::VertexStepMode::Vertex,
                &SURFACE_ATTRS,
            )],
            None,
            true,
        );
        let car_light_pipeline = builder.build(
            &CAR_LIGHTS_PROGRAM,
            &[
                buffer_layout::<TubeVertex>(wgpu::VertexStepMode::Vertex, &TUBE_ATTRS),
                buffer_layout::<CarLightInstance>(
                    wgpu::VertexStepMode::Instance,
                    &CAR_LIGHT_ATTRS,
                ),
            ],
            Some(wgpu::BlendState::ALPHA_BLENDING),
            false,
        );
        let stick_pipeline = builder.build(
            &LIGHT_STICKS_PROGRAM,
            &[
                buffer_layout::<QuadVertex>(wgpu::VertexStepMode::Vertex, &QUAD_ATTRS),
                buffer_layout::<LightStickInstance>(wgpu::VertexStepMode::Instance, &STICK_ATTRS),
            ],
            None,
            true,
        );

        let objects: FnvHashMap<MeshId, ObjectUniforms> = state.objects().iter().copied().collect();
        let object_for = |id: MeshId| objects.get(&id).copied().unwrap_or_default();
        let uploader = SceneLayouts {
            device,
            object_bgl: &object_bgl,
        };
        let scene = state.scene();
        let mut meshes = FnvHashMap::default();
        for road in &scene.roads {
            meshes.insert(
                road.id,
                uploader.upload::<SurfaceVertex, SurfaceVertex>(
                    "road",
                    &road.mesh.vertices,
                    &road.mesh.indices,
                    None,
                    &object_for(road.id),
                ),
            );
        }
        meshes.insert(
            MeshId::LightSticks,
            uploader.upload(
                "light_sticks",
                &scene.quad.vertices,
                &scene.quad.indices,
                Some(scene.sticks.instances.as_slice()),
                &object_for(MeshId::LightSticks),
            ),
        );
        for set in &scene.car_lights {
            meshes.insert(
                set.id,
                uploader.upload(
                    "car_lights",
                    &scene.tube.vertices,
                    &scene.tube.indices,
                    Some(set.instances.as_slice()),
                    &object_for(set.id),
                ),
            );
        }

        let targets = RenderTargets::new(device, width, height);
        let post = PostChain::new(device, &targets, surface_format, width, height);
        log::info!(
            "[render] hyperspeed pipelines built ({} distortion, {} meshes)",
            strategy.name(),
            meshes.len()
        );
        Self {
            scene_buffer,
            scene_group,
            road_pipeline,
            car_light_pipeline,
            stick_pipeline,
            meshes,
            targets,
            post,
        }
    }

    pub(crate) fn resize(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, width: u32, height: u32) {
        self.targets.recreate(device, width, height);
        self.post.resize(device, queue, &self.targets, width, height);
    }

    fn pipeline(&self, program: Program) -> &wgpu::RenderPipeline {
        match program {
            Program::Road => &self.road_pipeline,
            Program::CarLights => &self.car_light_pipeline,
            Program::LightSticks => &self.stick_pipeline,
        }
    }

    pub(crate) fn draw(
        &self,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        surface_view: &wgpu::TextureView,
        uniforms: &SceneUniforms,
        draws: &[DrawCall],
        clear: wgpu::Color,
    ) {
        queue.write_buffer(&self.scene_buffer, 0, bytemuck::bytes_of(uniforms));
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.hdr_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.scene_group, &[]);
            for draw in draws {
                if draw.instances == 0 || draw.elements == 0 {
                    continue;
                }
                let (Some(program), Some(mesh)) = (program_for(draw.mesh), self.meshes.get(&draw.mesh))
                else {
                    continue;
                };
                rpass.set_pipeline(self.pipeline(program));
                rpass.set_bind_group(1, &mesh.object_group, &[]);
                rpass.set_vertex_buffer(0, mesh.vertex.slice(..));
                if let Some(instances) = &mesh.instances {
                    rpass.set_vertex_buffer(1, instances.slice(..));
                }
                rpass.set_index_buffer(mesh.index.slice(..), wgpu::IndexFormat::Uint32);
                rpass.draw_indexed(0..draw.elements, 0, 0..draw.instances);
            }
        }
        self.post.run(encoder, &self.targets, surface_view);
    }

    pub(crate) fn destroy(&self) {
        self.scene_buffer.destroy();
        for mesh in self.meshes.values() {
            mesh.destroy();
        }
        self.targets.destroy();
        self.post.destroy();
    }
}

struct PipelineBuilder<'a> {
    device: &'a wgpu::Device,
    layout: &'a wgpu::PipelineLayout,
    strategy: &'a dyn DistortionStrategy,
}

impl PipelineBuilder<'_> {
    fn build(
        &self,
        template: &ProgramTemplate,
        buffers: &[wgpu::VertexBufferLayout<'_>],
        blend: Option<wgpu::BlendState>,
        depth_write: bool,
    ) -> wgpu::RenderPipeline {
        let source = template.compose(self.strategy);
        let shader = self
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(template.label),
                source: wgpu::ShaderSource::Wgsl(source.into()),
            });
        self.device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(template.label),
                layout: Some(self.layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some(template.vs_entry),
                    buffers,
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                },
                primitive: wgpu::PrimitiveState::default(),
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DEPTH_FORMAT,
                    depth_write_enabled: depth_write,
                    depth_compare: wgpu::CompareFunction::LessEqual,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some(template.fs_entry),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: HDR_FORMAT,
                        blend,
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                }),
                cache: None,
                multiview: None,
            })
    }
}
