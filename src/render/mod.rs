//! WebGPU backend for both effects.

mod helpers;
mod hyperspeed;
mod iridescence;
mod post;
mod targets;

use crate::effect::{EffectScene, Frame, FrameUniforms};
use crate::instance::RenderBackend;
use hyperspeed::HyperspeedPass;
use iridescence::IridescencePass;
use web_sys as web;

enum Passes {
    Iridescence(IridescencePass),
    Hyperspeed(Box<HyperspeedPass>),
}

struct Gpu {
    canvas: web::HtmlCanvasElement,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    passes: Passes,
}

/// Surface, device and the pipelines of one effect instance.
///
/// `release` destroys every buffer and texture, then the device; afterwards
/// all calls are no-ops.
pub struct WgpuBackend {
    gpu: Option<Gpu>,
}

impl WgpuBackend {
    pub async fn new(
        canvas: &web::HtmlCanvasElement,
        scene: &EffectScene,
        width: u32,
        height: u32,
    ) -> anyhow::Result<Self> {
        let (width, height) = (width.max(1), height.max(1));
        crate::dom::sync_canvas_backing_size(canvas, width, height);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: Some("new2canada_fx_device"),
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;

        let caps = surface.get_capabilities(&adapter);
        // linear formats: shader output is written as-is, like a WebGL canvas
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Rgba8Unorm
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let passes = match scene {
            EffectScene::Iridescence(_) => Passes::Iridescence(IridescencePass::new(&device, format)),
            EffectScene::Hyperspeed(state) => Passes::Hyperspeed(Box::new(HyperspeedPass::new(
                &device, format, state, width, height,
            ))),
        };
        log::info!(
            "[render] {} backend ready at {}x{} ({:?})",
            scene.kind().name(),
            width,
            height,
            format
        );
        Ok(Self {
            gpu: Some(Gpu {
                canvas: canvas.clone(),
                surface,
                device,
                queue,
                config,
                passes,
            }),
        })
    }
}

impl RenderBackend for WgpuBackend {
    fn resize(&mut self, width: u32, height: u32) {
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };
        if width == 0 || height == 0 {
            return;
        }
        crate::dom::sync_canvas_backing_size(&gpu.canvas, width, height);
        gpu.config.width = width;
        gpu.config.height = height;
        gpu.surface.configure(&gpu.device, &gpu.config);
        if let Passes::Hyperspeed(pass) = &mut gpu.passes {
            pass.resize(&gpu.device, &gpu.queue, width, height);
        }
    }

    fn render(&mut self, frame: &Frame<'_>) -> anyhow::Result<()> {
        let Some(gpu) = self.gpu.as_mut() else {
            return Ok(());
        };
        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("[render] surface lost; reconfiguring and skipping frame");
                gpu.surface.configure(&gpu.device, &gpu.config);
                return Ok(());
            }
            Err(e) => return Err(anyhow::anyhow!("surface error: {:?}", e)),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        let clear = helpers::to_wgpu_color(frame.clear);
        match (&gpu.passes, &frame.uniforms) {
            (Passes::Iridescence(pass), FrameUniforms::Iridescence(u)) => {
                pass.draw(&gpu.queue, &mut encoder, &view, u, clear);
            }
            (Passes::Hyperspeed(pass), FrameUniforms::Scene(u)) => {
                pass.draw(&gpu.queue, &mut encoder, &view, u, frame.draws, clear);
            }
            _ => anyhow::bail!("frame does not match the backend's effect"),
        }
        gpu.queue.submit(Some(encoder.finish()));
        output.present();
        Ok(())
    }

    fn release(&mut self) {
        let Some(gpu) = self.gpu.take() else {
            return;
        };
        match &gpu.passes {
            Passes::Iridescence(pass) => pass.destroy(),
            Passes::Hyperspeed(pass) => pass.destroy(),
        }
        gpu.device.destroy();
        drop(gpu);
        log::info!("[render] GPU resources released");
    }
}
