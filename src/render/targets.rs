use super::helpers;

pub(crate) const HDR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;
pub(crate) const LDR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;
pub(crate) const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Offscreen targets for the Hyperspeed chain.
///
/// - `hdr` holds the scene at full resolution, with `depth` beside it.
/// - `bloom_a` / `bloom_b` are half-res ping-pong buffers for bright pass and blur.
/// - `ldr` receives the bloom composite and feeds the anti-alias pass.
pub(crate) struct RenderTargets {
    pub(crate) hdr: wgpu::Texture,
    pub(crate) hdr_view: wgpu::TextureView,
    pub(crate) depth: wgpu::Texture,
    pub(crate) depth_view: wgpu::TextureView,
    pub(crate) bloom_a: wgpu::Texture,
    pub(crate) bloom_a_view: wgpu::TextureView,
    pub(crate) bloom_b: wgpu::Texture,
    pub(crate) bloom_b_view: wgpu::TextureView,
    pub(crate) ldr: wgpu::Texture,
    pub(crate) ldr_view: wgpu::TextureView,
}

pub(crate) fn bloom_size(width: u32, height: u32) -> (u32, u32) {
    ((width.max(1) / 2).max(1), (height.max(1) / 2).max(1))
}

impl RenderTargets {
    pub(crate) fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let sampled = wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING;
        let (hdr, hdr_view) =
            helpers::create_color_texture(device, "hdr_tex", width, height, HDR_FORMAT, sampled);
        let (depth, depth_view) = helpers::create_color_texture(
            device,
            "depth_tex",
            width,
            height,
            DEPTH_FORMAT,
            wgpu::TextureUsages::RENDER_ATTACHMENT,
        );
        let (bw, bh) = bloom_size(width, height);
        let (bloom_a, bloom_a_view) =
            helpers::create_color_texture(device, "bloom_a", bw, bh, HDR_FORMAT, sampled);
        let (bloom_b, bloom_b_view) =
            helpers::create_color_texture(device, "bloom_b", bw, bh, HDR_FORMAT, sampled);
        let (ldr, ldr_view) =
            helpers::create_color_texture(device, "ldr_tex", width, height, LDR_FORMAT, sampled);
        Self {
            hdr,
            hdr_view,
            depth,
            depth_view,
            bloom_a,
            bloom_a_view,
            bloom_b,
            bloom_b_view,
            ldr,
            ldr_view,
        }
    }

    pub(crate) fn recreate(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.destroy();
        *self = Self::new(device, width, height);
    }

    pub(crate) fn destroy(&self) {
        for tex in [&self.hdr, &self.depth, &self.bloom_a, &self.bloom_b, &self.ldr] {
            tex.destroy();
        }
    }
}
