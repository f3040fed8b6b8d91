// Uniform blocks, laid out to match the WGSL structs in shaders/.

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct IridescenceUniforms {
    pub time: f32,
    pub amplitude: f32,
    pub speed: f32,
    pub _pad: f32,
    pub color: [f32; 4],
    pub resolution: [f32; 4], // width, height, aspect, 0
    pub mouse: [f32; 4],      // x, y in [0, 1], y up
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub camera_pos: [f32; 4],
    pub fog_color: [f32; 4],
    pub travel: [f32; 4], // fog near, fog far, travel length, time
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniforms {
    pub color: [f32; 4],
    pub shoulder_color: [f32; 4],
    pub broken_color: [f32; 4],
    pub placement: [f32; 4], // x offset, travel speed, 0, markings flag
    pub markings: [f32; 4],  // lanes, broken width, broken length, shoulder width
    pub fade: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PostUniforms {
    pub resolution: [f32; 2],
    pub blur_dir: [f32; 2],
    pub bloom_strength: f32,
    pub threshold: f32,
    pub _pad: [f32; 2],
}
