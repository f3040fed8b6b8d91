// Frame timing, easing and rendering tuning constants shared by both effects.

// Longest simulated step per frame (seconds); larger gaps (background tabs) are clamped
pub const MAX_FRAME_DT_SEC: f32 = 0.1;

// Backing store never exceeds this device pixel ratio
pub const MAX_PIXEL_RATIO: f64 = 2.0;

// Exponential easing toward targets: 10% of the gap per frame at 60 fps
pub const EASE_RATE_PER_SEC: f32 = 6.321_606; // -60 * ln(0.9)
pub const SPEED_UP_SNAP: f32 = 0.000_01; // below this the speed-up snaps onto its target
pub const FOV_SNAP: f32 = 0.001; // degrees

// Hyperspeed camera
pub const CAMERA_POSITION: [f32; 3] = [0.0, 8.0, -5.0];
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 10_000.0;
pub const LOOK_AT_PROGRESS: f32 = 0.025; // near-field sample along the road for the look-at target

// Fog range as a fraction of the travel length
pub const FOG_NEAR_FACTOR: f32 = 0.2;
pub const FOG_FAR_FACTOR: f32 = 500.0;

// Bloom composite
pub const BLOOM_THRESHOLD: f32 = 0.2;
pub const BLOOM_STRENGTH: f32 = 1.0;

// Road geometry subdivisions (across, along)
pub const ROAD_SEGMENTS_X: u32 = 20;
pub const ROAD_SEGMENTS_Z: u32 = 100;

// Car light tube tessellation
pub const TUBE_RADIAL_SEGMENTS: u32 = 8;
pub const TUBE_LENGTH_SEGMENTS: u32 = 12;

// Car lights float this multiple of their radius above the floor separation
pub const CAR_LIGHT_LIFT: f32 = 1.3;

// Light sticks travel this many units per second of effect time
pub const LIGHT_STICK_SPEED: f32 = 120.0;
