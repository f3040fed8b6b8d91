use fnv::FnvHashMap;
use glam::{Vec3, Vec4};
use std::f32::consts::PI;
use std::fmt;

/// A named perturbation of the Hyperspeed travel path.
///
/// The same strategy bends geometry on the GPU (through [`wgsl`](Self::wgsl))
/// and steers the camera on the host (through [`offset`](Self::offset)), so
/// both must evaluate one formula built from one set of constants.
///
/// `wgsl` defines `fn get_distortion(progress: f32) -> vec3<f32>`; it may call
/// `travel_time()`, `nsin()` and `PI` from the shared program prelude.
pub trait DistortionStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn wgsl(&self) -> String;

    /// Offset at `progress` (0 at the camera, 1 at the far end) and `time`.
    fn offset(&self, progress: f32, time: f32) -> Vec3;

    /// Progress step sampled ahead of the look-at point.
    fn look_ahead(&self) -> f32;

    fn look_at_amp(&self) -> Vec3;

    fn look_at_offset(&self) -> Vec3;

    /// Camera-relative look-at target following the curve of the road.
    fn look_at(&self, progress: f32, time: f32) -> Vec3 {
        let bend = self.offset(progress, time) - self.offset(progress + self.look_ahead(), time);
        bend * self.look_at_amp() + self.look_at_offset()
    }
}

#[inline]
fn nsin(v: f32) -> f32 {
    v.sin() * 0.5 + 0.5
}

/// Two layered sinusoids per axis.
pub struct Turbulent {
    freq: Vec4,
    amp: Vec4,
}

const TURBULENT_ANCHOR: f32 = 0.0125;

pub static TURBULENT: Turbulent = Turbulent {
    freq: Vec4::new(4.0, 8.0, 8.0, 1.0),
    amp: Vec4::new(25.0, 5.0, 10.0, 10.0),
};

impl Turbulent {
    fn x(&self, p: f32, t: f32) -> f32 {
        let (f, a) = (self.freq, self.amp);
        let c = (PI * p * f.y + t * (f.y / f.x)).cos();
        (PI * p * f.x + t).cos() * a.x + c * c * a.y
    }

    fn y(&self, p: f32, t: f32) -> f32 {
        let (f, a) = (self.freq, self.amp);
        let n = nsin(PI * p * f.w + t / (f.z / f.w));
        -nsin(PI * p * f.z + t) * a.z - n * n * n * n * n * a.w
    }
}

impl DistortionStrategy for Turbulent {
    fn name(&self) -> &'static str {
        "turbulent"
    }

    fn wgsl(&self) -> String {
        let (f, a) = (self.freq, self.amp);
        format!(
            "fn distortion_x(p: f32, t: f32) -> f32 {{
    let c = cos(PI * p * {fy:?} + t * ({fy:?} / {fx:?}));
    return cos(PI * p * {fx:?} + t) * {ax:?} + c * c * {ay:?};
}}

fn distortion_y(p: f32, t: f32) -> f32 {{
    let n = nsin(PI * p * {fw:?} + t / ({fz:?} / {fw:?}));
    return -nsin(PI * p * {fz:?} + t) * {az:?} - n * n * n * n * n * {aw:?};
}}

fn get_distortion(progress: f32) -> vec3<f32> {{
    let t = travel_time();
    return vec3<f32>(
        distortion_x(progress, t) - distortion_x({anchor:?}, t),
        distortion_y(progress, t) - distortion_y({anchor:?}, t),
        0.0
    );
}}
",
            fx = f.x,
            fy = f.y,
            fz = f.z,
            fw = f.w,
            ax = a.x,
            ay = a.y,
            az = a.z,
            aw = a.w,
            anchor = TURBULENT_ANCHOR,
        )
    }

    fn offset(&self, progress: f32, time: f32) -> Vec3 {
        Vec3::new(
            self.x(progress, time) - self.x(TURBULENT_ANCHOR, time),
            self.y(progress, time) - self.y(TURBULENT_ANCHOR, time),
            0.0,
        )
    }

    fn look_ahead(&self) -> f32 {
        0.007
    }

    fn look_at_amp(&self) -> Vec3 {
        Vec3::new(-2.0, -5.0, 0.0)
    }

    fn look_at_offset(&self) -> Vec3 {
        Vec3::new(0.0, 0.0, -10.0)
    }
}

/// Rolling hills: one sinusoid per axis, including depth.
pub struct Mountain {
    freq: Vec3,
    amp: Vec3,
}

const MOUNTAIN_ANCHOR: f32 = 0.02;

pub static MOUNTAIN: Mountain = Mountain {
    freq: Vec3::new(3.0, 6.0, 10.0),
    amp: Vec3::new(30.0, 30.0, 20.0),
};

impl Mountain {
    fn raw(&self, p: f32, t: f32) -> Vec3 {
        let (f, a) = (self.freq, self.amp);
        Vec3::new(
            (p * PI * f.x + t).cos() * a.x,
            nsin(p * PI * f.y + t) * a.y,
            nsin(p * PI * f.z + t) * a.z,
        )
    }
}

impl DistortionStrategy for Mountain {
    fn name(&self) -> &'static str {
        "mountain"
    }

    fn wgsl(&self) -> String {
        let (f, a) = (self.freq, self.amp);
        format!(
            "fn mountain_raw(p: f32, t: f32) -> vec3<f32> {{
    return vec3<f32>(
        cos(p * PI * {fx:?} + t) * {ax:?},
        nsin(p * PI * {fy:?} + t) * {ay:?},
        nsin(p * PI * {fz:?} + t) * {az:?}
    );
}}

fn get_distortion(progress: f32) -> vec3<f32> {{
    let t = travel_time();
    return mountain_raw(progress, t) - mountain_raw({anchor:?}, t);
}}
",
            fx = f.x,
            fy = f.y,
            fz = f.z,
            ax = a.x,
            ay = a.y,
            az = a.z,
            anchor = MOUNTAIN_ANCHOR,
        )
    }

    fn offset(&self, progress: f32, time: f32) -> Vec3 {
        self.raw(progress, time) - self.raw(MOUNTAIN_ANCHOR, time)
    }

    fn look_ahead(&self) -> f32 {
        0.02
    }

    fn look_at_amp(&self) -> Vec3 {
        Vec3::new(2.0, 2.0, 2.0)
    }

    fn look_at_offset(&self) -> Vec3 {
        Vec3::new(0.0, 0.0, -5.0)
    }
}

/// Side-to-side sway with a phase-shifted vertical wave.
pub struct XyWave {
    freq: [f32; 2],
    amp: [f32; 2],
}

const XY_ANCHOR: f32 = 0.02;

pub static XY: XyWave = XyWave {
    freq: [5.0, 2.0],
    amp: [25.0, 15.0],
};

impl XyWave {
    fn raw(&self, p: f32, t: f32) -> Vec3 {
        let ([fx, fy], [ax, ay]) = (self.freq, self.amp);
        Vec3::new(
            (p * PI * fx + t).cos() * ax,
            (p * PI * fy + PI / 2.0 + t).sin() * ay,
            0.0,
        )
    }
}

impl DistortionStrategy for XyWave {
    fn name(&self) -> &'static str {
        "xy"
    }

    fn wgsl(&self) -> String {
        let ([fx, fy], [ax, ay]) = (self.freq, self.amp);
        format!(
            "fn xy_raw(p: f32, t: f32) -> vec3<f32> {{
    return vec3<f32>(
        cos(p * PI * {fx:?} + t) * {ax:?},
        sin(p * PI * {fy:?} + PI / 2.0 + t) * {ay:?},
        0.0
    );
}}

fn get_distortion(progress: f32) -> vec3<f32> {{
    let t = travel_time();
    return xy_raw(progress, t) - xy_raw({anchor:?}, t);
}}
",
            anchor = XY_ANCHOR,
        )
    }

    fn offset(&self, progress: f32, time: f32) -> Vec3 {
        self.raw(progress, time) - self.raw(XY_ANCHOR, time)
    }

    fn look_ahead(&self) -> f32 {
        0.02
    }

    fn look_at_amp(&self) -> Vec3 {
        Vec3::new(2.0, 0.4, 1.0)
    }

    fn look_at_offset(&self) -> Vec3 {
        Vec3::new(0.0, 0.0, -3.0)
    }
}

pub static BUILTIN_STRATEGIES: [&dyn DistortionStrategy; 3] = [&TURBULENT, &MOUNTAIN, &XY];

/// Copyable handle to a registered strategy.
#[derive(Clone, Copy)]
pub struct Distortion(&'static dyn DistortionStrategy);

impl Distortion {
    pub fn new(strategy: &'static dyn DistortionStrategy) -> Self {
        Self(strategy)
    }

    pub fn strategy(&self) -> &'static dyn DistortionStrategy {
        self.0
    }

    pub fn name(&self) -> &'static str {
        self.0.name()
    }
}

impl Default for Distortion {
    fn default() -> Self {
        Self(&TURBULENT)
    }
}

impl PartialEq for Distortion {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name()
    }
}

impl fmt::Debug for Distortion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Distortion").field(&self.name()).finish()
    }
}

/// Name -> strategy lookup used by the configuration resolver.
pub struct DistortionRegistry {
    strategies: FnvHashMap<&'static str, &'static dyn DistortionStrategy>,
}

impl DistortionRegistry {
    pub fn empty() -> Self {
        Self {
            strategies: FnvHashMap::default(),
        }
    }

    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        for strategy in BUILTIN_STRATEGIES {
            registry.register(strategy);
        }
        registry
    }

    /// Adds `strategy`, returning the one it replaced under the same name.
    pub fn register(&mut self, strategy: &'static dyn DistortionStrategy) -> Option<Distortion> {
        self.strategies
            .insert(strategy.name(), strategy)
            .map(Distortion)
    }

    /// Case-insensitive lookup; a trailing `Distortion` suffix is ignored so
    /// `turbulentDistortion` and `turbulent` name the same strategy.
    pub fn get(&self, name: &str) -> Option<Distortion> {
        let lowered = name.trim().to_ascii_lowercase();
        let key = lowered.strip_suffix("distortion").unwrap_or(&lowered);
        self.strategies.get(key).copied().map(Distortion)
    }

    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.strategies.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl Default for DistortionRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
