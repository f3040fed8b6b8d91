use super::color::Color;
use super::parse::{palette_from_json, AttributeSource, Range, Reader};
use crate::distortion::{Distortion, DistortionRegistry, MOUNTAIN, XY};
use serde_json::{Map, Value};

pub const DISTORTION_ATTR: &str = "data-distortion";
pub const COLORS_ATTR: &str = "data-colors";

#[derive(Clone, Debug, PartialEq)]
pub struct HyperspeedColors {
    pub road: Color,
    pub island: Color,
    pub background: Color,
    pub shoulder_lines: Color,
    pub broken_lines: Color,
    pub left_cars: Vec<Color>,
    pub right_cars: Vec<Color>,
    pub sticks: Vec<Color>,
}

impl Default for HyperspeedColors {
    fn default() -> Self {
        Self {
            road: Color::from_hex(0x080808),
            island: Color::from_hex(0x0a0a0a),
            background: Color::from_hex(0x000000),
            shoulder_lines: Color::from_hex(0xffffff),
            broken_lines: Color::from_hex(0xffffff),
            left_cars: hex_palette(&[0xd856bf, 0x6750a2, 0xc247ac]),
            right_cars: hex_palette(&[0x03b3c3, 0x0e5ea5, 0x324555]),
            sticks: hex_palette(&[0x03b3c3]),
        }
    }
}

fn hex_palette(hexes: &[u32]) -> Vec<Color> {
    hexes.iter().copied().map(Color::from_hex).collect()
}

impl HyperspeedColors {
    /// Key-wise merge of a `{"roadColor": ..., "leftCars": [...]}` map.
    /// Undeclared or malformed entries keep their current value.
    pub fn merge_json(&mut self, map: &Map<String, Value>) {
        for (key, value) in map {
            let applied = match key.as_str() {
                "roadColor" => set_color(&mut self.road, value),
                "islandColor" => set_color(&mut self.island, value),
                "background" => set_color(&mut self.background, value),
                "shoulderLines" => set_color(&mut self.shoulder_lines, value),
                "brokenLines" => set_color(&mut self.broken_lines, value),
                "leftCars" => set_palette(&mut self.left_cars, value),
                "rightCars" => set_palette(&mut self.right_cars, value),
                "sticks" => set_palette(&mut self.sticks, value),
                _ => {
                    log::debug!("[config] unknown color key `{key}`");
                    continue;
                }
            };
            if !applied {
                log::debug!("[config] color `{key}` = {value} is malformed; keeping default");
            }
        }
    }
}

fn set_color(slot: &mut Color, value: &Value) -> bool {
    match Color::from_json(value) {
        Ok(c) => {
            *slot = c;
            true
        }
        Err(_) => false,
    }
}

fn set_palette(slot: &mut Vec<Color>, value: &Value) -> bool {
    match palette_from_json(value) {
        Ok(p) => {
            *slot = p;
            true
        }
        Err(_) => false,
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HyperspeedOptions {
    pub distortion: Distortion,
    pub length: f32,
    pub road_width: f32,
    pub island_width: f32,
    pub lanes_per_road: u32,
    pub fov: f32,
    pub fov_speed_up: f32,
    pub speed_up: f32,
    pub car_lights_fade: f32,
    pub total_side_light_sticks: u32,
    pub light_pairs_per_road_way: u32,
    pub shoulder_lines_width_percentage: f32,
    pub broken_lines_width_percentage: f32,
    pub broken_lines_length_percentage: f32,
    pub light_stick_width: Range,
    pub light_stick_height: Range,
    pub moving_away_speed: Range,
    pub moving_closer_speed: Range,
    pub car_lights_length: Range,
    pub car_lights_radius: Range,
    pub car_width_percentage: Range,
    pub car_shift_x: Range,
    pub car_floor_separation: Range,
    pub colors: HyperspeedColors,
}

impl Default for HyperspeedOptions {
    fn default() -> Self {
        let length = 400.0;
        Self {
            distortion: Distortion::default(),
            length,
            road_width: 10.0,
            island_width: 2.0,
            lanes_per_road: 4,
            fov: 90.0,
            fov_speed_up: 150.0,
            speed_up: 2.0,
            car_lights_fade: 0.4,
            total_side_light_sticks: 20,
            light_pairs_per_road_way: 40,
            shoulder_lines_width_percentage: 0.05,
            broken_lines_width_percentage: 0.1,
            broken_lines_length_percentage: 0.5,
            light_stick_width: Range::new(0.12, 0.5),
            light_stick_height: Range::new(1.3, 1.7),
            moving_away_speed: Range::new(60.0, 80.0),
            moving_closer_speed: Range::new(-120.0, -160.0),
            car_lights_length: Range::new(length * 0.03, length * 0.2),
            car_lights_radius: Range::new(0.05, 0.14),
            car_width_percentage: Range::new(0.3, 0.5),
            car_shift_x: Range::new(-0.8, 0.8),
            car_floor_separation: Range::new(0.0, 5.0),
            colors: HyperspeedColors::default(),
        }
    }
}

impl HyperspeedOptions {
    /// Named override layer sitting between the defaults and declared values.
    pub fn preset(name: &str) -> Option<Self> {
        let base = Self::default();
        match name.trim().to_ascii_lowercase().as_str() {
            "default" | "turbulent" => Some(base),
            "mountain" => Some(Self {
                distortion: Distortion::new(&MOUNTAIN),
                lanes_per_road: 3,
                light_pairs_per_road_way: 50,
                car_lights_fade: 0.4,
                colors: HyperspeedColors {
                    shoulder_lines: Color::from_hex(0x131318),
                    broken_lines: Color::from_hex(0x131318),
                    left_cars: hex_palette(&[0xff102a, 0xeb383e, 0xff102a]),
                    right_cars: hex_palette(&[0xdadafa, 0xbebae3, 0x8f97e4]),
                    sticks: hex_palette(&[0xdadafa]),
                    ..HyperspeedColors::default()
                },
                ..base
            }),
            "xy" => Some(Self {
                distortion: Distortion::new(&XY),
                lanes_per_road: 3,
                road_width: 9.0,
                island_width: 2.0,
                light_pairs_per_road_way: 50,
                colors: HyperspeedColors {
                    shoulder_lines: Color::from_hex(0x131318),
                    broken_lines: Color::from_hex(0x131318),
                    left_cars: hex_palette(&[0xf1eece, 0xe6e2b1, 0xdfd98a]),
                    right_cars: hex_palette(&[0xfc1be1, 0x962ca7, 0x7c0b91]),
                    sticks: hex_palette(&[0xfc1be1]),
                    ..HyperspeedColors::default()
                },
                ..base
            }),
            _ => None,
        }
    }

    pub(crate) fn resolve<S: AttributeSource + ?Sized>(
        src: &S,
        base: Self,
        registry: &DistortionRegistry,
    ) -> Self {
        let r = Reader::new(src);

        // text field: raw string, validated against the registry, else default
        let distortion = match r.raw(DISTORTION_ATTR) {
            Some(name) => registry.get(&name).unwrap_or_else(|| {
                log::warn!(
                    "[config] unknown distortion `{name}` (known: {:?}); using `{}`",
                    registry.names(),
                    base.distortion.name()
                );
                base.distortion
            }),
            None => base.distortion,
        };

        let mut colors = base.colors.clone();
        if let Some(map) = r.map(COLORS_ATTR) {
            colors.merge_json(&map);
        }
        let colors = HyperspeedColors {
            road: r.color("data-road-color", colors.road),
            island: r.color("data-island-color", colors.island),
            background: r.color("data-background-color", colors.background),
            shoulder_lines: r.color("data-shoulder-lines-color", colors.shoulder_lines),
            broken_lines: r.color("data-broken-lines-color", colors.broken_lines),
            left_cars: r.palette("data-left-cars-colors", colors.left_cars),
            right_cars: r.palette("data-right-cars-colors", colors.right_cars),
            sticks: r.palette("data-sticks-color", colors.sticks),
        };

        Self {
            distortion,
            length: r.positive("data-length", base.length),
            road_width: r.positive("data-road-width", base.road_width),
            island_width: r.non_negative("data-island-width", base.island_width),
            lanes_per_road: r.count("data-lanes-per-road", base.lanes_per_road, 1),
            fov: r.angle("data-fov", base.fov),
            fov_speed_up: r.angle("data-fov-speed-up", base.fov_speed_up),
            speed_up: r.non_negative("data-speed-up", base.speed_up),
            car_lights_fade: r.fraction("data-car-lights-fade", base.car_lights_fade),
            total_side_light_sticks: r.count(
                "data-total-side-light-sticks",
                base.total_side_light_sticks,
                2,
            ),
            light_pairs_per_road_way: r.count(
                "data-light-pairs-per-road-way",
                base.light_pairs_per_road_way,
                1,
            ),
            shoulder_lines_width_percentage: r.fraction(
                "data-shoulder-lines-width-percentage",
                base.shoulder_lines_width_percentage,
            ),
            broken_lines_width_percentage: r.fraction(
                "data-broken-lines-width-percentage",
                base.broken_lines_width_percentage,
            ),
            broken_lines_length_percentage: r.fraction(
                "data-broken-lines-length-percentage",
                base.broken_lines_length_percentage,
            ),
            light_stick_width: r.range("data-light-stick-width", base.light_stick_width),
            light_stick_height: r.range("data-light-stick-height", base.light_stick_height),
            moving_away_speed: r.range("data-moving-away-speed", base.moving_away_speed),
            moving_closer_speed: r.range("data-moving-closer-speed", base.moving_closer_speed),
            car_lights_length: r.range("data-car-lights-length", base.car_lights_length),
            car_lights_radius: r.range("data-car-lights-radius", base.car_lights_radius),
            car_width_percentage: r.range("data-car-width-percentage", base.car_width_percentage),
            car_shift_x: r.range("data-car-shift-x", base.car_shift_x),
            car_floor_separation: r.range("data-car-floor-separation", base.car_floor_separation),
            colors,
        }
    }

    pub fn lane_width(&self) -> f32 {
        self.road_width / self.lanes_per_road as f32
    }
}
