use super::{CarLightInstance, LightStickInstance};
use crate::config::{Color, HyperspeedOptions, Range};
use crate::constants::CAR_LIGHT_LIFT;
use rand::seq::SliceRandom;
use rand::Rng;

fn pick<R: Rng + ?Sized>(palette: &[Color], rng: &mut R) -> [f32; 3] {
    palette.choose(rng).copied().unwrap_or(Color::WHITE).to_array()
}

/// Two instances (left and right lamp) per light pair, laid out lane by lane
/// across one roadway centered on x = 0.
///
/// Lamp x positions always stay within `[-road_width / 2, road_width / 2]`.
pub fn car_lights<R: Rng + ?Sized>(
    options: &HyperspeedOptions,
    speed: Range,
    palette: &[Color],
    rng: &mut R,
) -> Vec<CarLightInstance> {
    let pairs = options.light_pairs_per_road_way;
    let lanes = options.lanes_per_road.max(1);
    let lane_width = options.lane_width();
    let half_road = options.road_width * 0.5;
    let mut instances = Vec::with_capacity(pairs as usize * 2);

    for i in 0..pairs {
        let radius = options.car_lights_radius.sample(rng);
        let length = options.car_lights_length.sample(rng);
        let pair_speed = speed.sample(rng);

        let lane = (i % lanes) as f32;
        let mut lane_x = lane * lane_width - half_road + lane_width * 0.5;
        let car_width = options.car_width_percentage.sample(rng) * lane_width;
        lane_x += options.car_shift_x.sample(rng) * lane_width;

        // keep the whole car on its roadway
        let slack = (half_road - car_width * 0.5).max(0.0);
        lane_x = lane_x.clamp(-slack, slack);

        let y = options.car_floor_separation.sample(rng) + radius * CAR_LIGHT_LIFT;
        let z = -rng.gen::<f32>() * options.length;
        let metrics = [radius, length, pair_speed];
        let color = pick(palette, rng);

        for side in [-0.5f32, 0.5] {
            let x = (lane_x + side * car_width).clamp(-half_road, half_road);
            instances.push(CarLightInstance {
                offset: [x, y, z],
                metrics,
                color,
            });
        }
    }
    instances
}

/// Roadside panes spaced evenly along the travel length with jitter.
pub fn light_sticks<R: Rng + ?Sized>(
    options: &HyperspeedOptions,
    rng: &mut R,
) -> Vec<LightStickInstance> {
    let total = options.total_side_light_sticks.max(2);
    let spacing = options.length / (total - 1) as f32;
    (0..total)
        .map(|i| {
            let width = options.light_stick_width.sample(rng);
            let height = options.light_stick_height.sample(rng);
            let offset = (i as f32 - 1.0) * spacing * 2.0 + spacing * rng.gen::<f32>();
            LightStickInstance {
                offset,
                size: [width, height],
                color: pick(&options.colors.sticks, rng),
            }
        })
        .collect()
}
