// Host-side tests for Hyperspeed geometry and instanced attributes.

use new2canada_fx::config::{HyperspeedOptions, Range};
use new2canada_fx::scene::{
    car_lights, light_sticks, quad, road_plane, tube, HyperspeedScene, MeshId,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

#[test]
fn road_plane_spans_width_and_travel_length() {
    let mesh = road_plane(10.0, 400.0, 4, 8);
    assert_eq!(mesh.vertices.len(), 5 * 9);
    assert_eq!(mesh.index_count(), 4 * 8 * 6);
    for v in &mesh.vertices {
        assert!(v.position[0].abs() <= 5.0 + 1e-4);
        assert!(v.position[2] <= 0.0 && v.position[2] >= -400.0 - 1e-3);
        // progress runs 0 at the camera to 1 at the far end
        assert!((v.uv[1] + v.position[2] / 400.0).abs() < 1e-4);
    }
    assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len()));
}

#[test]
fn tube_and_quad_are_closed_index_lists() {
    let t = tube(8, 12);
    assert!(t.vertices.iter().all(|v| (0.0..=1.0).contains(&v.along)));
    assert_eq!(t.index_count() % 3, 0);
    assert!(t.indices.iter().all(|&i| (i as usize) < t.vertices.len()));

    let q = quad();
    assert_eq!(q.vertices.len(), 4);
    assert_eq!(q.index_count(), 6);
}

#[test]
fn car_lights_are_two_per_pair_and_stay_on_the_road() {
    let options = HyperspeedOptions {
        lanes_per_road: 4,
        light_pairs_per_road_way: 40,
        ..HyperspeedOptions::default()
    };
    let scene = HyperspeedScene::build(&options, &mut rng());
    let half = options.road_width / 2.0;
    for set in &scene.car_lights {
        assert_eq!(set.instances.len(), 80);
        for light in &set.instances {
            let x = light.offset[0];
            assert!((-half..=half).contains(&x), "x = {x}");
            assert!(light.offset[2] <= 0.0 && light.offset[2] >= -options.length);
        }
    }
    assert_eq!(scene.car_light_instance_count(), 160);
}

#[test]
fn extreme_shifts_are_clamped_into_the_roadway() {
    let options = HyperspeedOptions {
        lanes_per_road: 4,
        car_shift_x: Range::fixed(5.0),
        car_width_percentage: Range::fixed(1.0),
        ..HyperspeedOptions::default()
    };
    let lights = car_lights(&options, Range::fixed(60.0), &options.colors.left_cars, &mut rng());
    let half = options.road_width / 2.0;
    assert!(lights.iter().all(|l| l.offset[0].abs() <= half));
}

#[test]
fn pair_lamps_share_metrics_and_color() {
    let options = HyperspeedOptions::default();
    let lights = car_lights(
        &options,
        options.moving_away_speed,
        &options.colors.left_cars,
        &mut rng(),
    );
    let palette: Vec<[f32; 3]> = options.colors.left_cars.iter().map(|c| c.to_array()).collect();
    for pair in lights.chunks(2) {
        assert_eq!(pair[0].metrics, pair[1].metrics);
        assert_eq!(pair[0].color, pair[1].color);
        assert!(pair[0].offset[0] < pair[1].offset[0]);
        assert!(palette.contains(&pair[0].color));
        let [radius, length, speed] = pair[0].metrics;
        let within = |r: Range, v: f32| v >= r.low() && v <= r.high();
        assert!(within(options.car_lights_radius, radius));
        assert!(within(options.car_lights_length, length));
        assert!(within(options.moving_away_speed, speed));
    }
}

#[test]
fn light_sticks_match_the_configured_count_and_sizes() {
    let options = HyperspeedOptions {
        total_side_light_sticks: 30,
        ..HyperspeedOptions::default()
    };
    let sticks = light_sticks(&options, &mut rng());
    assert_eq!(sticks.len(), 30);
    for s in &sticks {
        assert!(s.size[0] >= options.light_stick_width.low());
        assert!(s.size[0] <= options.light_stick_width.high());
        assert!(s.size[1] >= options.light_stick_height.low());
        assert!(s.size[1] <= options.light_stick_height.high());
    }
}

#[test]
fn scene_layout_mirrors_the_two_roadways() {
    let options = HyperspeedOptions::default();
    let scene = HyperspeedScene::build(&options, &mut rng());
    let ids: Vec<MeshId> = scene.roads.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![MeshId::RoadLeft, MeshId::RoadRight, MeshId::Island]);
    assert_eq!(scene.roads[0].offset_x, -scene.roads[1].offset_x);
    assert!(scene.roads[0].markings && !scene.roads[2].markings);

    let [left, right] = &scene.car_lights;
    assert_eq!(left.fade, [0.0, 1.0 - options.car_lights_fade]);
    assert_eq!(right.fade, [1.0, options.car_lights_fade]);
    assert!(left.offset_x < 0.0 && right.offset_x > 0.0);
    assert!(scene.sticks.offset_x < left.offset_x);
}

#[test]
fn no_island_without_island_width() {
    let options = HyperspeedOptions {
        island_width: 0.0,
        ..HyperspeedOptions::default()
    };
    let scene = HyperspeedScene::build(&options, &mut rng());
    assert_eq!(scene.roads.len(), 2);
}

#[test]
fn draw_list_puts_blended_streaks_last() {
    let options = HyperspeedOptions::default();
    let scene = HyperspeedScene::build(&options, &mut rng());
    let draws = scene.draw_calls();
    let meshes: Vec<MeshId> = draws.iter().map(|d| d.mesh).collect();
    assert_eq!(
        meshes,
        vec![
            MeshId::RoadLeft,
            MeshId::RoadRight,
            MeshId::Island,
            MeshId::LightSticks,
            MeshId::CarLightsLeft,
            MeshId::CarLightsRight,
        ]
    );
    assert!(draws.iter().all(|d| d.indexed && d.elements > 0));
    assert_eq!(draws[3].instances, options.total_side_light_sticks);
    assert_eq!(draws[4].instances, 2 * options.light_pairs_per_road_way);
}

#[test]
fn same_seed_builds_the_same_scene() {
    let options = HyperspeedOptions::default();
    let a = HyperspeedScene::build(&options, &mut rng());
    let b = HyperspeedScene::build(&options, &mut rng());
    assert_eq!(a, b);
}
