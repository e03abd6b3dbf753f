use bevy::prelude::*;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};
use bevy::math::primitives::Circle;
use bevy::window::PrimaryWindow;

use crate::simulation::scenario::Scenario;

#[derive(Component)]
struct BodyIndex(pub usize);

/// Metres -> pixels, fixed at startup from the initial layout
#[derive(Resource)]
struct ViewScale(f32);

/// Farthest initial body lands at this share of the smaller window side
const FILL: f32 = 0.4;

/// Simulation steps taken per rendered frame
const STEPS_PER_FRAME: usize = 10;

pub fn run_2d(scenario: Scenario) {
    ::log::info!("run_2d: starting Bevy 2D viewer with {} bodies", scenario.system().bodies.len());

    App::new()
        .insert_resource(scenario)
        .insert_resource(ClearColor(Color::BLACK))
        .add_plugins(DefaultPlugins)
        .add_systems(Startup, setup_bodies_system)
        .add_systems(Update, (physics_step_system, sync_transforms_system).chain())
        .run();
}

fn setup_bodies_system(
    mut commands: Commands,
    scenario: Res<Scenario>,
    window: Query<&Window, With<PrimaryWindow>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    commands.spawn(Camera2dBundle::default());

    let bodies = &scenario.system().bodies;
    let side = window
        .get_single()
        .map(|w| w.width().min(w.height()))
        .unwrap_or(800.0);
    let extent = bodies
        .iter()
        .map(|b| b.x.x.abs().max(b.x.y.abs()))
        .fold(0.0_f64, f64::max);
    let scale = if extent > 0.0 { FILL * side / extent as f32 } else { 1.0 };
    commands.insert_resource(ViewScale(scale));

    for (i, body) in bodies.iter().enumerate() {
        let radius_screen = (body.radius as f32).max(1.0);
        commands.spawn((
            MaterialMesh2dBundle {
                mesh: Mesh2dHandle(meshes.add(Circle::new(radius_screen))),
                material: materials.add(ColorMaterial::from(color_for(&body.color))),
                transform: Transform::from_xyz(body.x.x as f32 * scale, body.x.y as f32 * scale, 0.0),
                ..Default::default()
            },
            BodyIndex(i),
        ));
    }
}

fn physics_step_system(mut scenario: ResMut<Scenario>) {
    for _ in 0..STEPS_PER_FRAME {
        scenario.step();
    }
}

fn sync_transforms_system(scenario: Res<Scenario>, scale: Res<ViewScale>, mut query: Query<(&BodyIndex, &mut Transform)>) {
    for (BodyIndex(i), mut transform) in &mut query {
        if let Some(b) = scenario.system().bodies.get(*i) {
            transform.translation.x = (b.x.x as f32) * scale.0;
            transform.translation.y = (b.x.y as f32) * scale.0;
        }
    }
}

/// Colour labels from the record files; anything unknown is drawn white
fn color_for(label: &str) -> Color {
    match label.to_ascii_lowercase().as_str() {
        "red" => Color::srgb(1.0, 0.0, 0.0),
        "orange" => Color::srgb(1.0, 0.65, 0.0),
        "yellow" => Color::srgb(1.0, 1.0, 0.0),
        "green" => Color::srgb(0.0, 0.8, 0.0),
        "blue" => Color::srgb(0.2, 0.4, 1.0),
        "cyan" => Color::srgb(0.0, 1.0, 1.0),
        "gray" | "grey" => Color::srgb(0.5, 0.5, 0.5),
        _ => Color::WHITE,
    }
}
