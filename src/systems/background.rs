use std::f32::consts::TAU;

use bevy::asset::RenderAssetUsages;
use bevy::math::curve::EaseFunction;
use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};

use crate::components::falling::{Backdrop, Glow};
use crate::resources::petals::PetalParameters;
use crate::systems::movement::sample_keyframes;
use crate::systems::spawning::parse_color;

const BACKDROP_Z: f32 = -10.0;
const GLOW_Z: f32 = -5.0;
const GLOW_MAX_SIZE: Vec2 = Vec2::new(850.0, 650.0);
const GLOW_PERIOD: f32 = 8.0;
/// Opacité du centre du dégradé, avant celle de l'élément
const GLOW_CENTER_ALPHA: f32 = 0.3;
/// Le dégradé s'éteint à 70% du rayon
const GLOW_FADE_RADIUS: f32 = 0.35;
const GLOW_SEGMENTS: usize = 64;
const GLOW_SCALE_KEYFRAMES: [f32; 3] = [1.0, 1.1, 1.0];
const GLOW_OPACITY_KEYFRAMES: [f32; 3] = [0.2, 0.3, 0.2];
const GLOW_HUE_KEYFRAMES: [f32; 3] = [0.0, 1.0, 0.0];
const GLOW_PINK: Srgba = Srgba::rgb(236.0 / 255.0, 64.0 / 255.0, 122.0 / 255.0);
const GLOW_PURPLE: Srgba = Srgba::rgb(186.0 / 255.0, 104.0 / 255.0, 200.0 / 255.0);

/// Quad unité avec couleurs par sommet : `top` en haut, `bottom` en bas
pub fn gradient_quad(top: Color, bottom: Color) -> Mesh {
    let positions = vec![
        [-0.5, -0.5, 0.0],
        [0.5, -0.5, 0.0],
        [0.5, 0.5, 0.0],
        [-0.5, 0.5, 0.0],
    ];
    let channels = |color: Color| {
        let c = color.to_linear();
        [c.red, c.green, c.blue, c.alpha]
    };
    let (top, bottom) = (channels(top), channels(bottom));
    let colors = vec![bottom, bottom, top, top];

    Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_COLOR, colors)
        .with_inserted_indices(Indices::U32(vec![0, 1, 2, 0, 2, 3]))
}

fn theme_gradient(params: &PetalParameters) -> Mesh {
    let background = params.theme.theme().background;
    gradient_quad(parse_color(background.top), parse_color(background.bottom))
}

/// Disque unité : opaque au centre, transparent à partir de `GLOW_FADE_RADIUS`
pub fn radial_glow_mesh() -> Mesh {
    let mut positions = vec![[0.0, 0.0, 0.0]];
    let mut colors = vec![[1.0, 1.0, 1.0, 1.0]];
    for i in 0..GLOW_SEGMENTS {
        let rim = Vec2::from_angle(i as f32 / GLOW_SEGMENTS as f32 * TAU) * GLOW_FADE_RADIUS;
        positions.push([rim.x, rim.y, 0.0]);
        colors.push([1.0, 1.0, 1.0, 0.0]);
    }

    let n = GLOW_SEGMENTS as u32;
    let indices: Vec<u32> = (0..n).flat_map(|i| [0, i + 1, (i + 1) % n + 1]).collect();

    Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_COLOR, colors)
        .with_inserted_indices(Indices::U32(indices))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlowPose {
    pub scale: f32,
    pub opacity: f32,
    pub color: Srgba,
}

/// État du halo, boucle de 8 s rose → violet → rose
pub fn glow_pose(now: f32) -> GlowPose {
    let progress = (now % GLOW_PERIOD) / GLOW_PERIOD;
    let ease = EaseFunction::CubicInOut;
    let hue = sample_keyframes(&GLOW_HUE_KEYFRAMES, progress, ease);

    GlowPose {
        scale: sample_keyframes(&GLOW_SCALE_KEYFRAMES, progress, ease),
        opacity: sample_keyframes(&GLOW_OPACITY_KEYFRAMES, progress, ease),
        color: GLOW_PINK.mix(&GLOW_PURPLE, hue),
    }
}

pub fn spawn_backdrop(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    params: Res<PetalParameters>,
) {
    commands.spawn((
        Backdrop,
        Mesh2d(meshes.add(theme_gradient(&params))),
        MeshMaterial2d(materials.add(ColorMaterial::from_color(Color::WHITE))),
        Transform::from_xyz(0.0, 0.0, BACKDROP_Z),
    ));

    let glow = glow_pose(0.0);
    commands.spawn((
        Glow,
        Mesh2d(meshes.add(radial_glow_mesh())),
        MeshMaterial2d(materials.add(ColorMaterial::from_color(
            glow.color.with_alpha(GLOW_CENTER_ALPHA * glow.opacity),
        ))),
        Transform::from_xyz(0.0, 0.0, GLOW_Z),
    ));
}

/// Fait respirer le halo, borné à 850×650 et à la fenêtre
pub fn pulse_glow(
    time: Res<Time>,
    window: Single<&Window>,
    mut glows: Query<(&mut Transform, &MeshMaterial2d<ColorMaterial>), With<Glow>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    let pose = glow_pose(time.elapsed_secs());
    let size = Vec2::new(window.width(), window.height()).min(GLOW_MAX_SIZE) * pose.scale;

    for (mut transform, material) in glows.iter_mut() {
        transform.scale = size.extend(1.0);
        if let Some(material) = materials.get_mut(&material.0) {
            material.color = pose.color.with_alpha(GLOW_CENTER_ALPHA * pose.opacity).into();
        }
    }
}

/// Étire le fond à la taille de la fenêtre
pub fn fit_backdrop(window: Single<&Window>, mut backdrop: Query<&mut Transform, With<Backdrop>>) {
    let size = Vec3::new(window.width(), window.height(), 1.0);
    for mut transform in backdrop.iter_mut() {
        if transform.scale != size {
            transform.scale = size;
        }
    }
}

/// Recolore le fond quand le thème change
pub fn recolor_backdrop(
    params: Res<PetalParameters>,
    mut meshes: ResMut<Assets<Mesh>>,
    backdrop: Query<&Mesh2d, With<Backdrop>>,
) {
    for mesh in backdrop.iter() {
        if let Some(mesh) = meshes.get_mut(&mesh.0) {
            *mesh = theme_gradient(&params);
        }
    }
    debug!("Fond recoloré : {}", params.theme.theme().background.id);
}
