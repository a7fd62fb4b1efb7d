use bevy::math::curve::{Curve, EaseFunction};
use bevy::prelude::*;
use bevy::render::view::RenderLayers;

use crate::resources::effects::{BurstItem, BurstKind, EffectSchedule, burst_items};
use crate::resources::particle_types::GlyphKind;
use crate::systems::movement::sample_keyframes;
use crate::systems::outline::{ShapeKey, ShapeLibrary};
use crate::systems::spawning::parse_color;

/// Couche dessinée par la caméra des effets, au-dessus de l'interface
pub const EFFECTS_LAYER: usize = 1;
const BURST_Z: f32 = 1.0;

/// Demande d'une salve (calendrier ou clic sur la carte)
#[derive(Event, Debug, Clone, Copy)]
pub struct BurstRequested(pub BurstKind);

#[derive(Component, Debug, Clone)]
pub struct BurstParticle {
    pub kind: BurstKind,
    pub item: BurstItem,
    pub spawned_at: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BurstPose {
    pub translation: Vec2,
    pub rotation_degrees: f32,
    pub scale: f32,
    pub opacity: f32,
}

impl BurstParticle {
    /// `None` une fois la salve expirée
    pub fn pose(&self, now: f32) -> Option<BurstPose> {
        let spec = self.kind.spec();
        let age = now - self.spawned_at;
        if age > spec.visible_for {
            return None;
        }

        let local = ((age - self.item.delay) / spec.duration).clamp(0.0, 1.0);
        let eased = EaseFunction::CubicOut.sample_clamped(local);

        Some(BurstPose {
            translation: self.item.from.lerp(self.item.to, eased),
            rotation_degrees: self.item.rotation + spec.spin * eased,
            scale: self.item.size * eased,
            opacity: sample_keyframes(spec.opacity, eased, EaseFunction::Linear),
        })
    }
}

fn burst_shape(kind: BurstKind) -> ShapeKey {
    match kind {
        BurstKind::Sparkle | BurstKind::MiniSparkle => ShapeKey::Glyph(GlyphKind::Sparkles),
        BurstKind::Hearts | BurstKind::HeartRing => ShapeKey::Heart,
    }
}

pub fn tick_effect_schedule(
    time: Res<Time>,
    mut schedule: ResMut<EffectSchedule>,
    mut requests: EventWriter<BurstRequested>,
) {
    let mut rng = rand::rng();
    for burst in schedule.advance(time.delta(), &mut rng) {
        requests.write(BurstRequested(burst));
    }
}

pub fn spawn_bursts(
    mut commands: Commands,
    mut requests: EventReader<BurstRequested>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    time: Res<Time>,
    library: Res<ShapeLibrary>,
) {
    let now = time.elapsed_secs();
    let mut rng = rand::rng();

    for BurstRequested(kind) in requests.read() {
        let spec = kind.spec();
        let mesh = library.get(burst_shape(*kind));
        let color = parse_color(spec.color);

        for item in burst_items(*kind, &mut rng) {
            let particle = BurstParticle {
                kind: *kind,
                item,
                spawned_at: now,
            };
            let material = materials.add(ColorMaterial::from_color(color.with_alpha(0.0)));

            commands.spawn((
                Mesh2d(mesh.clone()),
                MeshMaterial2d(material),
                Transform::from_translation(item.from.extend(BURST_Z)).with_scale(Vec3::ZERO),
                RenderLayers::layer(EFFECTS_LAYER),
                particle,
            ));
        }

        debug!("✨ Salve : {} ({} éléments)", kind.label(), spec.count);
    }
}

pub fn animate_bursts(
    mut commands: Commands,
    time: Res<Time>,
    mut particles: Query<(
        Entity,
        &BurstParticle,
        &mut Transform,
        &MeshMaterial2d<ColorMaterial>,
    )>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    let now = time.elapsed_secs();

    for (entity, particle, mut transform, material) in particles.iter_mut() {
        let Some(pose) = particle.pose(now) else {
            commands.entity(entity).despawn();
            continue;
        };

        transform.translation = pose.translation.extend(BURST_Z);
        transform.rotation = Quat::from_rotation_z(-pose.rotation_degrees.to_radians());
        transform.scale = Vec3::splat(pose.scale);

        if let Some(material) = materials.get_mut(&material.0) {
            material.color.set_alpha(pose.opacity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn particle(kind: BurstKind, delay: f32) -> BurstParticle {
        BurstParticle {
            kind,
            item: BurstItem {
                from: Vec2::new(0.0, -100.0),
                to: Vec2::new(50.0, 100.0),
                size: 20.0,
                delay,
                rotation: 0.0,
            },
            spawned_at: 10.0,
        }
    }

    #[test]
    fn starts_collapsed_at_origin() {
        let pose = particle(BurstKind::Sparkle, 0.0).pose(10.0).unwrap();
        assert_eq!(pose.translation, Vec2::new(0.0, -100.0));
        assert_eq!(pose.scale, 0.0);
        assert!((pose.opacity - 0.9).abs() < 1e-6);
    }

    #[test]
    fn reaches_target_after_duration() {
        let pose = particle(BurstKind::Sparkle, 0.0).pose(11.9).unwrap();
        assert!((pose.translation - Vec2::new(50.0, 100.0)).length() < 1e-3);
        assert!((pose.scale - 20.0).abs() < 1e-3);
        assert!(pose.opacity.abs() < 1e-3);
        assert!((pose.rotation_degrees - 360.0).abs() < 1e-3);
    }

    #[test]
    fn delayed_hearts_wait() {
        let heart = particle(BurstKind::Hearts, 0.5);
        let pose = heart.pose(10.4).unwrap();
        assert_eq!(pose.scale, 0.0);
        assert_eq!(pose.opacity, 0.0);
    }

    #[test]
    fn expires_after_visible_window() {
        let ring = particle(BurstKind::HeartRing, 0.0);
        assert!(ring.pose(11.9).is_some());
        assert!(ring.pose(12.1).is_none());
        // Les petites étincelles disparaissent avant la fin de leur trajet
        assert!(particle(BurstKind::MiniSparkle, 0.0).pose(11.6).is_none());
    }

    #[test]
    fn shapes_follow_kind() {
        assert_eq!(burst_shape(BurstKind::MiniSparkle), ShapeKey::Glyph(GlyphKind::Sparkles));
        assert_eq!(burst_shape(BurstKind::HeartRing), ShapeKey::Heart);
    }
}
