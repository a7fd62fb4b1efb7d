use bevy::math::curve::{Curve, EaseFunction};
use bevy::prelude::*;

use crate::components::falling::FallingItem;
use crate::globals::*;
use crate::resources::particle_types::ParticleKind;

const OPACITY_KEYFRAMES: [f32; 7] = [0.0, 0.8, 0.9, 0.8, 0.7, 0.6, 0.0];

/// Profil de chute propre à chaque forme
pub struct MotionProfile {
    /// Balancement horizontal, en pixels
    pub sway: &'static [f32],
    pub scale: &'static [f32],
    /// Demi-tour intermédiaire (+180°) pour les glyphes
    pub spin_keyframes: &'static [f32],
}

const PETAL_MOTION: MotionProfile = MotionProfile {
    sway: &[0.0, 10.0, -10.0, 5.0, -5.0, 0.0],
    scale: &[0.9, 1.0, 1.05, 0.95, 1.0],
    spin_keyframes: &[0.0, 360.0],
};

const HEART_MOTION: MotionProfile = MotionProfile {
    sway: &[0.0, 20.0, -20.0, 10.0, -10.0, 0.0],
    scale: &[0.8, 1.0, 1.1, 0.9, 1.0],
    spin_keyframes: &[0.0, 360.0],
};

const GLYPH_MOTION: MotionProfile = MotionProfile {
    sway: &[0.0, 15.0, -15.0, 5.0, -5.0, 0.0],
    scale: &[0.8, 1.0, 1.2, 0.8, 1.0],
    spin_keyframes: &[0.0, 180.0, 360.0],
};

impl MotionProfile {
    pub fn for_kind(kind: ParticleKind) -> &'static MotionProfile {
        match kind {
            ParticleKind::Petal => &PETAL_MOTION,
            ParticleKind::Heart => &HEART_MOTION,
            ParticleKind::Glyph(_) => &GLYPH_MOTION,
        }
    }
}

/// Échantillonne des images clés régulièrement espacées, adoucies par segment
pub fn sample_keyframes(values: &[f32], progress: f32, ease: EaseFunction) -> f32 {
    match values {
        [] => 0.0,
        [only] => *only,
        _ => {
            let segments = (values.len() - 1) as f32;
            let scaled = progress.clamp(0.0, 1.0) * segments;
            let index = (scaled.floor() as usize).min(values.len() - 2);
            let local = ease.sample_clamped(scaled - index as f32);
            values[index].lerp(values[index + 1], local)
        }
    }
}

/// État visuel d'un élément à un instant du cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallPose {
    pub translation: Vec3,
    pub rotation_degrees: f32,
    pub scale: f32,
    pub opacity: f32,
}

/// Pose d'un élément pour une fenêtre de taille `viewport`
pub fn fall_pose(item: &FallingItem, now: f32, viewport: Vec2) -> FallPose {
    let descriptor = &item.descriptor;
    let profile = MotionProfile::for_kind(descriptor.kind);
    let size = descriptor.size as f32;
    let base_x = (descriptor.left as f32 / 100.0 - 0.5) * viewport.x;
    let top = viewport.y / 2.0 + size;
    let bottom = -viewport.y / 2.0 - size;
    let z = descriptor.stack_order as f32 * STACK_Z_SCALE;
    let rotation = descriptor.rotation as f32;

    let Some(progress) = item.cycle_progress(now) else {
        // Délai en cours : au-dessus de l'écran, invisible
        return FallPose {
            translation: Vec3::new(base_x, top + FALL_MARGIN, z),
            rotation_degrees: rotation,
            scale: size,
            opacity: 0.0,
        };
    };

    let ease = EaseFunction::CubicInOut;
    let y = top.lerp(bottom, ease.sample_clamped(progress));
    let sway = sample_keyframes(profile.sway, progress, ease);
    let spin = sample_keyframes(profile.spin_keyframes, progress, ease);
    let scale = sample_keyframes(profile.scale, progress, ease);
    let opacity = sample_keyframes(&OPACITY_KEYFRAMES, progress, ease);

    FallPose {
        translation: Vec3::new(base_x + sway, y, z),
        rotation_degrees: rotation + spin,
        scale: size * scale,
        opacity,
    }
}

/// Anime chaque élément indépendamment, en boucle infinie
pub fn animate_falling_items(
    time: Res<Time>,
    window: Single<&Window>,
    mut items: Query<(&FallingItem, &mut Transform, &MeshMaterial2d<ColorMaterial>)>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    let now = time.elapsed_secs();
    let viewport = Vec2::new(window.width(), window.height());

    for (item, mut transform, material) in items.iter_mut() {
        let pose = fall_pose(item, now, viewport);

        transform.translation = pose.translation;
        // Sens horaire comme en CSS
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
    use crate::resources::particle_types::{GlyphKind, ParticleDescriptor, ParticleFamily};

    fn item(kind: ParticleKind, delay: f64, duration: f64) -> FallingItem {
        FallingItem::new(
            ParticleDescriptor {
                color: "#FF4081".into(),
                size: 20.0,
                left: 25.0,
                delay,
                duration,
                rotation: 90.0,
                outline: None,
                kind,
                family: ParticleFamily::Heart,
                stack_order: 10,
            },
            0.0,
        )
    }

    #[test]
    fn keyframes_hit_their_values() {
        let values = [0.0, 10.0, -10.0];
        assert_eq!(sample_keyframes(&values, 0.0, EaseFunction::Linear), 0.0);
        assert_eq!(sample_keyframes(&values, 0.5, EaseFunction::Linear), 10.0);
        assert_eq!(sample_keyframes(&values, 1.0, EaseFunction::Linear), -10.0);
        assert_eq!(sample_keyframes(&values, 0.25, EaseFunction::Linear), 5.0);
        assert_eq!(sample_keyframes(&[3.0], 0.7, EaseFunction::Linear), 3.0);
    }

    #[test]
    fn hidden_during_delay() {
        let falling = item(ParticleKind::Heart, 5.0, 10.0);
        assert_eq!(falling.cycle_progress(4.0), None);
        let pose = fall_pose(&falling, 4.0, Vec2::new(800.0, 600.0));
        assert_eq!(pose.opacity, 0.0);
        assert!(pose.translation.y > 300.0);
    }

    #[test]
    fn cycle_repeats_forever() {
        let falling = item(ParticleKind::Petal, 1.0, 10.0);
        let first = falling.cycle_progress(3.0).unwrap();
        let later = falling.cycle_progress(103.0).unwrap();
        assert!((first - 0.2).abs() < 1e-5);
        assert!((later - 0.2).abs() < 1e-4);
    }

    #[test]
    fn falls_from_top_to_bottom() {
        let falling = item(ParticleKind::Glyph(GlyphKind::Sparkles), 0.0, 10.0);
        let viewport = Vec2::new(800.0, 600.0);
        let start = fall_pose(&falling, 0.0, viewport);
        let middle = fall_pose(&falling, 5.0, viewport);
        let end = fall_pose(&falling, 9.999, viewport);

        assert!(start.translation.y > middle.translation.y);
        assert!(middle.translation.y > end.translation.y);
        assert!(end.translation.y < -300.0);
        assert!((middle.rotation_degrees - 270.0).abs() < 1e-3);
        // x de base : 25% de la largeur => -200
        assert!((start.translation.x + 200.0).abs() < 1e-3);
        assert!((start.translation.z - 0.1).abs() < 1e-6);
    }

    #[test]
    fn opacity_fades_at_both_ends() {
        let falling = item(ParticleKind::Heart, 0.0, 7.0);
        let viewport = Vec2::new(800.0, 600.0);
        assert_eq!(fall_pose(&falling, 0.0, viewport).opacity, 0.0);
        assert!(fall_pose(&falling, 2.0, viewport).opacity > 0.85);
        assert!(fall_pose(&falling, 6.999, viewport).opacity < 0.01);
    }

    #[test]
    fn profiles_follow_kind() {
        assert_eq!(MotionProfile::for_kind(ParticleKind::Heart).sway[1], 20.0);
        assert_eq!(MotionProfile::for_kind(ParticleKind::Petal).sway[1], 10.0);
        assert_eq!(
            MotionProfile::for_kind(ParticleKind::Glyph(GlyphKind::Flower)).spin_keyframes.len(),
            3
        );
    }
}
