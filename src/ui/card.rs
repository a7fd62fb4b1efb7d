use bevy::math::curve::{Curve, EaseFunction};
use bevy::prelude::*;

use crate::globals::*;
use crate::resources::effects::BurstKind;
use crate::systems::bursts::BurstRequested;
use crate::systems::card_config::CardContent;
use crate::systems::movement::sample_keyframes;

const PINK_600: Color = Color::srgb(0.859, 0.153, 0.467);
const PURPLE_700: Color = Color::srgb(0.494, 0.133, 0.808);
const GRAY_600: Color = Color::srgb(0.294, 0.333, 0.388);
const PINK_300: Color = Color::srgb(0.976, 0.659, 0.831);
const PINK_400: Color = Color::srgb(0.957, 0.447, 0.714);

const SHAKE_KEYFRAMES: [f32; 5] = [0.0, -1.0, 1.0, -1.0, 0.0];
const DIVIDER_KEYFRAMES: [f32; 3] = [96.0, 160.0, 96.0];
const DIVIDER_PERIOD: f32 = 2.0;
const PANEL_HOVER_SCALE: f32 = 1.02;
/// Vitesse de rapprochement de l'échelle au survol, par seconde
const PANEL_HOVER_RATE: f32 = 12.0;
const SPARKLE_WOBBLE: [f32; 5] = [0.0, 15.0, 0.0, -15.0, 0.0];
const SPARKLE_PERIOD: f32 = 1.5;
const SPARKLE_SIZE: f32 = 24.0;

/// Zone cliquable de la carte
#[derive(Component, Default)]
pub struct CardRoot {
    shake_started: Option<f32>,
}

/// Apparition progressive d'un texte
#[derive(Component)]
pub struct FadeIn {
    pub delay: f32,
    pub duration: f32,
}

#[derive(Component)]
pub struct DividerPulse;

/// Panneau du message : cliquable et grossi au survol
#[derive(Component)]
pub struct MessagePanel;

/// Étincelle de coin qui oscille en aller-retour
#[derive(Component, Debug, Clone, Copy)]
pub struct CornerSparkle {
    pub delay: f32,
    pub mirrored: bool,
}

/// Salves d'un clic : le panneau ajoute l'anneau de cœurs
pub fn click_bursts(on_panel: bool) -> &'static [BurstKind] {
    if on_panel {
        &[BurstKind::Sparkle, BurstKind::Hearts, BurstKind::HeartRing]
    } else {
        &[BurstKind::Sparkle, BurstKind::Hearts]
    }
}

/// Rapproche `current` de `target` sans le dépasser
pub fn approach(current: f32, target: f32, dt: f32) -> f32 {
    current + (target - current) * (dt * PANEL_HOVER_RATE).min(1.0)
}

/// Avancement aller-retour : les cycles impairs se rejouent à l'envers
fn ping_pong(t: f32, period: f32) -> f32 {
    let cycles = t / period;
    let local = cycles.fract();
    if cycles.floor() as i64 % 2 == 0 {
        local
    } else {
        1.0 - local
    }
}

impl CornerSparkle {
    /// Angle en degrés et échelle à l'instant `now`
    pub fn pose(&self, now: f32) -> (f32, f32) {
        let t = now - self.delay;
        if t < 0.0 {
            return (0.0, 0.0);
        }
        let ease = EaseFunction::CubicInOut;
        let progress = ping_pong(t, SPARKLE_PERIOD);
        let angle = sample_keyframes(&SPARKLE_WOBBLE, progress, ease);
        let angle = if self.mirrored { -angle } else { angle };
        (angle, ease.sample_clamped(progress))
    }
}

/// Décalage horizontal du tremblement, `elapsed` en secondes
pub fn shake_offset(elapsed: f32) -> f32 {
    if !(0.0..CARD_SHAKE_DURATION).contains(&elapsed) {
        return 0.0;
    }
    sample_keyframes(
        &SHAKE_KEYFRAMES,
        elapsed / CARD_SHAKE_DURATION,
        EaseFunction::Linear,
    ) * CARD_SHAKE_AMPLITUDE
}

impl FadeIn {
    pub fn alpha(&self, now: f32) -> f32 {
        ((now - self.delay) / self.duration.max(f32::EPSILON)).clamp(0.0, 1.0)
    }
}

pub fn divider_width(now: f32) -> f32 {
    let progress = (now % DIVIDER_PERIOD) / DIVIDER_PERIOD;
    sample_keyframes(&DIVIDER_KEYFRAMES, progress, EaseFunction::CubicInOut)
}

pub fn spawn_card(mut commands: Commands, content: Res<CardContent>, asset_server: Res<AssetServer>) {
    let font: Handle<Font> = content
        .font
        .as_ref()
        .map(|path| asset_server.load(path.clone()))
        .unwrap_or_default();
    let text_font = |size: f32| TextFont {
        font: font.clone(),
        font_size: size,
        ..default()
    };
    let centered = || TextLayout::new_with_justify(JustifyText::Center);

    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            ..default()
        })
        .with_children(|screen| {
            screen
                .spawn((
                    CardRoot::default(),
                    Button,
                    Node {
                        flex_direction: FlexDirection::Column,
                        align_items: AlignItems::Center,
                        padding: UiRect::all(Val::Px(24.0)),
                        position_type: PositionType::Relative,
                        ..default()
                    },
                ))
                .with_children(|card| {
                    card.spawn((
                        Text::new(content.title.clone()),
                        text_font(56.0),
                        TextColor(PINK_600.with_alpha(0.0)),
                        centered(),
                        FadeIn {
                            delay: 0.8,
                            duration: 0.8,
                        },
                        Node {
                            margin: UiRect::bottom(Val::Px(32.0)),
                            ..default()
                        },
                    ));

                    card.spawn((
                        MessagePanel,
                        Button,
                        Node {
                            width: Val::Px(500.0),
                            max_width: Val::Percent(90.0),
                            flex_direction: FlexDirection::Column,
                            align_items: AlignItems::Center,
                            row_gap: Val::Px(16.0),
                            padding: UiRect::all(Val::Px(32.0)),
                            position_type: PositionType::Relative,
                            ..default()
                        },
                        BackgroundColor(Color::WHITE.with_alpha(0.8)),
                        BorderRadius::all(Val::Px(16.0)),
                    ))
                    .with_children(|panel| {
                        spawn_corner_sparkle(
                            panel,
                            UiRect {
                                left: Val::Px(16.0),
                                top: Val::Px(16.0),
                                ..UiRect::all(Val::Auto)
                            },
                            CornerSparkle {
                                delay: 0.0,
                                mirrored: false,
                            },
                        );
                        spawn_corner_sparkle(
                            panel,
                            UiRect {
                                right: Val::Px(16.0),
                                bottom: Val::Px(16.0),
                                ..UiRect::all(Val::Auto)
                            },
                            CornerSparkle {
                                delay: 0.3,
                                mirrored: true,
                            },
                        );
                        panel.spawn((
                            Text::new(content.message.clone()),
                            text_font(40.0),
                            TextColor(PINK_600.with_alpha(0.0)),
                            centered(),
                            FadeIn {
                                delay: 0.3,
                                duration: 0.5,
                            },
                        ));
                        panel.spawn((
                            Text::new(content.sub_message.clone()),
                            text_font(18.0),
                            TextColor(PURPLE_700.with_alpha(0.0)),
                            centered(),
                            FadeIn {
                                delay: 0.5,
                                duration: 0.5,
                            },
                        ));
                        panel.spawn((
                            Text::new(content.quote.clone()),
                            text_font(14.0),
                            TextColor(GRAY_600.with_alpha(0.0)),
                            centered(),
                            FadeIn {
                                delay: 0.7,
                                duration: 0.5,
                            },
                        ));
                        panel.spawn((
                            DividerPulse,
                            Node {
                                width: Val::Px(DIVIDER_KEYFRAMES[0]),
                                height: Val::Px(4.0),
                                ..default()
                            },
                            BackgroundColor(PINK_300),
                            BorderRadius::MAX,
                        ));
                    });
                });
        });

    info!("💌 Carte « {} » affichée", content.title);
}

/// Croix arrondie placée en absolu dans un coin du panneau
fn spawn_corner_sparkle(panel: &mut ChildSpawnerCommands, corner: UiRect, sparkle: CornerSparkle) {
    let bar = |width: f32, height: f32, left: f32, top: f32| {
        (
            Node {
                position_type: PositionType::Absolute,
                width: Val::Px(width),
                height: Val::Px(height),
                left: Val::Px(left),
                top: Val::Px(top),
                ..default()
            },
            BackgroundColor(PINK_400),
            BorderRadius::MAX,
        )
    };
    let thin = 4.0;
    let offset = (SPARKLE_SIZE - thin) / 2.0;

    panel
        .spawn((
            sparkle,
            Node {
                position_type: PositionType::Absolute,
                width: Val::Px(SPARKLE_SIZE),
                height: Val::Px(SPARKLE_SIZE),
                left: corner.left,
                right: corner.right,
                top: corner.top,
                bottom: corner.bottom,
                ..default()
            },
            Transform::from_scale(Vec3::ZERO),
        ))
        .with_children(|cross| {
            cross.spawn(bar(thin, SPARKLE_SIZE, offset, 0.0));
            cross.spawn(bar(SPARKLE_SIZE, thin, 0.0, offset));
        });
}

/// Clic sur la carte ou le panneau : salves, puis tremblement de la carte
pub fn card_interaction(
    time: Res<Time>,
    clicks: Query<
        (&Interaction, Has<MessagePanel>),
        (Changed<Interaction>, Or<(With<CardRoot>, With<MessagePanel>)>),
    >,
    mut cards: Query<&mut CardRoot>,
    mut requests: EventWriter<BurstRequested>,
) {
    for (interaction, on_panel) in clicks.iter() {
        if *interaction != Interaction::Pressed {
            continue;
        }
        for burst in click_bursts(on_panel) {
            requests.write(BurstRequested(*burst));
        }
        for mut card in cards.iter_mut() {
            card.shake_started = Some(time.elapsed_secs());
        }
    }
}

pub fn hover_panel(
    time: Res<Time>,
    mut panels: Query<(&Interaction, &mut Transform), With<MessagePanel>>,
) {
    let dt = time.delta_secs();
    for (interaction, mut transform) in panels.iter_mut() {
        let target = match interaction {
            Interaction::Hovered | Interaction::Pressed => PANEL_HOVER_SCALE,
            Interaction::None => 1.0,
        };
        let scale = approach(transform.scale.x, target, dt);
        if scale != transform.scale.x {
            transform.scale = Vec3::new(scale, scale, 1.0);
        }
    }
}

pub fn wobble_corner_sparkles(
    time: Res<Time>,
    mut sparkles: Query<(&CornerSparkle, &mut Transform)>,
) {
    let now = time.elapsed_secs();
    for (sparkle, mut transform) in sparkles.iter_mut() {
        let (angle, scale) = sparkle.pose(now);
        transform.rotation = Quat::from_rotation_z(angle.to_radians());
        transform.scale = Vec3::new(scale, scale, 1.0);
    }
}

pub fn shake_card(time: Res<Time>, mut cards: Query<(&mut CardRoot, &mut Node)>) {
    let now = time.elapsed_secs();
    for (mut card, mut node) in cards.iter_mut() {
        let Some(started) = card.shake_started else {
            continue;
        };
        let elapsed = now - started;
        node.left = Val::Px(shake_offset(elapsed));
        if elapsed >= CARD_SHAKE_DURATION {
            card.shake_started = None;
        }
    }
}

pub fn fade_in_texts(time: Res<Time>, mut texts: Query<(&FadeIn, &mut TextColor)>) {
    let now = time.elapsed_secs();
    for (fade, mut color) in texts.iter_mut() {
        let alpha = fade.alpha(now);
        if color.0.alpha() != alpha {
            color.0.set_alpha(alpha);
        }
    }
}

pub fn pulse_divider(time: Res<Time>, mut dividers: Query<&mut Node, With<DividerPulse>>) {
    let width = divider_width(time.elapsed_secs());
    for mut node in dividers.iter_mut() {
        node.width = Val::Px(width);
    }
}
