use std::ops::Range;
use std::time::Duration;

use bevy::prelude::*;

use crate::resources::random::RandomSource;

/// Effets ponctuels déclenchés autour de la carte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BurstKind {
    Sparkle,
    MiniSparkle,
    Hearts,
    HeartRing,
}

/// Paramètres d'une salve
#[derive(Debug, Clone)]
pub struct BurstSpec {
    pub count: usize,
    /// Demi-étendue des cibles autour du centre de la carte
    pub spread: Vec2,
    pub size: Range<f32>,
    pub max_delay: f32,
    pub duration: f32,
    /// Durée avant disparition de toute la salve
    pub visible_for: f32,
    pub start: Vec2,
    pub drift: Vec2,
    pub spin: f32,
    pub random_rotation: bool,
    pub opacity: &'static [f32],
    pub color: &'static str,
}

impl BurstKind {
    pub fn spec(&self) -> BurstSpec {
        match self {
            BurstKind::Sparkle => BurstSpec {
                count: 15,
                spread: Vec2::new(175.0, 60.0),
                size: 8.0..26.0,
                max_delay: 0.0,
                duration: 1.8,
                visible_for: 2.2,
                start: Vec2::ZERO,
                drift: Vec2::ZERO,
                spin: 360.0,
                random_rotation: false,
                opacity: &[0.9, 0.0],
                color: "#FDE047",
            },
            BurstKind::MiniSparkle => BurstSpec {
                count: 6,
                spread: Vec2::new(140.0, 40.0),
                size: 6.0..18.0,
                visible_for: 1.5,
                ..BurstKind::Sparkle.spec()
            },
            BurstKind::Hearts => BurstSpec {
                count: 8,
                spread: Vec2::new(200.0, 150.0),
                size: 10.0..30.0,
                max_delay: 0.8,
                duration: 2.5,
                visible_for: 3.0,
                // Monte depuis le bas de la carte
                start: Vec2::new(0.0, -100.0),
                drift: Vec2::new(0.0, 200.0),
                spin: 0.0,
                random_rotation: false,
                opacity: &[0.0, 0.8, 0.0],
                color: "#EC407A",
            },
            BurstKind::HeartRing => BurstSpec {
                count: 20,
                spread: Vec2::new(75.0, 75.0),
                size: 10.0..30.0,
                max_delay: 0.0,
                duration: 1.5,
                visible_for: 2.0,
                start: Vec2::ZERO,
                drift: Vec2::ZERO,
                spin: 0.0,
                random_rotation: true,
                opacity: &[0.8, 0.0],
                color: "#EC4899",
            },
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BurstKind::Sparkle => "étincelles",
            BurstKind::MiniSparkle => "petites étincelles",
            BurstKind::Hearts => "cœurs",
            BurstKind::HeartRing => "couronne de cœurs",
        }
    }
}

/// Un élément de salve, avec sa trajectoire en coordonnées monde
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BurstItem {
    pub from: Vec2,
    pub to: Vec2,
    pub size: f32,
    pub delay: f32,
    pub rotation: f32,
}

/// Tire les éléments d'une salve : x, y, taille, délai puis rotation
pub fn burst_items(kind: BurstKind, rng: &mut impl RandomSource) -> Vec<BurstItem> {
    let spec = kind.spec();

    (0..spec.count)
        .map(|_| {
            let x = draw(&mut *rng, -spec.spread.x..spec.spread.x);
            let y = draw(&mut *rng, -spec.spread.y..spec.spread.y);
            let size = draw(&mut *rng, spec.size.clone());
            let delay = if spec.max_delay > 0.0 {
                draw(&mut *rng, 0.0..spec.max_delay)
            } else {
                0.0
            };
            let rotation = if spec.random_rotation {
                draw(&mut *rng, 0.0..360.0)
            } else {
                0.0
            };

            BurstItem {
                from: spec.start,
                // L'axe y de l'écran pointe vers le bas
                to: Vec2::new(x, -y) + spec.drift,
                size,
                delay,
                rotation,
            }
        })
        .collect()
}

fn draw(rng: &mut impl RandomSource, range: Range<f32>) -> f32 {
    rng.range(range.start as f64, range.end as f64) as f32
}

struct ScheduledBurst {
    burst: BurstKind,
    timer: Timer,
    chance: f64,
}

/// Calendrier des salves automatiques
#[derive(Resource)]
pub struct EffectSchedule {
    entries: Vec<ScheduledBurst>,
}

impl EffectSchedule {
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn once(mut self, after: f32, burst: BurstKind) -> Self {
        self.entries.push(ScheduledBurst {
            burst,
            timer: Timer::from_seconds(after, TimerMode::Once),
            chance: 1.0,
        });
        self
    }

    /// Répète toutes les `period` secondes avec une probabilité `chance`
    pub fn every(mut self, period: f32, chance: f64, burst: BurstKind) -> Self {
        self.entries.push(ScheduledBurst {
            burst,
            timer: Timer::from_seconds(period, TimerMode::Repeating),
            chance,
        });
        self
    }

    /// Avance toutes les minuteries et renvoie les salves dues
    pub fn advance(&mut self, delta: Duration, rng: &mut impl RandomSource) -> Vec<BurstKind> {
        let mut due = Vec::new();

        for entry in &mut self.entries {
            entry.timer.tick(delta);
            if !entry.timer.just_finished() {
                continue;
            }

            for _ in 0..entry.timer.times_finished_this_tick() {
                // Tirage strict, comme `random() > 0.5`
                if entry.chance >= 1.0 || rng.next_unit() > 1.0 - entry.chance {
                    due.push(entry.burst);
                }
            }
        }

        due
    }
}

impl Default for EffectSchedule {
    fn default() -> Self {
        Self::empty()
            .once(0.8, BurstKind::Sparkle)
            .once(1.5, BurstKind::Hearts)
            // Minuteries indépendantes, toutes deux lancées au démarrage
            .once(1.5, BurstKind::HeartRing)
            .every(8.0, 1.0, BurstKind::HeartRing)
            .every(3.0, 0.5, BurstKind::MiniSparkle)
    }
}
