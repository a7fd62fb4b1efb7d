// Paramètres de population
pub const DEFAULT_PETAL_COUNT: i32 = 30;
pub const OVERSAMPLING_FACTOR: f64 = 1.5; // densité visuelle volontairement plus haute que "count"

pub const LOW_DENSITY_MULTIPLIER: f64 = 0.6;
pub const MEDIUM_DENSITY_MULTIPLIER: f64 = 1.0;
pub const HIGH_DENSITY_MULTIPLIER: f64 = 1.6;

// Répartition par famille (les planchers ne somment pas forcément à 100%)
pub const PETAL_RATIO: f64 = 0.35;
pub const HEART_RATIO: f64 = 0.2;
pub const BLOOM_RATIO: f64 = 0.25;
pub const CHARM_RATIO: f64 = 0.2;
pub const EDGE_CLUSTER_RATIO: f64 = 0.05;

// Seuils cumulés du tirage des éléments de bord
pub const EDGE_PETAL_THRESHOLD: f64 = 0.35;
pub const EDGE_BLOOM_THRESHOLD: f64 = 0.6;

// Bandes horizontales
pub const BAND_COUNT: usize = 5;
pub const BAND_INSET: f64 = 0.1; // 10% à 90% de la bande
pub const EDGE_WIDTH: f64 = 10.0; // pourcentage de l'écran
pub const WEIGHTED_EXPONENT: f64 = 1.2;

// Paramètres communs des particules
pub const MAX_START_DELAY: f64 = 15.0; // secondes
pub const STACK_ORDER_MIN: i32 = 5;
pub const STACK_ORDER_SPAN: i32 = 20;

// Paramètres de rendu
pub const OUTLINE_BOX: f32 = 50.0; // viewBox des chemins vectoriels
pub const CURVE_SEGMENTS: usize = 12;
pub const GLYPH_SEGMENTS: usize = 96;
pub const FALL_MARGIN: f32 = 100.0; // pixels au-dessus et en dessous de la fenêtre
pub const STACK_Z_SCALE: f32 = 0.01;

// Carte
pub const CARD_SHAKE_DURATION: f32 = 0.5; // secondes
pub const CARD_SHAKE_AMPLITUDE: f32 = 5.0; // pixels
pub const CONFIG_FILE: &str = "card.json";
