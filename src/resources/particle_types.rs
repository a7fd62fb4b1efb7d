use std::ops::Range;

/// Glyphe d'icône dessiné pour les particules `Glyph`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlyphKind {
    Flower,
    Flower2,
    Heart,
    Sparkles,
}

impl GlyphKind {
    pub const ALL: [GlyphKind; 4] = [
        GlyphKind::Flower,
        GlyphKind::Flower2,
        GlyphKind::Sparkles,
        GlyphKind::Heart,
    ];
}

/// Forme visuelle d'une particule (ensemble fermé)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParticleKind {
    Petal,
    Heart,
    Glyph(GlyphKind),
}

/// Famille de paramètres qui a produit la particule
///
/// Fixe les plages de taille/durée et la palette ; les plages ne se
/// chevauchent jamais entre familles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParticleFamily {
    Petal,
    Heart,
    /// Vague de glyphes fleurs
    Bloom,
    /// Vague de glyphes cœur / étincelles
    Charm,
}

impl ParticleFamily {
    pub const ALL: [ParticleFamily; 4] = [
        ParticleFamily::Petal,
        ParticleFamily::Heart,
        ParticleFamily::Bloom,
        ParticleFamily::Charm,
    ];

    pub fn size_range(&self) -> Range<f64> {
        match self {
            ParticleFamily::Petal => 15.0..35.0,
            ParticleFamily::Heart => 10.0..25.0,
            ParticleFamily::Bloom => 15.0..35.0,
            ParticleFamily::Charm => 12.0..30.0,
        }
    }

    pub fn duration_range(&self) -> Range<f64> {
        match self {
            ParticleFamily::Petal => 12.0..20.0,
            ParticleFamily::Heart => 10.0..16.0,
            ParticleFamily::Bloom => 11.0..18.0,
            ParticleFamily::Charm => 9.0..16.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ParticleFamily::Petal => "pétales",
            ParticleFamily::Heart => "cœurs",
            ParticleFamily::Bloom => "fleurs",
            ParticleFamily::Charm => "breloques",
        }
    }
}

/// Description complète d'un élément qui tombe
///
/// Produite une fois par le générateur, jamais modifiée ensuite.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleDescriptor {
    pub color: String,
    pub size: f64,
    /// Position horizontale en pourcentage de la largeur, dans [0, 100]
    pub left: f64,
    pub delay: f64,
    pub duration: f64,
    /// Degrés, dans [0, 360)
    pub rotation: f64,
    /// Index dans le catalogue des contours de pétales
    pub outline: Option<usize>,
    pub kind: ParticleKind,
    pub family: ParticleFamily,
    pub stack_order: i32,
}
