use crate::globals::*;
use crate::resources::particle_types::{GlyphKind, ParticleDescriptor, ParticleFamily, ParticleKind};
use crate::resources::petals::{DensityTier, Distribution, PetalParameters};
use crate::resources::random::RandomSource;
use crate::resources::theme::ResolvedPalettes;
use crate::systems::outline::PETAL_OUTLINES;

/// Tailles de chaque partition pour un nombre effectif donné
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartitionSizes {
    pub effective: usize,
    pub petals: usize,
    pub hearts: usize,
    pub blooms: usize,
    pub charms: usize,
    /// Taille de chacun des deux groupes de bord
    pub edge: usize,
}

impl PartitionSizes {
    pub fn for_count(count: i32, density: DensityTier) -> Self {
        let effective = effective_count(count, density);
        let share = |ratio: f64| (effective as f64 * ratio).floor() as usize;

        Self {
            effective,
            petals: share(PETAL_RATIO),
            hearts: share(HEART_RATIO),
            blooms: share(BLOOM_RATIO),
            charms: share(CHARM_RATIO),
            edge: (effective as f64 * EDGE_CLUSTER_RATIO).ceil() as usize,
        }
    }

    pub fn total(&self) -> usize {
        self.petals + self.hearts + self.blooms + self.charms + 2 * self.edge
    }
}

/// floor(floor(count × densité) × 1.5), 0 pour un nombre négatif ou nul
pub fn effective_count(count: i32, density: DensityTier) -> usize {
    if count <= 0 {
        return 0;
    }
    let scaled = (count as f64 * density.multiplier()).floor();
    (scaled * OVERSAMPLING_FACTOR).floor() as usize
}

/// Génère la population complète de descripteurs.
///
/// Ordre : pétales, cœurs, fleurs, breloques, groupe du bord gauche, groupe
/// du bord droit. Ne signale jamais d'erreur : un nombre nul ou négatif donne
/// une liste vide.
pub fn generate(params: &PetalParameters, rng: &mut impl RandomSource) -> Vec<ParticleDescriptor> {
    let sizes = PartitionSizes::for_count(params.count, params.density);
    let palettes = ResolvedPalettes::resolve(params.theme, params.petal_colors.as_deref());
    let mut items = Vec::with_capacity(sizes.total());

    let waves = [
        (ParticleFamily::Petal, sizes.petals),
        (ParticleFamily::Heart, sizes.hearts),
        (ParticleFamily::Bloom, sizes.blooms),
        (ParticleFamily::Charm, sizes.charms),
    ];
    for (family, count) in waves {
        for i in 0..count {
            let placement = Placement::Band {
                index: i,
                distribution: params.distribution,
            };
            items.push(build_descriptor(family, placement, &palettes, rng));
        }
    }

    for _ in 0..sizes.edge {
        items.push(edge_descriptor(EdgeSide::Left, &palettes, rng));
    }
    for _ in 0..sizes.edge {
        items.push(edge_descriptor(EdgeSide::Right, &palettes, rng));
    }

    items
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EdgeSide {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy)]
enum Placement {
    Band { index: usize, distribution: Distribution },
    Fixed(f64),
}

impl Placement {
    fn resolve(&self, rng: &mut impl RandomSource) -> f64 {
        match *self {
            Placement::Band { index, distribution } => band_position(index, distribution, rng),
            Placement::Fixed(left) => left,
        }
    }
}

/// Position dans la bande `index % 5`, retrait de 10% de chaque côté
fn band_position(index: usize, distribution: Distribution, rng: &mut impl RandomSource) -> f64 {
    let band_width = 100.0 / BAND_COUNT as f64;
    let band = (index % BAND_COUNT) as f64;
    let band_start = band * band_width;
    let band_end = (band + 1.0) * band_width;

    let jitter = distribution.draw(rng) * (1.0 - 2.0 * BAND_INSET) + BAND_INSET;
    (band_start + jitter * (band_end - band_start)).clamp(0.0, 100.0)
}

/// Élément de bord : position tirée d'abord, famille par seuils cumulés
fn edge_descriptor(
    side: EdgeSide,
    palettes: &ResolvedPalettes,
    rng: &mut impl RandomSource,
) -> ParticleDescriptor {
    let roll = rng.next_unit();
    let offset = rng.next_unit() * EDGE_WIDTH;
    let left = match side {
        EdgeSide::Left => offset,
        EdgeSide::Right => 100.0 - offset,
    };

    let family = if roll < EDGE_PETAL_THRESHOLD {
        ParticleFamily::Petal
    } else if roll < EDGE_BLOOM_THRESHOLD {
        ParticleFamily::Bloom
    } else {
        ParticleFamily::Heart
    };

    let mut descriptor = build_descriptor(family, Placement::Fixed(left), palettes, rng);
    if family == ParticleFamily::Bloom {
        // Les fleurs de bord piochent parmi les quatre glyphes
        descriptor.kind = ParticleKind::Glyph(GlyphKind::ALL[rng.index(GlyphKind::ALL.len())]);
    }
    descriptor
}

fn build_descriptor(
    family: ParticleFamily,
    placement: Placement,
    palettes: &ResolvedPalettes,
    rng: &mut impl RandomSource,
) -> ParticleDescriptor {
    let palette = palettes.for_family(family);
    let color = palette[rng.index(palette.len())].clone();

    let size_range = family.size_range();
    let size = rng.range(size_range.start, size_range.end);
    let left = placement.resolve(rng);
    let delay = rng.range(0.0, MAX_START_DELAY);
    let duration_range = family.duration_range();
    let duration = rng.range(duration_range.start, duration_range.end);
    let rotation = rng.range(0.0, 360.0);

    let (kind, outline) = match family {
        ParticleFamily::Petal => (ParticleKind::Petal, Some(rng.index(PETAL_OUTLINES.len()))),
        ParticleFamily::Heart => (ParticleKind::Heart, None),
        ParticleFamily::Bloom => {
            let glyph = if rng.coin() { GlyphKind::Flower } else { GlyphKind::Flower2 };
            (ParticleKind::Glyph(glyph), None)
        }
        ParticleFamily::Charm => {
            let glyph = if rng.coin() { GlyphKind::Heart } else { GlyphKind::Sparkles };
            (ParticleKind::Glyph(glyph), None)
        }
    };

    let stack_order = STACK_ORDER_MIN + rng.index(STACK_ORDER_SPAN as usize) as i32;

    ParticleDescriptor {
        color,
        size,
        left,
        delay,
        duration,
        rotation,
        outline,
        kind,
        family,
        stack_order,
    }
}
