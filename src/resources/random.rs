use rand::Rng;

/// Source pseudo-aléatoire injectée dans les générateurs.
///
/// Une seule opération : le prochain flottant dans `[0, 1)`. Tout `rand::Rng`
/// l'implémente, les tests peuvent fournir une séquence figée.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;

    /// Tirage uniforme dans `[min, max)`
    fn range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_unit() * (max - min)
    }

    /// Index uniforme dans `0..len` (0 si la tranche est vide)
    fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        ((self.next_unit() * len as f64) as usize).min(len - 1)
    }

    /// Pile ou face strict, comme `random() > 0.5`
    fn coin(&mut self) -> bool {
        self.next_unit() > 0.5
    }
}

impl<R: Rng> RandomSource for R {
    fn next_unit(&mut self) -> f64 {
        self.random::<f64>()
    }
}

/// Séquence cyclique de valeurs figées, pour des sorties exactes en test
#[cfg(test)]
pub struct ScriptedSource {
    values: Vec<f64>,
    cursor: usize,
}

#[cfg(test)]
impl ScriptedSource {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, cursor: 0 }
    }

    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }
}

#[cfg(test)]
impl RandomSource for ScriptedSource {
    fn next_unit(&mut self) -> f64 {
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn rng_implements_source_in_unit_interval() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let value = rng.next_unit();
            assert!((0.0..1.0).contains(&value));
        }
    }

    #[test]
    fn index_never_reaches_len() {
        let mut source = ScriptedSource::constant(0.999_999_999);
        assert_eq!(source.index(5), 4);
        assert_eq!(source.index(0), 0);
    }

    #[test]
    fn range_maps_linearly() {
        let mut source = ScriptedSource::new(vec![0.0, 0.5]);
        assert_eq!(source.range(10.0, 20.0), 10.0);
        assert_eq!(source.range(10.0, 20.0), 15.0);
    }

    #[test]
    fn coin_is_strict() {
        let mut source = ScriptedSource::new(vec![0.5, 0.51]);
        assert!(!source.coin());
        assert!(source.coin());
    }
}
