//! Correction contributed by mining other ores
//!
//! Each of the six ore kinds has one fixed entry, created disabled with its default
//! magnitude. Entries are never added or removed, only edited.

use tracing::trace;

use crate::coerce::{make_float_number, same_value, Numeric};
use crate::models::{OreEffectView, OreKind};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OreEffect {
    pub enabled: bool,
    pub magnitude: f64,
}

impl OreEffect {
    fn for_ore(ore: OreKind) -> Self {
        Self {
            enabled: false,
            magnitude: ore.default_magnitude(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OreEffectRegistry {
    entries: [OreEffect; 6],
}

impl Default for OreEffectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl OreEffectRegistry {
    pub fn new() -> Self {
        Self {
            entries: OreKind::ALL.map(OreEffect::for_ore),
        }
    }

    pub fn get(&self, ore: OreKind) -> OreEffect {
        self.entries[ore.index()]
    }

    /// Toggle an ore. Returns whether the flag actually changed, in which case
    /// the caller must push a new extra factor.
    pub fn set_enabled(&mut self, ore: OreKind, enabled: bool) -> bool {
        let entry = &mut self.entries[ore.index()];
        if entry.enabled == enabled {
            trace!(%ore, enabled = enabled, "ore toggle unchanged");
            return false;
        }
        entry.enabled = enabled;
        true
    }

    /// Edit an ore's magnitude. Returns whether the stored value changed.
    pub fn set_magnitude<'a>(&mut self, ore: OreKind, value: impl Into<Numeric<'a>>) -> bool {
        let value = make_float_number(value);
        let entry = &mut self.entries[ore.index()];
        if same_value(entry.magnitude, value) {
            trace!(%ore, value = value, "ore magnitude unchanged");
            return false;
        }
        entry.magnitude = value;
        true
    }

    /// Sum of the magnitudes of enabled ores, in registry order.
    pub fn sum_enabled_magnitudes(&self) -> f64 {
        self.entries
            .iter()
            .filter(|e| e.enabled)
            .fold(0.0, |sum, e| sum + e.magnitude)
    }

    pub fn views(&self) -> Vec<OreEffectView> {
        OreKind::ALL
            .iter()
            .map(|&ore| {
                let entry = self.get(ore);
                OreEffectView {
                    ore,
                    enabled: entry.enabled,
                    magnitude: entry.magnitude,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let registry = OreEffectRegistry::new();
        for ore in OreKind::ALL {
            let entry = registry.get(ore);
            assert!(!entry.enabled);
            assert_eq!(entry.magnitude, ore.default_magnitude());
        }
        assert_eq!(registry.sum_enabled_magnitudes(), 0.0);
    }

    #[test]
    fn test_set_enabled_reports_change() {
        let mut registry = OreEffectRegistry::new();
        assert!(registry.set_enabled(OreKind::Iron, true));
        assert!(!registry.set_enabled(OreKind::Iron, true));
        assert!(registry.set_enabled(OreKind::Iron, false));
        assert!(!registry.set_enabled(OreKind::Gold, false));
    }

    #[test]
    fn test_set_magnitude_reports_change() {
        let mut registry = OreEffectRegistry::new();
        assert!(!registry.set_magnitude(OreKind::Coal, 0.09));
        assert!(!registry.set_magnitude(OreKind::Coal, "0.09"));
        assert!(registry.set_magnitude(OreKind::Coal, "0.2"));
        assert_eq!(registry.get(OreKind::Coal).magnitude, 0.2);
        assert!(registry.set_magnitude(OreKind::Coal, "bad"));
        assert!(registry.get(OreKind::Coal).magnitude.is_nan());
        assert!(!registry.set_magnitude(OreKind::Coal, "worse"));
    }

    #[test]
    fn test_disabled_magnitude_does_not_count() {
        let mut registry = OreEffectRegistry::new();
        registry.set_magnitude(OreKind::Emerald, 5.0);
        assert_eq!(registry.sum_enabled_magnitudes(), 0.0);
        registry.set_enabled(OreKind::Emerald, true);
        assert_eq!(registry.sum_enabled_magnitudes(), 5.0);
    }

    #[test]
    fn test_sum_over_every_subset() {
        for mask in 0u32..(1 << OreKind::ALL.len()) {
            let mut registry = OreEffectRegistry::new();
            let mut expected = 0.0;
            for (i, ore) in OreKind::ALL.iter().enumerate() {
                if mask & (1 << i) != 0 {
                    registry.set_enabled(*ore, true);
                    expected += ore.default_magnitude();
                }
            }
            assert_eq!(registry.sum_enabled_magnitudes(), expected, "mask {mask:06b}");
        }
    }

    #[test]
    fn test_nan_magnitude_poisons_sum_only_when_enabled() {
        let mut registry = OreEffectRegistry::new();
        registry.set_magnitude(OreKind::Gold, "x");
        registry.set_enabled(OreKind::Iron, true);
        assert_eq!(registry.sum_enabled_magnitudes(), 0.08);
        registry.set_enabled(OreKind::Gold, true);
        assert!(registry.sum_enabled_magnitudes().is_nan());
    }

    #[test]
    fn test_views_follow_registry_order() {
        let mut registry = OreEffectRegistry::new();
        registry.set_enabled(OreKind::Redstone, true);
        let views = registry.views();
        assert_eq!(views.len(), 6);
        assert_eq!(views[0].ore, OreKind::Iron);
        assert!(views[4].enabled);
        assert_eq!(views[4].ore, OreKind::Redstone);
    }
}
