//! One calculator session: the state plus the controls that feed it
//!
//! The session owns the pure diamond factor, the other-ore registry and the selected
//! fortune tier, and turns edits on those into calls on [`CalculationState`].

use tracing::debug;

use crate::calculator::CalculationState;
use crate::coerce::{make_float_number, same_value, Numeric};
use crate::models::{FortuneTier, Mode, OreKind, Snapshot, DEFAULT_PURE_FACTOR};
use crate::ore_effects::OreEffectRegistry;

#[derive(Debug, Clone)]
pub struct Session {
    state: CalculationState,
    ores: OreEffectRegistry,
    pure_factor: f64,
    fortune_tier: FortuneTier,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// New session with every control at its default and results already computed.
    pub fn new() -> Self {
        let mut state = CalculationState::new();
        state.recompute_all();
        let mut session = Self {
            state,
            ores: OreEffectRegistry::new(),
            pure_factor: DEFAULT_PURE_FACTOR,
            fortune_tier: FortuneTier::default(),
        };
        session.push_extra_factor();
        session
    }

    pub fn state(&self) -> &CalculationState {
        &self.state
    }

    pub fn ores(&self) -> &OreEffectRegistry {
        &self.ores
    }

    pub fn fortune_tier(&self) -> FortuneTier {
        self.fortune_tier
    }

    pub fn set_loop_count<'a>(&mut self, n: impl Into<Numeric<'a>>) {
        self.state.set_loop_count(n);
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.state.set_mode(mode);
    }

    pub fn set_expected_ore_per_chunk<'a>(&mut self, x: impl Into<Numeric<'a>>) {
        self.state.set_expected_ore_per_chunk(x);
    }

    /// Override the combined factor directly. The next pure factor or ore edit
    /// replaces it with `pure + sum`.
    pub fn set_extra_factor<'a>(&mut self, x: impl Into<Numeric<'a>>) {
        self.state.set_extra_factor(x);
    }

    pub fn set_pure_factor<'a>(&mut self, x: impl Into<Numeric<'a>>) {
        let x = make_float_number(x);
        if same_value(self.pure_factor, x) {
            return;
        }
        self.pure_factor = x;
        self.push_extra_factor();
    }

    pub fn set_ore_enabled(&mut self, ore: OreKind, enabled: bool) {
        if self.ores.set_enabled(ore, enabled) {
            self.push_extra_factor();
        }
    }

    pub fn set_ore_magnitude<'a>(&mut self, ore: OreKind, value: impl Into<Numeric<'a>>) {
        if self.ores.set_magnitude(ore, value) {
            self.push_extra_factor();
        }
    }

    pub fn set_fortune_tier(&mut self, tier: FortuneTier) {
        self.fortune_tier = tier;
        self.state.set_fortune_factor(tier.factor());
    }

    fn push_extra_factor(&mut self) {
        let extra = self.pure_factor + self.ores.sum_enabled_magnitudes();
        debug!(pure = self.pure_factor, extra = extra, "derived extra factor");
        self.state.set_extra_factor(extra);
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            loop_count: self.state.loop_count(),
            mode: self.state.mode(),
            mined_chunks: self.state.mined_chunks(),
            expected_ore_per_chunk: self.state.expected_ore_per_chunk(),
            pure_factor: self.pure_factor,
            extra_factor: self.state.extra_factor(),
            fortune_tier: self.fortune_tier,
            fortune_factor: self.state.fortune_factor(),
            ore_count: self.state.ore_count(),
            result_count: self.state.result_count(),
            ores: self.ores.views(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_new_session_is_consistent() {
        let session = Session::new();
        let snap = session.snapshot();
        assert_eq!(snap.loop_count, Some(0));
        assert_eq!(snap.mined_chunks, 0.25);
        assert_eq!(snap.extra_factor, 1.98);
        assert_eq!(snap.fortune_tier, FortuneTier::None);
        assert!(snap.ore_count > 0.0);
        assert_eq!(snap.result_count, snap.ore_count);
        // default factor already matches, so only the initial cascade ran
        assert_eq!(session.state().recomputes().mined_chunks, 1);
        assert_eq!(session.state().recomputes().ore_count, 1);
    }

    #[test]
    fn test_enable_iron_scales_ore_count() {
        let mut session = Session::new();
        session.set_loop_count(1i64);
        let before = session.state().ore_count();
        session.set_ore_enabled(OreKind::Iron, true);
        assert!((session.state().extra_factor() - 2.06).abs() < EPS);
        let ratio = session.state().ore_count() / before;
        assert!((ratio - 2.06 / 1.98).abs() < EPS);
    }

    #[test]
    fn test_tier3_scales_result() {
        let mut session = Session::new();
        session.set_loop_count("5");
        let ore = session.state().ore_count();
        session.set_fortune_tier(FortuneTier::Tier3);
        assert_eq!(session.state().result_count(), ore * 2.20);
        assert_eq!(session.snapshot().fortune_tier, FortuneTier::Tier3);
    }

    #[test]
    fn test_unchanged_toggle_does_not_recompute() {
        let mut session = Session::new();
        session.set_ore_enabled(OreKind::Coal, true);
        let counts = session.state().recomputes();
        session.set_ore_enabled(OreKind::Coal, true);
        session.set_ore_magnitude(OreKind::Coal, "0.09");
        session.set_pure_factor(1.98);
        assert_eq!(session.state().recomputes(), counts);
    }

    #[test]
    fn test_disabled_magnitude_edit_is_noop_for_results() {
        let mut session = Session::new();
        let counts = session.state().recomputes();
        session.set_ore_magnitude(OreKind::Gold, 0.5);
        // the factor is re-derived but sums to the same value
        assert_eq!(session.state().recomputes(), counts);
        assert_eq!(session.ores().get(OreKind::Gold).magnitude, 0.5);
    }

    #[test]
    fn test_pure_factor_plus_enabled_sum() {
        let mut session = Session::new();
        session.set_pure_factor("2.5");
        session.set_ore_enabled(OreKind::Coal, true);
        session.set_ore_enabled(OreKind::Redstone, true);
        session.set_ore_magnitude(OreKind::Redstone, 0.5);
        let expected = 2.5 + (0.09 + 0.5);
        assert!((session.state().extra_factor() - expected).abs() < EPS);
        assert_eq!(session.snapshot().pure_factor, 2.5);
    }

    #[test]
    fn test_direct_extra_factor_is_replaced_by_next_derivation() {
        let mut session = Session::new();
        session.set_extra_factor(3.0);
        assert_eq!(session.state().extra_factor(), 3.0);
        session.set_ore_enabled(OreKind::Iron, true);
        assert!((session.state().extra_factor() - 2.06).abs() < EPS);
    }

    #[test]
    fn test_bad_pure_factor_poisons_then_recovers() {
        let mut session = Session::new();
        session.set_pure_factor("n/a");
        assert!(session.state().extra_factor().is_nan());
        assert!(session.state().result_count().is_nan());
        session.set_pure_factor(1.98);
        assert_eq!(session.state().extra_factor(), 1.98);
        assert!(!session.state().result_count().is_nan());
    }

    #[test]
    fn test_snapshot_lists_all_ores() {
        let mut session = Session::new();
        session.set_ore_enabled(OreKind::Lapis, true);
        let snap = session.snapshot();
        assert_eq!(snap.ores.len(), 6);
        assert!(snap.ores[3].enabled);
        assert_eq!(snap.ores[3].ore, OreKind::Lapis);
    }
}
