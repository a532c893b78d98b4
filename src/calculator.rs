//! Yield calculation state and its recompute cascade
//!
//! Inputs feed three derived stages that always run in the same order:
//!
//! ```text
//! loop_count, mode ─► mined_chunks ─┐
//! expected_ore_per_chunk ───────────┼─► ore_count ─► result_count
//! extra_factor ─────────────────────┘                 ▲
//! fortune_factor ─────────────────────────────────────┘
//! ```
//!
//! A setter only starts the cascade at the first stage its input feeds, and only
//! when the value actually changed.

use tracing::{debug, trace};

use crate::coerce::{make_float_number, make_int_number, same_value, Numeric};
use crate::models::{
    Mode, DEFAULT_LOOP_COUNT, DEFAULT_ORE_PER_CHUNK, DEFAULT_PURE_FACTOR, SAMPLED_VOLUME_RATIO,
};

/// How many times each derived stage has been recomputed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecomputeCounts {
    pub mined_chunks: u64,
    pub ore_count: u64,
    pub result_count: u64,
}

#[derive(Debug, Clone)]
pub struct CalculationState {
    loop_count: Option<i64>,
    mode: Mode,
    mined_chunks: f64,
    expected_ore_per_chunk: f64,
    extra_factor: f64,
    fortune_factor: f64,
    ore_count: f64,
    result_count: f64,
    recomputes: RecomputeCounts,
}

impl Default for CalculationState {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculationState {
    /// Fresh state with default inputs. Derived fields stay at zero until the
    /// first cascade runs (see [`CalculationState::recompute_all`]).
    pub fn new() -> Self {
        Self {
            loop_count: Some(DEFAULT_LOOP_COUNT),
            mode: Mode::default(),
            mined_chunks: 0.0,
            expected_ore_per_chunk: DEFAULT_ORE_PER_CHUNK,
            extra_factor: DEFAULT_PURE_FACTOR,
            fortune_factor: 1.0,
            ore_count: 0.0,
            result_count: 0.0,
            recomputes: RecomputeCounts::default(),
        }
    }

    pub fn loop_count(&self) -> Option<i64> {
        self.loop_count
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn mined_chunks(&self) -> f64 {
        self.mined_chunks
    }

    pub fn expected_ore_per_chunk(&self) -> f64 {
        self.expected_ore_per_chunk
    }

    pub fn extra_factor(&self) -> f64 {
        self.extra_factor
    }

    pub fn fortune_factor(&self) -> f64 {
        self.fortune_factor
    }

    pub fn ore_count(&self) -> f64 {
        self.ore_count
    }

    pub fn result_count(&self) -> f64 {
        self.result_count
    }

    pub fn recomputes(&self) -> RecomputeCounts {
        self.recomputes
    }

    /// Set the number of windmill passes. Text is coerced; a non-number poisons
    /// every derived field until a number is set again.
    pub fn set_loop_count<'a>(&mut self, n: impl Into<Numeric<'a>>) {
        let n = make_int_number(n);
        if self.loop_count == n {
            trace!(?n, "loop count unchanged");
            return;
        }
        self.loop_count = n;
        self.recompute_mined_chunks();
    }

    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode == mode {
            trace!(%mode, "mode unchanged");
            return;
        }
        self.mode = mode;
        self.recompute_mined_chunks();
    }

    pub fn set_expected_ore_per_chunk<'a>(&mut self, x: impl Into<Numeric<'a>>) {
        let x = make_float_number(x);
        if same_value(self.expected_ore_per_chunk, x) {
            trace!(value = x, "ore per chunk unchanged");
            return;
        }
        self.expected_ore_per_chunk = x;
        self.recompute_ore_count();
    }

    /// Set the combined correction factor (pure factor plus enabled ore effects).
    pub fn set_extra_factor<'a>(&mut self, x: impl Into<Numeric<'a>>) {
        let x = make_float_number(x);
        if same_value(self.extra_factor, x) {
            trace!(value = x, "extra factor unchanged");
            return;
        }
        self.extra_factor = x;
        self.recompute_ore_count();
    }

    pub fn set_fortune_factor<'a>(&mut self, f: impl Into<Numeric<'a>>) {
        let f = make_float_number(f);
        if same_value(self.fortune_factor, f) {
            trace!(value = f, "fortune factor unchanged");
            return;
        }
        self.fortune_factor = f;
        self.recompute_result_count();
    }

    /// Run the whole cascade from the first stage.
    pub fn recompute_all(&mut self) {
        self.recompute_mined_chunks();
    }

    fn recompute_mined_chunks(&mut self) {
        self.mined_chunks = match self.loop_count {
            Some(n) => self.mode.mined_chunks(n),
            None => f64::NAN,
        };
        self.recomputes.mined_chunks += 1;
        debug!(mined_chunks = self.mined_chunks, mode = %self.mode, "recomputed mined chunks");
        self.recompute_ore_count();
    }

    fn recompute_ore_count(&mut self) {
        self.ore_count = SAMPLED_VOLUME_RATIO
            * self.expected_ore_per_chunk
            * self.extra_factor
            * self.mined_chunks;
        self.recomputes.ore_count += 1;
        debug!(ore_count = self.ore_count, "recomputed ore count");
        self.recompute_result_count();
    }

    fn recompute_result_count(&mut self) {
        self.result_count = self.ore_count * self.fortune_factor;
        self.recomputes.result_count += 1;
        debug!(result_count = self.result_count, "recomputed result count");
    }
}
