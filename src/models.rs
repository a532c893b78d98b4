//! Data models for the strip-mining yield calculator

use serde::Serialize;

/// Blocks sampled per chunk by one windmill pass (16 x 4 x 8) over the blocks of
/// the diamond band in a chunk (16 x 16 x 12). Exactly 1/6.
pub const SAMPLED_VOLUME_RATIO: f64 = (16.0 * 4.0 * 8.0) / (16.0 * 16.0 * 12.0);

pub const DEFAULT_LOOP_COUNT: i64 = 0;
pub const DEFAULT_ORE_PER_CHUNK: f64 = 3.67;
pub const DEFAULT_PURE_FACTOR: f64 = 1.98;

/// Which chunks a loop count refers to
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Mode {
    /// Every chunk mined by passes 0..=n
    #[default]
    #[strum(to_string = "until", serialize = "until_n")]
    UntilN,
    /// Only the chunks mined by pass n
    #[strum(to_string = "at", serialize = "at_n")]
    AtN,
}

impl Mode {
    /// Map a selector index back to a mode. Anything but 0 or 1 has no mode.
    pub fn from_index(index: i64) -> Option<Self> {
        match index {
            0 => Some(Mode::UntilN),
            1 => Some(Mode::AtN),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::UntilN => "cumulative through pass n",
            Mode::AtN => "exactly at pass n",
        }
    }

    /// Chunks mined for loop count `n` under this mode.
    ///
    /// `AtN` uses the ring count `2n + 1`. A later revision of the web calculator
    /// used `(2n + 1) / 4` with `n == 1` special-cased to 1; that variant is not
    /// reproduced here.
    pub fn mined_chunks(self, n: i64) -> f64 {
        let n = n as f64;
        match self {
            Mode::UntilN => ((2.0 * n + 2.0) / 4.0).powi(2),
            Mode::AtN => 2.0 * n + 1.0,
        }
    }
}

/// Fortune enchantment level on the pickaxe
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum FortuneTier {
    #[default]
    #[strum(to_string = "none", serialize = "0")]
    None,
    #[strum(to_string = "tier1", serialize = "1", serialize = "i")]
    Tier1,
    #[strum(to_string = "tier2", serialize = "2", serialize = "ii")]
    Tier2,
    #[strum(to_string = "tier3", serialize = "3", serialize = "iii")]
    Tier3,
}

impl FortuneTier {
    /// Average drops per ore block
    pub fn factor(self) -> f64 {
        match self {
            FortuneTier::None => 1.0,
            FortuneTier::Tier1 => 1.25,
            FortuneTier::Tier2 => 1.75,
            FortuneTier::Tier3 => 2.20,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FortuneTier::None => "none",
            FortuneTier::Tier1 => "tier I",
            FortuneTier::Tier2 => "tier II",
            FortuneTier::Tier3 => "tier III",
        }
    }
}

/// Other ores whose tunnels expose extra diamonds
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum OreKind {
    #[strum(to_string = "iron", serialize = "iron_ore")]
    Iron,
    #[strum(to_string = "gold", serialize = "gold_ore")]
    Gold,
    #[strum(to_string = "coal", serialize = "coal_ore")]
    Coal,
    #[strum(to_string = "lapis", serialize = "lapis_lazuli", serialize = "lapis_lazuli_ore")]
    Lapis,
    #[strum(to_string = "redstone", serialize = "redstone_ore")]
    Redstone,
    #[strum(to_string = "emerald", serialize = "emerald_ore")]
    Emerald,
}

impl OreKind {
    /// Registry order. Sums run in this order.
    pub const ALL: [OreKind; 6] = [
        OreKind::Iron,
        OreKind::Gold,
        OreKind::Coal,
        OreKind::Lapis,
        OreKind::Redstone,
        OreKind::Emerald,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn default_magnitude(self) -> f64 {
        match self {
            OreKind::Iron => 0.08,
            OreKind::Gold => 0.01,
            OreKind::Coal => 0.09,
            OreKind::Lapis => 0.01,
            OreKind::Redstone => 0.09,
            OreKind::Emerald => 0.0,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            OreKind::Iron => "Iron Ore",
            OreKind::Gold => "Gold Ore",
            OreKind::Coal => "Coal Ore",
            OreKind::Lapis => "Lapis Lazuli Ore",
            OreKind::Redstone => "Redstone Ore",
            OreKind::Emerald => "Emerald Ore",
        }
    }
}

/// Per-ore entry as the front end sees it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OreEffectView {
    pub ore: OreKind,
    pub enabled: bool,
    pub magnitude: f64,
}

/// Read model of a whole session, rendered after every edit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// `None` when the last loop count edit was not a number
    pub loop_count: Option<i64>,
    pub mode: Mode,
    pub mined_chunks: f64,
    pub expected_ore_per_chunk: f64,
    pub pure_factor: f64,
    pub extra_factor: f64,
    pub fortune_tier: FortuneTier,
    pub fortune_factor: f64,
    pub ore_count: f64,
    pub result_count: f64,
    pub ores: Vec<OreEffectView>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    /// The ratio is 512 / 3072 = 1/6. Older write-ups of the calculator quote
    /// about 0.0208 for it, which is 8x smaller than the expression itself.
    #[test]
    fn test_volume_ratio() {
        assert_eq!(SAMPLED_VOLUME_RATIO, 512.0 / 3072.0);
        assert!((SAMPLED_VOLUME_RATIO - 1.0 / 6.0).abs() < 1e-15);
        assert!((SAMPLED_VOLUME_RATIO - 0.020_833_333).abs() > 0.1);
    }

    #[test]
    fn test_mined_chunks_until_n() {
        assert_eq!(Mode::UntilN.mined_chunks(0), 0.25);
        assert_eq!(Mode::UntilN.mined_chunks(1), 1.0);
        assert_eq!(Mode::UntilN.mined_chunks(3), 4.0);
    }

    #[test]
    fn test_mined_chunks_at_n() {
        assert_eq!(Mode::AtN.mined_chunks(0), 1.0);
        assert_eq!(Mode::AtN.mined_chunks(1), 3.0);
        assert_eq!(Mode::AtN.mined_chunks(4), 9.0);
    }

    #[test]
    fn test_mode_from_index() {
        let modes: Vec<Mode> = Mode::iter().collect();
        assert_eq!(Mode::from_index(0), Some(modes[0]));
        assert_eq!(Mode::from_index(1), Some(Mode::AtN));
        assert_eq!(Mode::from_index(2), None);
        assert_eq!(Mode::from_index(-1), None);
    }

    #[test]
    fn test_parse_selectors() {
        assert_eq!(Mode::from_str("AT").unwrap(), Mode::AtN);
        assert_eq!(Mode::from_str("until_n").unwrap(), Mode::UntilN);
        assert_eq!(FortuneTier::from_str("3").unwrap(), FortuneTier::Tier3);
        assert_eq!(FortuneTier::from_str("ii").unwrap(), FortuneTier::Tier2);
        assert_eq!(OreKind::from_str("Lapis_Lazuli").unwrap(), OreKind::Lapis);
        assert!(OreKind::from_str("diamond").is_err());
    }

    #[test]
    fn test_fortune_factors() {
        let factors: Vec<f64> = FortuneTier::iter().map(FortuneTier::factor).collect();
        assert_eq!(factors, vec![1.0, 1.25, 1.75, 2.20]);
    }

    #[test]
    fn test_ore_table_order() {
        let iterated: Vec<OreKind> = OreKind::iter().collect();
        assert_eq!(iterated, OreKind::ALL.to_vec());
        for (i, ore) in OreKind::ALL.iter().enumerate() {
            assert_eq!(ore.index(), i);
        }
        let magnitudes: Vec<f64> = OreKind::ALL.iter().map(|o| o.default_magnitude()).collect();
        assert_eq!(magnitudes, vec![0.08, 0.01, 0.09, 0.01, 0.09, 0.0]);
    }
}
