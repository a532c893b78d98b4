//! Text rendering of calculation results

use std::fmt;

use crate::models::Snapshot;
use crate::session::Session;

fn format_count(value: f64) -> String {
    if value.is_nan() {
        "not a number".to_string()
    } else {
        format!("{:.3}", value)
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Strip Mining Estimate ===")?;
        match self.loop_count {
            Some(n) => writeln!(f, "Passes: {} ({})", n, self.mode.label())?,
            None => writeln!(f, "Passes: not a number ({})", self.mode.label())?,
        }
        writeln!(f, "Ore per chunk: {}", self.expected_ore_per_chunk)?;
        writeln!(
            f,
            "Correction: {} (pure {})",
            self.extra_factor, self.pure_factor
        )?;
        for ore in self.ores.iter().filter(|o| o.enabled) {
            writeln!(f, "  + {} {}", ore.ore.display_name(), ore.magnitude)?;
        }
        writeln!(
            f,
            "Fortune: {} (x{})",
            self.fortune_tier.label(),
            self.fortune_factor
        )?;
        writeln!(f)?;

        writeln!(f, "Results:")?;
        writeln!(f, "  Mined chunks: {}", format_count(self.mined_chunks))?;
        writeln!(f, "  Ore blocks:   {}", format_count(self.ore_count))?;
        writeln!(f, "  Drops:        {}", format_count(self.result_count))?;

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub loop_count: i64,
    pub mined_chunks: f64,
    pub ore_count: f64,
    pub result_count: f64,
}

/// Results for every loop count in `0..=max_loops`, all other controls as in
/// `session`.
pub fn loop_table(session: &Session, max_loops: u32) -> Vec<TableRow> {
    let mut session = session.clone();
    (0..=max_loops)
        .map(|n| {
            session.set_loop_count(n);
            let state = session.state();
            TableRow {
                loop_count: i64::from(n),
                mined_chunks: state.mined_chunks(),
                ore_count: state.ore_count(),
                result_count: state.result_count(),
            }
        })
        .collect()
}

pub fn format_table(rows: &[TableRow]) -> String {
    let mut output = format!(
        "{:>6} {:>14} {:>14} {:>14}\n",
        "Pass", "Chunks", "Ore blocks", "Drops"
    );
    output.push_str(&"-".repeat(51));
    output.push('\n');
    for row in rows {
        output.push_str(&format!(
            "{:>6} {:>14} {:>14} {:>14}\n",
            row.loop_count,
            format_count(row.mined_chunks),
            format_count(row.ore_count),
            format_count(row.result_count)
        ));
    }
    output
}
