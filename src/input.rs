//! Form input: validation and the interactive command language
//!
//! The calculation core accepts anything and lets bad numbers turn into NaN. This
//! module is the form in front of it: it checks that fields look like
//! non-negative numbers and that a magnitude is only edited while its ore is
//! enabled. Validation can be switched off to feed raw text straight through.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use tracing::{info, warn};

use crate::coerce::make_int_number;
use crate::models::{FortuneTier, Mode, OreKind};
use crate::session::Session;

static NON_NEGATIVE_DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(\.\d+)?$").expect("decimal pattern"));

static NON_NEGATIVE_INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+$").expect("integer pattern"));

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("unknown command '{0}' (try 'help')")]
    UnknownCommand(String),

    #[error("'{command}' expects {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },

    #[error("unknown ore kind '{0}'")]
    UnknownOre(String),

    #[error("unknown mode '{0}' (use 'until', 'at', 0 or 1)")]
    UnknownMode(String),

    #[error("unknown fortune tier '{0}' (use none, 1, 2 or 3)")]
    UnknownTier(String),

    #[error("expected on/off, got '{0}'")]
    InvalidSwitch(String),

    #[error("{field} must be a non-negative {kind}, got '{value}'")]
    InvalidNumber {
        field: &'static str,
        kind: &'static str,
        value: String,
    },

    #[error("magnitude of {} is disabled until the ore is enabled", .0.display_name())]
    FieldDisabled(OreKind),

    #[error("expected <ore>=<value>, got '{0}'")]
    InvalidAssignment(String),
}

/// Whether edits are checked before they reach the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validation {
    Strict,
    Lenient,
}

/// A single field edit
#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    LoopCount(String),
    Mode(Mode),
    OrePerChunk(String),
    PureFactor(String),
    ExtraFactor(String),
    OreEnabled(OreKind, bool),
    OreMagnitude(OreKind, String),
    Fortune(FortuneTier),
}

/// A line of the interactive form
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Edit(Edit),
    Validation(Validation),
    Show,
    Json,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  loops <n>               number of windmill passes
  mode <until|at|0|1>     cumulative through pass n, or exactly at pass n
  density <x>             expected ore per chunk
  pure <x>                correction factor for the ore alone
  extra <x>               override the combined correction factor
  ore <kind> <on|off>     count the effect of another ore
  magnitude <kind> <x>    effect of another ore (ore must be on)
  fortune <none|1|2|3>    fortune enchantment tier
  lenient <on|off>        skip input checks
  show | json | help | quit

Ore kinds: iron, gold, coal, lapis, redstone, emerald";

pub fn parse_mode(text: &str) -> Result<Mode, InputError> {
    Mode::from_str(text)
        .ok()
        .or_else(|| make_int_number(text).and_then(Mode::from_index))
        .ok_or_else(|| InputError::UnknownMode(text.to_string()))
}

pub fn parse_ore(text: &str) -> Result<OreKind, InputError> {
    OreKind::from_str(text).map_err(|_| InputError::UnknownOre(text.to_string()))
}

pub fn parse_tier(text: &str) -> Result<FortuneTier, InputError> {
    FortuneTier::from_str(text).map_err(|_| InputError::UnknownTier(text.to_string()))
}

fn parse_switch(text: &str) -> Result<bool, InputError> {
    match text.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        _ => Err(InputError::InvalidSwitch(text.to_string())),
    }
}

/// Parse `<ore>=<value>` as used by `--magnitude`.
pub fn parse_assignment(text: &str) -> Result<(OreKind, String), InputError> {
    let (ore, value) = text
        .split_once('=')
        .ok_or_else(|| InputError::InvalidAssignment(text.to_string()))?;
    Ok((parse_ore(ore.trim())?, value.trim().to_string()))
}

/// Parse one line of the interactive form. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Result<Option<Command>, InputError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let mut arg = |command: &'static str, expected: &'static str| {
        words
            .next()
            .ok_or(InputError::MissingArgument { command, expected })
    };

    let command = match head.to_ascii_lowercase().as_str() {
        "loops" | "n" => Command::Edit(Edit::LoopCount(arg("loops", "a count")?.to_string())),
        "mode" => Command::Edit(Edit::Mode(parse_mode(arg("mode", "a mode")?)?)),
        "density" => Command::Edit(Edit::OrePerChunk(
            arg("density", "a number")?.to_string(),
        )),
        "pure" => Command::Edit(Edit::PureFactor(arg("pure", "a number")?.to_string())),
        "extra" => Command::Edit(Edit::ExtraFactor(arg("extra", "a number")?.to_string())),
        "ore" => {
            let ore = parse_ore(arg("ore", "an ore kind")?)?;
            let enabled = parse_switch(arg("ore", "on or off")?)?;
            Command::Edit(Edit::OreEnabled(ore, enabled))
        }
        "magnitude" => {
            let ore = parse_ore(arg("magnitude", "an ore kind")?)?;
            let value = arg("magnitude", "a number")?.to_string();
            Command::Edit(Edit::OreMagnitude(ore, value))
        }
        "fortune" => Command::Edit(Edit::Fortune(parse_tier(arg("fortune", "a tier")?)?)),
        "lenient" => {
            let on = parse_switch(arg("lenient", "on or off")?)?;
            Command::Validation(if on {
                Validation::Lenient
            } else {
                Validation::Strict
            })
        }
        "show" => Command::Show,
        "json" => Command::Json,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        _ => return Err(InputError::UnknownCommand(head.to_string())),
    };
    Ok(Some(command))
}

fn check(
    pattern: &Regex,
    field: &'static str,
    kind: &'static str,
    value: &str,
) -> Result<(), InputError> {
    if pattern.is_match(value) {
        Ok(())
    } else {
        Err(InputError::InvalidNumber {
            field,
            kind,
            value: value.to_string(),
        })
    }
}

fn check_decimal(field: &'static str, value: &str) -> Result<(), InputError> {
    check(&NON_NEGATIVE_DECIMAL, field, "decimal", value)
}

/// Validate an edit against the current session.
pub fn validate(session: &Session, edit: &Edit) -> Result<(), InputError> {
    match edit {
        Edit::LoopCount(v) => {
            check(&NON_NEGATIVE_INTEGER, "loop count", "integer", v)?;
            // digits past i64::MAX would coerce to not-a-number
            v.parse::<i64>()
                .map(|_| ())
                .map_err(|_| InputError::InvalidNumber {
                    field: "loop count",
                    kind: "integer",
                    value: v.clone(),
                })
        }
        Edit::OrePerChunk(v) => check_decimal("ore per chunk", v),
        Edit::PureFactor(v) => check_decimal("pure factor", v),
        Edit::ExtraFactor(v) => check_decimal("extra factor", v),
        Edit::OreMagnitude(ore, v) => {
            if !session.ores().get(*ore).enabled {
                return Err(InputError::FieldDisabled(*ore));
            }
            check_decimal("magnitude", v)
        }
        Edit::Mode(_) | Edit::OreEnabled(..) | Edit::Fortune(_) => Ok(()),
    }
}

/// Apply an edit to the session, checking it first unless validation is off.
pub fn apply(session: &mut Session, edit: &Edit, validation: Validation) -> Result<(), InputError> {
    if validation == Validation::Strict {
        if let Err(e) = validate(session, edit) {
            warn!(?edit, error = %e, "rejected edit");
            return Err(e);
        }
    }

    match edit {
        Edit::LoopCount(v) => session.set_loop_count(v),
        Edit::Mode(mode) => session.set_mode(*mode),
        Edit::OrePerChunk(v) => session.set_expected_ore_per_chunk(v),
        Edit::PureFactor(v) => session.set_pure_factor(v),
        Edit::ExtraFactor(v) => session.set_extra_factor(v),
        Edit::OreEnabled(ore, enabled) => session.set_ore_enabled(*ore, *enabled),
        Edit::OreMagnitude(ore, v) => session.set_ore_magnitude(*ore, v),
        Edit::Fortune(tier) => session.set_fortune_tier(*tier),
    }
    info!(?edit, recomputes = ?session.state().recomputes(), "applied edit");
    Ok(())
}
