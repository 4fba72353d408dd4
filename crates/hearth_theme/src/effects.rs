//! Effect-Flag Extractor
//!
//! Presentation effects (matrix rain, snowfall, ...) are requested either
//! through the typed [`EffectFlags`] on an element style or, for themes
//! written before the typed field existed, as pseudo-declarations mixed into
//! the element's raw style text:
//!
//! ```text
//! background-size: cover;
//! matrix-rain: true;
//! matrix-rain-speed: fast;
//! ```
//!
//! Both sources produce the same class list, e.g.
//! `effect-matrix-rain effect-matrix-rain-fast`.

use std::fmt;
use std::str::FromStr;

use nom::{
    branch::alt,
    bytes::complete::{tag, take_till, take_until, take_while1},
    character::complete::{anychar, char, line_ending, multispace1, one_of},
    combinator::{eof, map, opt, value},
    multi::{fold_many1, many0, many1},
    sequence::{delimited, pair, preceded},
    IResult,
};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::cascade::resolve;
use crate::element::ElementId;
use crate::model::{ColorMode, ThemeConfiguration};

/// Class name prefix for every effect
pub const EFFECT_CLASS_PREFIX: &str = "effect-";

/// Boolean effect flags, in output order
pub const BOOLEAN_FLAGS: [EffectFlag; 5] = [
    EffectFlag::MatrixRain,
    EffectFlag::Snowfall,
    EffectFlag::Starfield,
    EffectFlag::Aurora,
    EffectFlag::Scanlines,
];

/// A boolean presentation effect
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum EffectFlag {
    MatrixRain,
    Snowfall,
    Starfield,
    Aurora,
    Scanlines,
}

impl EffectFlag {
    /// Declaration name in raw style text
    pub fn key(self) -> &'static str {
        match self {
            Self::MatrixRain => "matrix-rain",
            Self::Snowfall => "snowfall",
            Self::Starfield => "starfield",
            Self::Aurora => "aurora",
            Self::Scanlines => "scanlines",
        }
    }

    pub fn class_name(self) -> String {
        format!("{EFFECT_CLASS_PREFIX}{}", self.key())
    }

    fn from_key(key: &str) -> Option<Self> {
        BOOLEAN_FLAGS.into_iter().find(|flag| flag.key() == key)
    }
}

/// Matrix rain animation speed
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RainSpeed {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl RainSpeed {
    pub fn key(self) -> &'static str {
        match self {
            Self::Slow => "slow",
            Self::Normal => "normal",
            Self::Fast => "fast",
        }
    }
}

impl fmt::Display for RainSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for RainSpeed {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "slow" => Ok(Self::Slow),
            "normal" => Ok(Self::Normal),
            "fast" => Ok(Self::Fast),
            _ => Err(()),
        }
    }
}

/// Typed effect toggles
///
/// Every field is optional: `None` inherits from the next cascade step,
/// `Some(false)` explicitly turns an inherited effect off.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct EffectFlags {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matrix_rain: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matrix_rain_speed: Option<RainSpeed>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snowfall: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starfield: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aurora: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scanlines: Option<bool>,
}

impl EffectFlags {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn get(&self, flag: EffectFlag) -> Option<bool> {
        match flag {
            EffectFlag::MatrixRain => self.matrix_rain,
            EffectFlag::Snowfall => self.snowfall,
            EffectFlag::Starfield => self.starfield,
            EffectFlag::Aurora => self.aurora,
            EffectFlag::Scanlines => self.scanlines,
        }
    }

    pub fn set(&mut self, flag: EffectFlag, enabled: bool) {
        let slot = match flag {
            EffectFlag::MatrixRain => &mut self.matrix_rain,
            EffectFlag::Snowfall => &mut self.snowfall,
            EffectFlag::Starfield => &mut self.starfield,
            EffectFlag::Aurora => &mut self.aurora,
            EffectFlag::Scanlines => &mut self.scanlines,
        };
        *slot = Some(enabled);
    }

    /// Whether `flag` is switched on
    pub fn is_enabled(&self, flag: EffectFlag) -> bool {
        self.get(flag).unwrap_or(false)
    }

    /// Merge another set of flags on top of this one
    ///
    /// Values set in `other` take precedence over values in `self`.
    pub fn merge(&self, other: &EffectFlags) -> EffectFlags {
        EffectFlags {
            matrix_rain: other.matrix_rain.or(self.matrix_rain),
            matrix_rain_speed: other.matrix_rain_speed.or(self.matrix_rain_speed),
            snowfall: other.snowfall.or(self.snowfall),
            starfield: other.starfield.or(self.starfield),
            aurora: other.aurora.or(self.aurora),
            scanlines: other.scanlines.or(self.scanlines),
        }
    }

    /// Presentation class names, in fixed order
    pub fn classes(&self) -> Vec<String> {
        let mut classes: Vec<String> = BOOLEAN_FLAGS
            .into_iter()
            .filter(|flag| self.is_enabled(*flag))
            .map(EffectFlag::class_name)
            .collect();

        if self.is_enabled(EffectFlag::MatrixRain) {
            match self.matrix_rain_speed {
                Some(speed @ (RainSpeed::Slow | RainSpeed::Fast)) => {
                    classes.push(format!("{EFFECT_CLASS_PREFIX}matrix-rain-{speed}"));
                }
                Some(RainSpeed::Normal) | None => {}
            }
        }
        classes
    }

    /// Space-joined class list (empty when no effect is on)
    pub fn class_string(&self) -> String {
        self.classes().join(" ")
    }
}

// ========== Declaration scanning ==========

/// Block comment `/* ... */`
fn comment(input: &str) -> IResult<&str, &str> {
    delimited(tag("/*"), take_until("*/"), tag("*/"))(input)
}

/// Whitespace and comments
fn ws(input: &str) -> IResult<&str, ()> {
    value((), many0(alt((value((), multispace1), value((), comment)))))(input)
}

fn property_name(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '-' || c == '_')(input)
}

/// Quoted string, without its quotes
fn quoted(input: &str) -> IResult<&str, &str> {
    alt((
        delimited(char('"'), take_till(|c: char| c == '"'), char('"')),
        delimited(char('\''), take_till(|c: char| c == '\''), char('\'')),
    ))(input)
}

/// One piece of a declaration value; quoted text may contain `;`
fn value_piece(input: &str) -> IResult<&str, &str> {
    alt((
        value(" ", comment),
        quoted,
        take_while1(|c: char| !matches!(c, ';' | '\n' | '"' | '\'' | '/')),
        tag("/"),
    ))(input)
}

/// Declaration value up to `;` or end of line, comments dropped
fn property_value(input: &str) -> IResult<&str, String> {
    let (input, text) = fold_many1(value_piece, String::new, |mut text, piece| {
        text.push_str(piece);
        text
    })(input)?;
    Ok((input, text.trim().to_string()))
}

/// A single declaration: `name: value;` (a newline also ends it)
fn declaration(input: &str) -> IResult<&str, (&str, String)> {
    let (input, name) = property_name(input)?;
    let (input, _) = ws(input)?;
    let (input, _) = char(':')(input)?;
    let (input, raw_value) = property_value(input)?;
    let (input, _) = alt((value((), char(';')), value((), line_ending), value((), eof)))(input)?;
    Ok((input, (name, raw_value)))
}

/// Skip text that is not a declaration, through its terminator
fn skip_segment(input: &str) -> IResult<&str, ()> {
    alt((
        value((), pair(many1(value_piece), opt(one_of(";\n")))),
        value((), anychar),
    ))(input)
}

/// Every well-formed declaration in `input`, in order
fn declarations(input: &str) -> IResult<&str, Vec<(&str, String)>> {
    let (input, found) = many0(preceded(
        ws,
        alt((map(declaration, Some), value(None, skip_segment))),
    ))(input)?;
    Ok((input, found.into_iter().flatten().collect()))
}

// ========== Extraction ==========

fn is_truthy(value: &str) -> bool {
    matches!(value, "true" | "on" | "yes" | "1")
}

/// Parse effect pseudo-declarations out of raw style text
///
/// Ordinary declarations, comments and anything unrecognized are ignored. A
/// later declaration of the same flag wins.
pub fn parse_effect_flags(raw: &str) -> EffectFlags {
    let mut flags = EffectFlags::default();
    let found = match declarations(raw) {
        Ok((_, found)) => found,
        Err(err) => {
            trace!("effect scan stopped: {}", err);
            Vec::new()
        }
    };

    for (name, raw_value) in found {
        let name = name.to_ascii_lowercase();
        let raw_value = raw_value.to_ascii_lowercase();

        if name == "matrix-rain-speed" {
            match raw_value.parse::<RainSpeed>() {
                Ok(speed) => flags.matrix_rain_speed = Some(speed),
                Err(()) => trace!("ignoring matrix-rain-speed value {:?}", raw_value),
            }
        } else if let Some(flag) = EffectFlag::from_key(&name) {
            flags.set(flag, is_truthy(&raw_value));
        }
    }

    flags
}

/// Derive presentation classes from raw style text
///
/// Returns a space-joined list such as `effect-matrix-rain effect-matrix-rain-fast`,
/// or an empty string when nothing is recognized.
pub fn extract_effect_classes(raw: &str) -> String {
    parse_effect_flags(raw).class_string()
}

/// Presentation classes for one element
///
/// Merges flags parsed from the element's resolved raw style text with its
/// resolved typed flags; typed flags take precedence where both are set.
pub fn effect_classes_for(id: ElementId, config: &ThemeConfiguration, mode: ColorMode) -> String {
    let resolved = resolve(id, config, mode);
    let parsed = resolved
        .custom_css
        .as_deref()
        .map(parse_effect_flags)
        .unwrap_or_default();
    parsed.merge(&resolved.animations).class_string()
}
