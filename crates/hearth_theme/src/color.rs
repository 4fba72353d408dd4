//! Color Compositor
//!
//! Combines a color value with an opacity fraction and produces a single
//! normalized color expression. Three notations are recognized:
//!
//! - Functional `rgba()`/`hsla()` (and `rgb()`/`hsl()`, promoted to their
//!   alpha-bearing form): only the alpha argument is rewritten; channel text
//!   is kept exactly as written.
//! - Hex `#rgb`, `#rrggbb`, `#rrggbbaa`: expanded to `rgba(r, g, b, a)`.
//! - Anything else (named colors, `var(...)`, `oklch(...)`):
//!   `color-mix(in srgb, <color> <pct>%, transparent)`.
//!
//! The opacity replaces any alpha already present in the input, so applying
//! two opacities in sequence yields the same result as applying the last one.
//! Malformed hex input is returned unchanged rather than guessed at.

use nom::{
    branch::alt,
    bytes::complete::{tag_no_case, take_until, take_while1},
    character::complete::{char, multispace0},
    combinator::all_consuming,
    sequence::{delimited, pair, preceded, terminated},
    IResult,
};
use tracing::trace;

/// An 8-bit RGB triple
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Apply an opacity fraction to a color expression
///
/// `opacity >= 1` (or NaN) returns the input unchanged; `opacity <= 0`
/// returns `transparent`.
pub fn apply_opacity(color: &str, opacity: f32) -> String {
    if opacity.is_nan() || opacity >= 1.0 {
        return color.to_string();
    }
    if opacity <= 0.0 {
        return "transparent".to_string();
    }

    let trimmed = color.trim();
    let alpha = format_number(opacity);

    if trimmed.starts_with('#') {
        return match parse_hex(trimmed) {
            Some(Rgb { r, g, b }) => format!("rgba({r}, {g}, {b}, {alpha})"),
            None => {
                trace!("apply_opacity: malformed hex {:?} passed through", trimmed);
                color.to_string()
            }
        };
    }

    if let Some(rewritten) = rewrite_functional_alpha(trimmed, &alpha) {
        return rewritten;
    }

    format!(
        "color-mix(in srgb, {} {}%, transparent)",
        trimmed,
        format_number(opacity * 100.0)
    )
}

/// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` into its color channels
///
/// Any alpha channel is discarded. Returns `None` for every other digit
/// count or for non-hex characters.
pub fn parse_hex(input: &str) -> Option<Rgb> {
    let (_, digits) = all_consuming(hex_digits)(input.trim()).ok()?;

    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match digits.len() {
        3 => {
            let expanded: String = digits.chars().flat_map(|c| [c, c]).collect();
            Some(Rgb {
                r: channel(&expanded[0..2])?,
                g: channel(&expanded[2..4])?,
                b: channel(&expanded[4..6])?,
            })
        }
        6 | 8 => Some(Rgb {
            r: channel(&digits[0..2])?,
            g: channel(&digits[2..4])?,
            b: channel(&digits[4..6])?,
        }),
        _ => None,
    }
}

/// Format a number for style output, trimming trailing zeros
///
/// `0.5` → `"0.5"`, `16.0` → `"16"`, `0.30000001` → `"0.3"`.
pub fn format_number(value: f32) -> String {
    let formatted = format!("{:.4}", value as f64);
    let trimmed = if formatted.contains('.') {
        formatted.trim_end_matches('0').trim_end_matches('.')
    } else {
        formatted.as_str()
    };
    match trimmed {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}

// ========== Parsers ==========

fn hex_digits(input: &str) -> IResult<&str, &str> {
    preceded(char('#'), take_while1(|c: char| c.is_ascii_hexdigit()))(input)
}

/// `rgb(` / `rgba(` / `hsl(` / `hsla(` followed by raw argument text
fn functional_color(input: &str) -> IResult<&str, (&str, &str)> {
    let (input, name) = alt((
        tag_no_case("rgba"),
        tag_no_case("hsla"),
        tag_no_case("rgb"),
        tag_no_case("hsl"),
    ))(input)?;
    let (input, args) = terminated(
        delimited(pair(multispace0, char('(')), take_until(")"), char(')')),
        multispace0,
    )(input)?;
    Ok((input, (name, args)))
}

fn rewrite_functional_alpha(color: &str, alpha: &str) -> Option<String> {
    let (_, (name, args)) = all_consuming(functional_color)(color).ok()?;
    let name = name.to_ascii_lowercase();
    // "rgb" / "hsl" without the alpha suffix
    let base = &name[..3];

    // Space-separated syntax: `rgb(60 179 113 / 50%)`
    if let Some((channels, _)) = args.rsplit_once('/') {
        return Some(format!("{name}({} / {alpha})", channels.trim()));
    }

    let parts = args.split(',').count();
    match parts {
        3 => Some(format!("{base}a({}, {alpha})", args.trim())),
        4 => {
            let (channels, _) = args.rsplit_once(',')?;
            Some(format!("{base}a({}, {alpha})", channels.trim()))
        }
        1 if args.split_whitespace().count() == 3 => {
            Some(format!("{name}({} / {alpha})", args.trim()))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_and_boundaries() {
        assert_eq!(apply_opacity("#3cb371", 1.0), "#3cb371");
        assert_eq!(apply_opacity("#3cb371", 1.5), "#3cb371");
        assert_eq!(apply_opacity("tomato", f32::NAN), "tomato");
        assert_eq!(apply_opacity("#3cb371", 0.0), "transparent");
        assert_eq!(apply_opacity("rgb(1, 2, 3)", -0.5), "transparent");
    }

    #[test]
    fn test_hex_notations() {
        assert_eq!(apply_opacity("#3cb371", 0.5), "rgba(60, 179, 113, 0.5)");
        assert_eq!(apply_opacity("#fff", 0.25), "rgba(255, 255, 255, 0.25)");
        assert_eq!(apply_opacity("#11223344", 0.5), "rgba(17, 34, 51, 0.5)");
        assert_eq!(apply_opacity("#ABCDEF", 0.1), "rgba(171, 205, 239, 0.1)");
    }

    #[test]
    fn test_hex_channels_preserved_across_range() {
        for step in 0..=64u32 {
            let r = (step * 4).min(255) as u8;
            let g = (255 - step * 3) as u8;
            let b = (step * 37 % 256) as u8;
            let hex = format!("#{r:02x}{g:02x}{b:02x}");

            for tenths in 1..10 {
                let opacity = tenths as f32 / 10.0;
                assert_eq!(
                    apply_opacity(&hex, opacity),
                    format!("rgba({r}, {g}, {b}, {})", format_number(opacity)),
                    "{hex} at {opacity}"
                );
            }
            assert_eq!(apply_opacity(&hex.to_uppercase(), 1.0), hex.to_uppercase());
        }
    }

    #[test]
    fn test_malformed_hex_passes_through() {
        assert_eq!(apply_opacity("#12345", 0.5), "#12345");
        assert_eq!(apply_opacity("#ggg", 0.5), "#ggg");
        assert_eq!(apply_opacity("#", 0.5), "#");
        assert_eq!(apply_opacity("#12345g", 0.5), "#12345g");
    }

    #[test]
    fn test_functional_notations() {
        assert_eq!(
            apply_opacity("rgba(10, 20, 30, 0.9)", 0.5),
            "rgba(10, 20, 30, 0.5)"
        );
        assert_eq!(apply_opacity("rgb(10, 20, 30)", 0.5), "rgba(10, 20, 30, 0.5)");
        assert_eq!(
            apply_opacity("hsl(120, 50%, 50%)", 0.75),
            "hsla(120, 50%, 50%, 0.75)"
        );
        assert_eq!(
            apply_opacity("HSLA(120,50%,50%,1)", 0.2),
            "hsla(120,50%,50%, 0.2)"
        );
        assert_eq!(
            apply_opacity("rgb(10 20 30 / 80%)", 0.5),
            "rgb(10 20 30 / 0.5)"
        );
        assert_eq!(apply_opacity("rgb(10 20 30)", 0.5), "rgb(10 20 30 / 0.5)");
    }

    #[test]
    fn test_other_notations_use_color_mix() {
        assert_eq!(
            apply_opacity("tomato", 0.5),
            "color-mix(in srgb, tomato 50%, transparent)"
        );
        assert_eq!(
            apply_opacity("var(--primary)", 0.25),
            "color-mix(in srgb, var(--primary) 25%, transparent)"
        );
        assert_eq!(
            apply_opacity("oklch(0.7 0.1 200)", 0.3),
            "color-mix(in srgb, oklch(0.7 0.1 200) 30%, transparent)"
        );
    }

    #[test]
    fn test_alpha_is_replaced_not_multiplied() {
        let once = apply_opacity("#3cb371", 0.5);
        let twice = apply_opacity(&apply_opacity("#3cb371", 0.3), 0.5);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("#000"), Some(Rgb { r: 0, g: 0, b: 0 }));
        assert_eq!(parse_hex(" #ff8000 "), Some(Rgb { r: 255, g: 128, b: 0 }));
        assert_eq!(parse_hex("#ff800080"), Some(Rgb { r: 255, g: 128, b: 0 }));
        assert_eq!(parse_hex("#ff80"), None);
        assert_eq!(parse_hex("ff8000"), None);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(16.0), "16");
        assert_eq!(format_number(0.3), "0.3");
        assert_eq!(format_number(0.125), "0.125");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(-12.5), "-12.5");
    }
}
