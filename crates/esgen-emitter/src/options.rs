//! Generation options and their per-call resolution.
//!
//! Callers hand the driver an [`Options`] value (usually
//! `Options::default()` or one built around [`FORMAT_MINIFY`]); the driver
//! resolves it once into a [`ResolvedOptions`] snapshot that the generator
//! reads for the rest of the call. Resolution applies the legacy
//! `indent`/`base` aliases, the compact override, and the JSON-mode
//! overrides, and derives the hard space used where a separator is
//! mandatory.

use once_cell::sync::Lazy;
use serde::Deserialize;

use esgen_ast::LiteralValue;

/// Reparse hook for raw-literal verification.
///
/// Given the `raw` text of a literal, returns the primitive value that text
/// parses to as a complete expression, or `None` when it does not parse to
/// a plain literal. The generator re-emits `raw` only when the returned
/// value equals the node's value.
pub type ParseCallback = fn(&str) -> Option<LiteralValue>;

/// String quoting preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quotes {
    /// Always single quotes.
    #[default]
    Single,
    /// Always double quotes.
    Double,
    /// Whichever quote needs fewer escapes; ties go to single.
    Auto,
}

/// Indentation shape: the per-level unit and how many levels the whole
/// output starts shifted by.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IndentOptions {
    /// One level of indentation.
    #[serde(default = "IndentOptions::default_style")]
    pub style: String,
    /// Indentation levels applied to every line of output.
    #[serde(default)]
    pub base: u32,
}

impl IndentOptions {
    fn default_style() -> String {
        "    ".to_string()
    }
}

impl Default for IndentOptions {
    fn default() -> Self {
        Self { style: Self::default_style(), base: 0 }
    }
}

/// Output formatting switches.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Format {
    pub indent: IndentOptions,
    /// Line separator.
    pub newline: String,
    /// The optional space: dropped entirely under `compact`.
    pub space: String,
    /// JSON-compatible output: double quotes, `\uHHHH` escapes for all
    /// controls, no hex numbers, no raw passthrough.
    pub json: bool,
    /// Rewrite numbers into their shortest equivalent form.
    pub renumber: bool,
    /// With `renumber`, allow `0x` notation for large integral values.
    pub hexadecimal: bool,
    pub quotes: Quotes,
    /// Pass printable and non-ASCII characters through unescaped.
    pub escapeless: bool,
    /// Drop all newlines, optional spaces, and indentation.
    pub compact: bool,
    /// Emit `()` after a zero-argument `new`.
    pub parentheses: bool,
    /// Emit semicolons even where automatic insertion would supply them.
    pub semicolons: bool,
    /// Frame the program so concatenated outputs cannot interfere.
    pub safe_concatenation: bool,
}

impl Default for Format {
    fn default() -> Self {
        Self {
            indent: IndentOptions::default(),
            newline: "\n".to_string(),
            space: " ".to_string(),
            json: false,
            renumber: false,
            hexadecimal: false,
            quotes: Quotes::Single,
            escapeless: false,
            compact: false,
            parentheses: true,
            semicolons: true,
            safe_concatenation: false,
        }
    }
}

impl Format {
    /// The smallest-output preset: compact layout, shortest numbers, cheap
    /// quotes, no optional parentheses or semicolons.
    pub fn minify() -> Self {
        Self {
            indent: IndentOptions { style: String::new(), base: 0 },
            renumber: true,
            hexadecimal: true,
            quotes: Quotes::Auto,
            escapeless: true,
            compact: true,
            parentheses: false,
            semicolons: false,
            ..Self::default()
        }
    }
}

/// Frozen copy of the default format.
pub static FORMAT_DEFAULTS: Lazy<Format> = Lazy::new(Format::default);

/// Frozen copy of the minification format.
pub static FORMAT_MINIFY: Lazy<Format> = Lazy::new(Format::minify);

/// Legacy whole-output base indent: a level count, or a literal prefix
/// string put in front of every line.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum IndentBase {
    Depth(u32),
    Literal(String),
}

/// Top-level generation options.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Legacy alias for `format.indent.style`; wins when set.
    pub indent: Option<String>,
    /// Legacy alias for `format.indent.base`; wins when set, and also
    /// accepts a literal prefix string.
    pub base: Option<IndentBase>,
    /// Reparse hook enabling raw-literal passthrough.
    #[serde(skip)]
    pub parse: Option<ParseCallback>,
    pub format: Format,
    /// Treat string expression statements in directive prologues as
    /// directives (parenthesizing them so they stay plain statements).
    pub directive: bool,
    /// Re-emit `raw` literal text when the reparse hook verifies it.
    pub raw: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            indent: None,
            base: None,
            parse: None,
            format: Format::default(),
            directive: false,
            raw: true,
        }
    }
}

impl Options {
    /// Options producing the smallest output.
    pub fn minify() -> Self {
        Self { format: Format::minify(), ..Self::default() }
    }
}

/// The per-call snapshot every generator method reads.
///
/// `space` is the hard space: the separator used where dropping it would
/// glue two tokens together. It stays a single space even when the
/// optional `opt_space` is empty.
#[derive(Debug, Clone)]
pub struct ResolvedOptions {
    pub indent_unit: String,
    pub base_indent: String,
    pub newline: String,
    pub opt_space: String,
    pub space: String,
    pub json: bool,
    pub renumber: bool,
    pub hexadecimal: bool,
    pub quotes: Quotes,
    pub escapeless: bool,
    pub parentheses: bool,
    pub semicolons: bool,
    pub safe_concatenation: bool,
    pub directive: bool,
    pub raw: bool,
    pub parse: Option<ParseCallback>,
}

impl ResolvedOptions {
    pub fn resolve(options: &Options) -> Self {
        let format = &options.format;

        let mut indent_unit = match &options.indent {
            Some(style) => style.clone(),
            None => format.indent.style.clone(),
        };
        let mut base_indent = match &options.base {
            Some(IndentBase::Literal(prefix)) => prefix.clone(),
            Some(IndentBase::Depth(depth)) => indent_unit.repeat(*depth as usize),
            None => indent_unit.repeat(format.indent.base as usize),
        };

        let mut newline = format.newline.clone();
        let mut opt_space = format.space.clone();
        if format.compact {
            newline = String::new();
            opt_space = String::new();
            indent_unit = String::new();
            base_indent = String::new();
        }
        let space = if opt_space.is_empty() { " ".to_string() } else { opt_space.clone() };

        Self {
            indent_unit,
            base_indent,
            newline,
            opt_space,
            space,
            json: format.json,
            renumber: format.renumber,
            hexadecimal: if format.json { false } else { format.hexadecimal },
            quotes: if format.json { Quotes::Double } else { format.quotes },
            escapeless: format.escapeless,
            parentheses: format.parentheses,
            semicolons: format.semicolons,
            safe_concatenation: format.safe_concatenation,
            directive: options.directive,
            raw: options.raw,
            parse: if format.json { None } else { options.parse },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_format_matches_documented_defaults() {
        let format = Format::default();
        assert_eq!(format.indent.style, "    ");
        assert_eq!(format.indent.base, 0);
        assert_eq!(format.newline, "\n");
        assert_eq!(format.space, " ");
        assert_eq!(format.quotes, Quotes::Single);
        assert!(format.parentheses);
        assert!(format.semicolons);
        assert!(!format.compact);
    }

    #[test]
    fn minify_preset_flips_the_size_switches() {
        let format = Format::minify();
        assert!(format.compact);
        assert!(format.renumber);
        assert!(format.hexadecimal);
        assert!(format.escapeless);
        assert!(!format.parentheses);
        assert!(!format.semicolons);
        assert_eq!(format.quotes, Quotes::Auto);
        assert_eq!(*FORMAT_MINIFY, format);
    }

    #[test]
    fn compact_clears_layout_but_keeps_hard_space() {
        let resolved = ResolvedOptions::resolve(&Options::minify());
        assert_eq!(resolved.newline, "");
        assert_eq!(resolved.opt_space, "");
        assert_eq!(resolved.indent_unit, "");
        assert_eq!(resolved.base_indent, "");
        assert_eq!(resolved.space, " ");
    }

    #[test]
    fn legacy_indent_alias_overrides_format_style() {
        let options = Options { indent: Some("\t".to_string()), ..Options::default() };
        let resolved = ResolvedOptions::resolve(&options);
        assert_eq!(resolved.indent_unit, "\t");
    }

    #[test]
    fn legacy_base_accepts_depth_and_literal() {
        let depth = Options { base: Some(IndentBase::Depth(2)), ..Options::default() };
        assert_eq!(ResolvedOptions::resolve(&depth).base_indent, "        ");

        let literal = Options {
            base: Some(IndentBase::Literal("  ".to_string())),
            ..Options::default()
        };
        assert_eq!(ResolvedOptions::resolve(&literal).base_indent, "  ");
    }

    #[test]
    fn json_mode_forces_double_quotes_and_disables_hex_and_raw() {
        fn reject(_: &str) -> Option<LiteralValue> {
            None
        }
        let options = Options {
            parse: Some(reject),
            format: Format {
                json: true,
                hexadecimal: true,
                quotes: Quotes::Single,
                ..Format::default()
            },
            ..Options::default()
        };
        let resolved = ResolvedOptions::resolve(&options);
        assert_eq!(resolved.quotes, Quotes::Double);
        assert!(!resolved.hexadecimal);
        assert!(resolved.parse.is_none());
    }

    #[test]
    fn options_deserialize_from_json_config() {
        let options: Options = serde_json::from_str(
            r#"{
                "format": {
                    "indent": {"style": "  "},
                    "quotes": "double",
                    "semicolons": false
                },
                "directive": true
            }"#,
        )
        .unwrap();
        assert_eq!(options.format.indent.style, "  ");
        assert_eq!(options.format.quotes, Quotes::Double);
        assert!(!options.format.semicolons);
        assert!(options.directive);
        assert!(options.raw);
    }

    #[test]
    fn base_depth_uses_resolved_indent_unit() {
        let options = Options {
            indent: Some("\t".to_string()),
            base: Some(IndentBase::Depth(3)),
            ..Options::default()
        };
        assert_eq!(ResolvedOptions::resolve(&options).base_indent, "\t\t\t");
    }
}
