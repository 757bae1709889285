//! Literal token serialization.
//!
//! Numbers reproduce ECMAScript `Number::toString` (positional inside
//! [1e-6, 1e21), exponential outside) and, under `renumber`, are folded
//! into the shortest form that reparses to the identical value. Strings
//! pick the cheaper quote, escape per mode, and never let a line
//! terminator or backslash through raw. Regular expressions are rebuilt
//! from their parsed parts with `/` kept safe outside character classes.

use esgen_ast::{Literal, LiteralValue};

use super::Generator;
use super::helpers::is_line_terminator;
use crate::error::{CodegenError, Result};
use crate::options::{ParseCallback, Quotes};

impl Generator {
    // =========================================================================
    // Literals
    // =========================================================================

    pub(super) fn emit_literal(&mut self, literal: &Literal) -> Result<String> {
        // Raw passthrough runs first: verified raw text wins even where
        // normal serialization would refuse the value.
        if self.opts.raw
            && let Some(parse) = self.opts.parse
            && let Some(raw) = &literal.raw
            && raw_reparses_equal(parse, raw, &literal.value)
        {
            return Ok(raw.clone());
        }

        match &literal.value {
            LiteralValue::Null => Ok("null".to_string()),
            LiteralValue::Boolean(true) => Ok("true".to_string()),
            LiteralValue::Boolean(false) => Ok("false".to_string()),
            LiteralValue::String(value) => Ok(self.escape_string(value)),
            LiteralValue::Number(value) => self.emit_number(*value),
            LiteralValue::Regex { pattern, flags } => Ok(emit_regex(pattern, flags)),
        }
    }

    // =========================================================================
    // Numbers
    // =========================================================================

    pub(super) fn emit_number(&self, value: f64) -> Result<String> {
        if value.is_nan() {
            return Err(CodegenError::NanLiteral);
        }
        if value < 0.0 || (value == 0.0 && value.is_sign_negative()) {
            return Err(CodegenError::NegativeLiteral { value });
        }
        if value.is_infinite() {
            let rendered = if self.opts.json {
                "null"
            } else if self.opts.renumber {
                "1e400"
            } else {
                "1e+400"
            };
            return Ok(rendered.to_string());
        }

        let result = js_number_to_string(value);
        if !self.opts.renumber || result.len() < 3 {
            return Ok(result);
        }
        Ok(self.renumber(result, value))
    }

    /// Fold `canonical` (the `toString` form) into the shortest candidate
    /// that reparses to `value`: drop the leading zero of a fraction, move
    /// trailing zeros into the exponent, rewrite `e+` as `e`, and try `0x`
    /// notation for large integral values.
    fn renumber(&self, canonical: String, value: f64) -> String {
        let mut result = canonical;
        let mut point = result.find('.').map_or(-1, |p| p as i32);
        if !self.opts.json && result.starts_with('0') && point == 1 {
            point = 0;
            result.remove(0);
        }

        let mut temp = result.clone();
        result = result.replacen("e+", "e", 1);

        let mut exponent: i32 = 0;
        if let Some(pos) = temp.find('e')
            && pos > 0
        {
            exponent = temp[pos + 1..].parse().unwrap_or(0);
            temp.truncate(pos);
        }

        if point >= 0 {
            exponent -= temp.len() as i32 - point - 1;
            let digits: String = temp.chars().filter(|&c| c != '.').collect();
            temp = match digits.parse::<f64>() {
                Ok(folded) => js_number_to_string(folded),
                Err(_) => digits,
            };
        }

        let stripped_len = temp.trim_end_matches('0').len();
        let removed = temp.len() - stripped_len;
        if removed > 0 {
            exponent += removed as i32;
            temp.truncate(stripped_len);
        }

        if exponent != 0 {
            temp.push('e');
            temp.push_str(&exponent.to_string());
        }

        let accepted = if temp.len() < result.len() {
            reparses_to_value(&temp, value)
        } else if self.opts.hexadecimal
            && value > 1e12
            && value.floor() == value
            && value <= u64::MAX as f64
        {
            temp = format!("0x{:x}", value as u64);
            temp.len() < result.len() && reparses_to_value(&temp, value)
        } else {
            false
        };

        if accepted { temp } else { result }
    }

    // =========================================================================
    // Strings
    // =========================================================================

    pub(super) fn escape_string(&self, value: &str) -> String {
        let bytes = value.as_bytes();
        let single_quotes = memchr::memchr_iter(b'\'', bytes).count();
        let double_quotes = memchr::memchr_iter(b'"', bytes).count();

        let single = !(self.opts.quotes == Quotes::Double
            || (self.opts.quotes == Quotes::Auto && double_quotes < single_quotes));
        let quote = if single { '\'' } else { '"' };

        let mut result = String::with_capacity(value.len() + 2);
        result.push(quote);

        let mut chars = value.chars().peekable();
        while let Some(ch) = chars.next() {
            let code = ch as u32;
            if ch == quote {
                result.push('\\');
                result.push(ch);
            } else if ch == '/' && self.opts.json {
                result.push_str("\\/");
            } else if is_line_terminator(ch) || ch == '\\' {
                result.push_str(escape_disallowed_character(ch));
            } else if (self.opts.json && code < 0x20)
                || !(self.opts.json || self.opts.escapeless || (0x20..=0x7E).contains(&code))
            {
                let next_is_digit = chars.peek().is_some_and(char::is_ascii_digit);
                escape_allowed_character(&mut result, ch, next_is_digit, self.opts.json);
            } else {
                result.push(ch);
            }
        }

        result.push(quote);
        result
    }

    /// Quote a directive-prologue string without touching its body: the
    /// raw text is already escaped source, so only the quote choice reacts
    /// to embedded quotes.
    pub(super) fn escape_directive(&self, directive: &str) -> String {
        let mut quote = if self.opts.quotes == Quotes::Double { '"' } else { '\'' };

        let mut chars = directive.chars();
        while let Some(ch) = chars.next() {
            match ch {
                '\'' => {
                    quote = '"';
                    break;
                }
                '"' => {
                    quote = '\'';
                    break;
                }
                '\\' => {
                    chars.next();
                }
                _ => {}
            }
        }

        format!("{quote}{directive}{quote}")
    }
}

/// ECMAScript `Number::toString(10)` for a non-negative finite double:
/// shortest round-trip digits, positional for magnitudes in [1e-6, 1e21),
/// exponential with an explicit `+` for large magnitudes.
pub(super) fn js_number_to_string(value: f64) -> String {
    let formatted = format!("{value:e}");
    let Some((mantissa, exponent)) = formatted.split_once('e') else {
        return formatted;
    };
    let digits: String = mantissa.chars().filter(|&c| c != '.').collect();
    let Ok(exp) = exponent.parse::<i32>() else {
        return formatted;
    };

    // With value = digits * 10^(n - k): k significant digits, decimal
    // point after position n.
    let k = digits.len() as i32;
    let n = exp + 1;

    if k <= n && n <= 21 {
        let zeros = "0".repeat((n - k) as usize);
        format!("{digits}{zeros}")
    } else if 0 < n && n <= 21 {
        let split = n as usize;
        format!("{}.{}", &digits[..split], &digits[split..])
    } else if -6 < n && n <= 0 {
        let zeros = "0".repeat((-n) as usize);
        format!("0.{zeros}{digits}")
    } else {
        let exp_value = n - 1;
        let mantissa = if k == 1 {
            digits
        } else {
            format!("{}.{}", &digits[..1], &digits[1..])
        };
        if exp_value >= 0 {
            format!("{mantissa}e+{exp_value}")
        } else {
            format!("{mantissa}e{exp_value}")
        }
    }
}

/// True when the raw token parses back to the node's exact primitive
/// value. Regex values never verify: there is no primitive equality for
/// them, and the raw text may predate flag normalization.
fn raw_reparses_equal(parse: ParseCallback, raw: &str, value: &LiteralValue) -> bool {
    if matches!(value, LiteralValue::Regex { .. }) {
        return false;
    }
    match parse(raw) {
        Some(LiteralValue::Regex { .. }) | None => false,
        Some(reparsed) => reparsed == *value,
    }
}

/// Reparse a renumber candidate (`123`, `1e-6`, `12e3`, `0x1f`) and
/// compare against the source value.
fn reparses_to_value(text: &str, value: f64) -> bool {
    let reparsed = if let Some(hex) = text.strip_prefix("0x") {
        u64::from_str_radix(hex, 16).ok().map(|v| v as f64)
    } else {
        text.parse::<f64>().ok()
    };
    reparsed == Some(value)
}

/// Characters that may never appear raw inside a string literal.
fn escape_disallowed_character(ch: char) -> &'static str {
    match ch {
        '\\' => "\\\\",
        '\n' => "\\n",
        '\r' => "\\r",
        '\u{2028}' => "\\u2028",
        '\u{2029}' => "\\u2029",
        _ => unreachable!("incorrectly classified character"),
    }
}

/// Characters escaped only under the active mode. Astral characters emit
/// one `\uHHHH` per UTF-16 surrogate half.
fn escape_allowed_character(out: &mut String, ch: char, next_is_digit: bool, json: bool) {
    use std::fmt::Write;

    let code = ch as u32;
    match ch {
        '\u{8}' => out.push_str("\\b"),
        '\u{C}' => out.push_str("\\f"),
        '\t' => out.push_str("\\t"),
        _ if json || code > 0xFF => {
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                let _ = write!(out, "\\u{unit:04X}");
            }
        }
        '\0' if !next_is_digit => out.push_str("\\0"),
        _ => {
            let _ = write!(out, "\\x{code:02X}");
        }
    }
}

/// Rebuild `/pattern/flags`, escaping unescaped `/` outside character
/// classes and the characters a literal can never contain raw. An empty
/// pattern renders `(?:)` so the token cannot collapse into a line
/// comment.
pub(super) fn emit_regex(pattern: &str, flags: &str) -> String {
    if pattern.is_empty() {
        return format!("/(?:)/{flags}");
    }

    let mut result = String::with_capacity(pattern.len() + flags.len() + 2);
    result.push('/');

    let mut in_brackets = false;
    let mut previous_backslash = false;
    for ch in pattern.chars() {
        if previous_backslash {
            push_regex_character(&mut result, ch, true);
            previous_backslash = false;
            continue;
        }
        if in_brackets {
            if ch == ']' {
                in_brackets = false;
            }
        } else if ch == '/' {
            result.push('\\');
        } else if ch == '[' {
            in_brackets = true;
        }
        push_regex_character(&mut result, ch, false);
        previous_backslash = ch == '\\';
    }

    result.push('/');
    result.push_str(flags);
    result
}

fn push_regex_character(out: &mut String, ch: char, previous_backslash: bool) {
    match ch {
        '\u{2028}' | '\u{2029}' => {
            if !previous_backslash {
                out.push('\\');
            }
            out.push('u');
            out.push_str(if ch == '\u{2028}' { "2028" } else { "2029" });
        }
        '\n' | '\r' => {
            if !previous_backslash {
                out.push('\\');
            }
            out.push(if ch == '\n' { 'n' } else { 'r' });
        }
        _ => out.push(ch),
    }
}
