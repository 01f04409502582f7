use std::fmt;

use super::{PatternError, Token, tokenize};

const DIGIT_CHARS: &str = "#0,.";

/// Compiled number pattern, e.g. `#,##0.00` or `#################0.`.
///
/// Supports literal prefix and suffix, `0`/`#` integer and fraction digits,
/// `,` grouping, an optional negative sub-pattern after `;` and `%`.
/// Output always uses `.` as decimal separator and `,` for grouping.
/// Fractions are rounded half-to-even on the shortest decimal digits that
/// round-trip to the input; the exact binary value only settles a tie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberPattern {
    pattern: String,
    positive_prefix: String,
    positive_suffix: String,
    negative_prefix: String,
    negative_suffix: String,
    min_int_digits: usize,
    grouping_size: usize,
    min_frac_digits: usize,
    max_frac_digits: usize,
    always_show_separator: bool,
    multiplier: u32,
}

struct Affixes {
    prefix: String,
    suffix: String,
    percent: bool,
}

impl NumberPattern {
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        let (positive, negative) = split_subpatterns(pattern);
        let tokens = tokenize(positive, |c| DIGIT_CHARS.contains(c))?;

        let body_start = tokens
            .iter()
            .position(|t| matches!(t, Token::Run(..)))
            .ok_or_else(|| PatternError::new("pattern has no digits"))?;
        let body_end = tokens
            .iter()
            .rposition(|t| matches!(t, Token::Run(..)))
            .map_or(body_start, |i| i + 1);

        let prefix = affix(&tokens[..body_start])?;
        let suffix = affix(&tokens[body_end..])?;

        let mut body = String::new();
        for token in &tokens[body_start..body_end] {
            match token {
                Token::Run(c, count) => body.extend(std::iter::repeat_n(*c, *count)),
                _ => return Err(PatternError::new("literal inside the digit section")),
            }
        }

        let (int_part, frac_part) = match body.split_once('.') {
            Some((_, frac)) if frac.contains('.') => {
                return Err(PatternError::new("multiple decimal separators"));
            }
            Some((int, frac)) => (int, Some(frac)),
            None => (body.as_str(), None),
        };

        let int_digits: String = int_part.chars().filter(|c| *c != ',').collect();
        if int_digits.contains("0#") {
            return Err(PatternError::new("'#' after '0' in the integer part"));
        }
        let grouping_size = match int_part.rfind(',') {
            Some(pos) => int_part.len() - pos - 1,
            None => 0,
        };
        if int_part.ends_with(',') {
            return Err(PatternError::new("grouping separator without digits"));
        }

        let frac_digits = frac_part.unwrap_or("");
        if frac_digits.contains(',') {
            return Err(PatternError::new("grouping separator in the fraction part"));
        }
        if frac_digits.contains("#0") {
            return Err(PatternError::new("'0' after '#' in the fraction part"));
        }

        let min_int_digits = int_digits.chars().filter(|c| *c == '0').count();
        let min_frac_digits = frac_digits.chars().filter(|c| *c == '0').count();
        let max_frac_digits = frac_digits.len();
        let always_show_separator =
            frac_part.is_some() && (int_digits.is_empty() || max_frac_digits == 0);

        let positive_affixes = Affixes {
            prefix: prefix.text,
            suffix: suffix.text,
            percent: prefix.percent || suffix.percent,
        };
        let negative_affixes = match negative {
            Some(negative) => negative_affixes(negative)?,
            None => Affixes {
                prefix: format!("-{}", positive_affixes.prefix),
                suffix: positive_affixes.suffix.clone(),
                percent: false,
            },
        };

        Ok(Self {
            pattern: pattern.to_string(),
            multiplier: if positive_affixes.percent || negative_affixes.percent {
                100
            } else {
                1
            },
            positive_prefix: positive_affixes.prefix,
            positive_suffix: positive_affixes.suffix,
            negative_prefix: negative_affixes.prefix,
            negative_suffix: negative_affixes.suffix,
            min_int_digits,
            grouping_size,
            min_frac_digits,
            max_frac_digits,
            always_show_separator,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Render a floating-point value; a negative sign (including `-0.0`)
    /// is kept even when the digits round to zero.
    pub fn format_f64(&self, value: f64) -> Result<String, String> {
        if !value.is_finite() {
            return Err(format!("{value} is not a finite number"));
        }
        let negative = value.is_sign_negative();
        let scaled = value.abs() * f64::from(self.multiplier);
        if !scaled.is_finite() {
            return Err(format!("{value} overflows when scaled by {}", self.multiplier));
        }
        let (int_digits, frac_digits) = decimal_digits(scaled, self.max_frac_digits);
        Ok(self.assemble(negative, &int_digits, &frac_digits))
    }

    /// Render an integer exactly.
    pub fn format_i64(&self, value: i64) -> String {
        let scaled = i128::from(value) * i128::from(self.multiplier);
        let digits = scaled.unsigned_abs().to_string();
        self.assemble(scaled < 0, &digits, "")
    }

    fn assemble(&self, negative: bool, int_digits: &str, frac_digits: &str) -> String {
        let int_digits = int_digits.trim_start_matches('0');
        let int_digits = if int_digits.len() < self.min_int_digits {
            format!(
                "{}{int_digits}",
                "0".repeat(self.min_int_digits - int_digits.len())
            )
        } else {
            int_digits.to_string()
        };

        let mut frac = frac_digits.trim_end_matches('0').to_string();
        while frac.len() < self.min_frac_digits {
            frac.push('0');
        }

        let mut number = group_digits(&int_digits, self.grouping_size);
        if number.is_empty() && frac.is_empty() {
            number.push('0');
        }
        if !frac.is_empty() || self.always_show_separator {
            number.push('.');
            number.push_str(&frac);
        }

        let (prefix, suffix) = if negative {
            (&self.negative_prefix, &self.negative_suffix)
        } else {
            (&self.positive_prefix, &self.positive_suffix)
        };
        format!("{prefix}{number}{suffix}")
    }
}

impl fmt::Display for NumberPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

struct Affix {
    text: String,
    percent: bool,
}

fn affix(tokens: &[Token]) -> Result<Affix, PatternError> {
    let mut text = String::new();
    let mut percent = false;
    for token in tokens {
        match token {
            Token::Literal(literal) => {
                for c in literal.chars() {
                    match c {
                        '%' => percent = true,
                        'E' | '\u{2030}' | '\u{00A4}' => {
                            return Err(PatternError::new(format!(
                                "special character '{c}' is not supported"
                            )));
                        }
                        _ => {}
                    }
                    text.push(c);
                }
            }
            Token::Quoted(literal) => text.push_str(literal),
            Token::Run(..) => return Err(PatternError::new("digits inside prefix or suffix")),
        }
    }
    Ok(Affix {
        text,
        percent,
    })
}

fn negative_affixes(pattern: &str) -> Result<Affixes, PatternError> {
    let tokens = tokenize(pattern, |c| DIGIT_CHARS.contains(c))?;
    let body_start = tokens
        .iter()
        .position(|t| matches!(t, Token::Run(..)))
        .unwrap_or(tokens.len());
    let body_end = tokens
        .iter()
        .rposition(|t| matches!(t, Token::Run(..)))
        .map_or(body_start, |i| i + 1);
    let prefix = affix(&tokens[..body_start])?;
    let suffix = affix(&tokens[body_end..])?;
    Ok(Affixes {
        prefix: prefix.text,
        suffix: suffix.text,
        percent: prefix.percent || suffix.percent,
    })
}

/// Split at the first `;` outside quotes.
fn split_subpatterns(pattern: &str) -> (&str, Option<&str>) {
    let mut quoted = false;
    for (i, c) in pattern.char_indices() {
        match c {
            '\'' => quoted = !quoted,
            ';' if !quoted => return (&pattern[..i], Some(&pattern[i + 1..])),
            _ => {}
        }
    }
    (pattern, None)
}

/// Integer and fraction digits of a non-negative finite `value`, rounded
/// half-to-even to at most `frac` fraction digits.
fn decimal_digits(value: f64, frac: usize) -> (String, String) {
    if value == 0.0 {
        return (String::new(), String::new());
    }

    // Shortest round-trip digits d1d2d3... with the value 0.d1d2d3... * 10^point.
    let sci = format!("{value:e}");
    let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let mut digits: Vec<u8> = mantissa.bytes().filter(u8::is_ascii_digit).collect();
    let mut point = exponent.parse::<i64>().unwrap_or(0) + 1;
    let keep = point + frac as i64;

    if keep < digits.len() as i64 {
        if keep < 0 {
            return (String::new(), String::new());
        }
        let keep = keep as usize;
        let next = digits[keep];
        if next == b'5' && keep + 1 == digits.len() {
            let exact = format!("{value:.frac$}");
            let (int, fraction) = exact.split_once('.').unwrap_or((exact.as_str(), ""));
            return (int.to_string(), fraction.to_string());
        }
        digits.truncate(keep);
        // Shortest digits carry no trailing zeros, so a '5' here is above the tie.
        if next >= b'5' && increment(&mut digits) {
            point += 1;
        }
    }

    let text: String = digits.iter().map(|&d| char::from(d)).collect();
    if point <= 0 {
        let zeros = "0".repeat(point.unsigned_abs() as usize);
        (String::new(), format!("{zeros}{text}"))
    } else {
        let point = point as usize;
        if text.len() <= point {
            (format!("{text}{}", "0".repeat(point - text.len())), String::new())
        } else {
            let (int, fraction) = text.split_at(point);
            (int.to_string(), fraction.to_string())
        }
    }
}

/// Add one unit in the last place; returns `true` when a new leading digit
/// was needed.
fn increment(digits: &mut Vec<u8>) -> bool {
    for d in digits.iter_mut().rev() {
        if *d == b'9' {
            *d = b'0';
        } else {
            *d += 1;
            return false;
        }
    }
    digits.insert(0, b'1');
    true
}

fn group_digits(digits: &str, size: usize) -> String {
    if size == 0 || digits.len() <= size {
        return digits.to_string();
    }
    let mut out = String::with_capacity(digits.len() + digits.len() / size);
    let lead = digits.len() % size;
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (i + size - lead) % size == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grouping_inserts_separators_from_the_right() {
        assert_eq!(group_digits("1234567", 3), "1,234,567");
        assert_eq!(group_digits("123456", 3), "123,456");
        assert_eq!(group_digits("12", 3), "12");
        assert_eq!(group_digits("123456", 0), "123456");
        assert_eq!(group_digits("12345", 4), "1,2345");
    }

    #[test]
    fn decimal_digits_round_shortest_representation() {
        let pair = |v: f64, frac: usize| {
            let (i, f) = decimal_digits(v, frac);
            format!("{i}|{f}")
        };
        assert_eq!(pair(12.5, 2), "12|5");
        assert_eq!(pair(1e20, 0), "100000000000000000000|");
        assert_eq!(pair(0.006, 2), "|01");
        assert_eq!(pair(0.004, 2), "|00");
        assert_eq!(pair(0.0004, 2), "|");
        assert_eq!(pair(9.996, 2), "10|00");
        assert_eq!(pair(0.1, 18), "|1");
    }

    #[test]
    fn split_ignores_quoted_semicolons() {
        assert_eq!(split_subpatterns("0.00;(0.00)"), ("0.00", Some("(0.00)")));
        assert_eq!(split_subpatterns("'a;b'0"), ("'a;b'0", None));
    }
}
