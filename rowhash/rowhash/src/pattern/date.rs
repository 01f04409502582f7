use std::fmt::{self, Write as _};

use chrono::{
    Datelike, NaiveDateTime, Timelike,
    format::{Fixed, Item, Numeric, Pad},
};

use super::{PatternError, Token, tokenize};

#[derive(Debug, Clone, PartialEq, Eq)]
enum DateItem {
    Chrono(Item<'static>),
    /// Numeric field zero-padded to the letter count.
    Padded(DateField, usize),
    /// `G`: `AD` or `BC`.
    Era,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateField {
    /// Year of era, as `y` renders it.
    Year,
    WeekYear,
    /// `YY`: two-digit week year.
    WeekYearShort,
    Month,
    Day,
    DayOfYear,
    WeekOfYear,
    WeekOfMonth,
    /// `F`: 1 for days 1-7, 2 for days 8-14, ...
    DayOfWeekInMonth,
    /// `u`: 1 = Monday .. 7 = Sunday.
    DayOfWeek,
    Hour0To23,
    /// `k`: 1-24.
    Hour1To24,
    /// `K`: 0-11.
    Hour0To11,
    Hour1To12,
    Minute,
    Second,
    Millisecond,
}

/// Compiled date pattern, e.g. `yyyy-MM-dd HH:mm:ss`.
///
/// Numeric letters are zero-padded to the repetition count; `MMM`/`EEE` give
/// short English names and four or more letters the full names. Weeks start
/// on Sunday and week 1 is the week containing January 1. Values are
/// zone-less, so time-zone letters are rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePattern {
    pattern: String,
    items: Vec<DateItem>,
}

impl DatePattern {
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        let tokens = tokenize(pattern, |c| c.is_ascii_alphabetic())?;
        let mut items = Vec::with_capacity(tokens.len());

        for token in tokens {
            let item = match token {
                Token::Literal(text) | Token::Quoted(text) => {
                    DateItem::Chrono(Item::OwnedLiteral(text.into_boxed_str()))
                }
                Token::Run(letter, count) => date_item(letter, count)?,
            };
            items.push(item);
        }

        Ok(Self {
            pattern: pattern.to_string(),
            items,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    pub fn format(&self, value: &NaiveDateTime) -> String {
        let mut out = String::with_capacity(self.pattern.len() + 8);
        for item in &self.items {
            // Writing into a String cannot fail.
            let _ = write_item(&mut out, item, value);
        }
        out
    }
}

impl fmt::Display for DatePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

fn date_item(letter: char, count: usize) -> Result<DateItem, PatternError> {
    use DateField::*;

    let fixed = |f: Fixed| DateItem::Chrono(Item::Fixed(f));
    Ok(match letter {
        'G' => DateItem::Era,
        'y' if count == 2 => DateItem::Chrono(Item::Numeric(Numeric::YearMod100, Pad::Zero)),
        'y' => DateItem::Padded(Year, count),
        'Y' if count == 2 => DateItem::Padded(WeekYearShort, 2),
        'Y' => DateItem::Padded(WeekYear, count),
        'M' | 'L' => match count {
            1 | 2 => two_digit(Numeric::Month, Month, count),
            3 => fixed(Fixed::ShortMonthName),
            _ => fixed(Fixed::LongMonthName),
        },
        'w' => DateItem::Padded(WeekOfYear, count),
        'W' => DateItem::Padded(WeekOfMonth, count),
        'D' => match count {
            1 => DateItem::Chrono(Item::Numeric(Numeric::Ordinal, Pad::None)),
            3 => DateItem::Chrono(Item::Numeric(Numeric::Ordinal, Pad::Zero)),
            _ => DateItem::Padded(DayOfYear, count),
        },
        'd' => two_digit(Numeric::Day, Day, count),
        'F' => DateItem::Padded(DayOfWeekInMonth, count),
        'E' if count <= 3 => fixed(Fixed::ShortWeekdayName),
        'E' => fixed(Fixed::LongWeekdayName),
        'u' if count == 1 => DateItem::Chrono(Item::Numeric(Numeric::WeekdayFromMon, Pad::None)),
        'u' => DateItem::Padded(DayOfWeek, count),
        'a' => fixed(Fixed::UpperAmPm),
        'H' => two_digit(Numeric::Hour, Hour0To23, count),
        'k' => DateItem::Padded(Hour1To24, count),
        'K' => DateItem::Padded(Hour0To11, count),
        'h' => two_digit(Numeric::Hour12, Hour1To12, count),
        'm' => two_digit(Numeric::Minute, Minute, count),
        's' => two_digit(Numeric::Second, Second, count),
        'S' => DateItem::Padded(Millisecond, count),
        'z' | 'Z' | 'X' => {
            return Err(PatternError::new(format!(
                "time zone letter '{letter}' is not supported for zone-less dates"
            )));
        }
        other => {
            return Err(PatternError::new(format!(
                "unsupported pattern letter '{other}'"
            )));
        }
    })
}

/// chrono renders two-digit fields unpadded or zero-padded to width 2; wider
/// counts are padded here.
fn two_digit(numeric: Numeric, field: DateField, count: usize) -> DateItem {
    match count {
        1 => DateItem::Chrono(Item::Numeric(numeric, Pad::None)),
        2 => DateItem::Chrono(Item::Numeric(numeric, Pad::Zero)),
        _ => DateItem::Padded(field, count),
    }
}

fn write_item(out: &mut String, item: &DateItem, value: &NaiveDateTime) -> fmt::Result {
    match item {
        DateItem::Chrono(item) => write!(out, "{}", value.format_with_items(std::iter::once(item))),
        DateItem::Padded(field, width) => write_padded(out, field_value(*field, value), *width),
        DateItem::Era => out.write_str(if value.year_ce().0 { "AD" } else { "BC" }),
    }
}

fn field_value(field: DateField, value: &NaiveDateTime) -> i64 {
    let hour = value.hour();
    let n = match field {
        DateField::Year => value.year_ce().1,
        DateField::WeekYear => return i64::from(week_of_year(value).0),
        DateField::WeekYearShort => return i64::from(week_of_year(value).0).rem_euclid(100),
        DateField::Month => value.month(),
        DateField::Day => value.day(),
        DateField::DayOfYear => value.ordinal(),
        DateField::WeekOfYear => week_of_year(value).1,
        DateField::WeekOfMonth => {
            let day0 = value.day0();
            let first_weekday = (value.weekday().num_days_from_sunday() + 7 - day0 % 7) % 7;
            (day0 + first_weekday) / 7 + 1
        }
        DateField::DayOfWeekInMonth => value.day0() / 7 + 1,
        DateField::DayOfWeek => value.weekday().number_from_monday(),
        DateField::Hour0To23 => hour,
        DateField::Hour1To24 => match hour {
            0 => 24,
            h => h,
        },
        DateField::Hour0To11 => hour % 12,
        DateField::Hour1To12 => match hour % 12 {
            0 => 12,
            h => h,
        },
        DateField::Minute => value.minute(),
        DateField::Second => value.second(),
        // Leap-second nanoseconds (>= 1e9) still map into 0..=999.
        DateField::Millisecond => (value.nanosecond() % 1_000_000_000) / 1_000_000,
    };
    i64::from(n)
}

/// Week-based year and week number for Sunday-start weeks where week 1
/// contains January 1.
fn week_of_year(value: &NaiveDateTime) -> (i32, u32) {
    let year = value.year();
    let ordinal0 = value.ordinal0();
    let weekday = value.weekday().num_days_from_sunday();
    let days_in_year = if is_leap_year(year) { 366 } else { 365 };

    if ordinal0 + (6 - weekday) >= days_in_year {
        return (year + 1, 1);
    }
    let jan1_weekday = (weekday + 7 - ordinal0 % 7) % 7;
    (year, (ordinal0 + jan1_weekday) / 7 + 1)
}

fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

fn write_padded(out: &mut String, n: i64, width: usize) -> fmt::Result {
    if n < 0 {
        write!(out, "-{:0width$}", n.unsigned_abs())
    } else {
        write!(out, "{n:0width$}")
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32, ms: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|d| d.and_hms_milli_opt(h, min, s, ms))
            .expect("valid timestamp")
    }

    fn sample() -> NaiveDateTime {
        at(2018, 3, 5, 14, 7, 9, 42)
    }

    #[test]
    fn default_pattern_renders_zero_padded_fields() -> Result<(), PatternError> {
        let pattern = DatePattern::parse("yyyy-MM-dd HH:mm:ss")?;
        assert_eq!(pattern.format(&sample()), "2018-03-05 14:07:09");
        Ok(())
    }

    #[test]
    fn short_counts_do_not_pad() -> Result<(), PatternError> {
        let pattern = DatePattern::parse("d.M.yy h:m a")?;
        assert_eq!(pattern.format(&sample()), "5.3.18 2:7 PM");
        Ok(())
    }

    #[test]
    fn names_and_quoted_literals() -> Result<(), PatternError> {
        let pattern = DatePattern::parse("EEE, d MMM yyyy 'at' HH'h' ''SSS''")?;
        assert_eq!(pattern.format(&sample()), "Mon, 5 Mar 2018 at 14h '042'");
        let long = DatePattern::parse("EEEE MMMM LLL")?;
        assert_eq!(long.format(&sample()), "Monday March Mar");
        Ok(())
    }

    #[test]
    fn wide_counts_pad_beyond_two_digits() -> Result<(), PatternError> {
        let pattern = DatePattern::parse("ddd HHH D DDD DDDD y")?;
        assert_eq!(pattern.format(&sample()), "005 014 64 064 0064 2018");
        Ok(())
    }

    #[test]
    fn alternative_hour_letters() -> Result<(), PatternError> {
        let pattern = DatePattern::parse("kk KK hh")?;
        assert_eq!(pattern.format(&sample()), "14 02 02");
        assert_eq!(pattern.format(&at(2018, 3, 5, 0, 0, 0, 0)), "24 00 12");
        Ok(())
    }

    #[test]
    fn era_week_and_day_of_week_letters() -> Result<(), PatternError> {
        let pattern = DatePattern::parse("G w W F u")?;
        assert_eq!(pattern.format(&sample()), "AD 10 2 1 1");

        // Sunday 2017-12-31 shares its week with 2018-01-01.
        let week = DatePattern::parse("YYYY-'W'ww u YY")?;
        assert_eq!(week.format(&at(2017, 12, 31, 0, 0, 0, 0)), "2018-W01 7 18");
        assert_eq!(week.format(&at(2018, 1, 7, 0, 0, 0, 0)), "2018-W02 7 18");
        assert_eq!(week.format(&at(2016, 12, 31, 0, 0, 0, 0)), "2016-W53 6 16");
        Ok(())
    }

    #[test]
    fn zone_and_unknown_letters_are_rejected() {
        assert!(DatePattern::parse("yyyy-MM-dd Z").is_err());
        assert!(DatePattern::parse("yyyy-MM-dd q").is_err());
        assert!(DatePattern::parse("'unterminated").is_err());
    }
}
