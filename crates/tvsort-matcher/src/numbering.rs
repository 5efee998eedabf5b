//! Episode numbering grammars.
//!
//! File names number episodes in several dialects: `1x02`, `S01E02`,
//! `Series 1 Episode 2`, a bare `102`, `Part 2`. Each dialect is a small
//! winnow parser over normalised text, and [`GRAMMARS`] lists them in the
//! order they are tried. The resolver walks whatever table it was given, so
//! a new dialect is a new entry, not a change to the resolution logic.

use std::fmt;
use std::ops::Range;

use winnow::ascii::{digit1, space0};
use winnow::combinator::{alt, eof, peek};
use winnow::prelude::*;
use winnow::token::take_while;
use winnow::ModalResult;

/// An episode number as written in a file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EpisodeNumber {
    /// Episode counted from the start of the series.
    Absolute(u32),
    /// Episode within a season.
    Seasonal {
        /// Season number.
        season: u32,
        /// Episode number within the season.
        episode: u32,
    },
    /// Digits were present but too large to mean anything.
    OutOfRange,
}

impl EpisodeNumber {
    fn absolute(digits: &str) -> Self {
        digits.parse().map_or(Self::OutOfRange, Self::Absolute)
    }

    fn seasonal(season: &str, episode: &str) -> Self {
        match (season.parse(), episode.parse()) {
            (Ok(season), Ok(episode)) => Self::Seasonal { season, episode },
            _ => Self::OutOfRange,
        }
    }

    /// Catalogue lookup key for this number, if it has one.
    pub fn key(&self) -> Option<String> {
        match *self {
            Self::Absolute(n) => Some(absolute_key(n)),
            Self::Seasonal { season, episode } => Some(seasonal_key(season, episode)),
            Self::OutOfRange => None,
        }
    }
}

impl fmt::Display for EpisodeNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absolute(n) => write!(f, "{n}"),
            Self::Seasonal { season, episode } => write!(f, "{season}x{episode:02}"),
            Self::OutOfRange => f.write_str("?"),
        }
    }
}

/// Catalogue key for an absolute episode number.
pub fn absolute_key(number: u32) -> String {
    number.to_string()
}

/// Catalogue key for a season and episode pair.
pub fn seasonal_key(season: u32, episode: u32) -> String {
    format!("{season}x{episode}")
}

/// Signature shared by every numbering grammar.
///
/// A grammar consumes its code from the front of the input and returns
/// every reading of it; a bare `101` reads both as episode 101 and as
/// season 1 episode 1.
pub type GrammarFn = fn(&mut &str) -> ModalResult<Vec<EpisodeNumber>>;

/// A named numbering grammar.
#[derive(Clone, Copy)]
pub struct Grammar {
    /// Short name used in logs.
    pub name: &'static str,
    /// The parser.
    pub parse: GrammarFn,
}

impl fmt::Debug for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Grammar").field(&self.name).finish()
    }
}

/// The built-in grammars, in priority order.
pub static GRAMMARS: &[Grammar] = &[
    Grammar {
        name: "season-x-episode",
        parse: season_x_episode,
    },
    Grammar {
        name: "s-e",
        parse: s_e,
    },
    Grammar {
        name: "series-episode",
        parse: series_episode,
    },
    Grammar {
        name: "bare",
        parse: bare_number,
    },
    Grammar {
        name: "part",
        parse: part,
    },
];

/// Codes end at a space or at the end of the text.
fn boundary(input: &mut &str) -> ModalResult<()> {
    peek(alt((" ", eof))).void().parse_next(input)
}

/// `1x02`
fn season_x_episode(input: &mut &str) -> ModalResult<Vec<EpisodeNumber>> {
    let (season, _, episode) = (digit1, 'x', digit1).parse_next(input)?;
    boundary(input)?;
    Ok(vec![EpisodeNumber::seasonal(season, episode)])
}

/// `s01e02`, `s1ep2`, `s01 e02`
fn s_e(input: &mut &str) -> ModalResult<Vec<EpisodeNumber>> {
    let (_, season, _, _, _, episode) =
        ('s', digit1, space0, alt(("ep", "e")), space0, digit1).parse_next(input)?;
    boundary(input)?;
    Ok(vec![EpisodeNumber::seasonal(season, episode)])
}

/// `series 1 episode 2`, `season 1 ep 2`
fn series_episode(input: &mut &str) -> ModalResult<Vec<EpisodeNumber>> {
    let (_, _, season, _, _, _, episode) = (
        alt(("series", "season")),
        ' ',
        digit1,
        ' ',
        alt(("episode", "ep")),
        ' ',
        digit1,
    )
        .parse_next(input)?;
    boundary(input)?;
    Ok(vec![EpisodeNumber::seasonal(season, episode)])
}

/// `7`, `101`. Three or more digits also read as season and episode.
fn bare_number(input: &mut &str) -> ModalResult<Vec<EpisodeNumber>> {
    let digits = digit1.parse_next(input)?;
    boundary(input)?;

    let absolute = EpisodeNumber::absolute(digits);
    let mut readings = vec![absolute];
    if let EpisodeNumber::Absolute(n) = absolute {
        if n >= 100 {
            readings.push(EpisodeNumber::Seasonal {
                season: n / 100,
                episode: n % 100,
            });
        }
    }
    Ok(readings)
}

/// `part 2`, `pt2`. Parts live in season 1.
fn part(input: &mut &str) -> ModalResult<Vec<EpisodeNumber>> {
    let (_, _, digits) = (alt(("part", "pt")), space0, digit1).parse_next(input)?;
    boundary(input)?;
    Ok(vec![EpisodeNumber::seasonal("1", digits)])
}

/// A numbering code found at the front of some text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadingCode {
    /// Name of the grammar that recognised it.
    pub grammar: &'static str,
    /// Every reading of the code.
    pub numbers: Vec<EpisodeNumber>,
    /// Bytes consumed.
    pub len: usize,
}

/// Try each grammar in order against the front of `text`.
///
/// # Examples
///
/// ```
/// use tvsort_matcher::numbering::{leading_code, EpisodeNumber, GRAMMARS};
///
/// let code = leading_code("s02e05 the title", GRAMMARS).unwrap();
/// assert_eq!(code.numbers, vec![EpisodeNumber::Seasonal { season: 2, episode: 5 }]);
/// assert_eq!(code.len, 6);
/// assert!(leading_code("the title", GRAMMARS).is_none());
/// ```
pub fn leading_code(text: &str, grammars: &[Grammar]) -> Option<LeadingCode> {
    grammars.iter().find_map(|grammar| {
        let mut input = text;
        let numbers = (grammar.parse)(&mut input).ok()?;
        tracing::trace!(grammar = grammar.name, text, "numbering grammar matched");
        Some(LeadingCode {
            grammar: grammar.name,
            numbers,
            len: text.len() - input.len(),
        })
    })
}

/// An eight digit `YYYYMMDD` air date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AirDate {
    /// Year.
    pub year: u32,
    /// Month as written; not range checked.
    pub month: u32,
    /// Day as written; not range checked.
    pub day: u32,
}

impl fmt::Display for AirDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

fn date_digits<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    let digits = take_while(8, |c: char| c.is_ascii_digit()).parse_next(input)?;
    boundary(input)?;
    Ok(digits)
}

/// Recognise an air date at the front of `text` with a year in `years`.
///
/// Returns the date and the number of bytes consumed.
pub fn leading_date(text: &str, years: Range<u32>) -> Option<(AirDate, usize)> {
    let mut input = text;
    let digits = date_digits(&mut input).ok()?;
    let date = AirDate {
        year: digits[..4].parse().ok()?,
        month: digits[4..6].parse().ok()?,
        day: digits[6..].parse().ok()?,
    };
    years
        .contains(&date.year)
        .then_some((date, text.len() - input.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn readings(text: &str) -> Option<(Vec<EpisodeNumber>, usize, &'static str)> {
        leading_code(text, GRAMMARS).map(|c| (c.numbers, c.len, c.grammar))
    }

    fn seasonal(season: u32, episode: u32) -> EpisodeNumber {
        EpisodeNumber::Seasonal { season, episode }
    }

    #[test]
    fn test_season_x_episode() {
        assert_eq!(readings("1x02 pilot"), Some((vec![seasonal(1, 2)], 4, "season-x-episode")));
        assert_eq!(readings("1x02"), Some((vec![seasonal(1, 2)], 4, "season-x-episode")));
        assert!(readings("1x02b").is_none());
    }

    #[test]
    fn test_s_e_variants() {
        assert_eq!(readings("s01e02").unwrap().0, vec![seasonal(1, 2)]);
        assert_eq!(readings("s1ep12 title").unwrap().0, vec![seasonal(1, 12)]);
        assert_eq!(readings("s03 e04").unwrap().0, vec![seasonal(3, 4)]);
    }

    #[test]
    fn test_series_episode() {
        let (numbers, len, grammar) = readings("series 2 episode 10 more").unwrap();
        assert_eq!(numbers, vec![seasonal(2, 10)]);
        assert_eq!(len, 19);
        assert_eq!(grammar, "series-episode");
        assert_eq!(readings("season 4 ep 1").unwrap().0, vec![seasonal(4, 1)]);
    }

    #[test]
    fn test_bare_number_readings() {
        assert_eq!(readings("7").unwrap().0, vec![EpisodeNumber::Absolute(7)]);
        assert_eq!(
            readings("101").unwrap().0,
            vec![EpisodeNumber::Absolute(101), seasonal(1, 1)]
        );
        assert_eq!(
            readings("1205 x").unwrap().0,
            vec![EpisodeNumber::Absolute(1205), seasonal(12, 5)]
        );
        assert!(readings("12abc").is_none());
    }

    #[test]
    fn test_part() {
        assert_eq!(readings("part 3").unwrap().0, vec![seasonal(1, 3)]);
        assert_eq!(readings("pt2").unwrap().0, vec![seasonal(1, 2)]);
        assert!(readings("party 2").is_none());
    }

    #[test]
    fn test_overflow_still_produces_a_claim() {
        let (numbers, len, _) = readings("99999999999999999999").unwrap();
        assert_eq!(numbers, vec![EpisodeNumber::OutOfRange]);
        assert_eq!(len, 20);
        assert_eq!(numbers[0].key(), None);

        let (numbers, _, _) = readings("1x99999999999").unwrap();
        assert_eq!(numbers, vec![EpisodeNumber::OutOfRange]);
    }

    #[test]
    fn test_keys_drop_leading_zeros() {
        assert_eq!(readings("s01e02").unwrap().0[0].key().as_deref(), Some("1x2"));
        assert_eq!(EpisodeNumber::Absolute(7).key().as_deref(), Some("7"));
        assert_eq!(seasonal(1, 2).to_string(), "1x02");
    }

    #[test]
    fn test_custom_grammar_table() {
        fn episode_word(input: &mut &str) -> ModalResult<Vec<EpisodeNumber>> {
            let (_, digits) = ("episode ", digit1).parse_next(input)?;
            Ok(vec![EpisodeNumber::absolute(digits)])
        }
        let table = [Grammar {
            name: "episode-word",
            parse: episode_word,
        }];
        let code = leading_code("episode 12", &table).unwrap();
        assert_eq!(code.numbers, vec![EpisodeNumber::Absolute(12)]);
        assert!(leading_code("12", &table).is_none());
    }

    #[test]
    fn test_leading_date() {
        let (date, len) = leading_date("20240115 special", 1900..3000).unwrap();
        assert_eq!((date.year, date.month, date.day), (2024, 1, 15));
        assert_eq!(len, 8);
        assert_eq!(date.to_string(), "2024-01-15");

        assert!(leading_date("18991231", 1900..3000).is_none());
        assert!(leading_date("30000101", 1900..3000).is_none());
        assert!(leading_date("202401150", 1900..3000).is_none());
        assert!(leading_date("2024011", 1900..3000).is_none());
    }
}
