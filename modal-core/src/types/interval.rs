//! The thirteen intervals spanning one octave
//!
//! Intervals are looked up by long name (`Perfect Fifth`), short name (`P5`)
//! or semitone distance. Distances beyond an octave fold back into the table,
//! except that a whole number of octaves resolves to the Perfect Octave rather
//! than the Perfect Unison.

use crate::error::{Result, TheoryError};
use crate::types::note::Note;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Interval {
    pub length: u8,
    pub name: &'static str,
    pub short_name: &'static str,
    pub alternate_names: &'static [&'static str],
    /// Heuristic dissonance, 0 (consonant) to 5 (tritone)
    pub tension: u8,
}

pub static INTERVALS: [Interval; 13] = [
    Interval {
        length: 0,
        name: "Perfect Unison",
        short_name: "P1",
        alternate_names: &["Diminished Second"],
        tension: 0,
    },
    Interval {
        length: 1,
        name: "Minor Second",
        short_name: "m2",
        alternate_names: &["Augmented Unison", "Semitone", "Half Tone", "Half Step"],
        tension: 4,
    },
    Interval {
        length: 2,
        name: "Major Second",
        short_name: "M2",
        alternate_names: &["Diminished Third", "Tone", "Whole Step"],
        tension: 3,
    },
    Interval {
        length: 3,
        name: "Minor Third",
        short_name: "m3",
        alternate_names: &["Augmented Second"],
        tension: 2,
    },
    Interval {
        length: 4,
        name: "Major Third",
        short_name: "M3",
        alternate_names: &["Diminished Fourth"],
        tension: 1,
    },
    Interval {
        length: 5,
        name: "Perfect Fourth",
        short_name: "P4",
        alternate_names: &["Augmented Third"],
        tension: 1,
    },
    Interval {
        length: 6,
        name: "Tritone",
        short_name: "TT",
        alternate_names: &["Augmented Fourth", "Diminished Fifth"],
        tension: 5,
    },
    Interval {
        length: 7,
        name: "Perfect Fifth",
        short_name: "P5",
        alternate_names: &["Diminished Sixth"],
        tension: 0,
    },
    Interval {
        length: 8,
        name: "Minor Sixth",
        short_name: "m6",
        alternate_names: &["Augmented Fifth"],
        tension: 2,
    },
    Interval {
        length: 9,
        name: "Major Sixth",
        short_name: "M6",
        alternate_names: &["Diminished Seventh"],
        tension: 1,
    },
    Interval {
        length: 10,
        name: "Minor Seventh",
        short_name: "m7",
        alternate_names: &["Augmented Sixth"],
        tension: 3,
    },
    Interval {
        length: 11,
        name: "Major Seventh",
        short_name: "M7",
        alternate_names: &["Diminished Octave"],
        tension: 4,
    },
    Interval {
        length: 12,
        name: "Perfect Octave",
        short_name: "P8",
        alternate_names: &["Augmented Seventh"],
        tension: 0,
    },
];

/// Any of the three ways to name an interval
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntervalIdentifier {
    Name(String),
    ShortName(String),
    Distance(i32),
}

impl FromStr for IntervalIdentifier {
    type Err = TheoryError;

    /// Integers become distances; anything matching a table name or short
    /// name becomes that kind of identifier.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(distance) = s.parse::<i32>() {
            return Ok(IntervalIdentifier::Distance(distance));
        }
        if INTERVALS.iter().any(|i| i.short_name == s) {
            return Ok(IntervalIdentifier::ShortName(s.to_string()));
        }
        if INTERVALS.iter().any(|i| i.name.eq_ignore_ascii_case(s)) {
            return Ok(IntervalIdentifier::Name(s.to_string()));
        }
        Err(TheoryError::malformed("interval identifier", s))
    }
}

impl From<i32> for IntervalIdentifier {
    fn from(distance: i32) -> Self {
        IntervalIdentifier::Distance(distance)
    }
}

impl fmt::Display for IntervalIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntervalIdentifier::Name(name) => write!(f, "{}", name),
            IntervalIdentifier::ShortName(short) => write!(f, "{}", short),
            IntervalIdentifier::Distance(distance) => write!(f, "{}", distance),
        }
    }
}

/// Resolve an identifier to its table entry
pub fn lookup_interval(identifier: &IntervalIdentifier) -> Result<&'static Interval> {
    let found = match identifier {
        IntervalIdentifier::Name(name) => {
            INTERVALS.iter().find(|i| i.name.eq_ignore_ascii_case(name))
        }
        IntervalIdentifier::ShortName(short) => INTERVALS.iter().find(|i| i.short_name == short),
        IntervalIdentifier::Distance(distance) => {
            Some(Interval::from_distance(*distance))
        }
    };
    found.ok_or_else(|| TheoryError::NoMatchingInterval(identifier.to_string()))
}

impl Interval {
    /// Interval for a raw semitone distance. Only a distance of exactly zero is
    /// the unison; other multiples of 12 are the octave.
    pub fn from_distance(distance: i32) -> &'static Interval {
        let normalized = distance.rem_euclid(12) as usize;
        if normalized == 0 && distance != 0 {
            &INTERVALS[12]
        } else {
            &INTERVALS[normalized]
        }
    }

    pub fn from_name(name: &str) -> Result<&'static Interval> {
        lookup_interval(&IntervalIdentifier::Name(name.to_string()))
    }

    pub fn from_short_name(short_name: &str) -> Result<&'static Interval> {
        lookup_interval(&IntervalIdentifier::ShortName(short_name.to_string()))
    }

    /// Ascending distance from `first` to `second`, folded into one octave
    pub fn distance(first: &Interval, second: &Interval) -> u8 {
        (second.length as i32 - first.length as i32).rem_euclid(12) as u8
    }

    /// Ascending interval from one note to the next within an octave
    pub fn between(from: &Note, to: &Note) -> &'static Interval {
        &INTERVALS[semitones_between(from, to) as usize]
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.short_name)
    }
}

/// Ascending semitones from `from` up to `to`, 0-11
pub fn semitones_between(from: &Note, to: &Note) -> u8 {
    (to.tone_index() as i32 - from.tone_index() as i32).rem_euclid(12) as u8
}

pub fn to_name(identifier: &IntervalIdentifier) -> Result<&'static str> {
    lookup_interval(identifier).map(|i| i.name)
}

pub fn to_short_name(identifier: &IntervalIdentifier) -> Result<&'static str> {
    lookup_interval(identifier).map(|i| i.short_name)
}

pub fn to_length(identifier: &IntervalIdentifier) -> Result<u8> {
    lookup_interval(identifier).map(|i| i.length)
}

pub fn alternate_names(identifier: &IntervalIdentifier) -> Result<&'static [&'static str]> {
    lookup_interval(identifier).map(|i| i.alternate_names)
}

pub fn tension(identifier: &IntervalIdentifier) -> Result<u8> {
    lookup_interval(identifier).map(|i| i.tension)
}
