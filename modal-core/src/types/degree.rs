//! Scale and chord degree tokens (`5`, `b3`, `#11`)

use crate::error::{Result, TheoryError};
use crate::types::note::Accidental;
use std::fmt;
use std::str::FromStr;

/// Chromatic alteration of a degree. Ordered flat < natural < sharp so that
/// sorted degree lists read `b3, 3, #3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Alteration {
    Flat,
    Natural,
    Sharp,
}

impl Alteration {
    pub fn prefix(self) -> &'static str {
        match self {
            Alteration::Flat => "b",
            Alteration::Natural => "",
            Alteration::Sharp => "#",
        }
    }

    pub fn accidental(self) -> Option<Accidental> {
        match self {
            Alteration::Flat => Some(Accidental::Flat),
            Alteration::Natural => None,
            Alteration::Sharp => Some(Accidental::Sharp),
        }
    }
}

impl From<Accidental> for Alteration {
    fn from(accidental: Accidental) -> Self {
        match accidental {
            Accidental::Sharp => Alteration::Sharp,
            Accidental::Flat => Alteration::Flat,
        }
    }
}

fn parse_degree(s: &str, kind: &'static str) -> Result<(Alteration, u8)> {
    let trimmed = s.trim();
    let (alteration, digits) = match trimmed.chars().next() {
        Some('#') => (Alteration::Sharp, &trimmed[1..]),
        Some('b') => (Alteration::Flat, &trimmed[1..]),
        _ => (Alteration::Natural, trimmed),
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(TheoryError::malformed(kind, s));
    }
    let number = digits
        .parse::<u8>()
        .map_err(|_| TheoryError::malformed(kind, s))?;
    Ok((alteration, number))
}

/// A position in a seven-note mode, optionally raised or lowered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModeDegree {
    number: u8,
    alteration: Alteration,
}

impl ModeDegree {
    pub const STANDARD: [ModeDegree; 7] = [
        ModeDegree::standard(1),
        ModeDegree::standard(2),
        ModeDegree::standard(3),
        ModeDegree::standard(4),
        ModeDegree::standard(5),
        ModeDegree::standard(6),
        ModeDegree::standard(7),
    ];

    pub fn new(number: u8, alteration: Alteration) -> Result<Self> {
        if !(1..=7).contains(&number) {
            return Err(TheoryError::malformed(
                "mode degree",
                format!("{}{}", alteration.prefix(), number),
            ));
        }
        Ok(ModeDegree { number, alteration })
    }

    const fn standard(number: u8) -> Self {
        ModeDegree {
            number,
            alteration: Alteration::Natural,
        }
    }

    pub fn number(&self) -> u8 {
        self.number
    }

    pub fn alteration(&self) -> Alteration {
        self.alteration
    }

    pub fn is_altered(&self) -> bool {
        self.alteration != Alteration::Natural
    }

    /// Zero-based position in a key's note array
    pub fn index(&self) -> usize {
        (self.number - 1) as usize
    }

    /// Same number with a different alteration
    pub fn with_alteration(&self, alteration: Alteration) -> Self {
        ModeDegree {
            number: self.number,
            alteration,
        }
    }

    /// The fourteen chromatic degrees (`b1`, `#1` ... `b7`, `#7`)
    pub fn altered() -> impl Iterator<Item = ModeDegree> {
        Self::STANDARD.into_iter().flat_map(|d| {
            [
                d.with_alteration(Alteration::Flat),
                d.with_alteration(Alteration::Sharp),
            ]
        })
    }
}

impl FromStr for ModeDegree {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self> {
        let (alteration, number) = parse_degree(s, "mode degree")?;
        ModeDegree::new(number, alteration)
    }
}

impl fmt::Display for ModeDegree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.alteration.prefix(), self.number)
    }
}

crate::string_serde!(ModeDegree);

/// A chord member: a mode degree or one of the extensions 9, 11 and 13
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChordDegree {
    number: u8,
    alteration: Alteration,
}

impl ChordDegree {
    pub fn new(number: u8, alteration: Alteration) -> Result<Self> {
        if !matches!(number, 1..=7 | 9 | 11 | 13) {
            return Err(TheoryError::malformed(
                "chord degree",
                format!("{}{}", alteration.prefix(), number),
            ));
        }
        Ok(ChordDegree { number, alteration })
    }

    pub(crate) const fn of(number: u8, alteration: Alteration) -> Self {
        ChordDegree { number, alteration }
    }

    pub fn number(&self) -> u8 {
        self.number
    }

    pub fn alteration(&self) -> Alteration {
        self.alteration
    }

    pub fn is_altered(&self) -> bool {
        self.alteration != Alteration::Natural
    }

    /// Fold extensions onto the mode: 9 -> 2, 11 -> 4, 13 -> 6
    pub fn to_mode_degree(&self) -> ModeDegree {
        let number = if self.number > 7 {
            self.number - 7
        } else {
            self.number
        };
        ModeDegree {
            number,
            alteration: self.alteration,
        }
    }
}

impl FromStr for ChordDegree {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self> {
        let (alteration, number) = parse_degree(s, "chord degree")?;
        ChordDegree::new(number, alteration)
    }
}

impl From<ModeDegree> for ChordDegree {
    fn from(degree: ModeDegree) -> Self {
        ChordDegree {
            number: degree.number,
            alteration: degree.alteration,
        }
    }
}

impl fmt::Display for ChordDegree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.alteration.prefix(), self.number)
    }
}

crate::string_serde!(ChordDegree);
