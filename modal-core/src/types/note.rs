//! Spelled notes and the chromatic tone table
//!
//! A [`Note`] is a natural letter plus a homogeneous run of accidentals
//! (`C`, `F#`, `Bbb`). A [`Tone`] is one of the twelve pitch classes together
//! with the spellings that land on it. Enharmonic equivalents share a tone but
//! are distinct notes.

use crate::error::{Result, TheoryError};
use std::fmt;
use std::str::FromStr;

/// The seven natural letters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NaturalNote {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl NaturalNote {
    pub const ALL: [NaturalNote; 7] = [
        NaturalNote::C,
        NaturalNote::D,
        NaturalNote::E,
        NaturalNote::F,
        NaturalNote::G,
        NaturalNote::A,
        NaturalNote::B,
    ];

    /// Chromatic position of the unaltered letter (C = 0)
    pub const fn tone_index(self) -> u8 {
        match self {
            NaturalNote::C => 0,
            NaturalNote::D => 2,
            NaturalNote::E => 4,
            NaturalNote::F => 5,
            NaturalNote::G => 7,
            NaturalNote::A => 9,
            NaturalNote::B => 11,
        }
    }

    /// Cyclic successor: A -> B -> C ... G -> A
    pub fn next(self) -> NaturalNote {
        match self {
            NaturalNote::C => NaturalNote::D,
            NaturalNote::D => NaturalNote::E,
            NaturalNote::E => NaturalNote::F,
            NaturalNote::F => NaturalNote::G,
            NaturalNote::G => NaturalNote::A,
            NaturalNote::A => NaturalNote::B,
            NaturalNote::B => NaturalNote::C,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            NaturalNote::C => 'C',
            NaturalNote::D => 'D',
            NaturalNote::E => 'E',
            NaturalNote::F => 'F',
            NaturalNote::G => 'G',
            NaturalNote::A => 'A',
            NaturalNote::B => 'B',
        }
    }

    pub fn from_char(c: char) -> Result<Self> {
        match c {
            'C' => Ok(NaturalNote::C),
            'D' => Ok(NaturalNote::D),
            'E' => Ok(NaturalNote::E),
            'F' => Ok(NaturalNote::F),
            'G' => Ok(NaturalNote::G),
            'A' => Ok(NaturalNote::A),
            'B' => Ok(NaturalNote::B),
            _ => Err(TheoryError::InvalidNaturalNote(c.to_string())),
        }
    }
}

impl fmt::Display for NaturalNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Direction of a single accidental mark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Accidental {
    Sharp,
    Flat,
}

impl Accidental {
    pub fn symbol(self) -> char {
        match self {
            Accidental::Sharp => '#',
            Accidental::Flat => 'b',
        }
    }

    /// Semitone offset of one mark
    pub fn offset(self) -> i8 {
        match self {
            Accidental::Sharp => 1,
            Accidental::Flat => -1,
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '#' => Some(Accidental::Sharp),
            'b' => Some(Accidental::Flat),
            _ => None,
        }
    }
}

/// A spelled note: natural letter plus signed accidental count
/// (positive = sharps, negative = flats). Marks never mix by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Note {
    letter: NaturalNote,
    accidentals: i8,
}

impl Note {
    /// Longest run of marks a note may carry
    pub const MAX_ACCIDENTALS: i8 = 7;

    /// Accidentals beyond `MAX_ACCIDENTALS` either way are clamped
    pub const fn new(letter: NaturalNote, accidentals: i8) -> Self {
        let accidentals = if accidentals > Note::MAX_ACCIDENTALS {
            Note::MAX_ACCIDENTALS
        } else if accidentals < -Note::MAX_ACCIDENTALS {
            -Note::MAX_ACCIDENTALS
        } else {
            accidentals
        };
        Note {
            letter,
            accidentals,
        }
    }

    pub const fn natural(letter: NaturalNote) -> Self {
        Note::new(letter, 0)
    }

    pub fn letter(&self) -> NaturalNote {
        self.letter
    }

    /// Signed accidental count (positive = sharps)
    pub fn accidentals(&self) -> i8 {
        self.accidentals
    }

    pub fn sharps(&self) -> u8 {
        self.accidentals.max(0) as u8
    }

    pub fn flats(&self) -> u8 {
        self.accidentals.min(0).unsigned_abs()
    }

    /// Direction of the marks, `None` for naturals
    pub fn accidental(&self) -> Option<Accidental> {
        match self.accidentals {
            0 => None,
            n if n > 0 => Some(Accidental::Sharp),
            _ => Some(Accidental::Flat),
        }
    }

    pub fn is_natural(&self) -> bool {
        self.accidentals == 0
    }

    pub fn is_standard_sharp(&self) -> bool {
        self.accidentals == 1
    }

    pub fn is_standard_flat(&self) -> bool {
        self.accidentals == -1
    }

    /// Double sharp (`F##`)
    pub fn is_theoretical_sharp(&self) -> bool {
        self.accidentals == 2
    }

    /// Double flat (`Bbb`)
    pub fn is_theoretical_flat(&self) -> bool {
        self.accidentals == -2
    }

    pub fn is_standard(&self) -> bool {
        self.accidentals.abs() == 1
    }

    pub fn is_theoretical(&self) -> bool {
        self.accidentals.abs() == 2
    }

    /// Chromatic index (0-11) this spelling lands on
    pub fn tone_index(&self) -> u8 {
        (self.letter.tone_index() as i32 + self.accidentals as i32).rem_euclid(12) as u8
    }

    pub fn tone(&self) -> &'static Tone {
        &TONES[self.tone_index() as usize]
    }

    pub fn is_enharmonic(&self, other: &Note) -> bool {
        self.tone_index() == other.tone_index()
    }

    /// Every table spelling of this note's tone, itself included when it is
    /// spelled with at most two marks.
    pub fn simplify(&self) -> &'static [Note] {
        self.tone().notes()
    }

    /// Spellings of the tone `semitones` away
    pub fn transpose(&self, semitones: i32) -> &'static [Note] {
        tone_at(self.tone_index() as i32 + semitones).notes()
    }

    /// The note one semitone up (`Sharp`) or down (`Flat`).
    ///
    /// Spelling policy on the target tone: a natural if there is one, then a
    /// single accidental in the requested direction, then a double accidental
    /// in that direction, then whatever the tone offers. Keeps altered degrees
    /// readable (`C#` + sharp is `D`, not `C##`), at the cost of letter
    /// continuity: raising `F#` gives `G`, never `F##`.
    pub fn adjust(&self, direction: Accidental) -> Note {
        let target = tone_at(self.tone_index() as i32 + direction.offset() as i32);
        let notes = target.notes();

        notes
            .iter()
            .find(|n| n.is_natural())
            .or_else(|| {
                notes
                    .iter()
                    .find(|n| n.is_standard() && n.accidental() == Some(direction))
            })
            .or_else(|| {
                notes
                    .iter()
                    .find(|n| n.is_theoretical() && n.accidental() == Some(direction))
            })
            .or_else(|| notes.first())
            .copied()
            .unwrap_or(Note::new(self.letter, self.accidentals + direction.offset()))
    }
}

impl FromStr for Note {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();

        let letter = chars
            .next()
            .and_then(|c| NaturalNote::from_char(c).ok())
            .ok_or_else(|| TheoryError::MalformedNote(s.to_string()))?;

        let marks: Vec<char> = chars.collect();
        let accidentals = match marks.first() {
            None => 0,
            Some(&first) => {
                let direction = Accidental::from_char(first)
                    .ok_or_else(|| TheoryError::MalformedNote(s.to_string()))?;
                if marks.iter().any(|&c| c != first) || marks.len() > Note::MAX_ACCIDENTALS as usize
                {
                    return Err(TheoryError::MalformedNote(s.to_string()));
                }
                marks.len() as i8 * direction.offset()
            }
        };

        Ok(Note::new(letter, accidentals))
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter)?;
        if let Some(direction) = self.accidental() {
            for _ in 0..self.accidentals.unsigned_abs() {
                write!(f, "{}", direction.symbol())?;
            }
        }
        Ok(())
    }
}

crate::string_serde!(Note);

/// A pitch class and the table spellings that land on it
#[derive(Debug, PartialEq, Eq)]
pub struct Tone {
    index: u8,
    notes: &'static [Note],
}

impl Tone {
    pub fn index(&self) -> u8 {
        self.index
    }

    pub fn notes(&self) -> &'static [Note] {
        self.notes
    }

    pub fn contains(&self, note: &Note) -> bool {
        self.notes.contains(note)
    }

    /// The spelling on this tone that uses `letter`, if any
    pub fn spelling_with_letter(&self, letter: NaturalNote) -> Option<Note> {
        self.notes.iter().find(|n| n.letter() == letter).copied()
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.notes.iter().map(|n| n.to_string()).collect();
        write!(f, "{}: [{}]", self.index, names.join(", "))
    }
}

/// The twelve tones with every spelling up to double accidentals
pub static TONES: [Tone; 12] = {
    use NaturalNote::*;
    const fn n(letter: NaturalNote, accidentals: i8) -> Note {
        Note::new(letter, accidentals)
    }
    [
        Tone { index: 0, notes: &[n(B, 1), n(C, 0), n(D, -2)] },
        Tone { index: 1, notes: &[n(B, 2), n(C, 1), n(D, -1)] },
        Tone { index: 2, notes: &[n(C, 2), n(D, 0), n(E, -2)] },
        Tone { index: 3, notes: &[n(D, 1), n(E, -1), n(F, -2)] },
        Tone { index: 4, notes: &[n(D, 2), n(E, 0), n(F, -1)] },
        Tone { index: 5, notes: &[n(E, 1), n(F, 0), n(G, -2)] },
        Tone { index: 6, notes: &[n(E, 2), n(F, 1), n(G, -1)] },
        Tone { index: 7, notes: &[n(F, 2), n(G, 0), n(A, -2)] },
        Tone { index: 8, notes: &[n(G, 1), n(A, -1)] },
        Tone { index: 9, notes: &[n(G, 2), n(A, 0), n(B, -2)] },
        Tone { index: 10, notes: &[n(A, 1), n(B, -1), n(C, -2)] },
        Tone { index: 11, notes: &[n(A, 2), n(B, 0), n(C, -1)] },
    ]
};

/// Tone a note lands on. Total over every well-formed note.
pub fn tone_of(note: &Note) -> &'static Tone {
    note.tone()
}

/// Tone at a chromatic index, wrapping outside 0-11
pub fn tone_at(index: i32) -> &'static Tone {
    &TONES[index.rem_euclid(12) as usize]
}

/// Every spelling in the tone table, in tone order
pub fn table_notes() -> impl Iterator<Item = Note> {
    TONES.iter().flat_map(|tone| tone.notes().iter().copied())
}

pub fn adjust_note(note: &Note, direction: Accidental) -> Note {
    note.adjust(direction)
}

/// Letter that follows `letter` in the A-G cycle
pub fn next_natural_letter(letter: char) -> Result<char> {
    NaturalNote::from_char(letter).map(|n| n.next().as_char())
}
