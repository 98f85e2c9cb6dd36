//! Voicing enumeration for built chords
//!
//! A chord's notes are first stacked upward from the bass, cycling through the
//! chord members until the stack would exceed the maximum spread or size.
//! Every order-preserving selection of that stack within the size bounds is a
//! candidate voicing; candidates are filtered by the options and ranked by
//! tension, then by spread.

use crate::error::{Result, TheoryError};
use crate::types::chord::Chord;
use crate::types::degree::ChordDegree;
use crate::types::interval::{semitones_between, Interval};
use crate::types::note::Note;
use std::fmt;

/// Largest stack the enumerator will build
pub const MAX_STACKED_NOTES: usize = 14;

/// Widest spread the clamping constructor allows (four octaves)
pub const MAX_TONE_SPREAD: u8 = 48;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct VoicingOptions {
    /// Semitones between the lowest and highest voiced note
    pub min_tone_spread: u8,
    pub max_tone_spread: u8,
    pub min_size: usize,
    pub max_size: usize,
    /// Chord members no voicing may contain
    pub omit_degrees: Vec<ChordDegree>,
    /// Chord members every voicing must contain
    pub guarantee_degrees: Vec<ChordDegree>,
    /// Keep only voicings whose lowest note is the chord's bass
    pub enforce_slash: bool,
}

impl Default for VoicingOptions {
    fn default() -> Self {
        VoicingOptions {
            min_tone_spread: 0,
            max_tone_spread: 24,
            min_size: 3,
            max_size: 4,
            omit_degrees: Vec::new(),
            guarantee_degrees: Vec::new(),
            enforce_slash: false,
        }
    }
}

impl VoicingOptions {
    /// Bounds are clamped into range: sizes to 1..=14, spreads to at most
    /// four octaves, and each minimum to at most its maximum.
    pub fn new(
        min_tone_spread: u8,
        max_tone_spread: u8,
        min_size: usize,
        max_size: usize,
    ) -> Self {
        let max_tone_spread = max_tone_spread.min(MAX_TONE_SPREAD);
        let max_size = max_size.clamp(1, MAX_STACKED_NOTES);
        VoicingOptions {
            min_tone_spread: min_tone_spread.min(max_tone_spread),
            max_tone_spread,
            min_size: min_size.clamp(1, max_size),
            max_size,
            ..VoicingOptions::default()
        }
    }

    /// Within one octave
    pub fn close() -> Self {
        VoicingOptions::new(0, 12, 3, 4)
    }

    /// Between one and two octaves
    pub fn open() -> Self {
        VoicingOptions::new(12, 24, 3, 5)
    }

    pub fn wide() -> Self {
        VoicingOptions::new(19, 36, 4, 6)
    }

    pub fn omit(mut self, degree: ChordDegree) -> Self {
        self.omit_degrees.push(degree);
        self
    }

    pub fn guarantee(mut self, degree: ChordDegree) -> Self {
        self.guarantee_degrees.push(degree);
        self
    }

    pub fn enforce_slash(mut self, enforce: bool) -> Self {
        self.enforce_slash = enforce;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_size == 0 {
            return Err(TheoryError::InvalidVoicingOptions(
                "minimum size must be at least 1".to_string(),
            ));
        }
        if self.min_size > self.max_size {
            return Err(TheoryError::InvalidVoicingOptions(format!(
                "minimum size {} exceeds maximum size {}",
                self.min_size, self.max_size
            )));
        }
        if self.max_size > MAX_STACKED_NOTES {
            return Err(TheoryError::InvalidVoicingOptions(format!(
                "maximum size {} exceeds {}",
                self.max_size, MAX_STACKED_NOTES
            )));
        }
        if self.min_tone_spread > self.max_tone_spread {
            return Err(TheoryError::InvalidVoicingOptions(format!(
                "minimum spread {} exceeds maximum spread {}",
                self.min_tone_spread, self.max_tone_spread
            )));
        }
        Ok(())
    }
}

/// A chord member placed at a height above the voicing's lowest note
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct VoicedNote {
    pub note: Note,
    pub degree: ChordDegree,
    /// Octaves above the stack's first note
    pub octave: u8,
    /// Semitones above the stack's first note
    pub offset: u8,
}

impl fmt::Display for VoicedNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.note, self.octave)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ChordVoicing {
    pub voiced_notes: Vec<VoicedNote>,
    /// Sum of the interval tensions between every pair of voiced notes
    pub tension: u32,
    pub spread: u8,
}

impl ChordVoicing {
    fn new(voiced_notes: Vec<VoicedNote>) -> Self {
        let mut tension = 0u32;
        for (i, low) in voiced_notes.iter().enumerate() {
            for high in &voiced_notes[i + 1..] {
                let distance = high.offset as i32 - low.offset as i32;
                tension += Interval::from_distance(distance).tension as u32;
            }
        }
        let spread = match (voiced_notes.first(), voiced_notes.last()) {
            (Some(low), Some(high)) => high.offset - low.offset,
            _ => 0,
        };
        ChordVoicing {
            voiced_notes,
            tension,
            spread,
        }
    }

    pub fn notes(&self) -> Vec<Note> {
        self.voiced_notes.iter().map(|v| v.note).collect()
    }

    pub fn contains_degree(&self, degree: &ChordDegree) -> bool {
        self.voiced_notes.iter().any(|v| v.degree == *degree)
    }
}

impl fmt::Display for ChordVoicing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let notes: Vec<String> = self.voiced_notes.iter().map(|v| v.to_string()).collect();
        write!(
            f,
            "[{}] tension {}, spread {}",
            notes.join(" "),
            self.tension,
            self.spread
        )
    }
}

/// Stack the chord's distinct notes upward from its bass
pub fn stack_notes(chord: &Chord, max_tone_spread: u8, max_size: usize) -> Vec<VoicedNote> {
    let mut members: Vec<(Note, ChordDegree)> = Vec::new();
    for (note, degree) in chord.notes().iter().zip(chord.degrees()) {
        if !members.iter().any(|(n, _)| n == note) {
            members.push((*note, *degree));
        }
    }
    let Some(&(first_note, first_degree)) = members.first() else {
        return Vec::new();
    };

    let mut stacked = vec![VoicedNote {
        note: first_note,
        degree: first_degree,
        octave: 0,
        offset: 0,
    }];
    let limit = max_size.min(MAX_STACKED_NOTES);
    let mut spread = 0u8;

    while stacked.len() < limit && spread < max_tone_spread {
        let (current, _) = members[(stacked.len() - 1) % members.len()];
        let (next, degree) = members[stacked.len() % members.len()];
        let step = match semitones_between(&current, &next) {
            0 => 12,
            s => s,
        };
        match spread.checked_add(step) {
            Some(total) if total <= max_tone_spread => spread = total,
            _ => break,
        }
        stacked.push(VoicedNote {
            note: next,
            degree,
            octave: spread / 12,
            offset: spread,
        });
    }
    stacked
}

/// Every selection of `size` items that keeps their original order
fn ordered_combinations<T: Copy>(items: &[T], size: usize) -> Vec<Vec<T>> {
    fn walk<T: Copy>(
        items: &[T],
        size: usize,
        start: usize,
        current: &mut Vec<T>,
        out: &mut Vec<Vec<T>>,
    ) {
        if current.len() == size {
            out.push(current.clone());
            return;
        }
        let remaining = size - current.len();
        for i in start..=items.len().saturating_sub(remaining) {
            current.push(items[i]);
            walk(items, size, i + 1, current, out);
            current.pop();
        }
    }

    let mut out = Vec::new();
    if size == 0 || size > items.len() {
        return out;
    }
    walk(items, size, 0, &mut Vec::with_capacity(size), &mut out);
    out
}

/// All voicings of `chord` allowed by `options`, least tense first
pub fn generate_voicings(chord: &Chord, options: &VoicingOptions) -> Result<Vec<ChordVoicing>> {
    options.validate()?;

    let stacked = stack_notes(chord, options.max_tone_spread, options.max_size);
    let bass = chord.bass();

    let mut voicings: Vec<ChordVoicing> = (options.min_size..=options.max_size.min(stacked.len()))
        .flat_map(|size| ordered_combinations(&stacked, size))
        .map(ChordVoicing::new)
        .filter(|voicing| {
            voicing.spread >= options.min_tone_spread && voicing.spread <= options.max_tone_spread
        })
        .filter(|voicing| !options.omit_degrees.iter().any(|d| voicing.contains_degree(d)))
        .filter(|voicing| options.guarantee_degrees.iter().all(|d| voicing.contains_degree(d)))
        .filter(|voicing| {
            !options.enforce_slash || voicing.voiced_notes.first().map(|v| v.note) == Some(bass)
        })
        .collect();

    voicings.sort_by_key(|v| (v.tension, v.spread));
    Ok(voicings)
}
