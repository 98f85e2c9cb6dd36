//! The seven diatonic modes
//!
//! Each mode is fixed data: its semitone steps, the quality of the triad built
//! on every degree, the interval of every degree above the tonic, the Roman
//! numeral of every degree and the per-degree offset from Ionian.

use crate::error::{Result, TheoryError};
use crate::types::chord::ChordBase;
use crate::types::degree::{Alteration, ModeDegree};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModeName {
    Ionian,
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
    Aeolian,
    Locrian,
}

impl ModeName {
    pub const ALL: [ModeName; 7] = [
        ModeName::Ionian,
        ModeName::Dorian,
        ModeName::Phrygian,
        ModeName::Lydian,
        ModeName::Mixolydian,
        ModeName::Aeolian,
        ModeName::Locrian,
    ];

    /// Rotation of the Ionian step pattern this mode starts on
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            ModeName::Ionian => "Ionian",
            ModeName::Dorian => "Dorian",
            ModeName::Phrygian => "Phrygian",
            ModeName::Lydian => "Lydian",
            ModeName::Mixolydian => "Mixolydian",
            ModeName::Aeolian => "Aeolian",
            ModeName::Locrian => "Locrian",
        }
    }

    pub fn data(self) -> &'static Mode {
        &MODES[self.index()]
    }
}

impl FromStr for ModeName {
    type Err = TheoryError;

    /// Case-insensitive; `major` and `minor` are accepted for Ionian and Aeolian
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "ionian" | "major" => Ok(ModeName::Ionian),
            "dorian" => Ok(ModeName::Dorian),
            "phrygian" => Ok(ModeName::Phrygian),
            "lydian" => Ok(ModeName::Lydian),
            "mixolydian" => Ok(ModeName::Mixolydian),
            "aeolian" | "minor" => Ok(ModeName::Aeolian),
            "locrian" => Ok(ModeName::Locrian),
            _ => Err(TheoryError::malformed("mode name", s)),
        }
    }
}

impl fmt::Display for ModeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Mode {
    pub name: ModeName,
    /// Semitones from each degree to the next, wrapping back to the tonic
    pub semitone_steps: [u8; 7],
    pub chord_bases: [ChordBase; 7],
    /// Short interval name of each degree above the tonic
    pub intervals: [&'static str; 7],
    pub chord_numerals: [&'static str; 7],
    /// Semitone offset of each degree from the same Ionian degree
    pub ionian_adjustments: [i8; 7],
}

pub static MODES: [Mode; 7] = {
    use ChordBase::{Diminished as Dim, Major as Maj, Minor as Min};
    [
        Mode {
            name: ModeName::Ionian,
            semitone_steps: [2, 2, 1, 2, 2, 2, 1],
            chord_bases: [Maj, Min, Min, Maj, Maj, Min, Dim],
            intervals: ["P1", "M2", "M3", "P4", "P5", "M6", "M7"],
            chord_numerals: ["I", "ii", "iii", "IV", "V", "vi", "vii\u{2070}"],
            ionian_adjustments: [0, 0, 0, 0, 0, 0, 0],
        },
        Mode {
            name: ModeName::Dorian,
            semitone_steps: [2, 1, 2, 2, 2, 1, 2],
            chord_bases: [Min, Min, Maj, Maj, Min, Dim, Maj],
            intervals: ["P1", "M2", "m3", "P4", "P5", "M6", "m7"],
            chord_numerals: ["i", "ii", "\u{1d47}III", "IV", "v", "vi\u{2070}", "\u{1d47}VII"],
            ionian_adjustments: [0, 0, -1, 0, 0, 0, -1],
        },
        Mode {
            name: ModeName::Phrygian,
            semitone_steps: [1, 2, 2, 2, 1, 2, 2],
            chord_bases: [Min, Maj, Maj, Min, Dim, Maj, Min],
            intervals: ["P1", "m2", "m3", "P4", "P5", "m6", "m7"],
            chord_numerals: [
                "i",
                "\u{1d47}II",
                "\u{1d47}III",
                "iv",
                "v\u{2070}",
                "\u{1d47}VI",
                "\u{1d47}vii",
            ],
            ionian_adjustments: [0, -1, -1, 0, 0, -1, -1],
        },
        Mode {
            name: ModeName::Lydian,
            semitone_steps: [2, 2, 2, 1, 2, 2, 1],
            chord_bases: [Maj, Maj, Min, Dim, Maj, Min, Min],
            intervals: ["P1", "M2", "M3", "TT", "P5", "M6", "M7"],
            chord_numerals: ["I", "II", "iii", "#iv\u{2070}", "V", "vi", "vii"],
            ionian_adjustments: [0, 0, 0, 1, 0, 0, 0],
        },
        Mode {
            name: ModeName::Mixolydian,
            semitone_steps: [2, 2, 1, 2, 2, 1, 2],
            chord_bases: [Maj, Min, Dim, Maj, Min, Min, Maj],
            intervals: ["P1", "M2", "M3", "P4", "P5", "M6", "m7"],
            chord_numerals: ["I", "ii", "iii\u{2070}", "IV", "v", "vi", "\u{1d47}VII"],
            ionian_adjustments: [0, 0, 0, 0, 0, 0, -1],
        },
        Mode {
            name: ModeName::Aeolian,
            semitone_steps: [2, 1, 2, 2, 1, 2, 2],
            chord_bases: [Min, Dim, Maj, Min, Min, Maj, Maj],
            intervals: ["P1", "M2", "m3", "P4", "P5", "m6", "m7"],
            chord_numerals: [
                "i",
                "ii\u{2070}",
                "\u{1d47}III",
                "iv",
                "v",
                "\u{1d47}VI",
                "\u{1d47}VII",
            ],
            ionian_adjustments: [0, 0, -1, 0, 0, -1, -1],
        },
        Mode {
            name: ModeName::Locrian,
            semitone_steps: [1, 2, 2, 1, 2, 2, 2],
            chord_bases: [Dim, Maj, Min, Min, Maj, Maj, Min],
            intervals: ["P1", "m2", "m3", "P4", "TT", "m6", "m7"],
            chord_numerals: [
                "i\u{2070}",
                "\u{1d47}II",
                "\u{1d47}iii",
                "iv",
                "\u{1d47}V",
                "\u{1d47}VI",
                "\u{1d47}vii",
            ],
            ionian_adjustments: [0, -1, -1, 0, -1, -1, -1],
        },
    ]
};

/// Direct table access
pub fn mode_data(name: ModeName) -> &'static Mode {
    name.data()
}

impl Mode {
    /// Semitones from the tonic to each standard degree (degree 1 is 0)
    pub fn offsets(&self) -> [u8; 7] {
        let mut offsets = [0u8; 7];
        for i in 1..7 {
            offsets[i] = offsets[i - 1] + self.semitone_steps[i - 1];
        }
        offsets
    }

    /// Semitones from the tonic to any degree, altered ones included
    pub fn degree_offset(&self, degree: ModeDegree) -> i8 {
        let base = self.offsets()[degree.index()] as i8;
        match degree.alteration() {
            Alteration::Flat => base - 1,
            Alteration::Natural => base,
            Alteration::Sharp => base + 1,
        }
    }

    /// Each degree spelled against the Ionian degrees (Dorian: 1 2 b3 4 5 6 b7)
    pub fn ionian_degrees(&self) -> [ModeDegree; 7] {
        let mut degrees = ModeDegree::STANDARD;
        for (degree, adjustment) in degrees.iter_mut().zip(self.ionian_adjustments) {
            let alteration = match adjustment {
                a if a < 0 => Alteration::Flat,
                a if a > 0 => Alteration::Sharp,
                _ => Alteration::Natural,
            };
            *degree = degree.with_alteration(alteration);
        }
        degrees
    }

    /// Conventional name of a standard degree (1-7). The seventh is the
    /// leading tone when it sits a semitone under the tonic.
    pub fn degree_name(&self, degree: ModeDegree) -> &'static str {
        match degree.number() {
            1 => "Tonic",
            2 => "Supertonic",
            3 => "Mediant",
            4 => "Subdominant",
            5 => "Dominant",
            6 => "Submediant",
            _ if self.semitone_steps[6] == 1 => "Leading Tone",
            _ => "Subtonic",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::interval::Interval;

    #[test]
    fn test_steps_sum_to_octave() {
        for mode in MODES.iter() {
            let total: u8 = mode.semitone_steps.iter().sum();
            assert_eq!(total, 12, "{} steps sum to {}", mode.name, total);
            assert!(mode.semitone_steps.iter().all(|&s| s == 1 || s == 2));
        }
    }

    #[test]
    fn test_modes_are_rotations_of_ionian() {
        let ionian = ModeName::Ionian.data().semitone_steps;
        for name in ModeName::ALL {
            let mut rotated = ionian;
            rotated.rotate_left(name.index());
            assert_eq!(name.data().semitone_steps, rotated, "{}", name);
            assert_eq!(name.data().name, name);
        }
    }

    #[test]
    fn test_intervals_match_offsets() {
        for mode in MODES.iter() {
            for (offset, short) in mode.offsets().iter().zip(mode.intervals) {
                let interval = Interval::from_short_name(short).unwrap();
                assert_eq!(interval.length, *offset, "{} {}", mode.name, short);
            }
        }
    }

    #[test]
    fn test_ionian_adjustments_match_offsets() {
        let ionian = ModeName::Ionian.data().offsets();
        for mode in MODES.iter() {
            for (i, offset) in mode.offsets().iter().enumerate() {
                assert_eq!(
                    *offset as i8 - ionian[i] as i8,
                    mode.ionian_adjustments[i],
                    "{} degree {}",
                    mode.name,
                    i + 1
                );
            }
        }
    }

    #[test]
    fn test_ionian_degrees() {
        let dorian: Vec<String> = ModeName::Dorian
            .data()
            .ionian_degrees()
            .iter()
            .map(|d| d.to_string())
            .collect();
        assert_eq!(dorian, vec!["1", "2", "b3", "4", "5", "6", "b7"]);

        let lydian = ModeName::Lydian.data().ionian_degrees();
        assert_eq!(lydian[3].to_string(), "#4");
    }

    #[test]
    fn test_mode_name_parsing() {
        assert_eq!("dorian".parse::<ModeName>().unwrap(), ModeName::Dorian);
        assert_eq!("MAJOR".parse::<ModeName>().unwrap(), ModeName::Ionian);
        assert_eq!("minor".parse::<ModeName>().unwrap(), ModeName::Aeolian);
        assert!("hypodorian".parse::<ModeName>().is_err());
    }

    #[test]
    fn test_degree_offsets_and_names() {
        let ionian = mode_data(ModeName::Ionian);
        assert_eq!(ionian.degree_offset("b3".parse().unwrap()), 3);
        assert_eq!(ionian.degree_offset("#4".parse().unwrap()), 6);
        assert_eq!(ionian.degree_name("7".parse().unwrap()), "Leading Tone");
        assert_eq!(
            mode_data(ModeName::Aeolian).degree_name("7".parse().unwrap()),
            "Subtonic"
        );
    }
}
