#[cfg(test)]
mod tests {
    use modal_core::types::key::{is_valid_tonic, valid_tonics, Key, KeySignature};
    use modal_core::types::note::{table_notes, NaturalNote, Note};
    use modal_core::types::{build_chord, ChordSpec, ModeDegree, ModeName};
    use std::collections::BTreeSet;

    fn every_key() -> impl Iterator<Item = Key> {
        ModeName::ALL.into_iter().flat_map(|mode| {
            valid_tonics(mode)
                .iter()
                .map(move |tonic| Key::new(*tonic, mode).unwrap())
        })
    }

    #[test]
    fn test_every_key_uses_each_letter_once() {
        for key in every_key() {
            let letters: BTreeSet<NaturalNote> = key.notes().iter().map(Note::letter).collect();
            assert_eq!(letters.len(), 7, "{} {} repeats a letter", key.tonic(), key.mode());
        }
    }

    #[test]
    fn test_signatures_never_mix_and_match_notes() {
        for key in every_key() {
            let sharps: u8 = key.notes().iter().map(Note::sharps).sum();
            let flats: u8 = key.notes().iter().map(Note::flats).sum();
            assert!(sharps == 0 || flats == 0, "{} {}", key.tonic(), key.mode());

            let expected = match (sharps, flats) {
                (0, 0) => KeySignature::Natural,
                (s, 0) => KeySignature::Sharps(s),
                (_, f) => KeySignature::Flats(f),
            };
            assert_eq!(key.signature(), expected);
            assert!(key.signature().count() <= 14);
            assert_eq!(key.is_theoretical(), key.signature().count() > 7);
        }
    }

    #[test]
    fn test_degree_round_trip_for_every_key() {
        for key in every_key() {
            for degree in ModeDegree::STANDARD {
                let note = key.note(degree);
                assert_eq!(key.notes_by_degree()[&degree], note);
                assert_eq!(
                    key.degree_of(&note),
                    Some(degree),
                    "{} {} degree {}",
                    key.tonic(),
                    key.mode(),
                    degree
                );
            }
        }
    }

    #[test]
    fn test_every_tone_has_a_tonic_in_every_mode() {
        for mode in ModeName::ALL {
            let tones: BTreeSet<u8> = valid_tonics(mode).iter().map(Note::tone_index).collect();
            assert_eq!(tones.len(), 12, "{}", mode);
        }
    }

    #[test]
    fn test_invalid_tonics_are_rejected_not_simplified() {
        for mode in ModeName::ALL {
            for note in table_notes().filter(|n| !is_valid_tonic(n, mode)) {
                assert!(Key::new(note, mode).is_err(), "{} {}", note, mode);
            }
        }
    }

    #[test]
    fn test_enharmonic_equivalents_are_symmetric() {
        for key in every_key() {
            for other in key.enharmonic_equivalents() {
                let other = Key::new(*other, key.mode()).unwrap();
                assert!(other.enharmonic_equivalents().contains(&key.tonic()));
                assert_eq!(other.tonic().tone_index(), key.tonic().tone_index());
            }
        }
    }

    #[test]
    fn test_relative_keys_share_notes() {
        for key in every_key() {
            for mode in ModeName::ALL {
                let relative = key.relative(mode).unwrap();
                let ours: BTreeSet<Note> = key.notes().iter().copied().collect();
                let theirs: BTreeSet<Note> = relative.notes().iter().copied().collect();
                assert_eq!(ours, theirs);
            }
        }
    }

    #[test]
    fn test_diatonic_triads_match_chord_builder() {
        let key = Key::new("C".parse().unwrap(), ModeName::Ionian).unwrap();
        for triad in key.diatonic_chords() {
            let chord = build_chord(triad.notes[0], &ChordSpec::new(triad.base)).unwrap();
            assert_eq!(chord.notes(), &triad.notes[..]);
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_tokens() {
        let key = Key::new("Bb".parse().unwrap(), ModeName::Dorian).unwrap();
        let json = serde_json::to_value(&key).unwrap();
        assert_eq!(json["tonic"], "Bb");
        assert_eq!(json["mode"], "Dorian");
        assert_eq!(json["signature"], "4b");
        assert_eq!(json["notes_by_degree"]["b3"], "C");

        let spec: ChordSpec =
            serde_json::from_str(r##"{"base":"min","extension":"7","alterations":["#5"]}"##).unwrap();
        assert_eq!(spec, "min 7 #5".parse::<ChordSpec>().unwrap());
    }
}
