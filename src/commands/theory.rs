//! Theory commands (key, triads, tonics, modes, chord, voicings, interval)

use crate::commands::{CommandContext, CommandResult};
use anyhow::{anyhow, bail, Context, Result};
use colored::*;
use modal_core::types::interval::{lookup_interval, semitones_between};
use modal_core::types::{
    build_chord, generate_voicings, valid_tonics, Chord, ChordSpec, IntervalIdentifier, Key,
    ModeDegree, ModeName, Note, VoicingOptions, MODES,
};

/// Voicings listed before the rest are summarized
const MAX_LISTED_VOICINGS: usize = 12;

fn join<T: ToString>(items: &[T]) -> String {
    items
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// `<tonic> [mode]`, mode defaulting to Ionian
fn parse_key(args: &str) -> Result<Key> {
    let mut parts = args.split_whitespace();
    let tonic: Note = parts
        .next()
        .ok_or_else(|| anyhow!("usage: <tonic> [mode]"))?
        .parse()?;
    let mode = match parts.next() {
        Some(mode) => mode.parse()?,
        None => ModeName::Ionian,
    };
    Ok(Key::new(tonic, mode)?)
}

/// `<root> <base> [tokens..]`
fn parse_chord(args: &str) -> Result<Chord> {
    let (root, spec) = args.split_once(char::is_whitespace).ok_or_else(|| {
        anyhow!("usage: <root> <base> [extension] [alterations] [additions] [/slash]")
    })?;
    let root: Note = root.parse()?;
    let spec: ChordSpec = spec.parse()?;
    build_chord(root, &spec).with_context(|| format!("building {} {}", root, spec.base))
}

fn key_report(key: &Key) -> String {
    let mode = key.mode().data();
    let mut out = format!("{}\n", key);
    for degree in ModeDegree::STANDARD {
        out.push_str(&format!(
            "  {:<3} {:<4} {:<13} {}\n",
            degree.to_string().bright_black(),
            key.note(degree).to_string().cyan(),
            mode.degree_name(degree),
            mode.intervals[degree.index()]
        ));
    }
    if !key.enharmonic_equivalents().is_empty() {
        out.push_str(&format!(
            "  {} {}\n",
            "enharmonic:".bright_black(),
            join(key.enharmonic_equivalents())
        ));
    }
    if key.is_theoretical() {
        out.push_str(&format!("  {}\n", "theoretical key".bright_red()));
    }
    out.trim_end().to_string()
}

/// Handle `key <tonic> [mode]`
pub fn cmd_key(args: &str, _ctx: &mut CommandContext) -> CommandResult {
    CommandResult::from_output(parse_key(args).map(|key| key_report(&key)))
}

/// Handle `triads <tonic> [mode]`
pub fn cmd_triads(args: &str, _ctx: &mut CommandContext) -> CommandResult {
    CommandResult::from_output(parse_key(args).map(|key| {
        let mut out = format!("{}\n", key);
        for triad in key.diatonic_chords() {
            out.push_str(&format!("  {}\n", triad));
        }
        out.trim_end().to_string()
    }))
}

fn tonics_report(args: &str) -> Result<String> {
    if args.is_empty() {
        bail!("usage: tonics <mode>");
    }
    let mode: ModeName = args.parse()?;
    let tonics = valid_tonics(mode);
    let (theoretical, standard): (Vec<Note>, Vec<Note>) = tonics
        .iter()
        .partition(|tonic| Key::new(**tonic, mode).map_or(false, |k| k.is_theoretical()));
    Ok(format!(
        "{} ({} tonics)\n  standard:    {}\n  theoretical: {}",
        mode.to_string().green().bold(),
        tonics.len(),
        join(&standard),
        join(&theoretical)
    ))
}

/// Handle `tonics <mode>`
pub fn cmd_tonics(args: &str, _ctx: &mut CommandContext) -> CommandResult {
    CommandResult::from_output(tonics_report(args))
}

/// Handle `modes`
pub fn cmd_modes(_args: &str, _ctx: &mut CommandContext) -> CommandResult {
    let mut out = String::new();
    for mode in MODES.iter() {
        let steps: Vec<String> = mode.semitone_steps.iter().map(|s| s.to_string()).collect();
        out.push_str(&format!(
            "{:<11} {}  {}\n",
            mode.name.to_string().green().bold(),
            steps.join(" "),
            mode.chord_numerals.join(" ")
        ));
    }
    CommandResult::Message(out.trim_end().to_string())
}

/// Handle `chord <root> <base> ...`
pub fn cmd_chord(args: &str, _ctx: &mut CommandContext) -> CommandResult {
    CommandResult::from_output(parse_chord(args).map(|chord| {
        let intervals: Vec<&str> = chord.intervals().iter().map(|i| i.short_name).collect();
        format!(
            "{}\n  degrees:   {}\n  intervals: {}",
            chord,
            join(chord.degrees()),
            intervals.join(", ")
        )
    }))
}

fn voicings_report(args: &str, options: &VoicingOptions) -> Result<String> {
    let chord = parse_chord(args)?;
    let voicings = generate_voicings(&chord, options)?;
    let mut out = format!("{} ({} voicings)\n", chord, voicings.len());
    for voicing in voicings.iter().take(MAX_LISTED_VOICINGS) {
        out.push_str(&format!("  {}\n", voicing));
    }
    if voicings.len() > MAX_LISTED_VOICINGS {
        let more = format!("... {} more", voicings.len() - MAX_LISTED_VOICINGS);
        out.push_str(&format!("  {}\n", more.bright_black()));
    }
    Ok(out.trim_end().to_string())
}

/// Handle `voicings <root> <base> ...`
pub fn cmd_voicings(args: &str, ctx: &mut CommandContext) -> CommandResult {
    CommandResult::from_output(voicings_report(args, &ctx.voicing_options))
}

/// Handle `voicings preset <close|open|wide|default>`
pub fn cmd_voicings_preset(args: &str, ctx: &mut CommandContext) -> CommandResult {
    let options = match args {
        "close" => VoicingOptions::close(),
        "open" => VoicingOptions::open(),
        "wide" => VoicingOptions::wide(),
        "default" => VoicingOptions::default(),
        _ => {
            return CommandResult::Error(
                "Unknown preset. Use close, open, wide or default".to_string(),
            )
        }
    };
    let message = format!(
        "Voicing spread {}-{} semitones, {}-{} notes",
        options.min_tone_spread, options.max_tone_spread, options.min_size, options.max_size
    );
    ctx.voicing_options = options;
    CommandResult::Message(message.bright_green().to_string())
}

fn interval_report(args: &str) -> Result<String> {
    if args.is_empty() {
        bail!("usage: interval <name|short name|semitones> or interval <note> <note>");
    }

    let notes: Vec<Note> = args
        .split_whitespace()
        .map(str::parse)
        .collect::<std::result::Result<_, _>>()
        .unwrap_or_default();
    let interval = if let [from, to] = notes[..] {
        let distance = semitones_between(&from, &to) as i32;
        lookup_interval(&IntervalIdentifier::Distance(distance))?
    } else {
        lookup_interval(&args.parse()?)?
    };

    let mut out = format!(
        "{} ({}): {} semitones, tension {}",
        interval.name.green().bold(),
        interval.short_name,
        interval.length,
        interval.tension
    );
    if !interval.alternate_names.is_empty() {
        out.push_str(&format!("\n  also: {}", interval.alternate_names.join(", ")));
    }
    Ok(out)
}

/// Handle `interval <identifier>` and `interval <note> <note>`
pub fn cmd_interval(args: &str, _ctx: &mut CommandContext) -> CommandResult {
    CommandResult::from_output(interval_report(args))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(handler: fn(&str, &mut CommandContext) -> CommandResult, args: &str) -> String {
        colored::control::set_override(false);
        let mut ctx = CommandContext::new();
        match handler(args, &mut ctx) {
            CommandResult::Message(m) => m,
            CommandResult::Error(e) => format!("ERROR {}", e),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_key_command() {
        let out = run(cmd_key, "D Dorian");
        assert!(out.starts_with("D Dorian (no accidentals): [D, E, F, G, A, B, C]"));
        assert!(out.contains("Subtonic"));

        let out = run(cmd_key, "G#");
        assert!(out.contains("8#"));
        assert!(out.contains("theoretical key"));
    }

    #[test]
    fn test_key_command_errors() {
        assert!(run(cmd_key, "").starts_with("ERROR usage"));
        assert_eq!(
            run(cmd_key, "Fbb Ionian"),
            "ERROR there is no key in mode Ionian with tonic Fbb"
        );
        assert!(run(cmd_key, "C blues").contains("malformed mode name"));
    }

    #[test]
    fn test_chord_command() {
        let out = run(cmd_chord, "G min 7 #5 add13");
        assert!(out.starts_with("Gmin7#5add13: [G, Bb, D#, F, E]"));
        assert!(out.contains("degrees:   1, b3, #5, b7, 13"));
        assert!(out.contains("intervals: P1, m3, m6, m7, M6"));

        assert!(run(cmd_chord, "C").starts_with("ERROR usage"));
        assert!(run(cmd_chord, "C maj /4").contains("slash degree 4"));
    }

    #[test]
    fn test_voicings_command() {
        let mut ctx = CommandContext::new();
        colored::control::set_override(false);
        assert!(matches!(
            cmd_voicings_preset("close", &mut ctx),
            CommandResult::Message(_)
        ));
        assert_eq!(ctx.voicing_options, VoicingOptions::close());

        match cmd_voicings("C maj", &mut ctx) {
            CommandResult::Message(m) => {
                assert!(m.contains("(5 voicings)"));
                assert!(m.contains("[C0 G0 C1] tension 1, spread 12"));
            }
            other => panic!("unexpected {:?}", other),
        }

        assert!(matches!(
            cmd_voicings_preset("tight", &mut ctx),
            CommandResult::Error(_)
        ));
    }

    #[test]
    fn test_interval_command() {
        assert!(run(cmd_interval, "P5").starts_with("Perfect Fifth (P5): 7 semitones, tension 0"));
        assert!(run(cmd_interval, "24").starts_with("Perfect Octave (P8)"));
        assert!(run(cmd_interval, "tritone").contains("Diminished Fifth"));
        assert!(run(cmd_interval, "C Eb").starts_with("Minor Third (m3)"));
        assert!(run(cmd_interval, "wrong").starts_with("ERROR"));
    }

    #[test]
    fn test_listing_commands() {
        let out = run(cmd_modes, "");
        assert_eq!(out.lines().count(), 7);
        assert!(out.lines().next().unwrap().starts_with("Ionian"));

        let out = run(cmd_tonics, "Locrian");
        assert!(out.contains("B##"));
        assert!(run(cmd_tonics, "").starts_with("ERROR usage"));

        let out = run(cmd_triads, "C");
        assert!(out.contains("ii Dmin: [D, F, A]"));
    }
}
