//! End-to-end pipeline tests over in-memory MIDI files.

use midisplit::prelude::*;
use midisplit::smf::midly::num::u28;
use midisplit::smf::midly::{
    Format, Header, MetaMessage, MidiMessage, Smf, Timing, TrackEvent, TrackEventKind,
};
use midisplit::{extract, ParsedSmf};

fn on(delta: u32, key: u8, velocity: u8) -> TrackEvent<'static> {
    TrackEvent {
        delta: u28::try_from(delta).unwrap(),
        kind: TrackEventKind::Midi {
            channel: 0.into(),
            message: MidiMessage::NoteOn {
                key: key.into(),
                vel: velocity.into(),
            },
        },
    }
}

fn off(delta: u32, key: u8) -> TrackEvent<'static> {
    TrackEvent {
        delta: u28::try_from(delta).unwrap(),
        kind: TrackEventKind::Midi {
            channel: 0.into(),
            message: MidiMessage::NoteOff {
                key: key.into(),
                vel: 0.into(),
            },
        },
    }
}

fn meta(delta: u32, message: MetaMessage<'static>) -> TrackEvent<'static> {
    TrackEvent {
        delta: u28::try_from(delta).unwrap(),
        kind: TrackEventKind::Meta(message),
    }
}

/// Two tracks: a tempo map plus a three-note chord followed by a melody
/// note that starts exactly when the chord ends.
fn chord_and_melody() -> Vec<u8> {
    let mut smf = Smf::new(Header::new(Format::Parallel, Timing::Metrical(480.into())));
    smf.tracks.push(vec![
        meta(0, MetaMessage::Tempo(500_000.into())),
        meta(960, MetaMessage::Tempo(400_000.into())),
        meta(0, MetaMessage::EndOfTrack),
    ]);
    smf.tracks.push(vec![
        on(0, 60, 100),
        on(0, 64, 100),
        on(0, 67, 100),
        off(480, 60),
        off(0, 64),
        off(0, 67),
        on(0, 72, 90),
        off(240, 72),
        meta(0, MetaMessage::EndOfTrack),
    ]);

    let mut bytes = Vec::new();
    smf.write_std(&mut bytes).unwrap();
    bytes
}

#[test]
fn balanced_split_reports_and_reproduces_the_input() {
    let input = chord_and_melody();
    let splitter = Splitter::builder()
        .max_voices(8)
        .strategy(Strategy::Balanced)
        .build()
        .unwrap();

    let out = splitter.split(&input).unwrap();
    let report = &out.report;

    assert_eq!(report.notes_per_track, vec![0, 4]);
    assert_eq!(report.total_notes, 4);
    assert_eq!(report.peak_concurrency, 3);
    assert_eq!(report.requested_voices, 8);
    // Auto-tuned down to the peak.
    assert_eq!(report.effective_voices, 3);
    assert_eq!(report.voice_note_counts.iter().sum::<usize>(), 4);
    assert_eq!(report.dropped_notes, 0);
    assert_eq!(report.control_events, 2);

    // Output: meta track plus three non-empty voices.
    let reparsed = ParsedSmf::parse(&out.bytes).unwrap();
    assert_eq!(reparsed.streams.len(), 4);

    // Every note tick survives the round trip exactly.
    let re_extraction = extract(reparsed.streams);
    let mut notes: Vec<(u64, u64, u8, u8)> = re_extraction
        .notes
        .iter()
        .map(|n| (n.start, n.end, n.key, n.velocity))
        .collect();
    notes.sort();
    assert_eq!(
        notes,
        vec![
            (0, 480, 60, 100),
            (0, 480, 64, 100),
            (0, 480, 67, 100),
            (480, 720, 72, 90),
        ]
    );
}

#[test]
fn tempo_events_are_merged_into_the_meta_track() {
    let input = chord_and_melody();
    let splitter = Splitter::builder()
        .max_voices(4)
        .strategy(Strategy::FirstFit)
        .build()
        .unwrap();
    let out = splitter.split(&input).unwrap();

    let smf = Smf::parse(&out.bytes).unwrap();
    let meta_track = &smf.tracks[0];
    let tempos: Vec<(u32, u32)> = meta_track
        .iter()
        .scan(0u32, |now, event| {
            *now += event.delta.as_int();
            match &event.kind {
                TrackEventKind::Meta(MetaMessage::Tempo(t)) => Some(Some((*now, t.as_int()))),
                _ => Some(None),
            }
        })
        .flatten()
        .collect();
    assert_eq!(tempos, vec![(0, 500_000), (960, 400_000)]);
}

#[test]
fn drop_excess_with_one_voice_drops_the_overflow() {
    let input = chord_and_melody();
    let splitter = Splitter::builder()
        .max_voices(1)
        .strategy(Strategy::DropExcess)
        .build()
        .unwrap();
    let out = splitter.split(&input).unwrap();

    // One chord note placed, two dropped, melody note placed.
    assert_eq!(out.report.effective_voices, 1);
    assert_eq!(out.report.voice_note_counts, vec![2]);
    assert_eq!(out.report.dropped_notes, 2);
}

#[test]
fn first_fit_fails_when_the_chord_exceeds_the_voice_limit() {
    let input = chord_and_melody();
    let splitter = Splitter::builder()
        .max_voices(2)
        .strategy(Strategy::FirstFit)
        .build()
        .unwrap();

    let err = splitter.split(&input).unwrap_err();
    assert!(matches!(
        err,
        midisplit::Error::Core(midisplit::core::Error::CapacityExceeded { max_voices: 2, .. })
    ));
}

#[test]
fn auto_tune_can_be_disabled() {
    let input = chord_and_melody();
    let splitter = Splitter::builder()
        .max_voices(8)
        .strategy(Strategy::Balanced)
        .auto_tune(false)
        .build()
        .unwrap();
    let out = splitter.split(&input).unwrap();
    assert_eq!(out.report.effective_voices, 8);
    assert_eq!(out.report.voice_note_counts.len(), 8);
}

#[test]
fn notes_only_input_produces_no_meta_track() {
    let mut smf = Smf::new(Header::new(Format::Parallel, Timing::Metrical(96.into())));
    smf.tracks.push(vec![
        on(0, 60, 80),
        off(96, 60),
        meta(0, MetaMessage::EndOfTrack),
    ]);
    let mut input = Vec::new();
    smf.write_std(&mut input).unwrap();

    let splitter = Splitter::builder()
        .max_voices(2)
        .strategy(Strategy::Balanced)
        .build()
        .unwrap();
    let out = splitter.split(&input).unwrap();
    assert_eq!(out.report.control_events, 0);

    let reparsed = Smf::parse(&out.bytes).unwrap();
    assert_eq!(reparsed.tracks.len(), 1);
    match &reparsed.header.timing {
        Timing::Metrical(t) => assert_eq!(t.as_int(), 96),
        other => panic!("expected metrical timing, got {other:?}"),
    }
}

#[test]
fn report_serializes_to_json() {
    let input = chord_and_melody();
    let splitter = Splitter::builder()
        .max_voices(4)
        .strategy(Strategy::Balanced)
        .build()
        .unwrap();
    let report = splitter.split(&input).unwrap().report;

    let json = serde_json::to_string(&report).unwrap();
    let back: SplitReport = serde_json::from_str(&json).unwrap();
    assert_eq!(back, report);
}
