use tonegen::{
    assemble, generate,
    sequencing::{self, Melody},
    Note, ToneError, Waveform, AMPLITUDE_SCALE,
};

fn note(frequency: u32, duration: f64, waveform: Waveform) -> Note {
    Note::new(frequency, duration, waveform).unwrap()
}

#[test]
fn sine_then_square_fills_one_second() {
    let melody = Melody::new()
        .with_note(note(440, 0.5, Waveform::Sine))
        .with_note(note(440, 0.5, Waveform::Square));

    let signal = assemble(&melody).unwrap();
    assert_eq!(signal.len(), 2 * 22_050);

    let (first, second) = signal.samples().split_at(22_050);
    assert_eq!(first, generate(440, 0.5, Waveform::Sine).unwrap().samples());
    assert_eq!(second, generate(440, 0.5, Waveform::Square).unwrap().samples());
}

#[test]
fn empty_melody_renders_nothing() {
    let signal = assemble(&Melody::new()).unwrap();
    assert_eq!(signal.len(), 0);
}

#[test]
fn demo_melody_renders_two_seconds_within_range() {
    let melody = sequencing::demo().unwrap();
    let signal = assemble(&melody).unwrap();
    assert_eq!(signal.len(), 88_200);
    assert!((signal.duration_secs() - 2.0).abs() < 1e-9);
    assert!(signal
        .samples()
        .iter()
        .all(|s| (-AMPLITUDE_SCALE..=AMPLITUDE_SCALE).contains(s)));

    // Each quarter is the standalone tone for that waveform
    for (i, n) in melody.notes().iter().enumerate() {
        let tone = n.generate().unwrap();
        let start = i * 22_050;
        assert_eq!(&signal.samples()[start..start + 22_050], tone.samples(), "note {i}");
    }
}

#[test]
fn no_gap_between_notes() {
    // The sawtooth stops mid-ramp; the following sine must start at exactly 0
    let melody = Melody::new()
        .with_note(note(441, 0.01, Waveform::Sawtooth))
        .with_note(note(441, 0.01, Waveform::Sine));
    let signal = assemble(&melody).unwrap();
    assert_eq!(signal.len(), 882);
    assert_eq!(signal.samples()[441], 0);
    assert_eq!(signal.samples()[440], -600);
}

#[test]
fn invalid_notes_never_reach_the_assembler() {
    assert!(matches!(Note::new(0, 0.5, Waveform::Sine), Err(ToneError::InvalidFrequency(0))));
    assert!(matches!(Note::new(440, 0.0, Waveform::Sine), Err(ToneError::InvalidDuration(_))));
}

#[test]
fn oversized_melody_fails_before_generating() {
    let melody = Melody::new()
        .with_note(note(440, 0.5, Waveform::Sine))
        .with_note(note(440, 1.0e300, Waveform::Square));
    assert!(matches!(assemble(&melody), Err(ToneError::Allocation { .. })));
}
