//! Fixed melody table and note lookup by elapsed time.

/// One melody step: wait `delay_units`, then start `pitch`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NoteEvent {
    /// Units between the previous onset and this one
    pub delay_units: u8,
    /// MIDI pitch sounding from this onset until the next
    pub pitch: u8,
}

impl NoteEvent {
    pub const fn new(delay_units: u8, pitch: u8) -> Self {
        Self { delay_units, pitch }
    }
}

/// Note sounding at a given time
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoteMatch {
    pub pitch: f32,
    /// Onset of the note (melody units)
    pub onset_units: f32,
}

const fn n(delay_units: u8, pitch: u8) -> NoteEvent {
    NoteEvent::new(delay_units, pitch)
}

/// The song, in onset order
#[rustfmt::skip]
pub const MELODY: &[NoteEvent] = &[
    n(10, 71), n(2, 76), n(3, 79), n(1, 78), n(2, 76), n(4, 83), n(2, 81), n(6, 78), n(6, 76), n(3, 79),
    n(1, 78), n(2, 74), n(4, 77), n(2, 71), n(10, 71), n(2, 76), n(3, 79), n(1, 78), n(2, 76), n(4, 83),
    n(2, 86), n(4, 85), n(2, 84), n(4, 80), n(2, 84), n(3, 83), n(1, 82), n(2, 71), n(4, 79), n(2, 76),
    n(10, 79), n(2, 83), n(4, 79), n(2, 83), n(4, 79), n(2, 84), n(4, 83), n(2, 82), n(4, 78), n(2, 79),
    n(3, 83), n(1, 82), n(2, 70), n(4, 71), n(2, 83), n(10, 79), n(2, 83), n(4, 79), n(2, 83), n(4, 79),
    n(2, 86), n(4, 85), n(2, 84), n(4, 80), n(2, 84), n(3, 83), n(1, 82), n(2, 71), n(4, 79), n(2, 76),
];

/// Onset of the final note (melody units); the last pitch rings out after it
pub fn melody_length_units() -> u32 {
    MELODY.iter().map(|e| e.delay_units as u32).sum()
}

/// Find the note sounding at `t_units`
///
/// Walks the table accumulating delays. The last onset strictly before
/// `t_units` wins; onsets are increasing, so the walk stops at the first one
/// not yet reached. Returns `None` before the first onset.
pub fn lookup(t_units: f32) -> Option<NoteMatch> {
    let mut boundary = 0.0f32;
    let mut found = None;

    for event in MELODY {
        boundary += event.delay_units as f32;
        if t_units > boundary {
            found = Some(NoteMatch {
                pitch: event.pitch as f32,
                onset_units: boundary,
            });
        } else {
            break;
        }
    }

    found
}
