//! Peak concurrency analysis over note intervals.

use crate::event::{NoteInterval, Tick};

/// Interval boundary kind. Declaration order matters: `Leave` sorts before
/// `Enter`, so a note starting exactly when another ends is not counted as
/// concurrent. This matches the allocator's end-inclusive placement rule
/// (`start >= last.end` is eligible), so a greedy allocation with
/// `peak_concurrency` voices always succeeds.
///
/// A zero-length interval's leave instead sorts after enters at the same
/// tick (`LeaveEmpty`), so the interval is counted before it is released;
/// sorting it first would cancel a concurrently active note's count.
#[derive(PartialEq, Eq, PartialOrd, Ord)]
enum Boundary {
    Leave,
    Enter,
    LeaveEmpty,
}

/// Maximum number of intervals simultaneously active at any instant, or 0
/// for an empty input.
pub fn peak_concurrency(notes: &[NoteInterval]) -> usize {
    let mut boundaries: Vec<(Tick, Boundary)> = Vec::with_capacity(notes.len() * 2);
    for note in notes {
        boundaries.push((note.start, Boundary::Enter));
        let leave = if note.start == note.end {
            Boundary::LeaveEmpty
        } else {
            Boundary::Leave
        };
        boundaries.push((note.end, leave));
    }
    boundaries.sort();

    let mut active = 0usize;
    let mut peak = 0usize;
    for (_, boundary) in boundaries {
        match boundary {
            Boundary::Enter => {
                active += 1;
                peak = peak.max(active);
            }
            Boundary::Leave | Boundary::LeaveEmpty => active -= 1,
        }
    }
    peak
}
