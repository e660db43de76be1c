//! Merging of per-stream control events into one timeline.

use crate::event::ControlEvent;

/// Merge control events from multiple source streams into a single list
/// ordered by absolute time. The sort is stable, so events sharing a
/// timestamp keep stream order first and original in-stream order second.
pub fn merge_control<P>(per_stream: Vec<Vec<ControlEvent<P>>>) -> Vec<ControlEvent<P>> {
    let mut merged: Vec<ControlEvent<P>> = per_stream.into_iter().flatten().collect();
    merged.sort_by_key(|event| event.time);
    merged
}
