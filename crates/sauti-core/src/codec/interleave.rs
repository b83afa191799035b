//! Deterministic merge of per-stream event lists.

use super::align::Event;

/// Merge per-stream event lists into one globally ordered sequence.
///
/// Events sort by ascending primary frame; equal frames fall back to the
/// declared stream priority carried with each list. The sort is stable, so
/// within-stream order (already monotonic) is preserved, and re-encoding the
/// same input is byte-identical. No event is merged or dropped.
pub(crate) fn interleave(per_stream: Vec<(usize, Vec<Event>)>) -> Vec<Event> {
    let mut tagged: Vec<(usize, Event)> = per_stream
        .into_iter()
        .flat_map(|(priority, events)| events.into_iter().map(move |e| (priority, e)))
        .collect();

    tagged.sort_by_key(|(priority, event)| (event.primary_frame, *priority));
    tagged.into_iter().map(|(_, event)| event).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StreamRole;

    fn event(role: StreamRole, code: u32, primary_frame: usize) -> Event {
        Event {
            role,
            code,
            primary_frame,
        }
    }

    #[test]
    fn orders_by_primary_frame_across_streams() {
        let merged = interleave(vec![
            (0, vec![event(StreamRole::Pitch, 3, 0), event(StreamRole::Pitch, 9, 4)]),
            (1, vec![event(StreamRole::Content, 5, 0), event(StreamRole::Content, 7, 2)]),
        ]);
        let frames: Vec<usize> = merged.iter().map(|e| e.primary_frame).collect();
        assert_eq!(frames, vec![0, 0, 2, 4]);
    }

    #[test]
    fn ties_follow_declared_priority_not_input_order() {
        // Content listed first in the input, but its priority index says last.
        let merged = interleave(vec![
            (2, vec![event(StreamRole::Content, 5, 0)]),
            (0, vec![event(StreamRole::Style, 8, 0)]),
            (1, vec![event(StreamRole::Pitch, 3, 0)]),
        ]);
        let roles: Vec<StreamRole> = merged.iter().map(|e| e.role).collect();
        assert_eq!(
            roles,
            vec![StreamRole::Style, StreamRole::Pitch, StreamRole::Content]
        );
    }

    #[test]
    fn within_stream_order_survives_equal_frames() {
        // Two pitch events attributed to the same primary frame keep their
        // stream order.
        let merged = interleave(vec![(
            0,
            vec![event(StreamRole::Pitch, 1, 3), event(StreamRole::Pitch, 2, 3)],
        )]);
        let codes: Vec<u32> = merged.iter().map(|e| e.code).collect();
        assert_eq!(codes, vec![1, 2]);
    }

    #[test]
    fn per_stream_frames_stay_monotonic_after_merge() {
        let merged = interleave(vec![
            (0, vec![event(StreamRole::Style, 1, 0), event(StreamRole::Style, 2, 50)]),
            (
                1,
                vec![
                    event(StreamRole::Content, 4, 0),
                    event(StreamRole::Content, 6, 20),
                    event(StreamRole::Content, 4, 60),
                ],
            ),
        ]);
        for role in [StreamRole::Style, StreamRole::Content] {
            let frames: Vec<usize> = merged
                .iter()
                .filter(|e| e.role == role)
                .map(|e| e.primary_frame)
                .collect();
            assert!(frames.windows(2).all(|w| w[0] <= w[1]));
        }
    }
}
