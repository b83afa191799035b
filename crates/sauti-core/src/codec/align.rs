//! Onset mapping between stream timelines.

use crate::config::StreamRole;

use super::dedup::Segment;

/// Slack for frame-boundary conversions. Rate ratios are quotients of two
/// f64 durations, so exact multiples can land just below their integer value
/// (1.0 / 0.04 evaluates to 24.999...); a bare floor would misplace those
/// onsets by a full frame.
const FRAME_TOLERANCE: f64 = 1e-6;

/// A segment onset expressed on the primary stream's timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub role: StreamRole,
    pub code: u32,
    pub primary_frame: usize,
}

/// Map a non-primary stream's segment onsets onto primary frames.
///
/// `ratio` is the stream's native frame duration over the primary stream's.
/// An onset is attributed to the primary frame active at, or immediately
/// before, the moment the segment begins — never to a future frame, so the
/// ordering stays causal for streaming generation.
pub(crate) fn align_segments(segments: &[Segment], ratio: f64) -> Vec<Event> {
    segments
        .iter()
        .map(|s| Event {
            role: s.role,
            code: s.code,
            primary_frame: floor_frames(s.start_frame as f64 * ratio),
        })
        .collect()
}

/// Primary-stream segments keep their own frame indices.
pub(crate) fn primary_events(segments: &[Segment]) -> Vec<Event> {
    segments
        .iter()
        .map(|s| Event {
            role: s.role,
            code: s.code,
            primary_frame: s.start_frame,
        })
        .collect()
}

pub(crate) fn floor_frames(frames: f64) -> usize {
    (frames + FRAME_TOLERANCE).floor().max(0.0) as usize
}

pub(crate) fn ceil_frames(frames: f64) -> usize {
    (frames - FRAME_TOLERANCE).ceil().max(0.0) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::dedup::StreamBuffer;

    #[test]
    fn coarse_stream_onsets_map_to_earlier_primary_frames() {
        let buffer = StreamBuffer::new(StreamRole::Style, vec![3, 3, 9]);
        let events = align_segments(&buffer.deduplicate(), 10.0);
        assert_eq!(events.len(), 2);
        assert_eq!((events[0].code, events[0].primary_frame), (3, 0));
        assert_eq!((events[1].code, events[1].primary_frame), (9, 20));
    }

    #[test]
    fn fractional_onsets_round_down() {
        let buffer = StreamBuffer::new(StreamRole::Pitch, vec![1, 2, 3]);
        let events = align_segments(&buffer.deduplicate(), 1.5);
        let frames: Vec<usize> = events.iter().map(|e| e.primary_frame).collect();
        assert_eq!(frames, vec![0, 1, 3]);
    }

    #[test]
    fn duration_quotient_ratios_hit_exact_boundaries() {
        // 1.0s style frames over 0.04s content frames: the quotient is just
        // under 25, and every onset must still land on a multiple of 25.
        let ratio = 1.0f64 / 0.04f64;
        let buffer = StreamBuffer::new(StreamRole::Style, vec![7, 8, 9]);
        let events = align_segments(&buffer.deduplicate(), ratio);
        let frames: Vec<usize> = events.iter().map(|e| e.primary_frame).collect();
        assert_eq!(frames, vec![0, 25, 50]);
    }

    #[test]
    fn ceil_frames_inverts_floor_for_whole_ratios() {
        for ratio in [2.0, 10.0, 1.0f64 / 0.04f64] {
            for native in 0..50usize {
                let primary = floor_frames(native as f64 * ratio);
                assert_eq!(ceil_frames(primary as f64 / ratio), native);
            }
        }
    }

    #[test]
    fn primary_events_pass_frames_through() {
        let buffer = StreamBuffer::new(StreamRole::Content, vec![5, 5, 7]);
        let events = primary_events(&buffer.deduplicate());
        assert_eq!(events[0].primary_frame, 0);
        assert_eq!(events[1].primary_frame, 2);
    }
}
