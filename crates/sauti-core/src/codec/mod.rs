//! Multi-stream token codec pipeline.
//!
//! Encode: dedup each stream, map segment onsets onto the primary timeline,
//! interleave deterministically, render the bracket string. Decode reverses
//! the pipeline, reconstructing per-stream frame sequences of the length the
//! downstream synthesizer expects.

mod align;
mod dedup;
mod expand;
mod interleave;
mod text;

use tracing::debug;

pub use align::Event;
pub use dedup::{Segment, StreamBuffer};
pub use text::Token;

use crate::config::{CodecConfig, StreamTable};
use crate::error::{Error, Result};

/// The compiled codec: a validated, immutable stream table plus the pure
/// encode/decode transforms.
///
/// Construction performs all configuration validation; afterwards the codec
/// holds no mutable state and can be shared across threads, with concurrent
/// encode/decode calls on independent utterances needing no coordination.
#[derive(Debug, Clone)]
pub struct SpeechTokenCodec {
    config: CodecConfig,
    table: StreamTable,
}

impl SpeechTokenCodec {
    pub fn new(config: CodecConfig) -> Result<Self> {
        let table = StreamTable::compile(&config)?;
        debug!(
            streams = table.entries().len(),
            primary = %table.primary_role(),
            "compiled stream table"
        );
        Ok(Self { config, table })
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Encode raw per-stream codes into one token string.
    ///
    /// Streams may be supplied in any order; missing active streams
    /// contribute no events. A primary stream with zero frames yields the
    /// empty string.
    pub fn encode(&self, streams: &[StreamBuffer]) -> Result<String> {
        let events = self.encode_events(streams)?;
        let rendered = text::render(&events, &self.table)?;
        debug!(
            events = events.len(),
            bytes = rendered.len(),
            "encoded utterance"
        );
        Ok(rendered)
    }

    /// Encode up to the interleaved event list, without rendering.
    pub fn encode_events(&self, streams: &[StreamBuffer]) -> Result<Vec<Event>> {
        for (i, buffer) in streams.iter().enumerate() {
            if self.table.entry(buffer.role).is_none() {
                return Err(Error::Configuration(format!(
                    "stream '{}' is not configured",
                    buffer.role
                )));
            }
            if streams[..i].iter().any(|b| b.role == buffer.role) {
                return Err(Error::Configuration(format!(
                    "stream '{}' is supplied twice",
                    buffer.role
                )));
            }
        }

        let primary_role = self.table.primary_role();
        let primary = streams.iter().find(|b| b.role == primary_role);
        if primary.is_none_or(|b| b.is_empty()) {
            return Ok(Vec::new());
        }

        let mut per_stream = Vec::with_capacity(streams.len());
        for (priority, entry) in self.table.entries().iter().enumerate() {
            let Some(buffer) = streams.iter().find(|b| b.role == entry.role) else {
                continue;
            };
            let segments = buffer.deduplicate();
            let events = if entry.role == primary_role {
                align::primary_events(&segments)
            } else {
                align::align_segments(&segments, entry.ratio)
            };
            per_stream.push((priority, events));
        }

        Ok(interleave::interleave(per_stream))
    }

    /// Render an event list already in interleaved order.
    pub fn render(&self, events: &[Event]) -> Result<String> {
        text::render(events, &self.table)
    }

    /// Parse a token string into wire-order tokens, without expansion.
    pub fn parse(&self, input: &str) -> Result<Vec<Token>> {
        text::parse(input, &self.table)
    }

    /// Decode a token string back into per-stream frame sequences.
    ///
    /// `total_primary_frames` is the primary-stream length the downstream
    /// synthesizer expects; when `None`, each primary token spans one frame.
    /// Every configured stream appears in the output, empty when it carried
    /// no tokens. Reconstructed run lengths are a faithful resampling;
    /// segment codes and interleaving order are exact.
    pub fn decode(
        &self,
        input: &str,
        total_primary_frames: Option<usize>,
    ) -> Result<Vec<StreamBuffer>> {
        let tokens = text::parse(input, &self.table)?;
        let primary_role = self.table.primary_role();

        let primary_count = tokens.iter().filter(|t| t.role == primary_role).count();
        let total = total_primary_frames.unwrap_or(primary_count).max(primary_count);
        let onsets = expand::primary_onsets(primary_count, total);

        // Attribute each token an onset on the primary timeline: primary
        // tokens take their reconstructed onset, others the onset of the next
        // primary token in wire order (the inverse of the tie-break, which
        // placed them immediately before it).
        let mut attributed = Vec::with_capacity(tokens.len());
        let mut next_primary = 0usize;
        for token in &tokens {
            if token.role == primary_role {
                attributed.push((*token, onsets[next_primary]));
                next_primary += 1;
            } else {
                let onset = onsets.get(next_primary).copied().unwrap_or(total);
                attributed.push((*token, onset));
            }
        }

        let mut streams = Vec::with_capacity(self.table.entries().len());
        for entry in self.table.entries() {
            let stream_tokens: Vec<(u32, usize)> = attributed
                .iter()
                .filter(|(t, _)| t.role == entry.role)
                .map(|(t, onset)| (t.code, *onset))
                .collect();

            let frames = if entry.role == primary_role {
                expand::expand_spans(&stream_tokens, total)
            } else {
                let primaries: Vec<usize> =
                    stream_tokens.iter().map(|&(_, onset)| onset).collect();
                let native = expand::native_onsets(&primaries, entry.ratio);
                let spans: Vec<(u32, usize)> = stream_tokens
                    .iter()
                    .zip(&native)
                    .map(|(&(code, _), &onset)| (code, onset))
                    .collect();
                let native_total = align::ceil_frames(total as f64 / entry.ratio);
                expand::expand_spans(&spans, native_total)
            };
            streams.push(StreamBuffer::new(entry.role, frames));
        }

        debug!(
            tokens = tokens.len(),
            primary_frames = total,
            "decoded utterance"
        );
        Ok(streams)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StreamRole;

    fn base() -> SpeechTokenCodec {
        SpeechTokenCodec::new(CodecConfig::base()).expect("base codec")
    }

    fn expressive() -> SpeechTokenCodec {
        SpeechTokenCodec::new(CodecConfig::expressive()).expect("expressive codec")
    }

    fn content(codes: &[u32]) -> StreamBuffer {
        StreamBuffer::new(StreamRole::Content, codes.to_vec())
    }

    fn pitch(codes: &[u32]) -> StreamBuffer {
        StreamBuffer::new(StreamRole::Pitch, codes.to_vec())
    }

    fn style(codes: &[u32]) -> StreamBuffer {
        StreamBuffer::new(StreamRole::Style, codes.to_vec())
    }

    #[test]
    fn base_mode_dedups_and_renders() {
        let encoded = base()
            .encode(&[content(&[5, 5, 7, 7, 7, 2])])
            .expect("encode");
        assert_eq!(encoded, "[Hu5][Hu7][Hu2]");
    }

    #[test]
    fn base_mode_matches_reference_unit_stream() {
        // Leading stretch of a real 25 Hz phonetic unit stream.
        let units = [99, 49, 38, 149, 149, 71, 423, 427, 492, 288, 315, 153, 153, 389];
        let encoded = base().encode(&[content(&units)]).expect("encode");
        assert_eq!(
            encoded,
            "[Hu99][Hu49][Hu38][Hu149][Hu71][Hu423][Hu427][Hu492][Hu288][Hu315][Hu153][Hu389]"
        );
    }

    #[test]
    fn expressive_mode_interleaves_with_priority_ties() {
        let encoded = expressive()
            .encode(&[
                content(&[5, 5, 7, 7, 7, 2]),
                pitch(&[3, 3, 9]),
                style(&[8]),
            ])
            .expect("encode");
        assert_eq!(encoded, "[St8][Pi3][Hu5][Hu7][Pi9][Hu2]");
    }

    #[test]
    fn stream_supply_order_does_not_change_the_output() {
        let a = expressive()
            .encode(&[style(&[8]), content(&[5, 5, 7]), pitch(&[3, 9])])
            .expect("encode");
        let b = expressive()
            .encode(&[content(&[5, 5, 7]), pitch(&[3, 9]), style(&[8])])
            .expect("encode");
        assert_eq!(a, b);
    }

    #[test]
    fn per_stream_onsets_stay_monotonic() {
        let events = expressive()
            .encode_events(&[
                content(&[1, 1, 2, 2, 3, 3, 4, 4]),
                pitch(&[7, 8, 7, 8]),
                style(&[5]),
            ])
            .expect("encode");
        for role in [StreamRole::Style, StreamRole::Pitch, StreamRole::Content] {
            let frames: Vec<usize> = events
                .iter()
                .filter(|e| e.role == role)
                .map(|e| e.primary_frame)
                .collect();
            assert!(
                frames.windows(2).all(|w| w[0] <= w[1]),
                "{role} onsets regressed: {frames:?}"
            );
        }
    }

    #[test]
    fn empty_primary_yields_empty_sequence() {
        assert_eq!(base().encode(&[]).expect("encode"), "");
        assert_eq!(base().encode(&[content(&[])]).expect("encode"), "");
        // Non-primary material cannot be placed without a primary timeline.
        let encoded = expressive()
            .encode(&[content(&[]), style(&[8])])
            .expect("encode");
        assert_eq!(encoded, "");
    }

    #[test]
    fn decoding_the_empty_string_yields_empty_streams() {
        let streams = expressive().decode("", None).expect("decode");
        assert_eq!(streams.len(), 3);
        assert!(streams.iter().all(|s| s.is_empty()));
    }

    #[test]
    fn unconfigured_or_duplicate_streams_are_configuration_errors() {
        let err = base()
            .encode(&[content(&[1]), pitch(&[2])])
            .expect_err("pitch is not in the base table");
        assert!(matches!(err, Error::Configuration(_)));

        let err = base()
            .encode(&[content(&[1]), content(&[2])])
            .expect_err("content supplied twice");
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn decode_reconstructs_exact_codes_at_native_rates() {
        let codec = expressive();
        let encoded = codec
            .encode(&[
                content(&[5, 5, 7, 7, 7, 2]),
                pitch(&[3, 3, 9]),
                style(&[8]),
            ])
            .expect("encode");

        let streams = codec.decode(&encoded, Some(6)).expect("decode");
        let by_role = |role: StreamRole| {
            streams
                .iter()
                .find(|s| s.role == role)
                .expect("stream present")
        };

        // Whole-ratio streams invert exactly.
        assert_eq!(by_role(StreamRole::Pitch).codes, vec![3, 3, 9]);
        assert_eq!(by_role(StreamRole::Style).codes, vec![8]);

        // The primary stream is resampled but keeps its segment codes.
        let primary = by_role(StreamRole::Content);
        assert_eq!(primary.len(), 6);
        let codes: Vec<u32> = primary.deduplicate().iter().map(|s| s.code).collect();
        assert_eq!(codes, vec![5, 7, 2]);
    }

    #[test]
    fn round_trip_preserves_dedup_codes_for_every_stream() {
        let codec = expressive();
        let inputs = [
            content(&[9, 9, 9, 1, 1, 4, 4, 4, 4, 2, 6, 6]),
            pitch(&[30, 30, 41, 41, 30, 12]),
            style(&[7]),
        ];
        let encoded = codec.encode(&inputs).expect("encode");
        let decoded = codec
            .decode(&encoded, Some(inputs[0].len()))
            .expect("decode");

        for input in &inputs {
            let output = decoded
                .iter()
                .find(|s| s.role == input.role)
                .expect("stream present");
            let input_codes: Vec<u32> =
                input.deduplicate().iter().map(|s| s.code).collect();
            let output_codes: Vec<u32> =
                output.deduplicate().iter().map(|s| s.code).collect();
            assert_eq!(output_codes, input_codes, "{} codes drifted", input.role);
        }
    }

    #[test]
    fn re_encoding_a_decoded_utterance_is_stable() {
        let codec = expressive();
        let encoded = codec
            .encode(&[
                content(&[5, 5, 7, 7, 7, 2]),
                pitch(&[3, 3, 9]),
                style(&[8]),
            ])
            .expect("encode");
        let decoded = codec.decode(&encoded, Some(6)).expect("decode");
        let re_encoded = codec.encode(&decoded).expect("re-encode");
        assert_eq!(re_encoded, encoded);
    }

    #[test]
    fn decode_without_a_frame_count_spans_one_frame_per_token() {
        let codec = base();
        let streams = codec.decode("[Hu5][Hu7][Hu2]", None).expect("decode");
        assert_eq!(streams[0].codes, vec![5, 7, 2]);
    }

    #[test]
    fn codec_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SpeechTokenCodec>();
    }
}
