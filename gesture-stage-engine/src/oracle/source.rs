//! Landmark source boundary.
//!
//! The detector itself is external: in the browser it is the page's
//! MediaPipe hand landmarker feeding frames over the message bridge, on
//! native builds it is a scripted or simulated source. Either way the
//! engine pulls at most one new frame per tick, deduplicated by video
//! timestamp, and treats "no hands" as an ordinary result rather than an
//! error.

use std::collections::VecDeque;

use bevy::prelude::*;

use super::landmark::LandmarkFrame;

/// Anything that can yield landmark frames when polled once per tick.
pub trait LandmarkSource: Send + Sync + 'static {
    fn poll(&mut self) -> Option<LandmarkFrame>;
}

/// The active pull-based source, when one is installed (native builds).
/// Browser builds leave this out and push frames into [`PendingFrames`]
/// from the message bridge instead.
#[derive(Resource)]
pub struct OracleSource(pub Box<dyn LandmarkSource>);

/// Frames pushed from the message bridge, drained by [`poll_oracle`].
/// Only the newest queued frame survives a drain; the pipeline has no use
/// for stale detections.
#[derive(Resource, Default)]
pub struct PendingFrames(pub VecDeque<LandmarkFrame>);

/// This tick's detection, if the video frame advanced. `frame` is `None`
/// both when nothing arrived and when the timestamp matched the last
/// consumed frame.
#[derive(Resource, Default)]
pub struct CurrentDetection {
    pub frame: Option<LandmarkFrame>,
    last_timestamp_ms: Option<f64>,
}

impl CurrentDetection {
    /// Accept a candidate frame, discarding it if its timestamp has
    /// already been consumed.
    pub fn accept(&mut self, frame: LandmarkFrame) {
        if self.last_timestamp_ms == Some(frame.timestamp_ms) {
            self.frame = None;
            return;
        }
        self.last_timestamp_ms = Some(frame.timestamp_ms);
        self.frame = Some(frame);
    }

    pub fn clear(&mut self) {
        self.frame = None;
    }
}

/// Pull one detection for this tick: bridge frames win over the pull
/// source so browser input is never shadowed by a local simulator.
pub fn poll_oracle(
    mut pending: ResMut<PendingFrames>,
    source: Option<ResMut<OracleSource>>,
    mut detection: ResMut<CurrentDetection>,
) {
    detection.clear();

    if let Some(frame) = pending.0.drain(..).last() {
        detection.accept(frame);
        return;
    }

    if let Some(mut source) = source {
        if let Some(frame) = source.0.poll() {
            detection.accept(frame);
        }
    }
}

/// Deterministic playback source: yields a fixed frame sequence once.
/// Used by tests and by scripted native demos.
pub struct ScriptedSource {
    frames: VecDeque<LandmarkFrame>,
}

impl ScriptedSource {
    pub fn new(frames: Vec<LandmarkFrame>) -> Self {
        Self {
            frames: frames.into(),
        }
    }
}

impl LandmarkSource for ScriptedSource {
    fn poll(&mut self) -> Option<LandmarkFrame> {
        self.frames.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_by_timestamp() {
        let mut detection = CurrentDetection::default();
        detection.accept(LandmarkFrame::empty(100.0));
        assert!(detection.frame.is_some());

        // Same video frame again: discarded.
        detection.accept(LandmarkFrame::empty(100.0));
        assert!(detection.frame.is_none());

        detection.accept(LandmarkFrame::empty(116.0));
        assert!(detection.frame.is_some());
    }

    #[test]
    fn test_scripted_source_order() {
        let mut source =
            ScriptedSource::new(vec![LandmarkFrame::empty(1.0), LandmarkFrame::empty(2.0)]);
        assert_eq!(source.poll().unwrap().timestamp_ms, 1.0);
        assert_eq!(source.poll().unwrap().timestamp_ms, 2.0);
        assert!(source.poll().is_none());
    }
}
