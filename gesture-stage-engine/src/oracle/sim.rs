//! Simulated hand source for native runs without a camera.
//!
//! Orbits one synthetic hand around the view and pinches it shut on a
//! fixed cycle, which is enough to exercise hover, grab-drag, and the
//! hold pads from the keyboard-free demo binary.

use std::f32::consts::TAU;

use constants::tracking::{INDEX_TIP, LANDMARKS_PER_HAND, THUMB_TIP};

use super::landmark::{HandDetection, Landmark, LandmarkFrame};
use super::source::LandmarkSource;

const SIM_FRAME_MS: f64 = 1000.0 / 60.0;
const ORBIT_SECS: f32 = 8.0;
const PINCH_CYCLE_SECS: f32 = 3.0;

pub struct SimSource {
    tick: u64,
}

impl SimSource {
    pub fn new() -> Self {
        Self { tick: 0 }
    }

    fn hand_at(&self, t: f32) -> HandDetection {
        let orbit = (t / ORBIT_SECS) * TAU;
        let cx = 0.5 + 0.3 * orbit.cos();
        let cy = 0.5 + 0.25 * orbit.sin();

        // Pinch for the second half of each cycle.
        let pinching = (t % PINCH_CYCLE_SECS) > PINCH_CYCLE_SECS * 0.5;

        let mut landmarks = [Landmark::default(); LANDMARKS_PER_HAND];
        for (i, landmark) in landmarks.iter_mut().enumerate() {
            // Fan the remaining landmarks out in a loose ring around the
            // palm centre; their exact shape is cosmetic.
            let angle = (i as f32 / LANDMARKS_PER_HAND as f32) * TAU;
            *landmark = Landmark::new(
                cx + 0.04 * angle.cos(),
                cy + 0.04 * angle.sin(),
                -0.05,
            );
        }
        landmarks[INDEX_TIP] = Landmark::new(cx, cy - 0.06, -0.05);
        landmarks[THUMB_TIP] = if pinching {
            Landmark::new(cx + 0.02, cy - 0.06, -0.05)
        } else {
            Landmark::new(cx - 0.15, cy + 0.02, -0.05)
        };

        HandDetection::new(landmarks)
    }
}

impl LandmarkSource for SimSource {
    fn poll(&mut self) -> Option<LandmarkFrame> {
        self.tick += 1;
        let timestamp_ms = self.tick as f64 * SIM_FRAME_MS;
        let t = (timestamp_ms / 1000.0) as f32;
        Some(LandmarkFrame {
            timestamp_ms,
            hands: vec![self.hand_at(t)],
        })
    }
}
