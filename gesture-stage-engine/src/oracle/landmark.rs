use constants::tracking::{INDEX_TIP, LANDMARKS_PER_HAND, THUMB_TIP};

/// One detected landmark in normalised camera space: x and y in [0, 1]
/// before mirroring, z a relative depth. Owned by the frame that reported
/// it; never mutated after detection.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance to another landmark in the detector's native
    /// unit space.
    pub fn distance(&self, other: &Landmark) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

/// A single hand as reported by the detector: a fixed, anatomically
/// ordered landmark array (index 4 = thumb tip, 8 = index tip, ...).
#[derive(Debug, Clone)]
pub struct HandDetection {
    pub landmarks: [Landmark; LANDMARKS_PER_HAND],
}

impl HandDetection {
    pub fn new(landmarks: [Landmark; LANDMARKS_PER_HAND]) -> Self {
        Self { landmarks }
    }

    pub fn thumb_tip(&self) -> &Landmark {
        &self.landmarks[THUMB_TIP]
    }

    pub fn index_tip(&self) -> &Landmark {
        &self.landmarks[INDEX_TIP]
    }
}

/// One detection result: zero or more hands for a distinct video frame.
/// The hand order is the detector's own array order; no cross-frame
/// identity tracking is implied by it.
#[derive(Debug, Clone, Default)]
pub struct LandmarkFrame {
    pub timestamp_ms: f64,
    pub hands: Vec<HandDetection>,
}

impl LandmarkFrame {
    pub fn empty(timestamp_ms: f64) -> Self {
        Self {
            timestamp_ms,
            hands: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landmark_distance() {
        let a = Landmark::new(0.0, 0.0, 0.0);
        let b = Landmark::new(0.3, 0.4, 0.0);
        assert!((a.distance(&b) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_tip_accessors() {
        let mut landmarks = [Landmark::default(); LANDMARKS_PER_HAND];
        landmarks[THUMB_TIP] = Landmark::new(0.1, 0.2, 0.0);
        landmarks[INDEX_TIP] = Landmark::new(0.4, 0.6, 0.0);
        let hand = HandDetection::new(landmarks);
        assert_eq!(hand.thumb_tip().x, 0.1);
        assert_eq!(hand.index_tip().y, 0.6);
    }
}
