//! Frame-difference motion detection.
//!
//! A coarse global heuristic: count pixels whose mean RGB difference from
//! the previous capture exceeds a threshold, and declare motion when enough
//! of the frame changed. O(pixels) at the reduced working resolution, no
//! vision dependency.

use crate::frame::PixelBuffer;

/// Verdict for one compared tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionVerdict {
    /// No comparison happened; the observed frame became the new baseline
    Baseline,
    /// Compared, below the motion threshold
    Still,
    /// Compared, enough pixels changed
    Motion,
}

impl MotionVerdict {
    pub fn is_motion(&self) -> bool {
        matches!(self, MotionVerdict::Motion)
    }
}

/// Compares consecutive downscaled captures.
pub struct MotionDetector {
    motion_threshold: u8,
    pixel_fraction: f32,
    previous: Option<PixelBuffer>,
}

impl MotionDetector {
    pub fn new(motion_threshold: u8, pixel_fraction: f32) -> Self {
        Self {
            motion_threshold,
            pixel_fraction,
            previous: None,
        }
    }

    /// Feed the next capture and get a verdict against the previous one.
    ///
    /// The verdict is level-triggered: every observed frame with enough
    /// change reports `Motion`, so a continuously moving subject keeps
    /// reporting. A shape mismatch discards the stored baseline instead of
    /// comparing mismatched buffers.
    pub fn observe(&mut self, frame: PixelBuffer) -> MotionVerdict {
        let verdict = match &self.previous {
            None => MotionVerdict::Baseline,
            Some(prev) if !prev.same_shape(&frame) => MotionVerdict::Baseline,
            Some(prev) => {
                let fraction = changed_fraction(prev, &frame, self.motion_threshold);
                if fraction > self.pixel_fraction {
                    MotionVerdict::Motion
                } else {
                    MotionVerdict::Still
                }
            }
        };

        self.previous = Some(frame);
        verdict
    }

    /// Drop the stored baseline; the next observation starts fresh.
    pub fn reset(&mut self) {
        self.previous = None;
    }

    pub fn has_baseline(&self) -> bool {
        self.previous.is_some()
    }
}

/// Fraction of pixels whose mean RGB difference exceeds the threshold.
///
/// Alpha is ignored. The per-pixel test compares the channel-sum against
/// `3 * threshold`, which is exact for the mean without leaving integers.
fn changed_fraction(prev: &PixelBuffer, current: &PixelBuffer, threshold: u8) -> f32 {
    let limit = u16::from(threshold) * 3;
    let mut changed = 0usize;

    for (p, c) in prev
        .data()
        .chunks_exact(4)
        .zip(current.data().chunks_exact(4))
    {
        let diff = u16::from(p[0].abs_diff(c[0]))
            + u16::from(p[1].abs_diff(c[1]))
            + u16::from(p[2].abs_diff(c[2]));
        if diff > limit {
            changed += 1;
        }
    }

    changed as f32 / current.pixel_count() as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> MotionDetector {
        MotionDetector::new(15, 0.05)
    }

    #[test]
    fn test_first_frame_is_baseline() {
        let mut d = detector();
        let verdict = d.observe(PixelBuffer::filled(80, 60, [0, 0, 0, 255]));
        assert_eq!(verdict, MotionVerdict::Baseline);
        assert!(d.has_baseline());
    }

    #[test]
    fn test_identical_frames_report_no_motion() {
        let mut d = detector();
        let frame = PixelBuffer::filled(80, 60, [120, 90, 30, 255]);
        d.observe(frame.clone());
        assert_eq!(d.observe(frame), MotionVerdict::Still);
    }

    #[test]
    fn test_full_change_reports_motion() {
        let mut d = detector();
        d.observe(PixelBuffer::filled(80, 60, [0, 0, 0, 255]));
        let verdict = d.observe(PixelBuffer::filled(80, 60, [255, 255, 255, 255]));
        assert_eq!(verdict, MotionVerdict::Motion);
    }

    #[test]
    fn test_alpha_changes_are_ignored() {
        let mut d = detector();
        d.observe(PixelBuffer::filled(80, 60, [10, 10, 10, 255]));
        let verdict = d.observe(PixelBuffer::filled(80, 60, [10, 10, 10, 0]));
        assert_eq!(verdict, MotionVerdict::Still);
    }

    #[test]
    fn test_two_pixel_buffer_over_half_threshold() {
        // 2x1 frame, both pixels jump from black to white with a 50% pixel
        // threshold: 100% changed > 50% means motion.
        let mut d = MotionDetector::new(15, 0.5);
        d.observe(PixelBuffer::filled(2, 1, [0, 0, 0, 255]));
        let verdict = d.observe(PixelBuffer::filled(2, 1, [255, 255, 255, 255]));
        assert_eq!(verdict, MotionVerdict::Motion);
    }

    #[test]
    fn test_mean_difference_at_threshold_is_not_changed() {
        // Mean diff exactly equal to the threshold must not count
        let mut d = MotionDetector::new(15, 0.0);
        d.observe(PixelBuffer::filled(4, 4, [0, 0, 0, 255]));
        assert_eq!(
            d.observe(PixelBuffer::filled(4, 4, [15, 15, 15, 255])),
            MotionVerdict::Still
        );
        assert_eq!(
            d.observe(PixelBuffer::filled(4, 4, [31, 31, 31, 255])),
            MotionVerdict::Motion
        );
    }

    #[test]
    fn test_below_pixel_fraction_is_still() {
        // Only 1 of 100 pixels changes with a 5% threshold
        let mut d = detector();
        let base = PixelBuffer::filled(10, 10, [0, 0, 0, 255]);
        d.observe(base.clone());

        let mut data = base.data().to_vec();
        data[0] = 255;
        data[1] = 255;
        data[2] = 255;
        let nudged = PixelBuffer::new(10, 10, data).unwrap();
        assert_eq!(d.observe(nudged), MotionVerdict::Still);
    }

    #[test]
    fn test_shape_mismatch_resets_baseline() {
        let mut d = detector();
        d.observe(PixelBuffer::filled(80, 60, [0, 0, 0, 255]));

        // Different shape: no comparison, new baseline
        let verdict = d.observe(PixelBuffer::filled(40, 30, [255, 255, 255, 255]));
        assert_eq!(verdict, MotionVerdict::Baseline);

        // Now compared against the 40x30 baseline
        let verdict = d.observe(PixelBuffer::filled(40, 30, [255, 255, 255, 255]));
        assert_eq!(verdict, MotionVerdict::Still);
    }

    #[test]
    fn test_reset_clears_baseline() {
        let mut d = detector();
        d.observe(PixelBuffer::filled(8, 8, [0, 0, 0, 255]));
        d.reset();
        assert!(!d.has_baseline());

        // First frame after reset never compares against the stale one
        let verdict = d.observe(PixelBuffer::filled(8, 8, [255, 255, 255, 255]));
        assert_eq!(verdict, MotionVerdict::Baseline);
    }
}
