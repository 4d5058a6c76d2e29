//! Engine configuration.

use std::time::Duration;

/// Configuration for the motion-warming engine.
///
/// Values are fixed at construction; build a new engine to reconfigure.
#[derive(Debug, Clone)]
pub struct WarmerConfig {
    /// Width of the downscaled comparison buffer
    pub canvas_width: u32,
    /// Height of the downscaled comparison buffer
    pub canvas_height: u32,
    /// Per-pixel mean RGB difference (0-255) above which a pixel counts as changed
    pub motion_threshold: u8,
    /// Fraction of changed pixels above which a frame counts as motion
    pub motion_pixel_threshold: f32,
    /// Interval between scheduled sampling ticks
    pub frame_check_interval: Duration,
    /// Minimum elapsed time since the last successful warm before another is permitted
    pub cooldown_period: Duration,
    /// Sample only every Nth scheduled tick (minimum 1)
    pub skip_frames: u32,
}

impl Default for WarmerConfig {
    fn default() -> Self {
        Self {
            canvas_width: 80,
            canvas_height: 60,
            motion_threshold: 15,
            motion_pixel_threshold: 0.05,
            frame_check_interval: Duration::from_millis(1000),
            cooldown_period: Duration::from_secs(10),
            skip_frames: 2,
        }
    }
}

impl WarmerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            canvas_width: std::env::var("WARMER_CANVAS_WIDTH")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.canvas_width),
            canvas_height: std::env::var("WARMER_CANVAS_HEIGHT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.canvas_height),
            motion_threshold: std::env::var("WARMER_MOTION_THRESHOLD")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.motion_threshold),
            motion_pixel_threshold: std::env::var("WARMER_MOTION_PIXEL_THRESHOLD")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.motion_pixel_threshold),
            frame_check_interval: Duration::from_millis(
                std::env::var("WARMER_FRAME_CHECK_INTERVAL_MS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(1000),
            ),
            cooldown_period: Duration::from_millis(
                std::env::var("WARMER_COOLDOWN_PERIOD_MS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(10_000),
            ),
            skip_frames: std::env::var("WARMER_SKIP_FRAMES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.skip_frames)
                .max(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WarmerConfig::default();
        assert_eq!(config.canvas_width, 80);
        assert_eq!(config.canvas_height, 60);
        assert_eq!(config.motion_threshold, 15);
        assert_eq!(config.cooldown_period, Duration::from_secs(10));
        assert!(config.skip_frames >= 1);
    }
}
