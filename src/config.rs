//! Application-level configuration
//!
//! Everything outside the per-world tunables: canvas wiring, logical screen
//! size, voice detection thresholds and the frame scheduler target. Built
//! once at startup.

/// Startup configuration (world tunables live in [`crate::sim::WorldConfig`])
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub debug: bool,
    pub canvas_element_id: &'static str,
    /// Logical screen size; CSS scales the canvas, the world never resizes
    pub screen_width: f32,
    pub screen_height: f32,
    /// Minimum pitch clarity (percent) for a voice reading to count
    pub voice_clarity_threshold: f32,
    /// Hz band edges for voice control: (lo, mid) is the down band,
    /// (mid, hi) the flap band
    pub voice_pitch_threshold_lo: f32,
    pub voice_pitch_threshold_mid: f32,
    pub voice_pitch_threshold_hi: f32,
    /// Cadence of the voice analysis poll, ms
    pub voice_update_interval_ms: i32,
    /// Frames arriving faster than this are skipped
    pub target_fps: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            debug: cfg!(debug_assertions),
            canvas_element_id: "gameCanvas",
            screen_width: 1024.0,
            screen_height: 768.0,
            voice_clarity_threshold: 90.0,
            voice_pitch_threshold_lo: 50.0,
            voice_pitch_threshold_mid: 80.0,
            voice_pitch_threshold_hi: 300.0,
            voice_update_interval_ms: 100,
            target_fps: 60,
        }
    }
}
