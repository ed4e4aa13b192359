//! Voice input: flap by humming
//!
//! Microphone samples flow through an `AnalyserNode`; a self-rescheduling
//! poll runs the pitch detector and pushes an action whenever a confident
//! reading lands inside a configured band. High band flaps, low band maps to
//! `Down` (accepted and ignored by the engine).

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AnalyserNode, AudioContext, Document, MediaStream, MediaStreamConstraints};

use super::pitch;
use super::InputSource;
use crate::config::AppConfig;
use crate::sim::Action;

pub struct VoiceInput {
    buffer: Rc<RefCell<Vec<Action>>>,
    /// Percent, matched against the detector's clarity * 100
    clarity_threshold: f32,
    /// Hz band edges: (lo, mid) pushes Down, (mid, hi) pushes Up
    pitch_lo: f32,
    pitch_mid: f32,
    pitch_hi: f32,
    update_interval: i32,
}

impl VoiceInput {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            buffer: Rc::new(RefCell::new(Vec::new())),
            clarity_threshold: config.voice_clarity_threshold,
            pitch_lo: config.voice_pitch_threshold_lo,
            pitch_mid: config.voice_pitch_threshold_mid,
            pitch_hi: config.voice_pitch_threshold_hi,
            update_interval: config.voice_update_interval_ms,
        }
    }

    /// Request the microphone and start the polling loop. Resolves once audio
    /// is flowing; rejects if the user denies capture.
    pub async fn init(&self, document: &Document) -> Result<(), JsValue> {
        let audio_ctx = AudioContext::new()?;

        // Autoplay policy: the context may stay suspended until a gesture
        {
            let ctx = audio_ctx.clone();
            let closure = Closure::<dyn FnMut()>::new(move || {
                let _ = ctx.resume();
            });
            document.set_onclick(Some(closure.as_ref().unchecked_ref()));
            closure.forget();
        }

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let devices = window.navigator().media_devices()?;
        let constraints = MediaStreamConstraints::new();
        constraints.set_audio(&JsValue::TRUE);
        let stream: MediaStream = JsFuture::from(devices.get_user_media_with_constraints(&constraints)?)
            .await?
            .dyn_into()?;

        let analyser = audio_ctx.create_analyser()?;
        let source = audio_ctx.create_media_stream_source(&stream)?;
        source.connect_with_audio_node(&analyser)?;

        let sample_rate = audio_ctx.sample_rate();
        log::info!("voice input ready ({} Hz)", sample_rate);
        self.schedule_poll(analyser, sample_rate);
        Ok(())
    }

    fn schedule_poll(&self, analyser: AnalyserNode, sample_rate: f32) {
        let buffer = self.buffer.clone();
        let clarity_threshold = self.clarity_threshold;
        let (pitch_lo, pitch_mid, pitch_hi) = (self.pitch_lo, self.pitch_mid, self.pitch_hi);
        let interval = self.update_interval;

        let mut samples = vec![0.0f32; analyser.fft_size() as usize];

        // The poll closure reschedules itself through its own handle; the
        // resulting cycle keeps it alive for the page's lifetime.
        let poll: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
        let handle = poll.clone();
        *poll.borrow_mut() = Some(Closure::new(move || {
            analyser.get_float_time_domain_data(&mut samples);

            if let Some(reading) = pitch::detect(&samples, sample_rate) {
                let clarity_pct = (reading.clarity * 100.0).round();
                if clarity_pct > clarity_threshold {
                    log::debug!(
                        "voice: {:.1} Hz (clarity {})",
                        reading.frequency,
                        clarity_pct
                    );
                    if reading.frequency > pitch_mid && reading.frequency < pitch_hi {
                        buffer.borrow_mut().push(Action::Up);
                    } else if reading.frequency > pitch_lo && reading.frequency < pitch_mid {
                        buffer.borrow_mut().push(Action::Down);
                    }
                }
            }

            if let Some(window) = web_sys::window()
                && let Some(cb) = handle.borrow().as_ref()
            {
                let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                    cb.as_ref().unchecked_ref(),
                    interval,
                );
            }
        }));

        if let Some(window) = web_sys::window()
            && let Some(cb) = poll.borrow().as_ref()
        {
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                cb.as_ref().unchecked_ref(),
                interval,
            );
        }
    }
}

impl InputSource for VoiceInput {
    fn drain(&self) -> Vec<Action> {
        std::mem::take(&mut *self.buffer.borrow_mut())
    }
}
