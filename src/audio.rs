//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects and music - no external files
//! needed. The background track is a short looping pattern rendered into
//! an `AudioBuffer`; effects are one-shot oscillator envelopes, fired and
//! forgotten.

use web_sys::{
    AudioBuffer, AudioBufferSourceNode, AudioContext, GainNode, OscillatorNode, OscillatorType,
};

use crate::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Flap impulse
    Flap,
    /// Coin collected
    Coin,
    /// Pipe cleared
    Score,
    /// Run ended
    GameOver,
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    music_buffer: Option<AudioBuffer>,
    music_source: Option<AudioBufferSourceNode>,
    music_gain: Option<GainNode>,
    /// Where in the loop to resume from after a pause (seconds)
    music_offset: f64,
    /// Context time when the music last started
    music_started_at: f64,
    master_volume: f32,
    music_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // May fail outside a secure context; the game plays on silently
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            music_buffer: None,
            music_source: None,
            music_gain: None,
            music_offset: 0.0,
            music_started_at: 0.0,
            master_volume: 0.8,
            music_volume: 0.9,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Apply player preferences, including to music already playing
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.master_volume = settings.master_volume.clamp(0.0, 1.0);
        self.music_volume = settings.music_volume.clamp(0.0, 1.0);
        self.sfx_volume = settings.sfx_volume.clamp(0.0, 1.0);
        self.update_music_gain();
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        self.update_music_gain();
    }

    fn effective_sfx_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    fn effective_music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume
        }
    }

    fn update_music_gain(&self) {
        if let Some(gain) = &self.music_gain {
            gain.gain().set_value(self.effective_music_volume());
        }
    }

    // === Background music ===

    /// Start (or resume) the looping background track
    pub fn play_background(&mut self) {
        let Some(ctx) = &self.ctx else { return };
        if self.music_source.is_some() {
            return;
        }

        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        if self.music_buffer.is_none() {
            self.music_buffer = build_music_buffer(ctx);
        }
        let Some(buffer) = &self.music_buffer else {
            return;
        };

        let Ok(source) = ctx.create_buffer_source() else {
            return;
        };
        let Ok(gain) = ctx.create_gain() else { return };

        source.set_buffer(Some(buffer));
        source.set_loop(true);
        gain.gain().set_value(self.effective_music_volume());

        if source.connect_with_audio_node(&gain).is_err()
            || gain.connect_with_audio_node(&ctx.destination()).is_err()
        {
            return;
        }

        let offset = self.music_offset % buffer.duration();
        if source.start_with_when_and_grain_offset(0.0, offset).is_ok() {
            self.music_started_at = ctx.current_time();
            self.music_source = Some(source);
            self.music_gain = Some(gain);
        }
    }

    /// Pause the track, remembering the position for resume
    pub fn pause_background(&mut self) {
        if let Some(source) = self.music_source.take() {
            if let Some(ctx) = &self.ctx {
                self.music_offset += ctx.current_time() - self.music_started_at;
            }
            let _ = source.stop();
            self.music_gain = None;
        }
    }

    /// Rewind so the next `play_background` starts from the top
    pub fn reset_background(&mut self) {
        self.music_offset = 0.0;
    }

    // === Sound effects ===

    /// Play a one-shot sound effect (fire-and-forget)
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.effective_sfx_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require a user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::Flap => self.play_flap(ctx, vol),
            SoundEffect::Coin => self.play_coin(ctx, vol),
            SoundEffect::Score => self.play_score(ctx, vol),
            SoundEffect::GameOver => self.play_game_over(ctx, vol),
        }
    }

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Flap - short downward chirp
    fn play_flap(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 700.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        let _ = osc.frequency().exponential_ramp_to_value_at_time(300.0, t + 0.1);
        gain.gain().set_value(vol * 0.25);
        let _ = gain.gain().exponential_ramp_to_value_at_time(0.001, t + 0.12);

        let _ = osc.start();
        let _ = osc.stop_with_when(t + 0.12);
    }

    /// Coin - bright double blip
    fn play_coin(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 988.0, OscillatorType::Square) else {
            return;
        };
        let t = ctx.current_time();

        let _ = osc.frequency().set_value_at_time(988.0, t);
        let _ = osc.frequency().set_value_at_time(1319.0, t + 0.07);
        gain.gain().set_value(vol * 0.15);
        let _ = gain.gain().exponential_ramp_to_value_at_time(0.001, t + 0.2);

        let _ = osc.start();
        let _ = osc.stop_with_when(t + 0.2);
    }

    /// Pipe cleared - rising two-note chime
    fn play_score(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 523.0, OscillatorType::Triangle) else {
            return;
        };
        let t = ctx.current_time();

        let _ = osc.frequency().set_value_at_time(523.0, t);
        let _ = osc.frequency().set_value_at_time(659.0, t + 0.09);
        gain.gain().set_value(vol * 0.2);
        let _ = gain.gain().exponential_ramp_to_value_at_time(0.001, t + 0.25);

        let _ = osc.start();
        let _ = osc.stop_with_when(t + 0.25);
    }

    /// Game over - slow falling saw
    fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 440.0, OscillatorType::Sawtooth) else {
            return;
        };
        let t = ctx.current_time();

        let _ = osc.frequency().exponential_ramp_to_value_at_time(80.0, t + 0.6);
        gain.gain().set_value(vol * 0.3);
        let _ = gain.gain().linear_ramp_to_value_at_time(0.0, t + 0.7);

        let _ = osc.start();
        let _ = osc.stop_with_when(t + 0.7);
    }
}

/// Render a two-second looping chiptune pattern into a buffer
fn build_music_buffer(ctx: &AudioContext) -> Option<AudioBuffer> {
    // Pentatonic eight-step melody, one step per quarter second
    const MELODY: [f32; 8] = [262.0, 330.0, 392.0, 440.0, 392.0, 330.0, 294.0, 262.0];
    const STEP_SECS: f32 = 0.25;

    let sample_rate = ctx.sample_rate();
    let step_len = (sample_rate * STEP_SECS) as usize;
    let total_len = step_len * MELODY.len();

    let mut samples = vec![0.0f32; total_len];
    for (step, &freq) in MELODY.iter().enumerate() {
        let base = step * step_len;
        for i in 0..step_len {
            let t = i as f32 / sample_rate;
            // Decay envelope per note so the loop doesn't drone
            let env = (1.0 - i as f32 / step_len as f32).powi(2);
            let tone = (std::f32::consts::TAU * freq * t).sin()
                + 0.3 * (std::f32::consts::TAU * freq * 2.0 * t).sin();
            samples[base + i] = tone * env * 0.18;
        }
    }

    let buffer = ctx
        .create_buffer(1, total_len as u32, sample_rate)
        .ok()?;
    buffer.copy_to_channel(&mut samples, 0).ok()?;
    Some(buffer)
}
