use anyhow::Result;
use bevy_ecs::system::Resource;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, SizedSample};
use crossbeam_channel::{Receiver, Sender, bounded};
use fundsp::hacker32::*;
use log::{debug, error};
use std::thread;
use std::time::Duration;

use crate::config::AudioConfig;
use crate::events::GameListener;

// Sound effects the game can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    Move,
    LineClear,
    GameOver,
}

impl SoundEffect {
    // Seconds after which a voice is dropped from the mix
    fn duration(self) -> f64 {
        match self {
            SoundEffect::Move => 0.1,
            SoundEffect::LineClear => 0.6,
            SoundEffect::GameOver => 2.0,
        }
    }
}

// Command to control the audio thread
enum AudioCommand {
    PlaySound(SoundEffect, f32), // effect and its gain
    PlayMusic(bool),             // true to start, false to stop
    SetVolume(f32),              // master, 0.0 to 1.0
    Quit,
}

// Mixer settings shared with the stream callback
#[derive(Debug, Clone, Copy)]
struct MixSettings {
    music_enabled: bool,
    music_volume: f32,
    volume: f32,
}

/// Sound trigger for the game. Playback runs on its own thread; every call here
/// is fire-and-forget and never fails.
#[derive(Resource)]
pub struct AudioState {
    sender: Option<Sender<AudioCommand>>,
    music_enabled: bool,
    sound_enabled: bool,
    volume: f32,
    move_volume: f32,
    clear_volume: f32,
}

impl AudioState {
    pub fn new(config: &AudioConfig) -> Self {
        let (sender, receiver) = bounded(64);
        let (ready_sender, ready_receiver) = bounded(1);
        let settings = MixSettings {
            music_enabled: config.music_enabled,
            music_volume: config.music_volume,
            volume: config.volume.clamp(0.0, 1.0),
        };

        // Start the audio thread
        let spawned = thread::Builder::new()
            .name("audio".into())
            .spawn(move || {
                if let Err(e) = run_audio_thread(receiver, ready_sender, settings) {
                    error!("Audio thread error: {e}");
                }
            });

        let mut state = Self::disabled(config);
        match spawned {
            Ok(_) if audio_started(&ready_receiver, STARTUP_TIMEOUT) => {
                state.sender = Some(sender);
            }
            Ok(_) => error!("No audio output, sound is disabled"),
            Err(e) => error!("Could not start audio thread: {e}"),
        }
        state
    }

    /// Keeps the settings but never produces sound. Used when no device is wanted.
    pub fn disabled(config: &AudioConfig) -> Self {
        Self {
            sender: None,
            music_enabled: config.music_enabled,
            sound_enabled: config.sound_enabled,
            volume: config.volume.clamp(0.0, 1.0),
            move_volume: config.move_volume,
            clear_volume: config.clear_volume,
        }
    }

    pub fn play_sound(&self, effect: SoundEffect) -> bool {
        if !self.sound_enabled {
            return false;
        }
        let gain = match effect {
            SoundEffect::Move => self.move_volume,
            SoundEffect::LineClear => self.clear_volume,
            SoundEffect::GameOver => 1.0,
        };
        self.send(AudioCommand::PlaySound(effect, gain));
        true
    }

    pub fn is_audio_available(&self) -> bool {
        self.sender.is_some()
    }

    pub fn is_music_enabled(&self) -> bool {
        self.music_enabled
    }

    pub fn is_sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    pub fn toggle_sound(&mut self) {
        self.sound_enabled = !self.sound_enabled;
    }

    pub fn get_volume(&self) -> f32 {
        self.volume
    }

    pub fn set_volume(&mut self, volume: f32) {
        // Clamp volume between 0.0 and 1.0
        self.volume = volume.clamp(0.0, 1.0);
        self.send(AudioCommand::SetVolume(self.volume));
    }

    pub fn toggle_music(&mut self) {
        self.music_enabled = !self.music_enabled;
        self.send(AudioCommand::PlayMusic(self.music_enabled));
    }

    // A full queue or a dead audio thread just drops the command
    fn send(&self, command: AudioCommand) {
        if let Some(sender) = &self.sender {
            let _ = sender.try_send(command);
        }
    }
}

impl Drop for AudioState {
    fn drop(&mut self) {
        self.send(AudioCommand::Quit);
    }
}

impl GameListener for AudioState {
    fn on_move(&mut self) {
        self.play_sound(SoundEffect::Move);
    }

    fn on_line_clear(&mut self, _lines: u32) {
        self.play_sound(SoundEffect::LineClear);
    }

    fn on_game_over(&mut self, _final_score: u32) {
        self.play_sound(SoundEffect::GameOver);
    }
}

// How long to wait for the output stream before giving up on audio
const STARTUP_TIMEOUT: Duration = Duration::from_secs(2);

/// Waits for the audio thread to report a running stream. A thread that fails
/// drops its end of the channel, which counts as not started.
pub(crate) fn audio_started(ready: &Receiver<()>, timeout: Duration) -> bool {
    ready.recv_timeout(timeout).is_ok()
}

fn run_audio_thread(
    receiver: Receiver<AudioCommand>,
    ready: Sender<()>,
    mut settings: MixSettings,
) -> Result<()> {
    // Get the default audio device
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| anyhow::anyhow!("No audio output device found"))?;
    let config = device.default_output_config()?;

    // Channels feeding the stream callback
    let (sound_sender, sound_receiver) = bounded::<(SoundEffect, f32)>(64);
    let (mix_sender, mix_receiver) = bounded::<MixSettings>(16);

    // Set up audio stream based on the device's sample format
    let _stream = match config.sample_format() {
        cpal::SampleFormat::F32 => {
            run_audio_stream::<f32>(&device, &config.into(), sound_receiver, mix_receiver, settings)?
        }
        cpal::SampleFormat::I16 => {
            run_audio_stream::<i16>(&device, &config.into(), sound_receiver, mix_receiver, settings)?
        }
        cpal::SampleFormat::U16 => {
            run_audio_stream::<u16>(&device, &config.into(), sound_receiver, mix_receiver, settings)?
        }
        _ => return Err(anyhow::anyhow!("Unsupported audio format")),
    };
    debug!("Audio stream started");
    let _ = ready.send(());

    // Keep the thread alive and process commands
    while let Ok(command) = receiver.recv() {
        match command {
            AudioCommand::PlaySound(effect, gain) => {
                let _ = sound_sender.try_send((effect, gain));
            }
            AudioCommand::PlayMusic(enabled) => {
                settings.music_enabled = enabled;
                let _ = mix_sender.try_send(settings);
            }
            AudioCommand::SetVolume(volume) => {
                settings.volume = volume;
                let _ = mix_sender.try_send(settings);
            }
            AudioCommand::Quit => break,
        }
    }

    Ok(())
}

// One playing sound effect
struct Voice {
    effect: SoundEffect,
    unit: Box<dyn AudioUnit>,
    gain: f32,
    remaining: f64,
}

/// Sound effects currently playing. A new move click replaces the one already
/// sounding, so a burst of moves is heard as a single click.
pub(crate) struct EffectMixer {
    voices: Vec<Voice>,
    sample_rate: f64,
}

impl EffectMixer {
    pub(crate) fn new(sample_rate: f64) -> Self {
        Self {
            voices: Vec::new(),
            sample_rate,
        }
    }

    pub(crate) fn trigger(&mut self, effect: SoundEffect, gain: f32) {
        if effect == SoundEffect::Move {
            self.voices.retain(|voice| voice.effect != SoundEffect::Move);
        }

        let mut unit = create_sound_effect(effect);
        unit.set_sample_rate(self.sample_rate);
        self.voices.push(Voice {
            effect,
            unit,
            gain,
            remaining: effect.duration(),
        });
    }

    pub(crate) fn playing(&self, effect: SoundEffect) -> usize {
        self.voices.iter().filter(|voice| voice.effect == effect).count()
    }

    /// Next stereo sample of all effects, dropping the ones that finished.
    pub(crate) fn next_sample(&mut self) -> (f32, f32) {
        let mut left = 0.0;
        let mut right = 0.0;

        for voice in &mut self.voices {
            let (l, r) = voice.unit.get_stereo();
            left += l * voice.gain;
            right += r * voice.gain;
            voice.remaining -= 1.0 / self.sample_rate;
        }
        self.voices.retain(|voice| voice.remaining > 0.0);

        (left, right)
    }
}

fn run_audio_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    sound_receiver: Receiver<(SoundEffect, f32)>,
    mix_receiver: Receiver<MixSettings>,
    initial: MixSettings,
) -> Result<cpal::Stream>
where
    T: SizedSample + FromSample<f32>,
{
    let sample_rate = f64::from(config.sample_rate.0);
    let channels = config.channels as usize;

    let mut settings = initial;
    let mut music = create_background_music();
    music.set_sample_rate(sample_rate);
    let mut effects = EffectMixer::new(sample_rate);

    let mut next_value = move || {
        while let Ok(update) = mix_receiver.try_recv() {
            settings = update;
        }

        while let Ok((effect, gain)) = sound_receiver.try_recv() {
            effects.trigger(effect, gain);
        }

        let (mut left, mut right) = effects.next_sample();

        // Music keeps advancing while muted so it resumes in time
        let (music_l, music_r) = music.get_stereo();
        if settings.music_enabled {
            left += music_l * settings.music_volume;
            right += music_r * settings.music_volume;
        }

        left *= settings.volume;
        right *= settings.volume;

        // Limiter
        (left.clamp(-1.0, 1.0), right.clamp(-1.0, 1.0))
    };

    let err_fn = |err| error!("Error in audio stream: {err}");

    let stream = device.build_output_stream(
        config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
            for frame in data.chunks_mut(channels) {
                let (left, right) = next_value();
                let left = T::from_sample(left);
                let right = T::from_sample(right);

                for (channel, sample) in frame.iter_mut().enumerate() {
                    *sample = if channel & 1 == 0 { left } else { right };
                }
            }
        },
        err_fn,
        None,
    )?;

    stream.play()?;

    Ok(stream)
}

// Short click for movement and rotation
fn create_move_click() -> Box<dyn AudioUnit> {
    Box::new(
        sine_hz(220.0) * envelope(|t| if t < 0.05 { 1.0 } else { 0.0 }) * 0.3 >> pan(0.0),
    )
}

// Rising sweep for cleared rows
fn create_line_clear() -> Box<dyn AudioUnit> {
    let sweep = envelope(|t| lerp(300.0, 800.0, (t * 5.0).min(1.0))) >> sine();

    let node = sweep
        * envelope(|t| {
            if t < 0.2 {
                1.0
            } else {
                (0.5 - t).max(0.0) * 2.0
            }
        })
        * 0.4;

    Box::new(node >> pan(-0.2))
}

// Descending pitch when the stack tops out
fn create_game_over() -> Box<dyn AudioUnit> {
    let sweep = envelope(|t| lerp(600.0, 200.0, (t * 0.5).min(1.0))) >> sine();

    let node = sweep * envelope(|t| (2.0 - t).max(0.0) * 0.5) * 0.4;
    Box::new(node >> pan(0.0))
}

fn create_sound_effect(effect: SoundEffect) -> Box<dyn AudioUnit> {
    match effect {
        SoundEffect::Move => create_move_click(),
        SoundEffect::LineClear => create_line_clear(),
        SoundEffect::GameOver => create_game_over(),
    }
}

// Looping background tune
fn create_background_music() -> Box<dyn AudioUnit> {
    let bass = sine_hz(110.0) * 0.08;

    // Melody walks a pentatonic scale
    let melody = lfo(move |t| {
        let notes = [220.0, 261.63, 293.66, 349.23, 392.0];
        let idx = ((t * 0.5) % 5.0) as usize;
        notes[idx]
    }) >> sine() * 0.1;

    let chord = sine_hz(220.0) * 0.03 + sine_hz(329.63) * 0.02 + sine_hz(392.0) * 0.02;

    let music = (bass + melody + chord) * 0.6;

    Box::new(music >> pan(0.0))
}
