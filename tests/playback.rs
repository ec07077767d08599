use std::f32::consts::PI;
use std::path::Path;

use phonochart::audio::RodioPlayer;
use rodio::Source;

const SAMPLE_RATE: u32 = 16_000;

fn write_tone(path: &Path) {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    for index in 0..SAMPLE_RATE / 10 {
        let t = index as f32 / SAMPLE_RATE as f32;
        let sample = (2.0 * PI * 440.0 * t).sin() * 0.5;
        writer.write_sample((sample * i16::MAX as f32) as i16).unwrap();
    }
    writer.finalize().unwrap();
}

#[test]
fn loads_clip_relative_to_assets_root() {
    let assets = tempfile::tempdir().unwrap();
    std::fs::create_dir(assets.path().join("sounds")).unwrap();
    write_tone(&assets.path().join("sounds/sound_a.wav"));

    let player = RodioPlayer::new(assets.path());
    let decoder = player.load("sounds/sound_a.wav").unwrap();
    assert_eq!(decoder.sample_rate(), SAMPLE_RATE);
    assert_eq!(decoder.channels(), 1);
}

#[test]
fn undecodable_clip_is_a_playback_error() {
    let assets = tempfile::tempdir().unwrap();
    std::fs::write(assets.path().join("broken.mp3"), b"not audio at all").unwrap();

    let err = RodioPlayer::new(assets.path())
        .load("broken.mp3")
        .err()
        .unwrap();
    assert_eq!(err.path, "broken.mp3");
}
