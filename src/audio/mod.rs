pub mod playback;

pub use playback::{AudioPlayer, ClipGate, MockPlayer, PlayCall, RodioPlayer};
