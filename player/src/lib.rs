//! Recording and playback of animation sequences.
//!
//! A [`Recorder`] turns `play()` and `wait()` calls into the segments of a [`SegmentTimeline`],
//! which can be played, paused, sought, and navigated segment by segment. A [`PlaybackDriver`]
//! feeds it from host frame callbacks, and the [`Player`] ties all of them to a scene.

mod config;
mod driver;
mod frame_monitor;
mod player;
mod recorder;
mod segment;
mod segment_timeline;
mod time_format;

pub use config::*;
pub use driver::*;
pub use frame_monitor::*;
pub use player::*;
pub use recorder::*;
pub use segment::*;
pub use segment_timeline::*;
pub use time_format::*;
