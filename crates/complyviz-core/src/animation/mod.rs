//! Scroll-triggered value animation
//!
//! # Layers
//!
//! ## Pure functions
//! - `easing` - easing curves mapping progress [0, 1] to [0, 1]
//! - `timing` - progress and interpolation helpers
//!
//! ## Per-run state
//! - `value` - one fixed-duration eased run (`ValueAnimation`)
//! - `lerp` - unbounded fixed-rate approach for continuous scenes
//! - `sequencer` - staggered items and multi-stage handoff
//! - `visibility` - one-shot viewport intersection latch
//!
//! ## Host capabilities
//! - `clock` - frame timestamps
//! - `frame` - `request_frame` / `cancel` scheduling
//! - `trigger` - mounts wiring detector, sequencer and frames together
//!
//! # Usage
//!
//! ```ignore
//! let stage = StageSpec::new("bars", vec![92.0, 78.0], Duration::from_millis(800))
//!     .with_stagger(Duration::from_millis(150));
//! let mut mount = ScrollTrigger::new(detector, Sequencer::single(stage)?);
//!
//! // every layout pass
//! mount.observe(Some(panel_rect), viewport, clock.now(), &mut frames);
//! // every frame
//! frames.run_frame(clock.now());
//! // during render
//! let bars = mount.sequencer().values(0).to_vec();
//! ```

pub mod clock;
pub mod easing;
pub mod frame;
pub mod lerp;
pub mod sequencer;
pub mod timing;
pub mod trigger;
pub mod value;
pub mod visibility;

pub use clock::{Clock, ManualClock, SystemClock};
pub use easing::Easing;
pub use frame::{FrameCallback, FrameHandle, FrameLoop, FrameRequest, FrameScheduler};
pub use lerp::{Lerp, Lerp2};
pub use sequencer::{Sequencer, SequencerState, StageSpec, StaggerSchedule};
pub use trigger::{ContinuousMount, ScrollTrigger};
pub use value::{AnimatedValue, RunStatus, Sample, ValueAnimation};
pub use visibility::{intersection_ratio, LayoutRect, VisibilityDetector};
