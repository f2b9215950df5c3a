//! Strokepose turns a drawn gesture into an animated sequence of poses.
//!
//! A session runs in five stages:
//!
//! - Capture a pointer stroke onto an offscreen raster ([`StrokeCapture`])
//! - Resolve the stroke to the nearest entry of a [`ReferenceCatalog`]
//! - Plan a path through pose space from the previous pose ([`PathPlanner`])
//! - Decode the planned pose vectors into frames ([`FrameSynthesizer`])
//! - Play the frames back at a fixed virtual frame rate ([`AnimationPlayer`])
//!
//! [`SketchPipeline`] wires the stages together for one drawing session. The encoder and decoder
//! models are external; plug them in through [`StrokeEncoder`] and [`PoseDecoder`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Stroke capture and rasterization.
pub mod capture;
/// Reference catalog model and loading.
pub mod catalog;
/// Session configuration.
pub mod config;
/// Callback registries.
pub mod events;
/// Pose-space vector math and curves.
pub mod latent;
/// Session driver.
pub mod pipeline;
/// Path planning.
pub mod plan;
/// Frame playback.
pub mod player;
/// Nearest-neighbour resolution.
pub mod resolve;
/// External model boundary.
pub mod synth;

pub use crate::foundation::core::{Canvas, Fps, FrameRGBA, Point, Vec2};
pub use crate::foundation::error::{StrokeposeError, StrokeposeResult};

pub use crate::capture::stroke::{MoveOutcome, PointerEvent, PointerInput, StrokeCapture};
pub use crate::catalog::loader::{CatalogLoader, LoadEvent};
pub use crate::catalog::model::ReferenceCatalog;
pub use crate::config::{SketchConfig, TailBounds};
pub use crate::events::{SubscriptionId, Subscribers};
pub use crate::pipeline::SketchPipeline;
pub use crate::plan::planner::{PathPlanner, PlannedPath, PlannerSettings, Transition};
pub use crate::plan::session::StrokeSession;
pub use crate::player::{AnimationPlayer, FrameUpdated, TickOutcome};
pub use crate::synth::{FrameSynthesizer, Models, PoseDecoder, StrokeEncoder};
