//! Single-session driver: capture, resolve, plan, decode, play.
//!
//! [`SketchPipeline`] owns every piece of mutable session state. Pointer input goes in through
//! [`SketchPipeline::handle_pointer`]; a completed stroke runs the whole resolve-and-generate
//! chain before the call returns, with stroke capture disabled for the duration. Display refresh
//! goes in through [`SketchPipeline::tick`].

use std::path::Path;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::capture::stroke::{PointerInput, StrokeCapture};
use crate::catalog::loader::CatalogLoader;
use crate::catalog::model::ReferenceCatalog;
use crate::config::SketchConfig;
use crate::foundation::core::FrameRGBA;
use crate::foundation::error::{StrokeposeError, StrokeposeResult};
use crate::plan::planner::{PathPlanner, PlannedPath, PlannerSettings};
use crate::plan::session::StrokeSession;
use crate::player::{AnimationPlayer, TickOutcome};
use crate::resolve::resolve_stroke;
use crate::synth::{FrameSynthesizer, Models, StrokeEncoder};

/// One drawing session wired end to end.
pub struct SketchPipeline {
    config: SketchConfig,
    catalog: ReferenceCatalog,
    encoder: Box<dyn StrokeEncoder>,
    synth: FrameSynthesizer,
    capture: StrokeCapture,
    session: StrokeSession,
    planner: PathPlanner,
    rng: StdRng,
    player: AnimationPlayer,
    busy: bool,
}

impl std::fmt::Debug for SketchPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SketchPipeline")
            .field("catalog_len", &self.catalog.len())
            .field("session", &self.session)
            .field("player", &self.player)
            .field("busy", &self.busy)
            .finish_non_exhaustive()
    }
}

impl SketchPipeline {
    /// Assemble a session from a loaded catalog and the external models.
    pub fn new(
        config: SketchConfig,
        catalog: ReferenceCatalog,
        models: Models,
    ) -> StrokeposeResult<Self> {
        config.validate()?;
        let planner = PathPlanner::new(PlannerSettings::from(&config))?;
        let capture = StrokeCapture::new(&config)?;
        let synth = FrameSynthesizer::new(models.decoder, catalog.pose_dim(), config.canvas);
        let player = AnimationPlayer::new(config.playback_fps, config.canvas);
        let rng = StdRng::seed_from_u64(config.seed);

        Ok(Self {
            config,
            catalog,
            encoder: models.encoder,
            synth,
            capture,
            session: StrokeSession::new(),
            planner,
            rng,
            player,
            busy: false,
        })
    }

    /// Load the catalog at `path`, reporting progress, then assemble the session.
    pub fn load(
        config: SketchConfig,
        path: impl AsRef<Path>,
        models: Models,
        on_progress: impl FnMut(f64),
    ) -> StrokeposeResult<Self> {
        let catalog = CatalogLoader::open(path).load_with_progress(on_progress)?;
        Self::new(config, catalog, models)
    }

    /// Feed one pointer input. Returns the planned path when the input completed a stroke.
    pub fn handle_pointer(&mut self, input: PointerInput) -> StrokeposeResult<Option<PlannedPath>> {
        match self.capture.handle(input)? {
            Some(stroke) => self.submit_stroke(&stroke).map(Some),
            None => Ok(None),
        }
    }

    /// Resolve a finished stroke image, plan the path to it, decode the frames and queue them
    /// for playback.
    ///
    /// The session history only advances when every step succeeds.
    #[tracing::instrument(skip_all, fields(strokes = self.session.len()))]
    pub fn submit_stroke(&mut self, stroke: &FrameRGBA) -> StrokeposeResult<PlannedPath> {
        if self.busy {
            return Err(StrokeposeError::validation(
                "a stroke is already being processed",
            ));
        }
        self.busy = true;
        self.capture.set_enabled(false);

        let result = self.generate(stroke);

        self.capture.set_enabled(true);
        self.busy = false;
        result
    }

    fn generate(&mut self, stroke: &FrameRGBA) -> StrokeposeResult<PlannedPath> {
        let current = resolve_stroke(&self.catalog, self.encoder.as_ref(), stroke)?;

        let mut session = self.session.clone();
        let path = self
            .planner
            .plan(&self.catalog, &mut session, current, &mut self.rng)?;
        let frames = self.synth.decode_many(&path.poses)?;

        self.session = session;
        self.player.add_frames(frames);
        self.player.animate();
        tracing::debug!(
            current,
            anchor = path.anchor,
            buffered = self.player.len(),
            "stroke queued"
        );
        Ok(path)
    }

    /// Advance playback to the display timestamp `now_secs`.
    pub fn tick(&mut self, now_secs: f64) -> TickOutcome {
        self.player.tick(now_secs)
    }

    /// Return `true` while a stroke is being resolved and decoded.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Session configuration.
    pub fn config(&self) -> &SketchConfig {
        &self.config
    }

    /// The reference catalog.
    pub fn catalog(&self) -> &ReferenceCatalog {
        &self.catalog
    }

    /// Resolved anchors so far.
    pub fn session(&self) -> &StrokeSession {
        &self.session
    }

    /// Stroke capture, for view scale updates and draw subscriptions.
    pub fn capture_mut(&mut self) -> &mut StrokeCapture {
        &mut self.capture
    }

    /// Read-only view of stroke capture.
    pub fn capture(&self) -> &StrokeCapture {
        &self.capture
    }

    /// The animation player.
    pub fn player(&self) -> &AnimationPlayer {
        &self.player
    }

    /// Mutable player access, for frame-updated subscriptions and cancellation.
    pub fn player_mut(&mut self) -> &mut AnimationPlayer {
        &mut self.player
    }
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
