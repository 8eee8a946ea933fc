//! Frame driver
//!
//! A `Session` owns one game plus everything around it: the phase state
//! machine, input, frame clock and best score. The host calls [`Session::frame`]
//! once per animation frame and forwards input and visibility events.

use crate::display_score;
use crate::persistence::ScoreStore;
use crate::platform::{Action, Bindings, FpsCounter, FrameClock, FrameStep, InputState};
use crate::renderer::{HudView, Scene, Surface, build_frame};
use crate::settings::Settings;
use crate::sim::{CrashCause, Game, Phase, sanitize_dt};

/// Derive the seed of the next run (splitmix64 step)
pub fn next_seed(seed: u64) -> u64 {
    let mut z = seed.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

pub struct Session<G, S> {
    game: G,
    store: S,
    bindings: Bindings,
    pub settings: Settings,
    phase: Phase,
    input: InputState,
    clock: FrameClock,
    fps: FpsCounter,
    best: u64,
    seed: u64,
}

impl<G, S> Session<G, S>
where
    G: Game + Scene,
    S: ScoreStore,
{
    /// Wrap a freshly reset game. The session waits in `Idle` for a start.
    pub fn new(game: G, store: S, bindings: Bindings, settings: Settings, seed: u64) -> Self {
        let best = store.load_best();
        log::info!("Session created ({bindings:?}), best {best}");
        Self {
            game,
            store,
            bindings,
            settings,
            phase: Phase::Idle,
            input: InputState::default(),
            clock: FrameClock::new(),
            fps: FpsCounter::default(),
            best,
            seed,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn bindings(&self) -> Bindings {
        self.bindings
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Whole-number score of the current run
    pub fn score(&self) -> u64 {
        display_score(self.game.score())
    }

    /// Best score so far. A run that beats it is saved as the score climbs.
    pub fn best(&self) -> u64 {
        self.best
    }

    pub fn fps(&self) -> u32 {
        self.fps.fps()
    }

    pub fn hud(&self) -> HudView {
        let score = self.score();
        HudView {
            phase: self.phase,
            score,
            best: self.best.max(score),
            fps: self.settings.show_fps.then(|| self.fps.fps()),
            reduced_motion: self.settings.reduced_motion,
        }
    }

    pub fn start(&mut self) {
        if self.phase == Phase::Idle {
            self.phase = Phase::Running;
            log::info!("Run started (seed {})", self.seed);
        }
    }

    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            Phase::Running => Phase::Paused,
            Phase::Paused => Phase::Running,
            other => other,
        };
        log::debug!("Pause toggled: {:?}", self.phase);
    }

    /// Page hidden. Pauses a running game and never resumes on its own.
    pub fn on_hidden(&mut self) {
        self.input.release_all();
        if self.phase == Phase::Running {
            self.phase = Phase::Paused;
            log::info!("Auto-paused (page hidden)");
        }
    }

    /// Window lost focus
    pub fn on_blur(&mut self) {
        self.input.release_all();
        if self.settings.pause_on_blur && self.phase == Phase::Running {
            self.phase = Phase::Paused;
            log::info!("Auto-paused (window blur)");
        }
    }

    /// Rebuild the game from scratch with `seed` and run immediately
    pub fn restart(&mut self, seed: u64) {
        self.seed = seed;
        self.game.reset(seed);
        self.input = InputState::default();
        self.phase = Phase::Running;
        log::info!("Run restarted (seed {seed})");
    }

    fn restart_next(&mut self) {
        self.restart(next_seed(self.seed));
    }

    pub fn press(&mut self, action: Action) {
        match action {
            Action::Pause => self.toggle_pause(),
            Action::Restart => self.restart_next(),
            Action::Primary => match self.phase {
                Phase::Idle => self.start(),
                Phase::Crashed(_) => self.restart_next(),
                Phase::Running => self.input.press(action),
                Phase::Paused => {}
            },
            Action::SteerLeft | Action::SteerRight => self.input.press(action),
        }
    }

    pub fn release(&mut self, action: Action) {
        self.input.release(action);
    }

    /// Returns whether the key is bound (the host then suppresses the default)
    pub fn key_down(&mut self, key: &str) -> bool {
        match self.bindings.action_for_key(key) {
            Some(action) => {
                self.press(action);
                true
            }
            None => false,
        }
    }

    pub fn key_up(&mut self, key: &str) -> bool {
        match self.bindings.action_for_key(key) {
            Some(action) => {
                self.release(action);
                true
            }
            None => false,
        }
    }

    /// Pointer or touch at `x` on a surface `width` logical pixels wide.
    /// A tap also starts and restarts.
    pub fn pointer_down(&mut self, x: f32, width: f32) {
        match self.phase {
            Phase::Idle => self.start(),
            Phase::Crashed(_) => self.restart_next(),
            _ => {
                // Sliding a finger across the middle switches direction
                self.input.release_all();
                let action = self.bindings.action_for_pointer(x, width);
                self.press(action);
            }
        }
    }

    pub fn pointer_up(&mut self) {
        self.input.release_all();
    }

    /// Simulate one step if running. One-shot input is consumed either way.
    pub fn advance(&mut self, dt: f32) -> Option<CrashCause> {
        let dt = sanitize_dt(dt);
        let crash = if self.phase.is_running() {
            let input = self.input.tick_input();
            let crash = self.game.step(dt, &input);
            self.record_best();
            crash
        } else {
            None
        };
        self.input.clear_one_shots();

        if let Some(cause) = crash {
            self.phase = Phase::Crashed(cause);
            log::info!("Crashed: {cause} (score {}, best {})", self.score(), self.best);
        }
        crash
    }

    /// Save the score the moment it beats the best, so leaving mid-run
    /// keeps the record
    fn record_best(&mut self) {
        let score = self.score();
        if score > self.best {
            self.best = score;
            self.store.save_best(score);
        }
    }

    /// One animation frame at host time `now_ms`
    pub fn frame<T: Surface + ?Sized>(&mut self, now_ms: f64, surface: &mut T) {
        self.fps.record(now_ms);
        match self.clock.tick(now_ms) {
            FrameStep::Simulate(dt) => {
                self.advance(dt);
            }
            // One-shots wait for the next simulated frame
            FrameStep::Skip => {}
        }

        surface.begin_frame();
        let hud = self.hud();
        let list = build_frame(&self.game, self.game.size(), surface.sprites(), &hud);
        surface.present(&list);
    }
}
