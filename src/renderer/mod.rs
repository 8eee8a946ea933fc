//! Display-list rendering
//!
//! Scenes turn immutable game state into a [`DrawList`]; a [`Surface`] executes
//! it. The Canvas 2D surface lives in [`canvas`] (wasm only).

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod cake_run;
pub mod draw;
pub mod drive;
pub mod sprites;

use glam::Vec2;

pub use draw::{Color, DrawCmd, DrawList, TextAlign};
pub use sprites::{SpriteId, SpriteMask, SpriteSet};

use crate::sim::Phase;

/// Session facts the HUD and overlays need
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HudView {
    pub phase: Phase,
    pub score: u64,
    /// Best including the current run
    pub best: u64,
    /// FPS readout, when enabled
    pub fps: Option<u32>,
    pub reduced_motion: bool,
}

/// Something that can draw itself
pub trait Scene {
    /// Draw the playfield and HUD. Must not change game state.
    fn draw(&self, sprites: &dyn SpriteSet, hud: &HudView, out: &mut DrawList);

    /// Prompt shown while waiting to start
    fn start_hint(&self) -> &'static str;
}

/// A render target
pub trait Surface {
    fn sprites(&self) -> &dyn SpriteSet;

    /// Called once per frame before drawing (resize checks and the like)
    fn begin_frame(&mut self) {}

    fn present(&mut self, list: &DrawList);
}

const DIM: Color = Color::rgba(10, 12, 18, 0.35);
const CRASH_SHADE: Color = Color::rgba(0, 0, 0, 0.55);

/// Build the full frame for `scene`, overlays included
pub fn build_frame<S: Scene + ?Sized>(scene: &S, size: Vec2, sprites: &dyn SpriteSet, hud: &HudView) -> DrawList {
    let mut list = DrawList::new(size);
    scene.draw(sprites, hud, &mut list);
    draw_overlays(&mut list, hud, scene.start_hint());
    list
}

pub fn draw_overlays(list: &mut DrawList, hud: &HudView, start_hint: &str) {
    let center = list.size / 2.0;
    match hud.phase {
        Phase::Running => {}
        Phase::Idle => {
            list.fill(DIM);
            list.bold_text("Ready?", center - Vec2::new(0.0, 40.0), 28.0, TextAlign::Center, Color::WHITE);
            list.text(start_hint, center - Vec2::new(0.0, 10.0), 16.0, TextAlign::Center, Color::WHITE);
        }
        Phase::Paused => {
            list.fill(DIM);
            list.bold_text("Paused", center - Vec2::new(0.0, 40.0), 28.0, TextAlign::Center, Color::WHITE);
            list.text("Press P to resume", center - Vec2::new(0.0, 10.0), 16.0, TextAlign::Center, Color::WHITE);
        }
        Phase::Crashed(cause) => {
            list.fill(CRASH_SHADE);
            list.bold_text("Crash!", center - Vec2::new(0.0, 40.0), 28.0, TextAlign::Center, Color::WHITE);
            list.text(
                format!("You {cause}. Press R to restart."),
                center - Vec2::new(0.0, 10.0),
                16.0,
                TextAlign::Center,
                Color::WHITE,
            );
        }
    }

    if let Some(fps) = hud.fps {
        list.text(
            format!("{fps} fps"),
            Vec2::new(list.size.x - 14.0, list.size.y - 14.0),
            12.0,
            TextAlign::Right,
            Color::rgba(255, 255, 255, 0.6),
        );
    }
}

/// Keeps the last presented frame; for headless runs and tests
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    pub sprites: SpriteMask,
    pub last: Option<DrawList>,
    pub frames: u64,
}

impl RecordingSurface {
    pub fn new(sprites: SpriteMask) -> Self {
        Self {
            sprites,
            last: None,
            frames: 0,
        }
    }
}

impl Surface for RecordingSurface {
    fn sprites(&self) -> &dyn SpriteSet {
        &self.sprites
    }

    fn present(&mut self, list: &DrawList) {
        self.last = Some(list.clone());
        self.frames += 1;
    }
}
