//! Simulation module
//!
//! All gameplay logic lives here. Nothing in this module touches the browser,
//! the renderer or storage:
//! - Steps are driven by an explicit, sanitized `dt`
//! - Seeded RNG only, so a seed reproduces a level
//! - Entity collections are owned by one state struct per game

pub mod cake_run;
pub mod drive;
pub mod game;
pub mod geom;
pub mod physics;

pub use cake_run::CakeRun;
pub use drive::Drive;
pub use game::{CrashCause, Game, Phase, TickInput};
pub use geom::{Rect, aabb_overlap, ellipse_overlap};
pub use physics::{integrate, integrate_axis, sanitize_dt};
