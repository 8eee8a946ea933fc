//! Data-driven game balance
//!
//! Every gameplay constant lives here so it can be overridden from JSON without
//! touching the simulation. Defaults reproduce the shipped games.

use serde::{Deserialize, Serialize};

/// Narrowest platform a tuning override may ask for
pub const MIN_PLATFORM_WIDTH: f32 = 20.0;

/// `value` if it is finite, else `fallback`
fn finite_or(name: &str, value: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        log::warn!("{name} {value} is not finite, using {fallback}");
        fallback
    }
}

/// `value` if it is finite and above zero, else `fallback`
fn positive_or(name: &str, value: f32, fallback: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        log::warn!("{name} {value} must be positive, using {fallback}");
        fallback
    }
}

/// Cake Run balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CakeRunTuning {
    /// Logical playfield size (pixels)
    pub width: f32,
    pub height: f32,
    /// Downward acceleration (px/s²)
    pub gravity: f32,
    /// Upward velocity applied on jump (px/s)
    pub jump_impulse: f32,
    /// Leftward platform speed (px/s)
    pub scroll_speed: f32,
    /// Spike floor, measured from the top of the playfield
    pub ground_y: f32,
    /// Extra fall below the ground line tolerated before dying
    pub death_margin: f32,
    /// Player sprite size
    pub player_size: f32,
    /// Player center x
    pub player_x: f32,
    /// Gap between consecutive spawned platforms (px)
    pub gap_min: f32,
    pub gap_max: f32,
    /// Platform width range
    pub platform_min_width: f32,
    pub platform_max_width: f32,
    pub platform_height: f32,
    /// Platform top y = height - (rise_min + rand * rise_range)
    pub platform_rise_min: f32,
    pub platform_rise_range: f32,
    /// Distance ahead of the right edge where platforms spawn
    pub spawn_ahead: f32,
    /// Platforms whose right edge passes this x are culled
    pub cull_x: f32,
    /// Score trickle (points per second alive)
    pub trickle_per_sec: f32,
    pub cake_points: f32,
    pub pepper_penalty: f32,
    pub cone_points: f32,
    /// Probability roll below this picks a pepper
    pub pepper_chance: f32,
    /// Probability roll above this picks a cone
    pub cone_threshold: f32,
    /// Probability of a stacked column
    pub stack_chance: f32,
}

impl Default for CakeRunTuning {
    fn default() -> Self {
        let height = 540.0;
        Self {
            width: 960.0,
            height,
            gravity: 2200.0,
            jump_impulse: 760.0,
            scroll_speed: 260.0,
            ground_y: height - 90.0,
            death_margin: 5.0,
            player_size: 96.0,
            player_x: 150.0,
            gap_min: 100.0,
            gap_max: 170.0,
            platform_min_width: 160.0,
            platform_max_width: 380.0,
            platform_height: 16.0,
            platform_rise_min: 150.0,
            platform_rise_range: 140.0,
            spawn_ahead: 300.0,
            cull_x: -120.0,
            trickle_per_sec: 2.0,
            cake_points: 10.0,
            pepper_penalty: 50.0,
            cone_points: 100.0,
            pepper_chance: 0.18,
            cone_threshold: 0.96,
            stack_chance: 0.35,
        }
    }
}

impl CakeRunTuning {
    /// Horizontal distance scrolled during one jump that lands at take-off height
    pub fn max_jumpable_gap(&self) -> f32 {
        if self.gravity <= 0.0 {
            return f32::INFINITY;
        }
        let airtime = 2.0 * self.jump_impulse / self.gravity;
        self.scroll_speed * airtime
    }

    /// Clamp inconsistent values so generated levels stay playable
    pub fn sanitized(mut self) -> Self {
        let d = Self::default();
        self.width = positive_or("width", self.width, d.width);
        self.height = positive_or("height", self.height, d.height);
        self.gravity = finite_or("gravity", self.gravity, d.gravity);
        self.jump_impulse = finite_or("jump_impulse", self.jump_impulse, d.jump_impulse);
        self.scroll_speed = finite_or("scroll_speed", self.scroll_speed, d.scroll_speed);
        self.ground_y = finite_or("ground_y", self.ground_y, d.ground_y);
        self.player_size = positive_or("player_size", self.player_size, d.player_size);
        self.platform_height = positive_or("platform_height", self.platform_height, d.platform_height);
        self.spawn_ahead = finite_or("spawn_ahead", self.spawn_ahead, d.spawn_ahead);
        self.cull_x = finite_or("cull_x", self.cull_x, d.cull_x);
        self.gap_min = finite_or("gap_min", self.gap_min, d.gap_min);
        self.gap_max = finite_or("gap_max", self.gap_max, d.gap_max);
        self.platform_min_width = finite_or("platform_min_width", self.platform_min_width, d.platform_min_width)
            .max(MIN_PLATFORM_WIDTH);
        self.platform_max_width = finite_or("platform_max_width", self.platform_max_width, d.platform_max_width);

        let max_gap = self.max_jumpable_gap();
        if self.gap_max > max_gap {
            log::warn!(
                "gap_max {} exceeds jumpable distance {:.1}, clamping",
                self.gap_max,
                max_gap
            );
            self.gap_max = max_gap;
        }
        self.gap_min = self.gap_min.clamp(0.0, self.gap_max.max(0.0));
        if self.platform_max_width < self.platform_min_width {
            self.platform_max_width = self.platform_min_width;
        }
        self.death_margin = finite_or("death_margin", self.death_margin, d.death_margin).max(0.0);
        self
    }
}

/// Drive balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriveTuning {
    pub width: f32,
    pub height: f32,
    pub road_width: f32,
    pub lanes: u32,
    /// Initial scroll speed (px/s), ramping up to `max_speed`
    pub start_speed: f32,
    pub max_speed: f32,
    pub speed_ramp: f32,
    /// Lateral acceleration while steering (px/s²)
    pub steer_accel: f32,
    /// Lateral velocity kept per 60 Hz frame
    pub turn_friction: f32,
    pub car_width: f32,
    pub car_height: f32,
    /// Car center distance from the bottom edge
    pub car_bottom_offset: f32,
    /// Fuel lost per second (full tank = 1.0)
    pub fuel_drain: f32,
    pub fuel_refill: f32,
    /// Fuel cans scroll slower than the road
    pub fuel_speed_factor: f32,
    pub fuel_radius_x: f32,
    pub fuel_radius_y: f32,
    /// Block timer: max(floor, start - t * decay)
    pub block_interval_start: f32,
    pub block_interval_floor: f32,
    pub block_interval_decay: f32,
    /// Fuel timer: min + rand * range
    pub fuel_interval_min: f32,
    pub fuel_interval_range: f32,
    /// Entities whose top edge passes height + margin are culled
    pub cull_margin: f32,
}

impl Default for DriveTuning {
    fn default() -> Self {
        Self {
            width: 520.0,
            height: 780.0,
            road_width: 360.0,
            lanes: 3,
            start_speed: 260.0,
            max_speed: 520.0,
            speed_ramp: 6.0,
            steer_accel: 6900.0,
            turn_friction: 0.9,
            car_width: 60.0,
            car_height: 110.0,
            car_bottom_offset: 140.0,
            fuel_drain: 0.055,
            fuel_refill: 0.4,
            fuel_speed_factor: 0.9,
            fuel_radius_x: 26.0,
            fuel_radius_y: 20.0,
            block_interval_start: 1.2,
            block_interval_floor: 0.45,
            block_interval_decay: 0.02,
            fuel_interval_min: 2.5,
            fuel_interval_range: 1.8,
            cull_margin: 20.0,
        }
    }
}

impl DriveTuning {
    /// Left edge of the road
    pub fn road_x(&self) -> f32 {
        (self.width - self.road_width) / 2.0
    }

    pub fn lane_width(&self) -> f32 {
        self.road_width / self.lanes.max(1) as f32
    }

    /// Center x of a lane (0-based, clamped to the last lane)
    pub fn lane_center(&self, lane: u32) -> f32 {
        let lane = lane.min(self.lanes.max(1) - 1);
        self.road_x() + lane as f32 * self.lane_width() + self.lane_width() * 0.5
    }

    /// Coerce sizes and rates into a drivable road. A car wider than the
    /// playfield is narrowed to fit.
    pub fn sanitized(mut self) -> Self {
        let d = Self::default();
        self.width = positive_or("width", self.width, d.width);
        self.height = positive_or("height", self.height, d.height);
        self.car_width = positive_or("car_width", self.car_width, d.car_width).min(self.width);
        self.car_height = positive_or("car_height", self.car_height, d.car_height);
        self.road_width = finite_or("road_width", self.road_width, d.road_width)
            .max(self.car_width)
            .min(self.width);
        self.lanes = self.lanes.max(1);
        self.start_speed = finite_or("start_speed", self.start_speed, d.start_speed);
        self.max_speed = finite_or("max_speed", self.max_speed, d.max_speed);
        self.speed_ramp = finite_or("speed_ramp", self.speed_ramp, d.speed_ramp);
        self.steer_accel = finite_or("steer_accel", self.steer_accel, d.steer_accel);
        self.turn_friction = finite_or("turn_friction", self.turn_friction, d.turn_friction).clamp(0.0, 1.0);
        self.car_bottom_offset = finite_or("car_bottom_offset", self.car_bottom_offset, d.car_bottom_offset);
        self.fuel_drain = finite_or("fuel_drain", self.fuel_drain, d.fuel_drain);
        self.fuel_refill = finite_or("fuel_refill", self.fuel_refill, d.fuel_refill);
        self.fuel_speed_factor = finite_or("fuel_speed_factor", self.fuel_speed_factor, d.fuel_speed_factor);
        self.fuel_radius_x = finite_or("fuel_radius_x", self.fuel_radius_x, d.fuel_radius_x);
        self.fuel_radius_y = finite_or("fuel_radius_y", self.fuel_radius_y, d.fuel_radius_y);
        self.block_interval_start = finite_or("block_interval_start", self.block_interval_start, d.block_interval_start);
        self.block_interval_floor =
            finite_or("block_interval_floor", self.block_interval_floor, d.block_interval_floor).max(0.05);
        self.block_interval_decay = finite_or("block_interval_decay", self.block_interval_decay, d.block_interval_decay);
        self.fuel_interval_min =
            finite_or("fuel_interval_min", self.fuel_interval_min, d.fuel_interval_min).max(0.05);
        self.fuel_interval_range =
            finite_or("fuel_interval_range", self.fuel_interval_range, d.fuel_interval_range).max(0.0);
        self.cull_margin = finite_or("cull_margin", self.cull_margin, d.cull_margin);
        self
    }
}
