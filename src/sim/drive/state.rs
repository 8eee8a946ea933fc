//! Drive entities

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::geom::Rect;
use crate::tuning::DriveTuning;

/// The player's car
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    /// Center position
    pub pos: Vec2,
    /// Lateral velocity
    pub vel_x: f32,
    pub size: Vec2,
}

impl Car {
    pub fn new(tuning: &DriveTuning) -> Self {
        Self {
            pos: Vec2::new(tuning.width / 2.0, tuning.height - tuning.car_bottom_offset),
            vel_x: 0.0,
            size: Vec2::new(tuning.car_width, tuning.car_height),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_center(self.pos, self.size)
    }
}

/// A road block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Center position
    pub pos: Vec2,
    pub size: Vec2,
}

impl Block {
    pub fn rect(&self) -> Rect {
        Rect::from_center(self.pos, self.size)
    }
}

/// A fuel can
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelCan {
    /// Center position
    pub pos: Vec2,
    /// Ellipse semi-axes used for hit-testing and drawing
    pub radii: Vec2,
    /// Fuel restored on pickup
    pub refill: f32,
}

impl FuelCan {
    pub fn top(&self) -> f32 {
        self.pos.y - self.radii.y
    }
}

/// Every mutable entity of a Drive session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriveStore {
    pub car: Car,
    pub blocks: Vec<Block>,
    pub fuel_cans: Vec<FuelCan>,
    /// Tank level in [0, 1]
    pub fuel: f32,
    /// Current road speed (px/s)
    pub speed: f32,
    /// Seconds survived; also the score
    pub elapsed: f32,
    /// Seconds until the next block
    pub block_timer: f32,
    /// Seconds until the next fuel can
    pub fuel_timer: f32,
}

impl DriveStore {
    pub fn new(tuning: &DriveTuning) -> Self {
        Self {
            car: Car::new(tuning),
            blocks: Vec::new(),
            fuel_cans: Vec::new(),
            fuel: 1.0,
            speed: tuning.start_speed,
            elapsed: 0.0,
            block_timer: 0.0,
            fuel_timer: 0.0,
        }
    }
}
