//! Drive scene

use glam::Vec2;

use super::draw::{Color, DrawList, TextAlign};
use super::sprites::{SpriteId, SpriteSet};
use super::{HudView, Scene};
use crate::sim::Rect;
use crate::sim::drive::{Car, Drive};

const BACKGROUND: Color = Color::rgb(0x0b, 0x12, 0x20);
const ROAD: Color = Color::rgb(0x30, 0x36, 0x40);
const LANE_MARK: Color = Color::rgb(0xea, 0xea, 0xea);
const ROAD_EDGE: Color = Color::rgb(0xc2, 0xc8, 0xd0);
const BLOCK: Color = Color::rgb(0x7a, 0x86, 0x99);
const FUEL_FILL: Color = Color::rgb(0xf5, 0xd7, 0x6e);
const FUEL_STROKE: Color = Color::rgb(0x8b, 0x6f, 0x1f);
const FUEL_LABEL: Color = Color::rgb(0x2b, 0x2b, 0x2b);
const CAR_BODY: Color = Color::rgb(0xd9, 0x3a, 0x3e);
const CAR_FACE: Color = Color::rgb(0xf9, 0xb4, 0xc8);
const HUD_TEXT: Color = Color::rgb(0xe6, 0xee, 0xf7);
const BAR_BACK: Color = Color::rgb(0x23, 0x2a, 0x34);
const BAR_FILL: Color = Color::rgb(0x2e, 0xc2, 0x7e);

const DASH_H: f32 = 40.0;
const DASH_GAP: f32 = 28.0;
const PAD: f32 = 14.0;
const BAR_W: f32 = 180.0;
const BAR_H: f32 = 18.0;

fn draw_road(list: &mut DrawList, game: &Drive) {
    let t = &game.tuning;
    let road_x = t.road_x();
    list.rect(Rect::new(road_x, 0.0, t.road_width, t.height), ROAD);

    let period = DASH_H + DASH_GAP;
    let offset = (game.store.elapsed * game.store.speed * 0.4).rem_euclid(period);
    for lane in 1..t.lanes {
        let x = road_x + lane as f32 * t.lane_width();
        let mut y = -DASH_H;
        while y < t.height + DASH_H {
            list.rect(Rect::new(x - 4.0, y + offset, 8.0, DASH_H), LANE_MARK);
            y += period;
        }
    }

    list.rect(Rect::new(road_x - 6.0, 0.0, 6.0, t.height), ROAD_EDGE);
    list.rect(Rect::new(road_x + t.road_width, 0.0, 6.0, t.height), ROAD_EDGE);
}

fn draw_car_placeholder(list: &mut DrawList, car: &Car) {
    list.round_rect(car.rect(), 12.0, CAR_BODY);
    let face = car.pos - Vec2::new(0.0, car.size.y * 0.38);
    list.ellipse(face, Vec2::new(18.0, 14.0), CAR_FACE);
    list.ellipse(face - Vec2::new(6.0, 0.0), Vec2::splat(2.6), Color::BLACK);
    list.ellipse(face + Vec2::new(6.0, 0.0), Vec2::splat(2.6), Color::BLACK);
}

fn draw_hud(list: &mut DrawList, fuel: f32, hud: &HudView) {
    list.round_rect(
        Rect::new(PAD - 2.0, PAD - 2.0, BAR_W + 4.0, BAR_H + 4.0),
        8.0,
        Color::rgba(255, 255, 255, 0.08),
    );
    list.round_rect(Rect::new(PAD, PAD, BAR_W, BAR_H), 6.0, BAR_BACK);
    let fill = fuel.clamp(0.0, 1.0) * BAR_W;
    if fill > 0.0 {
        list.round_rect(Rect::new(PAD, PAD, fill, BAR_H), 6.0, BAR_FILL);
    }
    list.text("Fuel", Vec2::new(PAD + 6.0, PAD + BAR_H + 12.0), 12.0, TextAlign::Left, HUD_TEXT);

    let right = list.size.x - PAD;
    list.text(
        format!("Score: {}", hud.score),
        Vec2::new(right, PAD + 12.0),
        16.0,
        TextAlign::Right,
        HUD_TEXT,
    );
    list.text(
        format!("Best: {}", hud.best),
        Vec2::new(right, PAD + 32.0),
        16.0,
        TextAlign::Right,
        HUD_TEXT,
    );
}

impl Scene for Drive {
    fn draw(&self, sprites: &dyn SpriteSet, hud: &HudView, out: &mut DrawList) {
        out.clear(BACKGROUND);
        draw_road(out, self);

        for block in &self.store.blocks {
            out.round_rect(block.rect(), 8.0, BLOCK);
        }

        for can in &self.store.fuel_cans {
            out.outlined_ellipse(can.pos, can.radii, FUEL_FILL, FUEL_STROKE, 2.0);
            out.bold_text("G", can.pos + Vec2::new(0.0, 1.0), 18.0, TextAlign::Center, FUEL_LABEL);
        }

        // The sprite is drawn larger than the hit box
        let car = &self.store.car;
        let sprite_rect = Rect::new(
            car.pos.x - car.size.x,
            car.pos.y - car.size.y * 0.6,
            car.size.x * 2.0,
            car.size.y * 1.2,
        );
        let drawn = out.sprite_or(sprites, SpriteId::Car, sprite_rect, |l| draw_car_placeholder(l, car));

        draw_hud(out, self.store.fuel, hud);

        if !drawn {
            out.text(
                "Add axolotlcar.png beside the page to use a custom sprite.",
                Vec2::new(PAD, self.tuning.height - PAD),
                12.0,
                TextAlign::Left,
                Color::rgba(0, 0, 0, 0.45),
            );
        }
    }

    fn start_hint(&self) -> &'static str {
        "Press Enter or tap to start"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::draw::DrawCmd;
    use crate::renderer::sprites::SpriteMask;
    use crate::renderer::build_frame;
    use crate::sim::{CrashCause, Game, Phase};
    use crate::tuning::DriveTuning;

    fn hud(phase: Phase) -> HudView {
        HudView {
            phase,
            score: 7,
            best: 18,
            fps: Some(60),
            reduced_motion: false,
        }
    }

    #[test]
    fn test_car_placeholder_and_hint() {
        let game = Drive::new(DriveTuning::default(), 2);
        let list = build_frame(&game, game.size(), &SpriteMask::none(), &hud(Phase::Running));
        assert_eq!(list.sprites().count(), 0);
        assert!(list.cmds.iter().any(|c| matches!(
            c,
            DrawCmd::RoundRect { rect, .. } if *rect == game.store.car.rect()
        )));
        assert!(list.texts().any(|t| t.starts_with("Add axolotlcar.png")));
    }

    #[test]
    fn test_car_sprite_when_ready() {
        let game = Drive::new(DriveTuning::default(), 2);
        let sprites = SpriteMask::none().with(SpriteId::Car);
        let list = build_frame(&game, game.size(), &sprites, &hud(Phase::Running));
        assert_eq!(list.sprites().collect::<Vec<_>>(), vec![SpriteId::Car]);
        assert!(!list.texts().any(|t| t.starts_with("Add axolotlcar.png")));
    }

    #[test]
    fn test_empty_tank_draws_no_bar_fill() {
        let mut game = Drive::new(DriveTuning::default(), 2);
        game.store.fuel = 0.0;
        let list = build_frame(
            &game,
            game.size(),
            &SpriteMask::all(),
            &hud(Phase::Crashed(CrashCause::OutOfFuel)),
        );
        let fills = list
            .cmds
            .iter()
            .filter(|c| matches!(c, DrawCmd::RoundRect { color, .. } if *color == BAR_FILL))
            .count();
        assert_eq!(fills, 0);
        let texts: Vec<_> = list.texts().collect();
        assert!(texts.contains(&"Score: 7"));
        assert!(texts.contains(&"Best: 18"));
        assert!(texts.contains(&"You ran out of fuel. Press R to restart."));
        assert!(texts.contains(&"60 fps"));
    }
}
