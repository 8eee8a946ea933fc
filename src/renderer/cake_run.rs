//! Cake Run scene

use glam::Vec2;

use super::draw::{Color, DrawList, TextAlign};
use super::sprites::{SpriteId, SpriteSet};
use super::{HudView, Scene};
use crate::sim::Rect;
use crate::sim::cake_run::{CakeRun, Platform, TreatKind};

const SKY: Color = Color::rgb(0xbf, 0xe6, 0xff);
const FLOOR: Color = Color::rgb(0x8b, 0x1a, 0x1a);
const SPIKE: Color = Color::rgb(0xdd, 0x00, 0x00);
const SPIKE_SHINE: Color = Color::rgb(0xff, 0x55, 0x55);
const PLATFORM_BODY: Color = Color::rgb(0x3a, 0x5f, 0x2f);
const PLATFORM_GRASS: Color = Color::rgb(0x6f, 0xb6, 0x57);
const PLAYER_PLACEHOLDER: Color = Color::rgb(0xf8, 0xb4, 0xc0);
const HUD_TEXT: Color = Color::rgb(0x1d, 0x23, 0x2b);

const SPIKE_W: f32 = 22.0;
const SPIKE_H: f32 = 40.0;
/// Spike bases sit this far below the death line
const FLOOR_DROP: f32 = 18.0;

fn treat_sprite(kind: TreatKind) -> SpriteId {
    match kind {
        TreatKind::Cake => SpriteId::Cake,
        TreatKind::Pepper => SpriteId::Pepper,
        TreatKind::Cone => SpriteId::Cone,
    }
}

fn treat_placeholder(kind: TreatKind) -> Color {
    match kind {
        TreatKind::Cake => Color::rgb(0xcc, 0x99, 0x88),
        TreatKind::Pepper => Color::rgb(0xee, 0x11, 0x11),
        TreatKind::Cone => Color::rgb(0xf6, 0xc9, 0x0e),
    }
}

fn draw_floor(list: &mut DrawList, ground_y: f32) {
    let base = ground_y + FLOOR_DROP;
    list.rect(
        Rect::new(0.0, base, list.size.x, list.size.y - base),
        FLOOR,
    );
    let mut x = 0.0;
    while x < list.size.x + SPIKE_W {
        list.triangle(
            Vec2::new(x, base),
            Vec2::new(x + SPIKE_W / 2.0, base - SPIKE_H),
            Vec2::new(x + SPIKE_W, base),
            SPIKE,
        );
        list.triangle(
            Vec2::new(x + SPIKE_W / 2.0, base - SPIKE_H + 6.0),
            Vec2::new(x + SPIKE_W * 0.75, base - SPIKE_H / 2.0),
            Vec2::new(x + SPIKE_W / 2.0, base - SPIKE_H / 2.0),
            SPIKE_SHINE,
        );
        x += SPIKE_W;
    }
}

fn draw_platform(list: &mut DrawList, platform: &Platform) {
    list.rect(platform.rect(), PLATFORM_BODY);
    list.rect(
        Rect::new(platform.pos.x, platform.pos.y - 8.0, platform.size.x, 8.0),
        PLATFORM_GRASS,
    );
}

impl Scene for CakeRun {
    fn draw(&self, sprites: &dyn SpriteSet, hud: &HudView, out: &mut DrawList) {
        out.clear(SKY);
        draw_floor(out, self.tuning.ground_y);

        for platform in &self.store.platforms {
            draw_platform(out, platform);
        }

        for treat in &self.store.treats {
            let Some(rect) = self.store.treat_rect(treat) else {
                continue;
            };
            let color = treat_placeholder(treat.kind);
            out.sprite_or(sprites, treat_sprite(treat.kind), rect, |l| l.rect(rect, color));
        }

        let player = &self.store.player;
        let bob = if hud.reduced_motion || !hud.phase.is_running() {
            0.0
        } else {
            (player.anim_time * 10.0).sin() * 4.0
        };
        let sprite_rect = Rect::from_center(player.pos + Vec2::new(0.0, bob), player.size);
        out.sprite_or(sprites, SpriteId::Axolotl, sprite_rect, |l| {
            l.ellipse(player.pos, player.size / 2.0, PLAYER_PLACEHOLDER)
        });

        out.bold_text(
            format!("Score: {}", hud.score),
            Vec2::new(14.0, 28.0),
            18.0,
            TextAlign::Left,
            HUD_TEXT,
        );
        out.text(
            format!("Best: {}", hud.best),
            Vec2::new(14.0, 50.0),
            16.0,
            TextAlign::Left,
            HUD_TEXT,
        );
    }

    fn start_hint(&self) -> &'static str {
        "Press Space or tap to start"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::draw::DrawCmd;
    use crate::renderer::sprites::SpriteMask;
    use crate::renderer::build_frame;
    use crate::sim::{Game, Phase};
    use crate::tuning::CakeRunTuning;

    fn hud(phase: Phase) -> HudView {
        HudView {
            phase,
            score: 12,
            best: 40,
            fps: None,
            reduced_motion: false,
        }
    }

    #[test]
    fn test_placeholders_without_sprites() {
        let game = CakeRun::new(CakeRunTuning::default(), 1);
        let list = build_frame(&game, game.size(), &SpriteMask::none(), &hud(Phase::Running));

        assert_eq!(list.sprites().count(), 0);
        let player_placeholder = list.cmds.iter().any(|c| {
            matches!(c, DrawCmd::Ellipse { center, .. } if *center == game.store.player.pos)
        });
        assert!(player_placeholder);
    }

    #[test]
    fn test_sprites_when_ready() {
        let game = CakeRun::new(CakeRunTuning::default(), 1);
        let list = build_frame(&game, game.size(), &SpriteMask::all(), &hud(Phase::Running));
        let sprites: Vec<_> = list.sprites().collect();
        assert_eq!(sprites.last(), Some(&SpriteId::Axolotl));
        assert_eq!(sprites.len(), game.store.treats.len() + 1);
    }

    #[test]
    fn test_hud_text() {
        let game = CakeRun::new(CakeRunTuning::default(), 1);
        let list = build_frame(&game, game.size(), &SpriteMask::none(), &hud(Phase::Idle));
        let texts: Vec<_> = list.texts().collect();
        assert!(texts.contains(&"Score: 12"));
        assert!(texts.contains(&"Best: 40"));
        assert!(texts.contains(&"Press Space or tap to start"));
    }

    #[test]
    fn test_drawing_leaves_state_alone() {
        let game = CakeRun::new(CakeRunTuning::default(), 1);
        let before = game.store.clone();
        let _ = build_frame(&game, game.size(), &SpriteMask::all(), &hud(Phase::Running));
        assert_eq!(game.store, before);
    }
}
