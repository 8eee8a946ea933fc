//! Backend-neutral draw commands

use glam::Vec2;

use super::sprites::{SpriteId, SpriteSet};
use crate::sim::Rect;

/// RGBA color, alpha in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// CSS color string for canvas fill/stroke styles
    pub fn css(&self) -> String {
        if self.a >= 1.0 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("rgba({},{},{},{})", self.r, self.g, self.b, self.a.max(0.0))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Fill the whole logical surface
    Clear(Color),
    Rect {
        rect: Rect,
        color: Color,
    },
    RoundRect {
        rect: Rect,
        radius: f32,
        color: Color,
    },
    Ellipse {
        center: Vec2,
        radii: Vec2,
        color: Color,
        /// Outline color and line width
        stroke: Option<(Color, f32)>,
    },
    Triangle {
        points: [Vec2; 3],
        color: Color,
    },
    Sprite {
        id: SpriteId,
        rect: Rect,
    },
    Text {
        text: String,
        pos: Vec2,
        size: f32,
        bold: bool,
        align: TextAlign,
        color: Color,
    },
}

/// One frame's worth of draw commands in logical coordinates
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    pub size: Vec2,
    pub cmds: Vec<DrawCmd>,
}

impl DrawList {
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            cmds: Vec::with_capacity(128),
        }
    }

    pub fn clear(&mut self, color: Color) {
        self.cmds.push(DrawCmd::Clear(color));
    }

    pub fn rect(&mut self, rect: Rect, color: Color) {
        self.cmds.push(DrawCmd::Rect { rect, color });
    }

    /// Full-surface fill, used for overlays
    pub fn fill(&mut self, color: Color) {
        self.rect(Rect::new(0.0, 0.0, self.size.x, self.size.y), color);
    }

    pub fn round_rect(&mut self, rect: Rect, radius: f32, color: Color) {
        self.cmds.push(DrawCmd::RoundRect {
            rect,
            radius,
            color,
        });
    }

    pub fn ellipse(&mut self, center: Vec2, radii: Vec2, color: Color) {
        self.cmds.push(DrawCmd::Ellipse {
            center,
            radii,
            color,
            stroke: None,
        });
    }

    pub fn outlined_ellipse(&mut self, center: Vec2, radii: Vec2, color: Color, stroke: Color, width: f32) {
        self.cmds.push(DrawCmd::Ellipse {
            center,
            radii,
            color,
            stroke: Some((stroke, width)),
        });
    }

    pub fn triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: Color) {
        self.cmds.push(DrawCmd::Triangle {
            points: [a, b, c],
            color,
        });
    }

    pub fn text(&mut self, text: impl Into<String>, pos: Vec2, size: f32, align: TextAlign, color: Color) {
        self.cmds.push(DrawCmd::Text {
            text: text.into(),
            pos,
            size,
            bold: false,
            align,
            color,
        });
    }

    pub fn bold_text(&mut self, text: impl Into<String>, pos: Vec2, size: f32, align: TextAlign, color: Color) {
        self.cmds.push(DrawCmd::Text {
            text: text.into(),
            pos,
            size,
            bold: true,
            align,
            color,
        });
    }

    /// Draw a sprite when it is ready, otherwise run `placeholder`.
    /// Returns whether the sprite was drawn.
    pub fn sprite_or<F>(&mut self, sprites: &dyn SpriteSet, id: SpriteId, rect: Rect, placeholder: F) -> bool
    where
        F: FnOnce(&mut DrawList),
    {
        if sprites.is_ready(id) {
            self.cmds.push(DrawCmd::Sprite { id, rect });
            true
        } else {
            placeholder(self);
            false
        }
    }

    pub fn len(&self) -> usize {
        self.cmds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    /// All text drawn this frame, in order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.cmds.iter().filter_map(|c| match c {
            DrawCmd::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn sprites(&self) -> impl Iterator<Item = SpriteId> + '_ {
        self.cmds.iter().filter_map(|c| match c {
            DrawCmd::Sprite { id, .. } => Some(*id),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::sprites::SpriteMask;

    #[test]
    fn test_css_colors() {
        assert_eq!(Color::rgb(0x0b, 0x12, 0x20).css(), "#0b1220");
        assert_eq!(Color::rgba(10, 12, 18, 0.35).css(), "rgba(10,12,18,0.35)");
    }

    #[test]
    fn test_sprite_or_placeholder() {
        let mut list = DrawList::new(Vec2::new(100.0, 100.0));
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);

        let drawn = list.sprite_or(&SpriteMask::none(), SpriteId::Cake, rect, |l| {
            l.rect(rect, Color::WHITE)
        });
        assert!(!drawn);
        assert_eq!(list.cmds, vec![DrawCmd::Rect { rect, color: Color::WHITE }]);

        let drawn = list.sprite_or(&SpriteMask::all(), SpriteId::Cake, rect, |_| {
            panic!("placeholder must not run")
        });
        assert!(drawn);
        assert_eq!(list.sprites().collect::<Vec<_>>(), vec![SpriteId::Cake]);
    }
}
