//! Canvas 2D backend
//!
//! Executes a [`DrawList`] on a `CanvasRenderingContext2d`. The backing store
//! is scaled by the device pixel ratio; commands stay in logical pixels.

use std::collections::HashMap;
use std::f64::consts::TAU;

use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::draw::{DrawCmd, DrawList, TextAlign};
use super::sprites::{SpriteId, SpriteSet};
use super::Surface;
use crate::sim::Rect;

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    logical: Vec2,
    dpr: f64,
    images: HashMap<SpriteId, HtmlImageElement>,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement, logical: Vec2) -> Result<Self, JsValue> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into()?;

        let mut surface = Self {
            canvas,
            ctx,
            logical,
            dpr: 0.0,
            images: HashMap::new(),
        };
        surface.resize();
        Ok(surface)
    }

    /// Start loading `ids`. Images that fail to load just stay unready.
    pub fn load_sprites(&mut self, ids: &[SpriteId]) {
        for &id in ids {
            match HtmlImageElement::new() {
                Ok(img) => {
                    img.set_src(id.path());
                    self.images.insert(id, img);
                }
                Err(e) => log::warn!("Could not create image for {id:?}: {e:?}"),
            }
        }
    }

    fn current_dpr() -> f64 {
        web_sys::window()
            .map(|w| w.device_pixel_ratio())
            .filter(|r| r.is_finite() && *r > 0.0)
            .unwrap_or(1.0)
    }

    fn resize(&mut self) {
        let dpr = Self::current_dpr();
        if (dpr - self.dpr).abs() < f64::EPSILON {
            return;
        }
        self.dpr = dpr;
        self.canvas.set_width((self.logical.x as f64 * dpr).round() as u32);
        self.canvas.set_height((self.logical.y as f64 * dpr).round() as u32);
        let style = self.canvas.style();
        let _ = style.set_property("width", &format!("{}px", self.logical.x));
        let _ = style.set_property("height", &format!("{}px", self.logical.y));
        if let Err(e) = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0) {
            log::warn!("Canvas transform failed: {e:?}");
        }
        log::info!(
            "Canvas sized to {}x{} at dpr {dpr}",
            self.logical.x,
            self.logical.y
        );
    }

    fn round_rect_path(&self, r: &Rect, radius: f32) -> Result<(), JsValue> {
        let (x, y, w, h) = (r.x as f64, r.y as f64, r.w as f64, r.h as f64);
        let radius = (radius as f64).min(w / 2.0).min(h / 2.0).max(0.0);
        let ctx = &self.ctx;
        ctx.begin_path();
        ctx.move_to(x + radius, y);
        ctx.arc_to(x + w, y, x + w, y + h, radius)?;
        ctx.arc_to(x + w, y + h, x, y + h, radius)?;
        ctx.arc_to(x, y + h, x, y, radius)?;
        ctx.arc_to(x, y, x + w, y, radius)?;
        ctx.close_path();
        Ok(())
    }

    fn execute(&self, cmd: &DrawCmd) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        match cmd {
            DrawCmd::Clear(color) => {
                ctx.set_fill_style_str(&color.css());
                ctx.fill_rect(0.0, 0.0, self.logical.x as f64, self.logical.y as f64);
            }
            DrawCmd::Rect { rect, color } => {
                ctx.set_fill_style_str(&color.css());
                ctx.fill_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
            }
            DrawCmd::RoundRect { rect, radius, color } => {
                self.round_rect_path(rect, *radius)?;
                ctx.set_fill_style_str(&color.css());
                ctx.fill();
            }
            DrawCmd::Ellipse {
                center,
                radii,
                color,
                stroke,
            } => {
                ctx.begin_path();
                ctx.ellipse(
                    center.x as f64,
                    center.y as f64,
                    radii.x.max(0.0) as f64,
                    radii.y.max(0.0) as f64,
                    0.0,
                    0.0,
                    TAU,
                )?;
                ctx.set_fill_style_str(&color.css());
                ctx.fill();
                if let Some((stroke, width)) = stroke {
                    ctx.set_stroke_style_str(&stroke.css());
                    ctx.set_line_width(*width as f64);
                    ctx.stroke();
                }
            }
            DrawCmd::Triangle { points, color } => {
                ctx.begin_path();
                ctx.move_to(points[0].x as f64, points[0].y as f64);
                ctx.line_to(points[1].x as f64, points[1].y as f64);
                ctx.line_to(points[2].x as f64, points[2].y as f64);
                ctx.close_path();
                ctx.set_fill_style_str(&color.css());
                ctx.fill();
            }
            DrawCmd::Sprite { id, rect } => {
                // Broken images are skipped
                if let Some(img) = self.images.get(id).filter(|_| self.is_ready(*id)) {
                    ctx.draw_image_with_html_image_element_and_dw_and_dh(
                        img,
                        rect.x as f64,
                        rect.y as f64,
                        rect.w as f64,
                        rect.h as f64,
                    )?;
                }
            }
            DrawCmd::Text {
                text,
                pos,
                size,
                bold,
                align,
                color,
            } => {
                let weight = if *bold { "bold " } else { "" };
                ctx.set_font(&format!("{weight}{size}px ui-sans-serif, system-ui, sans-serif"));
                ctx.set_text_align(align.as_str());
                ctx.set_text_baseline(if *align == TextAlign::Center {
                    "middle"
                } else {
                    "alphabetic"
                });
                ctx.set_fill_style_str(&color.css());
                ctx.fill_text(text, pos.x as f64, pos.y as f64)?;
            }
        }
        Ok(())
    }
}

impl SpriteSet for CanvasSurface {
    fn is_ready(&self, id: SpriteId) -> bool {
        self.images
            .get(&id)
            .is_some_and(|img| img.complete() && img.natural_width() > 0)
    }
}

impl Surface for CanvasSurface {
    fn sprites(&self) -> &dyn SpriteSet {
        self
    }

    fn begin_frame(&mut self) {
        self.resize();
    }

    fn present(&mut self, list: &DrawList) {
        let mut failures = 0;
        for cmd in &list.cmds {
            if let Err(e) = self.execute(cmd) {
                if failures == 0 {
                    log::warn!("Draw command failed: {e:?}");
                }
                failures += 1;
            }
        }
        if failures > 1 {
            log::debug!("{failures} draw commands failed this frame");
        }
    }
}
