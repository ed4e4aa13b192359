//! Canvas 2d renderer
//!
//! Sprites are looked up in a registry loaded from DOM `<img>` elements once
//! at startup; drawing a frame makes no further DOM queries. A missing image
//! element or 2d context at setup is fatal. Drawing an unregistered sprite
//! kind is a wiring bug and panics by design.

use std::collections::HashMap;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlImageElement};

use super::scene::{ALL_SPRITES, Scene, SpriteKind, TextAnchor};
use crate::sim::ScreenInfo;

/// DOM image element id for each sprite kind
fn element_id(kind: SpriteKind) -> &'static str {
    match kind {
        SpriteKind::Background => "sprite-bg",
        SpriteKind::Bubble => "sprite-bubble",
        SpriteKind::PipeTop => "sprite-pipe-top",
        SpriteKind::PipeBottom => "sprite-pipe-bottom",
        SpriteKind::Title => "sprite-title",
        SpriteKind::GameOver => "sprite-gameover",
    }
}

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    sprites: HashMap<SpriteKind, HtmlImageElement>,
    screen: ScreenInfo,
}

impl CanvasRenderer {
    /// Wire the renderer to a canvas and load every sprite from the DOM
    pub fn new(
        document: &Document,
        canvas: &HtmlCanvasElement,
        screen: ScreenInfo,
    ) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context for game canvas"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let mut sprites = HashMap::new();
        for kind in ALL_SPRITES {
            let id = element_id(kind);
            let img: HtmlImageElement = document
                .get_element_by_id(id)
                .ok_or_else(|| JsValue::from_str(&format!("image element '{id}' not found")))?
                .dyn_into()?;
            sprites.insert(kind, img);
        }
        log::info!("loaded {} sprites", sprites.len());

        Ok(Self {
            ctx,
            sprites,
            screen,
        })
    }

    fn sprite(&self, kind: SpriteKind) -> &HtmlImageElement {
        self.sprites.get(&kind).expect("sprite kind not registered")
    }

    /// Draw one scene
    pub fn render(&self, scene: &Scene) {
        let (w, h) = (self.screen.width as f64, self.screen.height as f64);
        self.ctx.clear_rect(0.0, 0.0, w, h);

        if let Some(bg) = scene.background {
            let _ = self
                .ctx
                .draw_image_with_html_image_element_and_dw_and_dh(self.sprite(bg), 0.0, 0.0, w, h);
        }

        for instance in &scene.sprites {
            let _ = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
                self.sprite(instance.kind),
                instance.rect.pos.x as f64,
                instance.rect.pos.y as f64,
                instance.rect.size.x as f64,
                instance.rect.size.y as f64,
            );
        }

        self.ctx.set_font("24px sans-serif");
        self.ctx.set_fill_style_str("#ffffff");
        for overlay in &scene.text {
            match overlay.anchor {
                TextAnchor::Top => {
                    self.ctx.set_text_align("left");
                    self.ctx.set_text_baseline("top");
                }
                TextAnchor::Middle => {
                    self.ctx.set_text_align("center");
                    self.ctx.set_text_baseline("middle");
                }
            }
            let _ = self
                .ctx
                .fill_text(&overlay.value, overlay.x as f64, overlay.y as f64);
        }
    }
}
