//! Scene adapter: world state to drawable description
//!
//! A pure function of the world and screen size. The renderer consumes the
//! scene and nothing here touches the DOM, so state-keyed sprite selection is
//! testable without a browser.

use crate::sim::{Rect, ScreenInfo, World, WorldState};

/// Sprite identities known to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteKind {
    Background,
    Bubble,
    PipeTop,
    PipeBottom,
    Title,
    GameOver,
}

/// Every drawable sprite kind, in registry order
pub const ALL_SPRITES: [SpriteKind; 6] = [
    SpriteKind::Background,
    SpriteKind::Bubble,
    SpriteKind::PipeTop,
    SpriteKind::PipeBottom,
    SpriteKind::Title,
    SpriteKind::GameOver,
];

/// A positioned sprite
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteInstance {
    pub kind: SpriteKind,
    pub rect: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Top,
    Middle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextOverlay {
    pub x: f32,
    pub y: f32,
    pub value: String,
    pub anchor: TextAnchor,
}

/// Drawable description of one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub background: Option<SpriteKind>,
    pub sprites: Vec<SpriteInstance>,
    pub text: Vec<TextOverlay>,
}

const TITLE_W: f32 = 528.0;
const TITLE_H: f32 = 100.0;
const GAMEOVER_W: f32 = 500.0;
const GAMEOVER_H: f32 = 300.0;

fn centered(kind: SpriteKind, width: f32, height: f32, screen: &ScreenInfo) -> SpriteInstance {
    SpriteInstance {
        kind,
        rect: Rect::new(
            screen.width / 2.0 - width / 2.0,
            screen.height / 2.0 - height / 2.0,
            width,
            height,
        ),
    }
}

/// Map the world to a scene. Never mutates the world.
pub fn build_scene(world: &World, screen: &ScreenInfo) -> Scene {
    let mut sprites = Vec::with_capacity(world.boxes.len() + 1);
    let mut text = vec![TextOverlay {
        x: 10.0,
        y: 10.0,
        value: format!("Score: {}", world.score),
        anchor: TextAnchor::Top,
    }];

    match world.state {
        WorldState::Starting => {
            sprites.push(centered(SpriteKind::Title, TITLE_W, TITLE_H, screen));
        }
        WorldState::GameOver => {
            sprites.push(centered(SpriteKind::GameOver, GAMEOVER_W, GAMEOVER_H, screen));
            text.push(TextOverlay {
                x: screen.width / 2.0,
                y: screen.height / 2.0 + GAMEOVER_H / 2.0 + 30.0,
                value: format!("Final score: {}", world.score),
                anchor: TextAnchor::Middle,
            });
        }
        WorldState::Running => {
            let p = &world.player.rect;
            sprites.push(SpriteInstance {
                kind: SpriteKind::Bubble,
                rect: Rect::new(p.pos.x.round(), p.pos.y.round(), p.size.x, p.size.y),
            });
            // Pairs are pushed upper-first, so even indices are top pipes
            for (i, b) in world.boxes.iter().enumerate() {
                sprites.push(SpriteInstance {
                    kind: if i % 2 == 0 {
                        SpriteKind::PipeTop
                    } else {
                        SpriteKind::PipeBottom
                    },
                    rect: Rect::new(b.pos.x.round(), b.pos.y.round(), b.size.x, b.size.y),
                });
            }
        }
    }

    Scene {
        background: Some(SpriteKind::Background),
        sprites,
        text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::WorldConfig;

    const SCREEN: ScreenInfo = ScreenInfo {
        width: 1024.0,
        height: 768.0,
    };

    fn world() -> World {
        World::new(SCREEN, WorldConfig::default())
    }

    #[test]
    fn starting_world_shows_title() {
        let scene = build_scene(&world(), &SCREEN);
        assert_eq!(scene.background, Some(SpriteKind::Background));
        assert_eq!(scene.sprites.len(), 1);
        assert_eq!(scene.sprites[0].kind, SpriteKind::Title);
        assert_eq!(scene.text[0].value, "Score: 0");
    }

    #[test]
    fn running_world_shows_player_and_pipes() {
        let mut world = world();
        world.state = WorldState::Running;
        world.boxes.push(Rect::new(500.0, -600.0, 80.0, 827.0));
        world.boxes.push(Rect::new(500.0, 400.0, 80.0, 827.0));
        world.boxes.push(Rect::new(900.0, -500.0, 120.0, 827.0));
        world.boxes.push(Rect::new(900.0, 500.0, 120.0, 827.0));

        let scene = build_scene(&world, &SCREEN);
        assert_eq!(scene.sprites.len(), 5);
        assert_eq!(scene.sprites[0].kind, SpriteKind::Bubble);
        let pipe_kinds: Vec<_> = scene.sprites[1..].iter().map(|s| s.kind).collect();
        assert_eq!(
            pipe_kinds,
            [
                SpriteKind::PipeTop,
                SpriteKind::PipeBottom,
                SpriteKind::PipeTop,
                SpriteKind::PipeBottom,
            ]
        );
    }

    #[test]
    fn player_position_is_rounded() {
        let mut world = world();
        world.state = WorldState::Running;
        world.player.rect.pos.y = 123.6;

        let scene = build_scene(&world, &SCREEN);
        assert_eq!(scene.sprites[0].rect.pos.y, 124.0);
    }

    #[test]
    fn game_over_shows_banner_and_final_score() {
        let mut world = world();
        world.state = WorldState::GameOver;
        world.score = 700;

        let scene = build_scene(&world, &SCREEN);
        assert_eq!(scene.sprites.len(), 1);
        assert_eq!(scene.sprites[0].kind, SpriteKind::GameOver);
        // Banner centered on screen
        assert_eq!(scene.sprites[0].rect.pos.x, 1024.0 / 2.0 - 250.0);
        assert!(scene
            .text
            .iter()
            .any(|t| t.value == "Final score: 700" && t.anchor == TextAnchor::Middle));
    }
}
