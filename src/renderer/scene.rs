//! Scene building
//!
//! Turns a session into a flat list of draw commands in world units. Pure, so
//! any backend (or a test) can consume it.

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::sim::{
    CAR_ROSTER, EffectKind, Entity, EntityKind, GamePhase, GameSession, PauseOption, Rect,
};
use crate::ticks_to_seconds;

/// Opaque visual handle, resolved by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sprite {
    Car(usize),
    Cone,
    Frank,
    Coin,
    PowerUp(EffectKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    Title,
    Normal,
    Highlight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// One thing to draw
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Sprite { sprite: Sprite, rect: Rect },
    Text {
        text: String,
        x: f32,
        y: f32,
        style: TextStyle,
        align: Align,
    },
    /// Fade everything drawn so far (pause overlay)
    Dim,
}

fn text(text: impl Into<String>, x: f32, y: f32, style: TextStyle, align: Align) -> DrawCommand {
    DrawCommand::Text {
        text: text.into(),
        x,
        y,
        style,
        align,
    }
}

fn centered(s: impl Into<String>, y: f32, style: TextStyle) -> DrawCommand {
    text(s, SCREEN_WIDTH / 2.0, y, style, Align::Center)
}

/// Sprite for an entity, with the pursuer's draw-only jitter applied
fn entity_sprite(entity: &Entity, car: usize) -> DrawCommand {
    let mut rect = entity.bounds;
    let sprite = match &entity.kind {
        EntityKind::Player => Sprite::Car(car),
        EntityKind::Obstacle => Sprite::Cone,
        EntityKind::Pursuer(p) => {
            rect.pos.y += p.jitter;
            Sprite::Frank
        }
        EntityKind::Coin => Sprite::Coin,
        EntityKind::PowerUp(kind) => Sprite::PowerUp(*kind),
    };
    DrawCommand::Sprite { sprite, rect }
}

/// Build the full frame for the current phase
pub fn build_scene(session: &GameSession, show_effect_timers: bool) -> Vec<DrawCommand> {
    let mut scene = Vec::new();
    let mid = SCREEN_HEIGHT / 2.0;

    match session.phase {
        GamePhase::Menu => {
            scene.push(centered(
                "Lightning McQueen - Cone Chaos",
                mid - 60.0,
                TextStyle::Title,
            ));
            scene.push(centered(
                "Press SPACE to start | ESC to quit",
                mid + 10.0,
                TextStyle::Normal,
            ));
        }
        GamePhase::CarSelect => {
            scene.push(centered(
                format!("Choose your car: {}", session.car_name()),
                mid - 100.0,
                TextStyle::Title,
            ));
            let size = session.tuning.player_size;
            scene.push(DrawCommand::Sprite {
                sprite: Sprite::Car(session.selected_car % CAR_ROSTER.len()),
                rect: Rect::new((SCREEN_WIDTH - size.w) / 2.0, mid - 20.0, size.w, size.h),
            });
            scene.push(centered(
                "Left / Right to change car, ENTER to start",
                mid + 60.0,
                TextStyle::Normal,
            ));
        }
        GamePhase::Playing | GamePhase::Paused | GamePhase::GameOver => {
            draw_world(&mut scene, session, show_effect_timers);
            if session.phase == GamePhase::Paused {
                draw_pause_menu(&mut scene, session);
            }
            if session.phase == GamePhase::GameOver {
                scene.push(centered(
                    "Game Over! Press R to restart",
                    mid,
                    TextStyle::Title,
                ));
            }
        }
    }

    scene
}

fn draw_world(scene: &mut Vec<DrawCommand>, session: &GameSession, show_effect_timers: bool) {
    let world = &session.world;
    let car = session.selected_car;

    scene.push(entity_sprite(&world.pursuer, car));
    for entity in world
        .obstacles
        .iter()
        .chain(&world.coins)
        .chain(&world.power_ups)
    {
        scene.push(entity_sprite(entity, car));
    }
    scene.push(entity_sprite(&world.player, car));

    scene.push(text(
        format!("Score: {}", world.run.score),
        10.0,
        10.0,
        TextStyle::Normal,
        Align::Left,
    ));
    scene.push(text(
        "Press 'P' to pause",
        SCREEN_WIDTH - 10.0,
        10.0,
        TextStyle::Normal,
        Align::Right,
    ));

    let now = world.time_ticks;
    for (row, (kind, _)) in world.effects.iter().enumerate() {
        let label = match world.effects.remaining(kind, now) {
            Some(left) if show_effect_timers => {
                format!("{}: {:.1}s", kind.as_str(), ticks_to_seconds(left))
            }
            _ => kind.as_str().to_string(),
        };
        scene.push(text(
            label,
            10.0,
            50.0 + row as f32 * 30.0,
            TextStyle::Highlight,
            Align::Left,
        ));
    }

    if let Some(note) = &world.notification {
        scene.push(centered(note.text.clone(), 80.0, TextStyle::Highlight));
    }
}

fn draw_pause_menu(scene: &mut Vec<DrawCommand>, session: &GameSession) {
    let mid = SCREEN_HEIGHT / 2.0;
    scene.push(DrawCommand::Dim);
    scene.push(centered("Game Paused", mid - 100.0, TextStyle::Title));
    let selected = session.pause_option();
    for (i, option) in PauseOption::ALL.iter().enumerate() {
        let style = if *option == selected {
            TextStyle::Highlight
        } else {
            TextStyle::Normal
        };
        scene.push(centered(option.label(), mid - 40.0 + i as f32 * 40.0, style));
    }
}
