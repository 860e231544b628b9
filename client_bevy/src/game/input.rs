use bevy::prelude::*;
use bevy::window::WindowCloseRequested;
use bevy_rapier2d::render::DebugRenderContext;
use polybounce_shared::controls::{BallAction, HeldKeys};
use polybounce_shared::ring::RotationDirection;

use super::core::GameSession;
use super::UpdateSet;

pub struct InputPlugin;

#[derive(Resource, Default)]
pub(crate) struct InputState {
    pub(crate) held: HeldKeys,
    /// Set for the single frame in which the jump key went down.
    pub(crate) jump_requested: bool,
    pub(crate) rotation: Option<RotationDirection>,
}

const BALL_BINDINGS: [(KeyCode, BallAction); 6] = [
    (KeyCode::KeyW, BallAction::Up),
    (KeyCode::KeyS, BallAction::Down),
    (KeyCode::KeyA, BallAction::Left),
    (KeyCode::KeyD, BallAction::Right),
    (KeyCode::ShiftLeft, BallAction::Boost),
    (KeyCode::Space, BallAction::Jump),
];

const ROTATE_COUNTER_CLOCKWISE: KeyCode = KeyCode::KeyQ;
const ROTATE_CLOCKWISE: KeyCode = KeyCode::KeyE;
const EXIT_KEY: KeyCode = KeyCode::Escape;
const DEBUG_RENDER_KEY: KeyCode = KeyCode::F3;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InputState>().add_systems(
            Update,
            (input_system, exit_request_system, toggle_debug_render).in_set(UpdateSet::Input),
        );
    }
}

fn input_system(mut input: ResMut<InputState>, keys: Res<ButtonInput<KeyCode>>) {
    for (key, action) in BALL_BINDINGS {
        if keys.pressed(key) {
            input.held.press(action);
        } else {
            input.held.release(action);
        }
    }
    input.jump_requested = keys.just_pressed(KeyCode::Space);
    input.rotation = RotationDirection::from_held(
        keys.pressed(ROTATE_COUNTER_CLOCKWISE),
        keys.pressed(ROTATE_CLOCKWISE),
    );
}

fn exit_request_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut close_requests: MessageReader<WindowCloseRequested>,
    mut session: ResMut<GameSession>,
) {
    let closed = close_requests.read().count() > 0;
    if (closed || keys.just_pressed(EXIT_KEY)) && session.request_exit() {
        info!(window_closed = closed, "exit requested");
    }
}

fn toggle_debug_render(
    keys: Res<ButtonInput<KeyCode>>,
    ctx: Option<ResMut<DebugRenderContext>>,
) {
    if !keys.just_pressed(DEBUG_RENDER_KEY) {
        return;
    }
    if let Some(mut c) = ctx {
        c.enabled = !c.enabled;
        debug!(enabled = c.enabled, "rapier debug render toggled");
    }
}
