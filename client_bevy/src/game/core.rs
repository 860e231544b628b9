use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_rapier2d::prelude::{RapierConfiguration, TimestepMode};
use polybounce_shared::config::GameConfig;
use polybounce_shared::palette::Palette;
use polybounce_shared::session::{Phase, Session};

use crate::constants::{color_from_hex, MAX_PHYSICS_DT};

/// Per-frame ordering of the game's own systems. Rapier steps afterwards in
/// `PostUpdate`, and rendering follows.
#[derive(SystemSet, Debug, Hash, Eq, PartialEq, Clone)]
pub(crate) enum UpdateSet {
    Input,
    Logic,
    Visuals,
}

/// Validated configuration and palette, loaded once before the app is built.
#[derive(Resource, Clone)]
pub(crate) struct Settings {
    pub(crate) config: GameConfig,
    pub(crate) palette: Palette,
}

#[derive(Resource, Default, Deref, DerefMut)]
pub(crate) struct GameSession(pub(crate) Session);

pub struct CorePlugin {
    pub config: GameConfig,
    pub palette: Palette,
}

#[derive(Component)]
struct MainCamera;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Settings {
            config: self.config.clone(),
            palette: self.palette.clone(),
        })
        .init_resource::<GameSession>()
        .insert_resource(ClearColor(color_from_hex(self.palette.background())))
        .insert_resource(TimestepMode::Variable {
            max_dt: MAX_PHYSICS_DT,
            time_scale: 1.0,
            substeps: 1,
        })
        .configure_sets(
            Update,
            (UpdateSet::Input, UpdateSet::Logic, UpdateSet::Visuals).chain(),
        )
        .configure_sets(Update, UpdateSet::Logic.run_if(session_running))
        .add_systems(Startup, (setup_camera, configure_rapier_gravity).chain())
        .add_systems(PostStartup, start_session)
        .add_systems(Update, advance_session_clock.in_set(UpdateSet::Logic))
        .add_systems(
            Update,
            (
                sync_physics_activity.after(UpdateSet::Logic),
                fit_camera_to_canvas,
            ),
        )
        .add_systems(Last, exit_when_stopped);
    }
}

pub(crate) fn session_running(session: Res<GameSession>) -> bool {
    session.is_running()
}

fn setup_camera(mut commands: Commands) {
    commands.spawn((Camera2d, Msaa::Sample4, MainCamera));
}

fn configure_rapier_gravity(settings: Res<Settings>, mut q_config: Query<&mut RapierConfiguration>) {
    let [gx, gy] = settings.config.gravity;
    for mut cfg in &mut q_config {
        cfg.gravity = Vec2::new(gx as f32, gy as f32);
    }
}

fn start_session(mut session: ResMut<GameSession>) {
    if session.start() {
        info!("session started");
    }
}

fn advance_session_clock(mut session: ResMut<GameSession>, time: Res<Time>) {
    session.advance(time.delta_secs_f64());
}

fn sync_physics_activity(
    session: Res<GameSession>,
    mut q_config: Query<&mut RapierConfiguration>,
) {
    let active = session.is_running();
    for mut cfg in &mut q_config {
        if cfg.physics_pipeline_active != active {
            cfg.physics_pipeline_active = active;
        }
    }
}

/// The frame that observed the exit request finishes before the app closes.
fn exit_when_stopped(
    session: Res<GameSession>,
    mut exit: MessageWriter<AppExit>,
    mut sent: Local<bool>,
) {
    if *sent || session.phase() != Phase::Stopped {
        return;
    }
    info!(
        score = session.score(),
        elapsed = session.elapsed(),
        "session stopped"
    );
    exit.write(AppExit::Success);
    *sent = true;
}

fn fit_camera_to_canvas(
    settings: Res<Settings>,
    q_window: Query<&Window, With<PrimaryWindow>>,
    mut q_projection: Query<&mut Projection, With<MainCamera>>,
) {
    let Ok(window) = q_window.single() else {
        return;
    };

    if window.width() <= 0.0 || window.height() <= 0.0 {
        return;
    }

    let scale_x = settings.config.canvas_width / window.width();
    let scale_y = settings.config.canvas_height / window.height();
    let target_scale = scale_x.max(scale_y).max(0.0001);

    for mut projection in &mut q_projection {
        if let Projection::Orthographic(ortho) = &mut *projection {
            ortho.scale = target_scale;
        }
    }
}
