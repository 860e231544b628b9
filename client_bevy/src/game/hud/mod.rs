mod spawn;
mod systems;
mod types;

use bevy::prelude::*;

use super::UpdateSet;

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn::spawn_hud).add_systems(
            Update,
            (
                systems::layout_hud,
                systems::update_label_values,
                systems::update_stats,
            )
                .chain()
                .in_set(UpdateSet::Visuals),
        );
    }
}
