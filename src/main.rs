use bevy::prelude::*;
use bevy::window::WindowResolution;

use crate::args::ARGS;
use crate::confetti::ConfettiPlugin;
use crate::hearts::FloatingHeartsPlugin;
use crate::keyboard::{handle_keypress, CardCommand, KeyboardCommands};
use crate::ui::PromptPlugin;

mod args;
mod canvas;
mod celebration;
mod confetti;
mod dodge;
mod engine;
mod field;
mod frame_loop;
mod heart_shape;
mod hearts;
mod keyboard;
mod particle;
mod ui;

/// rose-100, the card's backdrop.
const BACKGROUND: Color = Color::srgb(1.0, 0.894, 0.902);

fn main() {
    let size = ARGS.window_size();

    App::new()
        .add_plugins((
            DefaultPlugins.set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Will you be my Valentine?".into(),
                    resolution: WindowResolution::new(size.x, size.y),
                    ..default()
                }),
                ..default()
            }),
            FloatingHeartsPlugin {
                hearts: ARGS.hearts,
                seed: ARGS.seed,
            },
            ConfettiPlugin { seed: ARGS.seed },
            PromptPlugin {
                recipient: ARGS.name.clone(),
                seed: ARGS.seed,
            },
        ))
        .insert_resource(ClearColor(BACKGROUND))
        .insert_resource(KeyboardCommands::create())
        .add_message::<CardCommand>()
        .add_systems(Startup, setup)
        .add_systems(Update, handle_keypress)
        .run();
}

fn setup(mut commands: Commands) {
    commands.spawn(Camera2d);
    info!("Card ready for {}", ARGS.name);
}
