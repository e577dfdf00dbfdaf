use std::collections::HashMap;
use std::time::{Duration, Instant};

use bevy::app::AppExit;
use bevy::input::ButtonInput;
use bevy::prelude::*;

/// Card-level actions that can be triggered from the keyboard.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardCommand {
    /// Stop the floating hearts if they are running, start them otherwise.
    ToggleHearts,
    Accept,
    StartOver,
}

/// Defines a keyboard command to associate with a keypress.
/// Each command can have a different repeat rate.
pub struct KeyboardCommand {
    pub description: String,
    pub last_action_time: Option<Instant>,
    pub interval: Duration,
    pub action: CardCommand,
}

/// Contains the collection of keyboard commands.
#[derive(Resource)]
pub struct KeyboardCommands {
    pub commands: HashMap<KeyCode, KeyboardCommand>,
}

impl KeyboardCommands {
    pub fn create() -> Self {
        let mut kb_cmds = KeyboardCommands {
            commands: HashMap::new(),
        };

        // H: hide / show the floating hearts.
        kb_cmds.add_command(KeyCode::KeyH, "Toggle floating hearts", 500, CardCommand::ToggleHearts);
        // Y: say yes without chasing the mouse to the button.
        kb_cmds.add_command(KeyCode::KeyY, "Accept", 500, CardCommand::Accept);
        // R: back to the question.
        kb_cmds.add_command(KeyCode::KeyR, "Start over", 500, CardCommand::StartOver);

        kb_cmds
    }

    pub fn add_command(&mut self, key: KeyCode, description: &str, interval_millis: u64, action: CardCommand) {
        self.commands.insert(
            key,
            KeyboardCommand {
                description: description.into(),
                last_action_time: None,
                interval: Duration::from_millis(interval_millis),
                action,
            },
        );
    }

    /// Returns the command bound to `key` unless it already fired within its repeat interval.
    pub fn trigger(&mut self, key: &KeyCode, now: Instant) -> Option<CardCommand> {
        let command = self.commands.get_mut(key)?;
        if let Some(last) = command.last_action_time {
            if now.duration_since(last) < command.interval {
                return None;
            }
        }
        command.last_action_time = Some(now);
        Some(command.action)
    }

    pub fn help(&self) -> String {
        let mut kb_help: String = "Keyboard commands:".into();
        let mut keys: Vec<_> = self.commands.iter().collect();
        keys.sort_by(|a, b| a.1.description.cmp(&b.1.description));
        for (key, cmd) in keys {
            kb_help.push('\n');
            kb_help.push_str(&format!("{key:?} - {}", cmd.description));
        }
        kb_help.push_str("\nEscape/KeyQ - Quit");
        kb_help
    }
}

pub fn handle_keypress(
    kb: Res<ButtonInput<KeyCode>>,
    mut app_exit: MessageWriter<AppExit>,
    mut kb_cmds: ResMut<KeyboardCommands>,
    mut card_commands: MessageWriter<CardCommand>,
) {
    // Esc / Q: quit the app
    if kb.pressed(KeyCode::Escape) || kb.pressed(KeyCode::KeyQ) {
        app_exit.write(AppExit::Success);
    }

    // ?: display help
    if kb.just_pressed(KeyCode::Slash) && (kb.pressed(KeyCode::ShiftLeft) || kb.pressed(KeyCode::ShiftRight)) {
        info!("{}", kb_cmds.help());
    }

    let now = Instant::now();
    for key in kb.get_pressed() {
        if let Some(command) = kb_cmds.trigger(key, now) {
            debug!("{key:?} -> {command:?}");
            card_commands.write(command);
        }
    }
}
