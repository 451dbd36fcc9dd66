use std::collections::HashMap;

use bevy_ecs::resource::Resource;

use crate::{events::GameCommand, map::direction::Direction};

/// Maps key names, as reported by the windowing backend, to game commands.
///
/// Names are matched case-insensitively, so `"Up"`, `"up"` and `"UP"` are the same key.
#[derive(Debug, Clone, Resource)]
pub struct Bindings {
    key_bindings: HashMap<String, GameCommand>,
}

impl Default for Bindings {
    fn default() -> Self {
        let mut bindings = Self {
            key_bindings: HashMap::new(),
        };

        // Player movement
        bindings.bind("Up", GameCommand::MovePlayer(Direction::Up));
        bindings.bind("W", GameCommand::MovePlayer(Direction::Up));
        bindings.bind("Down", GameCommand::MovePlayer(Direction::Down));
        bindings.bind("S", GameCommand::MovePlayer(Direction::Down));
        bindings.bind("Left", GameCommand::MovePlayer(Direction::Left));
        bindings.bind("A", GameCommand::MovePlayer(Direction::Left));
        bindings.bind("Right", GameCommand::MovePlayer(Direction::Right));
        bindings.bind("D", GameCommand::MovePlayer(Direction::Right));

        // Game actions
        bindings.bind("R", GameCommand::Restart);
        bindings.bind("Escape", GameCommand::Exit);
        bindings.bind("Q", GameCommand::Exit);

        bindings
    }
}

impl Bindings {
    /// Binds (or rebinds) a key to a command.
    pub fn bind(&mut self, key: &str, command: GameCommand) {
        self.key_bindings.insert(key.to_ascii_lowercase(), command);
    }

    /// Looks up the command for a released key.
    pub fn command_for(&self, key: &str) -> Option<GameCommand> {
        self.key_bindings.get(&key.to_ascii_lowercase()).copied()
    }
}
