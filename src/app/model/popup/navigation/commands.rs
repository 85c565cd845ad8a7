use std::sync::LazyLock;

use crate::app::model::popup::commands_help::{Command, CommandPopUp, DefaultCommands};

pub static NAVIGATION_COMMANDS: LazyLock<Vec<Command<'static>>> = LazyLock::new(|| {
    let mut commands = vec![Command {
        name: "Open",
        key_binding: "Enter",
        description: "Open the selected settings page",
    }];
    commands.append(&mut DefaultCommands::new().0);
    commands
});

pub fn create_navigation_command_popup() -> CommandPopUp<'static> {
    CommandPopUp::new("Settings Commands".into(), NAVIGATION_COMMANDS.clone())
}
