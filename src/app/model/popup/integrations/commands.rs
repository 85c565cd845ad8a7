use std::sync::LazyLock;

use crate::app::model::popup::commands_help::{Command, CommandPopUp, DefaultCommands};

pub static INTEGRATIONS_COMMANDS: LazyLock<Vec<Command<'static>>> = LazyLock::new(|| {
    let mut commands = vec![
        Command {
            name: "Search",
            key_binding: "/",
            description: "Search connections by name or integration",
        },
        Command {
            name: "Sort",
            key_binding: "i / n / s / e / t",
            description: "Sort by integration, name, source, entity or interval (again to flip)",
        },
        Command {
            name: "Next page",
            key_binding: "] / PageDown",
            description: "Show the next page of connections",
        },
        Command {
            name: "Previous page",
            key_binding: "[ / PageUp",
            description: "Show the previous page of connections",
        },
        Command {
            name: "Go to page",
            key_binding: "1-9",
            description: "Jump to a page",
        },
        Command {
            name: "Edit",
            key_binding: "c",
            description: "Change the selected connection",
        },
        Command {
            name: "Remove",
            key_binding: "x / Delete",
            description: "Remove the selected connection",
        },
        Command {
            name: "Refresh",
            key_binding: "r",
            description: "Reload services and connections",
        },
        Command {
            name: "Back",
            key_binding: "Esc",
            description: "Return to the settings menu",
        },
    ];
    commands.append(&mut DefaultCommands::new().0);
    commands
});

pub fn create_integrations_command_popup() -> CommandPopUp<'static> {
    CommandPopUp::new("Integrations Commands".into(), INTEGRATIONS_COMMANDS.clone())
}
