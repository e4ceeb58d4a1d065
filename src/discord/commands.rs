//! Slash-command definitions and registration.

use serenity::all::CommandOptionType;
use serenity::builder::{CreateCommand, CreateCommandOption};

use crate::discord::api::DiscordApi;

/// Top-level command namespace owned by the bridge.
pub const COMMAND_NAME: &str = "orgboard";

/// Definitions for every slash command the bridge owns.
pub fn command_definitions() -> Vec<CreateCommand> {
    vec![CreateCommand::new(COMMAND_NAME)
        .description("Manage this server's organization link")
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "connect",
                "Link this server to an organization",
            )
            .add_sub_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "organization",
                    "Handle of the organization to link",
                )
                .required(false),
            ),
        )
        .add_option(CreateCommandOption::new(
            CommandOptionType::SubCommand,
            "status",
            "Show the current link and bot health",
        ))
        .add_option(CreateCommandOption::new(
            CommandOptionType::SubCommand,
            "disconnect",
            "Remove this server's organization link",
        ))
        .add_option(CreateCommandOption::new(
            CommandOptionType::SubCommand,
            "help",
            "Show usage for all subcommands",
        ))]
}

/// Registers all command definitions globally.
///
/// Failures are isolated per definition so one rejected command does not
/// block the rest from registering.
pub async fn register_commands(api: &dyn DiscordApi) {
    for (index, command) in command_definitions().into_iter().enumerate() {
        match api.create_global_command(&command).await {
            Ok(()) => tracing::info!("registered slash command #{}", index),
            Err(error) => tracing::error!("failed to register slash command #{}: {}", index, error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discord::api::ApiError;
    use crate::discord::mock::MockDiscordApi;

    #[test]
    fn definition_carries_all_subcommands() {
        let definitions = command_definitions();
        assert_eq!(definitions.len(), 1);

        let json = serde_json::to_value(&definitions[0]).unwrap();
        assert_eq!(json["name"], COMMAND_NAME);

        let subcommands: Vec<&str> = json["options"]
            .as_array()
            .unwrap()
            .iter()
            .map(|option| option["name"].as_str().unwrap())
            .collect();
        assert_eq!(subcommands, vec!["connect", "status", "disconnect", "help"]);
    }

    #[test]
    fn connect_takes_optional_organization_option() {
        let json = serde_json::to_value(&command_definitions()[0]).unwrap();
        let connect = &json["options"][0];

        assert_eq!(connect["options"][0]["name"], "organization");
        assert_eq!(connect["options"][0]["required"], false);
    }

    #[tokio::test]
    async fn registers_definitions_against_api() {
        let api = MockDiscordApi::new();

        register_commands(&api).await;

        assert_eq!(api.registered_commands.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn registration_failure_does_not_panic() {
        let api = MockDiscordApi::new();
        api.fail_next_create_command(ApiError::Response {
            endpoint: "create_global_command".to_string(),
            status: 400,
            code: Some(50035),
            message: "Invalid Form Body".to_string(),
        });

        register_commands(&api).await;

        assert!(api.registered_commands.lock().unwrap().is_empty());
    }
}
