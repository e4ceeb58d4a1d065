use crate::model::interaction::InteractionResponse;

const USAGE: &str = "\
**/orgboard** manages this server's organization link
- `/orgboard connect organization:<handle>` links this server to an organization
- `/orgboard status` shows the current link and bot health
- `/orgboard disconnect` removes the link
- `/orgboard help` shows this message";

/// Static usage text; also the fallback for absent or unknown subcommands.
pub(super) fn usage(unknown: Option<&str>) -> InteractionResponse {
    match unknown {
        Some(name) => InteractionResponse::ephemeral(format!(
            "Unknown subcommand `{}`.\n\n{}",
            name, USAGE
        )),
        None => InteractionResponse::ephemeral(USAGE),
    }
}
