//! Slash command surface
//!
//! Thin glue: argument extraction and responses live here, every behavior
//! comes from the core services.

use laurel::ports::directory::Directory;
use laurel::ports::repositories::{ConfigRepository, ProfileRepository, TierRepository};
use serenity::builder::{
    CreateCommand, CreateCommandOption, CreateInteractionResponse,
    CreateInteractionResponseMessage,
};
use serenity::client::Context;
use serenity::model::application::{CommandDataOptionValue, CommandInteraction, CommandOptionType};
use tracing::{debug, warn};

use crate::gateway::GatewayHandler;

/// Global command definitions registered on startup.
pub fn definitions() -> Vec<CreateCommand> {
    vec![
        CreateCommand::new("rank").description("Shows your current level and experience."),
        CreateCommand::new("makerank")
            .description("Creates a rank with a role that is achieved at a certain level.")
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::Integer,
                    "level",
                    "Target level that a user has to reach to achieve this rank",
                )
                .required(true)
                .min_int_value(0),
            )
            .add_option(CreateCommandOption::new(
                CommandOptionType::Role,
                "role",
                "Role that is to be given to whoever achieves this rank",
            )),
        CreateCommand::new("addxp")
            .description("Adds the specified amount of experience")
            .add_option(
                CreateCommandOption::new(CommandOptionType::Integer, "amount", "Experience to add")
                    .required(true)
                    .min_int_value(0),
            )
            .add_option(
                CreateCommandOption::new(CommandOptionType::User, "user", "Target user")
                    .required(true),
            ),
        CreateCommand::new("removexp")
            .description("Deducts the specified amount of experience")
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::Integer,
                    "amount",
                    "Experience to deduct",
                )
                .required(true)
                .min_int_value(0),
            )
            .add_option(
                CreateCommandOption::new(CommandOptionType::User, "user", "Target user")
                    .required(true),
            ),
    ]
}

pub(crate) async fn dispatch(handler: &GatewayHandler, ctx: &Context, command: &CommandInteraction) {
    let Some(guild_id) = command.guild_id.map(|id| id.get()) else {
        respond(ctx, command, "Command can only be run in a server.".into()).await;
        return;
    };

    let result = match command.data.name.as_str() {
        "rank" => rank(handler, command, guild_id).await,
        "makerank" => makerank(handler, command, guild_id).await,
        "addxp" => adjust_xp(handler, command, guild_id, true).await,
        "removexp" => adjust_xp(handler, command, guild_id, false).await,
        other => {
            debug!(command = %other, "Ignoring unknown command");
            return;
        }
    };

    match result {
        Ok(text) => respond(ctx, command, text).await,
        Err(err) => {
            warn!(command = %command.data.name, error = %err, "Command failed");
            respond(ctx, command, "Something went wrong running that command.".into()).await;
        }
    }
}

async fn rank(
    handler: &GatewayHandler,
    command: &CommandInteraction,
    guild_id: u64,
) -> Result<String, laurel::DomainError> {
    let profile = handler
        .store
        .get_or_create_profile(command.user.id.get(), Some(guild_id))
        .await?;

    Ok(profile.to_string())
}

async fn makerank(
    handler: &GatewayHandler,
    command: &CommandInteraction,
    guild_id: u64,
) -> Result<String, laurel::DomainError> {
    if !is_admin(handler, command, guild_id).await? {
        return Ok("Command can only be run by server administrators.".into());
    }

    let level = integer_option(command, "level").unwrap_or(0).max(0) as u32;
    let role_id = role_option(command, "role").unwrap_or(0);

    let mut tier = handler.store.create_tier(guild_id, role_id).await?;
    tier.min_level = level;
    handler.store.save_tier(&tier).await?;

    Ok(format!("Created {tier}"))
}

async fn adjust_xp(
    handler: &GatewayHandler,
    command: &CommandInteraction,
    guild_id: u64,
    add: bool,
) -> Result<String, laurel::DomainError> {
    if !is_admin(handler, command, guild_id).await? {
        return Ok("Command can only be run by server administrators.".into());
    }

    let amount = integer_option(command, "amount").unwrap_or(0).max(0) as u64;
    let target = user_option(command, "user").unwrap_or_else(|| command.user.id.get());

    let profile = if add {
        handler
            .service
            .grant_experience(target, Some(guild_id), amount)
            .await?
    } else {
        handler
            .service
            .deduct_experience(target, Some(guild_id), amount)
            .await?
    };

    let verb = if add { "added" } else { "deducted" };
    Ok(format!("Successfully {verb} {amount} experience\nProfile: {profile}"))
}

/// Admin precondition over the guild's stored configuration.
async fn is_admin(
    handler: &GatewayHandler,
    command: &CommandInteraction,
    guild_id: u64,
) -> Result<bool, laurel::DomainError> {
    let config = handler.store.get_or_create_config(guild_id).await?;
    let user_id = command.user.id.get();
    let roles = handler
        .directory
        .member_roles(guild_id, user_id)
        .await
        .unwrap_or_default();

    Ok(config.is_admin(user_id, &roles))
}

async fn respond(ctx: &Context, command: &CommandInteraction, text: String) {
    let message = CreateInteractionResponseMessage::new().content(text);

    if let Err(err) = command
        .create_response(&ctx.http, CreateInteractionResponse::Message(message))
        .await
    {
        warn!(command = %command.data.name, error = %err, "Failed to respond to command");
    }
}

fn integer_option(command: &CommandInteraction, name: &str) -> Option<i64> {
    command.data.options.iter().find_map(|option| {
        if option.name != name {
            return None;
        }

        match option.value {
            CommandDataOptionValue::Integer(value) => Some(value),
            _ => None,
        }
    })
}

fn role_option(command: &CommandInteraction, name: &str) -> Option<u64> {
    command.data.options.iter().find_map(|option| {
        if option.name != name {
            return None;
        }

        match option.value {
            CommandDataOptionValue::Role(role) => Some(role.get()),
            _ => None,
        }
    })
}

fn user_option(command: &CommandInteraction, name: &str) -> Option<u64> {
    command.data.options.iter().find_map(|option| {
        if option.name != name {
            return None;
        }

        match option.value {
            CommandDataOptionValue::User(user) => Some(user.get()),
            _ => None,
        }
    })
}
