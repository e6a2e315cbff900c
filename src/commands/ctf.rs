use crate::bot::{Context, Error};
use crate::db::{self, SolveAttempt};
use poise::serenity_prelude::{self as serenity, Mentionable};
use tracing::{info, instrument, warn};

/// Sends a reply visible only to the invoking user.
async fn say_ephemeral(ctx: &Context<'_>, content: impl Into<String>) -> Result<(), Error> {
    ctx.send(
        poise::CreateReply::default()
            .content(content.into())
            .ephemeral(true),
    )
    .await?;
    Ok(())
}

/// Gate for the flag-management commands: the caller must hold the
/// configured admin role and invoke from the configured admin channel,
/// checked in that order so the denial message names the first failure.
///
/// Sends the denial itself and returns whether the command may proceed.
async fn authorize_admin(ctx: &Context<'_>) -> Result<bool, Error> {
    let config = &ctx.data().app_config;
    let admin_role = serenity::RoleId::new(config.admin_role_id);

    let has_role = ctx
        .author_member()
        .await
        .is_some_and(|member| member.roles.contains(&admin_role));

    if !has_role {
        warn!(
            "User {} denied admin command: missing role {}",
            ctx.author().id,
            admin_role
        );
        say_ephemeral(ctx, "You do not have permission to run this command!").await?;
        return Ok(false);
    }

    if ctx.channel_id() != serenity::ChannelId::new(config.admin_channel_id) {
        warn!(
            "User {} denied admin command: invoked from channel {}",
            ctx.author().id,
            ctx.channel_id()
        );
        say_ephemeral(ctx, "You cannot run this command in this channel!").await?;
        return Ok(false);
    }

    Ok(true)
}

/// Submit a flag for a CTF challenge.
#[poise::command(slash_command, rename = "submit-flag")]
#[instrument(skip(ctx, flag))]
pub async fn submit_flag(
    ctx: Context<'_>,
    #[description = "The flag to submit"] flag: String,
) -> Result<(), Error> {
    let data = ctx.data();
    let db_pool = &data.db_pool;
    let user_id = ctx.author().id.to_string();

    let Some(challenge_id) = db::query_solve_target(db_pool, &flag).await? else {
        say_ephemeral(&ctx, "Sorry! Invalid flag!").await?;
        return Ok(());
    };

    match db::add_solve(db_pool, &challenge_id, &user_id).await? {
        SolveAttempt::Inserted => {
            say_ephemeral(&ctx, "Flag successfully submitted!").await?;

            // Falls back to the raw ID if the challenge row is gone.
            let challenge_name = db::get_challenge_name(db_pool, &challenge_id)
                .await?
                .unwrap_or_else(|| challenge_id.clone());
            let announcement = format!(
                "{} has solved `{}`!",
                ctx.author().mention(),
                challenge_name
            );
            serenity::ChannelId::new(data.app_config.solve_channel_id)
                .say(ctx.http(), announcement)
                .await?;
            info!(
                "Announced first solve of '{}' by user {}",
                challenge_id, user_id
            );
        }
        SolveAttempt::AlreadySolved => {
            say_ephemeral(&ctx, "You have already submitted this flag!").await?;
        }
    }

    Ok(())
}

/// Add a valid flag to an existing CTF challenge.
#[poise::command(slash_command, rename = "add-flag")]
#[instrument(skip(ctx, flag))]
pub async fn add_flag(
    ctx: Context<'_>,
    #[description = "The flag to add"] flag: String,
    #[description = "The ID of the CTF challenge"] challenge_id: String,
) -> Result<(), Error> {
    if !authorize_admin(&ctx).await? {
        return Ok(());
    }
    let db_pool = &ctx.data().db_pool;

    match db::get_challenge_name(db_pool, &challenge_id).await? {
        Some(name) => {
            db::add_flag(db_pool, &flag, &challenge_id).await?;
            say_ephemeral(&ctx, format!("Successfully added the flag for `{}`!", name)).await?;
        }
        None => {
            say_ephemeral(&ctx, "You need to create a challenge with this ID first!").await?;
        }
    }

    Ok(())
}

/// Remove every flag attached to a CTF challenge.
#[poise::command(slash_command, rename = "remove-flag")]
#[instrument(skip(ctx))]
pub async fn remove_flag(
    ctx: Context<'_>,
    #[description = "The ID of the CTF challenge"] challenge_id: String,
) -> Result<(), Error> {
    if !authorize_admin(&ctx).await? {
        return Ok(());
    }

    // No existence check: deleting zero rows is still success.
    let removed = db::remove_flags(&ctx.data().db_pool, &challenge_id).await?;
    info!(
        "remove-flag deleted {} row(s) for challenge '{}'",
        removed, challenge_id
    );
    say_ephemeral(&ctx, "Successfully removed the flag!").await?;

    Ok(())
}

/// Create a new CTF challenge.
#[poise::command(slash_command, rename = "create-challenge")]
#[instrument(skip(ctx))]
pub async fn create_challenge(
    ctx: Context<'_>,
    #[description = "The ID of the CTF challenge"] challenge_id: String,
    #[description = "The name of the CTF challenge"] challenge_name: String,
) -> Result<(), Error> {
    if !authorize_admin(&ctx).await? {
        return Ok(());
    }

    // TODO: expose category and description as options once the create flow
    // collects them; stored empty until then.
    db::create_challenge(&ctx.data().db_pool, &challenge_id, &challenge_name, "", "").await?;
    say_ephemeral(&ctx, "Successfully created the CTF challenge!").await?;

    Ok(())
}
