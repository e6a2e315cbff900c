use crate::config::AppConfig;
use crate::db::DbPool;
use crate::{commands, errors};
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use tracing::{info, instrument};

// User data, which is stored and accessible in all command invocations
#[derive(Debug)]
pub struct Data {
    pub app_config: Arc<AppConfig>,
    pub db_pool: DbPool,
}

// Type alias for the error type Poise will use
pub(crate) type Error = errors::Error;
pub(crate) type Context<'a> = poise::Context<'a, Data, Error>;

async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            panic!("Failed to start bot: {:?}", error);
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            // One failing command must not take down the event task; log it
            // and still give the caller their acknowledgment.
            tracing::error!("Error in command `{}`: {:?}", ctx.command().name, error);
            if let Err(e) = ctx
                .say("Something went wrong while running that command.")
                .await
            {
                tracing::error!("Failed to send error message: {}", e);
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                tracing::error!("Error while handling error: {}", e)
            }
        }
    }
}

#[instrument(skip(token, app_config, db_pool))]
pub async fn run_bot(
    token: String,
    app_config: Arc<AppConfig>,
    db_pool: DbPool,
) -> Result<(), serenity::Error> {
    let guild_id = serenity::GuildId::new(app_config.guild_id);

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::ping(),
                commands::submit_flag(),
                commands::add_flag(),
                commands::remove_flag(),
                commands::create_challenge(),
            ],
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands in guild {}...", guild_id);
                poise::builtins::register_in_guild(ctx, &framework.options().commands, guild_id)
                    .await?;
                Ok(Data {
                    app_config,
                    db_pool,
                })
            })
        })
        .build();

    // Slash commands only; no privileged intents needed.
    let intents = serenity::GatewayIntents::non_privileged();

    info!("Setting up Serenity client for Poise framework...");
    let client = serenity::Client::builder(&token, intents)
        .framework(framework)
        .await;

    match client {
        Ok(mut c) => {
            info!("Starting bot client...");
            if let Err(why) = c.start().await {
                tracing::error!("Client error: {:?}", why);
                return Err(why);
            }
        }
        Err(e) => {
            tracing::error!("Error creating client: {:?}", e);
            return Err(e);
        }
    }
    Ok(())
}
