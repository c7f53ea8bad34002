use anyhow::Result;
use dotenvy::dotenv;
use log::{error, info, warn};
use serenity::async_trait;
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chime::command_handler::CommandHandler;
use chime::core::Config;
use chime::features::clock::SystemClock;
use chime::features::keepalive;
use chime::features::reminders::ReminderRegistry;
use chime::messenger::{DiscordMessenger, Messenger};

struct Handler {
    command_handler: Arc<CommandHandler>,
    registry: Arc<ReminderRegistry>,
    messenger: Arc<DiscordMessenger>,
    update_interval_ms: u64,
    first_ready: AtomicBool,
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!("{} connected to the gateway", ready.user.name);

        if !self.first_ready.swap(false, Ordering::SeqCst) {
            // Reconnect: the board message is still ours, just repaint it.
            self.registry.publish_board().await;
            return;
        }

        self.messenger.reset_board().await;
        self.registry.publish_board().await;

        let registry = Arc::clone(&self.registry);
        let interval_ms = self.update_interval_ms;
        tokio::spawn(async move {
            let mut interval =
                tokio::time::interval(std::time::Duration::from_millis(interval_ms));
            loop {
                interval.tick().await;
                registry.publish_board().await;
            }
        });
        info!("Board refresh loop started ({interval_ms}ms)");
    }

    async fn message(&self, ctx: Context, msg: Message) {
        if let Err(e) = self.command_handler.handle_message(&ctx, &msg).await {
            error!("Failed to handle message: {e}");
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting chime reminder bot...");

    if let Some(addr) = config.keepalive_addr.clone() {
        tokio::spawn(async move {
            if let Err(e) = keepalive::serve(&addr).await {
                warn!("Keepalive responder stopped: {e}");
            }
        });
    }

    let http = Arc::new(serenity::http::Http::new(&config.discord_token));
    let messenger = Arc::new(DiscordMessenger::new(http, config.channel_id));
    let clock = Arc::new(SystemClock);
    let registry = ReminderRegistry::new(clock.clone(), messenger.clone());
    let command_handler = Arc::new(CommandHandler::new(
        Arc::clone(&registry),
        messenger.clone() as Arc<dyn Messenger>,
        clock,
        config.command_prefix.clone(),
        config.utc_offset_hours,
        config.channel_id,
    ));

    let handler = Handler {
        command_handler,
        registry,
        messenger,
        update_interval_ms: config.update_interval_ms,
        first_ready: AtomicBool::new(true),
    };

    let intents =
        GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES | GatewayIntents::MESSAGE_CONTENT;

    let mut client = Client::builder(&config.discord_token, intents)
        .event_handler(handler)
        .await
        .map_err(|e| {
            error!("Failed to create Discord client: {e}");
            anyhow::anyhow!("Client creation failed: {}", e)
        })?;

    info!("Bot configured successfully. Connecting to Discord gateway...");

    if let Err(why) = client.start().await {
        error!("Gateway connection failed: {why:?}");
        return Err(anyhow::anyhow!(
            "Failed to establish gateway connection: {}",
            why
        ));
    }

    Ok(())
}
