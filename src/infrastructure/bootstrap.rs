//! Infrastructure bootstrap helpers for session wiring.

use std::sync::Arc;

use tracing::info;

use crate::adapter::outbound::http::HttpBotApi;
use crate::adapter::outbound::notifier::{
    ConsoleNotifier, ConsoleStyle, LogNotifier, NotifierRegistry,
};
use crate::application::store::BotStore;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::BotApi;

/// Build notifier registry from configuration.
pub fn build_notifier_registry(config: &Config, style: ConsoleStyle) -> NotifierRegistry {
    let mut registry = NotifierRegistry::new();
    if config.notifications.console {
        registry.register(Box::new(ConsoleNotifier::new(style)));
    }
    if config.notifications.log {
        registry.register(Box::new(LogNotifier));
    }
    registry
}

/// Build the HTTP client for the configured server.
pub fn build_api(config: &Config) -> Result<HttpBotApi> {
    HttpBotApi::new(&config.api.base_url)
}

/// Create the store for one operator session.
pub fn build_store(config: &Config, style: ConsoleStyle) -> Result<BotStore> {
    let api: Arc<dyn BotApi> = Arc::new(build_api(config)?);
    let notifier = Arc::new(build_notifier_registry(config, style));
    info!(
        base_url = %config.api.base_url,
        notifiers = notifier.len(),
        "Session created"
    );
    Ok(BotStore::new(api, notifier))
}
