use std::time::Duration;

use crate::config::Args;
use crate::rate_limit::CooldownGate;
use crate::upstream::ImageProvider;

// app's shared state
pub struct AppState {
    pub provider: ImageProvider,
    pub cooldown: CooldownGate, // shared by every generate request
    pub cache_max_age: u64,     // seconds a preview may be cached
}

impl AppState {
    pub fn new(provider: ImageProvider, cooldown: Duration, cache_max_age: u64) -> Self {
        Self {
            provider,
            cooldown: CooldownGate::new(cooldown),
            cache_max_age,
        }
    }

    pub fn from_args(args: &Args) -> Self {
        Self::new(
            ImageProvider::new(reqwest::Client::new(), args.upstream_url.clone()),
            Duration::from_secs(args.cooldown_secs),
            args.cache_max_age,
        )
    }
}
