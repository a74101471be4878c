use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub stats_file: String,
    pub bot_name: String,
    pub discord_token: Option<String>,
    pub application_id: Option<String>,
    pub api_base: String,
    pub relay_token: Option<String>,
    pub click_burst: u32,
    pub click_refill_seconds: u64,
    pub maintenance_interval_seconds: u64,
}

impl Config {
    pub fn new() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .expect("Invalid PORT"),
            stats_file: env::var("STATS_FILE").unwrap_or_else(|_| "stats.json".to_string()),
            bot_name: env::var("BOT_NAME").unwrap_or_else(|_| "tictactoe-bot".to_string()),
            discord_token: non_empty_var("DISCORD_TOKEN"),
            application_id: non_empty_var("DISCORD_APPLICATION_ID"),
            api_base: env::var("DISCORD_API_BASE")
                .unwrap_or_else(|_| "https://discord.com/api/v10".to_string()),
            relay_token: non_empty_var("RELAY_TOKEN"),
            click_burst: env::var("CLICK_BURST")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .expect("Invalid CLICK_BURST"),
            click_refill_seconds: env::var("CLICK_REFILL_SECONDS")
                .unwrap_or_else(|_| "1".to_string())
                .parse()
                .expect("Invalid CLICK_REFILL_SECONDS"),
            maintenance_interval_seconds: env::var("MAINTENANCE_INTERVAL_SECONDS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .expect("Invalid MAINTENANCE_INTERVAL_SECONDS"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}
