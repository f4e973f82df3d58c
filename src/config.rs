use anyhow::{anyhow, Result};
use std::collections::HashSet;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub telegram_bot_token: String,
    pub database_url: String,
    pub http_port: u16,
    /// Base URL of the remote timetable provider.
    pub timetable_api_url: String,
    /// JSON file with the group catalog (`[{name, id}, ...]`).
    pub groups_file: PathBuf,
    /// Directory holding one cached timetable artifact per group.
    pub cache_dir: PathBuf,
    /// Chat ids allowed to run operator-only commands, fixed for the process.
    pub operator_ids: HashSet<i64>,
    /// Contact shown to users when something is broken.
    pub support_contact: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let token = env::var("TELEGRAM_BOT_TOKEN")
            .map_err(|_| anyhow!("TELEGRAM_BOT_TOKEN must be set"))?;

        if token.trim().is_empty() {
            return Err(anyhow!("TELEGRAM_BOT_TOKEN must be set"));
        }

        let timetable_api_url = env::var("TIMETABLE_API_URL")
            .map_err(|_| anyhow!("TIMETABLE_API_URL must be set"))?;

        if timetable_api_url.trim().is_empty() {
            return Err(anyhow!("TIMETABLE_API_URL must be set"));
        }

        let database_url = env::var("DATABASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| "sqlite:./data/bot.db".to_string());

        let port_str = env::var("HTTP_PORT").unwrap_or_else(|_| "3000".to_string());
        let http_port = port_str
            .trim()
            .parse()
            .map_err(|_| anyhow!("Invalid HTTP_PORT"))?;

        let groups_file = env::var("GROUPS_FILE")
            .unwrap_or_else(|_| "./data/groups.json".to_string())
            .into();

        let cache_dir = env::var("TIMETABLE_CACHE_DIR")
            .unwrap_or_else(|_| "./data/timetables".to_string())
            .into();

        let operator_ids = parse_operator_ids(&env::var("ADMIN_IDS").unwrap_or_default())?;

        let support_contact =
            env::var("SUPPORT_CONTACT").unwrap_or_else(|_| "@timetable_support".to_string());

        Ok(Config {
            telegram_bot_token: token,
            database_url,
            http_port,
            timetable_api_url,
            groups_file,
            cache_dir,
            operator_ids,
            support_contact,
        })
    }
}

fn parse_operator_ids(raw: &str) -> Result<HashSet<i64>> {
    let mut ids = HashSet::new();
    for part in raw.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let id = part
            .parse()
            .map_err(|_| anyhow!("Invalid ADMIN_IDS entry: {part}"))?;
        ids.insert(id);
    }
    Ok(ids)
}
