use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub database_url: String,
    pub database_max_connections: u32,
    pub jwt_secret: String,
    pub integration_rps: u32,
    pub public_rps: u32,
    pub invite_token_length: usize,
    pub venue_latitude: f64,
    pub venue_longitude: f64,
    pub checkin_radius_meters: f64,
    pub checkin_open_before_minutes: i64,
    pub checkin_grace_minutes: i64,
    pub checkin_late_window_minutes: i64,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            server_address: get_env("SERVER_ADDRESS")?,
            database_url: get_env("DATABASE_URL")?,
            database_max_connections: get_env_parse_or("DATABASE_MAX_CONNECTIONS", 20)?,
            jwt_secret: get_env("JWT_SECRET")?,
            integration_rps: get_env_parse("INTEGRATION_RPS")?,
            public_rps: get_env_parse("PUBLIC_RPS")?,
            invite_token_length: get_env_parse_or("INVITE_TOKEN_LENGTH", 32)?,
            venue_latitude: get_env_parse("VENUE_LATITUDE")?,
            venue_longitude: get_env_parse("VENUE_LONGITUDE")?,
            checkin_radius_meters: get_env_parse_or("CHECKIN_RADIUS_METERS", 150.0)?,
            checkin_open_before_minutes: get_env_parse_or("CHECKIN_OPEN_BEFORE_MINUTES", 60)?,
            checkin_grace_minutes: get_env_parse_or("CHECKIN_GRACE_MINUTES", 15)?,
            checkin_late_window_minutes: get_env_parse_or("CHECKIN_LATE_WINDOW_MINUTES", 30)?,
        })
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_parse<T>(name: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = get_env(name)?;
    raw.parse()
        .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e)))
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}
