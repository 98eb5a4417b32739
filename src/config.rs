// src/config.rs

use std::{env, sync::Arc, time::Duration};

use anyhow::{anyhow, Context};
use chrono::FixedOffset;
use sqlx::postgres::PgPoolOptions;

use crate::{
    common::i18n::I18nStore,
    db::PgBookingRepository,
    services::BookingService,
};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
// Fusos reais vão de -12h a +14h
const MAX_OFFSET_MINUTES: i32 = 14 * 60;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub db_max_connections: u32,
    pub booking_tz: FixedOffset,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL deve ser definida")?;

        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        let db_max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(raw) => raw
                .parse::<u32>()
                .with_context(|| format!("DB_MAX_CONNECTIONS inválido: {raw}"))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let offset_minutes = match lookup("BOOKING_UTC_OFFSET_MINUTES") {
            Some(raw) => raw
                .parse::<i32>()
                .with_context(|| format!("BOOKING_UTC_OFFSET_MINUTES inválido: {raw}"))?,
            None => 0,
        };
        let booking_tz = booking_offset(offset_minutes)?;

        Ok(Self {
            database_url,
            bind_addr,
            db_max_connections,
            booking_tz,
        })
    }
}

fn booking_offset(minutes: i32) -> anyhow::Result<FixedOffset> {
    if minutes.abs() > MAX_OFFSET_MINUTES {
        return Err(anyhow!("BOOKING_UTC_OFFSET_MINUTES fora do intervalo: {minutes}"));
    }
    FixedOffset::east_opt(minutes * 60)
        .ok_or_else(|| anyhow!("BOOKING_UTC_OFFSET_MINUTES inválido: {minutes}"))
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub booking_service: BookingService,
    pub i18n_store: Arc<I18nStore>,
}

impl AppState {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let db_pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&config.database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let repo = Arc::new(PgBookingRepository::new(db_pool));
        let booking_service = BookingService::new(repo, config.booking_tz);

        Ok(Self::from_parts(booking_service, I18nStore::new()))
    }

    pub fn from_parts(booking_service: BookingService, i18n_store: I18nStore) -> Self {
        Self {
            booking_service,
            i18n_store: Arc::new(i18n_store),
        }
    }
}
