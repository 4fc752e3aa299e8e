use anyhow::{Context, Result, ensure};
use dotenvy::dotenv;
use std::env;
use std::fmt::Display;
use std::str::FromStr;

use crate::leave::{EligibilityPolicy, FiscalYear};

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub server_addr: String,
    pub api_prefix: String,

    // Rate limiting
    pub rate_submit_per_min: u32,

    // Leave rules
    pub fiscal_year: FiscalYear,
    pub policy: EligibilityPolicy,

    pub manager_email: String,
    pub employee_cache_capacity: u64,
    pub employee_cache_ttl_secs: u64,
    pub log_dir: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let rate_submit_per_min = parsed(&var, "RATE_SUBMIT_PER_MIN", 60)?;
        ensure!(rate_submit_per_min > 0, "RATE_SUBMIT_PER_MIN must be at least 1");

        let month = parsed(&var, "FISCAL_YEAR_START_MONTH", 4)?;
        let day = parsed(&var, "FISCAL_YEAR_START_DAY", 1)?;
        let fiscal_year = FiscalYear::new(month, day)
            .context("FISCAL_YEAR_START_MONTH / FISCAL_YEAR_START_DAY")?;

        let defaults = EligibilityPolicy::default();
        let policy = EligibilityPolicy {
            minimum_tenure_months: parsed(
                &var,
                "MIN_TENURE_MONTHS",
                defaults.minimum_tenure_months,
            )?,
            yearly_quota: parsed(&var, "YEARLY_LEAVE_QUOTA", defaults.yearly_quota)?,
        };

        Ok(Self {
            server_addr: required(&var, "SERVER_ADDR")?,
            database_url: required(&var, "DATABASE_URL")?,
            api_prefix: var("API_PREFIX").unwrap_or_else(|| "/api".to_string()),
            rate_submit_per_min,
            fiscal_year,
            policy,
            manager_email: var("MANAGER_EMAIL")
                .unwrap_or_else(|| "manager@example.com".to_string()),
            employee_cache_capacity: parsed(&var, "EMPLOYEE_CACHE_CAPACITY", 10_000)?,
            employee_cache_ttl_secs: parsed(&var, "EMPLOYEE_CACHE_TTL_SECS", 300)?,
            log_dir: var("LOG_DIR").unwrap_or_else(|| "logs".to_string()),
        })
    }
}

fn required(var: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    var(key).with_context(|| format!("{key} must be set"))
}

fn parsed<T>(var: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match var(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|err| anyhow::anyhow!("{key} has invalid value {raw:?}: {err}")),
        None => Ok(default),
    }
}
