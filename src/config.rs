use std::{env, fmt::Display, net::SocketAddr, num::NonZeroU32, str::FromStr};

use url::Url;

use crate::parse::NoiseFilter;

pub const DEFAULT_MENU_URL: &str = "https://dining.berkeley.edu/wp-admin/admin-ajax.php";
pub const DEFAULT_MENU_ACTION: &str = "cald_filter_xml";

/// Runtime settings, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub menu_url: Url,
    pub menu_action: String,
    pub rate_limit: NonZeroU32,
    pub noise_filter: NoiseFilter,
    pub scan_days: u32,
    pub max_scan_days: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            menu_url: Url::parse(DEFAULT_MENU_URL).expect("default menu url should be valid"),
            menu_action: DEFAULT_MENU_ACTION.to_owned(),
            rate_limit: NonZeroU32::new(20).expect("20 is not zero"),
            noise_filter: NoiseFilter::default(),
            scan_days: 8,
            max_scan_days: 31,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Unparseable values are logged and replaced by their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let host = lookup("HOST").unwrap_or_else(|| defaults.addr.ip().to_string());
        let port = lookup("PORT").unwrap_or_else(|| defaults.addr.port().to_string());
        let addr = parse_or("HOST/PORT", Some(format!("{host}:{port}")), defaults.addr);
        Self {
            addr,
            menu_url: parse_or("MENU_URL", lookup("MENU_URL"), defaults.menu_url),
            menu_action: lookup("MENU_ACTION").unwrap_or(defaults.menu_action),
            rate_limit: parse_or("RATE_LIMIT", lookup("RATE_LIMIT"), defaults.rate_limit),
            noise_filter: NoiseFilter(parse_or(
                "RECIPE_NAME_LIMIT",
                lookup("RECIPE_NAME_LIMIT"),
                defaults.noise_filter.0,
            )),
            scan_days: parse_or("SCAN_DAYS", lookup("SCAN_DAYS"), defaults.scan_days),
            max_scan_days: parse_or(
                "MAX_SCAN_DAYS",
                lookup("MAX_SCAN_DAYS"),
                defaults.max_scan_days,
            ),
        }
    }
}

fn parse_or<T>(key: &str, value: Option<String>, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match value.as_deref().map(str::parse::<T>) {
        Some(Ok(v)) => v,
        Some(Err(e)) => {
            log::warn!("env var {key} is invalid ({e}), using {default}");
            default
        }
        None => default,
    }
}
