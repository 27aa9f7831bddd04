//! Builds the `.env` and `config/database.php` update sets from extracted
//! CodeIgniter values.

use indexmap::IndexMap;

use super::driver::{keys, LaravelDriver};
use super::ConversionSettings;
use crate::core::values::{lookup, ConfigValues, DatabaseValues, ScalarValue};

const APP_NAME_KEYS: &[&str] = &["site_title", "site_name"];
const APP_URL_KEYS: &[&str] = &["base_url", "baseURL"];
const DEBUG_KEYS: &[&str] = &["debug"];

const DEFAULT_APP_URL: &str = "http://localhost";
const DEFAULT_HOST: &str = "127.0.0.1";

/// `.env` keys in the order they are written.
pub type EnvUpdates = IndexMap<&'static str, String>;

/// Host and port of a CodeIgniter `hostname` such as `db.local:3307` or
/// `https://db.local`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostPort {
    pub host: String,
    pub port: Option<u16>,
}

impl HostPort {
    pub fn parse(raw: &str) -> Self {
        let stripped = strip_scheme(raw);
        let mut parts = stripped.split(':');
        let host = parts.next().unwrap_or_default().to_string();
        let port = parts.next().and_then(parse_port);
        Self { host, port }
    }
}

fn strip_scheme(value: &str) -> &str {
    value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"))
        .unwrap_or(value)
}

fn parse_port(raw: &str) -> Option<u16> {
    raw.trim().parse().ok()
}

fn explicit_port(values: &DatabaseValues) -> Option<u16> {
    match lookup(values, keys::PORT)? {
        ScalarValue::Int(port) => u16::try_from(*port).ok(),
        ScalarValue::String(port) => parse_port(port),
        _ => None,
    }
}

fn text(values: &IndexMap<String, ScalarValue>, keys: &[&str], default: &str) -> String {
    lookup(values, keys)
        .map(ScalarValue::to_php_string)
        .unwrap_or_else(|| default.to_string())
}

/// Port for `DB_PORT`: the one in `hostname`, then an explicit `port`
/// setting, then the driver's default.
pub fn resolve_port(driver: LaravelDriver, database: &DatabaseValues) -> u16 {
    let host = text(database, keys::HOST, DEFAULT_HOST);
    HostPort::parse(&host)
        .port
        .or_else(|| explicit_port(database))
        .unwrap_or_else(|| driver.default_port())
}

pub fn build_env_updates(
    config: &ConfigValues,
    database: &DatabaseValues,
    settings: &ConversionSettings,
) -> EnvUpdates {
    let driver = LaravelDriver::from_values(database);
    let host = HostPort::parse(&text(database, keys::HOST, DEFAULT_HOST));
    let port = resolve_port(driver, database);
    let app_url = text(config, APP_URL_KEYS, DEFAULT_APP_URL);
    let debug = lookup(config, DEBUG_KEYS).is_some_and(ScalarValue::truthy);

    let mut updates = EnvUpdates::new();
    updates.insert(
        "APP_NAME",
        text(config, APP_NAME_KEYS, &settings.default_app_name),
    );
    updates.insert("APP_ENV", settings.app_env.clone());
    updates.insert("APP_DEBUG", debug.to_string());
    updates.insert("APP_URL", strip_scheme(&app_url).to_string());
    updates.insert("DB_CONNECTION", driver.as_str().to_string());
    updates.insert("DB_HOST", host.host);
    updates.insert("DB_PORT", port.to_string());
    updates.insert("DB_DATABASE", text(database, keys::DATABASE, ""));
    updates.insert("DB_USERNAME", text(database, keys::USERNAME, ""));
    updates.insert("DB_PASSWORD", text(database, keys::PASSWORD, ""));
    updates
}

/// Fields for the resolved driver's block in `config/database.php`.
pub fn build_database_updates(
    database: &DatabaseValues,
) -> (LaravelDriver, IndexMap<&'static str, ScalarValue>) {
    let driver = LaravelDriver::from_values(database);
    (driver, driver.connection_fields(database))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn values(pairs: &[(&str, ScalarValue)]) -> IndexMap<String, ScalarValue> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_host_port_parsing() {
        assert_eq!(
            HostPort::parse("db.local:3307"),
            HostPort {
                host: "db.local".into(),
                port: Some(3307)
            }
        );
        assert_eq!(HostPort::parse("https://db.local").host, "db.local");
        assert_eq!(HostPort::parse("localhost:abc").port, None);
        assert_eq!(HostPort::parse("").host, "");
    }

    #[test]
    fn test_mysqli_host_with_port() {
        let db = values(&[
            ("dbdriver", "mysqli".into()),
            ("hostname", "db.local:3307".into()),
            ("database", "app".into()),
            ("username", "root".into()),
            ("password", "secret".into()),
        ]);
        let updates = build_env_updates(&ConfigValues::new(), &db, &ConversionSettings::default());
        assert_eq!(updates["DB_CONNECTION"], "mysql");
        assert_eq!(updates["DB_HOST"], "db.local");
        assert_eq!(updates["DB_PORT"], "3307");
        assert_eq!(updates["DB_DATABASE"], "app");
        assert_eq!(updates["DB_USERNAME"], "root");
        assert_eq!(updates["DB_PASSWORD"], "secret");
    }

    #[test]
    fn test_key_order_is_fixed() {
        let updates = build_env_updates(
            &ConfigValues::new(),
            &DatabaseValues::new(),
            &ConversionSettings::default(),
        );
        let keys: Vec<_> = updates.keys().copied().collect();
        assert_eq!(
            keys,
            vec![
                "APP_NAME",
                "APP_ENV",
                "APP_DEBUG",
                "APP_URL",
                "DB_CONNECTION",
                "DB_HOST",
                "DB_PORT",
                "DB_DATABASE",
                "DB_USERNAME",
                "DB_PASSWORD"
            ]
        );
        assert_eq!(updates["APP_NAME"], "Laravel Migration App");
        assert_eq!(updates["APP_URL"], "localhost");
        assert_eq!(updates["APP_DEBUG"], "false");
        assert_eq!(updates["DB_HOST"], "127.0.0.1");
        assert_eq!(updates["DB_PORT"], "3306");
    }

    #[test]
    fn test_app_settings_fallbacks() {
        let config = values(&[
            ("site_name", "Shop".into()),
            ("baseURL", "https://shop.example.com/".into()),
            ("debug", ScalarValue::Int(1)),
        ]);
        let settings = ConversionSettings {
            app_env: "production".into(),
            ..ConversionSettings::default()
        };
        let updates = build_env_updates(&config, &DatabaseValues::new(), &settings);
        assert_eq!(updates["APP_NAME"], "Shop");
        assert_eq!(updates["APP_ENV"], "production");
        assert_eq!(updates["APP_DEBUG"], "true");
        assert_eq!(updates["APP_URL"], "shop.example.com/");

        let titled = values(&[("site_title", "Title".into()), ("site_name", "Name".into())]);
        let updates = build_env_updates(&titled, &DatabaseValues::new(), &settings);
        assert_eq!(updates["APP_NAME"], "Title");
    }

    #[test]
    fn test_port_fallbacks() {
        let explicit = values(&[
            ("DBDriver", "Postgre".into()),
            ("hostname", "pg".into()),
            ("port", ScalarValue::Int(6543)),
        ]);
        assert_eq!(resolve_port(LaravelDriver::Pgsql, &explicit), 6543);

        let defaulted = values(&[("DBDriver", "Postgre".into()), ("port", "".into())]);
        let updates =
            build_env_updates(&ConfigValues::new(), &defaulted, &ConversionSettings::default());
        assert_eq!(updates["DB_CONNECTION"], "pgsql");
        assert_eq!(updates["DB_PORT"], "5432");
    }

    #[test]
    fn test_database_updates_follow_driver() {
        let db = values(&[("dbdriver", "sqlite3".into()), ("dbprefix", "ci_".into())]);
        let (driver, fields) = build_database_updates(&db);
        assert_eq!(driver, LaravelDriver::Sqlite);
        assert_eq!(fields["driver"], ScalarValue::from("sqlite"));
        assert_eq!(fields["prefix"], ScalarValue::from("ci_"));
    }
}
