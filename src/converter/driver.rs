//! CodeIgniter driver names mapped onto Laravel connection drivers.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::values::{lookup, DatabaseValues, ScalarValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LaravelDriver {
    Mysql,
    Sqlite,
    Pgsql,
    Sqlsrv,
}

/// Source keys, in lookup order, for settings the two generations spell
/// differently.
pub mod keys {
    pub const DRIVER: &[&str] = &["dbdriver", "DBDriver"];
    pub const PREFIX: &[&str] = &["dbprefix", "DBPrefix"];
    pub const CHARSET: &[&str] = &["char_set", "charset"];
    pub const COLLATION: &[&str] = &["dbcollat", "DBCollat"];
    pub const STRICT: &[&str] = &["stricton", "strictOn"];
    pub const HOST: &[&str] = &["hostname"];
    pub const PORT: &[&str] = &["port"];
    pub const DATABASE: &[&str] = &["database"];
    pub const USERNAME: &[&str] = &["username"];
    pub const PASSWORD: &[&str] = &["password"];
}

impl LaravelDriver {
    pub const ALL: [LaravelDriver; 4] = [
        LaravelDriver::Mysql,
        LaravelDriver::Sqlite,
        LaravelDriver::Pgsql,
        LaravelDriver::Sqlsrv,
    ];

    /// Normalize a CodeIgniter driver spelling. Unrecognised names map to
    /// MySQL.
    pub fn from_source(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "mysqli" | "mysql" => LaravelDriver::Mysql,
            "sqlite3" | "sqlite" => LaravelDriver::Sqlite,
            "postgre" | "pgsql" => LaravelDriver::Pgsql,
            "sqlsrv" => LaravelDriver::Sqlsrv,
            _ => LaravelDriver::Mysql,
        }
    }

    /// Driver named by the extracted values, MySQL when absent.
    pub fn from_values(values: &DatabaseValues) -> Self {
        lookup(values, keys::DRIVER)
            .map(|v| Self::from_source(&v.to_php_string()))
            .unwrap_or(LaravelDriver::Mysql)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LaravelDriver::Mysql => "mysql",
            LaravelDriver::Sqlite => "sqlite",
            LaravelDriver::Pgsql => "pgsql",
            LaravelDriver::Sqlsrv => "sqlsrv",
        }
    }

    pub fn default_port(&self) -> u16 {
        match self {
            LaravelDriver::Mysql => 3306,
            LaravelDriver::Pgsql => 5432,
            LaravelDriver::Sqlsrv => 1433,
            LaravelDriver::Sqlite => 3306,
        }
    }

    /// Fields written into this driver's block of `config/database.php`,
    /// `driver` first.
    pub fn connection_fields(&self, values: &DatabaseValues) -> IndexMap<&'static str, ScalarValue> {
        let text = |keys: &[&str], default: &str| {
            lookup(values, keys)
                .cloned()
                .unwrap_or_else(|| ScalarValue::from(default))
        };

        let mut fields = IndexMap::new();
        fields.insert("driver", ScalarValue::from(self.as_str()));
        match self {
            LaravelDriver::Mysql => {
                fields.insert("charset", text(keys::CHARSET, "utf8mb4"));
                fields.insert("collation", text(keys::COLLATION, "utf8mb4_unicode_ci"));
                fields.insert("prefix", text(keys::PREFIX, ""));
                fields.insert("prefix_indexes", ScalarValue::Bool(true));
                let strict = lookup(values, keys::STRICT).map_or(true, ScalarValue::truthy);
                fields.insert("strict", ScalarValue::Bool(strict));
                fields.insert("engine", ScalarValue::from("InnoDB"));
            }
            LaravelDriver::Sqlite => {
                fields.insert("prefix", text(keys::PREFIX, ""));
                fields.insert("foreign_key_constraints", ScalarValue::Bool(true));
            }
            LaravelDriver::Pgsql => {
                fields.insert("charset", text(keys::CHARSET, "utf8"));
                fields.insert("prefix", text(keys::PREFIX, ""));
                fields.insert("prefix_indexes", ScalarValue::Bool(true));
                fields.insert("schema", ScalarValue::from("public"));
                fields.insert("sslmode", ScalarValue::from("prefer"));
            }
            LaravelDriver::Sqlsrv => {
                fields.insert("charset", text(keys::CHARSET, "utf8"));
                fields.insert("prefix", text(keys::PREFIX, ""));
                fields.insert("prefix_indexes", ScalarValue::Bool(true));
            }
        }
        fields
    }
}

impl fmt::Display for LaravelDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
