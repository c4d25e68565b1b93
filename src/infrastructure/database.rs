use std::fmt;

use sqlx::{PgPool, postgres::PgPoolOptions};

pub async fn init_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Name of the database collation used for alphabetical ordering.
///
/// The name is spliced into SQL, so only identifier-like values are accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortCollation(String);

impl SortCollation {
    pub const DEFAULT: &'static str = "ru-RU-x-icu";

    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.'));
        valid.then_some(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SortCollation {
    fn default() -> Self {
        Self(Self::DEFAULT.to_owned())
    }
}

/// Renders as a `COLLATE` clause.
impl fmt::Display for SortCollation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "COLLATE \"{}\"", self.0)
    }
}
