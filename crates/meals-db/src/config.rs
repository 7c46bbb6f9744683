/// Resolve the database URL from environment-style lookups.
///
/// `DATABASE_URL` wins when present; otherwise the URL is assembled from the
/// separate `DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASS` and `DB_NAME` parts.
pub fn database_url<F>(lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup("DATABASE_URL") {
        return url;
    }

    let host = lookup("DB_HOST").unwrap_or_else(|| "localhost".to_string());
    let port = lookup("DB_PORT").unwrap_or_else(|| "5432".to_string());
    let user = lookup("DB_USER").unwrap_or_else(|| "postgres".to_string());
    let password = lookup("DB_PASS").unwrap_or_default();
    let name = lookup("DB_NAME").unwrap_or_else(|| "meals".to_string());

    format!("postgresql://{}:{}@{}:{}/{}", user, password, host, port, name)
}

/// [`database_url`] backed by the process environment
pub fn database_url_from_env() -> String {
    database_url(|key| std::env::var(key).ok())
}
