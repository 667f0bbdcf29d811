use serde::{Deserialize, Deserializer};

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// PostgreSQL database connection URL; in-memory stores are used when unset
    #[serde(default)]
    pub database_url: Option<String>,

    /// Maximum size of the PostgreSQL pool
    #[serde(default = "default_database_max_connections")]
    pub database_max_connections: u32,

    /// JSON file with catalog rows to load at startup
    #[serde(default)]
    pub catalog_seed_path: Option<String>,

    /// Redis connection URL; engine responses are cached when set
    #[serde(default)]
    pub redis_url: Option<String>,

    /// Seconds an engine response stays cached
    #[serde(default = "default_recommendation_cache_ttl")]
    pub recommendation_cache_ttl: u64,

    /// Recommendation engine base URL
    #[serde(default = "default_engine_url")]
    pub engine_url: String,

    /// Recommendation engine request timeout in seconds
    #[serde(default = "default_engine_timeout_secs")]
    pub engine_timeout_secs: u64,

    /// Feature identifiers the engine scores on, comma separated
    #[serde(default, deserialize_with = "deserialize_feature_list")]
    pub selected_features: Vec<String>,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_database_max_connections() -> u32 {
    5
}

fn default_recommendation_cache_ttl() -> u64 {
    3600
}

fn default_engine_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_engine_timeout_secs() -> u64 {
    30
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn deserialize_feature_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(parse_feature_list(&raw))
}

/// Splits a comma separated feature list, dropping blanks
pub fn parse_feature_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from an explicit set of variables
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Config>(vars).map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Socket address the server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_vars(Vec::new()).unwrap();
        assert_eq!(config.database_url, None);
        assert_eq!(config.redis_url, None);
        assert_eq!(config.engine_url, "http://127.0.0.1:8000");
        assert!(config.selected_features.is_empty());
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
        assert_eq!(config.recommendation_cache_ttl, 3600);
    }

    #[test]
    fn test_selected_features_are_split_and_trimmed() {
        let config = Config::from_vars(vars(&[(
            "SELECTED_FEATURES",
            "protein, fat ,, carbohydrate",
        )]))
        .unwrap();
        assert_eq!(config.selected_features, vec!["protein", "fat", "carbohydrate"]);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_vars(vars(&[
            ("PORT", "8080"),
            ("DATABASE_URL", "postgres://localhost/food"),
            ("ENGINE_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/food"));
        assert_eq!(config.engine_timeout_secs, 5);
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        assert!(Config::from_vars(vars(&[("PORT", "not-a-port")])).is_err());
    }
}
