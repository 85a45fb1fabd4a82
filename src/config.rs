use serde::Deserialize;

/// Which upstream metadata provider a deployment forwards to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Tmdb,
    Omdb,
}

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Provider backing this deployment
    #[serde(default = "default_movie_provider")]
    pub movie_provider: ProviderKind,

    /// TMDB v3 API key, sent as a query parameter
    pub tmdb_api_key: Option<String>,

    /// TMDB v4 read access token, sent as a bearer header
    pub tmdb_access_token: Option<String>,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// OMDB API key; absence degrades OMDB-backed routes rather than
    /// preventing startup
    pub omdb_api_key: Option<String>,

    /// OMDB API base URL
    #[serde(default = "default_omdb_api_url")]
    pub omdb_api_url: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_movie_provider() -> ProviderKind {
    ProviderKind::Tmdb
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_omdb_api_url() -> String {
    "https://www.omdbapi.com".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied() {
        let config: Config = envy::from_iter(Vec::<(String, String)>::new()).unwrap();

        assert_eq!(config.movie_provider, ProviderKind::Tmdb);
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.tmdb_api_url, "https://api.themoviedb.org/3");
        assert_eq!(config.omdb_api_url, "https://www.omdbapi.com");
        assert!(config.tmdb_api_key.is_none());
        assert!(config.omdb_api_key.is_none());
    }

    #[test]
    fn test_provider_selection_from_env() {
        let config: Config = envy::from_iter(vec![
            ("MOVIE_PROVIDER".to_string(), "omdb".to_string()),
            ("OMDB_API_KEY".to_string(), "abc123".to_string()),
            ("PORT".to_string(), "9090".to_string()),
        ])
        .unwrap();

        assert_eq!(config.movie_provider, ProviderKind::Omdb);
        assert_eq!(config.omdb_api_key.as_deref(), Some("abc123"));
        assert_eq!(config.port, 9090);
    }
}
