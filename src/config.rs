use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub frontend_url: String,

    pub jwt_secret: String,
    pub jwt_access_ttl_secs: i64,
    pub jwt_refresh_ttl_secs: i64,

    /// Path of the single persisted draft file (the client-storage analog).
    pub draft_path: String,

    /// Populate the store with the mock dataset on startup.
    pub seed_data: bool,

    /// Fixed artificial delay applied to mock operations (mood save, community
    /// post, export). Zero disables it.
    pub mock_latency_ms: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()
                .expect("PORT must be a number"),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".into()),

            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            jwt_access_ttl_secs: env::var("JWT_ACCESS_TTL_SECS")
                .unwrap_or_else(|_| "900".into())
                .parse()
                .expect("JWT_ACCESS_TTL_SECS must be a number"),
            jwt_refresh_ttl_secs: env::var("JWT_REFRESH_TTL_SECS")
                .unwrap_or_else(|_| "604800".into())
                .parse()
                .expect("JWT_REFRESH_TTL_SECS must be a number"),

            draft_path: env::var("DRAFT_PATH").unwrap_or_else(|_| "./data/cbt-draft.json".into()),

            seed_data: env::var("SEED_DATA")
                .unwrap_or_else(|_| "true".into())
                .parse()
                .unwrap_or(true),

            mock_latency_ms: env::var("MOCK_LATENCY_MS")
                .unwrap_or_else(|_| "0".into())
                .parse()
                .unwrap_or(0),
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
