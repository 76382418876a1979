use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub supabase: SupabaseConfig,
    #[serde(default)]
    pub whatsapp: WhatsAppConfig,
    #[serde(default)]
    pub app: AppConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expires_in: i64, // seconds
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupabaseConfig {
    pub url: String,
    pub service_role_key: String,
    #[serde(default = "default_photo_bucket")]
    pub photo_bucket: String,
}

/// No `api_key` means welcome messages are skipped
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhatsAppConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_whatsapp_api_url")]
    pub api_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the parent-facing front end, used to build invite and dashboard links
    #[serde(default = "default_frontend_base_url")]
    pub frontend_base_url: String,
}

fn default_photo_bucket() -> String {
    "event_photos".to_string()
}

fn default_whatsapp_api_url() -> String {
    "https://your-whatsapp-api-provider.com/send".to_string()
}

fn default_frontend_base_url() -> String {
    "http://localhost:3000".to_string()
}

impl Default for WhatsAppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: default_whatsapp_api_url(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            frontend_base_url: default_frontend_base_url(),
        }
    }
}

impl AppConfig {
    pub fn invite_link(&self, token: &str) -> String {
        format!(
            "{}/cadastro/{}",
            self.frontend_base_url.trim_end_matches('/'),
            token
        )
    }

    pub fn client_dashboard_link(&self) -> String {
        format!(
            "{}/client/dashboard",
            self.frontend_base_url.trim_end_matches('/')
        )
    }
}

impl Config {
    pub fn from_toml() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        // Without a config file everything comes from the environment
        let config_result = std::fs::read_to_string(&config_path);

        let mut config: Config = match config_result {
            Ok(config_str) => toml::from_str(&config_str)
                .map_err(|e| format!("Failed to parse config file: {e}"))?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                fn get_env(name: &str) -> Option<String> {
                    env::var(name).ok()
                }
                fn get_env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
                    env::var(name)
                        .ok()
                        .and_then(|v| v.parse::<T>().ok())
                        .unwrap_or(default)
                }

                let database_url = get_env("DATABASE_URL")
                    .ok_or("DATABASE_URL is not set and config.toml was not found")?;

                Config {
                    server: ServerConfig {
                        host: get_env("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                        port: get_env_parse("SERVER_PORT", 8080u16),
                    },
                    database: DatabaseConfig {
                        url: database_url,
                        max_connections: get_env_parse("DB_MAX_CONNECTIONS", 10u32),
                    },
                    jwt: JwtConfig {
                        secret: get_env("JWT_SECRET")
                            .unwrap_or_else(|| "change-me-in-production".to_string()),
                        access_token_expires_in: get_env_parse("JWT_ACCESS_EXPIRES_IN", 7200i64),
                    },
                    supabase: SupabaseConfig {
                        url: get_env("SUPABASE_URL").unwrap_or_default(),
                        service_role_key: get_env("SUPABASE_SERVICE_ROLE_KEY").unwrap_or_default(),
                        photo_bucket: get_env("SUPABASE_PHOTO_BUCKET")
                            .unwrap_or_else(default_photo_bucket),
                    },
                    whatsapp: WhatsAppConfig {
                        api_key: get_env("WHATSAPP_API_KEY"),
                        api_url: get_env("WHATSAPP_API_URL")
                            .unwrap_or_else(default_whatsapp_api_url),
                    },
                    app: AppConfig {
                        frontend_base_url: get_env("FRONTEND_BASE_URL")
                            .unwrap_or_else(default_frontend_base_url),
                    },
                }
            }
            Err(e) => {
                return Err(format!("Failed to read config file {config_path}: {e}").into());
            }
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Environment variables win over file values
    fn apply_env_overrides(&mut self) {
        if let Ok(v) = env::var("SERVER_HOST") {
            self.server.host = v;
        }
        if let Ok(v) = env::var("SERVER_PORT")
            && let Ok(p) = v.parse()
        {
            self.server.port = p;
        }
        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = v;
        }
        if let Ok(v) = env::var("DB_MAX_CONNECTIONS")
            && let Ok(mc) = v.parse()
        {
            self.database.max_connections = mc;
        }
        if let Ok(v) = env::var("JWT_SECRET") {
            self.jwt.secret = v;
        }
        if let Ok(v) = env::var("JWT_ACCESS_EXPIRES_IN")
            && let Ok(n) = v.parse()
        {
            self.jwt.access_token_expires_in = n;
        }
        if let Ok(v) = env::var("SUPABASE_URL") {
            self.supabase.url = v;
        }
        if let Ok(v) = env::var("SUPABASE_SERVICE_ROLE_KEY") {
            self.supabase.service_role_key = v;
        }
        if let Ok(v) = env::var("SUPABASE_PHOTO_BUCKET") {
            self.supabase.photo_bucket = v;
        }
        if let Ok(v) = env::var("WHATSAPP_API_KEY") {
            self.whatsapp.api_key = Some(v).filter(|k| !k.is_empty());
        }
        if let Ok(v) = env::var("WHATSAPP_API_URL") {
            self.whatsapp.api_url = v;
        }
        if let Ok(v) = env::var("FRONTEND_BASE_URL") {
            self.app.frontend_base_url = v;
        }
    }
}
