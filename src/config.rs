//! Settings read from the environment (and `.env`, loaded in `main`).

/// Default cap on routes accepted by the CGI page.
pub const DEFAULT_MAX_WEB_ROUTES: usize = 50;
/// Default log4rs configuration file.
pub const DEFAULT_LOG_CONFIG: &str = "log4rs.yml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// `ACRS_MAX_WEB_ROUTES`
    pub max_web_routes: usize,
    /// `ACRS_LOG_CONFIG`
    pub log_config: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_web_routes: DEFAULT_MAX_WEB_ROUTES,
            log_config: DEFAULT_LOG_CONFIG.to_string(),
        }
    }
}

impl Config {
    /// Settings from the process environment, plus a warning for every
    /// value that fell back to its default.
    ///
    /// Config is read before logging is up, so the warnings are returned for
    /// the caller to log once it is.
    pub fn from_env() -> (Self, Vec<String>) {
        Config::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup, falling back to defaults for missing or
    /// unparseable values.
    pub fn from_lookup<F>(lookup: F) -> (Self, Vec<String>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();
        let mut warnings = Vec::new();

        if let Some(raw) = lookup("ACRS_MAX_WEB_ROUTES") {
            match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => config.max_web_routes = n,
                _ => warnings.push(format!(
                    "ACRS_MAX_WEB_ROUTES={raw:?} is not a positive number, using {}",
                    DEFAULT_MAX_WEB_ROUTES
                )),
            }
        }
        if let Some(path) = lookup("ACRS_LOG_CONFIG") {
            if !path.trim().is_empty() {
                config.log_config = path;
            }
        }

        (config, warnings)
    }
}
