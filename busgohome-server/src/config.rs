//! Server configuration from environment variables.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use crate::planner::{CostMode, PlannerConfig};

/// Error from reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value for {variable}: {value:?} ({reason})")]
pub struct ConfigError {
    pub variable: &'static str,
    pub value: String,
    pub reason: &'static str,
}

/// Runtime configuration for the server binary.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Directory holding the JSON route data files.
    pub data_dir: PathBuf,

    /// Address to listen on.
    pub addr: SocketAddr,

    /// Rebuild the route snapshot from disk this often, if set.
    pub reload_interval: Option<Duration>,

    pub planner: PlannerConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 8080),
            reload_interval: None,
            planner: PlannerConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Read configuration from the process environment.
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `BUSGOHOME_DATA_DIR` | `data` |
    /// | `BUSGOHOME_HOST` | `127.0.0.1` |
    /// | `PORT` | `8080` |
    /// | `BUSGOHOME_RELOAD_SECS` | unset |
    /// | `BUSGOHOME_SOLVE_TIMEOUT_MS` | `2000` |
    /// | `BUSGOHOME_ASTAR` | `false` |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through a variable lookup function.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let data_dir = lookup("BUSGOHOME_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);

        let host = match lookup("BUSGOHOME_HOST") {
            Some(value) => parse_var("BUSGOHOME_HOST", value, "not an IP address")?,
            None => defaults.addr.ip(),
        };
        let port = match lookup("PORT") {
            Some(value) => parse_var("PORT", value, "not a port number")?,
            None => defaults.addr.port(),
        };

        let reload_interval = match lookup("BUSGOHOME_RELOAD_SECS") {
            Some(value) => {
                let secs: u64 = parse_var("BUSGOHOME_RELOAD_SECS", value.clone(), "not a whole number of seconds")?;
                if secs == 0 {
                    return Err(ConfigError {
                        variable: "BUSGOHOME_RELOAD_SECS",
                        value,
                        reason: "must be positive",
                    });
                }
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        let solve_timeout = match lookup("BUSGOHOME_SOLVE_TIMEOUT_MS") {
            Some(value) => Duration::from_millis(parse_var(
                "BUSGOHOME_SOLVE_TIMEOUT_MS",
                value,
                "not a whole number of milliseconds",
            )?),
            None => defaults.planner.solve_timeout,
        };

        let use_heuristic = match lookup("BUSGOHOME_ASTAR") {
            Some(value) => parse_bool("BUSGOHOME_ASTAR", value)?,
            None => defaults.planner.use_heuristic,
        };

        Ok(Self {
            data_dir,
            addr: SocketAddr::new(host, port),
            reload_interval,
            planner: PlannerConfig::new(solve_timeout, use_heuristic, CostMode::Fastest),
        })
    }
}

fn parse_var<T: std::str::FromStr>(
    variable: &'static str,
    value: String,
    reason: &'static str,
) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError {
        variable,
        value,
        reason,
    })
}

fn parse_bool(variable: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError {
            variable,
            value,
            reason: "not a boolean",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = from(&[]).unwrap();

        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.reload_interval, None);
        assert_eq!(config.planner.solve_timeout, Duration::from_millis(2000));
    }

    #[test]
    fn reads_all_variables() {
        let config = from(&[
            ("BUSGOHOME_DATA_DIR", "/srv/lta"),
            ("BUSGOHOME_HOST", "0.0.0.0"),
            ("PORT", "3000"),
            ("BUSGOHOME_RELOAD_SECS", "600"),
            ("BUSGOHOME_SOLVE_TIMEOUT_MS", "250"),
            ("BUSGOHOME_ASTAR", "true"),
        ])
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/srv/lta"));
        assert_eq!(config.addr.to_string(), "0.0.0.0:3000");
        assert_eq!(config.reload_interval, Some(Duration::from_secs(600)));
        assert_eq!(config.planner.solve_timeout, Duration::from_millis(250));
        assert!(config.planner.use_heuristic);
    }

    #[test]
    fn rejects_bad_port() {
        let err = from(&[("PORT", "eighty")]).unwrap_err();
        assert_eq!(err.variable, "PORT");
        assert_eq!(err.value, "eighty");
    }

    #[test]
    fn rejects_zero_reload_interval() {
        let err = from(&[("BUSGOHOME_RELOAD_SECS", "0")]).unwrap_err();
        assert_eq!(err.reason, "must be positive");
    }

    #[test]
    fn rejects_bad_bool() {
        assert!(from(&[("BUSGOHOME_ASTAR", "maybe")]).is_err());
        assert!(!from(&[("BUSGOHOME_ASTAR", "off")]).unwrap().planner.use_heuristic);
    }

    #[test]
    fn error_message_names_variable() {
        let err = from(&[("BUSGOHOME_HOST", "localhost:1")]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid value for BUSGOHOME_HOST: \"localhost:1\" (not an IP address)"
        );
    }
}
