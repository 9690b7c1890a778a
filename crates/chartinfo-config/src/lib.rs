use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Resolved settings for the chart service.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartdSettings {
    pub bind: String,
    pub port: u16,
    /// Directory served for paths without a handler
    pub static_dir: Option<PathBuf>,
    /// Default `env_logger` filter; `RUST_LOG` wins when set
    pub log_filter: String,
    /// Explicit Swiss Ephemeris data directory
    pub ephemeris_path: Option<PathBuf>,
    /// Use the built-in Moshier model instead of data files
    pub moshier: bool,
    pub transform_program: String,
}

impl Default for ChartdSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
            static_dir: None,
            log_filter: default_log_filter(),
            ephemeris_path: None,
            moshier: false,
            transform_program: default_transform_program(),
        }
    }
}

impl ChartdSettings {
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RootConfigToml {
    #[serde(default)]
    server: ServerToml,
    #[serde(default)]
    ephemeris: EphemerisToml,
    #[serde(default)]
    transform: TransformToml,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct ServerToml {
    #[serde(default = "default_bind")]
    bind: String,
    #[serde(default = "default_port")]
    port: u16,
    #[serde(default)]
    static_dir: Option<PathBuf>,
    #[serde(default = "default_log_filter")]
    log_filter: String,
}

impl Default for ServerToml {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
            static_dir: None,
            log_filter: default_log_filter(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct EphemerisToml {
    #[serde(default)]
    path: Option<PathBuf>,
    #[serde(default)]
    moshier: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct TransformToml {
    #[serde(default = "default_transform_program")]
    program: String,
}

impl Default for TransformToml {
    fn default() -> Self {
        Self {
            program: default_transform_program(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_filter() -> String {
    "info".to_string()
}

fn default_transform_program() -> String {
    "xsltproc".to_string()
}

/// `$CHARTD_CONFIG` must exist when set; otherwise try the usual relative
/// locations of `configs/chartd.toml` and fall back to defaults.
pub fn read_config_toml_text() -> anyhow::Result<Option<String>> {
    if let Ok(path) = env::var("CHARTD_CONFIG") {
        let text = fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Could not read CHARTD_CONFIG {path}: {e}"))?;
        return Ok(Some(text));
    }

    let paths = ["configs/chartd.toml", "../../configs/chartd.toml"];
    for p in &paths {
        if let Ok(c) = fs::read_to_string(p) {
            return Ok(Some(c));
        }
    }
    Ok(None)
}

pub fn parse_settings(text: &str) -> anyhow::Result<ChartdSettings> {
    let root: RootConfigToml =
        toml::from_str(text).map_err(|e| anyhow::anyhow!("Failed to parse chartd.toml: {e}"))?;
    let RootConfigToml {
        server,
        ephemeris,
        transform,
    } = root;
    Ok(ChartdSettings {
        bind: server.bind,
        port: server.port,
        static_dir: server.static_dir,
        log_filter: server.log_filter,
        ephemeris_path: ephemeris.path,
        moshier: ephemeris.moshier,
        transform_program: transform.program,
    })
}

/// Apply `PORT`, `SWISS_EPHEMERIS_PATH` and `CHARTD_STATIC_DIR` from `lookup`.
pub fn apply_env_overrides(
    mut settings: ChartdSettings,
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<ChartdSettings> {
    if let Some(port) = lookup("PORT").filter(|p| !p.is_empty()) {
        settings.port = port
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid PORT {port:?}: {e}"))?;
    }
    if let Some(path) = lookup("SWISS_EPHEMERIS_PATH").filter(|p| !p.is_empty()) {
        settings.ephemeris_path = Some(PathBuf::from(path));
    }
    if let Some(dir) = lookup("CHARTD_STATIC_DIR").filter(|d| !d.is_empty()) {
        settings.static_dir = Some(PathBuf::from(dir));
    }
    Ok(settings)
}

pub fn load_settings() -> anyhow::Result<ChartdSettings> {
    let settings = match read_config_toml_text()? {
        Some(text) => parse_settings(&text)?,
        None => ChartdSettings::default(),
    };
    apply_env_overrides(settings, |key| env::var(key).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_parse_full_config() {
        let settings = parse_settings(
            r#"
            [server]
            bind = "127.0.0.1"
            port = 9000
            static_dir = "public"
            log_filter = "debug"

            [ephemeris]
            path = "/opt/swisseph"
            moshier = true

            [transform]
            program = "/usr/bin/xsltproc"
            "#,
        )
        .unwrap();

        assert_eq!(settings.listen_addr(), "127.0.0.1:9000");
        assert_eq!(settings.static_dir, Some(PathBuf::from("public")));
        assert_eq!(settings.log_filter, "debug");
        assert_eq!(settings.ephemeris_path, Some(PathBuf::from("/opt/swisseph")));
        assert!(settings.moshier);
        assert_eq!(settings.transform_program, "/usr/bin/xsltproc");
    }

    #[test]
    fn test_empty_config_gives_defaults() {
        assert_eq!(parse_settings("").unwrap(), ChartdSettings::default());
        let settings = parse_settings("[server]\nport = 3000\n").unwrap();
        assert_eq!(settings.port, 3000);
        assert_eq!(settings.bind, "0.0.0.0");
        assert_eq!(settings.transform_program, "xsltproc");
        assert!(!settings.moshier);
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        assert!(parse_settings("[server]\nport = \"eighty\"\n").is_err());
        assert!(parse_settings("[server]\nprot = 80\n").is_err());
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("PORT", "5050"),
            ("SWISS_EPHEMERIS_PATH", "/data/ephe"),
            ("CHARTD_STATIC_DIR", "/srv/www"),
        ]
        .into_iter()
        .collect();
        let settings =
            apply_env_overrides(ChartdSettings::default(), |key| vars.get(key).map(|v| v.to_string())).unwrap();

        assert_eq!(settings.port, 5050);
        assert_eq!(settings.ephemeris_path, Some(PathBuf::from("/data/ephe")));
        assert_eq!(settings.static_dir, Some(PathBuf::from("/srv/www")));
    }

    #[test]
    fn test_empty_port_is_ignored_and_bad_port_fails() {
        let settings = apply_env_overrides(ChartdSettings::default(), |key| {
            (key == "PORT").then(|| String::new())
        })
        .unwrap();
        assert_eq!(settings.port, 8080);

        let result = apply_env_overrides(ChartdSettings::default(), |key| {
            (key == "PORT").then(|| "http".to_string())
        });
        assert!(result.is_err());
    }
}
