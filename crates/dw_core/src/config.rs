use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};
use crate::types::SiteIdentity;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Fetch timeouts as written in config files and on the command line:
/// `30s`, `1m`, `1h15m30s`. A trailing bare number counts as seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HumanDuration(pub Duration);

fn unit_seconds(unit: char) -> Option<u64> {
    match unit {
        's' => Some(1),
        'm' => Some(60),
        'h' => Some(3_600),
        'd' => Some(86_400),
        _ => None,
    }
}

impl FromStr for HumanDuration {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |why: &str| Error::Config(format!("Invalid duration {:?}: {}", s, why));
        let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.is_empty() {
            return Err(invalid("empty"));
        }

        let mut seconds = 0u64;
        let mut rest = compact.as_str();
        while !rest.is_empty() {
            let digits = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
            if digits == 0 {
                return Err(invalid("expected a number"));
            }
            let amount: u64 = rest[..digits].parse().map_err(|_| invalid("number too large"))?;
            rest = &rest[digits..];

            let scale = match rest.chars().next() {
                None => 1,
                Some(unit) => {
                    rest = &rest[unit.len_utf8()..];
                    unit_seconds(unit).ok_or_else(|| invalid(&format!("unknown unit '{}'", unit)))?
                }
            };
            seconds = amount
                .checked_mul(scale)
                .and_then(|part| seconds.checked_add(part))
                .ok_or_else(|| invalid("too long"))?;
        }

        Ok(HumanDuration(Duration::from_secs(seconds)))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub domain: String,
    pub title: String,
    /// Page fetch timeout, e.g. `"1m"`.
    pub timeout: String,
    /// Listen address of the HTTP service.
    pub addr: String,
    /// Reject articles older than this many days. Disabled when unset.
    pub max_age_days: Option<u32>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            domain: "www.dw.com".to_string(),
            title: "DW".to_string(),
            timeout: "1m".to_string(),
            addr: "127.0.0.1:10008".to_string(),
            max_age_days: None,
        }
    }
}

impl SiteConfig {
    pub fn identity(&self) -> SiteIdentity {
        SiteIdentity::new(self.domain.clone(), self.title.clone())
    }

    /// Parsed fetch timeout, one minute when the value can't be parsed.
    pub fn timeout(&self) -> Duration {
        match self.timeout.parse::<HumanDuration>() {
            Ok(HumanDuration(d)) => d,
            Err(e) => {
                warn!("[{}] timeout init error: {}", self.title, e);
                DEFAULT_TIMEOUT
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub root_path: PathBuf,
    pub db_path: PathBuf,
    pub site: SiteConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_path: PathBuf::from("."),
            db_path: PathBuf::from("db"),
            site: SiteConfig::default(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_json(&data)
    }

    pub fn from_json(data: &str) -> Result<Self> {
        serde_json::from_str(data).map_err(|e| Error::Config(format!("Invalid config: {}", e)))
    }

    pub fn db_file(&self) -> PathBuf {
        self.root_path.join(&self.db_path).join("articles.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_human_duration() {
        assert_eq!("30s".parse::<HumanDuration>().unwrap().0, Duration::from_secs(30));
        assert_eq!("1m".parse::<HumanDuration>().unwrap().0, Duration::from_secs(60));
        assert_eq!(
            "1h15m30s".parse::<HumanDuration>().unwrap().0,
            Duration::from_secs(4530)
        );
        assert_eq!("90".parse::<HumanDuration>().unwrap().0, Duration::from_secs(90));
        assert!("".parse::<HumanDuration>().is_err());
        assert!("5x".parse::<HumanDuration>().is_err());
        assert!("m".parse::<HumanDuration>().is_err());
        assert!(matches!("1h5q".parse::<HumanDuration>(), Err(Error::Config(_))));
        assert_eq!("2m 5s".parse::<HumanDuration>().unwrap().0, Duration::from_secs(125));
        assert!("99999999999999999999d".parse::<HumanDuration>().is_err());
    }

    #[test]
    fn test_timeout_falls_back_to_one_minute() {
        let site = SiteConfig {
            timeout: "soon".to_string(),
            ..SiteConfig::default()
        };
        assert_eq!(site.timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = Config::from_json(r#"{"db_path": "data", "site": {"timeout": "20s"}}"#).unwrap();
        assert_eq!(config.site.domain, "www.dw.com");
        assert_eq!(config.site.timeout(), Duration::from_secs(20));
        assert_eq!(config.db_file(), PathBuf::from("./data/articles.json"));
        assert_eq!(config.site.max_age_days, None);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"site": {{"title": "德国之声", "max_age_days": 3}}}}"#).unwrap();
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.site.title, "德国之声");
        assert_eq!(config.site.max_age_days, Some(3));
        assert_eq!(config.site.identity().title, "德国之声");
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(Config::from_json("{"), Err(Error::Config(_))));
    }
}
