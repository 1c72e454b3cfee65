use anyhow::{Context, Result};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use tally_core::parse_timezone;
use tally_finance::{KeywordRule, KeywordTable, seed};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralSection,
    pub classifier: ClassifierSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSection {
    /// IANA zone used for month boundaries and plain `YYYY-MM-DD` dates
    pub timezone: String,
    pub default_account: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierSection {
    /// Replaces the built-in table when non-empty
    pub rules: Vec<KeywordRule>,
    /// Appended to whichever table is active
    pub extra: Vec<KeywordRule>,
}

impl Default for GeneralSection {
    fn default() -> Self {
        Self {
            timezone: "America/Toronto".to_string(),
            default_account: seed::CHEQUING.to_string(),
        }
    }
}

impl Config {
    pub fn timezone(&self) -> Result<Tz> {
        parse_timezone(&self.general.timezone).context("general.timezone")
    }

    pub fn keyword_table(&self) -> Result<KeywordTable> {
        let mut table = if self.classifier.rules.is_empty() {
            KeywordTable::default()
        } else {
            KeywordTable::new(self.classifier.rules.clone()).context("classifier.rules")?
        };

        for rule in &self.classifier.extra {
            table
                .extend(rule.category, rule.keywords.iter().cloned())
                .context("classifier.extra")?;
        }
        Ok(table)
    }
}

/// Outcome of `tally config init`.
#[derive(Debug, PartialEq, Eq)]
pub enum InitOutcome {
    Written,
    AlreadyExists,
}

impl Config {
    /// Reads `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(err) => return Err(err).with_context(|| format!("read {}", path.display())),
        };
        let cfg: Self = toml::from_str(&text).with_context(|| format!("parse {}", path.display()))?;
        // Fail at load time rather than on first breakdown.
        cfg.timezone()?;
        cfg.keyword_table()?;
        Ok(cfg)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
        }
        let text = toml::to_string_pretty(self).context("serialize config")?;
        fs::write(path, text).with_context(|| format!("write {}", path.display()))
    }

    /// Writes the defaults to `path` unless a config is already there.
    pub fn init(path: &Path) -> Result<InitOutcome> {
        if path.exists() {
            return Ok(InitOutcome::AlreadyExists);
        }
        Self::default().save(path)?;
        Ok(InitOutcome::Written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::ExpenseCategory;
    use tempfile::TempDir;

    #[test]
    fn test_empty_file_gives_defaults() {
        let cfg: Config = toml::from_str("").unwrap();
        assert_eq!(cfg.general.timezone, "America/Toronto");
        assert_eq!(cfg.keyword_table().unwrap(), KeywordTable::default());
    }

    #[test]
    fn test_rules_replace_and_extra_extends() {
        let cfg: Config = toml::from_str(
            r#"
[general]
timezone = "UTC"

[[classifier.rules]]
category = "food"
keywords = ["pizza"]

[[classifier.extra]]
category = "shopping"
keywords = ["Amazon"]
"#,
        )
        .unwrap();

        let table = cfg.keyword_table().unwrap();
        assert_eq!(table.rules().len(), 2);
        assert_eq!(table.classify_name("Groceries"), ExpenseCategory::Other);
        assert_eq!(table.classify_name("Pizza Pizza"), ExpenseCategory::Food);
        assert_eq!(table.classify_name("AMAZON.CA"), ExpenseCategory::Shopping);
        assert_eq!(cfg.timezone().unwrap(), chrono_tz::UTC);
    }

    #[test]
    fn test_bad_rule_is_reported() {
        let cfg: Config = toml::from_str(
            "[[classifier.extra]]\ncategory = \"other\"\nkeywords = [\"misc\"]\n",
        )
        .unwrap();
        assert!(cfg.keyword_table().is_err());
    }

    #[test]
    fn test_bad_timezone_is_reported() {
        let cfg: Config = toml::from_str("[general]\ntimezone = \"Nowhere/Land\"\n").unwrap();
        assert!(cfg.timezone().is_err());
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = TempDir::new().unwrap();
        let cfg = Config::load(&dir.path().join("config.toml")).unwrap();
        assert_eq!(cfg.general.default_account, seed::CHEQUING);
    }

    #[test]
    fn test_init_writes_once_and_load_reads_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        assert_eq!(Config::init(&path).unwrap(), InitOutcome::Written);
        assert_eq!(Config::init(&path).unwrap(), InitOutcome::AlreadyExists);

        let cfg = Config::load(&path).unwrap();
        assert_eq!(cfg.general.timezone, "America/Toronto");
    }

    #[test]
    fn test_save_preserves_custom_settings() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.general.timezone = "Europe/Paris".into();
        cfg.classifier.extra.push(KeywordRule {
            category: ExpenseCategory::Shopping,
            keywords: vec!["amazon".into()],
        });
        cfg.save(&path).unwrap();

        let back = Config::load(&path).unwrap();
        assert_eq!(back.timezone().unwrap(), chrono_tz::Europe::Paris);
        assert_eq!(back.keyword_table().unwrap().classify_name("Amazon.ca"), ExpenseCategory::Shopping);
    }

    #[test]
    fn test_load_rejects_invalid_settings() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[general]\ntimezone = \"Nowhere/Land\"\n").unwrap();
        assert!(Config::load(&path).is_err());

        fs::write(&path, "not = [toml").unwrap();
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_default_round_trips_through_toml() {
        let s = toml::to_string_pretty(&Config::default()).unwrap();
        let back: Config = toml::from_str(&s).unwrap();
        assert_eq!(back.general.default_account, seed::CHEQUING);
        assert!(back.classifier.rules.is_empty());
    }
}
