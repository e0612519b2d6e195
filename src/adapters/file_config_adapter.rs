//! INI file configuration adapter.

use crate::domain::error::TickerdeckError;
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

#[derive(Debug)]
pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TickerdeckError> {
        let path = path.as_ref();
        let mut config = Ini::new();
        config.load(path).map_err(|reason| TickerdeckError::ConfigParse {
            file: path.display().to_string(),
            reason,
        })?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, TickerdeckError> {
        let mut config = Ini::new();
        config
            .read(content.to_string())
            .map_err(|reason| TickerdeckError::ConfigParse {
                file: "<string>".to_string(),
                reason,
            })?;
        Ok(Self { config })
    }

    fn parse_bool(value: &str) -> Option<bool> {
        match value.trim().to_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Some(true),
            "false" | "no" | "off" | "0" => Some(false),
            _ => None,
        }
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.config
            .getint(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.config
            .getfloat(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.config
            .get(section, key)
            .as_deref()
            .and_then(Self::parse_bool)
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"
[dashboard]
starting_cash = 250000.5
anchor_date = 2024-06-28

[cache]
capacity = 16

[quotes]
enabled = yes
csv_dir = /data/bars
"#;

    #[test]
    fn from_string_parses_sections() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(
            adapter.get_string("dashboard", "anchor_date"),
            Some("2024-06-28".to_string())
        );
        assert_eq!(
            adapter.get_string("quotes", "csv_dir"),
            Some("/data/bars".to_string())
        );
    }

    #[test]
    fn missing_key_or_section_is_none() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(adapter.get_string("dashboard", "missing"), None);
        assert_eq!(adapter.get_string("nowhere", "key"), None);
    }

    #[test]
    fn typed_getters() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(adapter.get_int("cache", "capacity", 0), 16);
        assert_eq!(adapter.get_double("dashboard", "starting_cash", 0.0), 250000.5);
        assert!(adapter.get_bool("quotes", "enabled", false));
    }

    #[test]
    fn typed_getters_fall_back_to_default() {
        let adapter =
            FileConfigAdapter::from_string("[cache]\ncapacity = lots\n[quotes]\nenabled = maybe\n").unwrap();
        assert_eq!(adapter.get_int("cache", "capacity", 32), 32);
        assert_eq!(adapter.get_double("dashboard", "starting_cash", 99.9), 99.9);
        assert!(adapter.get_bool("quotes", "enabled", true));
        assert!(!adapter.get_bool("quotes", "enabled", false));
    }

    #[test]
    fn bool_spellings() {
        let adapter = FileConfigAdapter::from_string(
            "[flags]\na = true\nb = Yes\nc = on\nd = 0\ne = off\nf = FALSE\n",
        )
        .unwrap();
        assert!(adapter.get_bool("flags", "a", false));
        assert!(adapter.get_bool("flags", "b", false));
        assert!(adapter.get_bool("flags", "c", false));
        assert!(!adapter.get_bool("flags", "d", true));
        assert!(!adapter.get_bool("flags", "e", true));
        assert!(!adapter.get_bool("flags", "f", true));
    }

    #[test]
    fn from_file_reads_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[cache]\ncapacity = 4\n").unwrap();
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(adapter.get_int("cache", "capacity", 0), 4);
    }

    #[test]
    fn from_file_missing_is_config_parse_error() {
        let err = FileConfigAdapter::from_file("/nonexistent/path/tickerdeck.ini").unwrap_err();
        assert!(matches!(err, TickerdeckError::ConfigParse { file, .. } if file.contains("tickerdeck.ini")));
    }
}
