use nutrinote_engine::{FoodTable, Goals, NutrientVector, TagConfig};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to read food table at {foods_path}: {source}")]
    FoodsReadError {
        foods_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse food table at {foods_path}: {source}")]
    FoodsParseError {
        foods_path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foods_path: Option<PathBuf>,
    pub tags: TagConfig,
    pub goals: Goals,
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the food table path
        config.foods_path = config
            .foods_path
            .map(|path| Self::expand_path(&path).unwrap_or(path));

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/nutrinote");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Loads the configured food table, or an empty one when none is set.
    pub fn food_table(&self) -> Result<FoodTable, ConfigError> {
        match &self.foods_path {
            Some(path) => load_food_table(path),
            None => Ok(FoodTable::new()),
        }
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

/// Reads a TOML food table: one table per food, keyed by name, holding
/// nutrient values per 100 grams-equivalent.
///
/// ```toml
/// [Bread]
/// calories = 290
/// protein = 9
/// serving_size = 35
/// ```
pub fn load_food_table<P: AsRef<Path>>(foods_path: P) -> Result<FoodTable, ConfigError> {
    let foods_path = foods_path.as_ref();
    let content =
        std::fs::read_to_string(foods_path).map_err(|source| ConfigError::FoodsReadError {
            foods_path: foods_path.to_path_buf(),
            source,
        })?;
    parse_food_table(&content).map_err(|source| ConfigError::FoodsParseError {
        foods_path: foods_path.to_path_buf(),
        source,
    })
}

fn parse_food_table(content: &str) -> Result<FoodTable, toml::de::Error> {
    let foods: BTreeMap<String, NutrientVector> = toml::from_str(content)?;
    Ok(foods.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nutrinote_engine::{CalorieProvider, NutrientKey, NutrientNameProvider};
    use pretty_assertions::assert_eq;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        // Should not contain tilde anymore
        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/nutrinote/config.toml"));
    }

    #[test]
    fn test_defaults_when_sections_missing() {
        let config: Config = toml::from_str("").unwrap();

        assert_eq!(config.tags, TagConfig::default());
        assert!(config.goals.is_empty());
        assert_eq!(config.foods_path, None);
    }

    #[test]
    fn test_partial_tags_keep_other_default() {
        let config: Config = toml::from_str("[tags]\nfood = \"meal\"\n").unwrap();

        assert_eq!(config.tags.food, "meal");
        assert_eq!(config.tags.workout, "workout");
    }

    #[test]
    fn test_goals_parse_by_nutrient_name() {
        let config_content = r#"
[goals]
calories = 2200
protein = 140.5
saturated_fats = 20
"#;
        let config: Config = toml::from_str(config_content).unwrap();

        assert_eq!(config.goals.get(&NutrientKey::Calories), Some(&2200.0));
        assert_eq!(config.goals.get(&NutrientKey::Protein), Some(&140.5));
        assert_eq!(config.goals.get(&NutrientKey::SaturatedFats), Some(&20.0));
    }

    #[test]
    fn test_unknown_goal_key_is_an_error() {
        let result: Result<Config, _> = toml::from_str("[goals]\nvitamins = 3\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let original = Config {
            tags: TagConfig::new("ate", "gym"),
            goals: Goals::from([(NutrientKey::Calories, 1800.0)]),
            foods_path: Some(PathBuf::from("/tmp/foods.toml")),
        };

        let toml_str = toml::to_string(&original).unwrap();
        let deserialized: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_expand_path_with_env_var() {
        unsafe {
            env::set_var("NUTRINOTE_TEST_VAR", "/test/env/path");
        }

        let path = PathBuf::from("$NUTRINOTE_TEST_VAR/foods.toml");
        let expanded = Config::expand_path(&path);

        assert_eq!(expanded, Some(PathBuf::from("/test/env/path/foods.toml")));

        unsafe {
            env::remove_var("NUTRINOTE_TEST_VAR");
        }
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_load_config_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "[tags\nfood = ").unwrap();

        let result = Config::load_from_path(&config_file);

        assert!(matches!(result, Err(ConfigError::ConfigParseError { .. })));
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested").join("config.toml");
        let test_config = Config {
            tags: TagConfig::default(),
            goals: Goals::from([(NutrientKey::Fiber, 30.0)]),
            foods_path: None,
        };

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }

    #[test]
    fn test_load_food_table() {
        let temp_dir = TempDir::new().unwrap();
        let foods_file = temp_dir.path().join("foods.toml");
        std::fs::write(
            &foods_file,
            r#"
[Bread]
calories = 290
protein = 9
serving_size = 35

["Peanut Butter"]
calories = 588
fats = 50
"#,
        )
        .unwrap();

        let config = Config {
            foods_path: Some(foods_file),
            ..Config::default()
        };
        let table = config.food_table().unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.calories_for_food("bread"), Some(290.0));
        assert_eq!(table.serving_size("Bread"), Some(35.0));
        assert_eq!(table.nutrient_names(), vec!["Bread", "Peanut Butter"]);
    }

    #[test]
    fn test_missing_food_table_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let result = load_food_table(temp_dir.path().join("missing.toml"));

        assert!(matches!(result, Err(ConfigError::FoodsReadError { .. })));
    }

    #[test]
    fn test_no_food_table_configured_is_empty() {
        let table = Config::default().food_table().unwrap();
        assert!(table.is_empty());
    }
}
