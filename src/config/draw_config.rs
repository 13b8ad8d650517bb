use crate::domain::model::{DrawProblem, ForbiddenGroup, Participant, Transaction};
use crate::utils::error::{DrawError, Result};
use crate::utils::validation::{
    validate_known_participants, validate_non_empty_string, validate_positive_number, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Smallest group for which a draw can exist.
pub const MIN_PARTICIPANTS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Toml,
}

impl ConfigFormat {
    /// TOML for `.toml` files, YAML otherwise.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match path.as_ref().extension().and_then(|ext| ext.to_str()) {
            Some("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Yaml,
        }
    }

    fn label(self) -> &'static str {
        match self {
            ConfigFormat::Yaml => "YAML",
            ConfigFormat::Toml => "TOML",
        }
    }
}

/// The draw configuration document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DrawConfig {
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub forbidden_groups: Vec<ForbiddenGroup>,
    #[serde(default)]
    pub forbidden_transactions: Vec<Transaction>,
}

impl DrawConfig {
    /// Load from a file, picking the parser from the extension.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let format = ConfigFormat::from_path(&path);
        let content = std::fs::read_to_string(&path).map_err(DrawError::IoError)?;
        tracing::debug!(
            "Read {} bytes of {} configuration from {}",
            content.len(),
            format.label(),
            path.as_ref().display()
        );
        Self::from_str_with_format(&content, format)
    }

    pub fn from_str_with_format(content: &str, format: ConfigFormat) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        match format {
            ConfigFormat::Yaml => serde_yaml::from_str(&processed_content).map_err(|e| {
                DrawError::ConfigParseError {
                    format: format.label().to_string(),
                    message: e.to_string(),
                }
            }),
            ConfigFormat::Toml => toml::from_str(&processed_content).map_err(|e| {
                DrawError::ConfigParseError {
                    format: format.label().to_string(),
                    message: e.to_string(),
                }
            }),
        }
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Self::from_str_with_format(content, ConfigFormat::Yaml)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Self::from_str_with_format(content, ConfigFormat::Toml)
    }

    /// Replace `${VAR}` with the value of the environment variable, leaving
    /// unknown variables untouched.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| DrawError::config(format!("invalid substitution pattern: {}", e)))?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Check that every referenced name is a participant, stopping at the
    /// first problem.
    pub fn validate_config(&self) -> Result<()> {
        validate_positive_number("participants", self.participants.len(), MIN_PARTICIPANTS)?;

        let mut known: HashSet<&str> = HashSet::with_capacity(self.participants.len());
        for (i, name) in self.participants.iter().enumerate() {
            validate_non_empty_string(&format!("participants[{}]", i), name)?;
            if !known.insert(name.as_str()) {
                return Err(DrawError::DuplicateParticipantError { name: name.clone() });
            }
        }

        for (i, group) in self.forbidden_groups.iter().enumerate() {
            validate_known_participants(&format!("forbidden_groups[{}]", i), group, &known)?;
        }

        for (i, transaction) in self.forbidden_transactions.iter().enumerate() {
            validate_known_participants(
                &format!("forbidden_transactions[{}].giver", i),
                [&transaction.giver],
                &known,
            )?;
            validate_known_participants(
                &format!("forbidden_transactions[{}].receiver", i),
                [&transaction.receiver],
                &known,
            )?;
        }

        Ok(())
    }

    /// Validate and hand back the three collections unchanged.
    pub fn into_validated(self) -> Result<(Vec<Participant>, Vec<ForbiddenGroup>, Vec<Transaction>)> {
        self.validate_config()?;
        Ok((
            self.participants,
            self.forbidden_groups,
            self.forbidden_transactions,
        ))
    }

    pub fn into_problem(self) -> Result<DrawProblem> {
        let (participants, forbidden_groups, forbidden_transactions) = self.into_validated()?;
        Ok(DrawProblem::new(
            participants,
            forbidden_groups,
            forbidden_transactions,
        ))
    }
}

impl Validate for DrawConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    const FAMILY_YAML: &str = r#"
participants:
  - Alice
  - Bob
  - Carol
  - Dave
forbidden_groups:
  - [Alice, Bob]
forbidden_transactions:
  - giver: Carol
    receiver: Dave
"#;

    #[test]
    fn test_parse_yaml_config() {
        let config = DrawConfig::from_yaml_str(FAMILY_YAML).unwrap();

        assert_eq!(config.participants, vec!["Alice", "Bob", "Carol", "Dave"]);
        assert_eq!(config.forbidden_groups, vec![vec!["Alice", "Bob"]]);
        assert_eq!(
            config.forbidden_transactions,
            vec![Transaction::new("Carol", "Dave")]
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_toml_config() {
        let toml_content = r#"
participants = ["Alice", "Bob", "Carol"]
forbidden_groups = [["Alice", "Bob"]]

[[forbidden_transactions]]
giver = "Carol"
receiver = "Alice"
"#;

        let config = DrawConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.participants.len(), 3);
        assert_eq!(
            config.forbidden_transactions,
            vec![Transaction::new("Carol", "Alice")]
        );
    }

    #[test]
    fn test_optional_sections_default_to_empty() {
        let config = DrawConfig::from_yaml_str("participants: [Ann, Ben]").unwrap();
        assert!(config.forbidden_groups.is_empty());
        assert!(config.forbidden_transactions.is_empty());
    }

    #[test]
    fn test_schema_violations_are_rejected() {
        let unknown_key = "participants: [Ann, Ben]\nforbidden_pairs: []\n";
        assert!(matches!(
            DrawConfig::from_yaml_str(unknown_key),
            Err(DrawError::ConfigParseError { .. })
        ));

        let missing_receiver = "participants: [Ann, Ben]\nforbidden_transactions:\n  - giver: Ann\n";
        assert!(matches!(
            DrawConfig::from_yaml_str(missing_receiver),
            Err(DrawError::ConfigParseError { .. })
        ));

        let groups_not_lists = "participants: [Ann, Ben]\nforbidden_groups: [Ann]\n";
        assert!(DrawConfig::from_yaml_str(groups_not_lists).is_err());
    }

    #[test]
    fn test_unknown_name_in_group() {
        let yaml = "participants: [Ann, Ben, Cat]\nforbidden_groups:\n  - [Ann, Ben]\n  - [Cat, Zed]\n";
        let err = DrawConfig::from_yaml_str(yaml)
            .unwrap()
            .validate()
            .unwrap_err();

        match &err {
            DrawError::UnknownParticipantError { name, context } => {
                assert_eq!(name, "Zed");
                assert_eq!(context, "forbidden_groups[1]");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(err.to_string().contains("Zed"));
    }

    #[test]
    fn test_unknown_name_in_transaction() {
        let yaml = "participants: [Ann, Ben]\nforbidden_transactions:\n  - giver: Ann\n    receiver: Bem\n";
        let err = DrawConfig::from_yaml_str(yaml)
            .unwrap()
            .validate()
            .unwrap_err();

        match err {
            DrawError::UnknownParticipantError { name, context } => {
                assert_eq!(name, "Bem");
                assert_eq!(context, "forbidden_transactions[0].receiver");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_edge_case_participant_lists() {
        let single = DrawConfig::from_yaml_str("participants: [Ann]").unwrap();
        assert!(matches!(
            single.validate(),
            Err(DrawError::InvalidConfigValueError { .. })
        ));

        let empty = DrawConfig::from_yaml_str("participants: []").unwrap();
        assert!(empty.validate().is_err());

        let duplicate = DrawConfig::from_yaml_str("participants: [Ann, Ben, Ann]").unwrap();
        assert!(matches!(
            duplicate.validate(),
            Err(DrawError::DuplicateParticipantError { ref name }) if name == "Ann"
        ));

        let blank = DrawConfig::from_yaml_str("participants: [Ann, '  ']").unwrap();
        assert!(blank.validate().is_err());
    }

    #[test]
    fn test_into_validated_returns_collections_unchanged() {
        let config = DrawConfig::from_yaml_str(FAMILY_YAML).unwrap();
        let (participants, groups, transactions) = config.clone().into_validated().unwrap();

        assert_eq!(participants, config.participants);
        assert_eq!(groups, config.forbidden_groups);
        assert_eq!(transactions, config.forbidden_transactions);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("GIFT_DRAW_TEST_GUEST", "Zoe");

        let config =
            DrawConfig::from_yaml_str("participants: [Ann, \"${GIFT_DRAW_TEST_GUEST}\"]").unwrap();
        assert_eq!(config.participants, vec!["Ann", "Zoe"]);

        std::env::remove_var("GIFT_DRAW_TEST_GUEST");
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = Builder::new().suffix(".yml").tempfile().unwrap();
        temp_file.write_all(FAMILY_YAML.as_bytes()).unwrap();

        let problem = DrawConfig::from_file(temp_file.path())
            .unwrap()
            .into_problem()
            .unwrap();
        assert_eq!(problem.len(), 4);
        assert!(!problem.allows(0, 1));
        assert!(!problem.allows(2, 3));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(ConfigFormat::from_path("config.yml"), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path("config.yaml"), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path("draw.toml"), ConfigFormat::Toml);
    }
}
