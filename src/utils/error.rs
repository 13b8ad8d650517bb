use thiserror::Error;

#[derive(Error, Debug)]
pub enum DrawError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Bad configuration: {message}")]
    ConfigError { message: String },

    #[error("Bad configuration: could not parse {format} document: {message}")]
    ConfigParseError { format: String, message: String },

    #[error("Bad configuration: {name} is mentioned in {context}, but this person is not one of the participants")]
    UnknownParticipantError { name: String, context: String },

    #[error("Bad configuration: {name} is listed more than once in participants")]
    DuplicateParticipantError { name: String },

    #[error("Bad configuration: invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("No solution exists: {checked} permutations of {participants} participants were checked")]
    NoSolutionError { participants: usize, checked: u64 },

    #[error("No valid draw found after {attempts} random attempts")]
    RetriesExhaustedError { attempts: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Search,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DrawError {
    pub fn config(message: impl Into<String>) -> Self {
        DrawError::ConfigError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            DrawError::IoError(_)
            | DrawError::ConfigError { .. }
            | DrawError::ConfigParseError { .. }
            | DrawError::UnknownParticipantError { .. }
            | DrawError::DuplicateParticipantError { .. }
            | DrawError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            DrawError::NoSolutionError { .. } | DrawError::RetriesExhaustedError { .. } => {
                ErrorCategory::Search
            }
            DrawError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Search => ErrorSeverity::Medium,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            DrawError::IoError(e) => format!("ERROR : could not read the configuration file ({})", e),
            DrawError::NoSolutionError { .. } => {
                "No solution exists: the constraints leave no valid gift assignment".to_string()
            }
            DrawError::RetriesExhaustedError { attempts } => format!(
                "Gave up after {} random attempts without finding a valid assignment",
                attempts
            ),
            other => format!("ERROR : {}", other),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            DrawError::IoError(_) => "Check that the configuration file exists and is readable",
            DrawError::SerializationError(_) => "Retry without --json",
            DrawError::ConfigError { .. } | DrawError::InvalidConfigValueError { .. } => {
                "Fix the configuration value and run again"
            }
            DrawError::ConfigParseError { .. } => {
                "Make sure the file only contains participants, forbidden_groups and forbidden_transactions"
            }
            DrawError::UnknownParticipantError { .. } => {
                "Check the spelling of the name or add the person to participants"
            }
            DrawError::DuplicateParticipantError { .. } => "Give every participant a unique name",
            DrawError::NoSolutionError { .. } => {
                "Relax the forbidden groups or forbidden transactions"
            }
            DrawError::RetriesExhaustedError { .. } => {
                "Raise --max-attempts or use --strategy exhaustive to check whether a solution exists"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, DrawError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_participant_message_names_identifier() {
        let err = DrawError::UnknownParticipantError {
            name: "Zoe".to_string(),
            context: "forbidden_groups[0]".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("Zoe"));
        assert!(message.contains("forbidden_groups[0]"));
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_search_errors_have_distinct_exit_code() {
        let no_solution = DrawError::NoSolutionError {
            participants: 3,
            checked: 6,
        };
        let exhausted = DrawError::RetriesExhaustedError { attempts: 10 };
        assert_eq!(no_solution.category(), ErrorCategory::Search);
        assert_eq!(no_solution.exit_code(), 2);
        assert_eq!(exhausted.exit_code(), 2);
        assert!(no_solution.user_friendly_message().starts_with("No solution exists"));
    }
}
