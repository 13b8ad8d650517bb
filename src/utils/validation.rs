use crate::utils::error::{DrawError, Result};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(DrawError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(DrawError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(DrawError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_file_extension(field_name: &str, file: &str, allowed_extensions: &[&str]) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed_extensions.iter().copied().collect();

    match std::path::Path::new(file)
        .extension()
        .and_then(|ext| ext.to_str())
    {
        Some(extension) if allowed_set.contains(extension) => Ok(()),
        Some(extension) => Err(DrawError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: format!(
                "Unsupported file extension: {}. Allowed extensions: {}",
                extension,
                allowed_extensions.join(", ")
            ),
        }),
        None => Err(DrawError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: "File has no extension or invalid filename".to_string(),
        }),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DrawError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Every name in `names` must belong to `participants`.
pub fn validate_known_participants<'a, I>(
    context: &str,
    names: I,
    participants: &HashSet<&str>,
) -> Result<()>
where
    I: IntoIterator<Item = &'a String>,
{
    for name in names {
        if !participants.contains(name.as_str()) {
            return Err(DrawError::UnknownParticipantError {
                name: name.clone(),
                context: context.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("participants", 2, 2).is_ok());
        assert!(validate_positive_number("participants", 1, 2).is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        let allowed = ["yml", "yaml", "toml"];
        assert!(validate_file_extension("config", "config.yml", &allowed).is_ok());
        assert!(validate_file_extension("config", "draw/2024.toml", &allowed).is_ok());
        assert!(validate_file_extension("config", "config.json", &allowed).is_err());
        assert!(validate_file_extension("config", "config", &allowed).is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("participants[0]", "Ann").is_ok());
        assert!(validate_non_empty_string("participants[0]", "  ").is_err());
    }

    #[test]
    fn test_validate_known_participants() {
        let participants: HashSet<&str> = ["Ann", "Ben"].into_iter().collect();
        let group = vec!["Ann".to_string(), "Bne".to_string()];

        let err = validate_known_participants("forbidden_groups[0]", &group, &participants)
            .unwrap_err();
        match err {
            DrawError::UnknownParticipantError { name, context } => {
                assert_eq!(name, "Bne");
                assert_eq!(context, "forbidden_groups[0]");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
