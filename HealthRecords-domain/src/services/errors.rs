use thiserror::Error;
use validator::ValidationErrors;

use health_records_data::repository::RepositoryError;

/// Errors shared by every domain service
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Input rejected before reaching the store
    #[error("Validation error: {0}")]
    Validation(String),

    /// The referenced record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// The store failed
    #[error("Repository error: {0}")]
    Repository(String),
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(msg) => ServiceError::NotFound(msg),
            _ => ServiceError::Repository(err.to_string()),
        }
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(errors: ValidationErrors) -> Self {
        ServiceError::Validation(format_validation_errors(&errors))
    }
}

/// Flatten validator output into `field: message; field: message`
pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut fields: Vec<String> = errors
        .field_errors()
        .iter()
        .map(|(field, errors)| {
            let messages: Vec<String> = errors
                .iter()
                .map(|err| match &err.message {
                    Some(msg) => msg.to_string(),
                    None => format!("Invalid {}", field),
                })
                .collect();
            format!("{}: {}", field, messages.join(", "))
        })
        .collect();
    fields.sort();
    fields.join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_errors_map_by_kind() {
        let err: ServiceError = RepositoryError::NotFound("patient 3".to_string()).into();
        assert!(matches!(err, ServiceError::NotFound(msg) if msg == "patient 3"));

        let err: ServiceError = RepositoryError::Lock("poisoned".to_string()).into();
        assert!(matches!(err, ServiceError::Repository(_)));
    }
}
