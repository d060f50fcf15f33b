//! Adapter layer: Convert OpenAI responses to domain models
//!
//! This is the ONLY place where the model's answer is turned into
//! [`CandidateFields`].

use super::dto;
use crate::identification::domain::{CandidateFields, ServiceError};

/// Pull the assistant's text out of a chat completion
pub fn message_content(response: dto::ChatResponse) -> Result<String, ServiceError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| ServiceError::InvalidResponse("No message content in response".to_string()))
}

/// Parse the model's answer into candidate fields.
///
/// Anything that isn't a JSON object with the expected keys is a
/// [`ServiceError::Parse`]; models do this routinely.
pub fn to_candidate_fields(content: &str) -> Result<CandidateFields, ServiceError> {
    let fields: dto::CoverFields = serde_json::from_str(content.trim())
        .map_err(|e| ServiceError::Parse(format!("{}. Raw: {}", e, content)))?;

    Ok(CandidateFields {
        title: trimmed(fields.titulo),
        author: trimmed(fields.autor),
        isbn: fields
            .isbn
            .map(|isbn| isbn.replace('-', "").trim().to_string())
            .unwrap_or_default(),
    })
}

fn trimmed(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_clean_answer() {
        let fields = to_candidate_fields(
            r#"{"titulo": " Clean Code ", "autor": "Robert C. Martin ", "isbn": "978-0-13-235088-4"}"#,
        )
        .unwrap();

        assert_eq!(fields.title, "Clean Code");
        assert_eq!(fields.author, "Robert C. Martin");
        assert_eq!(fields.isbn, "9780132350884");
    }

    #[test]
    fn test_blank_fields_stay_blank() {
        let fields = to_candidate_fields(r#"{"titulo": "", "autor": "", "isbn": ""}"#).unwrap();
        assert_eq!(fields, CandidateFields::default());
    }

    #[test]
    fn test_missing_and_null_keys() {
        let fields = to_candidate_fields(r#"{"titulo": "Dune", "isbn": null}"#).unwrap();
        assert_eq!(fields.title, "Dune");
        assert_eq!(fields.author, "");
        assert_eq!(fields.isbn, "");
    }

    #[test]
    fn test_numeric_isbn_keeps_other_fields() {
        let fields =
            to_candidate_fields(r#"{"titulo": "Clean Code", "autor": "Robert C. Martin", "isbn": 9780132350884}"#)
                .unwrap();
        assert_eq!(fields.title, "Clean Code");
        assert_eq!(fields.author, "Robert C. Martin");
        assert_eq!(fields.isbn, "9780132350884");
    }

    #[test]
    fn test_surrounding_whitespace_is_tolerated() {
        let fields = to_candidate_fields("\n  {\"titulo\": \"Dune\"}  \n").unwrap();
        assert_eq!(fields.title, "Dune");
    }

    #[test]
    fn test_prose_answer_is_parse_error() {
        let result = to_candidate_fields("Sorry, I can't read this cover.");
        assert!(matches!(result, Err(ServiceError::Parse(_))));
    }

    #[test]
    fn test_markdown_fenced_answer_is_parse_error() {
        let result = to_candidate_fields("```json\n{\"titulo\": \"Dune\"}\n```");
        assert!(matches!(result, Err(ServiceError::Parse(_))));
    }

    #[test]
    fn test_empty_choices_is_invalid_response() {
        let response = dto::ChatResponse { choices: vec![] };
        assert!(matches!(
            message_content(response),
            Err(ServiceError::InvalidResponse(_))
        ));
    }
}
