//! Adapter layer: Convert Google Books DTOs to domain models
//!
//! This is the ONLY place where DTO types are converted to domain types.
//! If Google Books changes their response format, only this file and
//! dto.rs need to change.

use super::dto;
use crate::identification::domain::{CatalogRecord, LookupOutcome, LookupQuery};

/// Convert a search response into a lookup outcome.
///
/// The first volume wins; the API's own ordering is trusted as-is.
pub fn to_outcome(response: dto::VolumesResponse, query: &LookupQuery) -> LookupOutcome {
    match response.items.into_iter().next() {
        Some(volume) => LookupOutcome::Found(to_catalog_record(volume.volume_info, query.isbn())),
        None => LookupOutcome::NotFound,
    }
}

/// Convert one volume into a catalog record.
///
/// `fallback_isbn` is used when the volume carries no ISBN identifier.
pub fn to_catalog_record(info: dto::VolumeInfo, fallback_isbn: Option<&str>) -> CatalogRecord {
    let isbn = extract_isbn(&info.industry_identifiers)
        .unwrap_or_else(|| fallback_isbn.unwrap_or_default().trim().to_string());

    let cover_url = info
        .image_links
        .and_then(|links| links.thumbnail.or(links.small_thumbnail))
        .unwrap_or_default();

    CatalogRecord {
        title: trimmed(info.title),
        author: info.authors.unwrap_or_default().join(", ").trim().to_string(),
        isbn,
        publisher: trimmed(info.publisher),
        year: parse_year(info.published_date.as_deref()),
        cover_url,
    }
}

/// Pick the ISBN out of the volume's identifiers.
///
/// The first ISBN_13 or ISBN_10 in the order the API lists them wins. The
/// identifier is trimmed but otherwise kept as provided; a blank one counts
/// as absent.
fn extract_isbn(identifiers: &[dto::IndustryIdentifier]) -> Option<String> {
    identifiers
        .iter()
        .find(|id| id.id_type == "ISBN_13" || id.id_type == "ISBN_10")
        .map(|id| id.identifier.trim().to_string())
        .filter(|isbn| !isbn.is_empty())
}

/// Year from the first four characters of a publication date (0 if unknown)
fn parse_year(published: Option<&str>) -> i32 {
    published
        .map(|date| date.chars().take(4).collect::<String>())
        .and_then(|year| year.parse().ok())
        .unwrap_or(0)
}

fn trimmed(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identifier(id_type: &str, identifier: &str) -> dto::IndustryIdentifier {
        dto::IndustryIdentifier {
            id_type: id_type.to_string(),
            identifier: identifier.to_string(),
        }
    }

    fn make_info(title: &str) -> dto::VolumeInfo {
        dto::VolumeInfo {
            title: Some(title.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_convert_full_volume() {
        let info = dto::VolumeInfo {
            title: Some(" Clean Code ".to_string()),
            authors: Some(vec!["Robert C. Martin".to_string(), "Dean Wampler".to_string()]),
            publisher: Some("Prentice Hall".to_string()),
            published_date: Some("2008-08-01".to_string()),
            industry_identifiers: vec![identifier("ISBN_13", "9780132350884")],
            image_links: Some(dto::ImageLinks {
                small_thumbnail: Some("small".to_string()),
                thumbnail: Some("thumb".to_string()),
            }),
        };

        let record = to_catalog_record(info, None);

        assert_eq!(record.title, "Clean Code");
        assert_eq!(record.author, "Robert C. Martin, Dean Wampler");
        assert_eq!(record.isbn, "9780132350884");
        assert_eq!(record.publisher, "Prentice Hall");
        assert_eq!(record.year, 2008);
        assert_eq!(record.cover_url, "thumb");
    }

    #[test]
    fn test_isbn10_kept_as_provided() {
        let info = dto::VolumeInfo {
            industry_identifiers: vec![identifier("ISBN_10", " 0-13-235088-2 ")],
            ..make_info("Clean Code")
        };

        let record = to_catalog_record(info, None);

        assert_eq!(record.isbn, "0-13-235088-2");
    }

    #[test]
    fn test_first_isbn_in_source_order_wins() {
        let ids = vec![
            identifier("OTHER", "UOM:39015058578744"),
            identifier("ISBN_10", "0132350882"),
            identifier("ISBN_13", "9780132350884"),
        ];
        assert_eq!(extract_isbn(&ids), Some("0132350882".to_string()));

        let ids = vec![
            identifier("ISBN_13", "9780132350884"),
            identifier("ISBN_10", "0132350882"),
        ];
        assert_eq!(extract_isbn(&ids), Some("9780132350884".to_string()));
    }

    #[test]
    fn test_blank_identifier_falls_back_to_query() {
        let info = dto::VolumeInfo {
            industry_identifiers: vec![identifier("ISBN_13", "  ")],
            ..make_info("Clean Code")
        };

        assert_eq!(to_catalog_record(info, Some("0132350882")).isbn, "0132350882");
    }

    #[test]
    fn test_isbn_falls_back_to_query() {
        let info = dto::VolumeInfo {
            industry_identifiers: vec![identifier("OTHER", "XYZ")],
            ..make_info("Foo")
        };
        assert_eq!(to_catalog_record(info.clone(), Some("0132350882")).isbn, "0132350882");
        assert_eq!(to_catalog_record(info, None).isbn, "");
    }

    #[test]
    fn test_missing_authors_is_empty() {
        let record = to_catalog_record(make_info("Foo"), None);
        assert_eq!(record.author, "");
        assert_eq!(record.publisher, "");
        assert_eq!(record.cover_url, "");
    }

    #[test]
    fn test_small_thumbnail_fallback() {
        let info = dto::VolumeInfo {
            image_links: Some(dto::ImageLinks {
                small_thumbnail: Some("small".to_string()),
                thumbnail: None,
            }),
            ..make_info("Foo")
        };
        assert_eq!(to_catalog_record(info, None).cover_url, "small");
    }

    #[test]
    fn test_parse_year_variants() {
        assert_eq!(parse_year(Some("1999")), 1999);
        assert_eq!(parse_year(Some("2004-05")), 2004);
        assert_eq!(parse_year(Some("unknown")), 0);
        assert_eq!(parse_year(Some("")), 0);
        assert_eq!(parse_year(None), 0);
    }

    #[test]
    fn test_first_volume_wins() {
        let response = dto::VolumesResponse {
            total_items: Some(2),
            items: vec![
                dto::Volume {
                    id: Some("a".to_string()),
                    volume_info: make_info("First"),
                },
                dto::Volume {
                    id: Some("b".to_string()),
                    volume_info: make_info("Second"),
                },
            ],
        };

        let outcome = to_outcome(response, &LookupQuery::Title("First".to_string()));

        match outcome {
            LookupOutcome::Found(record) => assert_eq!(record.title, "First"),
            other => panic!("expected a match, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_items_is_not_found() {
        let outcome = to_outcome(
            dto::VolumesResponse::default(),
            &LookupQuery::Isbn("0132350882".to_string()),
        );
        assert!(matches!(outcome, LookupOutcome::NotFound));
    }
}
