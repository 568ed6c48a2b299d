use serde::{Deserialize, Deserializer, Serialize};

pub type ArtworkId = u64;

/// Fields requested from the API; everything else in the payload is ignored.
pub const ARTWORK_FIELDS: &str =
    "id,title,artist_display,place_of_origin,inscriptions,date_start,date_end";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Artwork {
    pub id: ArtworkId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub artist_display: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub place_of_origin: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub inscriptions: String,
    #[serde(default)]
    pub date_start: Option<i32>,
    #[serde(default)]
    pub date_end: Option<i32>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PaginationInfo {
    pub total: usize,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub offset: Option<usize>,
    #[serde(default)]
    pub total_pages: Option<usize>,
    #[serde(default)]
    pub current_page: Option<usize>,
}

/// Raw `/artworks` listing answer.
#[derive(Serialize, Deserialize, Debug)]
pub struct ArtworksAnswer {
    pub pagination: PaginationInfo,
    pub data: Vec<Artwork>,
}

/// One page of the catalog as seen by the rest of the crate.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtworkPage {
    pub page: usize,
    pub records: Vec<Artwork>,
    pub total_count: usize,
}

impl ArtworkPage {
    pub fn from_answer(page: usize, answer: ArtworksAnswer) -> Self {
        ArtworkPage {
            page,
            records: answer.data,
            total_count: answer.pagination.total,
        }
    }
}

impl Artwork {
    pub fn date_start_text(&self) -> String {
        self.date_start.map(|y| y.to_string()).unwrap_or_default()
    }

    pub fn date_end_text(&self) -> String {
        self.date_end.map(|y| y.to_string()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_fixture_parsing() {
        let input = include_str!("../../test_data/artworks_page_1.json");
        let answer: ArtworksAnswer = serde_json::from_str(input).unwrap();
        assert_eq!(answer.pagination.total, 129884);
        assert_eq!(answer.pagination.limit, Some(12));
        assert_eq!(answer.data.len(), 3);

        let first = &answer.data[0];
        assert_eq!(first.id, 27992);
        assert_eq!(first.title, "A Sunday on La Grande Jatte — 1884");
        assert_eq!(first.place_of_origin, "France");
        assert_eq!(first.date_start, Some(1884));
        assert_eq!(first.date_end, Some(1886));
    }

    #[test]
    fn test_null_fields_become_empty() {
        let input = include_str!("../../test_data/artworks_page_1.json");
        let answer: ArtworksAnswer = serde_json::from_str(input).unwrap();
        let sparse = &answer.data[2];
        assert_eq!(sparse.inscriptions, "");
        assert_eq!(sparse.artist_display, "");
        assert_eq!(sparse.date_end, None);
        assert_eq!(sparse.date_end_text(), "");
        assert_eq!(sparse.date_start_text(), "1650");
    }

    #[test]
    fn test_missing_pagination_is_an_error() {
        let result = serde_json::from_str::<ArtworksAnswer>(r#"{"data": []}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_page_from_answer() {
        let answer = ArtworksAnswer {
            pagination: PaginationInfo {
                total: 40,
                limit: Some(12),
                offset: Some(12),
                total_pages: Some(4),
                current_page: Some(2),
            },
            data: vec![],
        };
        let page = ArtworkPage::from_answer(2, answer);
        assert_eq!(page.page, 2);
        assert_eq!(page.total_count, 40);
        assert!(page.records.is_empty());
    }
}
