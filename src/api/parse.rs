use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::graph::EntityGraph;

/// One entity as returned by the related-entities endpoint. The wire format
/// carries extra fields (`data`, `distance`); only the ones the UI consumes
/// are kept.
#[derive(Clone, Debug, Deserialize)]
pub struct Entity {
    pub query: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub comment: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
    pub card_size: f32,
    pub relevance: f32,
}

/// The backend emits `"comment": null` for entities it failed to resolve.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Deserialize)]
struct RelatedResponse {
    entities: Vec<Entity>,
}

pub(super) fn parse_related_response(value: Value) -> Result<EntityGraph> {
    let response: RelatedResponse = serde_json::from_value(value)
        .context("unexpected shape in related-entities response")?;
    EntityGraph::new(response.entities)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_related_entities_payload() {
        let value = json!({
            "entities": [
                {"query": "Paris", "relevance": 1.0, "card_size": 80, "comment": "capital of France"},
                {"query": "Eiffel_Tower", "relevance": 0.8, "card_size": 60, "comment": "wrought-iron lattice tower"},
            ]
        });

        let graph = parse_related_response(value).expect("payload parses");
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.root().query, "Paris");
        assert_eq!(graph.root().comment, "capital of France");
    }

    #[test]
    fn tolerates_null_comment_and_extra_fields() {
        let value = json!({
            "entities": [
                {
                    "query": "Paris",
                    "relevance": 1.0,
                    "card_size": 100,
                    "comment": null,
                    "thumbnail": null,
                    "distance": 0,
                    "data": {"seeAlso": [], "thumbnail": null, "comment": null}
                }
            ]
        });

        let graph = parse_related_response(value).expect("payload parses");
        assert_eq!(graph.root().comment, "");
        assert!(graph.root().thumbnail.is_none());
    }

    #[test]
    fn rejects_unexpected_shape() {
        let value = json!({"entities": "not-a-list"});
        let error = parse_related_response(value).unwrap_err();
        assert!(error.to_string().contains("unexpected shape"));

        let value = json!({"results": []});
        assert!(parse_related_response(value).is_err());
    }

    #[test]
    fn rejects_missing_sizing_fields() {
        let value = json!({"entities": [{"query": "Paris", "comment": "x"}]});
        assert!(parse_related_response(value).is_err());
    }
}
