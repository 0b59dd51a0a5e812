use super::domain::{NormalizedText, TextFragment};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::trace;

/// The `text` field of an exported message. Exporters emit either a bare string
/// or a list mixing bare strings with typed entity objects.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum TextPayload {
    Plain(String),
    Fragments(Vec<FragmentItem>),
    Malformed(Value),
}

impl Default for TextPayload {
    fn default() -> Self {
        Self::Malformed(Value::Null)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum FragmentItem {
    Plain(String),
    Entity(Map<String, Value>),
    Other(Value),
}

/// Collapses a payload into canonical text and its typed fragments.
///
/// Bare strings inside a fragment list only extend the text; entity objects
/// extend the text and are also kept as fragments. Anything else yields empty
/// text rather than an error.
pub(crate) fn normalize_text(payload: TextPayload) -> NormalizedText {
    match payload {
        TextPayload::Plain(text) => NormalizedText::plain(text),
        TextPayload::Fragments(items) => {
            let mut normalized = NormalizedText::default();
            for item in items {
                match item {
                    FragmentItem::Plain(text) => normalized.text.push_str(&text),
                    FragmentItem::Entity(entity) => {
                        let text = string_field(&entity, "text");
                        normalized.text.push_str(&text);
                        normalized.fragments.push(TextFragment {
                            kind: string_field(&entity, "type"),
                            text,
                        });
                    }
                    FragmentItem::Other(item) => {
                        trace!(%item, "skipping unrecognized text fragment");
                    }
                }
            }
            normalized
        }
        TextPayload::Malformed(raw) => {
            trace!(payload = %raw, "treating unrecognized text payload as empty");
            NormalizedText::default()
        }
    }
}

fn string_field(entity: &Map<String, Value>, field: &str) -> String {
    entity
        .get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn normalize_json(value: Value) -> NormalizedText {
        let payload: TextPayload = serde_json::from_value(value).expect("payload always parses");
        normalize_text(payload)
    }

    #[test]
    fn plain_string_has_no_fragments() {
        let normalized = normalize_json(json!("hello world"));
        assert_eq!(normalized.text, "hello world");
        assert!(normalized.fragments.is_empty());
    }

    #[test]
    fn fragment_list_keeps_only_entities_as_fragments() {
        let normalized = normalize_json(json!([{"type": "mention", "text": "@bob"}, " says hi"]));
        assert_eq!(normalized.text, "@bob says hi");
        assert_eq!(
            normalized.fragments,
            vec![TextFragment {
                kind: "mention".to_string(),
                text: "@bob".to_string(),
            }]
        );
    }

    #[test]
    fn entity_without_string_text_contributes_empty_fragment() {
        let normalized = normalize_json(json!([
            "see ",
            {"type": "link", "text": 42},
            {"text": "bold"},
            7,
            null,
            ["nested"]
        ]));
        assert_eq!(normalized.text, "see bold");
        assert_eq!(normalized.fragments.len(), 2);
        assert_eq!(normalized.fragments[0].kind, "link");
        assert_eq!(normalized.fragments[0].text, "");
        assert_eq!(normalized.fragments[1].kind, "");
        assert_eq!(normalized.fragments[1].text, "bold");
    }

    #[test]
    fn malformed_payloads_become_empty_text() {
        for value in [json!(null), json!(12), json!({"text": "nope"}), json!(true)] {
            let normalized = normalize_json(value);
            assert_eq!(normalized, NormalizedText::default());
        }
        assert_eq!(normalize_text(TextPayload::default()), NormalizedText::default());
    }

    #[test]
    fn fragment_texts_appear_in_order_within_text() {
        let normalized = normalize_json(json!([
            {"type": "bold", "text": "Big"},
            " and ",
            {"type": "italic", "text": "small"}
        ]));
        let joined: String = normalized
            .fragments
            .iter()
            .map(|fragment| fragment.text.as_str())
            .collect();
        assert_eq!(joined, "Bigsmall");
        let mut rest = normalized.text.as_str();
        for fragment in &normalized.fragments {
            let position = rest.find(&fragment.text).expect("fragment present in text");
            rest = &rest[position + fragment.text.len()..];
        }
    }
}
