//! Wire DTOs for the feed service API.
//!
//! # Design
//! Field names follow the service's JSON keys exactly; `type` is exposed as
//! `kind` in Rust. Ids are opaque strings assigned by the service and are
//! only ever compared for equality.
//!
//! The mock-server crate defines its own copies of these shapes. The
//! integration tests catch any schema drift between the two.

use serde::{Deserialize, Serialize};

/// A subscribed content source.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Feed {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    pub uri: String,
    #[serde(default)]
    pub title: String,
}

/// A named grouping of feeds.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stream {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permalink: Option<String>,
}

/// A stream assignment joined with the fields of its feed.
///
/// `id` is the assignment's own id, the one `DELETE /stream_assignments`
/// expects. `feed_id` is the linked feed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StreamAssignmentFeed {
    pub id: String,
    pub feed_id: String,
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

/// `GET /feeds.json` response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedList {
    pub feeds: Vec<Feed>,
}

/// `GET /streams.json` response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StreamList {
    pub streams: Vec<Stream>,
}

/// `GET /streams/{id}.json` response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StreamFeedList {
    pub feeds: Vec<StreamAssignmentFeed>,
}

/// Request payload for creating a feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFeedRequest {
    pub feed: CreateFeed,
}

/// `use_googlebot_agent` is only sent when true. The service treats an
/// explicit `false` differently from an absent key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFeed {
    pub uri: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub use_googlebot_agent: bool,
}

/// Request payload for creating a stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateStreamRequest {
    pub stream: CreateStream,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateStream {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permalink: Option<String>,
}

/// Request payload for assigning a feed to a stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAssignmentRequest {
    pub stream_assignment: CreateAssignment,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAssignment {
    pub stream_id: String,
    pub feed_id: String,
}

fn is_false(value: &bool) -> bool {
    !*value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feed_uses_type_as_wire_key() {
        let feed = Feed {
            id: "f1".to_string(),
            kind: "rss".to_string(),
            uri: "https://example.com/rss".to_string(),
            title: "Example".to_string(),
        };
        let json = serde_json::to_value(&feed).unwrap();
        assert_eq!(json["type"], "rss");
        assert!(json.get("kind").is_none());

        let back: Feed = serde_json::from_value(json).unwrap();
        assert_eq!(back, feed);
    }

    #[test]
    fn stream_without_permalink_decodes_to_none() {
        let stream: Stream = serde_json::from_str(r#"{"id":"s1","name":"News"}"#).unwrap();
        assert_eq!(stream.permalink, None);

        let stream: Stream =
            serde_json::from_str(r#"{"id":"s1","name":"News","permalink":null}"#).unwrap();
        assert_eq!(stream.permalink, None);
    }

    #[test]
    fn assignment_feed_decodes_joined_fields() {
        let raw = r#"{"id":"a1","feed_id":"f1","uri":"https://example.com/rss","title":"Example","type":"rss"}"#;
        let entry: StreamAssignmentFeed = serde_json::from_str(raw).unwrap();
        assert_eq!(entry.id, "a1");
        assert_eq!(entry.feed_id, "f1");
        assert_eq!(entry.kind, "rss");
    }

    #[test]
    fn create_feed_omits_false_agent_flag() {
        let payload = CreateFeedRequest {
            feed: CreateFeed {
                uri: "https://example.com/rss".to_string(),
                use_googlebot_agent: false,
            },
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json, serde_json::json!({"feed": {"uri": "https://example.com/rss"}}));
    }

    #[test]
    fn assignment_payload_is_nested_under_stream_assignment() {
        let payload = CreateAssignmentRequest {
            stream_assignment: CreateAssignment {
                stream_id: "s1".to_string(),
                feed_id: "f1".to_string(),
            },
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"stream_assignment": {"stream_id": "s1", "feed_id": "f1"}})
        );
    }
}
