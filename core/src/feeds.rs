//! Feed operations.

use crate::client::{ApiClient, NO_PAYLOAD};
use crate::error::ApiError;
use crate::http::{HttpMethod, Transport};
use crate::types::{CreateFeed, CreateFeedRequest, Feed, FeedList};

impl<T: Transport> ApiClient<T> {
    /// All feeds, in the order the service returns them.
    pub fn list_feeds(&self) -> Result<Vec<Feed>, ApiError> {
        let list: FeedList = self.request(HttpMethod::Get, "/feeds.json", NO_PAYLOAD)?;
        Ok(list.feeds)
    }

    /// Subscribe to `uri`. With `use_googlebot_agent` the service fetches the
    /// source with its alternate user agent.
    pub fn create_feed(&self, uri: &str, use_googlebot_agent: bool) -> Result<Feed, ApiError> {
        let payload = CreateFeedRequest {
            feed: CreateFeed {
                uri: uri.to_string(),
                use_googlebot_agent,
            },
        };
        self.request(HttpMethod::Post, "/feeds.json", Some(&payload))
    }
}

#[cfg(test)]
mod tests {
    use crate::error::ApiError;
    use crate::http::HttpMethod;
    use crate::testutil::{client, ScriptedTransport};
    use crate::types::Feed;

    fn sent_body(transport: &ScriptedTransport) -> serde_json::Value {
        let requests = transport.requests();
        serde_json::from_str(requests[0].body.as_deref().unwrap()).unwrap()
    }

    #[test]
    fn list_feeds_preserves_service_order() {
        let c = client(ScriptedTransport::new().respond(
            200,
            r#"{"feeds":[
                {"id":"f2","type":"rss","uri":"https://b.example/rss","title":"B"},
                {"id":"f1","type":"atom","uri":"https://a.example/atom","title":"A"}
            ]}"#,
        ));
        let feeds = c.list_feeds().unwrap();
        let ids: Vec<&str> = feeds.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, ["f2", "f1"]);

        let req = &c.transport().requests()[0];
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:3000/api/v3/feeds.json");
        assert!(req.body.is_none());
    }

    #[test]
    fn create_feed_without_agent_omits_the_flag() {
        let c = client(ScriptedTransport::new().respond(
            201,
            r#"{"id":"f1","type":"rss","uri":"https://example.com/rss","title":"Example"}"#,
        ));
        let feed = c.create_feed("https://example.com/rss", false).unwrap();
        assert_eq!(feed.id, "f1");

        let body = sent_body(c.transport());
        assert_eq!(body, serde_json::json!({"feed": {"uri": "https://example.com/rss"}}));
        assert_eq!(c.transport().requests()[0].method, HttpMethod::Post);
    }

    #[test]
    fn create_feed_with_agent_sends_true() {
        let c = client(ScriptedTransport::new().respond(
            201,
            r#"{"id":"f1","type":"rss","uri":"https://example.com/rss","title":"Example"}"#,
        ));
        c.create_feed("https://example.com/rss", true).unwrap();

        let body = sent_body(c.transport());
        assert_eq!(body["feed"]["use_googlebot_agent"], true);
    }

    #[test]
    fn created_feed_round_trips_every_wire_field() {
        let original = Feed {
            id: "f9".to_string(),
            kind: "atom".to_string(),
            uri: "https://example.com/atom".to_string(),
            title: "Example Atom".to_string(),
        };
        let echo = serde_json::to_string(&original).unwrap();
        let c = client(ScriptedTransport::new().respond(201, &echo));
        let created = c.create_feed(&original.uri, false).unwrap();
        assert_eq!(created, original);
        assert_eq!(sent_body(c.transport())["feed"]["uri"], original.uri);
    }

    #[test]
    fn create_feed_propagates_rejection() {
        let c = client(ScriptedTransport::new().respond(422, r#"{"errors":["uri is invalid"]}"#));
        let err = c.create_feed("nope", false).unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 422, .. }));
    }
}
