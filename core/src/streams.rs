//! Stream operations.

use crate::client::{ApiClient, NO_PAYLOAD};
use crate::error::ApiError;
use crate::http::{HttpMethod, Transport};
use crate::types::{
    CreateStream, CreateStreamRequest, Stream, StreamAssignmentFeed, StreamFeedList, StreamList,
};

impl<T: Transport> ApiClient<T> {
    /// All streams, in the order the service returns them.
    pub fn list_streams(&self) -> Result<Vec<Stream>, ApiError> {
        let list: StreamList = self.request(HttpMethod::Get, "/streams.json", NO_PAYLOAD)?;
        Ok(list.streams)
    }

    /// Create a stream. An empty or missing permalink is left out of the
    /// payload and the service picks one.
    pub fn create_stream(&self, name: &str, permalink: Option<&str>) -> Result<Stream, ApiError> {
        let payload = CreateStreamRequest {
            stream: CreateStream {
                name: name.to_string(),
                permalink: permalink.filter(|p| !p.is_empty()).map(str::to_string),
            },
        };
        self.request(HttpMethod::Post, "/streams.json", Some(&payload))
    }

    /// The feeds assigned to a stream, each carrying its assignment id.
    pub fn list_stream_feeds(
        &self,
        stream_id: &str,
    ) -> Result<Vec<StreamAssignmentFeed>, ApiError> {
        let path = format!("/streams/{stream_id}.json");
        let list: StreamFeedList = self.request(HttpMethod::Get, &path, NO_PAYLOAD)?;
        Ok(list.feeds)
    }
}
