//! Stream assignment operations.
//!
//! # Design
//! The service addresses an assignment only by its own id, unrelated to the
//! (stream, feed) pair it links. Removing a feed from a stream therefore
//! resolves the pair first: list the stream's feeds, keep the entries for
//! the feed, then delete each by assignment id. The service does not keep
//! pairs unique, so zero, one or several assignments may match.

use serde::de::IgnoredAny;
use tracing::info;

use crate::client::{ApiClient, NO_PAYLOAD};
use crate::error::ApiError;
use crate::http::{HttpMethod, Transport};
use crate::types::{CreateAssignment, CreateAssignmentRequest, StreamAssignmentFeed};

impl<T: Transport> ApiClient<T> {
    /// Assign a feed to a stream. Returns the new assignment joined with its
    /// feed.
    pub fn create_assignment(
        &self,
        stream_id: &str,
        feed_id: &str,
    ) -> Result<StreamAssignmentFeed, ApiError> {
        let payload = CreateAssignmentRequest {
            stream_assignment: CreateAssignment {
                stream_id: stream_id.to_string(),
                feed_id: feed_id.to_string(),
            },
        };
        self.request(HttpMethod::Post, "/stream_assignments.json", Some(&payload))
    }

    /// Delete a single assignment by its own id.
    pub fn delete_assignment(&self, assignment_id: &str) -> Result<(), ApiError> {
        let path = format!("/stream_assignments/{assignment_id}.json");
        let _: IgnoredAny = self.request(HttpMethod::Delete, &path, NO_PAYLOAD)?;
        Ok(())
    }

    /// Remove every assignment linking `feed_id` to `stream_id` and return
    /// how many were deleted.
    ///
    /// No matching assignment is a successful no-op. Deletes run one at a
    /// time in list order and stop at the first failure, which is returned
    /// as `ApiError::PartialDeletion` with the count deleted before it. A
    /// failed listing is returned as is and nothing is deleted.
    pub fn destroy_assignment(&self, stream_id: &str, feed_id: &str) -> Result<usize, ApiError> {
        let matches: Vec<StreamAssignmentFeed> = self
            .list_stream_feeds(stream_id)?
            .into_iter()
            .filter(|entry| entry.feed_id == feed_id)
            .collect();

        let mut deleted = 0;
        for assignment in &matches {
            if let Err(source) = self.delete_assignment(&assignment.id) {
                return Err(ApiError::PartialDeletion {
                    deleted,
                    source: Box::new(source),
                });
            }
            deleted += 1;
        }

        info!(stream_id, feed_id, deleted, "destroyed stream assignments");
        Ok(deleted)
    }
}
