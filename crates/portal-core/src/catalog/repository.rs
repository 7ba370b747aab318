//! Read-only catalog endpoints.

use async_trait::async_trait;

use super::model::{BranchEntry, ExamResource, PlacementQuestion, PlacementTopic, ResourceKind, Subject};
use crate::session::ApiError;

/// Catalog backend.
///
/// None of these calls touch the session; they ride on whatever cookie and
/// bearer the REST client currently carries.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn branches(&self) -> Result<Vec<BranchEntry>, ApiError>;

    async fn subjects(&self, branch: &str, semester: &str) -> Result<Vec<Subject>, ApiError>;

    async fn exam_resources(
        &self,
        branch: &str,
        semester: &str,
        subject_id: &str,
        kind: ResourceKind,
    ) -> Result<Vec<ExamResource>, ApiError>;

    async fn placement_topics(&self) -> Result<Vec<PlacementTopic>, ApiError>;

    async fn placement_subtopics(&self, topic: &str) -> Result<Vec<String>, ApiError>;

    async fn placement_questions(
        &self,
        topic: &str,
        subtopic: &str,
    ) -> Result<Vec<PlacementQuestion>, ApiError>;

    async fn resources(&self) -> Result<Vec<ExamResource>, ApiError>;
}
