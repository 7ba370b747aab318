use super::client::ApiClient;
use async_trait::async_trait;
use portal_core::catalog::{
    BranchEntry, CatalogApi, ExamResource, PlacementQuestion, PlacementTopic, ResourceKind,
    Subject,
};
use portal_core::session::ApiError;
use std::sync::Arc;

/// [`CatalogApi`] over the `examprep`, `placementprep` and `resources`
/// endpoints.
#[derive(Debug, Clone)]
pub struct HttpCatalogApi {
    client: Arc<ApiClient>,
}

impl HttpCatalogApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogApi {
    async fn branches(&self) -> Result<Vec<BranchEntry>, ApiError> {
        self.client.get(&["examprep", "branches"]).await
    }

    async fn subjects(&self, branch: &str, semester: &str) -> Result<Vec<Subject>, ApiError> {
        self.client
            .get(&["examprep", "branch", "sem", branch, semester])
            .await
    }

    async fn exam_resources(
        &self,
        branch: &str,
        semester: &str,
        subject_id: &str,
        kind: ResourceKind,
    ) -> Result<Vec<ExamResource>, ApiError> {
        let kind = kind.to_string();
        self.client
            .get(&[
                "examprep", "branch", "sem", "subid", "type", branch, semester, subject_id, &kind,
            ])
            .await
    }

    async fn placement_topics(&self) -> Result<Vec<PlacementTopic>, ApiError> {
        self.client.get(&["placementprep", "topics"]).await
    }

    async fn placement_subtopics(&self, topic: &str) -> Result<Vec<String>, ApiError> {
        self.client.get(&["placementprep", "topics", topic]).await
    }

    async fn placement_questions(
        &self,
        topic: &str,
        subtopic: &str,
    ) -> Result<Vec<PlacementQuestion>, ApiError> {
        self.client
            .get(&["placementprep", "topics", topic, subtopic])
            .await
    }

    async fn resources(&self) -> Result<Vec<ExamResource>, ApiError> {
        self.client.get(&["resources"]).await
    }
}
