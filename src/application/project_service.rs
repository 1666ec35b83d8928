use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::error::{ServiceError, ServiceResult};
use crate::domain::ids::{ProjectId, UserId};
use crate::domain::project::{Project, ProjectPatch};
use crate::domain::repository::ProjectRepository;

#[async_trait]
pub trait ProjectService: Send + Sync + 'static {
    async fn create(&self, owner: UserId, input: ProjectPatch, now: DateTime<Utc>) -> ServiceResult<Project>;
    async fn list(&self, owner: UserId) -> ServiceResult<Vec<Project>>;
    async fn get(&self, id: &str, owner: UserId) -> ServiceResult<Project>;
    async fn update(&self, id: &str, owner: UserId, patch: ProjectPatch) -> ServiceResult<Project>;
    /// Tasks under the project are left in place.
    async fn delete(&self, id: &str, owner: UserId) -> ServiceResult<Project>;
}

#[derive(Clone)]
pub struct ProjectServiceImpl<R: ProjectRepository> {
    repo: R,
}

impl<R: ProjectRepository> ProjectServiceImpl<R> {
    pub fn new(repo: R) -> Self { Self { repo } }
}

#[async_trait]
impl<R: ProjectRepository> ProjectService for ProjectServiceImpl<R> {
    async fn create(&self, owner: UserId, input: ProjectPatch, now: DateTime<Utc>) -> ServiceResult<Project> {
        let project = self.repo.create(Project::new(owner, input, now)).await?;
        tracing::info!(project = %project.id, "project created");
        Ok(project)
    }

    async fn list(&self, owner: UserId) -> ServiceResult<Vec<Project>> { Ok(self.repo.list(owner).await?) }

    async fn get(&self, id: &str, owner: UserId) -> ServiceResult<Project> {
        let id = ProjectId::parse(id)?;
        self.repo.find_one(id, owner).await?.ok_or(ServiceError::NotFound)
    }

    async fn update(&self, id: &str, owner: UserId, patch: ProjectPatch) -> ServiceResult<Project> {
        let id = ProjectId::parse(id)?;
        self.repo.find_one_and_update(id, owner, patch).await?.ok_or(ServiceError::NotFound)
    }

    async fn delete(&self, id: &str, owner: UserId) -> ServiceResult<Project> {
        let id = ProjectId::parse(id)?;
        self.repo.delete(id, owner).await?.ok_or(ServiceError::NotFound)
    }
}
