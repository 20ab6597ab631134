use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

use crate::application::models::group::{
    CreateReadingGroupRequest, GroupMember, JoinByCodeRequest, JoinGroupRequest, ReadingGroup,
    UpdateReadingGroupRequest,
};
use crate::application::models::response::{ApiResponse, EmptyBody, PageResponse};
use crate::error::ApiError;
use crate::transport::ApiClient;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InviteCodeResponse {
    invite_code: String,
}

/// Reading groups and their membership (`/reading-groups`).
#[async_trait]
pub trait ReadingGroupService: Send + Sync {
    async fn create_group(
        &self,
        group: &CreateReadingGroupRequest,
    ) -> Result<ReadingGroup, ApiError>;

    /// Public groups, paged, optionally filtered by name.
    async fn get_public_groups(
        &self,
        page: u32,
        size: u32,
        search: Option<&str>,
    ) -> Result<PageResponse<ReadingGroup>, ApiError>;

    /// Groups the caller belongs to.
    async fn get_my_groups(&self) -> Result<Vec<ReadingGroup>, ApiError>;

    async fn get_group(&self, id: i64) -> Result<ReadingGroup, ApiError>;

    async fn update_group(
        &self,
        id: i64,
        group: &UpdateReadingGroupRequest,
    ) -> Result<ReadingGroup, ApiError>;

    async fn delete_group(&self, id: i64) -> Result<(), ApiError>;

    /// Invalidates the current invite code and returns the new one.
    async fn regenerate_invite_code(&self, id: i64) -> Result<String, ApiError>;

    /// Looks a group up by its invite code without joining it.
    async fn get_group_by_invite_code(&self, code: &str) -> Result<ReadingGroup, ApiError>;

    async fn get_members(&self, id: i64) -> Result<Vec<GroupMember>, ApiError>;

    /// Joins a public group directly.
    async fn join_group(
        &self,
        id: i64,
        request: &JoinGroupRequest,
    ) -> Result<GroupMember, ApiError>;

    /// Joins a group with its invite code.
    async fn join_by_invite_code(
        &self,
        id: i64,
        request: &JoinByCodeRequest,
    ) -> Result<GroupMember, ApiError>;

    /// Leader-only removal of another member.
    async fn remove_member(&self, group_id: i64, member_id: i64) -> Result<(), ApiError>;

    async fn leave_group(&self, id: i64) -> Result<(), ApiError>;
}

pub struct ReadingGroupServiceImpl<T: ApiClient> {
    client: Arc<T>,
}

impl<T: ApiClient> ReadingGroupServiceImpl<T> {
    pub fn new(client: Arc<T>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<T: ApiClient + 'static> ReadingGroupService for ReadingGroupServiceImpl<T> {
    async fn create_group(
        &self,
        group: &CreateReadingGroupRequest,
    ) -> Result<ReadingGroup, ApiError> {
        let envelope: ApiResponse<ReadingGroup> =
            self.client.post("/reading-groups", group).await?;
        debug!(group_id = envelope.data.id, "Created reading group");
        Ok(envelope.data)
    }

    async fn get_public_groups(
        &self,
        page: u32,
        size: u32,
        search: Option<&str>,
    ) -> Result<PageResponse<ReadingGroup>, ApiError> {
        let mut params = format!("page={page}&size={size}");
        if let Some(search) = search.filter(|s| !s.is_empty()) {
            params.push_str(&format!("&search={}", urlencoding::encode(search)));
        }
        let envelope: ApiResponse<PageResponse<ReadingGroup>> = self
            .client
            .get(&format!("/reading-groups/public?{params}"))
            .await?;
        Ok(envelope.data)
    }

    async fn get_my_groups(&self) -> Result<Vec<ReadingGroup>, ApiError> {
        let envelope: ApiResponse<Vec<ReadingGroup>> =
            self.client.get("/reading-groups/my").await?;
        Ok(envelope.data)
    }

    async fn get_group(&self, id: i64) -> Result<ReadingGroup, ApiError> {
        let envelope: ApiResponse<ReadingGroup> =
            self.client.get(&format!("/reading-groups/{id}")).await?;
        Ok(envelope.data)
    }

    async fn update_group(
        &self,
        id: i64,
        group: &UpdateReadingGroupRequest,
    ) -> Result<ReadingGroup, ApiError> {
        let envelope: ApiResponse<ReadingGroup> = self
            .client
            .put(&format!("/reading-groups/{id}"), group)
            .await?;
        Ok(envelope.data)
    }

    async fn delete_group(&self, id: i64) -> Result<(), ApiError> {
        self.client
            .delete_void(&format!("/reading-groups/{id}"))
            .await
    }

    async fn regenerate_invite_code(&self, id: i64) -> Result<String, ApiError> {
        let envelope: ApiResponse<InviteCodeResponse> = self
            .client
            .post(
                &format!("/reading-groups/{id}/invite-code/regenerate"),
                &EmptyBody {},
            )
            .await?;
        Ok(envelope.data.invite_code)
    }

    async fn get_group_by_invite_code(&self, code: &str) -> Result<ReadingGroup, ApiError> {
        let envelope: ApiResponse<ReadingGroup> = self
            .client
            .get(&format!(
                "/reading-groups/invite/{}",
                urlencoding::encode(code)
            ))
            .await?;
        Ok(envelope.data)
    }

    async fn get_members(&self, id: i64) -> Result<Vec<GroupMember>, ApiError> {
        let envelope: ApiResponse<Vec<GroupMember>> = self
            .client
            .get(&format!("/reading-groups/{id}/members"))
            .await?;
        Ok(envelope.data)
    }

    async fn join_group(
        &self,
        id: i64,
        request: &JoinGroupRequest,
    ) -> Result<GroupMember, ApiError> {
        let envelope: ApiResponse<GroupMember> = self
            .client
            .post(&format!("/reading-groups/{id}/members/join"), request)
            .await?;
        Ok(envelope.data)
    }

    async fn join_by_invite_code(
        &self,
        id: i64,
        request: &JoinByCodeRequest,
    ) -> Result<GroupMember, ApiError> {
        let envelope: ApiResponse<GroupMember> = self
            .client
            .post(
                &format!("/reading-groups/{id}/members/join-by-code"),
                request,
            )
            .await?;
        Ok(envelope.data)
    }

    async fn remove_member(&self, group_id: i64, member_id: i64) -> Result<(), ApiError> {
        self.client
            .delete_void(&format!(
                "/reading-groups/{group_id}/members/{member_id}"
            ))
            .await
    }

    async fn leave_group(&self, id: i64) -> Result<(), ApiError> {
        self.client
            .delete_void(&format!("/reading-groups/{id}/members/leave"))
            .await
    }
}
