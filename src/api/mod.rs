mod client;
mod error;
mod resource;

pub use client::{Client, API_PREFIX};
pub use error::ApiError;
pub use resource::*;

use crate::mutation;
use crate::query::RefreshToken;
use log::*;
use reqwest::Method;
use serde::Deserialize;

/// Responsible for asynchronous interaction with the Forge API including
/// transformation of response data into explicitly-defined types. One method
/// per endpoint; mutating methods bump the caller's refresh token on success
/// so dependent query cells re-fetch.
///
pub struct Forge {
    client: Client,
}

/// Wire shape of the auth probe endpoint.
#[derive(Deserialize)]
struct AuthProbe {
    #[serde(rename = "isAuth")]
    is_auth: bool,
}

impl Forge {
    /// Returns a new instance for the given base URL.
    ///
    pub fn new(base_url: &str) -> Forge {
        debug!("Initializing Forge client for {}...", base_url);
        Forge {
            client: Client::new(base_url),
        }
    }

    /// Borrow the underlying transport, e.g. for driving query cells.
    ///
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Probe current server-side session state. Returns whether the session
    /// cookie still identifies a signed-in user.
    ///
    pub async fn auth_probe(&self) -> Result<bool, ApiError> {
        debug!("Probing authentication state...");
        let probe: AuthProbe = self.client.get_json("/profile/auth").await?;
        Ok(probe.is_auth)
    }

    /// Invalidate the server-side session. Any 2xx counts as success and the
    /// body is ignored.
    ///
    pub async fn sign_out(&self) -> Result<(), ApiError> {
        info!("Signing out...");
        let response = self.client.send(Method::POST, "/profile/signout", None).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
            });
        }
        Ok(())
    }

    /// Returns the signed-in user's profile.
    ///
    pub async fn profile(&self) -> Result<User, ApiError> {
        debug!("Requesting signed-in user profile...");
        self.client.get_json("/profile").await
    }

    /// Replace the signed-in user's bio.
    ///
    pub async fn update_bio(&self, bio: &str, refresh: &mut RefreshToken) -> Result<(), ApiError> {
        info!("Updating bio...");
        mutation::submit(
            &self.client,
            Method::PATCH,
            "/profile/bio",
            Some(serde_json::json!({ "bio": bio })),
            refresh,
        )
        .await
    }

    /// Permanently delete the signed-in user's account. The caller is
    /// expected to follow up with a local sign-out.
    ///
    pub async fn delete_account(&self) -> Result<(), ApiError> {
        info!("Deleting account...");
        let response = self.client.send(Method::DELETE, "/profile/delete", None).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
            });
        }
        Ok(())
    }

    /// Returns the users following the signed-in user.
    ///
    pub async fn followers(&self) -> Result<Vec<InlineUser>, ApiError> {
        debug!("Requesting followers...");
        self.client.get_json("/follow/followers").await
    }

    /// Returns the users the signed-in user follows.
    ///
    pub async fn following(&self) -> Result<Vec<InlineUser>, ApiError> {
        debug!("Requesting followed users...");
        self.client.get_json("/follow").await
    }

    /// Returns whether the signed-in user follows the named user.
    ///
    pub async fn is_following(&self, username: &str) -> Result<bool, ApiError> {
        debug!("Requesting follow state for '{}'...", username);
        self.client.get_json(&format!("/follow/{}", username)).await
    }

    /// Follow the named user.
    ///
    pub async fn follow(&self, username: &str, refresh: &mut RefreshToken) -> Result<(), ApiError> {
        info!("Following '{}'...", username);
        mutation::submit(
            &self.client,
            Method::POST,
            &format!("/follow/{}", username),
            None,
            refresh,
        )
        .await
    }

    /// Unfollow the named user.
    ///
    pub async fn unfollow(
        &self,
        username: &str,
        refresh: &mut RefreshToken,
    ) -> Result<(), ApiError> {
        info!("Unfollowing '{}'...", username);
        mutation::submit(
            &self.client,
            Method::POST,
            &format!("/follow/{}/unfollow", username),
            None,
            refresh,
        )
        .await
    }

    /// Returns the project owned by `username` with the given repo id.
    ///
    pub async fn project(&self, username: &str, id: &str) -> Result<Project, ApiError> {
        debug!("Requesting project {}/{}...", username, id);
        self.client
            .get_json(&format!("/project/{}/{}", username, id))
            .await
    }

    /// Returns whether the signed-in user has liked the project.
    ///
    pub async fn liked(&self, username: &str, id: &str) -> Result<bool, ApiError> {
        debug!("Requesting like state for {}/{}...", username, id);
        self.client
            .get_json(&format!("/project/{}/{}/liked", username, id))
            .await
    }

    /// Like the project.
    ///
    pub async fn like(
        &self,
        username: &str,
        id: &str,
        refresh: &mut RefreshToken,
    ) -> Result<(), ApiError> {
        info!("Liking project {}/{}...", username, id);
        mutation::submit(
            &self.client,
            Method::POST,
            &format!("/project/{}/{}/like", username, id),
            None,
            refresh,
        )
        .await
    }

    /// Remove a like from the project.
    ///
    pub async fn unlike(
        &self,
        username: &str,
        id: &str,
        refresh: &mut RefreshToken,
    ) -> Result<(), ApiError> {
        info!("Unliking project {}/{}...", username, id);
        mutation::submit(
            &self.client,
            Method::POST,
            &format!("/project/{}/{}/unlike", username, id),
            None,
            refresh,
        )
        .await
    }

    /// Fork the project into the signed-in user's account. Returns the
    /// coordinates of the new copy so the caller can navigate to it.
    ///
    pub async fn remix(&self, username: &str, id: &str) -> Result<RemixedProject, ApiError> {
        info!("Remixing project {}/{}...", username, id);
        let response = self
            .client
            .send(
                Method::POST,
                &format!("/project/{}/{}/remix", username, id),
                None,
            )
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
            });
        }
        Ok(response.json().await?)
    }

    /// Search projects by query string, sort order, and tag filter.
    ///
    pub async fn search(
        &self,
        query: &str,
        sort: &str,
        tags: &str,
    ) -> Result<Vec<ProjectInfo>, ApiError> {
        debug!("Searching projects for '{}'...", query);
        self.client
            .get_json(&format!("/project/{}&sort={}&tags={}", query, sort, tags))
            .await
    }

    /// Returns the recommendation categories for the explore view.
    ///
    pub async fn recommendations(&self) -> Result<Vec<Category>, ApiError> {
        debug!("Requesting recommendation categories...");
        self.client.get_json("/rec").await
    }

    /// Returns the ordered top-level comments for the project, each carrying
    /// its full reply subtree.
    ///
    pub async fn comments(&self, username: &str, id: &str) -> Result<Vec<Comment>, ApiError> {
        debug!("Requesting comments for project {}/{}...", username, id);
        let comments: Vec<Comment> = self
            .client
            .get_json(&format!("/project/{}/{}/comments", username, id))
            .await?;
        debug!(
            "Retrieved {} top-level comments for project {}/{}",
            comments.len(),
            username,
            id
        );
        Ok(comments)
    }

    /// Submit a new comment or reply. The caller is expected to re-fetch the
    /// whole tree via the bumped refresh token rather than splice locally.
    ///
    pub async fn post_comment(
        &self,
        username: &str,
        id: &str,
        comment: &NewComment,
        refresh: &mut RefreshToken,
    ) -> Result<(), ApiError> {
        info!("Posting comment on project {}/{}...", username, id);
        let body = serde_json::to_value(comment)?;
        mutation::submit(
            &self.client,
            Method::POST,
            &format!("/project/{}/{}/comment", username, id),
            Some(body),
            refresh,
        )
        .await
    }

    /// Save project settings.
    ///
    pub async fn update_project(
        &self,
        username: &str,
        id: &str,
        settings: &ProjectSettings,
        refresh: &mut RefreshToken,
    ) -> Result<(), ApiError> {
        info!("Updating settings for project {}/{}...", username, id);
        let body = serde_json::to_value(settings)?;
        mutation::submit(
            &self.client,
            Method::PUT,
            &format!("/project/{}/{}", username, id),
            Some(body),
            refresh,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use fake::{Fake, Faker};
    use httpmock::MockServer;
    use serde_json::json;

    #[tokio::test]
    async fn auth_probe_success() -> Result<()> {
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("GET").path("/api/profile/auth");
                then.status(200).json_body(json!({ "isAuth": true }));
            })
            .await;

        let forge = Forge::new(&server.base_url());
        assert!(forge.auth_probe().await?);
        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn sign_out_success() -> Result<()> {
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("POST").path("/api/profile/signout");
                then.status(200);
            })
            .await;

        let forge = Forge::new(&server.base_url());
        forge.sign_out().await?;
        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn profile_success() -> Result<()> {
        let user: User = Faker.fake();

        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("GET").path("/api/profile");
                then.status(200).json_body(json!({
                    "username": user.username,
                    "pictureUrl": user.picture_url,
                    "joinDate": user.join_date,
                    "bio": user.bio,
                }));
            })
            .await;

        let forge = Forge::new(&server.base_url());
        assert_eq!(forge.profile().await?, user);
        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn profile_unauthorized() {
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("GET").path("/api/profile");
                then.status(401);
            })
            .await;

        let forge = Forge::new(&server.base_url());
        let error = forge.profile().await.unwrap_err();
        assert_eq!(error.status(), Some(401));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn update_bio_patches_profile_and_bumps_refresh_token() -> Result<()> {
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("PATCH")
                    .path("/api/profile/bio")
                    .json_body(json!({ "bio": "synth builder" }));
                then.status(200);
            })
            .await;

        let forge = Forge::new(&server.base_url());
        let mut refresh = RefreshToken::default();
        let before = refresh.as_dep();
        forge.update_bio("synth builder", &mut refresh).await?;
        assert_ne!(refresh.as_dep(), before);
        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn delete_account_success() -> Result<()> {
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("DELETE").path("/api/profile/delete");
                then.status(200);
            })
            .await;

        let forge = Forge::new(&server.base_url());
        forge.delete_account().await?;
        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn delete_account_failure_surfaces_status() {
        let server = MockServer::start();
        server
            .mock_async(|when, then| {
                when.method("DELETE").path("/api/profile/delete");
                then.status(401);
            })
            .await;

        let forge = Forge::new(&server.base_url());
        let error = forge.delete_account().await.unwrap_err();
        assert_eq!(error.status(), Some(401));
    }

    #[tokio::test]
    async fn remix_returns_new_project_coordinates() -> Result<()> {
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("POST").path("/api/project/ada/synth/remix");
                then.status(200)
                    .json_body(json!({ "username": "brian", "repo_name": "synth" }));
            })
            .await;

        let forge = Forge::new(&server.base_url());
        let remixed = forge.remix("ada", "synth").await?;
        assert_eq!(remixed.username, "brian");
        assert_eq!(remixed.repo_name, "synth");
        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn search_encodes_query_sort_and_tags() -> Result<()> {
        let results: ProjectInfo = Faker.fake();

        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("GET").path("/api/project/synth&sort=likes&tags=audio");
                then.status(200).json_body(json!([
                    {
                        "title": results.title,
                        "username": results.username,
                        "pictureUrl": results.picture_url,
                        "repoName": results.repo_name,
                        "tags": results.tags,
                        "readme": results.readme,
                        "likeCount": results.like_count,
                    }
                ]));
            })
            .await;

        let forge = Forge::new(&server.base_url());
        assert_eq!(forge.search("synth", "likes", "audio").await?, vec![results]);
        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn recommendations_success() -> Result<()> {
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("GET").path("/api/rec");
                then.status(200).json_body(json!([
                    {
                        "name": "Trending",
                        "projects": [
                            {
                                "title": "synth",
                                "username": "ada",
                                "pictureUrl": "/p/ada.png",
                                "repoName": "synth",
                                "tags": ["audio"],
                                "readme": "# synth",
                                "likeCount": 4,
                            }
                        ],
                    }
                ]));
            })
            .await;

        let forge = Forge::new(&server.base_url());
        let categories = forge.recommendations().await?;
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].name, "Trending");
        assert_eq!(categories[0].projects[0].like_count, 4);
        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn followers_success() -> Result<()> {
        let followers: [InlineUser; 2] = [Faker.fake(), Faker.fake()];

        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("GET").path("/api/follow/followers");
                then.status(200).json_body(json!([
                    { "username": followers[0].username, "pictureUrl": followers[0].picture_url },
                    { "username": followers[1].username, "pictureUrl": followers[1].picture_url },
                ]));
            })
            .await;

        let forge = Forge::new(&server.base_url());
        assert_eq!(forge.followers().await?, followers);
        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn follow_bumps_refresh_token() -> Result<()> {
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("POST").path("/api/follow/ada");
                then.status(200);
            })
            .await;

        let forge = Forge::new(&server.base_url());
        let mut refresh = RefreshToken::default();
        let before = refresh.as_dep();
        forge.follow("ada", &mut refresh).await?;
        assert_ne!(refresh.as_dep(), before);
        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn comments_success() -> Result<()> {
        let user: InlineUser = Faker.fake();

        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("GET").path("/api/project/ada/synth/comments");
                then.status(200).json_body(json!([
                    {
                        "id": 1,
                        "user": { "username": user.username, "pictureUrl": user.picture_url },
                        "contents": "nice project",
                        "children": [],
                    }
                ]));
            })
            .await;

        let forge = Forge::new(&server.base_url());
        let comments = forge.comments("ada", "synth").await?;
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].contents, "nice project");
        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn post_comment_sends_parent_id() -> Result<()> {
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("POST")
                    .path("/api/project/ada/synth/comment")
                    .json_body(json!({ "contents": "agreed", "parent_id": 7 }));
                then.status(200);
            })
            .await;

        let forge = Forge::new(&server.base_url());
        let mut refresh = RefreshToken::default();
        forge
            .post_comment(
                "ada",
                "synth",
                &NewComment {
                    contents: "agreed".to_string(),
                    parent_id: Some(7),
                },
                &mut refresh,
            )
            .await?;
        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn update_project_sends_settings() -> Result<()> {
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("PUT")
                    .path("/api/project/ada/synth")
                    .json_body(json!({
                        "title": "synth v2",
                        "private": true,
                        "tags": ["audio"],
                    }));
                then.status(200);
            })
            .await;

        let forge = Forge::new(&server.base_url());
        let mut refresh = RefreshToken::default();
        forge
            .update_project(
                "ada",
                "synth",
                &ProjectSettings {
                    title: "synth v2".to_string(),
                    private: true,
                    tags: vec!["audio".to_string()],
                },
                &mut refresh,
            )
            .await?;
        mock.assert_async().await;
        Ok(())
    }
}
