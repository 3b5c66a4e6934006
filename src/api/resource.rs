use fake::Dummy;
use serde::{Deserialize, Serialize};

/// Minimal identity projection embedded wherever a user is referenced
/// without full profile data.
///
#[derive(Clone, Debug, Deserialize, Dummy, PartialEq, Eq)]
pub struct InlineUser {
    pub username: String,
    #[serde(rename = "pictureUrl")]
    pub picture_url: String,
}

/// Defines full user profile data structure.
///
#[derive(Clone, Debug, Deserialize, Dummy, PartialEq, Eq)]
pub struct User {
    pub username: String,
    #[serde(rename = "pictureUrl")]
    pub picture_url: String,
    #[serde(rename = "joinDate")]
    pub join_date: String,
    pub bio: String,
}

/// Defines project data structure.
///
#[derive(Clone, Debug, Deserialize, Dummy, PartialEq, Eq)]
pub struct Project {
    pub title: String,
    pub username: String,
    #[serde(rename = "pictureUrl")]
    pub picture_url: String,
    #[serde(rename = "repoName")]
    pub repo_name: String,
    pub tags: Vec<String>,
    pub readme: String,
    #[serde(rename = "likeCount")]
    pub like_count: i64,
    #[serde(rename = "githubUrl")]
    pub github_url: String,
    #[serde(rename = "uploadTime")]
    pub upload_time: String,
    #[serde(rename = "public")]
    pub is_public: bool,
    pub owned: bool,
}

/// Project projection embedded in card listings (search results, dashboard,
/// recommendation categories).
///
#[derive(Clone, Debug, Deserialize, Dummy, PartialEq, Eq)]
pub struct ProjectInfo {
    pub title: String,
    pub username: String,
    #[serde(rename = "pictureUrl")]
    pub picture_url: String,
    #[serde(rename = "repoName")]
    pub repo_name: String,
    pub tags: Vec<String>,
    pub readme: String,
    #[serde(rename = "likeCount")]
    pub like_count: i64,
}

/// Named group of recommended projects on the explore view.
///
#[derive(Clone, Debug, Deserialize, Dummy, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub projects: Vec<ProjectInfo>,
}

/// Coordinates of a freshly remixed project, served by the remix endpoint.
///
#[derive(Clone, Debug, Deserialize, Dummy, PartialEq, Eq)]
pub struct RemixedProject {
    pub username: String,
    pub repo_name: String,
}

/// Defines one node of a project's comment tree. Depth is unbounded and
/// `children` preserves server insertion order; an empty `children` marks a
/// leaf.
///
// No Dummy derive: faking a recursive tree would branch without bound.
// Tests build comment trees by hand.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Comment {
    pub id: i64,
    pub user: InlineUser,
    pub contents: String,
    #[serde(default)]
    pub children: Vec<Comment>,
}

/// Payload for submitting a new comment. `parent_id` is `None` for
/// top-level comments and the target node's id otherwise.
///
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct NewComment {
    pub contents: String,
    pub parent_id: Option<i64>,
}

/// Payload for saving project settings.
///
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct ProjectSettings {
    pub title: String,
    pub private: bool,
    pub tags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn comment_tree_deserializes_with_missing_children() {
        let value = json!([
            {
                "id": 1,
                "user": { "username": "ada", "pictureUrl": "/p/ada.png" },
                "contents": "first",
                "children": [
                    {
                        "id": 2,
                        "user": { "username": "brian", "pictureUrl": "/p/brian.png" },
                        "contents": "reply"
                    }
                ]
            }
        ]);

        let comments: Vec<Comment> = serde_json::from_value(value).unwrap();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].children.len(), 1);
        assert!(comments[0].children[0].children.is_empty());
    }

    #[test]
    fn new_comment_serializes_null_parent_for_top_level() {
        let comment = NewComment {
            contents: "hello".to_string(),
            parent_id: None,
        };
        let value = serde_json::to_value(&comment).unwrap();
        assert_eq!(value, json!({ "contents": "hello", "parent_id": null }));
    }

    #[test]
    fn project_maps_renamed_fields() {
        let value = json!({
            "title": "synth",
            "username": "ada",
            "pictureUrl": "/p/ada.png",
            "repoName": "synth",
            "tags": ["audio"],
            "readme": "# synth",
            "likeCount": 4,
            "githubUrl": "https://github.com/ada/synth",
            "uploadTime": "2024-03-01T12:00:00Z",
            "public": true,
            "owned": false
        });

        let project: Project = serde_json::from_value(value).unwrap();
        assert!(project.is_public);
        assert_eq!(project.like_count, 4);
        assert_eq!(project.repo_name, "synth");
    }
}
