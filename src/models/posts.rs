use serde::{Deserialize, Serialize};

use crate::models::users::User;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Published,
    Draft,
    Hidden,
}

impl PostStatus {
    pub fn to_str(&self) -> &str {
        match self {
            Self::Published => "published",
            Self::Draft => "draft",
            Self::Hidden => "hidden",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "published" => Some(Self::Published),
            "draft" => Some(Self::Draft),
            "hidden" => Some(Self::Hidden),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub name: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: String,
    pub content: String,
    pub author: User,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(
        rename = "youtubeUrl",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub youtube_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Attachment>>,
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
    #[serde(rename = "isLiked")]
    pub is_liked: bool,
    #[serde(rename = "isSaved")]
    pub is_saved: bool,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    pub status: PostStatus,
    #[serde(rename = "commentsEnabled")]
    pub comments_enabled: bool,
    #[serde(rename = "likesVisible")]
    pub likes_visible: bool,
}
