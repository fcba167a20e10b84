//! Data models for decrypted push notifications.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::types::{Result, WebPushError};

/// The category of event a push notification reports.
///
/// Servers keep introducing new categories; values this crate does not know
/// yet decode to [`NotificationType::Unknown`] with the raw wire value
/// preserved verbatim, and re-encode to exactly that value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NotificationType {
    /// Someone followed you.
    Follow,
    /// Someone mentioned you in their post.
    Mention,
    /// Someone reposted one of your posts.
    Repost,
    /// Someone favourited one of your posts.
    Favourite,
    /// A poll you have voted in or created has ended.
    Poll,
    /// Someone requested to follow you.
    FollowRequest,
    /// Someone you enabled notifications for has posted.
    Post,
    /// A post you interacted with has been edited.
    Update,
    /// Someone signed up.
    AdminSignUp,
    /// A new report has been filed.
    AdminReport,
    /// Some of your follow relationships have been severed by a moderation
    /// or block event.
    SeveredRelationships,
    /// Someone reacted with an emoji to one of your posts.
    EmojiReaction,
    /// A category this crate does not know; carries the raw wire value.
    Unknown(String),
}

impl NotificationType {
    /// Map a raw wire value to a notification type.
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "follow" => Self::Follow,
            "mention" => Self::Mention,
            "reblog" => Self::Repost,
            "favourite" => Self::Favourite,
            "poll" => Self::Poll,
            "follow_request" => Self::FollowRequest,
            "status" => Self::Post,
            "update" => Self::Update,
            "admin.sign_up" => Self::AdminSignUp,
            "admin.report" => Self::AdminReport,
            "severed_relationships" => Self::SeveredRelationships,
            "emoji_reaction" | "pleroma:emoji_reaction" => Self::EmojiReaction,
            _ => Self::Unknown(raw.to_owned()),
        }
    }

    /// The canonical wire value for this notification type.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Follow => "follow",
            Self::Mention => "mention",
            Self::Repost => "reblog",
            Self::Favourite => "favourite",
            Self::Poll => "poll",
            Self::FollowRequest => "follow_request",
            Self::Post => "status",
            Self::Update => "update",
            Self::AdminSignUp => "admin.sign_up",
            Self::AdminReport => "admin.report",
            Self::SeveredRelationships => "severed_relationships",
            Self::EmojiReaction => "emoji_reaction",
            Self::Unknown(raw) => raw,
        }
    }
}

impl<'de> Deserialize<'de> for NotificationType {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_raw(&raw))
    }
}

impl Serialize for NotificationType {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// A decrypted and decoded push notification payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushNotification {
    /// Access token identifying the subscription the push belongs to.
    pub access_token: String,
    /// Locale preferred by the receiving account (e.g. "en-gb").
    pub preferred_locale: String,
    /// Server-side id of the notification.
    pub notification_id: u64,
    /// Category of the notification.
    pub notification_type: NotificationType,
    /// Icon URL; may be empty.
    pub icon: String,
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub body: String,
}

impl PushNotification {
    /// Decode a decrypted payload as a push notification.
    ///
    /// # Errors
    /// `DecodeFailed` if the payload is not valid JSON or misses required
    /// fields.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        serde_json::from_slice(data).map_err(|e| WebPushError::DecodeFailed(e.to_string()))
    }
}
