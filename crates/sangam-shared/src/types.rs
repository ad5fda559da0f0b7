use serde::{Deserialize, Serialize};

// Server-issued identifiers are opaque strings; the client never parses or
// generates them, so the newtypes only add type safety at the call seams.

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ProfileId(pub String);

impl ProfileId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProfileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ChatId(pub String);

impl ChatId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ChatId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct MessageId(pub String);

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct InterestId(pub String);

impl std::fmt::Display for InterestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NotificationId(pub String);

impl std::fmt::Display for NotificationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Account role reported by the server in the session profile.
///
/// Administrative and vendor accounts bypass subscription and
/// profile-completeness gates entirely.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Member,
    Admin,
    Vendor,
}

impl UserRole {
    /// Whether this role skips feature gating unconditionally.
    pub fn is_privileged(self) -> bool {
        matches!(self, UserRole::Admin | UserRole::Vendor)
    }
}

/// Lifecycle of an interest: pending until the recipient acts or the sender
/// withdraws.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InterestStatus {
    Pending,
    Accepted,
    Rejected,
    Withdrawn,
}

/// Server-side approval workflow for manually verified payments.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

/// Notification categories; the variant drives both the icon shown and the
/// screen a tap navigates to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Interest,
    InterestAccepted,
    Message,
    ProfileView,
    Subscription,
    System,
}

/// Screens a notification tap can navigate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTarget {
    Interests,
    Matches,
    Chat,
    OwnProfile,
    Subscription,
    Notifications,
}

impl NotificationKind {
    pub fn navigation_target(self) -> NavTarget {
        match self {
            NotificationKind::Interest => NavTarget::Interests,
            NotificationKind::InterestAccepted => NavTarget::Matches,
            NotificationKind::Message => NavTarget::Chat,
            NotificationKind::ProfileView => NavTarget::OwnProfile,
            NotificationKind::Subscription => NavTarget::Subscription,
            NotificationKind::System => NavTarget::Notifications,
        }
    }

    /// Icon name for list rendering.
    pub fn icon(self) -> &'static str {
        match self {
            NotificationKind::Interest => "heart",
            NotificationKind::InterestAccepted => "heart-filled",
            NotificationKind::Message => "chat-bubble",
            NotificationKind::ProfileView => "eye",
            NotificationKind::Subscription => "credit-card",
            NotificationKind::System => "bell",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn privileged_roles() {
        assert!(!UserRole::Member.is_privileged());
        assert!(UserRole::Admin.is_privileged());
        assert!(UserRole::Vendor.is_privileged());
    }

    #[test]
    fn notification_kind_wire_names() {
        let kind: NotificationKind = serde_json::from_str("\"profile_view\"").unwrap();
        assert_eq!(kind, NotificationKind::ProfileView);
        assert_eq!(kind.navigation_target(), NavTarget::OwnProfile);
    }
}
