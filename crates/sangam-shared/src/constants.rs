/// Application name
pub const APP_NAME: &str = "Sangam";

/// Minimum number of profile photos for a complete profile
pub const MIN_PROFILE_PHOTOS: usize = 3;

/// Tolerance (in currency units) when checking a mixed UPI + cash split
/// against the plan price
pub const MIXED_PAYMENT_TOLERANCE: f64 = 1.0;

/// Label for file-message download links when the server sent no file name
pub const DOWNLOAD_FALLBACK_LABEL: &str = "Download file";

/// Maximum attachment upload size in bytes (25 MiB)
pub const MAX_UPLOAD_SIZE: usize = 25 * 1024 * 1024;

/// Chat list refetch interval in seconds
pub const CHAT_LIST_POLL_SECS: u64 = 5;

/// Open conversation refetch interval in seconds
pub const CONVERSATION_POLL_SECS: u64 = 3;

/// Typing-state refetch interval in seconds
pub const TYPING_POLL_SECS: u64 = 1;

/// Notification refetch interval in seconds
pub const NOTIFICATION_POLL_SECS: u64 = 5;

/// Subscription-status refetch interval in seconds
pub const SUBSCRIPTION_POLL_SECS: u64 = 10;

/// Local-storage key for the last-used search filter set
pub const STORAGE_KEY_SEARCH_PREFERENCES: &str = "searchPreferences";

/// Local-storage key for the saved-search list
pub const STORAGE_KEY_SAVED_SEARCHES: &str = "savedSearches";
