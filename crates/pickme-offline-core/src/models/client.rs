use serde::{Deserialize, Serialize};

/// Custom data attached to a notification by whoever sent the push.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationData {
    pub url: Option<String>,
}

/// A notification the user clicked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub tag: Option<String>,
    pub title: String,
    pub data: Option<NotificationData>,
}

impl Notification {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.data = Some(NotificationData {
            url: Some(url.into()),
        });
        self
    }

    /// Target URL from the notification data, if the sender supplied one.
    pub fn target_url(&self) -> Option<&str> {
        self.data.as_ref().and_then(|d| d.url.as_deref())
    }
}

/// An open browser window belonging to the origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowClient {
    pub id: String,
    pub url: String,
}

impl WindowClient {
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_url() {
        assert_eq!(Notification::new("n").target_url(), None);
        assert_eq!(
            Notification::new("n").with_url("https://app.pickme.tv/movie/42").target_url(),
            Some("https://app.pickme.tv/movie/42")
        );

        let empty_data = Notification {
            data: Some(NotificationData::default()),
            ..Notification::new("n")
        };
        assert_eq!(empty_data.target_url(), None);
    }

    #[test]
    fn test_notification_data_from_push_payload() {
        let json = r#"{"title": "Nouveau film", "tag": null, "data": {"url": "https://app.pickme.tv/"}}"#;
        let n: Notification = serde_json::from_str(json).unwrap();
        assert_eq!(n.title, "Nouveau film");
        assert_eq!(n.target_url(), Some("https://app.pickme.tv/"));
    }
}
