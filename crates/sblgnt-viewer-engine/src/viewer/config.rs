use serde::Serialize;
use serde_json::Value;

use crate::models::string_field;

pub const DEFAULT_DATA_URL: &str = "data/mark.json";
pub const DEFAULT_MANIFEST_URL: &str = "data/manifest.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusMessages {
    pub loading: String,
    pub error: String,
    pub empty: String,
}

impl Default for StatusMessages {
    fn default() -> Self {
        Self {
            loading: "Loading the SBLGNT text…".to_string(),
            error: "Unable to load the Gospel of Mark at this time.".to_string(),
            empty: "No verse data available.".to_string(),
        }
    }
}

/// Runtime configuration of one viewer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewerConfig {
    pub data_url: String,
    pub manifest_url: String,
    pub status_messages: StatusMessages,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            data_url: DEFAULT_DATA_URL.to_string(),
            manifest_url: DEFAULT_MANIFEST_URL.to_string(),
            status_messages: StatusMessages::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusMessagesPatch {
    pub loading: Option<String>,
    pub error: Option<String>,
    pub empty: Option<String>,
}

/// A partial configuration update.
///
/// Every field is optional. Blank strings never make it into a patch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigPatch {
    pub data_url: Option<String>,
    pub manifest_url: Option<String>,
    pub status_messages: StatusMessagesPatch,
}

impl ConfigPatch {
    /// Read a patch from loosely-typed input, keeping only usable fields.
    ///
    /// Accepts camelCase or snake_case keys. Anything that is not an object,
    /// and any value that is not a non-blank string, is ignored.
    pub fn from_value(value: &Value) -> Self {
        if !value.is_object() {
            return Self::default();
        }

        let messages = value
            .get("statusMessages")
            .or_else(|| value.get("status_messages"))
            .filter(|messages| messages.is_object());

        Self {
            data_url: string_field(value, &["dataUrl", "data_url"]),
            manifest_url: string_field(value, &["manifestUrl", "manifest_url"]),
            status_messages: messages
                .map(|messages| StatusMessagesPatch {
                    loading: string_field(messages, &["loading"]),
                    error: string_field(messages, &["error"]),
                    empty: string_field(messages, &["empty"]),
                })
                .unwrap_or_default(),
        }
    }

    pub fn data_url(url: impl Into<String>) -> Self {
        Self {
            data_url: Some(url.into()),
            ..Self::default()
        }
    }

    /// Fields set in `other` replace fields set in `self`
    pub fn merged_with(mut self, other: ConfigPatch) -> Self {
        self.data_url = other.data_url.or(self.data_url);
        self.manifest_url = other.manifest_url.or(self.manifest_url);
        self.status_messages.loading = other.status_messages.loading.or(self.status_messages.loading);
        self.status_messages.error = other.status_messages.error.or(self.status_messages.error);
        self.status_messages.empty = other.status_messages.empty.or(self.status_messages.empty);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl ViewerConfig {
    pub fn apply(&mut self, patch: &ConfigPatch) {
        let usable = |value: &Option<String>| value.clone().filter(|v| !v.trim().is_empty());

        if let Some(url) = usable(&patch.data_url) {
            self.data_url = url;
        }
        if let Some(url) = usable(&patch.manifest_url) {
            self.manifest_url = url;
        }
        if let Some(message) = usable(&patch.status_messages.loading) {
            self.status_messages.loading = message;
        }
        if let Some(message) = usable(&patch.status_messages.error) {
            self.status_messages.error = message;
        }
        if let Some(message) = usable(&patch.status_messages.empty) {
            self.status_messages.empty = message;
        }
    }
}
