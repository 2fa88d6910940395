//! The payload handed to the host story box.

use serde::Serialize;

/// Background reference consumed by the host's story editor. Built fresh per
/// invocation and handed off immediately; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoryPayload {
    pub background_type: BackgroundType,
    pub url: String,
}

/// The host only accepts image backgrounds from this pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundType {
    Image,
}

impl StoryPayload {
    pub fn image(url: impl Into<String>) -> Self {
        Self {
            background_type: BackgroundType::Image,
            url: url.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_for_the_host_bridge() {
        let payload = StoryPayload::image("data:image/jpeg;base64,QUJD");
        let json = serde_json::to_string(&payload).unwrap();
        assert_eq!(
            json,
            r#"{"background_type":"image","url":"data:image/jpeg;base64,QUJD"}"#
        );
    }
}
