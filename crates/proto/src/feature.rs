use serde::{Deserialize, Serialize};

/// One of the AI-backed features a user can converse with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    /// Q&A about the page open in the active tab.
    WebpageChat,
    /// Q&A about an uploaded document.
    DocumentChat,
    /// Insights generated from a CSV file.
    DataAnalysis,
    /// General-purpose chatbot.
    GenericChatbot,
    /// Prompt-to-image generation.
    ImageGen,
}

impl Feature {
    /// All features, in menu order.
    pub const ALL: [Feature; 5] = [
        Feature::WebpageChat,
        Feature::DocumentChat,
        Feature::DataAnalysis,
        Feature::GenericChatbot,
        Feature::ImageGen,
    ];

    /// Human-readable menu label.
    pub fn title(self) -> &'static str {
        match self {
            Feature::WebpageChat => "Chat with Webpage",
            Feature::DocumentChat => "Chat with Document",
            Feature::DataAnalysis => "Data Analysis",
            Feature::GenericChatbot => "AI Chatbot",
            Feature::ImageGen => "Image Generator",
        }
    }

    /// Canonical identifier used on the command line and in config.
    pub fn as_str(self) -> &'static str {
        match self {
            Feature::WebpageChat => "webpage",
            Feature::DocumentChat => "document",
            Feature::DataAnalysis => "data",
            Feature::GenericChatbot => "chatbot",
            Feature::ImageGen => "image",
        }
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Feature {
    type Err = crate::error::ProtoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "webpage" => Ok(Feature::WebpageChat),
            "document" | "doc" => Ok(Feature::DocumentChat),
            "data" | "csv" => Ok(Feature::DataAnalysis),
            "chatbot" | "chat" => Ok(Feature::GenericChatbot),
            "image" => Ok(Feature::ImageGen),
            other => Err(crate::error::ProtoError::InvalidFeature(other.to_string())),
        }
    }
}

/// Which screen is presented: the feature menu or exactly one feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NavigationState {
    /// Feature picker.
    #[default]
    Menu,
    /// A feature's conversation.
    Active(Feature),
}

impl NavigationState {
    /// The active feature, if any.
    pub fn feature(self) -> Option<Feature> {
        match self {
            NavigationState::Menu => None,
            NavigationState::Active(feature) => Some(feature),
        }
    }
}
