//! Feature adapter interfaces and the built-in HTTP backends.

pub mod adapter;
pub mod chatbot;
pub mod data;
pub mod document;
pub mod endpoints;
pub mod host;
pub mod http;
pub mod image;
pub mod registry;
pub mod resource;
pub mod webpage;

/// Trait implemented by all feature adapters.
pub use adapter::{FeatureAdapter, Requirement, Turn};
/// Remote chatbot adapter.
pub use chatbot::GenericChatbot;
/// CSV analysis adapter.
pub use data::DataAnalysis;
/// Document upload + Q&A adapter.
pub use document::DocumentChat;
/// Backend URL set.
pub use endpoints::Endpoints;
/// Host environment boundary.
pub use host::{HostContext, StaticHost};
/// Image generation adapter.
pub use image::ImageGen;
/// Per-feature adapter construction.
pub use registry::{AdapterFactory, HttpAdapters};
/// User-selected file.
pub use resource::FileHandle;
/// Webpage Q&A adapter.
pub use webpage::WebpageChat;
