//! Provider adapters and asset storage.

pub mod asset_store;
pub mod gemini;
pub mod hugging_face;
pub mod unavailable;
