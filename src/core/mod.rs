// src/core/mod.rs

pub mod form;
pub mod html;
pub mod net;
pub mod sanitize;

pub use form::{Control, SubmissionTarget};
pub use html::Document;
pub use net::Conversation;
