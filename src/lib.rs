//! Email classifier: categorizes customer emails and suggests replies.

pub mod analysis;
pub mod api;
pub mod config;
pub mod document;
pub mod error;
pub mod extract;
pub mod logging;
pub mod nlp;
pub mod pipeline;
