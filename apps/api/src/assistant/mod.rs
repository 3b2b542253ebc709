//! The chat assistant core: prompt composition, keyword context extraction,
//! response generation, and conversation memory.

pub mod context;
pub mod generator;
pub mod handlers;
pub mod history;
pub mod prompts;
