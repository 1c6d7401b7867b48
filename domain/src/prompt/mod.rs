//! Prompt assembly for the debate stages

pub mod template;

pub use template::PromptTemplate;
