pub mod agent;
pub mod document;
pub mod project;
