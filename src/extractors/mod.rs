//! Request extractors that run as pipeline stages ahead of handlers.

mod path;
mod validated;
pub use path::EntityPath;
pub use validated::ValidatedForm;
