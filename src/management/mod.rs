mod auth;
mod export;

pub use auth::TokenManager;
pub use export::ExportWriter;
