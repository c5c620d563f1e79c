mod analyzer;
mod home;

pub use analyzer::Analyzer;
pub use home::Home;
