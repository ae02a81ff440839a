pub mod ids;
pub mod logger;
pub mod redact;
pub mod validation;
