pub mod locale;
pub mod project;
