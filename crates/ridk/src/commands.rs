pub mod disable;
pub mod enable;
pub mod exec;
pub mod install;
pub mod version;
