pub mod audit;
pub mod auth;
pub mod billing;
pub mod dispatch;
pub mod file;
pub mod invite;
pub mod member;
pub mod meta;
pub mod org;
pub mod status;
