// Domain modules
pub mod member;
