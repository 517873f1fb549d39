pub mod feed;
pub mod micropost;
pub mod user;
