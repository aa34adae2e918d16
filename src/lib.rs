pub mod config;
pub mod content;
pub mod logger;
pub mod post_cache;
pub mod repository;
pub mod resolver;
pub mod server;
mod query_string;
mod test_data;
mod text_utils;
