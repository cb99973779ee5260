pub mod http;

pub use http::HttpIdentityResolver;
