pub mod cache;
pub mod chain;
pub mod circuit_breaker;
pub mod config;
pub mod extract;
pub mod normalize;
pub mod orchestration;
pub mod report;
pub mod routes;
pub mod status;
pub mod templates;
