pub mod http;
pub mod visitor_middleware;
