//! SQL rewrite and parameter encryption for sharded databases.
//!
//! Takes one logical statement, already parsed into tokens and a bound
//! statement, and produces a physical statement with its parameters
//! for every route unit the router picked.

pub mod config;
pub mod encrypt;
pub mod error;
pub mod logger;
pub mod parameter;
pub mod rewrite;
pub mod route;
pub mod statement;
pub mod value;

pub use error::Error;
pub use logger::logger;
pub use rewrite::{RewriteContext, RewrittenUnit, SqlRewriteEngine};
pub use route::{RouteResult, RouteUnit};
pub use statement::Statement;
pub use value::Value;
