//! # graphnb query
//!
//! The boundary between a graph database and the graph builder.
//!
//! A [`Database`] runs a query and hands back rows plus the schema JSON;
//! [`execute_query`] turns that into the response envelope the
//! visualization front end consumes.

pub mod database;
pub mod error;
pub mod execute;
pub mod result;

pub use database::{Database, FixtureDatabase};
pub use error::{QueryError, QueryResult};
pub use execute::{execute_query, GraphResponse, QueryResponse};
pub use result::{columns_to_rows, Field, ResultSet};
