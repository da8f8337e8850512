//! # exact-online-rest
//!
//! Typed access to Exact Online REST collections.
//!
//! ## Features
//!
//! - **Resources** - subscription types, budgets, sales orders, financial
//!   transactions and transaction lines
//! - **Paginated reads** - page by page, fully drained, or as a `Stream`
//! - **Filters** - `$filter` predicates with OData literal escaping
//! - **Mutations** - create, partial update and delete by GUID
//! - **Counts** - `$count` queries, optionally limited by creation date
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use exact_online_client::{ExactConfig, StaticToken};
//! use exact_online_rest::{ExactRestClient, ListParams, SubscriptionType};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), exact_online_rest::Error> {
//!     let client = ExactRestClient::new(
//!         ExactConfig::new(123456),
//!         Arc::new(StaticToken::new("access_token_here")),
//!     )?;
//!     let types = client.resource::<SubscriptionType>();
//!
//!     // One page at a time
//!     let mut call = types.list(&ListParams::new())?;
//!     while !call.is_exhausted() {
//!         let page = call.next_page().await?;
//!         if page.is_empty() {
//!             break;
//!         }
//!         println!("{} records", page.len());
//!     }
//!
//!     // Count
//!     let total = types.count(None).await?;
//!
//!     Ok(())
//! }
//! ```

mod call;
mod client;
mod entity;
mod error;
mod filter;
mod query_builder;
pub mod resources;
pub mod types;

pub use call::PaginatedCall;
pub use client::{ExactRestClient, ResourceClient};
pub use entity::{count_path, list_path, Entity, ListParams};
pub use error::{Error, ErrorKind, Result};
pub use filter::{Filter, FilterValue, Operator};
pub use query_builder::QueryBuilder;
pub use resources::{
    Budget, BudgetUpdate, FinancialTransaction, FinancialTransactionUpdate, SalesOrder,
    SalesOrderUpdate, SubscriptionType, SubscriptionTypeUpdate, TransactionLine,
    TransactionLineUpdate,
};
