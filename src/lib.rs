//! # trustpilot-query
//!
//! Fluent query builder for the Trustpilot review API.
//!
//! ```rust,ignore
//! use trustpilot_query::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> trustpilot_query::Result<()> {
//!     let client = TrustpilotClient::new("https://api.trustpilot.com".to_string())?;
//!     let reviews = Resource::new(client, "/v1/business-units/abc/reviews").with_items_key("reviews");
//!
//!     let items = reviews
//!         .query()
//!         .filter("stars", 5)
//!         .order("createdAt", "desc")
//!         .limit(20)
//!         .get()
//!         .await?;
//!
//!     for item in &items {
//!         println!("{:?}", item.created_at());
//!     }
//!     Ok(())
//! }
//! ```

pub use error::AppError;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::Result;
    pub use crate::api::client::{Resource, TrustpilotClient};
    pub use crate::api::item::{Field, Item};
    pub use crate::error::AppError;
    pub use crate::query::{Builder, FilterValue, Query, QueryValue, Queryable};
}

/// Main layers (dependency flow: CLI → Query → API)
pub mod cli; // Command-line interface
pub mod query; // Builder and rendered query
pub mod storage; // Configuration persistence

/// Support modules
pub mod api; // HTTP client and response items
pub mod display; // Output formatting
pub mod error; // Error handling
pub mod utils; // Shared helpers

pub type Result<T> = std::result::Result<T, AppError>;
