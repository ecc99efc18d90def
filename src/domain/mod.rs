//! Domain values exchanged between the query client, controllers and views.

pub mod collection;
pub mod page;
pub mod query;
pub mod state;
pub mod types;
