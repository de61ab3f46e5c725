//! Fetch a statistical table published behind a CKAN-style open-data
//! catalogue and rewrite it: the stacked header rows become one composite
//! header, a configured window of data rows is kept, and the distinct value
//! domain of each key column is collected into a companion info record.

pub mod config;
pub mod error;
pub mod fetch;
pub mod output;
pub mod transform;
