// Composition root for the smart_meters service.
//
// Responsibilities
// - Read config from environment.
// - Build the meter store and initialize it before anything can query it.
// - Wire the store into the query handler and expose the HTTP router.

pub mod config;
pub mod graphql;
pub mod http;
pub mod state;
