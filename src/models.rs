pub mod auth;
pub mod invite;
pub mod ledger;
pub mod registry;
pub mod store;
