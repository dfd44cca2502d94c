pub mod auth;
pub mod invites;
pub mod ledger;
pub mod registry;
pub mod settings;
pub mod stores;
