pub mod auth;
pub mod invite_service;
pub mod ledger_service;
pub mod store_service;

pub use auth::AuthService;
pub use invite_service::InviteService;
pub use ledger_service::LedgerService;
pub use store_service::StoreService;
