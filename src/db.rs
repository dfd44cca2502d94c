pub mod invite_repo;
pub mod registry_repo;
pub mod store_repo;
pub mod transaction_repo;
pub mod user_repo;

pub use invite_repo::InviteRepository;
pub use registry_repo::RegistryRepository;
pub use store_repo::StoreRepository;
pub use transaction_repo::TransactionRepository;
pub use user_repo::UserRepository;
