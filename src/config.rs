// src/config.rs

use std::{env, time::Duration};

use anyhow::Context;
use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::{
    common::cache::SummaryCache,
    db::{
        InviteRepository, RegistryRepository, StoreRepository, TransactionRepository,
        UserRepository,
    },
    services::{AuthService, InviteService, LedgerService, StoreService},
};

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,

    // Repositórios usados direto pelos guards/handlers
    pub store_repo: StoreRepository,
    pub user_repo: UserRepository,
    pub registry_repo: RegistryRepository,

    // Serviços (lógica de negócio)
    pub auth_service: AuthService,
    pub store_service: StoreService,
    pub ledger_service: LedgerService,
    pub invite_service: InviteService,
}

impl AppState {
    // Carrega as configurações e monta o estado.
    // Configuração ausente é erro fatal: a aplicação não deve subir.
    pub async fn new() -> anyhow::Result<Self> {
        // .env é opcional em produção (as variáveis vêm do ambiente)
        dotenvy::dotenv().ok();

        let database_url =
            env::var("DATABASE_URL").context("DATABASE_URL deve ser definida")?;
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET deve ser definido")?;

        let db_pool = match PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await
        {
            Ok(pool) => {
                tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");
                pool
            }
            Err(e) => {
                tracing::error!("🔥 Falha ao conectar ao banco de dados: {:?}", e);
                return Err(e.into());
            }
        };

        let user_repo = UserRepository::new(db_pool.clone());
        let store_repo = StoreRepository::new(db_pool.clone());
        let registry_repo = RegistryRepository::new(db_pool.clone());
        let tx_repo = TransactionRepository::new(db_pool.clone());
        let invite_repo = InviteRepository::new(db_pool.clone());

        let auth_service = AuthService::new(
            user_repo.clone(),
            store_repo.clone(),
            registry_repo.clone(),
            invite_repo.clone(),
            jwt_secret,
            db_pool.clone(),
        );
        let store_service = StoreService::new(
            store_repo.clone(),
            registry_repo.clone(),
            tx_repo.clone(),
            SummaryCache::new(),
            db_pool.clone(),
        );
        let ledger_service = LedgerService::new(tx_repo);
        let invite_service =
            InviteService::new(invite_repo, store_repo.clone(), db_pool.clone());

        Ok(Self {
            db_pool,
            store_repo,
            user_repo,
            registry_repo,
            auth_service,
            store_service,
            ledger_service,
            invite_service,
        })
    }
}
