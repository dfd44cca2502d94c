// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{InviteRepository, RegistryRepository, StoreRepository, UserRepository},
    models::{
        auth::{Claims, User},
        store::StoreRole,
    },
    services::invite_service,
};

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    store_repo: StoreRepository,
    registry_repo: RegistryRepository,
    invite_repo: InviteRepository,
    jwt_secret: String,
    pool: PgPool,
}

impl AuthService {
    pub fn new(
        user_repo: UserRepository,
        store_repo: StoreRepository,
        registry_repo: RegistryRepository,
        invite_repo: InviteRepository,
        jwt_secret: String,
        pool: PgPool,
    ) -> Self {
        Self {
            user_repo,
            store_repo,
            registry_repo,
            invite_repo,
            jwt_secret,
            pool,
        }
    }

    /// Registro. Com convite, o usuário entra na loja do convite; sem,
    /// ganha uma loja nova como admin. Usuário + perfil + loja/acesso
    /// saem em UMA transação: falha no meio desfaz tudo.
    pub async fn register_user(
        &self,
        email: &str,
        password: &str,
        invite_token: Option<&str>,
    ) -> Result<String, AppError> {
        // 1. Hashing (fora da transação, não toca no banco)
        let password_clone = password.to_owned();
        let hashed_password =
            tokio::task::spawn_blocking(move || hash(&password_clone, bcrypt::DEFAULT_COST))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        // Com convite, classifica ANTES de criar qualquer coisa:
        // convite ruim não deve deixar usuário órfão para trás.
        let invite = match invite_token {
            Some(token) => {
                let found = self
                    .invite_repo
                    .find_by_token_hash(&invite_service::token_digest(token))
                    .await?;
                Some(invite_service::classify(found, Utc::now())?)
            }
            None => None,
        };

        // --- INÍCIO DA TRANSAÇÃO ---
        let mut tx = self.pool.begin().await?;

        // 2. Cria usuário + perfil
        let new_user = self
            .user_repo
            .create_user(&mut *tx, email, &hashed_password)
            .await?;

        let username = email.split('@').next().unwrap_or(email);
        self.user_repo
            .create_profile(&mut *tx, new_user.id, username)
            .await?;

        // 3. Convite ou loja nova
        match invite {
            Some(invite) => {
                let consumed = self
                    .invite_repo
                    .consume(&mut *tx, invite.id, new_user.id)
                    .await?;
                if !consumed {
                    // Alguém resgatou entre a classificação e agora.
                    return Err(AppError::InviteAlreadyUsed);
                }
                self.store_repo
                    .grant_access(&mut *tx, invite.store_id, new_user.id, invite.role)
                    .await?;
            }
            None => {
                let store = self
                    .store_repo
                    .create_store(&mut *tx, &format!("Loja de {username}"), new_user.id)
                    .await?;
                self.store_repo
                    .grant_access(&mut *tx, store.id, new_user.id, StoreRole::Admin)
                    .await?;
                self.registry_repo
                    .seed_default_fixed_assets(&mut *tx, store.id)
                    .await?;
            }
        }

        // 4. Commit
        tx.commit().await?;
        // --- FIM DA TRANSAÇÃO ---

        tracing::info!("👤 Usuário {} registrado", new_user.id);

        // 5. Gera o token (não precisa de transação)
        self.create_token(new_user.id)
    }

    pub async fn login_user(&self, email: &str, password: &str) -> Result<String, AppError> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();

        // Executa a verificação em um thread separado
        let is_password_valid =
            tokio::task::spawn_blocking(move || verify(&password_clone, &password_hash_clone))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        self.create_token(user.id)
    }

    pub async fn validate_token(&self, token: &str) -> Result<User, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        self.user_repo
            .find_by_id(token_data.claims.sub)
            .await?
            .ok_or(AppError::UserNotFound)
    }

    fn create_token(&self, user_id: Uuid) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(7);

        let claims = Claims {
            sub: user_id,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}
