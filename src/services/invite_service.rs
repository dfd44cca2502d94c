// src/services/invite_service.rs
//
// Convites no modelo forte: token opaco de 32 bytes, guardado só como
// digest sha256, uso único e com expiração. Link compartilhável nunca
// carrega o id da loja em claro.

use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use sha2::{Digest, Sha256};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{InviteRepository, StoreRepository},
    models::{
        invite::{Invite, InviteCreatedResponse, RedeemInviteResponse, ValidateInviteResponse},
        store::StoreRole,
    },
};

const DEFAULT_EXPIRY_DAYS: i64 = 7;

/// Gera o material do token: 32 bytes aleatórios em hex.
pub fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Digest sha256 (hex) do token. É isso que vai ao banco, nunca o texto.
pub fn token_digest(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

/// Classifica o resultado da busca de um convite.
/// As três falhas são distinguíveis: inexistente, já usado, expirado.
pub fn classify(invite: Option<Invite>, now: DateTime<Utc>) -> Result<Invite, AppError> {
    let invite = invite.ok_or(AppError::InviteInvalid)?;

    if invite.used_at.is_some() {
        return Err(AppError::InviteAlreadyUsed);
    }
    if invite.expires_at < now {
        return Err(AppError::InviteExpired);
    }
    Ok(invite)
}

#[derive(Clone)]
pub struct InviteService {
    invite_repo: InviteRepository,
    store_repo: StoreRepository,
    pool: PgPool,
}

impl InviteService {
    pub fn new(invite_repo: InviteRepository, store_repo: StoreRepository, pool: PgPool) -> Self {
        Self {
            invite_repo,
            store_repo,
            pool,
        }
    }

    /// Cria um convite para a loja. Papel desconhecido cai para `user`.
    /// O token em claro só existe nesta resposta.
    pub async fn create_invite(
        &self,
        store_id: Uuid,
        created_by: Uuid,
        role: Option<&str>,
        expires_in_days: Option<i64>,
    ) -> Result<InviteCreatedResponse, AppError> {
        let role = role
            .map(StoreRole::parse_lenient)
            .unwrap_or(StoreRole::User);

        let days = expires_in_days.unwrap_or(DEFAULT_EXPIRY_DAYS);
        let expires_at = Utc::now() + Duration::days(days);

        let token = generate_token();
        let invite = self
            .invite_repo
            .create(store_id, role, &token_digest(&token), created_by, expires_at)
            .await?;

        tracing::info!(
            "✉️  Convite {} criado para a loja {} (papel {:?})",
            invite.id,
            store_id,
            role
        );

        Ok(InviteCreatedResponse {
            invite_id: invite.id,
            store_id: invite.store_id,
            role: invite.role,
            token,
            expires_at: invite.expires_at,
        })
    }

    /// Resgata um convite para o usuário autenticado: consome o token e
    /// concede o acesso na MESMA transação. Resgatar duas vezes falha na
    /// segunda com "já utilizado".
    pub async fn redeem(
        &self,
        user_id: Uuid,
        token: &str,
    ) -> Result<RedeemInviteResponse, AppError> {
        let found = self
            .invite_repo
            .find_by_token_hash(&token_digest(token))
            .await?;
        let invite = classify(found, Utc::now())?;

        let mut tx = self.pool.begin().await?;

        // Corrida entre dois resgates: só um consegue consumir.
        let consumed = self
            .invite_repo
            .consume(&mut *tx, invite.id, user_id)
            .await?;
        if !consumed {
            return Err(AppError::InviteAlreadyUsed);
        }

        self.store_repo
            .grant_access(&mut *tx, invite.store_id, user_id, invite.role)
            .await?;

        tx.commit().await?;

        tracing::info!(
            "🔑 Usuário {} entrou na loja {} via convite {}",
            user_id,
            invite.store_id,
            invite.id
        );

        Ok(RedeemInviteResponse {
            store_id: invite.store_id,
            role: invite.role,
        })
    }

    /// Validação pública (a tela de cadastro chama antes do sign-up):
    /// responde um booleano e, quando válido, a loja canônica.
    /// Convite ruim NÃO é erro aqui; é só `valid: false`.
    pub async fn validate(&self, token: &str) -> Result<ValidateInviteResponse, AppError> {
        let found = self
            .invite_repo
            .find_by_token_hash(&token_digest(token))
            .await?;

        match classify(found, Utc::now()) {
            Ok(invite) => {
                let store = self
                    .store_repo
                    .find_by_id(invite.store_id)
                    .await?
                    .ok_or(AppError::StoreNotFound)?;

                Ok(ValidateInviteResponse {
                    valid: true,
                    store_id: Some(store.id),
                    store_name: Some(store.name),
                })
            }
            Err(
                AppError::InviteInvalid | AppError::InviteAlreadyUsed | AppError::InviteExpired,
            ) => Ok(ValidateInviteResponse {
                valid: false,
                store_id: None,
                store_name: None,
            }),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invite(used: bool, expired: bool) -> Invite {
        let now = Utc::now();
        Invite {
            id: Uuid::new_v4(),
            store_id: Uuid::new_v4(),
            role: StoreRole::User,
            token_hash: token_digest("abc"),
            created_by: Uuid::new_v4(),
            expires_at: if expired {
                now - Duration::days(1)
            } else {
                now + Duration::days(7)
            },
            used_at: used.then_some(now - Duration::hours(1)),
            used_by: used.then(Uuid::new_v4),
            created_at: now - Duration::days(2),
        }
    }

    #[test]
    fn digest_e_deterministico_e_nao_vaza_o_token() {
        let token = generate_token();
        assert_eq!(token.len(), 64); // 32 bytes em hex

        let digest = token_digest(&token);
        assert_eq!(digest, token_digest(&token));
        assert_ne!(digest, token);
    }

    #[test]
    fn tokens_gerados_nao_se_repetem() {
        assert_ne!(generate_token(), generate_token());
    }

    #[test]
    fn classificacao_distingue_as_tres_falhas() {
        let now = Utc::now();

        assert!(matches!(
            classify(None, now),
            Err(AppError::InviteInvalid)
        ));
        assert!(matches!(
            classify(Some(invite(true, false)), now),
            Err(AppError::InviteAlreadyUsed)
        ));
        assert!(matches!(
            classify(Some(invite(false, true)), now),
            Err(AppError::InviteExpired)
        ));
    }

    #[test]
    fn convite_usado_e_expirado_conta_como_usado() {
        // O resgate duplo precisa responder "já utilizado", não "expirado".
        let now = Utc::now();
        assert!(matches!(
            classify(Some(invite(true, true)), now),
            Err(AppError::InviteAlreadyUsed)
        ));
    }

    #[test]
    fn convite_valido_passa() {
        let i = invite(false, false);
        let ok = classify(Some(i.clone()), Utc::now()).unwrap();
        assert_eq!(ok.id, i.id);
    }

    #[test]
    fn papel_desconhecido_vira_user() {
        assert_eq!(StoreRole::parse_lenient("admin"), StoreRole::Admin);
        assert_eq!(StoreRole::parse_lenient("ADMIN "), StoreRole::Admin);
        assert_eq!(StoreRole::parse_lenient("gerente"), StoreRole::User);
        assert_eq!(StoreRole::parse_lenient(""), StoreRole::User);
    }
}
