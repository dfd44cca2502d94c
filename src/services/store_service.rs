// src/services/store_service.rs

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{cache::SummaryCache, error::AppError},
    db::{RegistryRepository, StoreRepository, TransactionRepository},
    models::store::{ActiveStoreView, Store, StoreRole, StoreSummary},
    services::ledger_service,
};

/// Decide a loja ativa. Um id explícito (query param do cliente) vence
/// SEMPRE, mesmo que o snapshot local aponte outra loja; sem ele, uma
/// loja única é ativada sozinha.
pub fn resolve_active_store(
    explicit: Option<Uuid>,
    summaries: &[StoreSummary],
) -> Option<Uuid> {
    if let Some(id) = explicit {
        return Some(id);
    }
    match summaries {
        [only] => Some(only.store_id),
        _ => None,
    }
}

#[derive(Clone)]
pub struct StoreService {
    store_repo: StoreRepository,
    registry_repo: RegistryRepository,
    tx_repo: TransactionRepository,
    cache: SummaryCache,
    pool: PgPool,
}

impl StoreService {
    pub fn new(
        store_repo: StoreRepository,
        registry_repo: RegistryRepository,
        tx_repo: TransactionRepository,
        cache: SummaryCache,
        pool: PgPool,
    ) -> Self {
        Self {
            store_repo,
            registry_repo,
            tx_repo,
            cache,
            pool,
        }
    }

    /// LÓGICA DE NEGÓCIO: cria a loja e, atomicamente, torna o criador
    /// admin dela e semeia os custos fixos padrão. Ou sai tudo, ou nada
    /// (sem estado parcial órfão).
    pub async fn create_store_with_owner(
        &self,
        name: &str,
        owner_id: Uuid,
    ) -> Result<Store, AppError> {
        // 1. Inicia a transação
        let mut tx = self.pool.begin().await?;

        // 2. Cria a loja
        let store = self.store_repo.create_store(&mut *tx, name, owner_id).await?;

        // 3. O criador entra como admin
        self.store_repo
            .grant_access(&mut *tx, store.id, owner_id, StoreRole::Admin)
            .await?;

        // 4. Custos fixos padrão (Aluguel, Energia, Água)
        self.registry_repo
            .seed_default_fixed_assets(&mut *tx, store.id)
            .await?;

        // 5. Commit
        tx.commit().await?;

        tracing::info!("🏪 Loja '{}' criada (dono {})", store.name, owner_id);
        Ok(store)
    }

    /// O resolvedor de loja ativa (o "seletor de lojas").
    /// Falha no fetch NÃO vira erro: cai para o snapshot do usuário,
    /// ou para uma lista vazia, e a UI renderiza o estado vazio.
    pub async fn resolve_stores(
        &self,
        user_id: Uuid,
        explicit_store_id: Option<Uuid>,
    ) -> Result<ActiveStoreView, AppError> {
        let (summaries, from_cache) = match self.load_summaries(user_id).await {
            Ok(summaries) => {
                // Sucesso: sobrescreve o snapshot do usuário.
                self.cache.store(user_id, summaries.clone()).await;
                (summaries, false)
            }
            Err(e) => {
                tracing::warn!(
                    "Falha ao montar resumos das lojas do usuário {}: {e}. Usando snapshot.",
                    user_id
                );
                match self.cache.get(user_id).await {
                    Some(snapshot) => (snapshot, true),
                    None => (Vec::new(), true),
                }
            }
        };

        let active_store_id = resolve_active_store(explicit_store_id, &summaries);

        Ok(ActiveStoreView {
            active_store_id,
            stores: summaries,
            from_cache,
        })
    }

    // Lojas acessíveis + resumo do mês corrente de cada uma,
    // reduzido em memória a partir de uma consulta só.
    async fn load_summaries(&self, user_id: Uuid) -> Result<Vec<StoreSummary>, AppError> {
        let stores = self.store_repo.get_stores_for_user(user_id).await?;
        if stores.is_empty() {
            return Ok(Vec::new());
        }

        let store_ids: Vec<Uuid> = stores.iter().map(|s| s.store_id).collect();
        let (since, until) = ledger_service::month_window(Utc::now());
        let rows = self
            .tx_repo
            .monthly_rows_for_stores(&store_ids, since, until)
            .await?;

        Ok(ledger_service::monthly_store_summaries(&stores, &rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn summary(store_id: Uuid) -> StoreSummary {
        StoreSummary {
            store_id,
            store_name: "Loja".into(),
            role: StoreRole::User,
            month_income: Decimal::ZERO,
            month_expense: Decimal::ZERO,
            month_profit: Decimal::ZERO,
        }
    }

    #[test]
    fn id_explicito_nunca_e_substituido() {
        let pedido = Uuid::new_v4();
        let outra = Uuid::new_v4();

        // Mesmo com o snapshot apontando outra loja, o id pedido vence.
        let active = resolve_active_store(Some(pedido), &[summary(outra)]);
        assert_eq!(active, Some(pedido));
    }

    #[test]
    fn loja_unica_vira_ativa_sozinha() {
        let unica = Uuid::new_v4();
        assert_eq!(resolve_active_store(None, &[summary(unica)]), Some(unica));
    }

    #[test]
    fn varias_lojas_sem_hint_nao_escolhem_nada() {
        let lojas = [summary(Uuid::new_v4()), summary(Uuid::new_v4())];
        assert_eq!(resolve_active_store(None, &lojas), None);
        assert_eq!(resolve_active_store(None, &[]), None);
    }
}
