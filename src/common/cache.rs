// src/common/cache.rs
//
// Snapshot dos resumos de loja por usuário: o fallback de leitura do
// seletor de lojas. Objeto injetado no AppState, nada de estado global,
// para dar para testar isolado.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::store::StoreSummary;

// Teto de usuários com snapshot em memória. Ao encher, a gravação de
// um usuário novo descarta um snapshot qualquer (é só um fallback de
// leitura, reconstituível na próxima consulta que der certo).
const DEFAULT_CAPACITY: usize = 10_000;

#[derive(Clone)]
pub struct SummaryCache {
    inner: Arc<RwLock<HashMap<Uuid, Vec<StoreSummary>>>>,
    capacity: usize,
}

impl Default for SummaryCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl SummaryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            capacity: capacity.max(1),
        }
    }

    /// Grava o snapshot do usuário, sobrescrevendo o anterior.
    /// Usuário novo com o mapa cheio desaloja um snapshot existente.
    pub async fn store(&self, user_id: Uuid, summaries: Vec<StoreSummary>) {
        let mut map = self.inner.write().await;
        if !map.contains_key(&user_id) && map.len() >= self.capacity {
            if let Some(victim) = map.keys().next().copied() {
                map.remove(&victim);
            }
        }
        map.insert(user_id, summaries);
    }

    /// Último snapshot conhecido do usuário, se houver.
    pub async fn get(&self, user_id: Uuid) -> Option<Vec<StoreSummary>> {
        self.inner.read().await.get(&user_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::store::StoreRole;
    use rust_decimal::Decimal;

    fn summary(name: &str) -> StoreSummary {
        StoreSummary {
            store_id: Uuid::new_v4(),
            store_name: name.to_string(),
            role: StoreRole::Admin,
            month_income: Decimal::ZERO,
            month_expense: Decimal::ZERO,
            month_profit: Decimal::ZERO,
        }
    }

    #[tokio::test]
    async fn sobrescreve_snapshot_anterior() {
        let cache = SummaryCache::new();
        let user = Uuid::new_v4();

        cache.store(user, vec![summary("Loja A")]).await;
        cache.store(user, vec![summary("Loja B")]).await;

        let snapshot = cache.get(user).await.unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].store_name, "Loja B");
    }

    #[tokio::test]
    async fn usuario_sem_snapshot_retorna_none() {
        let cache = SummaryCache::new();
        assert!(cache.get(Uuid::new_v4()).await.is_none());
    }

    #[tokio::test]
    async fn cheio_desaloja_para_caber_usuario_novo() {
        let cache = SummaryCache::with_capacity(2);
        let users: Vec<Uuid> = (0..3).map(|_| Uuid::new_v4()).collect();

        for (i, user) in users.iter().enumerate() {
            cache.store(*user, vec![summary(&format!("Loja {i}"))]).await;
        }

        // O recém-gravado sempre está lá; o mapa nunca passa do teto.
        assert!(cache.get(users[2]).await.is_some());
        let kept = snapshots_restantes(&cache, &users).await;
        assert_eq!(kept, 2);
    }

    #[tokio::test]
    async fn regravar_usuario_existente_nao_desaloja_ninguem() {
        let cache = SummaryCache::with_capacity(2);
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        cache.store(a, vec![summary("Loja A")]).await;
        cache.store(b, vec![summary("Loja B")]).await;
        cache.store(a, vec![summary("Loja A2")]).await;

        assert!(cache.get(a).await.is_some());
        assert!(cache.get(b).await.is_some());
        assert_eq!(cache.get(a).await.unwrap()[0].store_name, "Loja A2");
    }

    async fn snapshots_restantes(cache: &SummaryCache, users: &[Uuid]) -> usize {
        let mut kept = 0;
        for user in users {
            if cache.get(*user).await.is_some() {
                kept += 1;
            }
        }
        kept
    }
}
