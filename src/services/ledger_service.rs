// src/services/ledger_service.rs
//
// O "motor" de agregação do livro-caixa. As reduções são funções puras
// sobre listas em memória (Decimal, nunca float) para que as
// propriedades do domínio sejam testáveis sem banco.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{
        TransactionRepository,
        store_repo::AccessibleStore,
        transaction_repo::{CreditRow, MonthlyRow},
    },
    models::{
        ledger::{
            CreateTransactionPayload, DailyTotal, MonthSummary, SupplierBalance,
            SupplierBalanceReport, Transaction, TransactionKind,
        },
        store::StoreSummary,
    },
};

// =========================================================================
//  Funções puras de agregação
// =========================================================================

/// Primeiro instante do mês-calendário de `now` (janela do resumo mensal).
pub fn month_start(now: DateTime<Utc>) -> DateTime<Utc> {
    let today = now.date_naive();
    let first = today.with_day(1).unwrap_or(today);
    first.and_time(NaiveTime::MIN).and_utc()
}

/// Janela meio-aberta [início do mês, agora) do resumo mensal.
/// Cortar em `now` tira da conta lançamentos pós-datados pelo cliente.
pub fn month_window(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    (month_start(now), now)
}

/// Converte o filtro por dia-calendário em limites meio-abertos de
/// timestamp: `from` vira 00:00 do dia e `to` vira 00:00 do dia
/// SEGUINTE, de modo que o dia final entre inteiro na janela.
pub fn day_bounds(
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
    let lower = from.map(|d| d.and_time(NaiveTime::MIN).and_utc());
    let upper = to
        .and_then(|d| d.succ_opt())
        .map(|d| d.and_time(NaiveTime::MIN).and_utc());
    (lower, upper)
}

/// Totais por dia-calendário: entrada = `income`; tudo o mais soma como
/// saída, inclusive pagamentos de dívida.
pub fn daily_totals(transactions: &[Transaction]) -> Vec<DailyTotal> {
    let mut days: BTreeMap<NaiveDate, (Decimal, Decimal)> = BTreeMap::new();

    for tx in transactions {
        let day = tx.occurred_at.date_naive();
        let entry = days.entry(day).or_insert((Decimal::ZERO, Decimal::ZERO));
        match tx.kind {
            TransactionKind::Income => entry.0 += tx.amount,
            _ => entry.1 += tx.amount,
        }
    }

    days.into_iter()
        .map(|(date, (income, expense))| DailyTotal {
            date,
            income,
            expense,
        })
        .collect()
}

/// Resumo de um conjunto de lançamentos: entrada, saída e lucro.
/// Lista vazia produz tudo zerado.
pub fn summarize(rows: impl IntoIterator<Item = (Decimal, TransactionKind)>) -> MonthSummary {
    let mut income = Decimal::ZERO;
    let mut expense = Decimal::ZERO;

    for (amount, kind) in rows {
        match kind {
            TransactionKind::Income => income += amount,
            _ => expense += amount,
        }
    }

    MonthSummary {
        income,
        expense,
        profit: income - expense,
    }
}

/// Resumo do mês por loja, para o seletor de lojas.
/// Lojas sem lançamento no mês aparecem zeradas (nunca somem da lista).
pub fn monthly_store_summaries(
    stores: &[AccessibleStore],
    rows: &[MonthlyRow],
) -> Vec<StoreSummary> {
    stores
        .iter()
        .map(|store| {
            let summary = summarize(
                rows.iter()
                    .filter(|r| r.store_id == store.store_id)
                    .map(|r| (r.amount, r.kind)),
            );
            StoreSummary {
                store_id: store.store_id,
                store_name: store.store_name.clone(),
                role: store.role,
                month_income: summary.income,
                month_expense: summary.expense,
                month_profit: summary.profit,
            }
        })
        .collect()
}

/// Saldo devedor por fornecedor:
/// saldo = Σ(valor | fiado) − Σ(valor | pagamento de dívida).
/// Saldos zerados ou negativos ficam de fora da lista, e o total
/// exibido é a soma exata dos saldos listados.
pub fn supplier_balances(rows: &[CreditRow]) -> SupplierBalanceReport {
    let mut per_supplier: BTreeMap<Uuid, (String, Decimal)> = BTreeMap::new();

    for row in rows {
        let entry = per_supplier
            .entry(row.supplier_id)
            .or_insert_with(|| (row.supplier_name.clone(), Decimal::ZERO));
        if row.is_credit {
            entry.1 += row.amount;
        }
        if row.is_debt_payment {
            entry.1 -= row.amount;
        }
    }

    let mut balances: Vec<SupplierBalance> = per_supplier
        .into_iter()
        .filter(|(_, (_, balance))| *balance > Decimal::ZERO)
        .map(|(supplier_id, (supplier_name, balance))| SupplierBalance {
            supplier_id,
            supplier_name,
            balance,
        })
        .collect();

    balances.sort_by(|a, b| a.supplier_name.cmp(&b.supplier_name));

    let total_outstanding = balances.iter().map(|b| b.balance).sum();

    SupplierBalanceReport {
        balances,
        total_outstanding,
    }
}

// =========================================================================
//  Serviço
// =========================================================================

#[derive(Clone)]
pub struct LedgerService {
    tx_repo: TransactionRepository,
}

impl LedgerService {
    pub fn new(tx_repo: TransactionRepository) -> Self {
        Self { tx_repo }
    }

    pub async fn record(
        &self,
        store_id: Uuid,
        payload: &CreateTransactionPayload,
    ) -> Result<Transaction, AppError> {
        self.tx_repo.create(store_id, payload).await
    }

    pub async fn list(
        &self,
        store_id: Uuid,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<Transaction>, AppError> {
        let (lower, upper) = day_bounds(from, to);
        self.tx_repo.list(store_id, lower, upper).await
    }

    pub async fn delete(&self, store_id: Uuid, transaction_id: Uuid) -> Result<(), AppError> {
        self.tx_repo.delete(store_id, transaction_id).await
    }

    pub async fn daily_summary(
        &self,
        store_id: Uuid,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<DailyTotal>, AppError> {
        let (lower, upper) = day_bounds(from, to);
        let transactions = self.tx_repo.list(store_id, lower, upper).await?;
        Ok(daily_totals(&transactions))
    }

    /// Resumo do primeiro dia do mês corrente até agora.
    pub async fn month_summary(&self, store_id: Uuid) -> Result<MonthSummary, AppError> {
        let (since, until) = month_window(Utc::now());
        let transactions = self.tx_repo.list(store_id, Some(since), Some(until)).await?;
        Ok(summarize(
            transactions.iter().map(|t| (t.amount, t.kind)),
        ))
    }

    pub async fn supplier_balances(
        &self,
        store_id: Uuid,
    ) -> Result<SupplierBalanceReport, AppError> {
        let rows = self.tx_repo.credit_rows(store_id).await?;
        Ok(supplier_balances(&rows))
    }
}

// =========================================================================
//  Testes
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn tx(
        day: u32,
        amount: Decimal,
        kind: TransactionKind,
        supplier: Option<Uuid>,
        is_credit: bool,
        is_debt_payment: bool,
    ) -> Transaction {
        Transaction {
            id: Uuid::new_v4(),
            store_id: Uuid::new_v4(),
            description: "teste".into(),
            amount,
            kind,
            category: None,
            payment_method: None,
            supplier_id: supplier,
            employee_id: None,
            fixed_asset_id: None,
            is_credit,
            is_debt_payment,
            occurred_at: Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap(),
            created_at: Utc::now(),
        }
    }

    fn credit_row(
        supplier_id: Uuid,
        amount: Decimal,
        is_credit: bool,
        is_debt_payment: bool,
    ) -> CreditRow {
        CreditRow {
            supplier_id,
            supplier_name: "Distribuidora Sul".into(),
            amount,
            is_credit,
            is_debt_payment,
        }
    }

    #[test]
    fn lista_vazia_zera_tudo() {
        assert!(daily_totals(&[]).is_empty());

        let report = supplier_balances(&[]);
        assert!(report.balances.is_empty());
        assert_eq!(report.total_outstanding, Decimal::ZERO);

        let summary = summarize(std::iter::empty());
        assert_eq!(summary.income, Decimal::ZERO);
        assert_eq!(summary.expense, Decimal::ZERO);
        assert_eq!(summary.profit, Decimal::ZERO);
    }

    #[test]
    fn totais_diarios_particionam_por_dia_e_tipo() {
        let txs = vec![
            tx(10, dec!(100), TransactionKind::Income, None, false, false),
            tx(10, dec!(40), TransactionKind::Expense, None, false, false),
            // Pagamento de dívida conta como saída do dia
            tx(10, dec!(25), TransactionKind::Expense, None, false, true),
            tx(11, dec!(300), TransactionKind::Income, None, false, false),
        ];

        let totals = daily_totals(&txs);
        assert_eq!(totals.len(), 2);

        assert_eq!(totals[0].income, dec!(100));
        assert_eq!(totals[0].expense, dec!(65));
        assert_eq!(totals[1].income, dec!(300));
        assert_eq!(totals[1].expense, dec!(0));

        // Soma dos totais do dia = soma de todos os valores do dia
        let day_sum: Decimal = txs
            .iter()
            .filter(|t| t.occurred_at.date_naive() == totals[0].date)
            .map(|t| t.amount)
            .sum();
        assert_eq!(totals[0].income + totals[0].expense, day_sum);
    }

    #[test]
    fn lucro_do_mes_e_entrada_menos_saida() {
        let summary = summarize(vec![
            (dec!(500), TransactionKind::Income),
            (dec!(120), TransactionKind::Expense),
            (dec!(80), TransactionKind::Expense),
        ]);
        assert_eq!(summary.income, dec!(500));
        assert_eq!(summary.expense, dec!(200));
        assert_eq!(summary.profit, dec!(300));
    }

    #[test]
    fn cenario_fornecedor_100_100_60() {
        // Três lançamentos do fornecedor S: fia 100, fia 100, paga 60.
        let s = Uuid::new_v4();
        let mut rows = vec![
            credit_row(s, dec!(100), true, false),
            credit_row(s, dec!(100), true, false),
            credit_row(s, dec!(60), false, true),
        ];

        let report = supplier_balances(&rows);
        assert_eq!(report.balances.len(), 1);
        assert_eq!(report.balances[0].balance, dec!(140));
        assert_eq!(report.total_outstanding, dec!(140));

        // O quarto lançamento quita a dívida e tira S da lista.
        rows.push(credit_row(s, dec!(140), false, true));
        let report = supplier_balances(&rows);
        assert!(report.balances.is_empty());
        assert_eq!(report.total_outstanding, Decimal::ZERO);
    }

    #[test]
    fn saldo_negativo_tambem_fica_fora_da_lista() {
        let s = Uuid::new_v4();
        let rows = vec![
            credit_row(s, dec!(50), true, false),
            credit_row(s, dec!(70), false, true),
        ];

        let report = supplier_balances(&rows);
        assert!(report.balances.is_empty());
        assert_eq!(report.total_outstanding, Decimal::ZERO);
    }

    #[test]
    fn total_devedor_bate_com_a_lista() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let rows = vec![
            credit_row(a, dec!(100), true, false),
            credit_row(b, dec!(35.50), true, false),
            credit_row(a, dec!(20), false, true),
        ];

        let report = supplier_balances(&rows);
        let sum: Decimal = report.balances.iter().map(|x| x.balance).sum();
        assert_eq!(report.total_outstanding, sum);
        assert_eq!(report.total_outstanding, dec!(115.50));
    }

    #[test]
    fn resumo_por_loja_mantem_lojas_sem_movimento() {
        let loja_a = Uuid::new_v4();
        let loja_b = Uuid::new_v4();
        let stores = vec![
            AccessibleStore {
                store_id: loja_a,
                store_name: "Loja A".into(),
                role: crate::models::store::StoreRole::Admin,
            },
            AccessibleStore {
                store_id: loja_b,
                store_name: "Loja B".into(),
                role: crate::models::store::StoreRole::User,
            },
        ];
        let rows = vec![
            MonthlyRow {
                store_id: loja_a,
                amount: dec!(200),
                kind: TransactionKind::Income,
            },
            MonthlyRow {
                store_id: loja_a,
                amount: dec!(50),
                kind: TransactionKind::Expense,
            },
        ];

        let summaries = monthly_store_summaries(&stores, &rows);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].month_profit, dec!(150));
        assert_eq!(summaries[1].month_income, Decimal::ZERO);
        assert_eq!(summaries[1].month_profit, Decimal::ZERO);
    }

    #[test]
    fn inicio_do_mes_e_dia_primeiro() {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 18, 30, 0).unwrap();
        let start = month_start(now);
        assert_eq!(start.date_naive(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(start.time(), NaiveTime::MIN);
    }

    #[test]
    fn janela_do_mes_fecha_em_agora() {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 18, 30, 0).unwrap();
        let (since, until) = month_window(now);

        assert_eq!(since, month_start(now));
        assert_eq!(until, now);

        // Lançamento pós-datado pelo cliente cai FORA da janela.
        let postdated = Utc.with_ymd_and_hms(2024, 3, 20, 10, 0, 0).unwrap();
        assert!(postdated >= until);

        // Um de hoje de manhã cai dentro.
        let earlier_today = Utc.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).unwrap();
        assert!(earlier_today >= since && earlier_today < until);
    }

    #[test]
    fn filtro_por_dia_vira_janela_meio_aberta() {
        let from = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let to = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap();
        let (lower, upper) = day_bounds(Some(from), Some(to));

        let lower = lower.unwrap();
        let upper = upper.unwrap();
        assert_eq!(lower, Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap());
        // O limite superior é a meia-noite do dia SEGUINTE ao final.
        assert_eq!(upper, Utc.with_ymd_and_hms(2024, 3, 12, 0, 0, 0).unwrap());

        // 23:59:59 do último dia do filtro ainda entra.
        let late = Utc.with_ymd_and_hms(2024, 3, 11, 23, 59, 59).unwrap();
        assert!(late >= lower && late < upper);

        // Filtro ausente não impõe limite.
        assert_eq!(day_bounds(None, None), (None, None));
    }
}
