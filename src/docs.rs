// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,

        // --- Users ---
        handlers::auth::get_me,
        handlers::stores::resolve_my_stores,

        // --- Settings ---
        handlers::settings::get_settings,
        handlers::settings::update_settings,

        // --- Stores ---
        handlers::stores::create_store,

        // --- Ledger ---
        handlers::ledger::create_transaction,
        handlers::ledger::list_transactions,
        handlers::ledger::delete_transaction,
        handlers::ledger::daily_summary,
        handlers::ledger::month_summary,
        handlers::ledger::supplier_balances,

        // --- Registry ---
        handlers::registry::create_supplier,
        handlers::registry::list_suppliers,
        handlers::registry::delete_supplier,
        handlers::registry::create_employee,
        handlers::registry::list_employees,
        handlers::registry::delete_employee,
        handlers::registry::create_fixed_asset,
        handlers::registry::list_fixed_assets,
        handlers::registry::delete_fixed_asset,

        // --- Invites ---
        handlers::invites::create_invite,
        handlers::invites::redeem_invite,
        handlers::invites::validate_invite,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::User,
            models::auth::Profile,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,
            models::auth::MeResponse,
            models::auth::UpdateProfilePayload,

            // --- Stores ---
            models::store::Store,
            models::store::StoreRole,
            models::store::StoreAccess,
            models::store::StoreSummary,
            models::store::ActiveStoreView,
            models::store::CreateStorePayload,

            // --- Ledger ---
            models::ledger::TransactionKind,
            models::ledger::Transaction,
            models::ledger::CreateTransactionPayload,
            models::ledger::DailyTotal,
            models::ledger::MonthSummary,
            models::ledger::SupplierBalance,
            models::ledger::SupplierBalanceReport,

            // --- Registry ---
            models::registry::Supplier,
            models::registry::Employee,
            models::registry::FixedAsset,
            models::registry::CreateSupplierPayload,
            models::registry::CreateEmployeePayload,
            models::registry::CreateFixedAssetPayload,

            // --- Invites ---
            models::invite::Invite,
            models::invite::CreateInvitePayload,
            models::invite::InviteCreatedResponse,
            models::invite::RedeemInvitePayload,
            models::invite::RedeemInviteResponse,
            models::invite::ValidateInvitePayload,
            models::invite::ValidateInviteResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Registro e login"),
        (name = "users", description = "Usuário autenticado"),
        (name = "settings", description = "Perfil e preferências"),
        (name = "stores", description = "Lojas e seletor de loja ativa"),
        (name = "ledger", description = "Livro-caixa e agregações"),
        (name = "registry", description = "Cadastros da loja"),
        (name = "invites", description = "Convites de acesso"),
    )
)]
pub struct ApiDoc;

pub struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}
