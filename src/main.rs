//src/main.rs

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, post},
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// Declaração dos nossos módulos
mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::auth_guard;
use crate::middleware::store::store_guard;

#[tokio::main]
async fn main() {
    // Inicializa o logger
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    // Rotas do usuário (só exigem login; o resolvedor de lojas mora aqui)
    let user_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .route("/me/stores", get(handlers::stores::resolve_my_stores))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let settings_routes = Router::new()
        .route(
            "/",
            get(handlers::settings::get_settings).put(handlers::settings::update_settings),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let store_routes = Router::new()
        .route("/", post(handlers::stores::create_store))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Rotas com escopo de loja: auth_guard roda primeiro, depois o
    // store_guard confere o X-Store-Id contra store_access.
    let ledger_routes = Router::new()
        .route(
            "/transactions",
            post(handlers::ledger::create_transaction).get(handlers::ledger::list_transactions),
        )
        .route(
            "/transactions/{id}",
            axum::routing::delete(handlers::ledger::delete_transaction),
        )
        .route("/summary/daily", get(handlers::ledger::daily_summary))
        .route("/summary/month", get(handlers::ledger::month_summary))
        .route(
            "/suppliers/balances",
            get(handlers::ledger::supplier_balances),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            store_guard,
        ))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let registry_routes = Router::new()
        .route(
            "/suppliers",
            post(handlers::registry::create_supplier).get(handlers::registry::list_suppliers),
        )
        .route(
            "/suppliers/{id}",
            axum::routing::delete(handlers::registry::delete_supplier),
        )
        .route(
            "/employees",
            post(handlers::registry::create_employee).get(handlers::registry::list_employees),
        )
        .route(
            "/employees/{id}",
            axum::routing::delete(handlers::registry::delete_employee),
        )
        .route(
            "/fixed-assets",
            post(handlers::registry::create_fixed_asset)
                .get(handlers::registry::list_fixed_assets),
        )
        .route(
            "/fixed-assets/{id}",
            axum::routing::delete(handlers::registry::delete_fixed_asset),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            store_guard,
        ))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Convites: criação exige admin da loja ativa; resgate só exige
    // login (quem resgata ainda não tem a loja); validação é pública.
    let invite_admin_routes = Router::new()
        .route("/", post(handlers::invites::create_invite))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            store_guard,
        ))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let invite_user_routes = Router::new()
        .route("/redeem", post(handlers::invites::redeem_invite))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let invite_public_routes =
        Router::new().route("/validate", post(handlers::invites::validate_invite));

    let invite_routes = invite_admin_routes
        .merge(invite_user_routes)
        .merge(invite_public_routes);

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api/users", user_routes)
        .nest("/api/settings", settings_routes)
        .nest("/api/stores", store_routes)
        .nest("/api/ledger", ledger_routes)
        .nest("/api/registry", registry_routes)
        .nest("/api/invites", invite_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
