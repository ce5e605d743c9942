mod address;
mod auth;
mod cart;
mod coupon;
mod delivery_agent;
mod order;
mod payment;
mod product;

use anyhow::Result;
use axum::extract::DefaultBodyLimit;
use shared::{state::AppState, utils::shutdown_signal};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::limit::RequestBodyLimitLayer;
use tracing::info;
use utoipa::{Modify, OpenApi, openapi::security::SecurityScheme};
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

pub use self::address::address_routes;
pub use self::auth::auth_routes;
pub use self::cart::cart_routes;
pub use self::coupon::coupon_routes;
pub use self::delivery_agent::delivery_agent_routes;
pub use self::order::order_routes;
pub use self::payment::payment_routes;
pub use self::product::product_routes;

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::health_checker_handler,
        auth::register_user_handler,
        auth::login_user_handler,
        auth::refresh_token_handler,
        auth::get_me_handler,

        product::get_products,
        product::get_product,
        product::get_trashed_products,
        product::create_product,
        product::update_product,
        product::trash_product_handler,
        product::restore_product_handler,

        cart::get_cart,
        cart::add_cart_item,
        cart::update_cart_item,
        cart::remove_cart_item,
        cart::clear_cart,

        coupon::apply_coupon,
        coupon::get_coupons,
        coupon::create_coupon,
        coupon::deactivate_coupon,

        address::get_addresses,
        address::create_address,
        address::update_address,
        address::delete_address,

        payment::get_payment_config,
        payment::create_razorpay_order,
        payment::verify_razorpay_payment,

        order::place_cod_order,
        order::get_my_orders,
        order::get_order,
        order::get_order_history,
        order::get_order_by_gateway,
        order::get_orders,
        order::update_order_status,
        order::assign_delivery,
        order::update_delivery_status,

        delivery_agent::get_agents,
        delivery_agent::get_agent,
        delivery_agent::create_agent,
        delivery_agent::update_agent,
        delivery_agent::delete_agent,
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness probe"),
        (name = "Auth", description = "Registration and token endpoints"),
        (name = "Product", description = "Catalog endpoints"),
        (name = "Cart", description = "Server-side cart endpoints"),
        (name = "Coupon", description = "Coupon evaluation and administration"),
        (name = "Address", description = "Address book endpoints"),
        (name = "Payment", description = "Checkout and payment gateway endpoints"),
        (name = "Order", description = "Order lifecycle endpoints"),
        (name = "Delivery", description = "Delivery agent administration"),
    )
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.as_mut().unwrap();

        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(utoipa::openapi::security::Http::new(
                utoipa::openapi::security::HttpAuthScheme::Bearer,
            )),
        );
    }
}

pub struct AppRouter;

impl AppRouter {
    pub async fn serve(port: u16, app_state: AppState) -> Result<()> {
        let shared_state = Arc::new(app_state);

        let api_router = OpenApiRouter::with_openapi(ApiDoc::openapi())
            .merge(auth_routes(shared_state.clone()))
            .merge(product_routes(shared_state.clone()))
            .merge(cart_routes(shared_state.clone()))
            .merge(coupon_routes(shared_state.clone()))
            .merge(address_routes(shared_state.clone()))
            .merge(payment_routes(shared_state.clone()))
            .merge(order_routes(shared_state.clone()))
            .merge(delivery_agent_routes(shared_state.clone()));

        let router_with_layers = api_router
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(2 * 1024 * 1024));

        let (app_router, api) = router_with_layers.split_for_parts();

        let app = app_router
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api.clone()));

        let addr = format!("0.0.0.0:{port}");
        let listener = TcpListener::bind(&addr).await?;

        info!("🚀 Server running on http://{}", listener.local_addr()?);
        info!("📖 Swagger UI: http://localhost:{port}/swagger-ui");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}
