// src/web/routes.rs

use actix_web::web;

use crate::web::handlers::{
  account_handlers, admin_handlers, auth_handlers, cart_handlers, checkout_handlers, product_handlers,
  staff_handlers,
};

async fn health_check_handler() -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

/// Configures every route of the storefront. Paths mirror the page map
/// of the site: public catalog, auth, customer cart/checkout/account,
/// and the admin and staff surfaces. Access control lives in the
/// session extractors each handler declares, not here.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg
    // Health Check Route
    .route("/health", web::get().to(health_check_handler))
    // Public storefront
    .route("/", web::get().to(product_handlers::home_handler))
    .service(
      web::scope("/products")
        .route("", web::get().to(product_handlers::list_products_handler))
        .route("/{product_id}", web::get().to(product_handlers::get_product_handler)),
    )
    // Authentication & account recovery
    .route("/register", web::post().to(auth_handlers::register_handler))
    .route("/login", web::post().to(auth_handlers::login_handler))
    .route("/logout", web::post().to(auth_handlers::logout_handler))
    .service(
      web::scope("/password")
        .route("/forgot", web::post().to(auth_handlers::forgot_password_handler))
        .route("/verify", web::post().to(auth_handlers::verify_security_answer_handler))
        .route("/reset", web::post().to(auth_handlers::reset_password_handler)),
    )
    // Cart: one POST endpoint dispatching on ?action=add|update|remove|clear
    .service(
      web::scope("/cart")
        .route("", web::get().to(cart_handlers::view_cart_handler))
        .route("", web::post().to(cart_handlers::cart_action_handler))
        .route("/add-ajax", web::post().to(cart_handlers::add_to_cart_ajax_handler)),
    )
    // Checkout: order placement is POST /checkout?action=place
    .service(
      web::scope("/checkout")
        .route("", web::get().to(checkout_handlers::checkout_page_handler))
        .route("", web::post().to(checkout_handlers::place_order_handler)),
    )
    // Customer account
    .service(
      web::scope("/account")
        .route("", web::get().to(account_handlers::dashboard_handler))
        .route("/orders", web::get().to(account_handlers::orders_handler))
        .route("/orders/{order_id}", web::get().to(account_handlers::order_detail_handler))
        .route("/profile", web::post().to(account_handlers::update_profile_handler))
        .route("/profile/image", web::post().to(account_handlers::update_profile_image_handler)),
    )
    // Admin surface
    .service(
      web::scope("/admin")
        .route("", web::get().to(admin_handlers::dashboard_handler))
        .route("/orders", web::get().to(admin_handlers::orders_handler))
        .route("/orders/{order_id}", web::get().to(admin_handlers::order_detail_handler))
        .route("/orders/{order_id}/status", web::post().to(admin_handlers::update_order_status_handler))
        .route("/orders/{order_id}/delete", web::post().to(admin_handlers::delete_order_handler))
        .route("/customers", web::get().to(admin_handlers::customers_handler))
        .route("/customers", web::post().to(admin_handlers::create_customer_handler))
        .route("/customers/{user_id}", web::post().to(admin_handlers::update_customer_handler))
        .route(
          "/customers/{user_id}/password",
          web::post().to(admin_handlers::reset_customer_password_handler),
        )
        .route("/customers/{user_id}/delete", web::post().to(admin_handlers::delete_customer_handler))
        .route("/employees", web::get().to(admin_handlers::employees_handler))
        .route("/employees", web::post().to(admin_handlers::create_employee_handler))
        .route("/employees/{user_id}/delete", web::post().to(admin_handlers::delete_employee_handler))
        .route("/products", web::get().to(admin_handlers::products_handler))
        .route("/products", web::post().to(admin_handlers::create_product_handler))
        .route("/products/{product_id}", web::post().to(admin_handlers::update_product_handler))
        .route("/products/{product_id}/delete", web::post().to(admin_handlers::delete_product_handler)),
    )
    // Staff surface
    .service(
      web::scope("/staff")
        .route("", web::get().to(staff_handlers::dashboard_handler))
        .route("/orders", web::get().to(staff_handlers::orders_handler))
        .route("/orders/{order_id}/status", web::post().to(staff_handlers::update_order_status_handler)),
    );
}
