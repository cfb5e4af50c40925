use crate::utils::webutils::validate_staff_token;
use actix_web::web;
use actix_web_httpauth::middleware::HttpAuthentication;

pub mod admin;
pub mod api;
pub mod auth;
pub mod editor;
pub mod health;
pub mod journalist;
pub mod profile;
pub mod reader;
pub mod subscribe;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    let staff_auth = HttpAuthentication::bearer(validate_staff_token);

    cfg.service(web::scope("/health").service(health::health));

    cfg.service(auth::login::login)
        .service(auth::login::logout)
        .service(auth::register::options)
        .service(auth::register::register_reader)
        .service(auth::register::register_journalist)
        .service(auth::register::register_editor)
        .service(auth::password_reset::request_reset)
        .service(auth::password_reset::confirm_reset);

    // Static article paths go before `/article/{pk}/`.
    cfg.service(journalist::dashboard::dashboard)
        .service(journalist::article::create)
        .service(journalist::article::edit)
        .service(journalist::article::view)
        .service(journalist::article::view_delete)
        .service(journalist::article::delete)
        .service(editor::dashboard::dashboard)
        .service(editor::review::review)
        .service(editor::review::review_action);

    cfg.service(reader::home::home)
        .service(reader::articles::article_list)
        .service(reader::articles::article_reader)
        .service(reader::profiles::journalist_profile)
        .service(reader::profiles::publisher_profile)
        .service(reader::subscriptions::manage);

    cfg.service(
        web::scope("/subscribe")
            .service(subscribe::journalist)
            .service(subscribe::publisher)
            .service(subscribe::toggle),
    );

    cfg.service(profile::profile).service(profile::update_profile);

    cfg.service(web::scope("/api").service(api::articles));

    // Login sits outside the guarded scope.
    cfg.service(admin::login::login);
    cfg.service(
        web::scope("/admin")
            .service(admin::dashboard::index)
            .service(admin::publishers::list)
            .service(admin::publishers::create)
            .service(admin::publishers::update)
            .service(admin::publishers::delete)
            .service(admin::users::list)
            .service(admin::users::update)
            .service(admin::articles::list)
            .service(admin::articles::delete)
            .wrap(staff_auth),
    );
}
