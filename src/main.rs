#![recursion_limit = "512"]

#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() {
    use axum::Router;
    use leptos::logging::log;
    use leptos::prelude::*;
    use leptos_axum::{generate_route_list, LeptosRoutes};
    use reservapp_web::app::{shell, App};
    use reservapp_web::settings::Settings;

    let conf = get_configuration(None).unwrap();
    let mut addr = conf.leptos_options.site_addr;

    // settings.yaml is optional; without it the cargo-leptos defaults apply
    match Settings::from_yaml("settings.yaml") {
        Ok(settings) => {
            log!("backend de reservas: {}", settings.api_base_url);
            if let Some(direccion) = settings.site_addr {
                addr = direccion.parse().expect("site_addr inválida en settings.yaml");
            }
        }
        Err(err) => log!("sin settings.yaml ({err}), usando valores por defecto"),
    }

    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(App);

    let app = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let leptos_options = leptos_options.clone();
            move || shell(leptos_options.clone())
        })
        .fallback(leptos_axum::file_and_error_handler(shell))
        .with_state(leptos_options);

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    log!("listening on http://{}", &addr);
    axum::serve(listener, app.into_make_service())
        .await
        .unwrap();
}

#[cfg(not(feature = "ssr"))]
pub fn main() {
    // binary only exists under the ssr feature; hydration enters via lib.rs
}
