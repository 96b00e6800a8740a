use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::{
    components::{FlatRoutes, Route, Router},
    path, StaticSegment,
};

use crate::data::api::ApiClient;
use crate::data::session::{proveer_sesion, validar_sesion};
use crate::pages::administracion::Administracion;
use crate::pages::buscar_canchas::BuscarCanchas;
use crate::pages::detalle_cancha::DetalleCancha;
use crate::pages::encabezado::Encabezado;
use crate::pages::favoritos::PaginaFavoritos;
use crate::pages::inicio::Inicio;
use crate::pages::login::Login;
use crate::pages::mis_reservas::MisReservas;
use crate::pages::pagar::PagarReserva;
use crate::pages::perfil::PerfilJugadorPagina;
use crate::pages::registrar::Registrar;

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="es">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <Stylesheet id="leptos" href="/pkg/reservapp-web-leptos.css"/>
                <AutoReload options=options.clone() />
                <HydrationScripts options/>
                <link rel="shortcut icon" type="image/ico" href="/favicon.ico"/>
                <Link rel="preconnect" href="https://fonts.googleapis.com"/>
                <Link rel="preconnect" href="https://fonts.gstatic.com" crossorigin="anonymous"/>
                <Link href="https://fonts.googleapis.com/css2?family=Inter:wght@400;500;600;700&display=swap" rel="stylesheet"/>
                <MetaTags/>
            </head>
            <body class="bg-gray-50 min-h-screen">
                <App/>
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let api = ApiClient::por_defecto();
    provide_context(api.clone());
    let sesion = proveer_sesion();

    // revalidate the persisted token once at startup; on the server there is
    // no persisted token so this resolves immediately
    leptos::task::spawn_local(validar_sesion(sesion, api));

    view! {
        <Router>
            <Encabezado/>
            <main>
                <FlatRoutes fallback=|| "Página no encontrada.">
                    <Route path=StaticSegment("") view=Inicio/>
                    <Route path=StaticSegment("canchas") view=BuscarCanchas/>
                    <Route path=path!("/detalle/:id") view=DetalleCancha/>
                    <Route path=StaticSegment("login") view=Login/>
                    <Route path=StaticSegment("registrar") view=Registrar/>
                    <Route path=StaticSegment("reservas") view=MisReservas/>
                    <Route path=path!("/pagar/:id") view=PagarReserva/>
                    <Route path=StaticSegment("favoritos") view=PaginaFavoritos/>
                    <Route path=StaticSegment("perfil") view=PerfilJugadorPagina/>
                    <Route path=StaticSegment("administracion") view=Administracion/>
                </FlatRoutes>
            </main>
        </Router>
    }
}
