use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::data::session::usar_sesion;

#[component]
pub fn Encabezado() -> impl IntoView {
    let sesion = usar_sesion();
    let navegar = use_navigate();

    let cerrar_sesion = move |_| {
        sesion.cerrar();
        navegar("/", Default::default());
    };

    view! {
        <header class="bg-white shadow-sm">
            <nav class="max-w-6xl mx-auto px-4 py-3 flex items-center justify-between">
                <A href="/" attr:class="text-xl font-bold text-green-700">"ReservApp"</A>

                <div class="flex items-center gap-4 text-sm text-gray-700">
                    <A href="/canchas" attr:class="hover:text-green-700">"Canchas"</A>

                    {move || if sesion.es_jugador() {
                        view! {
                            <>
                                <A href="/reservas" attr:class="hover:text-green-700">"Mis Reservas"</A>
                                <A href="/favoritos" attr:class="hover:text-green-700">"Favoritos"</A>
                                <A href="/perfil" attr:class="hover:text-green-700">"Mi Perfil"</A>
                            </>
                        }.into_any()
                    } else if sesion.es_club() {
                        view! {
                            <>
                                <A href="/administracion" attr:class="hover:text-green-700">"Administración"</A>
                            </>
                        }.into_any()
                    } else {
                        view! { <><span class="hidden"></span></> }.into_any()
                    }}

                    {move || match sesion.usuario() {
                        Some(usuario) => view! {
                            <div class="flex items-center gap-3">
                                <span class="text-gray-500">{usuario.nombre}</span>
                                <button
                                    class="px-3 py-1.5 bg-gray-200 rounded-md hover:bg-gray-300 transition-colors"
                                    on:click=cerrar_sesion.clone()
                                >
                                    "Salir"
                                </button>
                            </div>
                        }.into_any(),
                        None => view! {
                            <div class="flex items-center gap-2">
                                <A href="/login" attr:class="px-3 py-1.5 bg-green-600 text-white rounded-md hover:bg-green-700 transition-colors">"Ingresar"</A>
                                <A href="/registrar" attr:class="px-3 py-1.5 border border-green-600 text-green-700 rounded-md hover:bg-green-50 transition-colors">"Registrarse"</A>
                            </div>
                        }.into_any(),
                    }}
                </div>
            </nav>
        </header>
    }
}
