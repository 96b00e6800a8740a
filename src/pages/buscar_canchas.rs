use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::data::api::ApiClient;
use crate::data::favoritos::usar_favoritos;
use crate::data::models::Cancha;
use crate::data::session::usar_sesion;
use crate::pages::tarjeta_cancha::TarjetaCancha;

#[component]
pub fn BuscarCanchas() -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let sesion = usar_sesion();
    let navegar = use_navigate();
    let favoritos = usar_favoritos();

    let (canchas, set_canchas) = create_signal(Vec::<Cancha>::new());
    let (deportes, set_deportes) = create_signal(Vec::<String>::new());
    let (cargando, set_cargando) = create_signal(true);
    let (busqueda, set_busqueda) = create_signal(String::new());
    let (filtro_deporte, set_filtro_deporte) = create_signal(String::new());

    {
        let api = api.clone();
        Effect::new(move |_| {
            let api = api.clone();
            leptos::task::spawn_local(async move {
                match api.canchas().await {
                    Ok(lista) => set_canchas(lista),
                    Err(err) => log::warn!("no se pudieron cargar las canchas: {err}"),
                }
                if let Ok(lista) = api.deportes().await {
                    set_deportes(lista);
                }
                set_cargando(false);
            });
        });
    }

    let filtradas = move || {
        let texto = busqueda.get().to_lowercase();
        let deporte = filtro_deporte.get();
        canchas
            .get()
            .into_iter()
            .filter(|cancha| deporte.is_empty() || cancha.deporte == deporte)
            .filter(|cancha| {
                texto.is_empty()
                    || cancha.nombre.to_lowercase().contains(&texto)
                    || cancha.ubicacion.to_lowercase().contains(&texto)
            })
            .collect::<Vec<_>>()
    };

    let alternar_favorito = {
        let api = api.clone();
        let navegar = navegar.clone();
        Callback::new(move |cancha_id: i64| match sesion.token_actual() {
            Some(token) => favoritos.alternar(api.clone(), token, cancha_id),
            None => navegar("/login", Default::default()),
        })
    };

    view! {
        <div class="max-w-6xl mx-auto p-4">
            <h1 class="text-2xl font-bold text-gray-800 mb-4">"Buscar Canchas"</h1>

            <div class="flex flex-wrap gap-4 mb-6">
                <input
                    type="text"
                    placeholder="Nombre o ubicación"
                    class="flex-grow px-3 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-green-500"
                    prop:value=busqueda
                    on:input=move |ev| set_busqueda(event_target_value(&ev))
                />
                <select
                    class="px-3 py-2 border border-gray-300 rounded-md bg-white"
                    on:change=move |ev| set_filtro_deporte(event_target_value(&ev))
                >
                    <option value="">"Todos los deportes"</option>
                    {move || deportes.get().into_iter().map(|deporte| view! {
                        <option value=deporte.clone()>{deporte.clone()}</option>
                    }).collect::<Vec<_>>()}
                </select>
            </div>

            {move || favoritos.error.get().map(|mensaje| view! {
                <div class="mb-4 p-3 bg-red-100 border border-red-400 text-red-700 rounded">{mensaje}</div>
            })}

            {move || if cargando.get() {
                view! { <div class="text-center py-8 text-gray-600">"Cargando canchas..."</div> }.into_any()
            } else {
                let lista = filtradas();
                if lista.is_empty() {
                    view! { <div class="text-center py-8 text-gray-500">"No se encontraron canchas"</div> }.into_any()
                } else {
                    view! {
                        <div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-3 gap-4">
                            {lista.into_iter().map(|cancha| {
                                let cancha_id = cancha.id;
                                view! {
                                    <TarjetaCancha
                                        cancha=cancha
                                        es_favorito=Signal::derive(move || favoritos.es_favorito(cancha_id))
                                        al_alternar_favorito=alternar_favorito
                                    />
                                }
                            }).collect::<Vec<_>>()}
                        </div>
                    }.into_any()
                }
            }}
        </div>
    }
}
