use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::data::api::ApiClient;
use crate::data::favoritos::usar_favoritos;
use crate::data::models::Cancha;
use crate::data::session::usar_sesion;
use crate::pages::tarjeta_cancha::TarjetaCancha;

#[component]
pub fn Inicio() -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let sesion = usar_sesion();
    let navegar = use_navigate();
    let favoritos = usar_favoritos();

    let (canchas, set_canchas) = create_signal(Vec::<Cancha>::new());
    let (cargando, set_cargando) = create_signal(true);

    {
        let api = api.clone();
        Effect::new(move |_| {
            let api = api.clone();
            leptos::task::spawn_local(async move {
                match api.canchas().await {
                    Ok(lista) => set_canchas(lista),
                    Err(err) => log::warn!("no se pudieron cargar las canchas: {err}"),
                }
                set_cargando(false);
            });
        });
    }

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
            <section class="text-center py-12">
                <h1 class="text-4xl font-bold text-gray-800">"Tu cancha, a un clic"</h1>
                <p class="mt-3 text-gray-600">
                    "Buscá canchas, verificá horarios disponibles y reservá al instante."
                </p>
                <div class="mt-6">
                    <A href="/canchas" attr:class="px-6 py-3 bg-green-600 text-white rounded-md hover:bg-green-700 transition-colors">
                        "Buscar canchas"
                    </A>
                </div>
            </section>

            <section class="mt-8">
                <h2 class="text-2xl font-bold text-gray-800 mb-4">"Canchas destacadas"</h2>
                {move || if cargando.get() {
                    view! { <div class="text-center py-8 text-gray-600">"Cargando canchas..."</div> }.into_any()
                } else {
                    let destacadas: Vec<Cancha> = canchas
                        .get()
                        .into_iter()
                        .filter(|cancha| cancha.disponible)
                        .take(6)
                        .collect();
                    if destacadas.is_empty() {
                        view! { <div class="text-center py-8 text-gray-500">"Todavía no hay canchas publicadas"</div> }.into_any()
                    } else {
                        view! {
                            <div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-3 gap-4">
                                {destacadas.into_iter().map(|cancha| {
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
            </section>
        </div>
    }
}
