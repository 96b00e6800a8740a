use leptos::prelude::*;
use leptos_router::components::A;

use crate::data::api::ApiClient;
use crate::data::favoritos::usar_favoritos;
use crate::data::session::usar_sesion;

#[component]
pub fn PaginaFavoritos() -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let sesion = usar_sesion();
    let favoritos = usar_favoritos();

    let (notas_editadas, set_notas_editadas) = create_signal(std::collections::HashMap::<i64, String>::new());

    let api_quitar = api.clone();
    let quitar = move |cancha_id: i64| {
        if let Some(token) = sesion.token_actual() {
            favoritos.alternar(api_quitar.clone(), token, cancha_id);
        }
    };

    let api_notas = api.clone();
    let guardar_notas = move |cancha_id: i64| {
        let Some(token) = sesion.token_actual() else {
            return;
        };
        let notas = notas_editadas
            .get_untracked()
            .get(&cancha_id)
            .cloned()
            .unwrap_or_default();
        favoritos.guardar_notas(api_notas.clone(), token, cancha_id, notas);
    };

    view! {
        <div class="max-w-4xl mx-auto p-4">
            <h1 class="text-2xl font-bold text-gray-800 mb-4">"Mis Favoritos"</h1>

            {move || favoritos.error.get().map(|mensaje| view! {
                <div class="mb-4 p-3 bg-red-100 border border-red-400 text-red-700 rounded">{mensaje}</div>
            })}

            {move || if !sesion.activa() {
                view! {
                    <div class="text-center py-12 text-gray-600">
                        "Iniciá sesión para guardar tus canchas favoritas. "
                        <A href="/login" attr:class="text-green-700 hover:underline">"Ingresar"</A>
                    </div>
                }.into_any()
            } else if favoritos.cargando.get() {
                view! { <div class="text-center py-12 text-gray-600">"Cargando favoritos..."</div> }.into_any()
            } else if favoritos.favoritos.get().is_empty() {
                view! { <div class="text-center py-12 text-gray-500">"Todavía no marcaste favoritos"</div> }.into_any()
            } else {
                view! {
                    <div class="space-y-3">
                        {favoritos.favoritos.get().into_iter().map(|favorito| {
                            let cancha_id = favorito.cancha.id;
                            let quitar = quitar.clone();
                            let guardar = guardar_notas.clone();
                            let notas_guardadas = favorito.notas.clone().unwrap_or_default();
                            let detalle = format!("/detalle/{cancha_id}");
                            view! {
                                <div class="bg-white rounded-lg shadow-sm p-4">
                                    <div class="flex justify-between items-start">
                                        <div>
                                            <h3 class="font-semibold text-gray-800">{favorito.cancha.nombre.clone()}</h3>
                                            <p class="text-sm text-gray-600">
                                                {favorito.cancha.deporte.clone()} " • " {favorito.cancha.ubicacion.clone()}
                                            </p>
                                        </div>
                                        <div class="flex gap-2">
                                            <A href=detalle attr:class="px-3 py-1.5 text-sm bg-green-600 text-white rounded-md hover:bg-green-700 transition-colors">
                                                "Ver"
                                            </A>
                                            <button
                                                class="px-3 py-1.5 text-sm bg-red-100 text-red-700 border border-red-300 rounded-md hover:bg-red-200 transition-colors"
                                                on:click=move |_| quitar(cancha_id)
                                            >
                                                "Quitar"
                                            </button>
                                        </div>
                                    </div>
                                    <div class="mt-3 flex gap-2">
                                        <input
                                            type="text"
                                            placeholder="Notas (¿por qué te gusta esta cancha?)"
                                            class="flex-grow px-3 py-1.5 text-sm border border-gray-300 rounded-md"
                                            prop:value=move || notas_editadas
                                                .get()
                                                .get(&cancha_id)
                                                .cloned()
                                                .unwrap_or_else(|| notas_guardadas.clone())
                                            on:input=move |ev| {
                                                let valor = event_target_value(&ev);
                                                set_notas_editadas.update(|notas| {
                                                    notas.insert(cancha_id, valor);
                                                });
                                            }
                                        />
                                        <button
                                            class="px-3 py-1.5 text-sm bg-gray-200 rounded-md hover:bg-gray-300 transition-colors"
                                            on:click=move |_| guardar(cancha_id)
                                        >
                                            "Guardar notas"
                                        </button>
                                    </div>
                                </div>
                            }
                        }).collect::<Vec<_>>()}
                    </div>
                }.into_any()
            }}
        </div>
    }
}
