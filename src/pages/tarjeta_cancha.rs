use leptos::prelude::*;
use leptos_router::components::A;

use crate::data::models::Cancha;

#[component]
pub fn TarjetaCancha(
    cancha: Cancha,
    #[prop(into)] es_favorito: Signal<bool>,
    #[prop(into)] al_alternar_favorito: Callback<i64>,
) -> impl IntoView {
    let cancha_id = cancha.id;
    let detalle = format!("/detalle/{cancha_id}");
    let precio = cancha.precio_por_hora;

    view! {
        <div class="bg-white rounded-lg shadow-sm hover:shadow-md transition-shadow p-4 flex flex-col">
            <div class="flex justify-between items-start">
                <h3 class="font-semibold text-gray-800">{cancha.nombre.clone()}</h3>
                <button
                    class=move || if es_favorito.get() {
                        "text-yellow-500 text-xl"
                    } else {
                        "text-gray-300 text-xl hover:text-yellow-400"
                    }
                    title="Favorito"
                    on:click=move |_| al_alternar_favorito.run(cancha_id)
                >
                    "★"
                </button>
            </div>

            <p class="text-sm text-gray-600">{cancha.deporte.clone()} " • " {cancha.ubicacion.clone()}</p>

            {move || match precio {
                Some(precio) => view! {
                    <p class="text-green-600 font-semibold mt-1">{format!("${precio:.0}/hora")}</p>
                }.into_any(),
                None => view! { <p class="text-gray-400 mt-1">"Precio a consultar"</p> }.into_any(),
            }}

            {(!cancha.disponible).then(|| view! {
                <p class="text-xs text-red-500 mt-1">"No disponible por el momento"</p>
            })}

            <div class="mt-auto pt-3">
                <A
                    href=detalle
                    attr:class="inline-block px-3 py-1.5 bg-green-600 text-white text-sm rounded-md hover:bg-green-700 transition-colors"
                >
                    "Ver detalle"
                </A>
            </div>
        </div>
    }
}
