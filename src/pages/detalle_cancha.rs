use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::{use_navigate, use_params_map};

use crate::data::api::{ApiClient, ApiError};
use crate::data::models::Cancha;
use crate::data::session::usar_sesion;
use crate::pages::formulario_reserva::FormularioReserva;

#[component]
pub fn DetalleCancha() -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let sesion = usar_sesion();
    let navegar = use_navigate();
    let params = use_params_map();

    let (cancha, set_cancha) = create_signal::<Option<Cancha>>(None);
    let (cargando, set_cargando) = create_signal(true);
    let (error, set_error) = create_signal::<Option<String>>(None);
    let (aviso, set_aviso) = create_signal::<Option<String>>(None);
    let (mostrar_formulario, set_mostrar_formulario) = create_signal(false);

    {
        let api = api.clone();
        Effect::new(move |_| {
            let id = params
                .read()
                .get("id")
                .and_then(|valor| valor.parse::<i64>().ok());
            let Some(id) = id else {
                set_error(Some("Cancha no encontrada".to_string()));
                set_cargando(false);
                return;
            };
            set_cargando(true);
            let api = api.clone();
            leptos::task::spawn_local(async move {
                match api.cancha(id).await {
                    Ok(encontrada) => {
                        set_cancha(Some(encontrada));
                        set_error(None);
                    }
                    Err(ApiError::Rechazo { status: 404, .. }) => {
                        set_error(Some("Cancha no encontrada".to_string()));
                    }
                    Err(err) => {
                        log::warn!("detalle de cancha {id} falló: {err}");
                        set_error(Some(
                            "Error al cargar la cancha. Por favor, intenta de nuevo.".to_string(),
                        ));
                    }
                }
                set_cargando(false);
            });
        });
    }

    let manejar_reserva = move |_| {
        if sesion.usuario().is_none() {
            navegar("/login", Default::default());
            return;
        }
        if !sesion.es_jugador() {
            set_aviso(Some("Solo los jugadores pueden hacer reservas".to_string()));
            return;
        }
        set_mostrar_formulario(true);
    };

    view! {
        <div class="max-w-4xl mx-auto p-4">
            {move || if cargando.get() {
                view! {
                    <div class="text-center py-16 text-gray-600">"Cargando cancha..."</div>
                }.into_any()
            } else if let Some(mensaje) = error.get() {
                view! {
                    <div class="text-center py-16">
                        <h2 class="text-xl font-semibold text-gray-800 mb-2">"Error"</h2>
                        <p class="text-gray-600 mb-4">{mensaje}</p>
                        <A href="/" attr:class="bg-blue-600 text-white px-4 py-2 rounded-md hover:bg-blue-700 transition-colors">
                            "Volver al Inicio"
                        </A>
                    </div>
                }.into_any()
            } else {
                match cancha.get() {
                    Some(cancha) => view! {
                        <div class="bg-white rounded-lg shadow-sm p-6">
                            {cancha.imagenes.first().cloned().map(|imagen| view! {
                                <img src=imagen alt=cancha.nombre.clone() class="w-full h-64 object-cover rounded-lg mb-6"/>
                            })}

                            <h1 class="text-3xl font-bold text-gray-800">{cancha.nombre.clone()}</h1>
                            <p class="text-gray-600 mt-1">{cancha.deporte.clone()} " • " {cancha.ubicacion.clone()}</p>

                            {cancha.descripcion.clone().map(|descripcion| view! {
                                <p class="text-gray-700 mt-4">{descripcion}</p>
                            })}

                            {cancha.precio_por_hora.map(|precio| view! {
                                <p class="text-2xl text-green-600 font-bold mt-4">{format!("${precio:.0}/hora")}</p>
                            })}

                            {move || aviso.get().map(|mensaje| view! {
                                <div class="mt-4 p-3 bg-amber-100 border border-amber-400 text-amber-700 rounded">
                                    {mensaje}
                                </div>
                            })}

                            <div class="mt-6">
                                <button
                                    class="px-6 py-3 bg-green-600 text-white rounded-md hover:bg-green-700 disabled:bg-gray-400 transition-colors"
                                    prop:disabled=!cancha.disponible
                                    on:click=manejar_reserva.clone()
                                >
                                    {if cancha.disponible { "Reservar" } else { "No disponible" }}
                                </button>
                            </div>
                        </div>
                    }.into_any(),
                    None => view! { <div class="hidden"></div> }.into_any(),
                }
            }}

            {move || {
                mostrar_formulario
                    .get()
                    .then(|| cancha.get())
                    .flatten()
                    .map(|cancha| view! {
                        <FormularioReserva cancha=cancha set_mostrar=set_mostrar_formulario/>
                    })
            }}
        </div>
    }
}
