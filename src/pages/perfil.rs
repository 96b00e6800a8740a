use leptos::prelude::*;
use leptos_router::components::A;

use crate::data::api::ApiClient;
use crate::data::models::{AltaDeporte, PerfilJugador, PerfilJugadorDatos};
use crate::data::perfil::{
    agregar_adjetivo, agregar_deporte, cargar_perfil, eliminar_deporte, guardar_perfil,
    remover_adjetivo, PerfilBackend,
};
use crate::data::session::usar_sesion;

#[component]
pub fn PerfilJugadorPagina() -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let sesion = usar_sesion();

    let (perfil, set_perfil) = create_signal::<Option<PerfilJugador>>(None);
    let (cargando, set_cargando) = create_signal(false);
    let (error, set_error) = create_signal::<Option<String>>(None);

    let (fecha_nacimiento, set_fecha_nacimiento) = create_signal(String::new());
    let (altura, set_altura) = create_signal(String::new());
    let (peso, set_peso) = create_signal(String::new());

    let (adjetivos_disponibles, set_adjetivos_disponibles) = create_signal(Vec::<String>::new());
    let (deportes_disponibles, set_deportes_disponibles) = create_signal(Vec::<String>::new());

    let (nuevo_deporte, set_nuevo_deporte) = create_signal(String::new());
    let (nuevo_nivel, set_nuevo_nivel) = create_signal(String::new());

    let aplicar_perfil = move |nuevo: Option<PerfilJugador>| {
        if let Some(perfil) = &nuevo {
            set_fecha_nacimiento(perfil.fecha_nacimiento.clone().unwrap_or_default());
            set_altura(perfil.altura.map(|valor| valor.to_string()).unwrap_or_default());
            set_peso(perfil.peso.map(|valor| valor.to_string()).unwrap_or_default());
        }
        set_perfil(nuevo);
    };

    {
        let api = api.clone();
        Effect::new(move |_| {
            let Some(token) = sesion.token() else {
                aplicar_perfil(None);
                return;
            };
            set_cargando(true);
            set_error(None);
            let api = api.clone();
            leptos::task::spawn_local(async move {
                match cargar_perfil(&api, Some(&token)).await {
                    Ok(cargado) => aplicar_perfil(cargado),
                    Err(err) => set_error(Some(err.mensaje_o("Error al cargar el perfil"))),
                }
                if let Ok(lista) = api.adjetivos_disponibles(&token).await {
                    set_adjetivos_disponibles(lista);
                }
                if let Ok(lista) = api.deportes_disponibles(&token).await {
                    set_deportes_disponibles(lista);
                }
                set_cargando(false);
            });
        });
    }

    let api_guardar = api.clone();
    let manejar_guardado = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(token) = sesion.token_actual() else {
            return;
        };
        let datos = PerfilJugadorDatos {
            fecha_nacimiento: {
                let valor = fecha_nacimiento.get();
                (!valor.is_empty()).then_some(valor)
            },
            altura: altura.get().parse().ok(),
            peso: peso.get().parse().ok(),
        };
        set_cargando(true);
        set_error(None);
        let api = api_guardar.clone();
        leptos::task::spawn_local(async move {
            match guardar_perfil(&api, &token, &datos).await {
                Ok(actualizado) => aplicar_perfil(actualizado),
                Err(err) => set_error(Some(err.mensaje_o("Error al guardar el perfil"))),
            }
            set_cargando(false);
        });
    };

    let api_alta = api.clone();
    let manejar_alta_deporte = move |_| {
        let Some(token) = sesion.token_actual() else {
            return;
        };
        let deporte = nuevo_deporte.get();
        if deporte.is_empty() {
            set_error(Some("Elegí un deporte para agregar".to_string()));
            return;
        }
        let alta = AltaDeporte {
            deporte,
            puntuacion: None,
            posicion: None,
            anos_experiencia: None,
            nivel: {
                let valor = nuevo_nivel.get();
                (!valor.is_empty()).then_some(valor)
            },
        };
        set_cargando(true);
        set_error(None);
        let api = api_alta.clone();
        leptos::task::spawn_local(async move {
            match agregar_deporte(&api, &token, &alta).await {
                Ok(actualizado) => {
                    aplicar_perfil(actualizado);
                    set_nuevo_deporte(String::new());
                    set_nuevo_nivel(String::new());
                }
                Err(err) => set_error(Some(err.mensaje_o("Error al agregar deporte"))),
            }
            set_cargando(false);
        });
    };

    let api_baja = api.clone();
    let manejar_baja_deporte = move |deporte: String| {
        let Some(token) = sesion.token_actual() else {
            return;
        };
        set_cargando(true);
        set_error(None);
        let api = api_baja.clone();
        leptos::task::spawn_local(async move {
            match eliminar_deporte(&api, &token, &deporte).await {
                Ok(actualizado) => aplicar_perfil(actualizado),
                Err(err) => set_error(Some(err.mensaje_o("Error al eliminar deporte"))),
            }
            set_cargando(false);
        });
    };

    let api_adjetivo = api.clone();
    let manejar_adjetivo = move |adjetivo: String, agregar: bool| {
        let Some(token) = sesion.token_actual() else {
            return;
        };
        set_cargando(true);
        set_error(None);
        let api = api_adjetivo.clone();
        leptos::task::spawn_local(async move {
            let resultado = if agregar {
                agregar_adjetivo(&api, &token, &adjetivo).await
            } else {
                remover_adjetivo(&api, &token, &adjetivo).await
            };
            match resultado {
                Ok(actualizado) => aplicar_perfil(actualizado),
                Err(err) => set_error(Some(err.mensaje_o("Error al actualizar adjetivos"))),
            }
            set_cargando(false);
        });
    };

    view! {
        <div class="max-w-4xl mx-auto p-4">
            <h1 class="text-2xl font-bold text-gray-800 mb-4">"Mi Perfil de Jugador"</h1>

            {move || error.get().map(|mensaje| view! {
                <div class="mb-4 p-3 bg-red-100 border border-red-400 text-red-700 rounded">{mensaje}</div>
            })}

            {move || if !sesion.activa() {
                view! {
                    <div class="text-center py-12 text-gray-600">
                        "Iniciá sesión para armar tu perfil. "
                        <A href="/login" attr:class="text-green-700 hover:underline">"Ingresar"</A>
                    </div>
                }.into_any()
            } else {
                let baja_deporte = manejar_baja_deporte.clone();
                let alternar_adjetivo = manejar_adjetivo.clone();
                let sumar_adjetivo = manejar_adjetivo.clone();
                view! {
                    <div class="space-y-6">
                        {move || perfil.get().map(|perfil| view! {
                            <div class="bg-white rounded-lg shadow-sm p-4 flex flex-wrap gap-6 text-sm text-gray-600">
                                <span>{format!("Rating: {:.1}", perfil.rating_promedio.unwrap_or(0.0))}</span>
                                <span>{format!("Partidos jugados: {}", perfil.partidos_jugados.unwrap_or(0))}</span>
                                <span>{format!("Ganados: {}", perfil.partidos_ganados.unwrap_or(0))}</span>
                            </div>
                        })}

                        <form class="bg-white rounded-lg shadow-sm p-4 space-y-4" on:submit=manejar_guardado.clone()>
                            <h2 class="font-semibold text-gray-800">"Datos personales"</h2>
                            <div class="grid grid-cols-1 sm:grid-cols-3 gap-4">
                                <div>
                                    <label class="block text-sm font-medium text-gray-700 mb-1">"Fecha de nacimiento"</label>
                                    <input
                                        type="date"
                                        class="w-full px-3 py-2 border border-gray-300 rounded-md"
                                        prop:value=fecha_nacimiento
                                        on:input=move |ev| set_fecha_nacimiento(event_target_value(&ev))
                                    />
                                </div>
                                <div>
                                    <label class="block text-sm font-medium text-gray-700 mb-1">"Altura (cm)"</label>
                                    <input
                                        type="number"
                                        class="w-full px-3 py-2 border border-gray-300 rounded-md"
                                        prop:value=altura
                                        on:input=move |ev| set_altura(event_target_value(&ev))
                                    />
                                </div>
                                <div>
                                    <label class="block text-sm font-medium text-gray-700 mb-1">"Peso (kg)"</label>
                                    <input
                                        type="number"
                                        class="w-full px-3 py-2 border border-gray-300 rounded-md"
                                        prop:value=peso
                                        on:input=move |ev| set_peso(event_target_value(&ev))
                                    />
                                </div>
                            </div>
                            <button
                                type="submit"
                                class="px-4 py-2 bg-green-600 text-white rounded-md hover:bg-green-700 disabled:bg-gray-400 transition-colors"
                                prop:disabled=cargando
                            >
                                {move || if cargando.get() { "Guardando..." } else { "Guardar perfil" }}
                            </button>
                        </form>

                        <div class="bg-white rounded-lg shadow-sm p-4">
                            <h2 class="font-semibold text-gray-800 mb-3">"Mis deportes"</h2>
                            <div class="space-y-2">
                                {move || {
                                    let deportes = perfil.get().map(|perfil| perfil.deportes).unwrap_or_default();
                                    if deportes.is_empty() {
                                        view! { <p class="text-sm text-gray-500">"Todavía no agregaste deportes"</p> }.into_any()
                                    } else {
                                        view! {
                                            <>
                                                {deportes.into_iter().map(|deporte| {
                                                    let nombre = deporte.deporte.clone();
                                                    let baja = baja_deporte.clone();
                                                    view! {
                                                        <div class="flex justify-between items-center text-sm border-b border-gray-100 py-2">
                                                            <span>
                                                                {deporte.deporte.clone()}
                                                                {deporte.nivel.clone().map(|nivel| format!(" ({nivel})")).unwrap_or_default()}
                                                            </span>
                                                            <button
                                                                class="text-red-600 hover:underline"
                                                                on:click=move |_| baja(nombre.clone())
                                                            >
                                                                "Quitar"
                                                            </button>
                                                        </div>
                                                    }
                                                }).collect::<Vec<_>>()}
                                            </>
                                        }.into_any()
                                    }
                                }}
                            </div>

                            <div class="mt-4 flex flex-wrap gap-2 items-end">
                                <select
                                    class="px-3 py-2 border border-gray-300 rounded-md bg-white text-sm"
                                    on:change=move |ev| set_nuevo_deporte(event_target_value(&ev))
                                >
                                    <option value="">"Elegir deporte"</option>
                                    {move || deportes_disponibles.get().into_iter().map(|deporte| view! {
                                        <option value=deporte.clone()>{deporte.clone()}</option>
                                    }).collect::<Vec<_>>()}
                                </select>
                                <input
                                    type="text"
                                    placeholder="Nivel (opcional)"
                                    class="px-3 py-2 border border-gray-300 rounded-md text-sm"
                                    prop:value=nuevo_nivel
                                    on:input=move |ev| set_nuevo_nivel(event_target_value(&ev))
                                />
                                <button
                                    class="px-4 py-2 bg-green-600 text-white rounded-md hover:bg-green-700 text-sm transition-colors"
                                    on:click=manejar_alta_deporte.clone()
                                >
                                    "Agregar deporte"
                                </button>
                            </div>
                        </div>

                        <div class="bg-white rounded-lg shadow-sm p-4">
                            <h2 class="font-semibold text-gray-800 mb-3">"Cómo juego"</h2>
                            <div class="flex flex-wrap gap-2">
                                {move || {
                                    let actuales = perfil.get().map(|perfil| perfil.adjetivos).unwrap_or_default();
                                    actuales.into_iter().map(|adjetivo| {
                                        let alternar = alternar_adjetivo.clone();
                                        let valor = adjetivo.clone();
                                        view! {
                                            <button
                                                class="px-3 py-1 bg-green-100 text-green-800 rounded-full text-sm hover:bg-green-200"
                                                title="Quitar"
                                                on:click=move |_| alternar(valor.clone(), false)
                                            >
                                                {adjetivo.clone()} " ×"
                                            </button>
                                        }
                                    }).collect::<Vec<_>>()
                                }}
                            </div>
                            <div class="mt-3 flex flex-wrap gap-2">
                                {move || {
                                    let actuales = perfil.get().map(|perfil| perfil.adjetivos).unwrap_or_default();
                                    adjetivos_disponibles
                                        .get()
                                        .into_iter()
                                        .filter(|adjetivo| !actuales.contains(adjetivo))
                                        .map(|adjetivo| {
                                            let alternar = sumar_adjetivo.clone();
                                            let valor = adjetivo.clone();
                                            view! {
                                                <button
                                                    class="px-3 py-1 bg-gray-100 text-gray-600 rounded-full text-sm hover:bg-gray-200"
                                                    title="Agregar"
                                                    on:click=move |_| alternar(valor.clone(), true)
                                                >
                                                    "+ " {adjetivo.clone()}
                                                </button>
                                            }
                                        })
                                        .collect::<Vec<_>>()
                                }}
                            </div>
                        </div>
                    </div>
                }.into_any()
            }}
        </div>
    }
}
