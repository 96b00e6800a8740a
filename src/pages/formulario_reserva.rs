use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::data::api::ApiClient;
use crate::data::models::Cancha;
use crate::data::reserva::{
    cargar_configuracion, cargar_horarios, confirmar_reserva, ruta_pago,
    verificar_disponibilidad, ErrorEnvio, FlujoReserva,
};
use crate::data::session::usar_sesion;
use crate::utils::date::{hoy, recortar_hora};

/// Booking modal for one cancha. All workflow rules live in `FlujoReserva`;
/// this component wires signals, network futures and navigation around it.
#[component]
pub fn FormularioReserva(cancha: Cancha, set_mostrar: WriteSignal<bool>) -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let sesion = usar_sesion();
    let navegar = use_navigate();

    let cancha_id = cancha.id;
    let flujo = RwSignal::new(FlujoReserva::nuevo(cancha_id, cancha.precio_por_hora));

    let (error, set_error) = create_signal::<Option<String>>(None);
    let (cargando_configuracion, set_cargando_configuracion) = create_signal(false);
    let (cargando_horarios, set_cargando_horarios) = create_signal(false);
    let (verificando, set_verificando) = create_signal(false);
    let (enviando, set_enviando) = create_signal(false);

    // configuración de horarios, una sola vez al abrir el formulario
    {
        let api = api.clone();
        Effect::new(move |_| {
            set_cargando_configuracion(true);
            let api = api.clone();
            leptos::task::spawn_local(async move {
                let configuracion = cargar_configuracion(&api, cancha_id).await;
                flujo.update(|flujo| flujo.aplicar_configuracion(configuracion));
                set_cargando_configuracion(false);
            });
        });
    }

    // recarga de horarios cuando cambian fecha o configuración
    let dependencias = Memo::new(move |_| {
        flujo.with(|flujo| (flujo.datos.fecha.clone(), flujo.configuracion.clone()))
    });
    {
        let api = api.clone();
        Effect::new(move |_| {
            let _ = dependencias.get();
            let pedido = flujo.try_update(|flujo| flujo.consulta_horarios());
            let Some(Some((generacion, consulta))) = pedido else {
                return;
            };
            set_cargando_horarios(true);
            let api = api.clone();
            leptos::task::spawn_local(async move {
                let horarios = cargar_horarios(&api, &consulta).await;
                flujo.update(|flujo| {
                    flujo.aplicar_horarios(generacion, horarios);
                });
                set_cargando_horarios(false);
            });
        });
    }

    let api_verificar = api.clone();
    let manejar_verificacion = move |_| {
        match flujo.try_update(|flujo| flujo.preparar_verificacion()) {
            Some(Ok((generacion, consulta))) => {
                set_error(None);
                set_verificando(true);
                let api = api_verificar.clone();
                leptos::task::spawn_local(async move {
                    match verificar_disponibilidad(&api, &consulta).await {
                        Ok(veredicto) => {
                            flujo.update(|flujo| {
                                flujo.aplicar_disponibilidad(generacion, Some(veredicto));
                            });
                        }
                        Err(err) => {
                            log::warn!("verificación de disponibilidad fallida: {err}");
                            flujo.update(|flujo| {
                                flujo.aplicar_disponibilidad(generacion, None);
                            });
                            set_error(Some("Error al verificar disponibilidad".to_string()));
                        }
                    }
                    set_verificando(false);
                });
            }
            Some(Err(err)) => set_error(Some(err.to_string())),
            None => {}
        }
    };

    let api_envio = api.clone();
    let navegar_envio = navegar.clone();
    let manejar_envio = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        if !sesion.activa() {
            navegar_envio("/login", Default::default());
            return;
        }

        set_error(None);
        set_enviando(true);
        let api = api_envio.clone();
        let navegar = navegar_envio.clone();
        let token = sesion.token_actual();
        let instantanea = flujo.get_untracked();
        leptos::task::spawn_local(async move {
            match confirmar_reserva(&api, token.as_deref(), &instantanea).await {
                Ok(reserva) => {
                    navegar(&ruta_pago(reserva.id), Default::default());
                }
                Err(ErrorEnvio::SinSesion) => navegar("/login", Default::default()),
                Err(err) => set_error(Some(err.to_string())),
            }
            set_enviando(false);
        });
    };

    view! {
        <div class="fixed inset-0 bg-black bg-opacity-50 flex items-center justify-center p-4 z-50">
            <div class="bg-white rounded-lg max-w-md w-full max-h-[90vh] overflow-y-auto">
                <div class="p-6">
                    <div class="flex justify-between items-center mb-6">
                        <h2 class="text-2xl font-bold text-gray-800">"Reservar Cancha"</h2>
                        <button
                            class="text-gray-500 hover:text-gray-700 text-2xl"
                            on:click=move |_| set_mostrar(false)
                        >
                            "×"
                        </button>
                    </div>

                    <div class="mb-6 p-4 bg-gray-50 rounded-lg">
                        <h3 class="font-semibold text-gray-800">{cancha.nombre.clone()}</h3>
                        <p class="text-gray-600">{cancha.deporte.clone()} " • " {cancha.ubicacion.clone()}</p>
                        {cancha.precio_por_hora.map(|precio| view! {
                            <p class="text-green-600 font-semibold">{format!("${precio:.0}/hora")}</p>
                        })}

                        {move || cargando_configuracion.get().then(|| view! {
                            <p class="mt-3 text-sm text-gray-500">"Cargando configuración..."</p>
                        })}

                        {move || flujo.with(|flujo| flujo.configuracion.clone()).map(|configuracion| view! {
                            <div class="mt-3 text-sm text-gray-600">
                                <p>{format!(
                                    "Horario: {} - {}",
                                    recortar_hora(&configuracion.hora_apertura),
                                    recortar_hora(&configuracion.hora_cierre),
                                )}</p>
                                <p>{format!("Duración de turnos: {} minutos", configuracion.duracion_turno_minutos)}</p>
                            </div>
                        })}
                    </div>

                    {move || error.get().map(|mensaje| view! {
                        <div class="mb-4 p-3 bg-red-100 border border-red-400 text-red-700 rounded">
                            {mensaje}
                        </div>
                    })}

                    <form class="space-y-4" on:submit=manejar_envio>
                        <div>
                            <label class="block text-sm font-medium text-gray-700 mb-1">"Fecha"</label>
                            <input
                                type="date"
                                min=hoy()
                                class="w-full px-3 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-blue-500"
                                prop:value=move || flujo.with(|flujo| flujo.datos.fecha.clone())
                                on:input=move |ev| flujo.update(|flujo| flujo.set_fecha(event_target_value(&ev)))
                                required
                            />
                        </div>

                        {move || {
                            let listos = flujo.with(|flujo| {
                                !flujo.datos.fecha.is_empty() && flujo.configuracion.is_some()
                            });
                            if !listos {
                                return view! { <div class="hidden"></div> }.into_any();
                            }
                            if cargando_horarios.get() {
                                return view! {
                                    <div class="text-center py-4 text-sm text-gray-600">"Cargando horarios..."</div>
                                }.into_any();
                            }
                            let horarios = flujo.with(|flujo| flujo.horarios.clone());
                            if horarios.is_empty() {
                                return view! {
                                    <div class="text-center py-4 text-gray-500">
                                        "No hay horarios disponibles para esta fecha"
                                    </div>
                                }.into_any();
                            }
                            let seleccion = flujo.with(|flujo| {
                                (flujo.datos.hora_inicio.clone(), flujo.datos.hora_fin.clone())
                            });
                            view! {
                                <div>
                                    <label class="block text-sm font-medium text-gray-700 mb-2">"Horarios Disponibles"</label>
                                    <div class="grid grid-cols-2 sm:grid-cols-3 gap-2 max-h-40 overflow-y-auto">
                                        {horarios.into_iter().map(|horario| {
                                            let activo = seleccion.0 == horario.hora_inicio
                                                && seleccion.1 == horario.hora_fin;
                                            let etiqueta = format!(
                                                "{} - {}",
                                                recortar_hora(&horario.hora_inicio),
                                                recortar_hora(&horario.hora_fin),
                                            );
                                            let clase = if activo {
                                                "p-2 text-sm rounded-md border bg-blue-600 text-white border-blue-600"
                                            } else {
                                                "p-2 text-sm rounded-md border bg-white text-gray-700 border-gray-300 hover:bg-blue-50 hover:border-blue-300"
                                            };
                                            view! {
                                                <button
                                                    type="button"
                                                    class=clase
                                                    on:click=move |_| flujo.update(|flujo| flujo.seleccionar_horario(&horario))
                                                >
                                                    {etiqueta}
                                                </button>
                                            }
                                        }).collect::<Vec<_>>()}
                                    </div>
                                </div>
                            }.into_any()
                        }}

                        <div class="grid grid-cols-2 gap-4">
                            <div>
                                <label class="block text-sm font-medium text-gray-700 mb-1">"Hora Inicio"</label>
                                <input
                                    type="time"
                                    class="w-full px-3 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-blue-500"
                                    prop:value=move || flujo.with(|flujo| flujo.datos.hora_inicio.clone())
                                    on:input=move |ev| flujo.update(|flujo| flujo.set_hora_inicio(event_target_value(&ev)))
                                    required
                                />
                            </div>
                            <div>
                                <label class="block text-sm font-medium text-gray-700 mb-1">"Hora Fin"</label>
                                <input
                                    type="time"
                                    class="w-full px-3 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-blue-500"
                                    prop:value=move || flujo.with(|flujo| flujo.datos.hora_fin.clone())
                                    on:input=move |ev| flujo.update(|flujo| flujo.set_hora_fin(event_target_value(&ev)))
                                    required
                                />
                            </div>
                        </div>

                        <div class="flex gap-2">
                            <button
                                type="button"
                                class="flex-1 bg-blue-600 text-white py-2 px-4 rounded-md hover:bg-blue-700 disabled:bg-gray-400 transition-colors"
                                prop:disabled=move || {
                                    verificando.get() || flujo.with(|flujo| {
                                        flujo.datos.fecha.is_empty()
                                            || flujo.datos.hora_inicio.is_empty()
                                            || flujo.datos.hora_fin.is_empty()
                                    })
                                }
                                on:click=manejar_verificacion
                            >
                                {move || if verificando.get() { "Verificando..." } else { "Verificar Disponibilidad" }}
                            </button>
                        </div>

                        {move || match flujo.with(|flujo| flujo.disponibilidad.clone()) {
                            Some(veredicto) if veredicto.disponible => view! {
                                <div class="p-3 rounded-md bg-green-100 border border-green-400 text-green-700">
                                    "Horario disponible"
                                </div>
                            }.into_any(),
                            Some(_) => view! {
                                <div class="p-3 rounded-md bg-red-100 border border-red-400 text-red-700">
                                    "Horario no disponible"
                                </div>
                            }.into_any(),
                            None => view! { <div class="hidden"></div> }.into_any(),
                        }}

                        <div>
                            <label class="block text-sm font-medium text-gray-700 mb-1">"Nombre del Jugador"</label>
                            <input
                                type="text"
                                placeholder="Nombre completo"
                                class="w-full px-3 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-blue-500"
                                prop:value=move || flujo.with(|flujo| flujo.datos.nombre_jugador.clone())
                                on:input=move |ev| flujo.update(|flujo| flujo.set_nombre_jugador(event_target_value(&ev)))
                                required
                            />
                        </div>

                        <div>
                            <label class="block text-sm font-medium text-gray-700 mb-1">"Teléfono"</label>
                            <input
                                type="tel"
                                placeholder="Número de teléfono"
                                class="w-full px-3 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-blue-500"
                                prop:value=move || flujo.with(|flujo| flujo.datos.telefono.clone())
                                on:input=move |ev| flujo.update(|flujo| flujo.set_telefono(event_target_value(&ev)))
                                required
                            />
                        </div>

                        {move || {
                            let monto = flujo.with(|flujo| flujo.monto_total());
                            if monto > 0.0 {
                                view! {
                                    <div class="p-4 bg-gray-50 rounded-lg flex justify-between items-center">
                                        <span class="text-gray-700">"Total a pagar:"</span>
                                        <span class="text-2xl font-bold text-green-600">{format!("${monto:.2}")}</span>
                                    </div>
                                }.into_any()
                            } else {
                                view! { <div class="hidden"></div> }.into_any()
                            }
                        }}

                        <div class="flex gap-3 pt-4">
                            <button
                                type="button"
                                class="flex-1 bg-gray-300 text-gray-700 py-3 px-4 rounded-md hover:bg-gray-400 transition-colors"
                                on:click=move |_| set_mostrar(false)
                            >
                                "Cancelar"
                            </button>
                            <button
                                type="submit"
                                class="flex-1 bg-green-600 text-white py-3 px-4 rounded-md hover:bg-green-700 disabled:bg-gray-400 transition-colors"
                                prop:disabled=move || {
                                    enviando.get() || !flujo.with(|flujo| flujo.disponibilidad_confirmada())
                                }
                            >
                                {move || if enviando.get() { "Creando..." } else { "Reservar y Pagar" }}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
