use leptos::prelude::*;
use leptos_router::components::A;

use crate::data::api::ApiClient;
use crate::data::mis_reservas::{cancelar_reserva, cargar_reservas};
use crate::data::models::Reserva;
use crate::data::session::usar_sesion;
use crate::utils::date::formatear_marca;

#[component]
pub fn MisReservas() -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let sesion = usar_sesion();

    let (reservas, set_reservas) = create_signal(Vec::<Reserva>::new());
    let (cargando, set_cargando) = create_signal(false);
    let (error, set_error) = create_signal::<Option<String>>(None);

    {
        let api = api.clone();
        Effect::new(move |_| {
            let token = sesion.token();
            set_cargando(true);
            set_error(None);
            let api = api.clone();
            leptos::task::spawn_local(async move {
                match cargar_reservas(&api, token.as_deref()).await {
                    Ok(lista) => set_reservas(lista),
                    Err(err) => set_error(Some(err.mensaje_o("Error al cargar reservas"))),
                }
                set_cargando(false);
            });
        });
    }

    let api_cancelar = api.clone();
    let manejar_cancelacion = move |reserva_id: i64| {
        let Some(token) = sesion.token_actual() else {
            return;
        };
        set_cargando(true);
        set_error(None);
        let api = api_cancelar.clone();
        leptos::task::spawn_local(async move {
            match cancelar_reserva(&api, &token, reserva_id).await {
                Ok(lista) => set_reservas(lista),
                Err(err) => set_error(Some(err.mensaje_o("Error al cancelar reserva"))),
            }
            set_cargando(false);
        });
    };

    view! {
        <div class="max-w-4xl mx-auto p-4">
            <h1 class="text-2xl font-bold text-gray-800 mb-4">"Mis Reservas"</h1>

            {move || error.get().map(|mensaje| view! {
                <div class="mb-4 p-3 bg-red-100 border border-red-400 text-red-700 rounded">{mensaje}</div>
            })}

            {move || if !sesion.activa() {
                view! {
                    <div class="text-center py-12 text-gray-600">
                        "Iniciá sesión para ver tus reservas. "
                        <A href="/login" attr:class="text-green-700 hover:underline">"Ingresar"</A>
                    </div>
                }.into_any()
            } else if cargando.get() {
                view! { <div class="text-center py-12 text-gray-600">"Cargando reservas..."</div> }.into_any()
            } else if reservas.get().is_empty() {
                view! { <div class="text-center py-12 text-gray-500">"Todavía no tenés reservas"</div> }.into_any()
            } else {
                view! {
                    <div class="space-y-3">
                        {reservas.get().into_iter().map(|reserva| {
                            let reserva_id = reserva.id;
                            let cancelar = manejar_cancelacion.clone();
                            let nombre_cancha = reserva
                                .cancha
                                .as_ref()
                                .map(|cancha| cancha.nombre.clone())
                                .unwrap_or_else(|| format!("Reserva #{reserva_id}"));
                            view! {
                                <div class="bg-white rounded-lg shadow-sm p-4 flex flex-wrap justify-between items-center gap-3">
                                    <div>
                                        <h3 class="font-semibold text-gray-800">{nombre_cancha}</h3>
                                        <p class="text-sm text-gray-600">
                                            {formatear_marca(&reserva.fecha_hora_inicio)}
                                            " → "
                                            {formatear_marca(&reserva.fecha_hora_fin)}
                                        </p>
                                        <p class="text-xs text-gray-500 mt-1">
                                            {reserva.estado.clone().unwrap_or_else(|| "PENDIENTE".to_string())}
                                            {reserva.monto_total.map(|monto| format!(" • ${monto:.2}")).unwrap_or_default()}
                                        </p>
                                    </div>
                                    <button
                                        class="px-3 py-1.5 text-sm bg-red-100 text-red-700 border border-red-300 rounded-md hover:bg-red-200 transition-colors"
                                        on:click=move |_| cancelar(reserva_id)
                                    >
                                        "Cancelar"
                                    </button>
                                </div>
                            }
                        }).collect::<Vec<_>>()}
                    </div>
                }.into_any()
            }}
        </div>
    }
}
