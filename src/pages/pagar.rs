use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_params_map;

use crate::data::api::ApiClient;
use crate::data::mis_reservas::cargar_reservas;
use crate::data::models::Reserva;
use crate::data::session::usar_sesion;
use crate::utils::date::formatear_marca;

/// Summary screen the booking workflow lands on after creating a reservation.
/// The payment itself happens with the club; here the player only reviews
/// what was reserved.
#[component]
pub fn PagarReserva() -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let sesion = usar_sesion();
    let params = use_params_map();

    let (reserva, set_reserva) = create_signal::<Option<Reserva>>(None);
    let (cargando, set_cargando) = create_signal(true);

    {
        let api = api.clone();
        Effect::new(move |_| {
            let reserva_id = params
                .read()
                .get("id")
                .and_then(|valor| valor.parse::<i64>().ok());
            let token = sesion.token();
            let Some(reserva_id) = reserva_id else {
                set_cargando(false);
                return;
            };
            set_cargando(true);
            let api = api.clone();
            leptos::task::spawn_local(async move {
                match cargar_reservas(&api, token.as_deref()).await {
                    Ok(reservas) => {
                        set_reserva(reservas.into_iter().find(|reserva| reserva.id == reserva_id));
                    }
                    Err(err) => log::warn!("no se pudo cargar la reserva {reserva_id}: {err}"),
                }
                set_cargando(false);
            });
        });
    }

    view! {
        <div class="max-w-md mx-auto p-4 mt-12">
            <div class="bg-white rounded-lg shadow-sm p-6 text-center">
                {move || if cargando.get() {
                    view! { <p class="text-gray-600">"Cargando reserva..."</p> }.into_any()
                } else {
                    match reserva.get() {
                        Some(reserva) => view! {
                            <div>
                                <h1 class="text-2xl font-bold text-gray-800">"¡Reserva creada!"</h1>
                                <p class="mt-2 text-gray-600">
                                    {reserva.cancha.as_ref().map(|cancha| cancha.nombre.clone()).unwrap_or_else(|| format!("Reserva #{}", reserva.id))}
                                </p>
                                <p class="mt-1 text-sm text-gray-600">
                                    {formatear_marca(&reserva.fecha_hora_inicio)}
                                    " → "
                                    {formatear_marca(&reserva.fecha_hora_fin)}
                                </p>
                                {reserva.monto_total.map(|monto| view! {
                                    <p class="mt-4 text-3xl font-bold text-green-600">{format!("${monto:.2}")}</p>
                                })}
                                <p class="mt-4 text-sm text-gray-500">
                                    "El pago se coordina directamente con el club al llegar."
                                </p>
                                <div class="mt-6">
                                    <A href="/reservas" attr:class="px-4 py-2 bg-green-600 text-white rounded-md hover:bg-green-700 transition-colors">
                                        "Ver mis reservas"
                                    </A>
                                </div>
                            </div>
                        }.into_any(),
                        None => view! {
                            <div>
                                <p class="text-gray-600">"No encontramos esa reserva."</p>
                                <div class="mt-4">
                                    <A href="/" attr:class="text-green-700 hover:underline">"Volver al inicio"</A>
                                </div>
                            </div>
                        }.into_any(),
                    }
                }}
            </div>
        </div>
    }
}
