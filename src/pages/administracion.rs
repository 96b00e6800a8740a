use leptos::prelude::*;
use leptos_router::components::A;

use crate::data::api::ApiClient;
use crate::data::models::{Producto, ProductoDatos, Reserva};
use crate::data::productos;
use crate::data::reservas_admin;
use crate::data::session::usar_sesion;
use crate::utils::date::formatear_marca;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Pestana {
    Reservas,
    Productos,
}

/// Club-side panel: reservation management and product catalog, both with the
/// same mutate-then-reload discipline as the player flows.
#[component]
pub fn Administracion() -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let sesion = usar_sesion();

    let (pestana, set_pestana) = create_signal(Pestana::Reservas);
    let (reservas, set_reservas) = create_signal(Vec::<Reserva>::new());
    let (lista_productos, set_lista_productos) = create_signal(Vec::<Producto>::new());
    let (cargando, set_cargando) = create_signal(false);
    let (error, set_error) = create_signal::<Option<String>>(None);

    let (nombre_producto, set_nombre_producto) = create_signal(String::new());
    let (tipo_producto, set_tipo_producto) = create_signal(String::new());
    let (precio_producto, set_precio_producto) = create_signal(String::new());

    {
        let api = api.clone();
        Effect::new(move |_| {
            let Some(token) = sesion.token() else {
                return;
            };
            set_cargando(true);
            set_error(None);
            let api = api.clone();
            leptos::task::spawn_local(async move {
                match reservas_admin::cargar_reservas_admin(&api, &token).await {
                    Ok(lista) => set_reservas(lista),
                    Err(err) => set_error(Some(err.mensaje_o("Error al cargar reservas"))),
                }
                match productos::cargar_productos(&api).await {
                    Ok(lista) => set_lista_productos(lista),
                    Err(err) => log::warn!("no se pudieron cargar los productos: {err}"),
                }
                set_cargando(false);
            });
        });
    }

    let api_reserva = api.clone();
    let operar_reserva = move |reserva_id: i64, accion: &'static str| {
        let Some(token) = sesion.token_actual() else {
            return;
        };
        set_cargando(true);
        set_error(None);
        let api = api_reserva.clone();
        leptos::task::spawn_local(async move {
            let resultado = match accion {
                "confirmar" => reservas_admin::confirmar(&api, &token, reserva_id).await,
                "completar" => reservas_admin::completar(&api, &token, reserva_id).await,
                _ => reservas_admin::cancelar(&api, &token, reserva_id).await,
            };
            match resultado {
                Ok(lista) => set_reservas(lista),
                Err(err) => set_error(Some(err.mensaje_o("Error al actualizar la reserva"))),
            }
            set_cargando(false);
        });
    };

    let api_crear = api.clone();
    let crear_producto = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(token) = sesion.token_actual() else {
            return;
        };
        let nombre = nombre_producto.get();
        if nombre.trim().is_empty() {
            set_error(Some("El producto necesita un nombre".to_string()));
            return;
        }
        let datos = ProductoDatos {
            nombre,
            descripcion: None,
            tipo: {
                let valor = tipo_producto.get();
                (!valor.is_empty()).then_some(valor)
            },
            precio: precio_producto.get().parse().ok(),
        };
        set_cargando(true);
        set_error(None);
        let api = api_crear.clone();
        leptos::task::spawn_local(async move {
            match productos::crear(&api, &token, &datos).await {
                Ok(lista) => {
                    set_lista_productos(lista);
                    set_nombre_producto(String::new());
                    set_tipo_producto(String::new());
                    set_precio_producto(String::new());
                }
                Err(err) => set_error(Some(err.mensaje_o("Error al crear producto"))),
            }
            set_cargando(false);
        });
    };

    let api_producto = api.clone();
    let operar_producto = move |producto_id: i64, accion: &'static str| {
        let Some(token) = sesion.token_actual() else {
            return;
        };
        set_cargando(true);
        set_error(None);
        let api = api_producto.clone();
        leptos::task::spawn_local(async move {
            let resultado = match accion {
                "eliminar" => productos::eliminar(&api, &token, producto_id).await,
                _ => productos::alternar_disponibilidad(&api, &token, producto_id).await,
            };
            match resultado {
                Ok(lista) => set_lista_productos(lista),
                Err(err) => set_error(Some(err.mensaje_o("Error al actualizar producto"))),
            }
            set_cargando(false);
        });
    };

    view! {
        <div class="max-w-6xl mx-auto p-4">
            <h1 class="text-2xl font-bold text-gray-800 mb-4">"Administración"</h1>

            {move || error.get().map(|mensaje| view! {
                <div class="mb-4 p-3 bg-red-100 border border-red-400 text-red-700 rounded">{mensaje}</div>
            })}

            {move || if !sesion.es_club() {
                view! {
                    <div class="text-center py-12 text-gray-600">
                        "Esta sección es solo para clubes. "
                        <A href="/login" attr:class="text-green-700 hover:underline">"Ingresar"</A>
                    </div>
                }.into_any()
            } else {
                let operar_reserva = operar_reserva.clone();
                let operar_producto = operar_producto.clone();
                let crear_producto = crear_producto.clone();
                view! {
                    <div>
                        <div class="flex gap-2 mb-6">
                            <button
                                class=move || if pestana.get() == Pestana::Reservas {
                                    "px-4 py-2 bg-green-600 text-white rounded-md"
                                } else {
                                    "px-4 py-2 bg-gray-200 text-gray-700 rounded-md hover:bg-gray-300"
                                }
                                on:click=move |_| set_pestana(Pestana::Reservas)
                            >
                                "Reservas"
                            </button>
                            <button
                                class=move || if pestana.get() == Pestana::Productos {
                                    "px-4 py-2 bg-green-600 text-white rounded-md"
                                } else {
                                    "px-4 py-2 bg-gray-200 text-gray-700 rounded-md hover:bg-gray-300"
                                }
                                on:click=move |_| set_pestana(Pestana::Productos)
                            >
                                "Productos"
                            </button>
                        </div>

                        {move || if cargando.get() {
                            view! { <div class="text-center py-4 text-sm text-gray-600">"Actualizando..."</div> }.into_any()
                        } else {
                            view! { <div class="hidden"></div> }.into_any()
                        }}

                        {move || match pestana.get() {
                            Pestana::Reservas => {
                                let operar = operar_reserva.clone();
                                view! {
                                    <div class="space-y-3">
                                        {reservas.get().into_iter().map(|reserva| {
                                            let reserva_id = reserva.id;
                                            let confirmar = operar.clone();
                                            let completar = operar.clone();
                                            let cancelar = operar.clone();
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
                                                        </p>
                                                    </div>
                                                    <div class="flex gap-2">
                                                        <button
                                                            class="px-3 py-1.5 text-sm bg-green-600 text-white rounded-md hover:bg-green-700"
                                                            on:click=move |_| confirmar(reserva_id, "confirmar")
                                                        >
                                                            "Confirmar"
                                                        </button>
                                                        <button
                                                            class="px-3 py-1.5 text-sm bg-blue-600 text-white rounded-md hover:bg-blue-700"
                                                            on:click=move |_| completar(reserva_id, "completar")
                                                        >
                                                            "Completar"
                                                        </button>
                                                        <button
                                                            class="px-3 py-1.5 text-sm bg-red-100 text-red-700 border border-red-300 rounded-md hover:bg-red-200"
                                                            on:click=move |_| cancelar(reserva_id, "cancelar")
                                                        >
                                                            "Cancelar"
                                                        </button>
                                                    </div>
                                                </div>
                                            }
                                        }).collect::<Vec<_>>()}
                                    </div>
                                }.into_any()
                            }
                            Pestana::Productos => {
                                let operar = operar_producto.clone();
                                let crear = crear_producto.clone();
                                view! {
                                    <div>
                                        <form class="bg-white rounded-lg shadow-sm p-4 mb-4 flex flex-wrap gap-3 items-end" on:submit=crear>
                                            <div>
                                                <label class="block text-sm font-medium text-gray-700 mb-1">"Nombre"</label>
                                                <input
                                                    type="text"
                                                    class="px-3 py-2 border border-gray-300 rounded-md text-sm"
                                                    prop:value=nombre_producto
                                                    on:input=move |ev| set_nombre_producto(event_target_value(&ev))
                                                />
                                            </div>
                                            <div>
                                                <label class="block text-sm font-medium text-gray-700 mb-1">"Tipo"</label>
                                                <input
                                                    type="text"
                                                    class="px-3 py-2 border border-gray-300 rounded-md text-sm"
                                                    prop:value=tipo_producto
                                                    on:input=move |ev| set_tipo_producto(event_target_value(&ev))
                                                />
                                            </div>
                                            <div>
                                                <label class="block text-sm font-medium text-gray-700 mb-1">"Precio"</label>
                                                <input
                                                    type="number"
                                                    step="0.01"
                                                    class="px-3 py-2 border border-gray-300 rounded-md text-sm w-28"
                                                    prop:value=precio_producto
                                                    on:input=move |ev| set_precio_producto(event_target_value(&ev))
                                                />
                                            </div>
                                            <button
                                                type="submit"
                                                class="px-4 py-2 bg-green-600 text-white rounded-md hover:bg-green-700 text-sm"
                                            >
                                                "Agregar producto"
                                            </button>
                                        </form>

                                        <div class="space-y-2">
                                            {lista_productos.get().into_iter().map(|producto| {
                                                let producto_id = producto.id;
                                                let alternar = operar.clone();
                                                let eliminar = operar.clone();
                                                view! {
                                                    <div class="bg-white rounded-lg shadow-sm p-4 flex flex-wrap justify-between items-center gap-3">
                                                        <div>
                                                            <h3 class="font-semibold text-gray-800">{producto.nombre.clone()}</h3>
                                                            <p class="text-sm text-gray-600">
                                                                {producto.tipo.clone().unwrap_or_else(|| "Sin tipo".to_string())}
                                                                {producto.precio.map(|precio| format!(" • ${precio:.2}")).unwrap_or_default()}
                                                            </p>
                                                        </div>
                                                        <div class="flex items-center gap-2">
                                                            <span class=if producto.disponible {
                                                                "text-xs px-2 py-1 rounded-full bg-green-100 text-green-700"
                                                            } else {
                                                                "text-xs px-2 py-1 rounded-full bg-gray-100 text-gray-500"
                                                            }>
                                                                {if producto.disponible { "Disponible" } else { "Oculto" }}
                                                            </span>
                                                            <button
                                                                class="px-3 py-1.5 text-sm bg-gray-200 rounded-md hover:bg-gray-300"
                                                                on:click=move |_| alternar(producto_id, "alternar")
                                                            >
                                                                "Alternar"
                                                            </button>
                                                            <button
                                                                class="px-3 py-1.5 text-sm bg-red-100 text-red-700 border border-red-300 rounded-md hover:bg-red-200"
                                                                on:click=move |_| eliminar(producto_id, "eliminar")
                                                            >
                                                                "Eliminar"
                                                            </button>
                                                        </div>
                                                    </div>
                                                }
                                            }).collect::<Vec<_>>()}
                                        </div>
                                    </div>
                                }.into_any()
                            }
                        }}
                    </div>
                }.into_any()
            }}
        </div>
    }
}
