use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::data::api::ApiClient;
use crate::data::session::usar_sesion;

#[component]
pub fn Registrar() -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let sesion = usar_sesion();
    let navegar = use_navigate();

    let (nombre, set_nombre) = create_signal(String::new());
    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (tipo, set_tipo) = create_signal("JUGADOR".to_string());
    let (error, set_error) = create_signal::<Option<String>>(None);
    let (cargando, set_cargando) = create_signal(false);

    let manejar_envio = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let nombre = nombre.get();
        let email = email.get();
        let password = password.get();
        let tipo = tipo.get();
        if nombre.is_empty() || email.is_empty() || password.is_empty() {
            set_error(Some("Completa todos los campos".to_string()));
            return;
        }

        set_error(None);
        set_cargando(true);
        let api = api.clone();
        let navegar = navegar.clone();
        leptos::task::spawn_local(async move {
            match api.registrar(&nombre, &email, &password, &tipo).await {
                Ok(respuesta) => match (respuesta.success, respuesta.token, respuesta.user) {
                    (true, Some(token), Some(usuario)) => {
                        let destino = if usuario.es_club() { "/administracion" } else { "/" };
                        sesion.iniciar(token, usuario);
                        navegar(destino, Default::default());
                    }
                    _ => set_error(Some(
                        respuesta
                            .message
                            .unwrap_or_else(|| "No se pudo crear la cuenta".to_string()),
                    )),
                },
                Err(err) => set_error(Some(err.mensaje_o("Error al registrarse"))),
            }
            set_cargando(false);
        });
    };

    view! {
        <div class="max-w-md mx-auto p-4 mt-12">
            <div class="bg-white rounded-lg shadow-sm p-6">
                <h1 class="text-2xl font-bold text-gray-800 mb-6">"Crear Cuenta"</h1>

                {move || error.get().map(|mensaje| view! {
                    <div class="mb-4 p-3 bg-red-100 border border-red-400 text-red-700 rounded">{mensaje}</div>
                })}

                <form class="space-y-4" on:submit=manejar_envio>
                    <div>
                        <label class="block text-sm font-medium text-gray-700 mb-1">"Nombre"</label>
                        <input
                            type="text"
                            class="w-full px-3 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-green-500"
                            prop:value=nombre
                            on:input=move |ev| set_nombre(event_target_value(&ev))
                            required
                        />
                    </div>
                    <div>
                        <label class="block text-sm font-medium text-gray-700 mb-1">"Email"</label>
                        <input
                            type="email"
                            class="w-full px-3 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-green-500"
                            prop:value=email
                            on:input=move |ev| set_email(event_target_value(&ev))
                            required
                        />
                    </div>
                    <div>
                        <label class="block text-sm font-medium text-gray-700 mb-1">"Contraseña"</label>
                        <input
                            type="password"
                            class="w-full px-3 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-green-500"
                            prop:value=password
                            on:input=move |ev| set_password(event_target_value(&ev))
                            required
                        />
                    </div>
                    <div>
                        <label class="block text-sm font-medium text-gray-700 mb-1">"Tipo de cuenta"</label>
                        <select
                            class="w-full px-3 py-2 border border-gray-300 rounded-md bg-white"
                            on:change=move |ev| set_tipo(event_target_value(&ev))
                        >
                            <option value="JUGADOR">"Jugador"</option>
                            <option value="CLUB">"Club"</option>
                        </select>
                    </div>
                    <button
                        type="submit"
                        class="w-full bg-green-600 text-white py-2 px-4 rounded-md hover:bg-green-700 disabled:bg-gray-400 transition-colors"
                        prop:disabled=cargando
                    >
                        {move || if cargando.get() { "Creando cuenta..." } else { "Registrarse" }}
                    </button>
                </form>

                <p class="mt-4 text-sm text-gray-600 text-center">
                    "¿Ya tenés cuenta? "
                    <A href="/login" attr:class="text-green-700 hover:underline">"Ingresá"</A>
                </p>
            </div>
        </div>
    }
}
