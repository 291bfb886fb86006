use dioxus::document::Title;
use dioxus::prelude::*;
#[cfg(feature = "web")]
use dioxus_logger::tracing;

use crate::{
    client::components::Page,
    model::transit::{
        AlertDto, DashboardDto, DriverDto, RouteDto, ALERTS_COLLECTION, DRIVERS_COLLECTION,
        ROUTES_COLLECTION,
    },
};

#[derive(Clone, PartialEq)]
enum DashboardState {
    Loading,
    SignedOut,
    Ready(DashboardDto),
}

#[component]
pub fn Dashboard() -> Element {
    let mut state = use_signal(|| DashboardState::Loading);
    let mut error = use_signal(|| None::<String>);
    // Bumped after every mutation and sign-in to refetch the dashboard.
    let revision = use_signal(|| 0u32);

    #[cfg(feature = "web")]
    {
        let future = use_resource(move || async move {
            let _ = revision();
            crate::client::util::api::get_dashboard().await
        });

        match &*future.read_unchecked() {
            Some(Ok(dashboard)) => {
                let next = match dashboard {
                    Some(dashboard) => DashboardState::Ready(dashboard.clone()),
                    None => DashboardState::SignedOut,
                };
                if *state.peek() != next {
                    state.set(next);
                }
            }
            Some(Err(err)) => {
                tracing::error!(err);
            }
            None => (),
        }
    }

    let content = match &*state.read() {
        DashboardState::Loading => rsx!(div { class: "skeleton h-64 w-full max-w-[1440px]" }),
        DashboardState::SignedOut => rsx!(
            SignInForm { revision }
        ),
        DashboardState::Ready(dashboard) => rsx!(
            if let Some(message) = error() {
                div { class: "alert alert-error w-full max-w-[1440px]", "{message}" }
            }
            NewAlertForm { revision, error }
            RouteTable { routes: dashboard.routes.clone(), revision, error }
            AlertTable { alerts: dashboard.alerts.clone(), revision, error }
            if dashboard.is_admin {
                DriverTable { drivers: dashboard.drivers.clone(), revision, error }
            }
            SignOutButton {}
        ),
    };

    rsx!(
        Title { "Panel | Transit" }
        Page { class: "flex flex-col items-center gap-6",
            {content}
        }
    )
}

/// Deletes a document, then refreshes the dashboard or surfaces the failure.
#[allow(unused_mut, unused_variables)]
fn delete_document(
    collection: &'static str,
    id: String,
    mut revision: Signal<u32>,
    mut error: Signal<Option<String>>,
) {
    #[cfg(feature = "web")]
    spawn(async move {
        match crate::client::util::api::delete_document(collection, &id).await {
            Ok(()) => {
                error.set(None);
                revision += 1;
            }
            Err(err) => error.set(Some(err)),
        }
    });
}

#[component]
fn SignInForm(revision: Signal<u32>) -> Element {
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);

    #[allow(unused_mut, unused_variables)]
    let submit = move |_| {
        let (email, password) = (email(), password());

        #[cfg(feature = "web")]
        spawn(async move {
            match crate::client::util::api::sign_in(email, password).await {
                Ok(_) => {
                    error.set(None);
                    revision += 1;
                }
                Err(err) => error.set(Some(err)),
            }
        });
    };

    rsx!(
        div { class: "flex flex-col gap-2 w-full max-w-sm",
            h2 { class: "text-xl", "Iniciar sesión" }
            if let Some(message) = error() {
                div { class: "alert alert-error", "{message}" }
            }
            input {
                class: "input input-bordered",
                r#type: "email",
                placeholder: "Correo",
                value: "{email}",
                oninput: move |event| email.set(event.value()),
            }
            input {
                class: "input input-bordered",
                r#type: "password",
                placeholder: "Contraseña",
                value: "{password}",
                oninput: move |event| password.set(event.value()),
            }
            button { class: "btn btn-primary", onclick: submit, "Entrar" }
        }
    )
}

#[component]
fn NewAlertForm(revision: Signal<u32>, error: Signal<Option<String>>) -> Element {
    let mut title = use_signal(String::new);

    #[allow(unused_mut, unused_variables)]
    let submit = move |_| {
        let text = title();

        #[cfg(feature = "web")]
        spawn(async move {
            use crate::model::transit::AlertData;

            let data = AlertData { title: text };
            match crate::client::util::api::create_alert(&data).await {
                Ok(_) => {
                    error.set(None);
                    title.set(String::new());
                    revision += 1;
                }
                Err(err) => error.set(Some(err)),
            }
        });
    };

    rsx!(
        div { class: "flex gap-2 w-full max-w-[1440px]",
            input {
                class: "input input-bordered grow",
                placeholder: "Nueva alerta",
                value: "{title}",
                oninput: move |event| title.set(event.value()),
            }
            button { class: "btn btn-primary", onclick: submit, "Publicar" }
        }
    )
}

#[component]
fn RouteTable(routes: Vec<RouteDto>, revision: Signal<u32>, error: Signal<Option<String>>) -> Element {
    rsx!(
        section { class: "w-full max-w-[1440px] overflow-x-auto",
            h2 { class: "text-xl", "Rutas" }
            table { class: "table table-md",
                thead {
                    tr {
                        th { "Nombre" }
                        th { "Duración" }
                        th { "Tarifa" }
                        th { "Actualizado" }
                        th {}
                    }
                }
                tbody {
                    for route in routes {
                        tr { key: "{route.id}",
                            td { "{route.name}" }
                            td { "{route.duration_min} min" }
                            td { "₡{route.fare_crc}" }
                            td { "{route.last_updated}" }
                            td {
                                button {
                                    class: "btn btn-sm btn-outline",
                                    onclick: move |_| delete_document(ROUTES_COLLECTION, route.id.clone(), revision, error),
                                    "Eliminar"
                                }
                            }
                        }
                    }
                }
            }
        }
    )
}

#[component]
fn AlertTable(alerts: Vec<AlertDto>, revision: Signal<u32>, error: Signal<Option<String>>) -> Element {
    rsx!(
        section { class: "w-full max-w-[1440px] overflow-x-auto",
            h2 { class: "text-xl", "Alertas" }
            table { class: "table table-md",
                tbody {
                    for alert in alerts {
                        tr { key: "{alert.id}",
                            td { "{alert.title}" }
                            td { "{alert.last_updated}" }
                            td {
                                button {
                                    class: "btn btn-sm btn-outline",
                                    onclick: move |_| delete_document(ALERTS_COLLECTION, alert.id.clone(), revision, error),
                                    "Eliminar"
                                }
                            }
                        }
                    }
                }
            }
        }
    )
}

#[component]
fn DriverTable(drivers: Vec<DriverDto>, revision: Signal<u32>, error: Signal<Option<String>>) -> Element {
    rsx!(
        section { class: "w-full max-w-[1440px] overflow-x-auto",
            h2 { class: "text-xl", "Choferes" }
            table { class: "table table-md",
                thead {
                    tr {
                        th { "Nombre" }
                        th { "Placa" }
                        th { "Ruta" }
                        th {}
                    }
                }
                tbody {
                    for driver in drivers {
                        tr { key: "{driver.id}",
                            td { "{driver.name}" }
                            td { {driver.bus_plate.clone().unwrap_or_default()} }
                            td { {driver.route_id.clone().unwrap_or_default()} }
                            td {
                                button {
                                    class: "btn btn-sm btn-outline",
                                    onclick: move |_| delete_document(DRIVERS_COLLECTION, driver.id.clone(), revision, error),
                                    "Eliminar"
                                }
                            }
                        }
                    }
                }
            }
        }
    )
}

#[component]
fn SignOutButton() -> Element {
    #[allow(unused_variables)]
    let nav = navigator();
    let onclick = move |_| {
        #[cfg(feature = "web")]
        spawn(async move {
            if let Err(err) = crate::client::util::api::sign_out().await {
                tracing::error!(err);
            }
            nav.push(crate::client::router::Route::Home {});
        });
    };

    rsx!(
        button { class: "btn btn-outline", onclick, "Cerrar sesión" }
    )
}
