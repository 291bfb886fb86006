use dioxus::prelude::*;

pub use crate::client::router::Route;

#[component]
pub fn Navbar() -> Element {
    rsx! {
        div {
            class: "navbar bg-base-200 fixed",
            div {
                class: "navbar-start",
                Link { to: Route::Home {}, class: "btn btn-ghost text-xl",
                    "Transit"
                }
            }
            div {
                class: "navbar-end gap-2",
                Link { to: Route::Alerts {}, class: "btn btn-ghost",
                    "Alertas"
                }
                Link { to: Route::Dashboard {}, class: "btn btn-outline",
                    "Admin"
                }
            }
        }

        Outlet::<Route> {}
    }
}
