use dioxus::document::{Meta, Title};
use dioxus::prelude::*;
#[cfg(feature = "web")]
use dioxus_logger::tracing;

use crate::{
    client::components::{AlertList, Page, RouteCard},
    model::transit::{LandingDto, RouteCategory},
};

#[component]
pub fn Home() -> Element {
    let mut landing = use_signal(|| None::<LandingDto>);

    #[cfg(feature = "web")]
    {
        let future = use_resource(|| async move { crate::client::util::api::get_landing().await });

        match &*future.read_unchecked() {
            Some(Ok(data)) => {
                if landing.peek().as_ref() != Some(data) {
                    landing.set(Some(data.clone()));
                }
            }
            Some(Err(err)) => {
                tracing::error!(err);
            }
            None => (),
        }
    }

    let landing = landing.read();

    rsx!(
        Title { "Rutas y horarios" }
        Meta {
            name: "description",
            content: "Rutas, horarios y tarifas de autobuses entre Grecia y Sarchí."
        }
        Page { class: "flex flex-col items-center gap-6",
            if let Some(landing) = landing.as_ref() {
                AlertList { alerts: landing.alerts.clone() }
                for (title, category) in [("Grecia", RouteCategory::Grecia), ("Sarchí", RouteCategory::Sarchi)] {
                    section { class: "w-full max-w-[1440px] flex flex-col gap-2",
                        h2 { class: "text-2xl", "{title}" }
                        div { class: "flex flex-wrap gap-4",
                            for route in landing.routes.iter().filter(|route| route.category == category) {
                                RouteCard { key: "{route.id}", route: route.clone() }
                            }
                        }
                    }
                }
            } else {
                div { class: "skeleton h-32 w-full max-w-[1440px]" }
            }
        }
    )
}
