use dioxus::prelude::*;

use crate::model::transit::RouteDto;

#[component]
pub fn RouteCard(route: RouteDto) -> Element {
    rsx!(
        div {
            class: "card shadow-sm w-full max-w-96",
            if let Some(url) = &route.card_image_url {
                figure {
                    img { src: "{url}", alt: "{route.name}" }
                }
            }
            div {
                class: "card-body",
                h2 { class: "card-title", "{route.name}" }
                if !route.description.is_empty() {
                    p { "{route.description}" }
                }
                div { class: "flex gap-4 text-sm",
                    p { "{route.duration_min} min" }
                    p { "₡{route.fare_crc}" }
                }
                if let Some(url) = &route.schedule_image_url {
                    a { href: "{url}", class: "link", "Horario" }
                }
            }
        }
    )
}
