use dioxus::document::Title;
use dioxus::prelude::*;
#[cfg(feature = "web")]
use dioxus_logger::tracing;

use crate::{
    client::components::{AlertList, Page},
    model::transit::AlertDto,
};

#[component]
pub fn Alerts() -> Element {
    let mut alerts = use_signal(Vec::<AlertDto>::new);

    #[cfg(feature = "web")]
    {
        let future = use_resource(|| async move { crate::client::util::api::get_alerts().await });

        match &*future.read_unchecked() {
            Some(Ok(fetched)) => {
                if *alerts.peek() != *fetched {
                    alerts.set(fetched.clone());
                }
            }
            Some(Err(err)) => {
                tracing::error!(err);
            }
            None => (),
        }
    }

    rsx!(
        Title { "Alertas | Transit" }
        Page { class: "flex flex-col items-center gap-4",
            h1 { class: "text-2xl", "Alertas de servicio" }
            if alerts.read().is_empty() {
                p { "No hay alertas activas." }
            } else {
                AlertList { alerts: alerts() }
            }
        }
    )
}
