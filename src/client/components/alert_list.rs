use dioxus::prelude::*;

use crate::model::transit::AlertDto;

#[component]
pub fn AlertList(alerts: Vec<AlertDto>) -> Element {
    if alerts.is_empty() {
        return rsx!();
    }

    rsx!(
        ul { class: "flex flex-col gap-2 w-full max-w-196",
            {alerts.iter().map(|alert| rsx! {
                li { key: "{alert.id}", class: "alert alert-warning",
                    span { "{alert.title}" }
                }
            })}
        }
    )
}
