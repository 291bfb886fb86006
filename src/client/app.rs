use dioxus::prelude::*;

use crate::client::router::Route;

#[component]
pub fn App() -> Element {
    rsx! {
        document::Title { "Transit" }
        Router::<Route> {}
    }
}
