use dioxus::prelude::*;

use crate::client::{
    components::Navbar,
    routes::{Alerts, Dashboard, Home, NotFound},
};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Navbar)]

    #[route("/")]
    Home {},

    #[route("/alertas")]
    Alerts {},

    #[route("/admin/dashboard")]
    Dashboard {},

    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}
