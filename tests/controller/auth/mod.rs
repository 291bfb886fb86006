//! Tests for the admin session cookie endpoints.

mod session;
mod sign_in;
mod user;

use super::*;
use tower_sessions::cookie::Cookie;

/// Parses the `Set-Cookie` header of `response`.
fn set_cookie(response: &axum::response::Response) -> Cookie<'static> {
    let header = response
        .headers()
        .get(axum::http::header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();

    Cookie::parse(header).unwrap()
}

fn max_age_seconds(cookie: &Cookie) -> i64 {
    cookie.max_age().unwrap().whole_seconds()
}
