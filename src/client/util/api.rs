#[cfg(feature = "web")]
use serde::{de::DeserializeOwned, Serialize};

#[cfg(feature = "web")]
use crate::model::{
    api::{ActionResult, ErrorDto},
    transit::{AlertData, AlertDto, DashboardDto, LandingDto},
    user::{IdTokenDto, PrincipalDto, SessionRequestDto, SignInRequestDto},
};

/// Reads a failed response into a readable message.
#[cfg(feature = "web")]
async fn failure(response: reqwasm::http::Response) -> String {
    if let Ok(error_dto) = response.json::<ErrorDto>().await {
        format!(
            "Request failed with status {}: {}",
            response.status(),
            error_dto.error
        )
    } else {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        format!(
            "Request failed with status {}: {}",
            response.status(),
            error_text
        )
    }
}

#[cfg(feature = "web")]
async fn post_json<B: Serialize, T: DeserializeOwned>(url: &str, body: &B) -> Result<T, String> {
    use reqwasm::http::Request;

    let body = serde_json::to_string(body).map_err(|e| e.to_string())?;
    let response = Request::post(url)
        .credentials(reqwasm::http::RequestCredentials::Include)
        .header("Content-Type", "application/json")
        .body(body)
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    match response.status() {
        200 => response
            .json::<T>()
            .await
            .map_err(|e| format!("Failed to parse response from {}: {}", url, e)),
        _ => Err(failure(response).await),
    }
}

#[cfg(feature = "web")]
async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, String> {
    use reqwasm::http::Request;

    let response = Request::get(url)
        .credentials(reqwasm::http::RequestCredentials::Include)
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    match response.status() {
        200 => response
            .json::<T>()
            .await
            .map_err(|e| format!("Failed to parse response from {}: {}", url, e)),
        _ => Err(failure(response).await),
    }
}

/// Sends a dashboard mutation; server actions always answer 200 with an [`ActionResult`].
#[cfg(feature = "web")]
async fn send_action<B: Serialize, T: DeserializeOwned>(
    method: reqwasm::http::Method,
    url: &str,
    body: Option<&B>,
) -> Result<Option<T>, String> {
    use reqwasm::http::Request;

    let mut request = Request::new(url)
        .method(method)
        .credentials(reqwasm::http::RequestCredentials::Include);
    if let Some(body) = body {
        let body = serde_json::to_string(body).map_err(|e| e.to_string())?;
        request = request.header("Content-Type", "application/json").body(body);
    }

    let response = request
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    match response.status() {
        200 => response
            .json::<ActionResult<T>>()
            .await
            .map_err(|e| format!("Failed to parse action result: {}", e))?
            .into_result(),
        _ => Err(failure(response).await),
    }
}

#[cfg(feature = "web")]
pub async fn get_landing() -> Result<LandingDto, String> {
    get_json("/api/landing").await
}

#[cfg(feature = "web")]
pub async fn get_alerts() -> Result<Vec<AlertDto>, String> {
    get_json("/api/alerts").await
}

/// Retrieve the admin dashboard, `Ok(None)` when not signed in
#[cfg(feature = "web")]
pub async fn get_dashboard() -> Result<Option<DashboardDto>, String> {
    use reqwasm::http::Request;

    let response = Request::get("/api/admin/dashboard")
        .credentials(reqwasm::http::RequestCredentials::Include)
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    match response.status() {
        200 => response
            .json::<DashboardDto>()
            .await
            .map(Some)
            .map_err(|e| format!("Failed to parse dashboard data: {}", e)),
        401 => Ok(None),
        _ => Err(failure(response).await),
    }
}

#[cfg(feature = "web")]
pub async fn create_alert(data: &AlertData) -> Result<Option<String>, String> {
    send_action(reqwasm::http::Method::POST, "/api/admin/alerts", Some(data)).await
}

/// Delete a document from one of the dashboard collections
#[cfg(feature = "web")]
pub async fn delete_document(collection: &str, id: &str) -> Result<(), String> {
    send_action::<(), ()>(
        reqwasm::http::Method::DELETE,
        &format!("/api/admin/{}/{}", collection, id),
        None,
    )
    .await
    .map(|_| ())
}

/// Sign in with the admin credential and exchange the issued token for the session cookie
#[cfg(feature = "web")]
pub async fn sign_in(email: String, password: String) -> Result<PrincipalDto, String> {
    let issued: IdTokenDto =
        post_json("/api/auth/sign-in", &SignInRequestDto { email, password }).await?;

    post_json(
        "/api/auth/session",
        &SessionRequestDto {
            token: issued.token,
        },
    )
    .await
}

#[cfg(feature = "web")]
pub async fn sign_out() -> Result<(), String> {
    use reqwasm::http::Request;

    Request::delete("/api/auth/session")
        .credentials(reqwasm::http::RequestCredentials::Include)
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    Ok(())
}
