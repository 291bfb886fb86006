//! Factory functions for document payloads and identity claims.
//!
//! Pure functions returning JSON with standard test values, shaped like the documents the
//! admin dashboard writes.

use chrono::{DateTime, Duration, Utc};
use serde_json::{json, Value};

/// Route document with a 30 minute duration and a 500 CRC fare.
///
/// # Arguments
/// - `nombre` - Display name of the route
/// - `category` - `grecia` or `sarchi`
pub fn route(nombre: &str, category: &str) -> Value {
    json!({
        "nombre": nombre,
        "especificacion": "",
        "category": category,
        "duracionMin": 30,
        "tarifaCRC": 500,
        "lastUpdated": Utc::now().to_rfc3339(),
    })
}

pub fn alert(titulo: &str) -> Value {
    json!({
        "titulo": titulo,
        "lastUpdated": Utc::now().to_rfc3339(),
    })
}

pub fn driver(nombre: &str) -> Value {
    json!({
        "nombre": nombre,
        "busPlate": "SJB-123",
        "status": "Active",
        "lastUpdated": Utc::now().to_rfc3339(),
    })
}

/// Identity token claims as issued by the identity service.
pub fn identity_claims(uid: &str, admin: bool, issued_at: DateTime<Utc>, ttl: Duration) -> Value {
    json!({
        "sub": uid,
        "email": format!("{}@example.com", uid),
        "name": "Test User",
        "admin": admin,
        "iat": issued_at.timestamp(),
        "exp": (issued_at + ttl).timestamp(),
    })
}
