//! Member management endpoints.
//!
//! Routes under `/api/members`:
//! - `POST /api/members` — register a member. multipart/form-data with a
//!   `json` part carrying the member document and optional photo file parts
//!   (passport photo, PAN, Aadhaar, ration card, licenses, address bills).
//!   Stored photos land in the uploads directory and their URLs are written
//!   into the document.
//! - `GET /api/members` — all members, with count.
//! - `GET /api/members/{id}` / `PUT /api/members/{id}` /
//!   `DELETE /api/members/{id}` — single-member reads, updates (same
//!   multipart shape as create) and deletes.
//! - `POST /api/members/import` — bulk import from a CSV file whose column
//!   layout matches the society's membership register sheet.
//! - `GET /api/members/missing-fields/{id}` — audit a member document
//!   against the schema template and list every empty/absent field.

use actix_web::web::{delete, get, post, put, scope};
use actix_web::Scope;

mod create;
mod delete_member;
mod get;
mod import;
mod list;
mod missing_fields;
pub(crate) mod update;
mod upload;

const API_PATH: &str = "/api/members";

/// Configures and returns the Actix scope for member routes. Literal paths
/// are registered ahead of `/{id}` so they are not captured as ids.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/import", post().to(import::process))
        .route("/missing-fields/{id}", get().to(missing_fields::process))
        .route("", post().to(create::process))
        .route("", get().to(list::process))
        .route("/{id}", get().to(get::process))
        .route("/{id}", put().to(update::process))
        .route("/{id}", delete().to(delete_member::process))
}
