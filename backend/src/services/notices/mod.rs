//! Notice dispatch endpoints.
//!
//! - `POST /api/notices/send` — compose a notice for selected members.
//!   multipart/form-data with a `json` part ({memberIds, subject, message})
//!   and an optional `attachment` file part. Recipient addresses come from
//!   the selected members' email fields; the composed notice is written to
//!   the outbox directory where the SMTP relay picks it up.

use actix_web::web::{post, scope};
use actix_web::Scope;

mod send;

const API_PATH: &str = "/api/notices";

pub fn configure_routes() -> Scope {
    scope(API_PATH).route("/send", post().to(send::process))
}
