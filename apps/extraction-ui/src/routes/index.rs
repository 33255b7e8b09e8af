//! Landing page

use axum::{extract::State, response::Html, routing::get, Router};

use crate::state::AppState;
use crate::template;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(index))
}

async fn index(State(state): State<AppState>) -> Html<String> {
    Html(template::render_index(&state.config().gateways))
}
