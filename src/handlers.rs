use crate::cookies::CookieJar;
use crate::counter::{peek_counts, record_visit};
use crate::errors::AppError;
use crate::models::ViewCounts;
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderName, HeaderValue},
    response::{AppendHeaders, Html},
    Json,
};
use chrono::{DateTime, Utc};

type SetCookies = AppendHeaders<Vec<(HeaderName, HeaderValue)>>;

pub async fn index(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<(SetCookies, Html<String>), AppError> {
    let (counts, cookies) = apply_visit(&state, &headers)?;
    Ok((cookies, Html(render_index(&counts))))
}

pub async fn visit(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<(SetCookies, Json<ViewCounts>), AppError> {
    let (counts, cookies) = apply_visit(&state, &headers)?;
    Ok((cookies, Json(counts)))
}

pub async fn get_views(State(state): State<AppState>, headers: HeaderMap) -> Json<ViewCounts> {
    let jar = CookieJar::from_headers(&headers, &state.config.cookie_path);
    Json(peek_counts(&jar, now()))
}

fn apply_visit(state: &AppState, headers: &HeaderMap) -> Result<(ViewCounts, SetCookies), AppError> {
    let mut jar = CookieJar::from_headers(headers, &state.config.cookie_path);
    let counts = record_visit(&mut jar, now());

    let mut cookies = Vec::with_capacity(jar.pending().len());
    for value in jar.set_cookie_values() {
        cookies.push((header::SET_COOKIE, HeaderValue::from_str(&value)?));
    }

    Ok((counts, AppendHeaders(cookies)))
}

fn now() -> DateTime<Utc> {
    Utc::now()
}
