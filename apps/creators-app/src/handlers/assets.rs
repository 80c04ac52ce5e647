use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

const APP_CSS: &str = include_str!("../../assets/app.css");

pub async fn app_css() -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/css; charset=utf-8"),
            (header::CACHE_CONTROL, "public, max-age=3600"),
        ],
        APP_CSS,
    )
        .into_response()
}
