use axum::body::{to_bytes, Body};
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::shared::format::format_number;

/// Логирование HTTP запросов: длительность, размер ответа, статус, метод и путь
///
/// Тела ответов `/uploads` не буферизуются.
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;
    if path.starts_with("/uploads") {
        tracing::info!(
            "{} {} {} | {}ms",
            response.status().as_u16(),
            method,
            path,
            start.elapsed().as_millis()
        );
        return response;
    }

    let (parts, body) = response.into_parts();
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(b) => b,
        Err(e) => {
            tracing::warn!(
                "{} {} {} | {}ms | body error: {}",
                parts.status.as_u16(),
                method,
                path,
                start.elapsed().as_millis(),
                e
            );
            return Response::from_parts(parts, Body::default());
        }
    };

    let status = parts.status.as_u16();
    let message = format!(
        "{} {} {} | {}ms | {} bytes",
        status,
        method,
        path,
        start.elapsed().as_millis(),
        format_number(bytes.len())
    );
    if status >= 500 {
        tracing::error!("{}", message);
    } else if status >= 400 {
        tracing::warn!("{}", message);
    } else {
        tracing::info!("{}", message);
    }

    Response::from_parts(parts, Body::from(bytes))
}
