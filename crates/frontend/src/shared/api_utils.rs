//! Адрес backend для запросов из браузера

/// Базовый URL API: тот же хост, порт 3000
///
/// # Returns
/// - "http://localhost:3000" или "https://example.com:3000"
/// - пустая строка, если window недоступен
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:3000", protocol, hostname)
}

/// Полный URL для пути вида "/api/..."
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// Ссылки на загруженные файлы приходят относительными (`/uploads/...`)
pub fn asset_url(url: &str) -> String {
    if url.starts_with('/') {
        api_url(url)
    } else {
        url.to_string()
    }
}
