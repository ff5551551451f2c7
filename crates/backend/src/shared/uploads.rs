use std::path::Path;

use anyhow::Context;

use super::format::sanitize_file_name;

/// Сохранить загруженный файл и вернуть его публичный URL
///
/// Имя файла получает uuid-префикс, поэтому повторная загрузка не перезаписывает старую.
pub async fn save_file(
    dir: &Path,
    public_base: &str,
    original_name: &str,
    bytes: &[u8],
) -> anyhow::Result<String> {
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("Cannot create upload directory {}", dir.display()))?;

    let stored_name = format!(
        "{}_{}",
        uuid::Uuid::new_v4().simple(),
        sanitize_file_name(original_name)
    );
    let path = dir.join(&stored_name);
    tokio::fs::write(&path, bytes)
        .await
        .with_context(|| format!("Cannot write {}", path.display()))?;

    tracing::info!("Stored upload {} ({} bytes)", path.display(), bytes.len());
    Ok(public_url(public_base, &stored_name))
}

pub fn public_url(public_base: &str, stored_name: &str) -> String {
    format!(
        "{}/{}",
        public_base.trim_end_matches('/'),
        urlencoding::encode(stored_name)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_url() {
        assert_eq!(public_url("/uploads/", "a b.png"), "/uploads/a%20b.png");
    }

    #[tokio::test]
    async fn test_save_file_writes_bytes() {
        let dir = std::env::temp_dir().join(format!("joltcab-upload-{}", uuid::Uuid::new_v4()));
        let url = save_file(&dir, "/uploads", "../logo.png", b"png").await.unwrap();

        assert!(url.starts_with("/uploads/"));
        assert!(url.ends_with("_logo.png"));
        let stored = url.trim_start_matches("/uploads/");
        assert_eq!(std::fs::read(dir.join(stored)).unwrap(), b"png");

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
