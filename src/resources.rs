use std::{io, path::Path};

use hyper::body::Bytes;

use crate::error::{GameError, Result};

const ENDPOINT_PLACEHOLDER: &str = "SOCKET_HOST";

fn resource_error(resource_path: &Path) -> impl FnOnce(io::Error) -> GameError + '_ {
    move |source| GameError::Resource {
        path: resource_path.display().to_string(),
        source,
    }
}

async fn read_resource(resource_path: &Path) -> Result<Vec<u8>> {
    tokio::fs::read(resource_path)
        .await
        .map_err(resource_error(resource_path))
}

/// Reads the script as UTF-8 (invalid bytes are an error) and fills in the
/// WebSocket endpoint.
async fn read_js_with_endpoint(resource_path: &Path, ws_endpoint: &str) -> Result<String> {
    let javascript = tokio::fs::read_to_string(resource_path)
        .await
        .map_err(resource_error(resource_path))?;
    Ok(javascript.replace(ENDPOINT_PLACEHOLDER, ws_endpoint))
}

/// The browser view, read from disk once at start-up and shared by every
/// HTTP connection.
#[derive(Debug, Clone)]
pub struct StaticResource {
    pub(crate) homepage: Bytes,
    pub(crate) javascript: Bytes,
    pub(crate) css: Bytes,
}

impl StaticResource {
    pub async fn load(static_dir: &Path, ws_endpoint: &str) -> Result<StaticResource> {
        Ok(StaticResource {
            homepage: read_resource(&static_dir.join("index.html")).await?.into(),
            javascript: read_js_with_endpoint(&static_dir.join("app.js"), ws_endpoint)
                .await?
                .into(),
            css: read_resource(&static_dir.join("grid.css")).await?.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn static_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("src/static")
    }

    #[tokio::test]
    async fn javascript_is_templated_with_endpoint() {
        let resources = StaticResource::load(&static_dir(), "ws://127.0.0.1:9999")
            .await
            .unwrap();
        let javascript = std::str::from_utf8(&resources.javascript).unwrap();
        assert!(javascript.contains("ws://127.0.0.1:9999"));
        assert!(!javascript.contains(ENDPOINT_PLACEHOLDER));
        assert!(!resources.homepage.is_empty());
        assert!(!resources.css.is_empty());
    }

    #[tokio::test]
    async fn missing_directory_reports_the_path() {
        let err = StaticResource::load(Path::new("/nonexistent/static"), "ws://x")
            .await
            .unwrap_err();
        match err {
            GameError::Resource { path, .. } => assert!(path.ends_with("index.html")),
            other => panic!("expected a resource error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn script_with_invalid_utf8_is_rejected() {
        let path = std::env::temp_dir().join(format!("app-{}.js", std::process::id()));
        tokio::fs::write(&path, b"new WebSocket(\"SOCKET_HOST\"); // \xff\xfe")
            .await
            .unwrap();
        let result = read_js_with_endpoint(&path, "ws://x").await;
        tokio::fs::remove_file(&path).await.unwrap();

        match result {
            Err(GameError::Resource { path: reported, source }) => {
                assert_eq!(reported, path.display().to_string());
                assert_eq!(source.kind(), io::ErrorKind::InvalidData);
            }
            other => panic!("expected a resource error, got {other:?}"),
        }
    }
}
