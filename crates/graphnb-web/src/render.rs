//! HTML rendering of the visualization page.
//!
//! Template locations are passed in explicitly through [`RenderConfig`];
//! nothing here searches the filesystem.

use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tera::{Context, Tera};
use thiserror::Error;
use tracing::{debug, warn};

/// Name of the page template inside the template directory.
pub const VISUALIZATION_TEMPLATE: &str = "visualization.html";

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Template file not found: {0}")]
    TemplateNotFound(PathBuf),

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type RenderResult<T> = Result<T, RenderError>;

/// Where the renderer finds its template and assets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub template_dir: PathBuf,
    pub background_image: Option<PathBuf>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            template_dir: PathBuf::from("templates"),
            background_image: None,
        }
    }
}

/// Render the visualization page for one notebook cell.
///
/// Each call gets a fresh cell id so several cells on one page do not
/// collide on element selectors.
pub fn generate_visualization_html(
    config: &RenderConfig,
    query: &str,
    url: &str,
    params: &Value,
) -> RenderResult<String> {
    let template_path = config.template_dir.join(VISUALIZATION_TEMPLATE);
    if !template_path.is_file() {
        return Err(RenderError::TemplateNotFound(template_path));
    }
    let template = std::fs::read_to_string(&template_path)?;

    let (image, mime) = match &config.background_image {
        Some(path) => (load_image(path), image_mime(path)),
        None => (String::new(), image_mime(Path::new(""))),
    };

    let id = uuid::Uuid::new_v4().simple().to_string();

    let mut context = Context::new();
    context.insert("id", &id);
    context.insert("query", query);
    context.insert("url", url);
    context.insert("query_json", &script_json(&Value::String(query.to_string()))?);
    context.insert("params_json", &script_json(params)?);
    context.insert("url_json", &script_json(&Value::String(url.to_string()))?);
    context.insert("graph_background_image", &image);
    context.insert("graph_background_mime", mime);

    debug!(id = %id, template = %template_path.display(), "Rendering visualization");
    Ok(Tera::one_off(&template, &context, true)?)
}

/// Base64-encode an image for inline embedding. A missing file renders as
/// an empty string.
pub fn load_image(path: &Path) -> String {
    match std::fs::read(path) {
        Ok(bytes) => base64::engine::general_purpose::STANDARD.encode(bytes),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Background image not available");
            String::new()
        }
    }
}

fn image_mime(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        _ => "image/svg+xml",
    }
}

/// JSON that can sit inside a `<script>` element without closing it.
fn script_json(value: &Value) -> RenderResult<String> {
    Ok(serde_json::to_string(value)?
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026"))
}
