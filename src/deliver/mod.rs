//! Delivery operations over the current artifact: clipboard, file save,
//! sandboxed browser preview. None of them mutate the store.

use fs_err as fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tempfile::NamedTempFile;
use uuid::Uuid;

use crate::errors::GenError;

/// What actually got delivered this run, for the closing dashboard.
#[derive(Debug, Default)]
pub struct DeliverySummary {
    pub copied: bool,
    pub saved: Option<(PathBuf, u64)>,
    pub previews: Vec<PathBuf>,
}

/// Clipboard tools probed in order; each reads the payload from stdin.
const CLIPBOARD_TOOLS: &[(&str, &[&str])] = &[
    ("pbcopy", &[]),
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
];

pub fn copy_to_clipboard(html: &str) -> Result<(), GenError> {
    let (tool, args) = CLIPBOARD_TOOLS
        .iter()
        .find(|(name, _)| which::which(name).is_ok())
        .ok_or_else(|| GenError::Clipboard("no clipboard utility found (pbcopy/wl-copy/xclip/xsel)".into()))?;

    let mut child = Command::new(tool)
        .args(*args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| GenError::Clipboard(format!("failed to spawn {tool}: {e}")))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(html.as_bytes())
            .map_err(|e| GenError::Clipboard(format!("failed to write to {tool}: {e}")))?;
    }

    let status = child
        .wait()
        .map_err(|e| GenError::Clipboard(format!("{tool} did not exit cleanly: {e}")))?;
    if !status.success() {
        return Err(GenError::Clipboard(format!("{tool} exited with {status}")));
    }
    Ok(())
}

/// Write the artifact to `path` through a named temp file in the target
/// directory, persisted into place. If anything fails before `persist`, the
/// temp file is removed on drop rather than leaked.
pub fn save_artifact(html: &str, path: &Path) -> Result<u64, GenError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent).map_err(|e| GenError::Deliver(e.to_string()))?;

    let tmp = NamedTempFile::new_in(&parent).map_err(|e| GenError::Deliver(e.to_string()))?;
    fs::write(tmp.path(), html).map_err(|e| GenError::Deliver(e.to_string()))?;
    tmp.persist(path)
        .map_err(|e| GenError::Deliver(e.to_string()))?;

    Ok(html.len() as u64)
}

/// Escape for embedding inside a double-quoted HTML attribute.
fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Host page embedding the artifact in a sandboxed iframe. The artifact runs
/// in its own document context (`srcdoc` + `sandbox`) with no access to the
/// host page.
fn preview_page(html: &str, fullscreen: bool) -> String {
    let frame_css = if fullscreen {
        "position:fixed;inset:0;width:100vw;height:100vh;border:0;"
    } else {
        "width:100%;height:80vh;border:1px solid #333;border-radius:12px;"
    };
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>GenUI preview</title>
<style>body{{margin:0;background:#141319;padding:{pad};}}</style>
</head>
<body>
<iframe sandbox="allow-scripts" srcdoc="{srcdoc}" style="{frame_css}" title="Generated component preview"></iframe>
</body>
</html>
"#,
        pad = if fullscreen { "0" } else { "24px" },
        srcdoc = escape_attr(html),
        frame_css = frame_css,
    )
}

/// Write the preview host page for the current artifact and return its path.
pub fn write_preview_page(html: &str, dir: &Path, fullscreen: bool) -> Result<PathBuf, GenError> {
    fs::create_dir_all(dir).map_err(|e| GenError::Deliver(e.to_string()))?;
    let name = if fullscreen { "fullscreen" } else { "embedded" };
    let path = dir.join(format!("{}-{}.html", name, Uuid::new_v4()));
    fs::write(&path, preview_page(html, fullscreen)).map_err(|e| GenError::Deliver(e.to_string()))?;
    Ok(path)
}

/// Platform openers probed in order.
const OPENERS: &[&str] = &["xdg-open", "open", "start"];

pub fn open_in_browser(path: &Path) -> Result<(), GenError> {
    let opener = OPENERS
        .iter()
        .find(|name| which::which(name).is_ok())
        .ok_or_else(|| GenError::Deliver("no browser opener found (xdg-open/open/start)".into()))?;

    Command::new(opener)
        .arg(path)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| GenError::Deliver(format!("failed to spawn {opener}: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ARTIFACT_FILE_NAME;

    #[test]
    fn save_writes_exact_bytes_under_the_fixed_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(ARTIFACT_FILE_NAME);

        let bytes = save_artifact("<h1>x</h1>", &path).unwrap();

        assert_eq!(bytes, 10);
        assert_eq!(fs::read_to_string(&path).unwrap(), "<h1>x</h1>");
        assert_eq!(path.file_name().unwrap(), "GenUI-Code.html");
        // No stray temp file left behind.
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn save_overwrites_a_previous_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(ARTIFACT_FILE_NAME);
        save_artifact("<p>old</p>", &path).unwrap();
        save_artifact("<p>new</p>", &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "<p>new</p>");
    }

    #[test]
    fn escape_attr_neutralizes_attribute_breakers() {
        assert_eq!(
            escape_attr(r#"<script>alert("hi & 'bye'")</script>"#),
            "&lt;script&gt;alert(&quot;hi &amp; &#39;bye&#39;&quot;)&lt;/script&gt;"
        );
    }

    #[test]
    fn preview_page_is_sandboxed_and_escaped() {
        let page = preview_page(r#"<div onclick="x()">hi</div>"#, false);
        assert!(page.contains(r#"sandbox="allow-scripts""#));
        assert!(page.contains("&lt;div onclick=&quot;x()&quot;&gt;hi&lt;/div&gt;"));
        // The raw artifact must not appear unescaped anywhere in the host page.
        assert!(!page.contains(r#"<div onclick="x()">"#));
    }

    #[test]
    fn fullscreen_variant_fills_the_viewport() {
        let embedded = preview_page("<p>a</p>", false);
        let full = preview_page("<p>a</p>", true);
        assert!(full.contains("position:fixed"));
        assert!(full.contains("100vw"));
        assert!(!embedded.contains("position:fixed"));
    }

    #[test]
    fn preview_pages_land_in_the_requested_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_preview_page("<p>a</p>", dir.path(), true).unwrap();
        assert!(path.starts_with(dir.path()));
        assert!(path.file_name().unwrap().to_string_lossy().starts_with("fullscreen-"));
        assert!(fs::read_to_string(&path).unwrap().contains("srcdoc"));
    }
}
