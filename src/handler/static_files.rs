//! Static file responder
//!
//! Serves one directory tree: path translation, directory redirects, index
//! files, directory listings and conditional file responses.

use crate::handler::router::RequestContext;
use crate::http::{self, cache, mime, response::escape_html};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Serve `relative_path` from `root`.
///
/// `ctx.path` is the path as the client sent it; it decides directory
/// redirects and the listing title, while `relative_path` is what remains
/// after the mount prefix was stripped.
pub async fn serve(
    ctx: &RequestContext<'_>,
    root: &Path,
    relative_path: &str,
    index_files: &[String],
) -> Response<Full<Bytes>> {
    let mut file_path = translate_path(root, relative_path);
    let trailing_slash = ctx.path.ends_with('/');

    if fs::metadata(&file_path).await.is_ok_and(|m| m.is_dir()) {
        if !trailing_slash {
            return http::build_301_response(&directory_location(ctx));
        }
        match find_index_file(&file_path, index_files).await {
            Some(index) => file_path = index,
            None => return list_directory(ctx, &file_path).await,
        }
    } else if trailing_slash {
        return http::build_error_response(StatusCode::NOT_FOUND, Some("File not found"), ctx.is_head);
    }

    serve_file(ctx, &file_path).await
}

/// Map a URL path onto a filesystem path below `root`.
///
/// The path is percent-decoded and split on `/`. Empty and `.` segments are
/// dropped and `..` removes the previous segment, so the result never leaves
/// `root`.
pub fn translate_path(root: &Path, url_path: &str) -> PathBuf {
    let decoded = urlencoding::decode_binary(url_path.as_bytes());
    let decoded = String::from_utf8_lossy(&decoded);

    let mut segments: Vec<&str> = Vec::new();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s if cfg!(windows) && (s.contains('\\') || s.contains(':')) => {}
            s => segments.push(s),
        }
    }

    segments
        .iter()
        .fold(root.to_path_buf(), |path, segment| path.join(segment))
}

/// Redirect target for a directory requested without its trailing slash
fn directory_location(ctx: &RequestContext<'_>) -> String {
    match ctx.query {
        Some(query) => format!("{}/?{query}", ctx.path),
        None => format!("{}/", ctx.path),
    }
}

async fn find_index_file(dir: &Path, index_files: &[String]) -> Option<PathBuf> {
    for name in index_files {
        let candidate = dir.join(name);
        if fs::metadata(&candidate).await.is_ok_and(|m| m.is_file()) {
            return Some(candidate);
        }
    }
    None
}

async fn serve_file(ctx: &RequestContext<'_>, file_path: &Path) -> Response<Full<Bytes>> {
    // Missing files are the common case, not worth a warning
    let Ok(metadata) = fs::metadata(file_path).await else {
        return http::build_error_response(StatusCode::NOT_FOUND, Some("File not found"), ctx.is_head);
    };

    let last_modified = metadata.modified().ok();
    if let Some(modified) = last_modified {
        if cache::is_not_modified(ctx.if_modified_since, ctx.if_none_match, modified) {
            return http::build_304_response(&cache::format_http_date(modified));
        }
    }

    let content = match fs::read(file_path).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_warning(&format!(
                "Failed to read file '{}': {e}",
                file_path.display()
            ));
            return http::build_error_response(
                StatusCode::NOT_FOUND,
                Some("File not found"),
                ctx.is_head,
            );
        }
    };

    let last_modified = last_modified.map(cache::format_http_date).unwrap_or_default();
    http::build_file_response(
        Bytes::from(content),
        mime::content_type_for(file_path),
        &last_modified,
        ctx.is_head,
    )
}

/// One row of a directory listing
#[derive(Debug, PartialEq, Eq)]
struct ListingEntry {
    name: String,
    is_dir: bool,
    is_symlink: bool,
}

async fn list_directory(ctx: &RequestContext<'_>, dir: &Path) -> Response<Full<Bytes>> {
    match read_listing(dir).await {
        Ok(entries) => {
            let title = String::from_utf8_lossy(&urlencoding::decode_binary(ctx.path.as_bytes()))
                .into_owned();
            http::build_listing_response(render_listing(&title, &entries), ctx.is_head)
        }
        Err(e) => {
            logger::log_warning(&format!(
                "Cannot list directory '{}': {e}",
                dir.display()
            ));
            http::build_error_response(
                StatusCode::NOT_FOUND,
                Some("No permission to list directory"),
                ctx.is_head,
            )
        }
    }
}

async fn read_listing(dir: &Path) -> std::io::Result<Vec<ListingEntry>> {
    let mut read_dir = fs::read_dir(dir).await?;
    let mut entries = Vec::new();

    while let Some(entry) = read_dir.next_entry().await? {
        let is_symlink = entry
            .file_type()
            .await
            .is_ok_and(|t| t.is_symlink());
        // follows symlinks, so a link to a directory lists as a directory
        let is_dir = fs::metadata(entry.path())
            .await
            .is_ok_and(|m| m.is_dir());
        entries.push(ListingEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            is_dir,
            is_symlink,
        });
    }

    entries.sort_by_cached_key(|e| e.name.to_lowercase());
    Ok(entries)
}

fn render_listing(title: &str, entries: &[ListingEntry]) -> String {
    let title = format!("Directory listing for {}", escape_html(title));
    let mut lines = vec![
        "<!DOCTYPE HTML>".to_string(),
        "<html lang=\"en\">".to_string(),
        "<head>".to_string(),
        "<meta charset=\"utf-8\">".to_string(),
        format!("<title>{title}</title>\n</head>"),
        format!("<body>\n<h1>{title}</h1>"),
        "<hr>\n<ul>".to_string(),
    ];

    for entry in entries {
        let mut href = urlencoding::encode(&entry.name).into_owned();
        let mut display = entry.name.clone();
        if entry.is_dir {
            href.push('/');
            display.push('/');
        }
        // links show their own name, not the slashed directory form
        if entry.is_symlink {
            display = format!("{}@", entry.name);
        }
        lines.push(format!(
            "<li><a href=\"{href}\">{}</a></li>",
            escape_html(&display)
        ));
    }

    lines.push("</ul>\n<hr>\n</body>\n</html>\n".to_string());
    lines.join("\n")
}
