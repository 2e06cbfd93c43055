//! Remote file naming
//!
//! Pure helpers for turning local file names into safe remote resource
//! names and paths.

/// Suffix every encrypted document carries on the POD
pub const ENCRYPTED_SUFFIX: &str = ".enc.ttl";

/// Suffix of a resource's access-control companion
pub const ACL_SUFFIX: &str = ".acl";

/// Prefix marking base64-encoded binary payloads
pub const BINARY_PREFIX: &str = "data:application/octet-stream;base64,";

/// Sanitize a file name for upload
///
/// Keeps only the final path component, replaces anything outside
/// `[A-Za-z0-9._-]` with `_` (collapsing runs), strips leading dots and
/// underscores, then enforces the encrypted-document suffix. Returns `None`
/// when nothing usable remains.
///
/// # Examples
/// ```
/// use solidtui::logic::filename::sanitize_file_name;
///
/// assert_eq!(sanitize_file_name("my notes.txt").as_deref(), Some("my_notes.txt.enc.ttl"));
/// assert_eq!(sanitize_file_name("../../etc/passwd").as_deref(), Some("passwd.enc.ttl"));
/// assert_eq!(sanitize_file_name("report.enc.ttl").as_deref(), Some("report.enc.ttl"));
/// assert_eq!(sanitize_file_name("???"), None);
/// ```
pub fn sanitize_file_name(name: &str) -> Option<String> {
    let base = name
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or(name);

    let mut cleaned = String::with_capacity(base.len());
    for c in base.chars() {
        if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
            cleaned.push(c);
        } else if !cleaned.ends_with('_') {
            cleaned.push('_');
        }
    }

    let cleaned = cleaned.trim_start_matches(['.', '_']).trim_end_matches('_');
    if cleaned.is_empty() || cleaned.chars().all(|c| c == '.') {
        return None;
    }

    if cleaned.ends_with(ENCRYPTED_SUFFIX) {
        Some(cleaned.to_string())
    } else {
        Some(format!("{}{}", cleaned, ENCRYPTED_SUFFIX))
    }
}

/// Remote name without the encrypted suffix
pub fn clean_file_name(remote_name: &str) -> &str {
    remote_name
        .strip_suffix(ENCRYPTED_SUFFIX)
        .unwrap_or(remote_name)
}

/// Join path segments with single slashes, ignoring empty segments
///
/// # Examples
/// ```
/// use solidtui::logic::filename::join_remote_path;
///
/// assert_eq!(join_remote_path(&["app/data/", "/notes", "a.enc.ttl"]), "app/data/notes/a.enc.ttl");
/// assert_eq!(join_remote_path(&["app/data", "", "a"]), "app/data/a");
/// ```
pub fn join_remote_path(segments: &[&str]) -> String {
    segments
        .iter()
        .map(|s| s.trim_matches('/'))
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// Remote path of a file relative to the browser's base directory
pub fn remote_path(base_dir: &str, sub_path: &str, file_name: &str) -> String {
    join_remote_path(&[base_dir, sub_path, file_name])
}

pub fn acl_path(resource_path: &str) -> String {
    format!("{}{}", resource_path, ACL_SUFFIX)
}

pub fn is_acl(name: &str) -> bool {
    name.ends_with(ACL_SUFFIX)
}

/// Parent of a relative sub path ("" stays "")
pub fn parent_path(sub_path: &str) -> String {
    let trimmed = sub_path.trim_matches('/');
    match trimmed.rfind('/') {
        Some(idx) => trimmed[..idx].to_string(),
        None => String::new(),
    }
}

/// Percent-encoded resource URL for display
///
/// # Examples
/// ```
/// use solidtui::logic::filename::resource_url;
///
/// assert_eq!(
///     resource_url("https://pod.example/", "app/my notes.enc.ttl"),
///     "https://pod.example/app/my%20notes.enc.ttl"
/// );
/// ```
pub fn resource_url(server: &str, path: &str) -> String {
    let encoded: Vec<String> = path
        .split('/')
        .filter(|s| !s.is_empty())
        .map(|s| urlencoding::encode(s).into_owned())
        .collect();
    format!("{}/{}", server.trim_end_matches('/'), encoded.join("/"))
}

/// Whether bytes can be stored verbatim as text
pub fn is_text(bytes: &[u8]) -> bool {
    !bytes.contains(&0) && std::str::from_utf8(bytes).is_ok()
}

/// First `max_lines` lines of a text payload
pub fn preview(text: &str, max_lines: usize) -> String {
    text.lines().take(max_lines).collect::<Vec<_>>().join("\n")
}
