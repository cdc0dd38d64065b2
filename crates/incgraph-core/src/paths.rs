//! Lexical path helpers shared by the configuration loader and the resolver

use std::path::{Component, Path, PathBuf};

/// Lexically normalize a path: drop `.` components and let `..` pop the
/// previous normal component. The filesystem is never consulted.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                // `/..` stays `/`
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Render a path with forward slashes regardless of platform.
pub fn to_slash(path: &Path) -> String {
    let mut out = String::new();
    for component in path.components() {
        match component {
            Component::RootDir => out.push('/'),
            Component::Prefix(prefix) => out.push_str(&prefix.as_os_str().to_string_lossy()),
            other => {
                if !out.is_empty() && !out.ends_with('/') {
                    out.push('/');
                }
                out.push_str(&other.as_os_str().to_string_lossy());
            }
        }
    }
    out
}

/// Last component of a directory, used to anchor labels.
pub fn dir_basename(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// `<basename of anchor>/<path relative to anchor>`, or `None` when `path`
/// is not lexically inside `anchor`.
pub fn anchored_label(anchor: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(anchor).ok()?;
    Some(join_label(anchor, relative))
}

/// Like [`anchored_label`], but `path` may lie outside `anchor`: the
/// relative part then climbs with `..` (`lib/../../shared/x.h`). `None`
/// only when the two paths do not share a root.
pub fn relative_label(anchor: &Path, path: &Path) -> Option<String> {
    let relative = lexically_relative(anchor, path)?;
    Some(join_label(anchor, &relative))
}

fn join_label(anchor: &Path, relative: &Path) -> String {
    let base = dir_basename(anchor);
    let relative = to_slash(relative);
    match (base.is_empty(), relative.is_empty()) {
        (true, _) => relative,
        (false, true) => base,
        (false, false) => format!("{}/{}", base, relative),
    }
}

/// `path` expressed from `base` without touching the filesystem. Both are
/// expected to be normalized.
pub fn lexically_relative(base: &Path, path: &Path) -> Option<PathBuf> {
    let base: Vec<Component> = base.components().collect();
    let path: Vec<Component> = path.components().collect();

    let is_root = |c: &&Component| matches!(c, Component::Prefix(_) | Component::RootDir);
    if !base.iter().take_while(is_root).eq(path.iter().take_while(is_root)) {
        return None;
    }

    let common = base.iter().zip(&path).take_while(|(a, b)| a == b).count();
    let mut relative = PathBuf::new();
    for _ in common..base.len() {
        relative.push("..");
    }
    for component in &path[common..] {
        relative.push(component.as_os_str());
    }
    Some(relative)
}

/// Make `path` absolute against `base` when it is relative, then normalize.
pub fn absolutize(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&base.join(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_drops_dots() {
        assert_eq!(normalize(Path::new("a/./b/../c.h")), PathBuf::from("a/c.h"));
        assert_eq!(normalize(Path::new("../x.h")), PathBuf::from("../x.h"));
        assert_eq!(normalize(Path::new("/../x.h")), PathBuf::from("/x.h"));
        assert_eq!(normalize(Path::new("./detail/_fixes.hpp")), PathBuf::from("detail/_fixes.hpp"));
    }

    #[test]
    fn test_anchored_label() {
        let anchor = Path::new("/work/proj/sources");
        assert_eq!(
            anchored_label(anchor, Path::new("/work/proj/sources/core/a.h")).as_deref(),
            Some("sources/core/a.h")
        );
        assert_eq!(anchored_label(anchor, Path::new("/work/other/a.h")), None);
    }

    #[test]
    fn test_relative_label_climbs_out_of_anchor() {
        let anchor = Path::new("/work/deps/include/lib");
        assert_eq!(
            relative_label(anchor, Path::new("/work/deps/shared/x.h")).as_deref(),
            Some("lib/../../shared/x.h")
        );
        assert_eq!(
            relative_label(anchor, Path::new("/work/deps/include/lib/detail/y.h")).as_deref(),
            Some("lib/detail/y.h")
        );
        assert_eq!(relative_label(anchor, Path::new("shared/x.h")), None);
    }

    #[test]
    fn test_lexically_relative() {
        assert_eq!(
            lexically_relative(Path::new("/a/b/c"), Path::new("/a/d")),
            Some(PathBuf::from("../../d"))
        );
        assert_eq!(lexically_relative(Path::new("/a"), Path::new("/a")), Some(PathBuf::new()));
        assert_eq!(lexically_relative(Path::new("a/b"), Path::new("/a/b")), None);
    }

    #[test]
    fn test_to_slash() {
        assert_eq!(to_slash(Path::new("/a/b/c.h")), "/a/b/c.h");
        assert_eq!(to_slash(Path::new("a/b")), "a/b");
    }
}
