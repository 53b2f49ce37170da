//! Folder sources
//!
//! Two speeds: channels are aggregated eagerly from every playlist in the
//! subtree, while sub-folders are only reported one level deep so the caller
//! can browse into them on demand.

use std::fs;
use std::path::Path;
use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

use crate::models::{FolderRef, ResolutionResult};
use crate::services::m3u_parser;

/// Playlist file extensions (case-insensitive)
const PLAYLIST_EXTENSIONS: &[&str] = &["m3u", "m3u8"];

fn is_playlist(entry: &DirEntry) -> bool {
    entry.file_type().is_file()
        && entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                PLAYLIST_EXTENSIONS
                    .iter()
                    .any(|known| ext.eq_ignore_ascii_case(known))
            })
            .unwrap_or(false)
}

fn folder_ref(entry: &DirEntry) -> FolderRef {
    let path = fs::canonicalize(entry.path()).unwrap_or_else(|_| entry.path().to_path_buf());
    FolderRef {
        name: entry.file_name().to_string_lossy().into_owned(),
        path: path.to_string_lossy().into_owned(),
    }
}

/// Scan the subtree rooted at `root`
///
/// Blocking; call from `spawn_blocking` in async contexts. Symlinks are
/// followed and classified by their target. Link cycles, unreadable entries
/// and files that are not valid UTF-8 are skipped. A missing root yields an empty result.
pub fn scan(root: &Path, max_depth: usize) -> ResolutionResult {
    let mut result = ResolutionResult::empty();
    let mut playlists_read = 0usize;

    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(max_depth.max(1))
        .follow_links(true)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!("Skipping unreadable entry under {}: {}", root.display(), e);
                continue;
            }
        };

        if entry.file_type().is_dir() {
            if entry.depth() == 1 {
                result.folders.push(folder_ref(&entry));
            }
            continue;
        }

        if !is_playlist(&entry) {
            continue;
        }

        match fs::read_to_string(entry.path()) {
            Ok(text) => {
                result.channels.extend(m3u_parser::parse(&text));
                playlists_read += 1;
            }
            Err(e) => debug!("Skipping playlist {}: {}", entry.path().display(), e),
        }
    }

    info!(
        "Scanned {}: {} playlists, {} channels, {} folders",
        root.display(),
        playlists_read,
        result.channels.len(),
        result.folders.len()
    );

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Channel;
    use tempfile::TempDir;

    fn write(path: &Path, content: &[u8]) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_two_subfolders_one_playlist() {
        let dir = TempDir::new().unwrap();
        write(
            &dir.path().join("news/list.m3u"),
            b"#EXTM3U\n#EXTINF:-1,A\nhttp://x/a\n#EXTINF:-1,B\nhttp://x/b\n",
        );
        fs::create_dir_all(dir.path().join("empty")).unwrap();

        let result = scan(dir.path(), 16);
        assert_eq!(result.folders.len(), 2);
        assert_eq!(result.channels.len(), 2);

        // Sorted by file name
        assert_eq!(result.folders[0].name, "empty");
        assert_eq!(result.folders[1].name, "news");
        assert!(result.folders[1].path.ends_with("news"));
    }

    #[test]
    fn test_nested_channels_aggregate_but_folders_stay_shallow() {
        let dir = TempDir::new().unwrap();
        write(&dir.path().join("top.M3U8"), b"#EXTINF:-1,Top\nhttp://x/top\n");
        write(
            &dir.path().join("a/b/c/deep.m3u"),
            b"#EXTINF:-1,Deep\nhttp://x/deep\n",
        );
        write(&dir.path().join("a/readme.txt"), b"#EXTINF:-1,Nope\nhttp://x/nope\n");

        let result = scan(dir.path(), 16);
        assert_eq!(
            result.folders.iter().map(|f| f.name.as_str()).collect::<Vec<_>>(),
            vec!["a"]
        );
        assert_eq!(
            result.channels,
            vec![
                Channel::new("Deep", "http://x/deep").unwrap(),
                Channel::new("Top", "http://x/top").unwrap(),
            ]
        );
    }

    #[test]
    fn test_undecodable_file_is_skipped() {
        let dir = TempDir::new().unwrap();
        write(&dir.path().join("bad.m3u"), &[0xff, 0xfe, 0x00, 0x80]);
        write(&dir.path().join("good.m3u"), b"#EXTINF:-1,Good\nhttp://x/good\n");

        let result = scan(dir.path(), 16);
        assert_eq!(result.channels, vec![Channel::new("Good", "http://x/good").unwrap()]);
    }

    #[test]
    fn test_empty_and_missing_roots() {
        let dir = TempDir::new().unwrap();
        assert!(scan(dir.path(), 16).is_empty());
        assert!(scan(&dir.path().join("does-not-exist"), 16).is_empty());
    }

    #[test]
    fn test_max_depth_bounds_the_walk() {
        let dir = TempDir::new().unwrap();
        write(&dir.path().join("a/b/deep.m3u"), b"#EXTINF:-1,Deep\nhttp://x/deep\n");

        let result = scan(dir.path(), 2);
        assert_eq!(result.folders.len(), 1);
        assert!(result.channels.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_folders_and_playlists_are_followed() {
        use std::os::unix::fs::symlink;

        let target = TempDir::new().unwrap();
        write(
            &target.path().join("films/list.m3u"),
            b"#EXTINF:-1,Film\nhttp://x/film\n",
        );

        let dir = TempDir::new().unwrap();
        symlink(target.path().join("films"), dir.path().join("movies")).unwrap();
        symlink(
            target.path().join("films/list.m3u"),
            dir.path().join("list.m3u"),
        )
        .unwrap();

        let result = scan(dir.path(), 16);
        assert_eq!(
            result.folders.iter().map(|f| f.name.as_str()).collect::<Vec<_>>(),
            vec!["movies"]
        );
        assert!(result.folders[0].path.ends_with("films"));
        assert_eq!(
            result.channels,
            vec![
                Channel::new("Film", "http://x/film").unwrap(),
                Channel::new("Film", "http://x/film").unwrap(),
            ]
        );
    }

    #[test]
    fn test_scan_is_repeatable() {
        let dir = TempDir::new().unwrap();
        write(&dir.path().join("x/1.m3u"), b"#EXTINF:-1,One\nhttp://x/1\n");
        write(&dir.path().join("y/2.m3u"), b"#EXTINF:-1,Two\nhttp://x/2\n");

        assert_eq!(scan(dir.path(), 16), scan(dir.path(), 16));
    }
}
