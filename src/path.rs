//! Path splitting and inode resolution (namei).

use crate::block_dev::BlockDevice;
use crate::config::ROOT_INODE_ID;
use crate::directory::dir_find;
use crate::error::{FsError, Result};
use crate::inode::get_inode;
use crate::structs::SuperBlock;

/// Splits an absolute path into its parent path and final component,
/// both borrowed from the input. `"/"` splits into `("/", "")`.
pub fn split_path(path: &str) -> (&str, &str) {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return ("/", "");
    }
    match trimmed.rfind('/') {
        Some(0) => ("/", &trimmed[1..]),
        Some(idx) => (&trimmed[..idx], &trimmed[idx + 1..]),
        None => ("/", trimmed),
    }
}

/// Resolves an absolute path to an inode number, walking one component at
/// a time from the root.
///
/// The walk is iterative and allocation-free; components are slices of the
/// input. `.` and `..` get no special treatment, and nothing is cached
/// between calls, so every resolution re-reads each inode and directory
/// block on the way down.
pub fn resolve(device: &impl BlockDevice, superblock: &SuperBlock, path: &str) -> Result<u32> {
    if !path.starts_with('/') {
        return Err(FsError::InvalidArgument);
    }

    let mut current = ROOT_INODE_ID;
    for component in path.split('/').filter(|c| !c.is_empty()) {
        let inode = get_inode(device, superblock, current)?;
        if !inode.is_dir() {
            return Err(FsError::NotDirectory);
        }
        current = dir_find(device, &inode, component.as_bytes())?.ino;
    }
    Ok(current)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_split_path() {
        assert_eq!(split_path("/"), ("/", ""));
        assert_eq!(split_path("/a"), ("/", "a"));
        assert_eq!(split_path("/a/b"), ("/a", "b"));
        assert_eq!(split_path("/a/b/c.txt"), ("/a/b", "c.txt"));
        assert_eq!(split_path("/a/b/"), ("/a", "b"));
    }
}
