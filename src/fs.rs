//! The filesystem handle, tying the layers together behind one value.
//!
//! All engine state for a mount, the device handle and the loaded
//! superblock, lives in a `FileSystem` instance that the caller threads
//! through its own code. The engine assumes one caller at a time and takes
//! `&mut self` on every mutating operation; it performs no locking of its
//! own. Multi-step mutations are not atomic: a failure partway through an
//! allocate-then-link sequence can strand bitmap bits, which is an accepted
//! limitation of the design rather than something the engine hides.

use std::sync::Arc;

use log::{debug, info};

use crate::bitmap::{self, alloc_inode_id, free_data_block, free_inode_id};
use crate::block_dev::BlockDevice;
use crate::config::*;
use crate::directory::{self, dir_add, dir_remove};
use crate::error::{FsError, Result};
use crate::file::{file_read, file_write};
use crate::inode::{get_inode, write_inode};
use crate::path::{resolve, split_path};
use crate::structs::{DirEntry, FileStat, FileType, Inode, SuperBlock};
use crate::superblock::{self, read_superblock};

/// Free and total resource counts, derived from the bitmaps on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FsStats {
    pub max_inodes: u32,
    pub free_inodes: u32,
    pub max_data_blocks: u32,
    pub free_data_blocks: u32,
}

pub struct FileSystem<D: BlockDevice> {
    device: Arc<D>,
    superblock: SuperBlock,
}

impl<D: BlockDevice> std::fmt::Debug for FileSystem<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSystem")
            .field("superblock", &self.superblock)
            .finish_non_exhaustive()
    }
}

impl<D: BlockDevice> FileSystem<D> {
    /// Formats the device and returns a handle on the fresh volume.
    pub fn format(device: Arc<D>, max_inodes: u32, max_data_blocks: u32) -> Result<Self> {
        let superblock = superblock::format_volume(&*device, max_inodes, max_data_blocks)?;
        Ok(Self { device, superblock })
    }

    /// Mounts an already formatted device.
    pub fn mount(device: Arc<D>) -> Result<Self> {
        let superblock = read_superblock(&*device)?;
        info!(
            "mounted volume: {} inodes, {} data blocks",
            superblock.max_inodes, superblock.max_data_blocks
        );
        Ok(Self { device, superblock })
    }

    /// Resolves a path to its inode number.
    pub fn lookup(&self, path: &str) -> Result<u32> {
        resolve(&*self.device, &self.superblock, path)
    }

    pub fn get_inode(&self, ino: u32) -> Result<Inode> {
        get_inode(&*self.device, &self.superblock, ino)
    }

    /// Stat metadata for the node at `path`, exactly as stored.
    pub fn getattr(&self, path: &str) -> Result<FileStat> {
        let ino = self.lookup(path)?;
        Ok(self.get_inode(ino)?.stat)
    }

    /// Lists the valid entries of the directory at `path`.
    pub fn read_dir(&self, path: &str) -> Result<Vec<DirEntry>> {
        let ino = self.lookup(path)?;
        let dir = self.get_inode(ino)?;
        directory::read_dir(&*self.device, &dir)
    }

    /// Creates a directory. Returns the new inode number.
    pub fn mkdir(&mut self, path: &str, perm: u32) -> Result<u32> {
        self.create_node(path, FileType::Directory, perm)
    }

    /// Creates a regular file. Returns the new inode number.
    pub fn creat(&mut self, path: &str, perm: u32) -> Result<u32> {
        self.create_node(path, FileType::Regular, perm)
    }

    fn create_node(&mut self, path: &str, ftype: FileType, perm: u32) -> Result<u32> {
        let (parent_path, name) = split_path(path);
        if name.is_empty() {
            return Err(FsError::InvalidArgument);
        }
        let parent_ino = resolve(&*self.device, &self.superblock, parent_path)?;
        let mut parent = self.get_inode(parent_ino)?;
        if !parent.is_dir() {
            return Err(FsError::NotDirectory);
        }

        let ino = alloc_inode_id(&*self.device, &self.superblock)?;
        if let Err(e) = dir_add(
            &*self.device,
            &self.superblock,
            &mut parent,
            ino,
            name.as_bytes(),
        ) {
            // A failed add must not leak the inode number.
            free_inode_id(&*self.device, &self.superblock, ino)?;
            return Err(e);
        }
        write_inode(
            &*self.device,
            &self.superblock,
            &Inode::new(ino, ftype, perm),
        )?;
        debug!("created {ftype:?} {path} at inode {ino}");
        Ok(ino)
    }

    /// Removes a regular file: frees its data blocks and inode, then
    /// tombstones the parent entry.
    pub fn unlink(&mut self, path: &str) -> Result<()> {
        let (parent_path, name) = split_path(path);
        if name.is_empty() {
            return Err(FsError::InvalidArgument);
        }
        let ino = self.lookup(path)?;
        let inode = self.get_inode(ino)?;
        if !inode.is_regular() {
            return Err(FsError::InvalidArgument);
        }
        debug!("unlink {path} (inode {ino})");
        self.remove_node(parent_path, name, &inode)
    }

    /// Removes a directory. The root cannot be removed. Entries still
    /// inside the directory are not checked for; removing a non-empty
    /// directory orphans its children.
    pub fn rmdir(&mut self, path: &str) -> Result<()> {
        let (parent_path, name) = split_path(path);
        if name.is_empty() {
            return Err(FsError::InvalidArgument);
        }
        let ino = self.lookup(path)?;
        let inode = self.get_inode(ino)?;
        if !inode.is_dir() {
            return Err(FsError::NotDirectory);
        }
        debug!("rmdir {path} (inode {ino})");
        self.remove_node(parent_path, name, &inode)
    }

    fn remove_node(&mut self, parent_path: &str, name: &str, inode: &Inode) -> Result<()> {
        for i in 0..inode.link_count as usize {
            free_data_block(&*self.device, &self.superblock, inode.direct_ptrs[i])?;
        }
        let mut dead = *inode;
        dead.valid = 0;
        write_inode(&*self.device, &self.superblock, &dead)?;
        free_inode_id(&*self.device, &self.superblock, inode.ino)?;

        let parent_ino = resolve(&*self.device, &self.superblock, parent_path)?;
        let parent = self.get_inode(parent_ino)?;
        dir_remove(&*self.device, &parent, name.as_bytes())?;
        Ok(())
    }

    /// Reads up to `buf.len()` bytes at `offset` from the file at `path`.
    /// Returns the number of bytes read.
    pub fn read(&self, path: &str, offset: usize, buf: &mut [u8]) -> Result<usize> {
        let ino = self.lookup(path)?;
        let inode = self.get_inode(ino)?;
        file_read(&*self.device, &inode, offset, buf)
    }

    /// Writes `data` at `offset` to the file at `path`. Returns the number
    /// of bytes written.
    pub fn write(&mut self, path: &str, offset: usize, data: &[u8]) -> Result<usize> {
        let ino = self.lookup(path)?;
        let mut inode = self.get_inode(ino)?;
        file_write(&*self.device, &self.superblock, &mut inode, offset, data)
    }

    pub fn stats(&self) -> Result<FsStats> {
        Ok(FsStats {
            max_inodes: self.superblock.max_inodes,
            free_inodes: bitmap::count_free_inodes(&*self.device, &self.superblock)?,
            max_data_blocks: self.superblock.max_data_blocks,
            free_data_blocks: bitmap::count_free_data_blocks(&*self.device, &self.superblock)?,
        })
    }

    pub fn flush(&self) -> Result<()> {
        self.device.flush()
    }

    pub fn root_inode_id(&self) -> u32 {
        ROOT_INODE_ID
    }

    pub fn superblock(&self) -> &SuperBlock {
        &self.superblock
    }

    pub fn device(&self) -> Arc<D> {
        Arc::clone(&self.device)
    }

    /// One-line human-readable summary of the volume layout.
    pub fn dump(&self) -> String {
        let sb = &self.superblock;
        format!(
            "pion volume: {} inodes (table at block {}), {} data blocks (from block {}), {} blocks total",
            sb.max_inodes, sb.inode_table_start, sb.max_data_blocks, sb.data_start,
            sb.total_blocks()
        )
    }
}
