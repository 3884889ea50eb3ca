//! Pion is a tiny inode-based file system kept in a single flat image.
//! For simplicity there is no journaling, no indirect addressing, and no
//! permission enforcement beyond storing the mode bits.
//!
//! Pion's linear on-disk layout:
//! - Superblock
//! - Inode Bitmap
//! - Data-Block Bitmap
//! - Inode Table (one inode per block)
//! - Data Blocks
//!
//! Pion's layers (from bottom to top):
//! 1. Block Device: abstraction for the backing store.        | User implemented (file, RAM, hardware)
//! 2. Bitmaps: allocation state of inodes and data blocks.    | Fs implemented
//! 3. Inode Store: fixed-size inode records.                  | Fs implemented
//! 4. Directory/Path: directory entries and name resolution.  | Fs implemented
//! 5. File: byte-range reads and writes over direct blocks.   | Fs implemented
//! 6. FileSystem: the mount handle an adapter drives.         | User driven (locking, open files, etc.)

mod bitmap;
mod block_dev;
mod config;
mod directory;
mod error;
mod file;
mod fs;
mod inode;
mod path;
mod structs;
mod superblock;

pub use bitmap::{
    alloc_data_block, alloc_inode_id, count_free_data_blocks, count_free_inodes, free_data_block,
    free_inode_id,
};
pub use block_dev::BlockDevice;
pub use config::*;
pub use directory::{dir_add, dir_find, dir_remove, read_dir, trim_zero};
pub use error::FsError as Error;
pub use error::Result;
pub use file::{file_read, file_write};
pub use fs::{FileSystem, FsStats};
pub use inode::{get_inode, write_inode};
pub use path::{resolve, split_path};
pub use structs::*;
pub use superblock::{read_superblock, write_superblock};
