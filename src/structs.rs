use crate::config::*;
use crate::error::{FsError, Result};

/// On-disk superblock, written once at format time to block 0 and read-only
/// afterwards. Free counts are not persisted; they are derived from the
/// bitmaps on demand.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuperBlock {
    pub magic: u32,             // Magic number identifying the filesystem
    pub max_inodes: u32,        // Total number of inodes
    pub max_data_blocks: u32,   // Total number of data blocks
    pub inode_bitmap_start: u32, // Block holding the inode bitmap
    pub data_bitmap_start: u32, // Block holding the data-block bitmap
    pub inode_table_start: u32, // First block of the inode table
    pub data_start: u32,        // First block of the data region
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Regular = 1,
    Directory = 2,
}

impl FileType {
    pub fn from_mode(mode: u32) -> Option<Self> {
        match mode & S_IFMT {
            S_IFREG => Some(FileType::Regular),
            S_IFDIR => Some(FileType::Directory),
            _ => None,
        }
    }

    pub fn mode_bits(self) -> u32 {
        match self {
            FileType::Regular => S_IFREG,
            FileType::Directory => S_IFDIR,
        }
    }
}

/// Stat metadata embedded in every inode, handed back to the adapter as-is.
/// The engine stores mode bits, it never enforces them.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FileStat {
    pub mode: u32,
    pub ino: u32,
    pub size: u64,
    pub block_size: u32,
    pub blocks: u32, // Allocated blocks, counted in BLOCK_SIZE units
}

/// On-disk inode record. Exactly one inode occupies one block of the inode
/// table, addressed as `inode_table_start + ino`.
///
/// `link_count` is the number of allocated data blocks, not a POSIX
/// hard-link count. `size` accumulates bytes actually written; blocks
/// allocated to back a write beyond the end of file grow `link_count`
/// without growing `size`.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct Inode {
    pub ino: u32,
    pub valid: u32,
    pub link_count: u32,
    reserved: [u8; 4], // Keeps `size` naturally aligned
    pub size: u64,
    pub stat: FileStat,
    pub direct_ptrs: [u32; NUM_DIRECT_PTRS],
}

impl Inode {
    pub fn new(ino: u32, ftype: FileType, perm: u32) -> Self {
        Self {
            ino,
            valid: 1,
            link_count: 0,
            reserved: [0; 4],
            size: 0,
            stat: FileStat {
                mode: ftype.mode_bits() | (perm & 0o7777),
                ino,
                size: 0,
                block_size: BLOCK_SIZE as u32,
                blocks: 0,
            },
            direct_ptrs: [0; NUM_DIRECT_PTRS],
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid != 0
    }

    pub fn file_type(&self) -> Option<FileType> {
        FileType::from_mode(self.stat.mode)
    }

    pub fn is_dir(&self) -> bool {
        self.file_type() == Some(FileType::Directory)
    }

    pub fn is_regular(&self) -> bool {
        self.file_type() == Some(FileType::Regular)
    }
}

/// Fixed-size directory entry. Entries are packed whole into data blocks;
/// an entry never spans two blocks, so each block holds DIRENTS_PER_BLOCK
/// slots and the trailing bytes stay unused.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct DirEntry {
    pub ino: u32,
    pub valid: u32,
    pub name: [u8; MAX_FILE_NAME_LEN],
}

impl DirEntry {
    pub const NULL: Self = Self {
        ino: 0,
        valid: 0,
        name: [0; MAX_FILE_NAME_LEN],
    };

    pub fn new(ino: u32, name: &[u8]) -> Result<Self> {
        if name.is_empty() || name.len() > MAX_FILE_NAME_LEN {
            return Err(FsError::InvalidArgument);
        }
        let mut buf = [0; MAX_FILE_NAME_LEN];
        buf[..name.len()].copy_from_slice(name);
        Ok(Self {
            ino,
            valid: 1,
            name: buf,
        })
    }
}

const _: () = assert!(size_of::<SuperBlock>() <= BLOCK_SIZE);
const _: () = assert!(size_of::<Inode>() <= BLOCK_SIZE);
const _: () = assert!(size_of::<DirEntry>() == DIR_ENTRY_SIZE);
