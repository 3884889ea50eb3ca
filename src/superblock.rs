//! Superblock persistence and volume format.

use log::info;

use crate::bitmap::{self, BitmapBlock};
use crate::block_dev::BlockDevice;
use crate::config::*;
use crate::error::{FsError, Result};
use crate::inode::write_inode;
use crate::structs::{FileType, Inode, SuperBlock};

impl SuperBlock {
    /// Lays out a volume for the requested pool sizes. The inode table gets
    /// one block per inode, so the data region starts right after it.
    pub fn new(max_inodes: u32, max_data_blocks: u32) -> Result<Self> {
        if max_inodes == 0 || max_inodes > BITMAP_CAPACITY {
            return Err(FsError::InvalidArgument);
        }
        if max_data_blocks == 0 || max_data_blocks > BITMAP_CAPACITY {
            return Err(FsError::InvalidArgument);
        }
        Ok(Self {
            magic: MAGIC,
            max_inodes,
            max_data_blocks,
            inode_bitmap_start: INODE_BITMAP_ID,
            data_bitmap_start: DATA_BITMAP_ID,
            inode_table_start: INODE_TABLE_START,
            data_start: INODE_TABLE_START + max_inodes,
        })
    }

    /// Total blocks the layout spans, superblock and bitmaps included.
    pub fn total_blocks(&self) -> u32 {
        self.data_start + self.max_data_blocks
    }

    pub fn is_valid(&self) -> bool {
        self.magic == MAGIC
            && self.max_inodes > 0
            && self.max_inodes <= BITMAP_CAPACITY
            && self.max_data_blocks > 0
            && self.max_data_blocks <= BITMAP_CAPACITY
            && self.data_start == self.inode_table_start + self.max_inodes
    }
}

pub fn read_superblock(device: &impl BlockDevice) -> Result<SuperBlock> {
    let mut buf = Box::new([0u8; BLOCK_SIZE]);
    device.read_block(SUPERBLOCK_ID, &mut buf)?;
    let superblock: SuperBlock =
        unsafe { core::ptr::read_unaligned(buf.as_ptr() as *const SuperBlock) };

    if !superblock.is_valid() {
        return Err(FsError::InvalidSuperBlock);
    }
    Ok(superblock)
}

pub fn write_superblock(device: &impl BlockDevice, superblock: &SuperBlock) -> Result<()> {
    let mut buf = Box::new([0u8; BLOCK_SIZE]);
    unsafe {
        core::ptr::write_unaligned(buf.as_mut_ptr() as *mut SuperBlock, *superblock);
    }
    device.write_block(SUPERBLOCK_ID, &buf)?;
    device.flush()?;
    Ok(())
}

/// Formats the device: writes the superblock, zeroes both bitmap blocks and
/// creates the root directory at inode 0 with an empty entry set.
pub(crate) fn format_volume(
    device: &impl BlockDevice,
    max_inodes: u32,
    max_data_blocks: u32,
) -> Result<SuperBlock> {
    let superblock = SuperBlock::new(max_inodes, max_data_blocks)?;
    if superblock.total_blocks() as usize > device.num_blocks() {
        return Err(FsError::InvalidArgument);
    }

    write_superblock(device, &superblock)?;
    BitmapBlock::zeroed(INODE_BITMAP_ID, max_inodes).store(device)?;
    BitmapBlock::zeroed(DATA_BITMAP_ID, max_data_blocks).store(device)?;

    let root_ino = bitmap::alloc_inode_id(device, &superblock)?;
    debug_assert_eq!(root_ino, ROOT_INODE_ID);
    let root = Inode::new(root_ino, FileType::Directory, DEFAULT_PERM);
    write_inode(device, &superblock, &root)?;

    info!(
        "formatted volume: {} inodes, {} data blocks, {} blocks total",
        max_inodes,
        max_data_blocks,
        superblock.total_blocks()
    );
    Ok(superblock)
}
