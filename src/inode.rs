//! The inode store: fixed-size inode records at deterministic addresses.
//!
//! Inode `n` lives alone in block `inode_table_start + n`. Writes place the
//! record into a zero-filled block buffer, so the bytes past the record are
//! guaranteed zero on disk.

use crate::block_dev::BlockDevice;
use crate::config::BLOCK_SIZE;
use crate::error::{FsError, Result};
use crate::structs::{Inode, SuperBlock};

fn inode_block(superblock: &SuperBlock, ino: u32) -> Result<u32> {
    if ino >= superblock.max_inodes {
        return Err(FsError::InvalidArgument);
    }
    Ok(superblock.inode_table_start + ino)
}

pub fn get_inode(device: &impl BlockDevice, superblock: &SuperBlock, ino: u32) -> Result<Inode> {
    let block_id = inode_block(superblock, ino)?;
    let mut buf = Box::new([0u8; BLOCK_SIZE]);
    device.read_block(block_id, &mut buf)?;

    let inode: Inode = unsafe { core::ptr::read_unaligned(buf.as_ptr() as *const Inode) };
    Ok(inode)
}

pub fn write_inode(
    device: &impl BlockDevice,
    superblock: &SuperBlock,
    inode: &Inode,
) -> Result<()> {
    let block_id = inode_block(superblock, inode.ino)?;
    let mut buf = Box::new([0u8; BLOCK_SIZE]);
    unsafe {
        core::ptr::write_unaligned(buf.as_mut_ptr() as *mut Inode, *inode);
    }
    device.write_block(block_id, &buf)
}
