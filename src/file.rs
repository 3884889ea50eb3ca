//! File content I/O over the direct block pointers.

use crate::bitmap::alloc_data_block;
use crate::block_dev::BlockDevice;
use crate::config::{BLOCK_SIZE, MAX_FILE_SIZE, NUM_DIRECT_PTRS};
use crate::error::{FsError, Result};
use crate::inode::write_inode;
use crate::structs::{Inode, SuperBlock};

/// Reads from the file's allocated extent, `[0, link_count * BLOCK_SIZE)`,
/// into `buf`. The read is clamped to the extent and the number of bytes
/// copied is returned; an offset at or past the extent end reads 0 bytes.
/// Bytes inside the extent that were never written read as zero, since data
/// blocks are zero-filled at allocation.
pub fn file_read(
    device: &impl BlockDevice,
    inode: &Inode,
    offset: usize,
    buf: &mut [u8],
) -> Result<usize> {
    if !inode.is_regular() {
        return Err(FsError::InvalidArgument);
    }

    let extent = inode.link_count as usize * BLOCK_SIZE;
    if offset >= extent || buf.is_empty() {
        return Ok(0);
    }
    let end = extent.min(offset.saturating_add(buf.len()));

    let mut block_buf = Box::new([0u8; BLOCK_SIZE]);
    let mut pos = offset;
    let mut copied = 0;
    while pos < end {
        let inner = pos % BLOCK_SIZE;
        let count = (BLOCK_SIZE - inner).min(end - pos);
        device.read_block(inode.direct_ptrs[pos / BLOCK_SIZE], &mut block_buf)?;
        buf[copied..copied + count].copy_from_slice(&block_buf[inner..inner + count]);
        pos += count;
        copied += count;
    }
    Ok(copied)
}

/// Writes `data` at `offset`, allocating every block from the start of the
/// file through the last block the range touches. A write whose range ends
/// past the NUM_DIRECT_PTRS block cap fails with `InvalidArgument` before
/// touching the disk.
///
/// Gap blocks allocated to reach a far offset grow `link_count` but only
/// bytes actually written are added to the recorded size.
pub fn file_write(
    device: &impl BlockDevice,
    superblock: &SuperBlock,
    inode: &mut Inode,
    offset: usize,
    data: &[u8],
) -> Result<usize> {
    if !inode.is_regular() {
        return Err(FsError::InvalidArgument);
    }
    if data.is_empty() {
        return Ok(0);
    }
    let end = offset
        .checked_add(data.len())
        .ok_or(FsError::InvalidArgument)?;
    if end > MAX_FILE_SIZE {
        return Err(FsError::InvalidArgument);
    }

    // Bring the allocated extent up to the last block the range touches.
    let last_block = (end - 1) / BLOCK_SIZE;
    debug_assert!(last_block < NUM_DIRECT_PTRS);
    while (inode.link_count as usize) <= last_block {
        let block_id = alloc_data_block(device, superblock)?;
        inode.direct_ptrs[inode.link_count as usize] = block_id;
        inode.link_count += 1;
    }

    // Read-modify-write each touched block.
    let mut block_buf = Box::new([0u8; BLOCK_SIZE]);
    let mut pos = offset;
    let mut written = 0;
    while written < data.len() {
        let block_id = inode.direct_ptrs[pos / BLOCK_SIZE];
        let inner = pos % BLOCK_SIZE;
        let count = (BLOCK_SIZE - inner).min(data.len() - written);
        device.read_block(block_id, &mut block_buf)?;
        block_buf[inner..inner + count].copy_from_slice(&data[written..written + count]);
        device.write_block(block_id, &block_buf)?;
        pos += count;
        written += count;
    }

    inode.size += written as u64;
    inode.stat.size = inode.size;
    inode.stat.blocks = inode.link_count;
    write_inode(device, superblock, inode)?;
    Ok(written)
}
