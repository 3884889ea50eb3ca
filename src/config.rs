pub const MAGIC: u32 = 0x50494F4E; // "PION" in ASCII

pub const BLOCK_SIZE: usize = 4096;
pub const SUPERBLOCK_ID: u32 = 0; // Block ID of the superblock
pub const INODE_BITMAP_ID: u32 = 1; // Block ID of the inode bitmap
pub const DATA_BITMAP_ID: u32 = 2; // Block ID of the data-block bitmap
pub const INODE_TABLE_START: u32 = 3; // First block of the inode table
pub const ROOT_INODE_ID: u32 = 0; // Inode ID of the root directory

/// Each bitmap occupies exactly one block, which caps both resource pools.
pub const BITMAP_CAPACITY: u32 = (BLOCK_SIZE * 8) as u32;

/// Default format parameters. Both must stay within BITMAP_CAPACITY.
pub const MAX_INODES: u32 = 1024;
pub const MAX_DATA_BLOCKS: u32 = 16384;

pub const NUM_DIRECT_PTRS: usize = 16; // Direct pointers per inode, no indirection
pub const MAX_FILE_SIZE: usize = NUM_DIRECT_PTRS * BLOCK_SIZE; // 64 KiB

pub const MAX_FILE_NAME_LEN: usize = 252;
pub const DIR_ENTRY_SIZE: usize = 260; // inode ID + valid flag + name buffer
pub const DIRENTS_PER_BLOCK: usize = BLOCK_SIZE / DIR_ENTRY_SIZE;

// File type and permission bits stored in FileStat::mode.
pub const S_IFMT: u32 = 0o170000;
pub const S_IFDIR: u32 = 0o040000;
pub const S_IFREG: u32 = 0o100000;
pub const DEFAULT_PERM: u32 = 0o755;
