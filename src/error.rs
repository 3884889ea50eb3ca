use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FsError {
    #[error("entry not found")]
    NotFound,
    #[error("entry already exists")]
    AlreadyExists,
    #[error("directory has no free entry slot left")]
    DirectoryFull,
    #[error("no free inodes left")]
    OutOfInodes,
    #[error("no free data blocks left")]
    OutOfBlocks,
    #[error("invalid argument")]
    InvalidArgument,
    #[error("not a directory")]
    NotDirectory,
    #[error("superblock is not valid")]
    InvalidSuperBlock,
    #[error("block id out of device range")]
    InvalidBlockId,
    #[error("block device i/o failure")]
    Io,
}

pub type Result<T> = core::result::Result<T, FsError>;
