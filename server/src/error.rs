use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("room \"{0}\" already exists")]
    DuplicateRoom(String),

    #[error("incorrect password")]
    WrongPassword,

    #[error("room \"{0}\" not found")]
    RoomNotFound(String),

    #[error("private rooms require a password")]
    MissingPassword,
}
