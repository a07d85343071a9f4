//! Domain models

pub mod uploaded_file;

pub use uploaded_file::UploadedFile;
