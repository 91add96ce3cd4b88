//! Image hosting for user logos, store logos and listing images.

pub mod cloudinary;
pub mod disabled;
pub mod service;

pub use cloudinary::CloudinaryStore;
pub use disabled::DisabledMediaStore;
pub use service::{ImageUpload, MediaError, MediaStore};

/// Cloudinary folders per upload kind.
pub mod folders {
    pub const USERS: &str = "users/logos";
    pub const SELLERS: &str = "tradelink/logos";
}

#[cfg(test)]
pub use service::MockMediaStore;
