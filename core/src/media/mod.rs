// vitrine/src/media/mod.rs

//! Product images: pre-upload validation, upload to the media host and
//! delivery URL helpers.

pub mod cloudinary;
pub mod transform;
pub mod uploader;
pub mod validator;

pub use cloudinary::CloudinaryUploader;
pub use transform::{optimized_image_url, responsive_image_urls, ResponsiveImageUrls, Transformation};
pub use uploader::{ImageUploader, UploadedImage};
pub use validator::{validate_image_file, ImageFile, ImageValidation, ALLOWED_IMAGE_TYPES, MAX_IMAGE_BYTES};
