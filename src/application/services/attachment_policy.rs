use crate::domain::entities::PendingAttachment;
use crate::domain::errors::ValidationError;

/// Default maximum image size in bytes (5 MB)
pub const DEFAULT_MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Image types the API stores for pets and vlogs
const ALLOWED_IMAGE_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
    "image/svg+xml",
];

const MAX_FILENAME_LEN: usize = 255;

/// Checks an image before any request carrying it is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttachmentPolicy {
    pub max_bytes: usize,
}

impl Default for AttachmentPolicy {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_IMAGE_BYTES,
        }
    }
}

impl AttachmentPolicy {
    pub fn new(max_bytes: usize) -> Self {
        Self { max_bytes }
    }

    /// A create of a kind with images must carry one.
    pub fn require<'a>(
        &self,
        attachment: Option<&'a PendingAttachment>,
    ) -> Result<&'a PendingAttachment, ValidationError> {
        let attachment =
            attachment.ok_or_else(|| ValidationError::new("image", "Please select an image"))?;
        self.validate(attachment)?;
        Ok(attachment)
    }

    pub fn validate(&self, attachment: &PendingAttachment) -> Result<(), ValidationError> {
        if attachment.bytes.is_empty() {
            return Err(ValidationError::new("image", "Image file is empty"));
        }

        if attachment.size() > self.max_bytes {
            return Err(ValidationError::new(
                "image",
                format!(
                    "Image size exceeds maximum allowed size of {}",
                    format_size(self.max_bytes)
                ),
            ));
        }

        let content_type = attachment.content_type.to_lowercase();
        if !ALLOWED_IMAGE_TYPES.contains(&content_type.as_str()) {
            return Err(ValidationError::new(
                "image",
                format!("File type '{}' is not an allowed image type", attachment.content_type),
            ));
        }

        if attachment.file_name.is_empty() || attachment.file_name.len() > MAX_FILENAME_LEN {
            return Err(ValidationError::new(
                "image",
                "Image filename must be between 1 and 255 characters",
            ));
        }

        Ok(())
    }
}

fn format_size(bytes: usize) -> String {
    const MB: usize = 1024 * 1024;
    if bytes >= MB && bytes % MB == 0 {
        format!("{} MB", bytes / MB)
    } else {
        format!("{} bytes", bytes)
    }
}
