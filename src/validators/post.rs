//! Validation for post creation uploads and feed pagination.

use image::ImageFormat;

use crate::constants::{
    DEFAULT_PAGE, DEFAULT_PAGE_SIZE, ERR_ATTACHMENTS_REQUIRED, ERR_ATTACHMENT_FILE,
    ERR_ATTACHMENT_SIZE, ERR_ATTACHMENT_TYPE, ERR_CAPTION_REQUIRED, ERR_CAPTION_STRING,
    ERR_INVALID_FIELD, ERR_PAGE_INTEGER, ERR_PAGE_MIN, ERR_SIZE_INTEGER, ERR_SIZE_MIN,
    ERR_TOO_MANY_ATTACHMENTS,
};
use crate::errors::{ApiError, FieldErrors};
use crate::models::{CreatePostForm, PageRequest, PostListQuery};

/// Image formats accepted as post attachments.
pub const ALLOWED_IMAGE_FORMATS: [ImageFormat; 4] = [
    ImageFormat::Jpeg,
    ImageFormat::Png,
    ImageFormat::Gif,
    ImageFormat::WebP,
];

/// Maximum size of a single attachment (2 MB).
pub const MAX_ATTACHMENT_SIZE: usize = 2048 * 1024;

/// Maximum number of attachments on one post.
pub const MAX_ATTACHMENTS: usize = 10;

/// An attachment whose content has been identified as an allowed image.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub format: ImageFormat,
}

impl ImageUpload {
    /// File extension used for the stored blob.
    pub fn extension(&self) -> &'static str {
        match self.format {
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Png => "png",
            ImageFormat::Gif => "gif",
            ImageFormat::WebP => "webp",
            _ => "bin",
        }
    }
}

/// A post that passed validation and can be persisted.
#[derive(Debug, Clone)]
pub struct ValidatedPost {
    pub caption: String,
    pub images: Vec<ImageUpload>,
}

/// MIME type reported for a sniffed image format.
pub fn image_mime_type(format: ImageFormat) -> &'static str {
    match format {
        ImageFormat::Jpeg => "image/jpeg",
        ImageFormat::Png => "image/png",
        ImageFormat::Gif => "image/gif",
        ImageFormat::WebP => "image/webp",
        ImageFormat::Bmp => "image/bmp",
        ImageFormat::Tiff => "image/tiff",
        ImageFormat::Ico => "image/x-icon",
        _ => "application/octet-stream",
    }
}

/// Detect the image format of an upload from its leading bytes.
pub fn sniff_image_format(bytes: &[u8]) -> Option<ImageFormat> {
    image::guess_format(bytes)
        .ok()
        .filter(|format| ALLOWED_IMAGE_FORMATS.contains(format))
}

/// Validate a collected multipart form.
///
/// Every field is checked before returning so the client gets all messages at once.
pub fn validate_create_post(form: CreatePostForm) -> Result<ValidatedPost, ApiError> {
    let mut errors = FieldErrors::new();

    if form.caption_not_text {
        errors.insert("caption".to_string(), vec![ERR_CAPTION_STRING.to_string()]);
    } else if form.caption.is_none() {
        errors.insert("caption".to_string(), vec![ERR_CAPTION_REQUIRED.to_string()]);
    }

    if form.attachments.is_empty() {
        errors.insert(
            "attachments".to_string(),
            vec![ERR_ATTACHMENTS_REQUIRED.to_string()],
        );
    } else if form.attachments.len() > MAX_ATTACHMENTS {
        errors.insert(
            "attachments".to_string(),
            vec![ERR_TOO_MANY_ATTACHMENTS.to_string()],
        );
    }

    let mut images = Vec::with_capacity(form.attachments.len());
    for (index, upload) in form.attachments.into_iter().enumerate() {
        let field = format!("attachments.{}", index);
        let mut messages = Vec::new();

        if upload.file_name.is_none() {
            messages.push(format!("The {} field {}", field, ERR_ATTACHMENT_FILE));
        } else {
            let format = sniff_image_format(&upload.bytes);
            if format.is_none() {
                messages.push(format!("The {} field {}", field, ERR_ATTACHMENT_TYPE));
            }
            if upload.oversized || upload.bytes.len() > MAX_ATTACHMENT_SIZE {
                messages.push(format!("The {} field {}", field, ERR_ATTACHMENT_SIZE));
            }
            match format {
                Some(format) if messages.is_empty() => images.push(ImageUpload {
                    bytes: upload.bytes,
                    format,
                }),
                _ => {}
            }
        }

        if !messages.is_empty() {
            errors.insert(field, messages);
        }
    }

    if !errors.is_empty() {
        return Err(ApiError::Validation {
            message: ERR_INVALID_FIELD.to_string(),
            errors,
        });
    }

    Ok(ValidatedPost {
        caption: form.caption.unwrap_or_default(),
        images,
    })
}

/// Parse and validate the `page` and `size` query parameters.
pub fn parse_page_query(query: &PostListQuery) -> Result<PageRequest, ApiError> {
    let mut errors = FieldErrors::new();

    let page = parse_integer(
        query.page.as_deref(),
        IntegerRule {
            field: "page",
            default: DEFAULT_PAGE,
            min: 0,
            not_integer: ERR_PAGE_INTEGER,
            below_min: ERR_PAGE_MIN,
        },
        &mut errors,
    );
    let size = parse_integer(
        query.size.as_deref(),
        IntegerRule {
            field: "size",
            default: DEFAULT_PAGE_SIZE,
            min: 1,
            not_integer: ERR_SIZE_INTEGER,
            below_min: ERR_SIZE_MIN,
        },
        &mut errors,
    );

    if !errors.is_empty() {
        return Err(ApiError::Validation {
            message: ERR_INVALID_FIELD.to_string(),
            errors,
        });
    }

    Ok(PageRequest { page, size })
}

struct IntegerRule {
    field: &'static str,
    default: i64,
    min: i64,
    not_integer: &'static str,
    below_min: &'static str,
}

fn parse_integer(raw: Option<&str>, rule: IntegerRule, errors: &mut FieldErrors) -> i64 {
    let raw = match raw.map(str::trim).filter(|v| !v.is_empty()) {
        Some(raw) => raw,
        None => return rule.default,
    };

    match raw.parse::<i64>() {
        Ok(value) if value >= rule.min => value,
        Ok(_) => {
            errors.insert(rule.field.to_string(), vec![rule.below_min.to_string()]);
            rule.default
        }
        Err(_) => {
            errors.insert(rule.field.to_string(), vec![rule.not_integer.to_string()]);
            rule.default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UploadedFile;

    const PNG_HEADER: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
    const BMP_HEADER: &[u8] = b"BM\x36\0\0\0\0\0\0\0\x36\0\0\0";

    fn file(name: &str, bytes: &[u8]) -> UploadedFile {
        UploadedFile {
            file_name: Some(name.to_string()),
            bytes: bytes.to_vec(),
            oversized: false,
        }
    }

    fn errors_of(result: Result<ValidatedPost, ApiError>) -> FieldErrors {
        match result {
            Err(ApiError::Validation { errors, .. }) => errors,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_post_keeps_caption_and_images() {
        let form = CreatePostForm {
            caption: Some("Sunset".to_string()),
            caption_not_text: false,
            attachments: vec![file("a.png", PNG_HEADER), file("b.gif", b"GIF89a....")],
        };

        let post = validate_create_post(form).unwrap();
        assert_eq!(post.caption, "Sunset");
        assert_eq!(post.images.len(), 2);
        assert_eq!(post.images[0].extension(), "png");
        assert_eq!(post.images[1].extension(), "gif");
    }

    #[test]
    fn test_missing_caption_and_attachments() {
        let errors = errors_of(validate_create_post(CreatePostForm::default()));
        assert_eq!(errors["caption"], vec![ERR_CAPTION_REQUIRED]);
        assert_eq!(errors["attachments"], vec![ERR_ATTACHMENTS_REQUIRED]);
    }

    #[test]
    fn test_bmp_is_rejected_even_with_image_name() {
        let form = CreatePostForm {
            caption: Some("x".to_string()),
            caption_not_text: false,
            attachments: vec![file("ok.png", PNG_HEADER), file("pic.png", BMP_HEADER)],
        };

        let errors = errors_of(validate_create_post(form));
        assert!(!errors.contains_key("attachments.0"));
        assert_eq!(
            errors["attachments.1"],
            vec!["The attachments.1 field must be a file of type: jpg, jpeg, webp, png, gif."]
        );
    }

    #[test]
    fn test_oversized_file_is_rejected() {
        let mut upload = file("big.png", PNG_HEADER);
        upload.oversized = true;
        let form = CreatePostForm {
            caption: Some("x".to_string()),
            caption_not_text: false,
            attachments: vec![upload],
        };

        let errors = errors_of(validate_create_post(form));
        assert_eq!(
            errors["attachments.0"],
            vec!["The attachments.0 field must not be greater than 2048 kilobytes."]
        );
    }

    #[test]
    fn test_too_many_attachments() {
        let form = CreatePostForm {
            caption: Some("x".to_string()),
            caption_not_text: false,
            attachments: vec![file("a.png", PNG_HEADER); MAX_ATTACHMENTS + 1],
        };

        let errors = errors_of(validate_create_post(form));
        assert_eq!(errors["attachments"], vec![ERR_TOO_MANY_ATTACHMENTS]);
    }

    #[test]
    fn test_text_part_is_not_a_file() {
        let form = CreatePostForm {
            caption: Some("x".to_string()),
            caption_not_text: false,
            attachments: vec![UploadedFile {
                file_name: None,
                bytes: b"hello".to_vec(),
                oversized: false,
            }],
        };

        let errors = errors_of(validate_create_post(form));
        assert_eq!(errors["attachments.0"], vec!["The attachments.0 field must be a file."]);
    }

    #[test]
    fn test_page_query_defaults() {
        let page = parse_page_query(&PostListQuery::default()).unwrap();
        assert_eq!(page, PageRequest { page: 0, size: 10 });
    }

    #[test]
    fn test_page_query_rejects_bad_values() {
        let query = PostListQuery {
            page: Some("-1".to_string()),
            size: Some("abc".to_string()),
        };
        let err = parse_page_query(&query).unwrap_err();
        match err {
            ApiError::Validation { errors, .. } => {
                assert_eq!(errors["page"], vec![ERR_PAGE_MIN]);
                assert_eq!(errors["size"], vec![ERR_SIZE_INTEGER]);
            }
            other => panic!("expected validation error, got {:?}", other),
        }

        let zero_size = PostListQuery {
            page: Some("2".to_string()),
            size: Some("0".to_string()),
        };
        assert!(parse_page_query(&zero_size).is_err());
    }
}
