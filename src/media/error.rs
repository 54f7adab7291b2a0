use thiserror::Error;

/// 图像编码错误类型
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("unsupported image type `{0}`: expected an image object, file path, or URL")]
    UnsupportedType(String),
    #[error("failed to read image file `{path}`: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to fetch image `{url}`: {message}")]
    Fetch {
        url: String,
        status: Option<u16>,
        message: String,
    },
    #[error("cannot fetch `{0}`: remote images are disabled (enable the `remote-image` feature)")]
    RemoteDisabled(String),
    #[error("failed to re-encode image as PNG: {0}")]
    Encode(String),
}
