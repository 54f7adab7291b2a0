use std::path::Path;
use std::time::Duration;

use base64::{engine::general_purpose, Engine as _};

use super::error::ImageError;
use crate::value::FieldValue;

/// 超过该大小的图像只记录警告，不做截断
const LARGE_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// 图像编码服务
///
/// 根据值的形态选择来源：
/// 1. 内存图像对象：重新编码为 PNG 后做 base64
/// 2. 存在的本地文件：原样读取字节后做 base64
/// 3. 其他字符串：视为 HTTP(S) URL，阻塞 GET 后对响应体做 base64
///
/// 不做缓存、不重试、不限制大小，每次调用只尝试一次。
#[derive(Default)]
pub struct ImageEncoder {
    timeout: Option<Duration>,
    #[cfg(feature = "remote-image")]
    client: once_cell::sync::OnceCell<reqwest::blocking::Client>,
}

impl ImageEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置 URL 请求超时，默认不超时
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// 使用自定义的 HTTP 客户端（代理、TLS 等）
    #[cfg(feature = "remote-image")]
    pub fn with_client(mut self, client: reqwest::blocking::Client) -> Self {
        self.client = once_cell::sync::OnceCell::with_value(client);
        self
    }

    /// 将图像值编码为 base64 字符串
    pub fn encode(&self, value: &FieldValue) -> Result<String, ImageError> {
        #[cfg(feature = "native-image")]
        {
            if let FieldValue::Image(img) = value {
                return Self::encode_native(img);
            }
        }

        match value.as_str() {
            Some(source) => self.encode_source(source),
            None => Err(ImageError::UnsupportedType(value.type_name().to_string())),
        }
    }

    /// 构建内联图像的 data URI
    pub fn data_uri(mime: &str, base64: &str) -> String {
        format!("data:{};base64,{}", mime, base64)
    }

    #[cfg(feature = "native-image")]
    fn encode_native(img: &image::DynamicImage) -> Result<String, ImageError> {
        let mut buffer = std::io::Cursor::new(Vec::new());
        img.write_to(&mut buffer, image::ImageFormat::Png)
            .map_err(|e| ImageError::Encode(e.to_string()))?;
        let bytes = buffer.into_inner();
        tracing::debug!(
            width = img.width(),
            height = img.height(),
            bytes = bytes.len(),
            "内存图像已编码为 PNG"
        );
        Ok(general_purpose::STANDARD.encode(bytes))
    }

    fn encode_source(&self, source: &str) -> Result<String, ImageError> {
        if Path::new(source).is_file() {
            Self::encode_file(source)
        } else {
            self.fetch_url(source)
        }
    }

    fn encode_file(path: &str) -> Result<String, ImageError> {
        let bytes = std::fs::read(path).map_err(|source| ImageError::Read {
            path: path.to_string(),
            source,
        })?;

        if bytes.len() > LARGE_IMAGE_BYTES {
            tracing::warn!(
                path = %path,
                size_mb = bytes.len() / (1024 * 1024),
                "图像文件过大，可能影响性能"
            );
        }

        tracing::debug!(path = %path, bytes = bytes.len(), "读取本地图像文件");
        Ok(general_purpose::STANDARD.encode(bytes))
    }

    #[cfg(feature = "remote-image")]
    fn fetch_url(&self, url: &str) -> Result<String, ImageError> {
        let client = self.client.get_or_init(reqwest::blocking::Client::new);

        let mut request = client.get(url);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().map_err(|e| ImageError::Fetch {
            url: url.to_string(),
            status: e.status().map(|s| s.as_u16()),
            message: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ImageError::Fetch {
                url: url.to_string(),
                status: Some(status.as_u16()),
                message: format!("request failed with status {}", status),
            });
        }

        let bytes = response.bytes().map_err(|e| ImageError::Fetch {
            url: url.to_string(),
            status: Some(status.as_u16()),
            message: e.to_string(),
        })?;

        tracing::debug!(url = %url, bytes = bytes.len(), "下载远程图像");
        Ok(general_purpose::STANDARD.encode(&bytes))
    }

    #[cfg(not(feature = "remote-image"))]
    fn fetch_url(&self, url: &str) -> Result<String, ImageError> {
        Err(ImageError::RemoteDisabled(url.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_encode_file_keeps_raw_bytes() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"\xFF\xD8\xFF\xE0not really a jpeg").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let encoded = ImageEncoder::new().encode(&FieldValue::from(path)).unwrap();
        let decoded = general_purpose::STANDARD.decode(encoded).unwrap();
        assert_eq!(decoded, b"\xFF\xD8\xFF\xE0not really a jpeg");
    }

    #[test]
    fn test_encode_unsupported_type() {
        let err = ImageEncoder::new()
            .encode(&FieldValue::Json(json!(42)))
            .unwrap_err();
        match err {
            ImageError::UnsupportedType(name) => assert_eq!(name, "number"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_data_uri() {
        assert_eq!(
            ImageEncoder::data_uri("image/jpeg", "QUJD"),
            "data:image/jpeg;base64,QUJD"
        );
    }

    #[cfg(feature = "native-image")]
    #[test]
    fn test_encode_native_image_as_png() {
        let img = image::DynamicImage::ImageRgb8(image::RgbImage::new(2, 2));
        let encoded = ImageEncoder::new().encode(&FieldValue::from(img)).unwrap();
        let decoded = general_purpose::STANDARD.decode(encoded).unwrap();
        assert_eq!(&decoded[..8], b"\x89PNG\r\n\x1a\n");
    }
}
