use once_cell::sync::Lazy;
use regex::Regex;

static FILE_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_\-][A-Za-z0-9_\-. ]*$").expect("Invalid file name regex")
});

static STORED_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+-[0-9a-f\-]{36}\.bin$").expect("Invalid stored name regex"));

static CONTENT_TYPE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9!#$&^_.+\-]*/[A-Za-z0-9][A-Za-z0-9!#$&^_.+\-]*$")
        .expect("Invalid content type regex")
});

/// 文件名最大长度
pub const MAX_FILE_NAME_LEN: usize = 255;
/// 提交地址最大长度
pub const MAX_FILE_URL_LEN: usize = 512;

pub fn validate_file_name(file_name: &str) -> Result<(), &'static str> {
    // 文件名长度校验：1 <= x <= 255
    if file_name.is_empty() || file_name.len() > MAX_FILE_NAME_LEN {
        return Err("File name length must be between 1 and 255 characters");
    }
    // 文件名格式校验：不允许路径分隔符与以点号开头
    if !FILE_NAME_RE.is_match(file_name) {
        return Err(
            "File name must contain only letters, numbers, spaces, dots, underscores or hyphens",
        );
    }
    Ok(())
}

/// 服务端生成的存储文件名：`<unix 时间戳>-<uuid>.bin`
pub fn is_stored_name(name: &str) -> bool {
    STORED_NAME_RE.is_match(name)
}

pub fn validate_file_url(file_url: &str) -> Result<(), &'static str> {
    if file_url.trim().is_empty() {
        return Err("File URL must not be empty");
    }
    if file_url.len() > MAX_FILE_URL_LEN {
        return Err("File URL must be at most 512 characters");
    }
    Ok(())
}

/// 只接受 `type/subtype` 形式的 MIME 类型，不带参数
pub fn validate_content_type(content_type: &str) -> Result<(), &'static str> {
    if content_type.len() > 127 || !CONTENT_TYPE_RE.is_match(content_type) {
        return Err("Content type must look like 'type/subtype'");
    }
    Ok(())
}

/// 提取小写扩展名（含点号），没有扩展名时返回空串
pub fn file_extension(file_name: &str) -> String {
    std::path::Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .unwrap_or_default()
}
