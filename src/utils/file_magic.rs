/// 验证文件内容是否与扩展名匹配
///
/// 源码与文本类文件要求是合法的 UTF-8 且不含 NUL 字节；
/// 二进制格式按魔术字节校验。
///
/// # Arguments
/// * `data` - 文件内容
/// * `extension` - 文件扩展名（包含点号，如 ".cpp"）
///
/// # Returns
/// * `true` - 内容与扩展名匹配
/// * `false` - 不匹配或未知格式
pub fn validate_magic_bytes(data: &[u8], extension: &str) -> bool {
    if data.is_empty() {
        return false;
    }

    match extension.to_lowercase().as_str() {
        // 源码与文本格式
        ".c" | ".cc" | ".cpp" | ".h" | ".hpp" | ".py" | ".java" | ".go" | ".rs" | ".js"
        | ".ts" | ".txt" | ".md" | ".json" | ".csv" => is_plain_text(data),

        // 文档格式
        ".pdf" => data.starts_with(b"%PDF"),

        // 压缩格式
        ".zip" => data.starts_with(&[0x50, 0x4B, 0x03, 0x04]),
        ".7z" => data.starts_with(&[0x37, 0x7A, 0xBC, 0xAF, 0x27, 0x1C]),
        ".gz" | ".gzip" | ".tgz" => data.starts_with(&[0x1F, 0x8B]),
        // tar 在偏移 257 处有 "ustar" 标识
        ".tar" => data.len() > 262 && &data[257..262] == b"ustar",

        // 未知格式 - 默认拒绝
        _ => false,
    }
}

/// 下载时返回的 Content-Type，只由扩展名决定
pub fn content_type_for(extension: &str) -> &'static str {
    match extension.to_lowercase().as_str() {
        ".c" | ".cc" | ".cpp" | ".h" | ".hpp" | ".py" | ".java" | ".go" | ".rs" | ".js"
        | ".ts" | ".txt" | ".md" | ".json" | ".csv" => "text/plain; charset=utf-8",
        ".pdf" => "application/pdf",
        ".zip" => "application/zip",
        ".7z" => "application/x-7z-compressed",
        ".gz" | ".gzip" | ".tgz" => "application/gzip",
        ".tar" => "application/x-tar",
        _ => "application/octet-stream",
    }
}

fn is_plain_text(data: &[u8]) -> bool {
    !data.contains(&0) && std::str::from_utf8(data).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_files() {
        let source = b"#include <cstdio>\nint main() { return 0; }\n";
        assert!(validate_magic_bytes(source, ".cpp"));
        assert!(validate_magic_bytes(source, ".CPP"));
        assert!(validate_magic_bytes(b"print('hi')\n", ".py"));
    }

    #[test]
    fn test_binary_disguised_as_source() {
        let elf = [0x7F, b'E', b'L', b'F', 0x02, 0x01, 0x01, 0x00];
        assert!(!validate_magic_bytes(&elf, ".c"));
        assert!(!validate_magic_bytes(&[0xFF, 0xFE, 0xFD], ".txt"));
    }

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for(".py"), "text/plain; charset=utf-8");
        assert_eq!(content_type_for(".ZIP"), "application/zip");
        assert_eq!(content_type_for(".html"), "application/octet-stream");
        assert_eq!(content_type_for(""), "application/octet-stream");
    }

    #[test]
    fn test_zip_magic() {
        let zip_header = [0x50, 0x4B, 0x03, 0x04, 0x14, 0x00];
        assert!(validate_magic_bytes(&zip_header, ".zip"));
        assert!(!validate_magic_bytes(&zip_header, ".gz"));
    }

    #[test]
    fn test_pdf_magic() {
        let pdf_header = b"%PDF-1.4";
        assert!(validate_magic_bytes(pdf_header, ".pdf"));
        assert!(!validate_magic_bytes(pdf_header, ".zip"));
    }

    #[test]
    fn test_tar_magic() {
        let mut tar = vec![0u8; 512];
        tar[257..262].copy_from_slice(b"ustar");
        assert!(validate_magic_bytes(&tar, ".tar"));
        assert!(!validate_magic_bytes(&[0u8; 512], ".tar"));
    }

    #[test]
    fn test_empty_data() {
        assert!(!validate_magic_bytes(&[], ".zip"));
        assert!(!validate_magic_bytes(&[], ".txt"));
    }

    #[test]
    fn test_unknown_extension() {
        let data = [0x00, 0x01, 0x02, 0x03];
        assert!(!validate_magic_bytes(&data, ".exe"));
        assert!(!validate_magic_bytes(&data, ".unknown"));
    }
}
