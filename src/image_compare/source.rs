//! # 数据源与中间模型
//!
//! ## 设计思路
//!
//! 将“外部输入类型”和“流水线中间结果”解耦：
//! - `ImageSource` 表示外部来源语义
//! - `RawImageData` 表示已加载但未解码的字节

use std::path::PathBuf;

/// 图片输入来源。
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// 本地文件路径来源。
    FilePath(PathBuf),
    /// 已在内存中的字节（例如由上层文件选择器读取）。
    Memory { name: String, bytes: Vec<u8> },
}

impl ImageSource {
    /// 用于日志与合成图文件名的来源标签。
    pub fn label(&self) -> String {
        match self {
            Self::FilePath(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            Self::Memory { name, .. } => name.clone(),
        }
    }
}

/// 加载阶段输出：原始字节与来源标识。
///
/// 只在单次加载调用内存活，解码完成或失败后随作用域释放。
pub(crate) struct RawImageData {
    /// 原始图片字节。
    pub(crate) bytes: Vec<u8>,
    /// 来源提示（用于日志与诊断）。
    pub(crate) source_hint: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_label_uses_file_name() {
        let source = ImageSource::FilePath(PathBuf::from("/tmp/shots/derived_01.png"));
        assert_eq!(source.label(), "derived_01.png");
    }

    #[test]
    fn memory_label_uses_given_name() {
        let source = ImageSource::Memory {
            name: "upload.png".to_string(),
            bytes: Vec::new(),
        };
        assert_eq!(source.label(), "upload.png");
    }
}
