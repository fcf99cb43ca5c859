//! 全局错误类型定义
use thiserror::Error;

use regex::Error as RegexError;
use serde_json::Error as SerdeJsonError;
use std::io::Error as IoError;
use std::path::PathBuf;

#[derive(Error, Debug)]
pub enum ClassifyError {
    // 输入相关错误
    #[error("输入文件不存在：{}", .0.display())]
    InputNotFound(PathBuf),
    #[error("记录格式非法（第{index}条）：{detail}")]
    MalformedRecord { index: usize, detail: String },
    #[error("重复的物品ID {id}（第{index}条）")]
    DuplicateId { id: u32, index: usize },

    // 规则配置相关错误
    #[error("规则配置非法：{0}")]
    RuleConfigError(String),
    #[error("正则编译失败：{0}")]
    RegexCompileError(#[from] RegexError),

    // 序列化/反序列化错误
    #[error("JSON解析失败：{0}")]
    JsonError(#[from] SerdeJsonError),

    // 基础错误
    #[error("IO操作失败：{0}")]
    IoError(#[from] IoError),
}

// 全局Result类型
pub type ClsResult<T> = Result<T, ClassifyError>;

/// 进程退出码约定
/// 0 = 成功且覆盖率达标；1 = 任何错误；2 = 成功但覆盖率低于阈值
pub const EXIT_OK: i32 = 0;
pub const EXIT_ERROR: i32 = 1;
pub const EXIT_LOW_COVERAGE: i32 = 2;

impl ClassifyError {
    /// 错误到进程退出码的映射
    /// 所有错误路径统一退出码1，低覆盖率不是错误（由调用方判定）
    pub fn exit_code(&self) -> i32 {
        EXIT_ERROR
    }
}
