use crate::config::Config;
use crate::models::report::fields;
use std::fmt;

/// 分析配置种类
///
/// 顺序固定：basic → format → types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileKind {
    /// 学校、年级、考试类型、总题数、难词
    Basic,
    /// 题目形式与出题范围
    Format,
    /// 题型统计
    Types,
}

impl ProfileKind {
    pub const PIPELINE_ORDER: [ProfileKind; 3] =
        [ProfileKind::Basic, ProfileKind::Format, ProfileKind::Types];

    pub fn name(self) -> &'static str {
        match self {
            ProfileKind::Basic => "basic",
            ProfileKind::Format => "format",
            ProfileKind::Types => "types",
        }
    }

    /// 该配置负责填充的报告字段
    pub fn owned_fields(self) -> &'static [&'static str] {
        match self {
            ProfileKind::Basic => &[
                fields::SCHOOL_NAME,
                fields::PUBLISHER,
                fields::GRADE,
                fields::EXAM_TYPE,
                fields::TOTAL_QUESTIONS,
                fields::HIGHEST_DIFFICULTY_VOCAB,
            ],
            ProfileKind::Format => &[fields::QUESTION_FORMAT, fields::QUESTION_SCOPE],
            ProfileKind::Types => &[fields::QUESTION_TYPES],
        }
    }
}

impl fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 分析配置：种类 + 远程助手 ID
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisProfile {
    pub kind: ProfileKind,
    pub assistant_id: String,
}

impl AnalysisProfile {
    pub fn new(kind: ProfileKind, assistant_id: impl Into<String>) -> Self {
        Self {
            kind,
            assistant_id: assistant_id.into(),
        }
    }

    /// 按流水线顺序构建全部配置
    pub fn all_from_config(config: &Config) -> Vec<AnalysisProfile> {
        ProfileKind::PIPELINE_ORDER
            .into_iter()
            .map(|kind| {
                let assistant_id = match kind {
                    ProfileKind::Basic => &config.basic_assistant_id,
                    ProfileKind::Format => &config.format_assistant_id,
                    ProfileKind::Types => &config.types_assistant_id,
                };
                AnalysisProfile::new(kind, assistant_id.clone())
            })
            .collect()
    }
}
