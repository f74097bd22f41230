//! 报告中固定的分类集合
//!
//! 键名与助手输出保持一致（韩语标签）

/// 题型分类（18 类）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionType {
    /// 빈칸 추론
    BlankInference,
    /// 주제 파악
    Topic,
    /// 제목 선택
    Title,
    /// 요지 파악
    Gist,
    /// 필자 주장
    AuthorsClaim,
    /// 밑줄 어휘
    UnderlinedVocabulary,
    /// 밑줄 어법
    UnderlinedGrammar,
    /// 문단 요약
    ParagraphSummary,
    /// 문장 순서 배열
    SentenceOrdering,
    /// 문장 삽입
    SentenceInsertion,
    /// 문장 삭제
    SentenceDeletion,
    /// 영영풀이
    EnglishDefinition,
    /// 내용 일치
    PassageContent,
    /// 분위기/심경 파악
    MoodTone,
    /// 목적 파악
    Purpose,
    /// 부적절한 선택지
    InappropriateChoice,
    /// 알 수 없는 정보
    UnknowableInformation,
    /// 답할 수 없는 질문
    UnanswerableQuestion,
}

impl QuestionType {
    pub const ALL: [QuestionType; 18] = [
        QuestionType::BlankInference,
        QuestionType::Topic,
        QuestionType::Title,
        QuestionType::Gist,
        QuestionType::AuthorsClaim,
        QuestionType::UnderlinedVocabulary,
        QuestionType::UnderlinedGrammar,
        QuestionType::ParagraphSummary,
        QuestionType::SentenceOrdering,
        QuestionType::SentenceInsertion,
        QuestionType::SentenceDeletion,
        QuestionType::EnglishDefinition,
        QuestionType::PassageContent,
        QuestionType::MoodTone,
        QuestionType::Purpose,
        QuestionType::InappropriateChoice,
        QuestionType::UnknowableInformation,
        QuestionType::UnanswerableQuestion,
    ];

    /// 报告中的键名
    pub fn label(self) -> &'static str {
        match self {
            QuestionType::BlankInference => "빈칸 추론",
            QuestionType::Topic => "주제 파악",
            QuestionType::Title => "제목 선택",
            QuestionType::Gist => "요지 파악",
            QuestionType::AuthorsClaim => "필자 주장",
            QuestionType::UnderlinedVocabulary => "밑줄 어휘",
            QuestionType::UnderlinedGrammar => "밑줄 어법",
            QuestionType::ParagraphSummary => "문단 요약",
            QuestionType::SentenceOrdering => "문장 순서 배열",
            QuestionType::SentenceInsertion => "문장 삽입",
            QuestionType::SentenceDeletion => "문장 삭제",
            QuestionType::EnglishDefinition => "영영풀이",
            QuestionType::PassageContent => "내용 일치",
            QuestionType::MoodTone => "분위기/심경 파악",
            QuestionType::Purpose => "목적 파악",
            QuestionType::InappropriateChoice => "부적절한 선택지",
            QuestionType::UnknowableInformation => "알 수 없는 정보",
            QuestionType::UnanswerableQuestion => "답할 수 없는 질문",
        }
    }
}

/// 出题范围（3 类）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeCategory {
    /// 교과서
    Textbook,
    /// 모의고사
    MockExam,
    /// 부교재
    Supplementary,
}

impl ScopeCategory {
    pub const ALL: [ScopeCategory; 3] = [
        ScopeCategory::Textbook,
        ScopeCategory::MockExam,
        ScopeCategory::Supplementary,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ScopeCategory::Textbook => "교과서",
            ScopeCategory::MockExam => "모의고사",
            ScopeCategory::Supplementary => "부교재",
        }
    }
}

/// 题目形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatCategory {
    MultipleChoice,
    Subjective,
}

impl FormatCategory {
    pub const ALL: [FormatCategory; 2] = [FormatCategory::MultipleChoice, FormatCategory::Subjective];

    pub fn label(self) -> &'static str {
        match self {
            FormatCategory::MultipleChoice => "multiple_choice",
            FormatCategory::Subjective => "subjective",
        }
    }
}
