//! Prompt templates.
//!
//! Pure substitution: the user's input is embedded verbatim and nothing here
//! branches on its content. The formatting rules are guidance for the model
//! only; replies are passed through without checking that they were followed.

/// Literal used in generated output when a question has no description.
pub const NO_DESCRIPTION: &str = "없음";

/// Mandatory trailing option that lets the respondent type a free answer.
pub const CATCH_ALL_OPTION: &str = "기타 (직접 입력)";

/// Delimiter between multiple generated questions.
pub const QUESTION_DELIMITER: &str = "---";

/// Generation prompt for the single-step flow.
pub fn single_step_prompt(input: &str) -> String {
    format!(
        r#"당신은 객관식 질문 생성 전문가입니다. 사용자가 입력한 내용을 분석하여 객관식 질문으로 변환하세요.

📝 사용자 입력:
{input}

🎯 작업 지침:
1. 각 항목을 분석하여 "질문", "설명", "옵션"으로 구분
2. 질문은 명확하고 간결하게
3. 설명은 있으면 포함, 없으면 생략
4. 옵션은 **반드시 태그 형식**으로 (문장 X, 항목명 O)
   - 좋은 예: "에세이", "초등 1~3학년", "독서"
   - 나쁜 예: "에세이를 좋아합니다", "초등학교 1학년부터 3학년까지"

5. 여러 질문이 있으면 구분선({delim})으로 분리

📋 출력 형식:
**질문:** [질문 내용]
**설명:** [설명 내용 또는 "{none}"]
**옵션:**
- [옵션1]
- [옵션2]
- [옵션3]

{delim}

**질문:** [다음 질문]
...

🚨 중요:
- 옵션은 무조건 짧은 단어/구문 (태그로 사용 가능)
- 문장 형태 금지
- "~합니다", "~입니다" 같은 서술 금지"#,
        input = input,
        delim = QUESTION_DELIMITER,
        none = NO_DESCRIPTION,
    )
}

/// Clarification prompt: asks for `OK` or a single `CLARIFY:` line.
pub fn clarify_prompt(input: &str) -> String {
    format!(
        r#"당신은 객관식 질문 설계 도우미입니다. 아래 사용자 입력이 객관식 질문을 만들기에 충분히 구체적인지 판단하세요.

📝 사용자 입력:
{input}

🎯 판단 기준:
1. 무엇을 묻고 싶은지 주제가 분명한가
2. 선택지로 나눌 수 있는 범위나 대상이 드러나 있는가

📋 응답 규칙 (다른 말은 절대 덧붙이지 마세요):
- 충분히 구체적이면 정확히 OK 두 글자만 출력
- 부족하면 한 줄로 CLARIFY: [사용자에게 되물을 짧은 질문]

예시:
CLARIFY: 어떤 연령대의 독자를 대상으로 하나요?"#,
        input = input,
    )
}

/// Generation prompt for the two-phase flow.
pub fn generation_prompt(input: &str) -> String {
    format!(
        r#"당신은 객관식 질문 생성 전문가입니다. 사용자가 입력한 내용을 분석하여 객관식 질문으로 변환하세요.

📝 사용자 입력:
{input}

🎯 작업 지침:
1. 먼저 질문을 명확하고 간결하게 작성
2. 설명이 있으면 작성하고, 없으면 "{none}"이라고 작성
3. 옵션은 **반드시 태그 형식**의 짧은 단어/구문으로 나열 (문장 X, 항목명 O)
   - 좋은 예: "에세이", "초등 1~3학년", "독서"
   - 나쁜 예: "에세이를 좋아합니다", "초등학교 1학년부터 3학년까지"
4. 모든 질문의 마지막 옵션은 항상 "{catch_all}"
5. 여러 질문이 있으면 구분선({delim})으로 분리

📋 출력 형식:
**질문:** [질문 내용]
**설명:** [설명 내용 또는 "{none}"]
**옵션:**
- [옵션1]
- [옵션2]
- [옵션3]
- {catch_all}

{delim}

**질문:** [다음 질문]
...

✅ 예시:
입력: 아이가 좋아하는 책 종류랑 학년 알려주세요
출력:
**질문:** 아이가 좋아하는 책 종류는 무엇인가요?
**설명:** {none}
**옵션:**
- 동화
- 과학
- 역사
- 만화
- {catch_all}

{delim}

**질문:** 아이의 학년은 어떻게 되나요?
**설명:** {none}
**옵션:**
- 초등 1~3학년
- 초등 4~6학년
- 중학생
- {catch_all}

🚨 중요:
- 옵션은 무조건 짧은 단어/구문 (태그로 사용 가능)
- 문장 형태 금지
- "~합니다", "~입니다" 같은 서술 금지
- 마지막 옵션 "{catch_all}" 누락 금지"#,
        input = input,
        none = NO_DESCRIPTION,
        catch_all = CATCH_ALL_OPTION,
        delim = QUESTION_DELIMITER,
    )
}
