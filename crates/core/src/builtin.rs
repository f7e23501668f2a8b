//! Built-in curriculum: the static mission catalog, per-lesson quiz answer
//! keys, and guidebook embed URLs.

use crate::model::{Lesson, Mission, MultipleChoice, Quiz, ShortAnswer};

struct LessonSpec {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    xp_reward: u32,
    quiz: Option<QuizSpec>,
    guidebook_url: Option<&'static str>,
}

struct QuizSpec {
    mcq_question: &'static str,
    options: [&'static str; 3],
    correct_index: usize,
    short_question: &'static str,
    short_answer: &'static str,
}

/// The shipped catalog, in unlock order.
#[must_use]
pub fn missions() -> Vec<Mission> {
    vec![
        Mission {
            id: "1-1".into(),
            chapter: "CH 1".to_string(),
            title: "[온라인 가이드북] BI 기초와 시각적 분석".to_string(),
            description: "데이터 분석가의 실무 기초를 다지는 과정입니다. BI의 본질적 가치부터 지표 설계, 시각화 원칙을 학습합니다.".to_string(),
            xp_reward: 800,
            kind: "BI 기초".to_string(),
            lessons: flagship_lessons(),
        },
        Mission {
            id: "2-1".into(),
            chapter: "CH 2".to_string(),
            title: "[온라인 가이드북] Tableau 시작하기".to_string(),
            description: "태블로 인터페이스와 핵심 개념을 익히고 유형별 실무 차트를 제작합니다.".to_string(),
            xp_reward: 1000,
            kind: "태블로 기초".to_string(),
            lessons: vec![
                build_lesson(&LessonSpec {
                    id: "2-1-1",
                    title: "1. BI 툴 태블로 인터페이스",
                    description: "태블로의 주요 선반과 데이터 연결 방식을 익힙니다.",
                    xp_reward: 500,
                    quiz: None,
                    guidebook_url: None,
                }),
                build_lesson(&LessonSpec {
                    id: "2-1-2",
                    title: "2. 실무 6종 차트 제작 실습",
                    description: "이중축, 도넛, 트리맵 등 실무 활용도가 높은 차트를 직접 구현합니다.",
                    xp_reward: 500,
                    quiz: None,
                    guidebook_url: None,
                }),
            ],
        },
    ]
}

fn flagship_lessons() -> Vec<Lesson> {
    FLAGSHIP_LESSONS.iter().map(build_lesson).collect()
}

fn build_lesson(spec: &LessonSpec) -> Lesson {
    Lesson {
        id: spec.id.into(),
        title: spec.title.to_string(),
        description: spec.description.to_string(),
        xp_reward: spec.xp_reward,
        quiz: spec.quiz.as_ref().map(|q| Quiz {
            choice: MultipleChoice {
                question: q.mcq_question.to_string(),
                options: q.options.iter().map(|o| (*o).to_string()).collect(),
                correct_index: q.correct_index,
            },
            short: ShortAnswer {
                question: q.short_question.to_string(),
                answer: q.short_answer.to_string(),
            },
        }),
        guidebook_url: spec.guidebook_url.map(str::to_string),
    }
}

const FLAGSHIP_LESSONS: [LessonSpec; 8] = [
    LessonSpec {
        id: "1-1-1",
        title: "1-1. [BI 실무 기초] BI 실무 사례",
        description: "도메인별 대시보드 활용 사례(게임, HR, 세일즈)를 확인합니다.",
        xp_reward: 100,
        quiz: Some(QuizSpec {
            mcq_question: "가이드북에서 소개한 사례 중, UX 디자인적 가치를 인정받아 어워드를 수상한 대시보드는?",
            options: ["게임 로그 대시보드", "HR Attrition 대시보드", "Sales Funnel 대시보드"],
            correct_index: 1,
            short_question: "사용자가 특정 기간 내에 재방문하는 비율을 뜻하는 지표의 이름은? (한글 3글자)",
            short_answer: "리텐션",
        }),
        guidebook_url: Some("https://trail-bowler-04f.notion.site/ebd//2de4126a7fc481ed922dfbf5c95818e7"),
    },
    LessonSpec {
        id: "1-1-2",
        title: "1-2. [BI 실무 기초] BI의 필요성",
        description: "엑셀의 한계를 넘어 실시간 의사결정을 가능케 하는 BI의 가치를 배웁니다.",
        xp_reward: 100,
        quiz: Some(QuizSpec {
            mcq_question: "엑셀 대신 BI 툴을 사용하는 가장 큰 실무적 이유는 무엇인가요?",
            options: ["표 계산을 더 정확히 하기 위해", "실시간 의사결정 및 자동화 공유", "그림판보다 그리기 편해서"],
            correct_index: 1,
            short_question: "데이터를 분석하여 의사결정에 활용하는 기술을 뜻하는 약어는? (대문자 2글자)",
            short_answer: "BI",
        }),
        guidebook_url: Some("https://trail-bowler-04f.notion.site/ebd//2de4126a7fc481968729fe4c323098d1"),
    },
    LessonSpec {
        id: "1-1-3",
        title: "1-3. [BI 실무 기초] 데이터 시각화란?",
        description: "전주의적 속성과 데이터사우르스 예시를 통해 소통의 도구로서의 시각화를 이해합니다.",
        xp_reward: 100,
        quiz: Some(QuizSpec {
            mcq_question: "우리 눈이 의식적으로 노력하지 않아도 정보를 즉각 인지하는 속성을 무엇이라 하나요?",
            options: ["후천적 학습 속성", "전주의적 속성", "심미적 편향 속성"],
            correct_index: 1,
            short_question: "통계치는 같지만 시각화하면 전혀 다른 모양이 나오는 예시의 이름은? (한글 6글자)",
            short_answer: "데이터사우르스",
        }),
        guidebook_url: Some("https://trail-bowler-04f.notion.site/ebd//2de4126a7fc4813c9b6bf3be6fa4343a"),
    },
    LessonSpec {
        id: "1-1-4",
        title: "2-1. 분석 목적 세우기",
        description: "5가지 질문(Who, Why, What, How, When)으로 분석의 방향을 설정합니다.",
        xp_reward: 100,
        quiz: Some(QuizSpec {
            mcq_question: "분석 목적을 세울 때 반드시 질문해야 하는 5W 요소가 아닌 것은?",
            options: ["Who (누구에게?)", "Why (왜 보는지?)", "Weight (데이터 무게?)"],
            correct_index: 2,
            short_question: "차트를 그리기 전, 분석의 방향을 설정하는 이 단계를 무엇이라 하나요? (한글 4글자)",
            short_answer: "목적설계",
        }),
        guidebook_url: Some("https://trail-bowler-04f.notion.site/ebd//2de4126a7fc481b088e6ed92b839eb99"),
    },
    LessonSpec {
        id: "1-1-5",
        title: "2-2. Actionable 지표 구조 설계",
        description: "Outcome, Driver, Actionable 지표로 이어지는 Metric Hierarchy를 구축합니다.",
        xp_reward: 100,
        quiz: Some(QuizSpec {
            mcq_question: "Outcome 지표가 하락했을 때 원인을 즉시 찾을 수 있게 설계한 구조는?",
            options: ["Metric Hierarchy", "Data Lake", "SQL Join Structure"],
            correct_index: 0,
            short_question: "우리가 당장 실행하여 변화시킬 수 있는 구체적인 지표를 무엇이라 하나요? (영문)",
            short_answer: "Actionable",
        }),
        guidebook_url: Some("https://trail-bowler-04f.notion.site/ebd//2de4126a7fc481f7a6b8e44ac5ea23b1"),
    },
    LessonSpec {
        id: "1-1-6",
        title: "2-3. 실무 시각화 차트 3종 활용",
        description: "라인, 막대, 도넛 차트의 적재적소 활용법과 대시보드 배치 흐름을 익힙니다.",
        xp_reward: 100,
        quiz: Some(QuizSpec {
            mcq_question: "실무에서 '시간에 따른 추세'를 보여주기에 가장 적합한 차트는?",
            options: ["도넛 차트", "막대 차트", "라인 차트"],
            correct_index: 2,
            short_question: "상단에 핵심 KPI를 두고 하단에 상세 내역을 두는 대시보드 배치 흐름을 무엇이라 하나요? (한글 2글자)",
            short_answer: "역전",
        }),
        guidebook_url: Some("https://trail-bowler-04f.notion.site/ebd//2de4126a7fc48118816ec9d4b439405b"),
    },
    LessonSpec {
        id: "1-1-7",
        title: "2-4. 시각화 원칙과 디자인 시스템",
        description: "데이터 잉크 비율을 높이고 노이즈를 최소화하는 디자인 디테일을 학습합니다.",
        xp_reward: 100,
        quiz: Some(QuizSpec {
            mcq_question: "에드워드 터프티가 제안한, 정보와 상관없는 불필요한 요소를 줄여야 한다는 원칙은?",
            options: ["데이터 잉크 비율 극대화", "화려한 그라데이션 사용", "3D 차트 효과 적용"],
            correct_index: 0,
            short_question: "시각화에서 정보 전달을 방해하는 불필요한 시각 요소를 무엇이라 하나요? (한글 3글자)",
            short_answer: "노이즈",
        }),
        guidebook_url: Some("https://trail-bowler-04f.notion.site/ebd//2de4126a7fc4810fb9dccb3c41668602"),
    },
    LessonSpec {
        id: "1-1-8",
        title: "2-5. 시각적 분석으로 인사이트 도출",
        description: "평가, 가설 나열, 드릴다운을 통해 심슨의 역설을 경계하며 결론을 냅니다.",
        xp_reward: 100,
        quiz: Some(QuizSpec {
            mcq_question: "전체 데이터는 좋아 보이지만 세부 그룹으로 나누면 결과가 뒤집히는 현상은?",
            options: ["심슨의 역설", "평균의 함정", "확증 편향"],
            correct_index: 0,
            short_question: "더 상세한 원인을 파악하기 위해 데이터를 쪼개고 하위 단계로 내려가는 분석 기법은? (한글 4글자)",
            short_answer: "드릴다운",
        }),
        guidebook_url: Some("https://trail-bowler-04f.notion.site/ebd//2de4126a7fc481cc8fc7cb9c54b916f3"),
    },
];
