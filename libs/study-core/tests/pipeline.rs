//! End-to-end parsing and extraction over whole documents.

use pretty_assertions::assert_eq;
use study_core::{
    parse, segment, type_counts, BlockKind, Category, Extractor, Module, Question,
    QuestionSource, QuestionType, SequentialIds,
};

const CANONICAL: &str = "\
# Module 05 — Interview Drills
*Topics: sql, stats, behavioral*

Reading notes that sit before any section.

## 🔷 Aggregation
Counting is the first thing to master.

**Quick quiz:** Count rows in t
**Answer:** SELECT COUNT(*) FROM t;

## Round 1: Speed definitions
**1.** Define p-value
Probability of data this extreme under the null.
**2.** Define power
Chance of detecting a true effect.

## Behavioral: STAR stories
**\"Tell me about a time you failed\"** (2 min)

---

## Self-Test
1. What does COUNT(*) count?
2. What is power?

**Answers:**
1. All rows.
2. One minus the type II error rate.
";

fn extract(module: &Module) -> Vec<Question> {
    let ids = SequentialIds::new("q");
    Extractor::new(&ids).extract(module)
}

#[test]
fn canonical_module_round_trip_through_extraction() {
    let module = parse(CANONICAL, "notes/Module-05-drills.md");

    assert_eq!(module.id, "module-05");
    assert_eq!(module.number, 5);
    assert_eq!(module.title, "Interview Drills");
    assert_eq!(module.subtitle, "Topics: sql, stats, behavioral");
    assert_eq!(module.source, "Module-05-drills.md");

    let titles: Vec<&str> = module.sections.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "🔷 Aggregation",
            "Round 1: Speed definitions",
            "Behavioral: STAR stories",
            "Self-Test"
        ]
    );
    let categories: Vec<Category> = module.sections.iter().map(|s| s.category).collect();
    assert_eq!(
        categories,
        vec![
            Category::Sql,
            Category::Terminology,
            Category::Behavioral,
            Category::Review
        ]
    );

    let questions = extract(&module);
    let summary: Vec<(&str, QuestionType, Category)> = questions
        .iter()
        .map(|q| (q.prompt.as_str(), q.question_type, q.category))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("Count rows in t", QuestionType::CodePractice, Category::Sql),
            ("Define p-value", QuestionType::Flashcard, Category::Terminology),
            ("Define power", QuestionType::Flashcard, Category::Terminology),
            (
                "Tell me about a time you failed",
                QuestionType::StarPractice,
                Category::Behavioral
            ),
            ("What does COUNT(*) count?", QuestionType::FreeText, Category::General),
            ("What is power?", QuestionType::FreeText, Category::General),
        ]
    );

    let ids: Vec<&str> = questions.iter().map(|q| q.id.as_str()).collect();
    assert_eq!(ids, vec!["q-1", "q-2", "q-3", "q-4", "q-5", "q-6"]);
    assert!(questions.iter().all(|q| q.module_id == "module-05"));
    assert!(questions.iter().all(|q| q.source == QuestionSource::Auto));

    assert_eq!(questions[0].code_language.as_deref(), Some("sql"));
    assert_eq!(
        questions[1].answer,
        "Probability of data this extreme under the null."
    );
    assert_eq!(questions[5].answer, "One minus the type II error rate.");
    assert_eq!(questions[3].rubric.len(), 5);

    let counts = type_counts(&questions);
    assert_eq!(counts.get(&QuestionType::FreeText), Some(&2));
    assert_eq!(counts.get(&QuestionType::Flashcard), Some(&2));
    assert_eq!(counts.get(&QuestionType::MultipleChoice), None);
}

#[test]
fn re_extraction_changes_only_ids() {
    let module = parse(CANONICAL, "Module-05.md");
    let first = study_core::extract(&module);
    let second = study_core::extract(&module);

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(&second) {
        assert_ne!(a.id, b.id);
        assert_eq!(a.prompt, b.prompt);
        assert_eq!(a.answer, b.answer);
        assert_eq!(a.question_type, b.question_type);
    }
}

#[test]
fn pasted_notes_are_segmented_and_extracted() {
    let pasted = "\
Intro words before any header.

# Window functions
Use ROW_NUMBER() OVER (PARTITION BY user_id ORDER BY ts).

**Quick quiz:** Rank orders per user
**Answer:** Use ROW_NUMBER with a PARTITION BY.

```sql
# not a header
SELECT ROW_NUMBER() OVER (PARTITION BY user_id ORDER BY ts) FROM orders;
```

## Hypothesis testing
A p-value is a probability under the null hypothesis.
";
    let module = segment(pasted, "My SQL notes");

    assert_eq!(module.id, "imported-my-sql-notes");
    assert_eq!(module.number, 0);
    assert_eq!(module.subtitle, "Imported content");
    let titles: Vec<&str> = module.sections.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["Introduction", "Window functions", "Hypothesis testing"]
    );
    let orders: Vec<usize> = module.sections.iter().map(|s| s.order).collect();
    assert_eq!(orders, vec![0, 1, 2]);

    let windows = &module.sections[1];
    assert_eq!(windows.category, Category::Sql);
    assert_eq!(windows.blocks.last().map(|b| b.kind), Some(BlockKind::Code));
    assert_eq!(
        windows.blocks.last().and_then(|b| b.language.as_deref()),
        Some("sql")
    );
    assert_eq!(module.sections[2].category, Category::Stats);

    let questions = extract(&module);
    assert_eq!(questions.len(), 1);
    assert_eq!(questions[0].question_type, QuestionType::CodePractice);
    assert_eq!(questions[0].answer, "Use ROW_NUMBER with a PARTITION BY.");
    assert_eq!(questions[0].code_language.as_deref(), Some("sql"));
}

#[test]
fn malformed_input_never_fails() {
    for input in ["", "```", "## ", "---\n---", "**Quick quiz:**", "# Module 1 — \n```py"] {
        let canonical = parse(input, "broken.md");
        let _ = extract(&canonical);
        let imported = segment(input, "");
        assert!(!imported.sections.is_empty());
        let _ = extract(&imported);
    }
}

#[test]
fn module_json_uses_snake_case() {
    let module = parse(CANONICAL, "Module-05.md");
    let questions = extract(&module);

    let json = serde_json::to_value(&questions[0]).unwrap();
    assert_eq!(json["question_type"], "code_practice");
    assert_eq!(json["category"], "sql");
    assert_eq!(json["source"], "auto");
    assert_eq!(json["code_language"], "sql");
    assert!(json.get("options").is_none());

    let text = serde_json::to_string_pretty(&module).unwrap();
    let back: Module = serde_json::from_str(&text).unwrap();
    assert_eq!(back, module);
}

#[test]
fn question_json_round_trip_keeps_optional_fields() {
    let mut question = Question::new(
        "ab12cd34".to_string(),
        "module-05",
        "Custom",
        Category::Python,
        QuestionType::MultipleChoice,
        "Which call drops missing rows?",
        "df.dropna()",
    )
    .with_code_language(Some("python".to_string()))
    .with_rubric(vec!["Names the method".to_string()]);
    question.options = vec!["df.dropna()".to_string(), "df.fillna(0)".to_string()];
    question.blanks = vec!["dropna".to_string()];
    question.source = QuestionSource::Manual;

    let text = serde_json::to_string(&question).unwrap();
    let back: Question = serde_json::from_str(&text).unwrap();
    assert_eq!(back, question);

    let bare = Question::new(
        "q-1".to_string(),
        "module-05",
        "Notes",
        Category::General,
        QuestionType::FreeText,
        "Why index?",
        "Faster reads.",
    );
    let text = serde_json::to_string(&bare).unwrap();
    for key in ["code_language", "options", "blanks", "rubric"] {
        assert!(!text.contains(key), "{key} should be omitted");
    }
    let back: Question = serde_json::from_str(&text).unwrap();
    assert_eq!(back, bare);

    let minimal: Question = serde_json::from_str(
        r#"{"id": "q-2", "module_id": "m", "question_type": "flashcard", "prompt": "p", "answer": "a"}"#,
    )
    .unwrap();
    assert_eq!(minimal.source, QuestionSource::Auto);
    assert_eq!(minimal.category, Category::General);
    assert!(minimal.options.is_empty() && minimal.rubric.is_empty());
    assert_eq!(minimal.code_language, None);
}
