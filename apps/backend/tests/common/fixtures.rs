//! Test fixtures and factory functions for creating test data.

use serde_json::json;

/// Canonical module file with a quiz, a round and a self-test.
pub const MODULE_SQL: &str = "\
# Module 01 — SQL Foundations
*Topics: select, aggregation*

## 🔷 Aggregation
Counting rows comes first.

**Quick quiz:** Count rows in orders
**Answer:** SELECT COUNT(*) FROM orders;

## Round 1: Speed definitions
**1.** Define cardinality
Number of distinct values.

## Self-Test
1. What does COUNT(*) count?

**Answers:**
1. Every row, including NULLs.
";

/// Canonical module file with a behavioral section.
pub const MODULE_BEHAVIORAL: &str = "\
# Module 02 — Behavioral
## Behavioral: STAR stories
**\"Tell me about a time you disagreed with a stakeholder\"** (2 min)

**Homework:** Write down your strongest conflict story in STAR form
";

/// Pasted notes with headers and a quiz.
pub fn pasted_notes() -> String {
    [
        "# Probability",
        "A p-value is a probability under the null hypothesis.",
        "",
        "**Quick quiz:** What is a p-value?",
        "**Answer:** The chance of data this extreme if the null is true.",
        "",
        "# Pandas",
        "Use df.groupby('user').size() to count per user.",
    ]
    .join("\n")
}

/// Body for POST /api/ingest.
pub fn ingest_request(content: &str, title: Option<&str>, action: &str) -> serde_json::Value {
    match title {
        Some(t) => json!({ "content": content, "title": t, "action": action }),
        None => json!({ "content": content, "action": action }),
    }
}

/// Body for POST /api/questions.
pub fn new_question_request(module_id: &str, prompt: &str) -> serde_json::Value {
    json!({
        "module_id": module_id,
        "category": "sql",
        "question_type": "code_practice",
        "prompt": prompt,
        "answer": "SELECT 1;",
        "code_language": "sql",
    })
}
