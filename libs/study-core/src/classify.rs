//! Keyword-scoring category classifier.
//!
//! Each table names a category and the keywords that vote for it. A keyword
//! scores once if it appears anywhere in the text, compared case-insensitively.
//! The category with the strictly highest score wins; ties and all-zero
//! scores resolve to [`Category::General`].

use crate::types::Category;

/// Keywords voting for one category.
#[derive(Debug, Clone, Copy)]
pub struct KeywordTable<'a> {
    pub category: Category,
    pub keywords: &'a [&'a str],
}

pub const SQL_KEYWORDS: &[&str] = &[
    "SELECT", "FROM", "WHERE", "JOIN", "GROUP BY", "HAVING", "ORDER BY", "INSERT", "UPDATE",
    "DELETE", "CREATE TABLE", "ALTER", "INDEX", "UNION", "CTE", "WITH", "WINDOW",
    "PARTITION BY", "subquery",
];

pub const PYTHON_KEYWORDS: &[&str] = &[
    "pandas", "numpy", "def ", "class ", "import ", "lambda", "list comprehension", "dict",
    "tuple", "generator", "decorator", ".apply(", ".groupby(", ".merge(", "DataFrame",
];

pub const STATS_KEYWORDS: &[&str] = &[
    "probability", "p-value", "hypothesis", "confidence interval", "standard deviation",
    "variance", "bayes", "regression", "normal distribution", "CLT", "central limit",
    "sampling", "type I", "type II", "significance", "A/B test",
];

pub const ML_KEYWORDS: &[&str] = &[
    "model", "training", "overfitting", "underfitting", "bias-variance", "random forest",
    "gradient boosting", "XGBoost", "neural network", "regularization", "L1", "L2",
    "cross-validation", "feature", "precision", "recall", "F1", "AUC", "ROC", "classification",
    "clustering", "deep learning", "logistic regression",
];

/// The built-in tables: SQL, data manipulation, statistics and ML terms.
pub const DEFAULT_TABLES: [KeywordTable<'static>; 4] = [
    KeywordTable {
        category: Category::Sql,
        keywords: SQL_KEYWORDS,
    },
    KeywordTable {
        category: Category::Python,
        keywords: PYTHON_KEYWORDS,
    },
    KeywordTable {
        category: Category::Stats,
        keywords: STATS_KEYWORDS,
    },
    KeywordTable {
        category: Category::Ml,
        keywords: ML_KEYWORDS,
    },
];

/// Classify text with the built-in keyword tables.
pub fn classify(text: &str) -> Category {
    classify_with(text, &DEFAULT_TABLES)
}

/// Classify text against explicit keyword tables.
pub fn classify_with(text: &str, tables: &[KeywordTable<'_>]) -> Category {
    let haystack = text.to_lowercase();

    let mut best = Category::General;
    let mut best_score = 0;
    let mut tied = false;

    for table in tables {
        let score = score(&haystack, table.keywords);
        if score > best_score {
            best = table.category;
            best_score = score;
            tied = false;
        } else if score == best_score && score > 0 {
            tied = true;
        }
    }

    if tied || best_score == 0 {
        Category::General
    } else {
        best
    }
}

/// Number of distinct keywords present in already lower-cased text.
fn score(haystack: &str, keywords: &[&str]) -> usize {
    keywords
        .iter()
        .filter(|kw| haystack.contains(&kw.to_lowercase()))
        .count()
}
