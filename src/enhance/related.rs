//! Related articles by shared tags and category.

use crate::model::Article;

const TAG_WEIGHT: usize = 2;
const CATEGORY_WEIGHT: usize = 1;

/// Up to `limit` other articles ranked by relevance.
///
/// Each shared tag (case-insensitive) scores twice a shared category.
/// Unrelated articles are never returned; ties keep `candidates` order,
/// which is newest first.
pub fn related<'a>(article: &Article, candidates: &'a [Article], limit: usize) -> Vec<&'a Article> {
    let mut scored: Vec<(usize, &Article)> = candidates
        .iter()
        .filter(|c| c.slug != article.slug)
        .map(|c| (score(article, c), c))
        .filter(|(score, _)| *score > 0)
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().take(limit).map(|(_, c)| c).collect()
}

fn score(article: &Article, other: &Article) -> usize {
    let shared_tags = article
        .tags
        .iter()
        .filter(|tag| other.tags.iter().any(|t| t.eq_ignore_ascii_case(tag)))
        .count();
    let same_category = article.category.eq_ignore_ascii_case(&other.category);
    shared_tags * TAG_WEIGHT + usize::from(same_category) * CATEGORY_WEIGHT
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ArticleRecord, Author};

    fn article(slug: &str, category: &str, tags: &[&str]) -> Article {
        let record = ArticleRecord {
            id: slug.into(),
            title: Some(slug.into()),
            category: Some(category.into()),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        };
        Article::from_record(record, slug.into(), Author::default())
    }

    #[test]
    fn test_ranking() {
        let me = article("me", "ERP", &["odoo", "dsgvo"]);
        let all = vec![
            me.clone(),
            article("cat-only", "erp", &[]),
            article("one-tag", "CRM", &["Odoo"]),
            article("both", "ERP", &["odoo", "DSGVO"]),
            article("none", "CRM", &["shop"]),
        ];
        let slugs: Vec<_> = related(&me, &all, 5).iter().map(|a| a.slug.as_str()).collect();
        assert_eq!(slugs, ["both", "one-tag", "cat-only"]);
    }

    #[test]
    fn test_limit_and_ties_keep_order() {
        let me = article("me", "A", &[]);
        let all = vec![
            article("x", "A", &[]),
            article("y", "A", &[]),
            article("z", "A", &[]),
        ];
        let slugs: Vec<_> = related(&me, &all, 2).iter().map(|a| a.slug.as_str()).collect();
        assert_eq!(slugs, ["x", "y"]);
    }

    #[test]
    fn test_nothing_related() {
        let me = article("me", "A", &["t"]);
        assert!(related(&me, &[article("o", "B", &["u"])], 3).is_empty());
        assert!(related(&me, &[me.clone()], 3).is_empty());
    }
}
