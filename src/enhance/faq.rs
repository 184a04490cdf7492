//! FAQ section with its structured-data mirror.
//!
//! Question and answer are sanitized once; the same strings feed the visible
//! accordion and the FAQPage JSON-LD, so the two cannot diverge.

use super::trusted;
use crate::core::SiteHosts;
use crate::dom::{Element, Fragment};
use crate::model::{FaqEntry, Issue};
use crate::pipeline::process_snippet;

const TITLE: &str = "Häufig gestellte Fragen";
const CHEVRON: &str = r#"<svg class="od-faq-question__icon" width="24" height="24" viewBox="0 0 24 24" aria-hidden="true"><path d="M7 10l5 5 5-5" stroke="currentColor" stroke-width="2" fill="none"/></svg>"#;

/// One sanitized question/answer pair (HTML fragments).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
}

impl FaqItem {
    /// Question as plain text, whitespace collapsed.
    pub fn question_text(&self) -> String {
        plain_text(&self.question)
    }

    /// Answer as plain text, whitespace collapsed.
    pub fn answer_text(&self) -> String {
        plain_text(&self.answer)
    }
}

fn plain_text(html: &str) -> String {
    Fragment::parse(html)
        .map(|f| f.readable_text().split_whitespace().collect::<Vec<_>>().join(" "))
        .unwrap_or_default()
}

#[derive(Debug, Clone)]
pub struct FaqBlock {
    pub items: Vec<FaqItem>,
}

impl FaqBlock {
    /// Sanitize every pair in input order. Pairs that fail to parse are
    /// dropped and reported; an empty result is `None`.
    pub fn build(entries: &[FaqEntry], hosts: &SiteHosts, subject: &str) -> (Option<Self>, Vec<Issue>) {
        let mut issues = Vec::new();
        let mut items = Vec::with_capacity(entries.len());

        for (i, entry) in entries.iter().enumerate() {
            let question = process_snippet(&entry.question, hosts);
            let answer = process_snippet(&entry.answer, hosts);
            match (question, answer) {
                (Ok(question), Ok(answer)) if !question.is_empty() && !answer.is_empty() => {
                    items.push(FaqItem { question, answer });
                }
                (Err(err), _) | (_, Err(err)) => {
                    issues.push(Issue::new(subject, format!("FAQ entry {} dropped: {err}", i + 1)));
                }
                _ => {
                    issues.push(Issue::new(subject, format!("FAQ entry {} is empty after sanitizing", i + 1)));
                }
            }
        }

        let block = (!items.is_empty()).then_some(Self { items });
        (block, issues)
    }

    /// Accordion markup; the first entry starts expanded.
    pub fn to_element(&self) -> Element {
        let list = Element::new("div")
            .class("od-faq-list")
            .children(self.items.iter().enumerate().map(|(i, item)| item_element(i, item).into()));

        Element::new("section")
            .class("od-faq-section")
            .with("aria-label", TITLE)
            .with("id", "faq")
            .child(Element::new("h2").class("od-faq-section__title").text(TITLE))
            .child(list)
    }
}

fn item_element(index: usize, item: &FaqItem) -> Element {
    let id = format!("faq-{index}");
    let expanded = index == 0;
    let class = if expanded {
        "od-faq-item od-faq-item--expanded"
    } else {
        "od-faq-item"
    };

    let button = Element::new("button")
        .with("type", "button")
        .class("od-faq-question")
        .with("aria-expanded", expanded.to_string())
        .with("aria-controls", format!("{id}-answer"))
        .child(
            Element::new("span")
                .class("od-faq-question__text")
                .children(trusted(&item.question)),
        )
        .children(trusted(CHEVRON));

    let answer = Element::new("div")
        .class("od-faq-answer")
        .with("id", format!("{id}-answer"))
        .with("aria-hidden", (!expanded).to_string())
        .child(
            Element::new("div")
                .class("od-faq-answer__content")
                .children(trusted(&item.answer)),
        );

    Element::new("div")
        .class(class)
        .with("data-faq-id", id)
        .child(button)
        .child(answer)
}
