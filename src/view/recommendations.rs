use crate::models::{BeautyRecommendation, DisplayMode, LegacyRecommendation, Recommendations};

use super::{Element, Node};

pub const NO_RESULTS_MESSAGE: &str = "No recommendations found. Try different criteria.";

/// Unit shown when a beauty record carries no currency
const DEFAULT_CURRENCY: &str = "DA";
const MAX_TAGS: usize = 5;

/// Renders a result list into the nodes of the results area.
///
/// Records are shown in input order. `language` is accepted for parity with the
/// request but does not change the markup.
pub fn render_recommendations(recommendations: Option<&Recommendations>, _language: &str) -> Vec<Node> {
    let recommendations = match recommendations {
        Some(recs) if !recs.is_empty() => recs,
        _ => return vec![Element::new("div").class("no-results").text(NO_RESULTS_MESSAGE).into()],
    };

    let mut nodes = Vec::with_capacity(recommendations.len() + 1);
    nodes.push(header(recommendations));

    match recommendations {
        Recommendations::Beauty(records) => {
            nodes.extend(records.iter().enumerate().map(|(i, rec)| beauty_entry(i + 1, rec)))
        }
        Recommendations::Legacy(records) => {
            nodes.extend(records.iter().enumerate().map(|(i, rec)| legacy_entry(i + 1, rec)))
        }
    }

    nodes
}

/// Renders a failed request as the results area content
pub fn render_error(description: &str) -> Vec<Node> {
    vec![Element::new("div")
        .class("error")
        .text(format!("Error: {}", description))
        .into()]
}

fn header(recommendations: &Recommendations) -> Node {
    let label = match recommendations.mode() {
        DisplayMode::Beauty => "Beauty Product(s)",
        DisplayMode::Legacy => "Product(s)",
    };

    Element::new("div")
        .class("results-header")
        .child(Element::new("h3").text(format!("Found {} {}", recommendations.len(), label)))
        .into()
}

/// Text fields count as given only when non-empty
fn given(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}

fn entry_header(rank: usize, title: &str) -> Element {
    Element::new("div")
        .class("rec-header")
        .child(Element::new("span").class("rec-number").text(rank.to_string()))
        .child(Element::new("h4").class("rec-title").text(title))
}

fn price_block(price: String) -> Element {
    Element::new("div")
        .class("rec-price")
        .child(Element::new("span").class("price-label").text("Price:"))
        .child(Element::new("span").class("price-value").text(price))
}

fn reason_block(reason: Option<&str>) -> Element {
    Element::new("div")
        .class("rec-reason")
        .child(Element::new("span").class("reason-icon").text("💡"))
        .child(Element::new("span").class("reason-text").text(reason.unwrap_or_default()))
}

fn score_span(score: f64) -> Element {
    Element::new("span")
        .class("rec-score")
        .text(format!("Score: {:.3}", score))
}

fn beauty_entry(rank: usize, rec: &BeautyRecommendation) -> Node {
    let price = rec.price.as_ref().map(|price| {
        price_block(format!(
            "{} {}",
            price,
            given(&rec.currency).unwrap_or(DEFAULT_CURRENCY)
        ))
    });

    let category = given(&rec.category).map(|category| {
        let breadcrumb = match given(&rec.subcategory) {
            Some(sub) => format!("Category: {} › {}", category, sub),
            None => format!("Category: {}", category),
        };
        Element::new("div").class("rec-category").text(breadcrumb)
    });

    let description = given(&rec.description)
        .map(|description| Element::new("div").class("rec-description").text(description));

    let tags = (!rec.tags.is_empty()).then(|| {
        Element::new("div").class("rec-tags").children(
            rec.tags
                .iter()
                .take(MAX_TAGS)
                .map(|tag| Node::from(Element::new("span").class("tag").text(tag.as_str()))),
        )
    });

    let footer = Element::new("div")
        .class("rec-footer")
        .child(score_span(rec.score))
        .maybe_child(rec.id.as_ref().map(|id| {
            Element::new("span").class("rec-id").text(format!("ID: {}", id))
        }));

    let body = Element::new("div")
        .class("rec-body")
        .maybe_child(price)
        .maybe_child(category)
        .maybe_child(description)
        .child(reason_block(rec.reason.as_deref()))
        .maybe_child(tags)
        .child(footer);

    Element::new("div")
        .class("recommendation")
        .child(entry_header(rank, &rec.name))
        .child(body)
        .into()
}

fn legacy_entry(rank: usize, rec: &LegacyRecommendation) -> Node {
    let price = rec
        .price
        .as_ref()
        .filter(|price| !price.is_zero_or_empty())
        .map(|price| price_block(format!("{} {}", price, DEFAULT_CURRENCY)));

    let category = given(&rec.category)
        .map(|category| Element::new("div").class("rec-category").text(format!("Category: {}", category)));

    let footer = Element::new("div")
        .class("rec-footer")
        .child(score_span(rec.score))
        .maybe_child(rec.similarity.filter(|similarity| *similarity != 0.0).map(|similarity| {
            Element::new("span")
                .class("rec-similarity")
                .text(format!("Similarity: {:.3}", similarity))
        }));

    let body = Element::new("div")
        .class("rec-body")
        .maybe_child(price)
        .maybe_child(category)
        .child(reason_block(rec.reason.as_deref()))
        .child(footer);

    Element::new("div")
        .class("recommendation")
        .child(entry_header(rank, &rec.title))
        .child(body)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Scalar;
    use crate::view::fragment_to_html;
    use serde_json::json;

    fn beauty(records: Vec<serde_json::Value>) -> Recommendations {
        Recommendations::decode(DisplayMode::Beauty, records).unwrap()
    }

    fn legacy(records: Vec<serde_json::Value>) -> Recommendations {
        Recommendations::decode(DisplayMode::Legacy, records).unwrap()
    }

    #[test]
    fn test_empty_list_renders_only_notice() {
        let recs = beauty(vec![]);
        let nodes = render_recommendations(Some(&recs), "en");

        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].text_content(), NO_RESULTS_MESSAGE);
        assert!(nodes[0].find_by_class("results-header").is_empty());
        assert!(nodes[0].find_by_class("recommendation").is_empty());
    }

    #[test]
    fn test_absent_list_renders_only_notice() {
        let nodes = render_recommendations(None, "en");
        assert_eq!(nodes.len(), 1);
        assert!(fragment_to_html(&nodes).contains("no-results"));
    }

    #[test]
    fn test_beauty_record_defaults_currency() {
        let recs = beauty(vec![json!({
            "name": "Cream",
            "price": 500,
            "reason": "matches skin type",
            "score": 0.812,
            "id": "p1"
        })]);

        let html = fragment_to_html(&render_recommendations(Some(&recs), "en"));
        assert!(html.contains("Found 1 Beauty Product(s)"));
        assert!(html.contains("Cream"));
        assert!(html.contains("500 DA"));
        assert!(html.contains("matches skin type"));
        assert!(html.contains("0.812"));
        assert!(html.contains("ID: p1"));
    }

    #[test]
    fn test_beauty_record_full_layout() {
        let recs = beauty(vec![json!({
            "name": "Serum",
            "price": 12.5,
            "currency": "EUR",
            "category": "skin_care",
            "subcategory": "serum",
            "description": "Light and fast absorbing",
            "reason": "Addresses your concern",
            "tags": ["a", "b", "c", "d", "e", "f", "g"],
            "score": 0.9
        })]);

        let nodes = render_recommendations(Some(&recs), "en");
        let html = fragment_to_html(&nodes);
        assert!(html.contains("12.5 EUR"));
        assert!(html.contains("Category: skin_care › serum"));
        assert!(html.contains("Light and fast absorbing"));
        assert!(html.contains("Score: 0.900"));
        assert!(!html.contains("rec-id"));

        let tags = nodes[1].find_by_class("tag");
        assert_eq!(tags.len(), 5);
    }

    #[test]
    fn test_legacy_record_without_price() {
        let recs = legacy(vec![json!({
            "title": "Soap",
            "reason": "similar",
            "score": 0.5,
            "similarity": 0.77
        })]);

        let nodes = render_recommendations(Some(&recs), "en");
        let html = fragment_to_html(&nodes);
        assert!(html.contains("Found 1 Product(s)"));
        assert!(html.contains("Soap"));
        assert!(html.contains("0.500"));
        assert!(html.contains("0.770"));
        assert!(nodes[1].find_by_class("rec-price").is_empty());
    }

    #[test]
    fn test_legacy_record_with_price_and_category() {
        let recs = Recommendations::Legacy(vec![LegacyRecommendation {
            title: "Shampoo".to_string(),
            price: Some(Scalar::Number(800.0)),
            category: Some("hair_care".to_string()),
            reason: None,
            score: 0.25,
            similarity: None,
        }]);

        let nodes = render_recommendations(Some(&recs), "fr");
        let html = fragment_to_html(&nodes);
        assert!(html.contains("800 DA"));
        assert!(html.contains("Category: hair_care"));
        assert!(nodes[1].find_by_class("rec-similarity").is_empty());
    }

    #[test]
    fn test_order_is_preserved_regardless_of_score() {
        let recs = beauty(vec![
            json!({ "name": "First", "score": 0.1 }),
            json!({ "name": "Second", "score": 0.99 }),
            json!({ "name": "Third", "score": 0.5 }),
        ]);

        let nodes = render_recommendations(Some(&recs), "en");
        let titles: Vec<String> = nodes[1..]
            .iter()
            .flat_map(|node| node.find_by_class("rec-title"))
            .map(|title| Node::Element(title.clone()).text_content())
            .collect();
        assert_eq!(titles, vec!["First", "Second", "Third"]);

        let ranks: Vec<String> = nodes[1..]
            .iter()
            .flat_map(|node| node.find_by_class("rec-number"))
            .map(|rank| Node::Element(rank.clone()).text_content())
            .collect();
        assert_eq!(ranks, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_markup_in_records_is_escaped() {
        let recs = beauty(vec![json!({
            "name": "<script>alert(1)</script>",
            "reason": "\"quoted\" & <b>bold</b>",
            "score": 0.3
        })]);

        let html = fragment_to_html(&render_recommendations(Some(&recs), "en"));
        assert!(!html.contains("<script>"));
        assert!(!html.contains("<b>"));
        assert!(html.contains("&lt;script&gt;alert(1)"));
        assert!(html.contains("&quot;quoted&quot; &amp; &lt;b&gt;bold"));
    }

    #[test]
    fn test_language_does_not_change_markup() {
        let recs = beauty(vec![json!({ "name": "Cream", "score": 0.8 })]);
        assert_eq!(
            render_recommendations(Some(&recs), "en"),
            render_recommendations(Some(&recs), "ar")
        );
    }

    #[test]
    fn test_beauty_record_without_price_or_tags() {
        let recs = beauty(vec![json!({ "name": "Mask", "reason": "gentle", "score": 0.6, "tags": [] })]);

        let nodes = render_recommendations(Some(&recs), "en");
        assert!(nodes[1].find_by_class("rec-price").is_empty());
        assert!(nodes[1].find_by_class("rec-tags").is_empty());
        assert!(!fragment_to_html(&nodes).contains("Price:"));
        assert!(fragment_to_html(&nodes).contains("Score: 0.600"));
    }

    #[test]
    fn test_beauty_blank_text_fields_are_omitted() {
        let recs = beauty(vec![json!({
            "name": "Gel",
            "price": 300,
            "currency": "",
            "category": "",
            "subcategory": "",
            "description": "",
            "score": 0.4
        })]);

        let nodes = render_recommendations(Some(&recs), "en");
        assert!(nodes[1].find_by_class("rec-category").is_empty());
        assert!(nodes[1].find_by_class("rec-description").is_empty());
        assert!(fragment_to_html(&nodes).contains("300 DA"));
    }

    #[test]
    fn test_beauty_blank_subcategory_keeps_plain_category() {
        let recs = beauty(vec![json!({
            "name": "Gel",
            "category": "makeup",
            "subcategory": "",
            "score": 0.4
        })]);

        let html = fragment_to_html(&render_recommendations(Some(&recs), "en"));
        assert!(html.contains(r#"<div class="rec-category">Category: makeup</div>"#));
        assert!(!html.contains("›"));
    }

    #[test]
    fn test_legacy_zero_price_and_similarity_are_omitted() {
        let recs = legacy(vec![json!({
            "title": "Soap",
            "price": 0,
            "category": "",
            "reason": "similar",
            "score": 0.5,
            "similarity": 0
        })]);

        let nodes = render_recommendations(Some(&recs), "en");
        let html = fragment_to_html(&nodes);
        assert!(nodes[1].find_by_class("rec-price").is_empty());
        assert!(nodes[1].find_by_class("rec-category").is_empty());
        assert!(nodes[1].find_by_class("rec-similarity").is_empty());
        assert!(!html.contains("0 DA"));
        assert!(html.contains("Score: 0.500"));
    }

    #[test]
    fn test_render_error() {
        let html = fragment_to_html(&render_error("connection <refused>"));
        assert_eq!(html, r#"<div class="error">Error: connection &lt;refused&gt;</div>"#);
    }
}
