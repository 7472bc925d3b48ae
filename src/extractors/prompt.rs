// src/extractors/prompt.rs
//! Prompt text and response schema for product extraction.
//!
//! Both are rendered from [`REPORT_FIELDS`] and [`RULES`] so the instructions
//! the model reads and the JSON shape it is held to cannot drift apart.

use serde::Deserialize;
use serde_json::{json, Map, Value};

pub const NO_PRODUCT_NAME: &str = "none";
pub const NO_PRODUCT_DESCRIPTION: &str = "No new products mentioned.";
pub const DESCRIPTION_LIMIT: usize = 180;

/// One field the model must return.
pub struct ReportField {
    /// JSON key in the reply.
    pub key: &'static str,
    /// How the field is asked for in the prompt.
    pub ask: &'static str,
    /// Title used in the schema.
    pub title: &'static str,
}

pub const REPORT_FIELDS: [ReportField; 3] = [
    ReportField {
        key: "date_of_report",
        ask: "Date of the report",
        title: "Date Of Report",
    },
    ReportField {
        key: "new_product",
        ask: "Name of new product mentioned",
        title: "New Product",
    },
    ReportField {
        key: "product_description",
        ask: "Description of the new product",
        title: "Product Description",
    },
];

/// Validated model reply. Field names mirror [`REPORT_FIELDS`] keys.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProductReport {
    pub date_of_report: String,
    pub new_product: String,
    pub product_description: String,
}

pub fn rules() -> Vec<String> {
    vec![
        format!(
            "The New Product Description MUST be summarized in {} characters or less.",
            DESCRIPTION_LIMIT
        ),
        "Generic product names such as 'New Product 1' or similar names are NOT considered new products. Only list products with specific names.".to_string(),
        "Acquiring another business or business unit is NOT considered a new product.".to_string(),
        format!(
            "If no new products are mentioned, output the following:\n   - New Product: {}\n   - Product Description: {}",
            NO_PRODUCT_NAME, NO_PRODUCT_DESCRIPTION
        ),
        "Senior notes due or common stock are NOT considered new products.".to_string(),
        "Do not provide reasoning, explanations, or your thinking in the output.".to_string(),
    ]
}

/// Full prompt for one filing document.
pub fn build_prompt(content: &str) -> String {
    let mut prompt =
        String::from("Read the following file content and provide the following details:\n");
    for field in &REPORT_FIELDS {
        prompt.push_str(&format!("- {}\n", field.ask));
    }
    prompt.push_str(&format!("\nContent:\n{}\n\nIMPORTANT RULES:\n", content));
    for (i, rule) in rules().iter().enumerate() {
        prompt.push_str(&format!("{}. {}\n", i + 1, rule));
    }
    prompt
}

/// JSON schema handed to the model as its output format.
pub fn response_schema() -> Value {
    let mut properties = Map::new();
    for field in &REPORT_FIELDS {
        properties.insert(
            field.key.to_string(),
            json!({ "title": field.title, "type": "string" }),
        );
    }
    let required: Vec<&str> = REPORT_FIELDS.iter().map(|f| f.key).collect();

    json!({
        "title": "DocumentOutput",
        "type": "object",
        "properties": properties,
        "required": required,
    })
}
