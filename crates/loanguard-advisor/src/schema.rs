//! Response schemas declared on structured requests. The model is told the
//! exact shape to produce, which is what lets the boundary parse its output
//! directly into the contract types.

use serde_json::{json, Value};

pub fn analysis_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "summary": { "type": "STRING" },
            "hiddenFees": { "type": "ARRAY", "items": { "type": "STRING" } },
            "risks": { "type": "ARRAY", "items": { "type": "STRING" } },
            "jargonExplained": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "term": { "type": "STRING" },
                        "explanation": { "type": "STRING" }
                    },
                    "required": ["term", "explanation"]
                }
            },
            "savingsTips": { "type": "ARRAY", "items": { "type": "STRING" } },
            "riskLevel": { "type": "STRING", "enum": ["LOW", "MEDIUM", "HIGH"] },
            "negotiationScript": { "type": "STRING" }
        },
        "required": [
            "summary", "hiddenFees", "risks", "jargonExplained",
            "savingsTips", "riskLevel", "negotiationScript"
        ]
    })
}

pub fn comparison_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "winner": {
                "type": "STRING",
                "description": "Name or number of the best offer."
            },
            "mathematicalAnalysis": {
                "type": "STRING",
                "description": "Detailed calculation of the cost differences."
            },
            "offerSummaries": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING" },
                        "totalCost": { "type": "STRING" },
                        "rrso": { "type": "STRING" },
                        "pros": { "type": "ARRAY", "items": { "type": "STRING" } },
                        "cons": { "type": "ARRAY", "items": { "type": "STRING" } }
                    },
                    "required": ["title", "totalCost", "rrso", "pros", "cons"]
                }
            },
            "finalVerdict": {
                "type": "STRING",
                "description": "Final recommendation for the client."
            }
        },
        "required": ["winner", "mathematicalAnalysis", "offerSummaries", "finalVerdict"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_schema_requires_every_contract_field() {
        let schema = analysis_response_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(required.len(), 7);
        for field in [
            "summary",
            "hiddenFees",
            "risks",
            "jargonExplained",
            "savingsTips",
            "riskLevel",
            "negotiationScript",
        ] {
            assert!(required.contains(&field), "missing {field}");
        }
        assert_eq!(
            schema["properties"]["riskLevel"]["enum"],
            json!(["LOW", "MEDIUM", "HIGH"])
        );
    }

    #[test]
    fn test_comparison_schema_shape() {
        let schema = comparison_response_schema();
        assert_eq!(schema["type"], "OBJECT");
        let item = &schema["properties"]["offerSummaries"]["items"];
        assert_eq!(item["required"].as_array().unwrap().len(), 5);
        assert_eq!(item["properties"]["rrso"]["type"], "STRING");
    }
}
