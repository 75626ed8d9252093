//! Prompt for structured property search

/// JSON shape the model must answer with
pub const FORMAT_INSTRUCTIONS: &str = r#"Respond with a single JSON object and nothing else. Schema:
{
  "matching_projects": [
    {
      "id": "string, the Property ID exactly as given in the data",
      "projectName": "string or null",
      "location": "string or null",
      "price": "string or null",
      "area": "string or null",
      "pincode": "string or null",
      "type": "string or null, e.g. 3BHK",
      "landmark": "string or null",
      "amenities": "string or null"
    }
  ],
  "unmatched_points": ["string, a query condition no retrieved property satisfies"],
  "explanation": "string, why these properties match or why none do",
  "min_price": "integer INR or null",
  "max_price": "integer INR or null",
  "sort_by": "\"price_asc\", \"price_desc\" or null"
}"#;

/// Build the search prompt from the assembled context and the user query
#[must_use]
pub fn build_search_prompt(context: &str, question: &str) -> String {
    format!(
        r#"You are a Real Estate Expert Assistant helping users find matching properties.

You will be given retrieved property data and a user query.

Instructions:
1. Identify the properties that satisfy every condition in the query
2. Answer strictly as JSON following the format instructions below
3. List query conditions that no property meets under `unmatched_points`
4. Use only the retrieved data; never invent properties or details
5. If nothing matches, leave `matching_projects` empty and explain why
6. Convert price constraints to whole INR amounts (1 lakh = 100000, 1 crore = 10000000):
   - "under 50 lakh" -> max_price: 5000000
   - "30-50 crore" -> min_price: 300000000, max_price: 500000000
7. Infer a sort preference:
   - "cheapest", "affordable", "budget", "lowest" -> sort_by: "price_asc"
   - "premium", "luxury", "expensive", "highest" -> sort_by: "price_desc"

---
Retrieved Property Data:
{context}

User Query:
{question}

{FORMAT_INSTRUCTIONS}
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_context_and_question() {
        let prompt = build_search_prompt("Property ID: P1\n3BHK", "3BHK under 1 crore");
        assert!(prompt.contains("Property ID: P1\n3BHK"));
        assert!(prompt.contains("User Query:\n3BHK under 1 crore"));
        assert!(prompt.contains("\"sort_by\""));
        assert!(prompt.find("Retrieved Property Data").unwrap() < prompt.find("User Query").unwrap());
    }
}
