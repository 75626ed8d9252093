//! Final response assembly from the model answer and the filtered records

use std::collections::HashMap;
use std::collections::HashSet;

use crate::models::CandidateSummary;
use crate::models::Property;
use crate::models::PropertyMatch;
use crate::models::SearchResponse;
use crate::models::StructuredAnswer;
use crate::rag::Candidate;

/// Build the search response.
///
/// Only matches that were retrieved and survived the relational filter are
/// kept, each id once. With a sort key the matches follow the order of
/// `survivors`, otherwise the model's order. Price and type come from the
/// stored record; `explanation` and `unmatched_points` pass through as is.
#[must_use]
pub fn assemble_response(
    answer: StructuredAnswer,
    candidates: &[Candidate],
    survivors: &[Property],
) -> SearchResponse {
    let retrieved: HashSet<&str> = candidates.iter().map(|c| c.property_id.as_str()).collect();
    let survivor_position: HashMap<&str, (usize, &Property)> = survivors
        .iter()
        .enumerate()
        .map(|(idx, p)| (p.unique_property_id.as_str(), (idx, p)))
        .collect();

    let mut seen = HashSet::new();
    let mut matches: Vec<(usize, PropertyMatch)> = answer
        .matching_projects
        .into_iter()
        .filter_map(|mut m| {
            let (position, record) = *survivor_position.get(m.id.as_str())?;
            if !retrieved.contains(m.id.as_str()) || !seen.insert(m.id.clone()) {
                return None;
            }
            m.price = record.price.map(|p| p.to_string());
            m.property_type.clone_from(&record.property_type);
            Some((position, m))
        })
        .collect();

    if answer.sort_by.is_some() {
        matches.sort_by_key(|(position, _)| *position);
    }

    let matching_projects: Vec<PropertyMatch> = matches.into_iter().map(|(_, m)| m).collect();

    SearchResponse {
        total_results: matching_projects.len(),
        matching_projects,
        unmatched_points: answer.unmatched_points,
        explanation: answer.explanation,
        min_price: answer.min_price,
        max_price: answer.max_price,
        sort_by: answer.sort_by,
        total_retrieved: candidates.len(),
        retrieved_candidates: candidates
            .iter()
            .map(|c| CandidateSummary {
                rank: c.rank,
                property_id: c.property_id.clone(),
                score: c.score,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_support::property;
    use crate::models::SortOrder;

    fn candidate(rank: usize, id: &str) -> Candidate {
        Candidate {
            rank,
            property_id: id.to_string(),
            page_content: String::new(),
            metadata: serde_json::Map::new(),
            score: 1.0 / rank as f32,
        }
    }

    fn matched(id: &str) -> PropertyMatch {
        PropertyMatch {
            id: id.to_string(),
            project_name: None,
            location: None,
            price: Some("about 1 crore".to_string()),
            area: None,
            pincode: None,
            property_type: None,
            landmark: None,
            amenities: None,
        }
    }

    fn answer(ids: &[&str], sort_by: Option<SortOrder>) -> StructuredAnswer {
        StructuredAnswer {
            matching_projects: ids.iter().map(|id| matched(id)).collect(),
            unmatched_points: vec!["sea view".to_string()],
            explanation: "model reasoning".to_string(),
            min_price: None,
            max_price: Some(10_000_000),
            sort_by,
        }
    }

    fn ids(response: &SearchResponse) -> Vec<&str> {
        response
            .matching_projects
            .iter()
            .map(|m| m.id.as_str())
            .collect()
    }

    #[test]
    fn test_keeps_only_retrieved_survivors_once() {
        let candidates = vec![candidate(1, "A"), candidate(2, "B"), candidate(3, "C")];
        let survivors = vec![
            property("A", "3BHK", Some(9_000_000)),
            property("B", "3BHK", Some(8_000_000)),
            property("Z", "3BHK", Some(1)),
        ];

        let response = assemble_response(
            answer(&["B", "A", "B", "C", "Z"], None),
            &candidates,
            &survivors,
        );

        assert_eq!(ids(&response), vec!["B", "A"]);
        assert_eq!(response.total_results, 2);
        assert_eq!(response.total_retrieved, 3);
        assert!(response.total_results <= response.total_retrieved);
        assert_eq!(response.explanation, "model reasoning");
        assert_eq!(response.unmatched_points, vec!["sea view"]);
    }

    #[test]
    fn test_sorted_follows_survivor_order() {
        let candidates = vec![candidate(1, "A"), candidate(2, "B"), candidate(3, "C")];
        // Survivors arrive ordered by price ascending
        let survivors = vec![
            property("C", "3BHK", Some(100)),
            property("A", "3BHK", Some(200)),
            property("B", "3BHK", Some(300)),
        ];

        let response = assemble_response(
            answer(&["A", "B", "C"], Some(SortOrder::PriceAsc)),
            &candidates,
            &survivors,
        );
        assert_eq!(ids(&response), vec!["C", "A", "B"]);
    }

    #[test]
    fn test_price_and_type_come_from_record() {
        let candidates = vec![candidate(1, "A")];
        let survivors = vec![property("A", "3BHK", Some(9_500_000))];

        let response = assemble_response(answer(&["A"], None), &candidates, &survivors);
        let only = &response.matching_projects[0];
        assert_eq!(only.price.as_deref(), Some("9500000"));
        assert_eq!(only.property_type.as_deref(), Some("3BHK"));
    }

    #[test]
    fn test_candidates_are_summarized() {
        let candidates = vec![candidate(1, "A"), candidate(2, "B")];
        let response = assemble_response(answer(&[], None), &candidates, &[]);

        assert!(response.matching_projects.is_empty());
        assert_eq!(response.total_results, 0);
        assert_eq!(response.retrieved_candidates.len(), 2);
        assert_eq!(response.retrieved_candidates[1].rank, 2);
        assert_eq!(response.retrieved_candidates[1].property_id, "B");
    }
}
