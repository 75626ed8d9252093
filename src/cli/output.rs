//! CLI output formatting utilities

use crate::models::SearchResponse;
use crate::rag::Candidate;

/// Truncate at a character boundary, appending "..." when cut
#[must_use]
pub fn truncate_str(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let truncated: String = s.chars().take(max_chars).collect();
        format!("{truncated}...")
    } else {
        s.to_string()
    }
}

/// Print retrieval hits, best first
pub fn print_candidates(query: &str, candidates: &[Candidate]) {
    println!("🔍 Vector search: {query}");
    println!("{:-<60}", "");

    if candidates.is_empty() {
        println!("No listings found.");
        return;
    }

    for candidate in candidates {
        let preview = truncate_str(&candidate.page_content.replace('\n', " "), 100);
        println!(
            "{:>2}. {} (score {:.3})\n    {}",
            candidate.rank, candidate.property_id, candidate.score, preview
        );
    }
}

/// Print a structured search answer
pub fn print_search_response(response: &SearchResponse) {
    println!("🏠 {} matching properties", response.total_results);
    println!("{:-<60}", "");

    for (idx, m) in response.matching_projects.iter().enumerate() {
        println!(
            "{}. {} [{}]",
            idx + 1,
            m.project_name.as_deref().unwrap_or("Unnamed project"),
            m.id
        );
        if let Some(location) = &m.location {
            println!("   📍 {location}");
        }
        println!(
            "   💰 {}  🛏  {}",
            m.price.as_deref().unwrap_or("price on request"),
            m.property_type.as_deref().unwrap_or("-")
        );
    }

    if !response.unmatched_points.is_empty() {
        println!("\nNot satisfied:");
        for point in &response.unmatched_points {
            println!("  - {point}");
        }
    }

    let bounds = match (response.min_price, response.max_price) {
        (None, None) => None,
        (min, max) => Some(format!(
            "{} - {}",
            min.map_or_else(|| "any".to_string(), |v| v.to_string()),
            max.map_or_else(|| "any".to_string(), |v| v.to_string())
        )),
    };
    if let Some(bounds) = bounds {
        println!("\nPrice filter (INR): {bounds}");
    }
    if let Some(sort) = response.sort_by {
        println!("Sorted by: {}", sort.as_str());
    }

    println!("\n{}", response.explanation);
    println!(
        "\n({} of {} retrieved listings matched)",
        response.total_results, response.total_retrieved
    );
}

pub fn print_info(msg: &str) {
    println!("ℹ️  {msg}");
}

pub fn print_success(msg: &str) {
    println!("✅ {msg}");
}

pub fn print_warning(msg: &str) {
    println!("⚠️  {msg}");
}
