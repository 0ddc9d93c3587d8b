//! Prompt templates sent to the language model
//!
//! The ranking heuristics live entirely in these instructions; nothing is
//! scored locally.

use super::models::RankContext;

pub fn investor_keywords(description: &str) -> String {
    format!(
        "Given the following startup description: \"{description}\",\n\
         generate the most relevant LinkedIn search keywords to find investors interested in it.\n\
         Reply with exactly two short keywords separated by a comma and nothing else.\n\
         Example: Logistics, SaaS"
    )
}

pub fn competitor_keyword(description: &str) -> String {
    format!(
        "Given the following startup description: \"{description}\",\n\
         generate one keyword that can be used to filter on LinkedIn for similar companies, \
         in this format:\n\
         [\"Keyword\"]"
    )
}

pub fn investor_ranking(context: &RankContext<'_>, candidates_json: &str) -> String {
    format!(
        "Given the following company description:\n\
         \"{description}\"\n\n\
         And the list of potential investors:\n\
         {candidates_json}\n\n\
         Rank these investors based on how relevant they are for the company. Consider:\n\
         - Whether their title includes \"Investor\", \"Venture Capitalist\", or \"Angel Investor\".\n\
         - Their industry match with the company's description.\n\
         - Availability of contact details.\n\
         - Their location relevance to the company.\n\
         - If the profile URL contains \"_\", reduce its relevance score.\n\
         - If the name is \"LinkedIn Member\", do not include it in the response.\n\
         - People with a real name come before anyone without one.\n\n\
         Return a valid JSON array where each object has:\n\
         - \"name\": the investor's name\n\
         - \"title\": their title\n\
         - \"location\": their location\n\
         - \"profile_url\": the profile_url given above, unchanged\n\
         - \"relevance_score\": a number between 0 and 100 (higher is more relevant)\n\n\
         Output ONLY the JSON array, without any extra text.",
        description = context.description,
    )
}

pub fn competitor_ranking(context: &RankContext<'_>, candidates_json: &str) -> String {
    let size_line = context
        .size
        .map(|size| format!("Company size: {}\n", size))
        .unwrap_or_default();

    format!(
        "Given the following company description:\n\
         \"{description}\"\n\
         {size_line}\n\
         And the list of potential competitor companies:\n\
         {candidates_json}\n\n\
         Rank these companies by how similar they are to the first company. Consider:\n\
         - Similarity in industry and business model.\n\
         - Company size match.\n\
         - Overlapping target market and customers.\n\n\
         Return ONLY a valid JSON array, without explanation or markdown.\n\
         Each object must have:\n\
         - \"name\": the company's name\n\
         - \"industry\": the company's industry\n\
         - \"size\": the company's size\n\
         - \"profile_url\": the profile_url given above, unchanged\n\
         - \"similarity_score\": a number between 0 and 100 (higher is more similar)\n\n\
         Arrange the objects in descending order of similarity_score.",
        description = context.description,
    )
}
