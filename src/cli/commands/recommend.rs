//! Recommend command handler

use super::{fail, open_store};
use rand::rngs::StdRng;
use rand::SeedableRng;
use studypath::config::Config;
use studypath::core::recommender::{recommend, Limit, RecommendationResponse};

/// Compute and print recommendations for `user`
pub fn run(user: &str, limit: Option<Limit>, json: bool, seed: Option<u64>, config: &Config) {
    let store = open_store(config);
    let options = config.recommend_options(limit);
    let mut rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);

    let response =
        recommend(&store, user, &options, &mut rng).unwrap_or_else(|e| fail(&e.to_string()));

    if json {
        match serde_json::to_string_pretty(&response) {
            Ok(out) => println!("{out}"),
            Err(e) => fail(&format!("Failed to serialize response: {e}")),
        }
    } else {
        print_listing(&response);
    }
}

fn print_listing(response: &RecommendationResponse) {
    let stats = &response.user_stats;
    println!(
        "\n{} ({} modules, {} credits completed)\n",
        response.message, stats.completed_modules, stats.completed_credits
    );
    for (rank, rec) in response.recommendations.iter().enumerate() {
        println!(
            "{:>2}. [{:>3}] {} {} ({} CP, {})",
            rank + 1,
            rec.relevance_score,
            rec.module_code,
            rec.name,
            rec.credits,
            rec.category
        );
        println!("         {}", rec.recommendation_reason);
    }
}
