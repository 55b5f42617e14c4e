//! Static OpenAI price table used to estimate completion cost.
//!
//! Prices are US dollars per thousand tokens. Dated snapshots
//! (`gpt-4-0613`) resolve to their family entry through the longest
//! matching prefix; models without an entry cost nothing.

use super::TokenUsage;

struct ModelPrice {
    model: &'static str,
    prompt_per_1k: f64,
    completion_per_1k: f64,
}

const PRICES: &[ModelPrice] = &[
    ModelPrice {
        model: "gpt-4o-mini",
        prompt_per_1k: 0.000_15,
        completion_per_1k: 0.000_6,
    },
    ModelPrice {
        model: "gpt-4o",
        prompt_per_1k: 0.0025,
        completion_per_1k: 0.01,
    },
    ModelPrice {
        model: "gpt-4-turbo",
        prompt_per_1k: 0.01,
        completion_per_1k: 0.03,
    },
    ModelPrice {
        model: "gpt-4-32k",
        prompt_per_1k: 0.06,
        completion_per_1k: 0.12,
    },
    ModelPrice {
        model: "gpt-4",
        prompt_per_1k: 0.03,
        completion_per_1k: 0.06,
    },
    ModelPrice {
        model: "gpt-3.5-turbo-16k",
        prompt_per_1k: 0.003,
        completion_per_1k: 0.004,
    },
    ModelPrice {
        model: "gpt-3.5-turbo",
        prompt_per_1k: 0.0015,
        completion_per_1k: 0.002,
    },
];

fn price_for(model: &str) -> Option<&'static ModelPrice> {
    PRICES
        .iter()
        .filter(|price| {
            model == price.model
                || model
                    .strip_prefix(price.model)
                    .is_some_and(|rest| rest.starts_with('-'))
        })
        .max_by_key(|price| price.model.len())
}

/// Estimated cost in US dollars of a completion served by `model`.
pub fn completion_cost(model: &str, usage: &TokenUsage) -> f64 {
    price_for(model).map_or(0.0, |price| {
        (usage.prompt as f64 * price.prompt_per_1k
            + usage.completion as f64 * price.completion_per_1k)
            / 1000.0
    })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn usage(prompt: i64, completion: i64) -> TokenUsage {
        TokenUsage {
            prompt,
            completion,
            total: prompt + completion,
        }
    }

    #[rstest]
    #[case::exact("gpt-4", 0.03, 0.06)]
    #[case::dated_snapshot("gpt-4-0613", 0.03, 0.06)]
    #[case::longer_family_wins("gpt-4-32k-0613", 0.06, 0.12)]
    #[case::omni_is_not_gpt_4("gpt-4o-2024-05-13", 0.0025, 0.01)]
    #[case::mini("gpt-4o-mini", 0.000_15, 0.000_6)]
    #[case::turbo("gpt-3.5-turbo-0125", 0.0015, 0.002)]
    fn prices_by_longest_family(#[case] model: &str, #[case] prompt: f64, #[case] completion: f64) {
        let cost = completion_cost(model, &usage(1000, 1000));
        assert!(
            (cost - (prompt + completion)).abs() < 1e-12,
            "{model}: {cost}"
        );
    }

    #[test]
    fn unknown_models_are_free() {
        assert_eq!(completion_cost("llama-3", &usage(500, 500)), 0.0);
    }

    #[test]
    fn prompt_and_completion_are_priced_separately() {
        let cost = completion_cost("gpt-3.5-turbo", &usage(10, 5));
        assert!((cost - 0.000_025).abs() < 1e-15, "{cost}");
    }
}
