//! Heuristic quality score for extracted page text.

use std::collections::HashSet;

const MIN_GOOD_LEN: usize = 100;
const MAX_GOOD_LEN: usize = 1500;
const MIN_SENTENCE_BREAKS: usize = 3;
const MIN_DIVERSITY: f64 = 0.5;
const MAX_BOILERPLATE_RATIO: f64 = 0.05;

const BOILERPLATE_WORDS: &[&str] = &[
    "cookie",
    "cookies",
    "privacy",
    "subscribe",
    "newsletter",
    "login",
    "sign",
    "menu",
    "copyright",
    "rights",
    "reserved",
    "share",
    "follow",
    "advertisement",
];

/// Score text on a 0.0..=4.0 scale. Higher reads more like body copy.
///
/// One point each for a length in the sweet spot (half a point when
/// longer), at least three sentence breaks, vocabulary diversity above 0.5
/// and a boilerplate-word ratio under 5%.
pub fn quality_score(text: &str) -> f64 {
    let text = text.trim();
    if text.is_empty() {
        return 0.0;
    }

    let mut score = 0.0;

    let len = text.chars().count();
    if (MIN_GOOD_LEN..=MAX_GOOD_LEN).contains(&len) {
        score += 1.0;
    } else if len > MAX_GOOD_LEN {
        score += 0.5;
    }

    let breaks = text.matches(['.', '!', '?']).count();
    if breaks >= MIN_SENTENCE_BREAKS {
        score += 1.0;
    }

    let words: Vec<String> = text
        .split_whitespace()
        .map(|w| {
            w.trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .filter(|w| !w.is_empty())
        .collect();
    if words.is_empty() {
        return score;
    }

    let unique: HashSet<&str> = words.iter().map(String::as_str).collect();
    if unique.len() as f64 / words.len() as f64 > MIN_DIVERSITY {
        score += 1.0;
    }

    let boilerplate = words
        .iter()
        .filter(|w| BOILERPLATE_WORDS.contains(&w.as_str()))
        .count();
    if (boilerplate as f64 / words.len() as f64) < MAX_BOILERPLATE_RATIO {
        score += 1.0;
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_scores_zero() {
        assert_eq!(quality_score(""), 0.0);
        assert_eq!(quality_score("   "), 0.0);
    }

    #[test]
    fn test_article_copy_scores_full_marks() {
        let text = "We publish practical essays about remote engineering teams. \
                    Contributors share lessons from shipping real products. \
                    Pitches should include an outline and two writing samples. \
                    Our editors reply within a week.";
        assert_eq!(quality_score(text), 4.0);
    }

    #[test]
    fn test_boilerplate_scores_lower_than_copy() {
        let chrome = "Menu Login Sign up Subscribe Newsletter Cookie Privacy Share Follow \
                      Menu Login Sign up Subscribe Newsletter Cookie Privacy Share Follow";
        let copy = "Editors review each pitch carefully. Accepted posts run on Tuesdays. \
                    Authors keep the copyright to their drafts. We pay on publication.";
        assert!(quality_score(copy) > quality_score(chrome));
    }

    #[test]
    fn test_overlong_text_gets_half_point() {
        let text = "word ".repeat(400);
        // half a point for length plus the boilerplate point
        assert_eq!(quality_score(&text), 1.5);
    }
}
