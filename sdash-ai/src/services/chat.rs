//! Response assistant
//!
//! Scripted replies that suggest how to answer the analysed feedback. Each
//! reply is a pure function of the user message and the current results.

use regex::Regex;
use sdash_common::{AnalysisSummary, Sentiment, SentimentResult};
use std::fmt::Write;
use std::sync::OnceLock;

/// Longest excerpt of a text quoted back in a reply
const EXCERPT_CHARS: usize = 100;

pub const WELCOME: &str = "Hi! I'm your sentiment analysis assistant. I can help you craft \
appropriate responses based on the sentiment analysis results. Try asking me about specific \
texts or how to respond to different sentiments!";

const HELP: &str = "I can help you with response suggestions! Try asking me:\n\
• 'How should I respond to text 1?'\n\
• 'What about the negative feedback?'\n\
• 'Give me a summary of all sentiments'\n\
• 'How to respond to positive comments?'";

/// Example questions offered next to the chat input
pub const SUGGESTED_QUESTIONS: [&str; 4] = [
    "How should I respond to negative feedback?",
    "Give me a summary of all sentiments",
    "What about the positive comments?",
    "How to respond to text 1?",
];

fn text_reference() -> &'static Regex {
    static TEXT_REFERENCE: OnceLock<Regex> = OnceLock::new();
    TEXT_REFERENCE.get_or_init(|| Regex::new(r"text\s*(\d+)").expect("text reference pattern is valid"))
}

/// Reply to one user message
pub fn reply(message: &str, results: &[SentimentResult]) -> String {
    let lower = message.to_lowercase();

    if let Some(result) = referenced_result(&lower, results) {
        return suggest_for_result(result);
    }

    let count = |sentiment: Sentiment| results.iter().filter(|r| r.sentiment == sentiment).count();

    if lower.contains("positive") || lower.contains("good") {
        let positive = count(Sentiment::Positive);
        if positive > 0 {
            return format!(
                "Great! I found {} positive sentiment(s). For positive feedback, consider responses like: \
\"Thank you for your positive feedback!\", \"We're delighted to hear this!\", or \
\"Your satisfaction means everything to us!\"",
                positive
            );
        }
    }

    if lower.contains("negative") || lower.contains("bad") {
        let negative = count(Sentiment::Negative);
        if negative > 0 {
            return format!(
                "I found {} negative sentiment(s). For negative feedback, try: \
\"We sincerely apologize for your experience\", \"Thank you for bringing this to our attention\", \
or \"We're committed to making this right for you.\"",
                negative
            );
        }
    }

    if lower.contains("neutral") {
        let neutral = count(Sentiment::Neutral);
        if neutral > 0 {
            return format!(
                "There are {} neutral sentiment(s). For neutral feedback, consider: \
\"Thank you for your feedback\", \"We appreciate you taking the time to share\", or \
\"Is there anything specific we can help you with?\"",
                neutral
            );
        }
    }

    if lower.contains("how to respond") || lower.contains("what to say") {
        return strategy_overview(results);
    }

    if lower.contains("summary") || lower.contains("overview") {
        return summary(results);
    }

    HELP.to_string()
}

/// 1-based "text N" reference, when N names an existing result
fn referenced_result<'a>(lower: &str, results: &'a [SentimentResult]) -> Option<&'a SentimentResult> {
    let number: usize = text_reference().captures(lower)?.get(1)?.as_str().parse().ok()?;
    results.get(number.checked_sub(1)?)
}

fn excerpt(text: &str) -> String {
    if text.chars().count() > EXCERPT_CHARS {
        let head: String = text.chars().take(EXCERPT_CHARS).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

fn suggest_for_result(result: &SentimentResult) -> String {
    let mut out = format!(
        "For the text: \"{}\"\n\nSentiment: {} ({:.1}% confidence)\n\n",
        excerpt(&result.text),
        result.sentiment,
        result.confidence * 100.0
    );
    let top_keywords = result
        .keywords
        .iter()
        .take(3)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");

    match result.sentiment {
        Sentiment::Positive => {
            out.push_str("Suggested responses:\n");
            out.push_str("• 'Thank you so much for your wonderful feedback!'\n");
            out.push_str("• 'We're thrilled to hear about your positive experience!'\n");
            out.push_str("• 'Your kind words truly make our day!'");
            if !result.keywords.is_empty() {
                let _ = write!(out, "\n\nKey terms to acknowledge: {}", top_keywords);
            }
        }
        Sentiment::Negative => {
            out.push_str("Suggested responses:\n");
            out.push_str("• 'We sincerely apologize for your disappointing experience.'\n");
            out.push_str("• 'Thank you for bringing this to our attention. We take this seriously.'\n");
            out.push_str("• 'We'd like to make this right. Please let us know how we can help.'");
            if !result.keywords.is_empty() {
                let _ = write!(out, "\n\nAddress these concerns: {}", top_keywords);
            }
        }
        Sentiment::Neutral => {
            out.push_str("Suggested responses:\n");
            out.push_str("• 'Thank you for taking the time to share your feedback.'\n");
            out.push_str("• 'We appreciate your input and will consider it carefully.'\n");
            out.push_str("• 'Is there anything specific we can help you with?'");
        }
    }
    out
}

fn strategy_overview(results: &[SentimentResult]) -> String {
    let summary = AnalysisSummary::from_results(results);
    let distribution = summary.sentiment_distribution;
    let mut out = String::from("Response Strategy Overview:\n\n");

    if distribution.positive > 0 {
        let _ = writeln!(out, "{} Positive feedback(s):", distribution.positive);
        out.push_str("• Express gratitude and appreciation\n");
        out.push_str("• Share the feedback with your team\n");
        out.push_str("• Encourage continued engagement\n\n");
    }
    if distribution.negative > 0 {
        let _ = writeln!(out, "{} Negative feedback(s):", distribution.negative);
        out.push_str("• Acknowledge the issue promptly\n");
        out.push_str("• Apologize sincerely and take responsibility\n");
        out.push_str("• Offer concrete solutions or next steps\n\n");
    }
    if distribution.neutral > 0 {
        let _ = writeln!(out, "{} Neutral feedback(s):", distribution.neutral);
        out.push_str("• Thank them for their time\n");
        out.push_str("• Ask clarifying questions if needed\n");
        out.push_str("• Provide additional helpful information\n\n");
    }

    out.push_str("Pro tip: Always respond within 24 hours and personalize your responses!");
    out
}

fn summary(results: &[SentimentResult]) -> String {
    if results.is_empty() {
        return "There are no analysis results yet. Analyze some texts first and ask me again."
            .to_string();
    }

    let summary = AnalysisSummary::from_results(results);
    let distribution = summary.sentiment_distribution;
    let mut out = format!("Analysis Summary ({} texts):\n\n", summary.total_texts);
    for sentiment in [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral] {
        let _ = writeln!(
            out,
            "• {}: {} ({:.1}%)",
            title_case(sentiment),
            distribution.count(sentiment),
            summary.percentage(sentiment)
        );
    }
    let _ = writeln!(out, "• Average Confidence: {:.1}%\n", summary.average_confidence * 100.0);

    if distribution.positive > distribution.negative {
        out.push_str("Overall sentiment is positive! Focus on:\n");
        out.push_str("• Thanking customers for positive feedback\n");
        out.push_str("• Sharing success stories with your team\n");
    } else if distribution.negative > distribution.positive {
        out.push_str("More negative feedback detected. Priority actions:\n");
        out.push_str("• Address negative feedback immediately\n");
        out.push_str("• Identify common issues and fix them\n");
    } else {
        out.push_str("Mixed sentiment detected. Balanced approach:\n");
        out.push_str("• Celebrate the positives\n");
        out.push_str("• Address the negatives promptly\n");
    }
    out
}

fn title_case(sentiment: Sentiment) -> &'static str {
    match sentiment {
        Sentiment::Positive => "Positive",
        Sentiment::Negative => "Negative",
        Sentiment::Neutral => "Neutral",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::LexiconClassifier;

    fn results(texts: &[&str]) -> Vec<SentimentResult> {
        let texts: Vec<String> = texts.iter().map(|s| s.to_string()).collect();
        LexiconClassifier::default().classify_batch(&texts)
    }

    #[test]
    fn test_text_reference_quotes_result() {
        let results = results(&["The staff were rude", "Lovely room"]);
        let answer = reply("How should I respond to Text 1?", &results);
        assert!(answer.starts_with("For the text: \"The staff were rude\""));
        assert!(answer.contains("Sentiment: NEGATIVE ("));
        assert!(answer.contains("Address these concerns: rude, staff"));
    }

    #[test]
    fn test_out_of_range_reference_falls_through() {
        let results = results(&["Lovely room"]);
        assert_eq!(reply("text 7 please", &results), HELP);
        assert_eq!(reply("text 0", &results), HELP);
    }

    #[test]
    fn test_long_text_is_excerpted() {
        let long = "good ".repeat(40);
        let results = results(&[long.as_str()]);
        let answer = reply("text1", &results);
        let quoted = format!("For the text: \"{}...\"", &long[..100]);
        assert!(answer.starts_with(&quoted));
    }

    #[test]
    fn test_positive_question_counts_positive_results() {
        let results = results(&["great", "awesome", "terrible"]);
        assert!(reply("What about the positive comments?", &results)
            .starts_with("Great! I found 2 positive sentiment(s)."));
    }

    #[test]
    fn test_negative_question_without_negatives_gets_help() {
        let results = results(&["great"]);
        assert_eq!(reply("anything negative?", &results), HELP);
    }

    #[test]
    fn test_strategy_overview_lists_present_classes() {
        let results = results(&["great", "the table"]);
        let answer = reply("how to respond to these?", &results);
        assert!(answer.contains("1 Positive feedback(s):"));
        assert!(answer.contains("1 Neutral feedback(s):"));
        assert!(!answer.contains("Negative feedback(s)"));
        assert!(answer.ends_with("personalize your responses!"));
    }

    #[test]
    fn test_summary() {
        let results = results(&["great", "awful", "terrible", "a chair"]);
        let answer = reply("Give me a summary", &results);
        assert!(answer.starts_with("Analysis Summary (4 texts):"));
        assert!(answer.contains("• Positive: 1 (25.0%)"));
        assert!(answer.contains("• Negative: 2 (50.0%)"));
        assert!(answer.contains("More negative feedback detected."));
    }

    #[test]
    fn test_summary_without_results() {
        assert!(reply("overview", &[]).starts_with("There are no analysis results yet."));
    }
}
