//! Prompt construction for label analysis and follow-up chat.
//!
//! The bold markers below are read back by [`super::parser`]; changing one
//! side without the other breaks parsing.

use crate::domain::{
    conversation::entities::{ChatRole, ChatTurn},
    label_analysis::entities::{LabelAnalysis, Recommendation},
};

pub const RECOMMENDATION_MARKER: &str = "**RECOMMENDATION:**";
pub const HEALTH_SCORE_MARKER: &str = "**HEALTH SCORE:**";
pub const DETAILED_ANALYSIS_MARKER: &str = "**DETAILED ANALYSIS:**";
pub const PRACTICAL_ADVICE_MARKER: &str = "**PRACTICAL ADVICE:**";
pub const SUMMARY_MARKER: &str = "**SUMMARY:**";
pub const TITLE_MARKER: &str = "**TITLE**";

pub const NO_TEXT_PLACEHOLDER: &str = "No text extracted";
pub const NO_INGREDIENTS_PLACEHOLDER: &str = "No ingredients section found";
pub const NO_NUTRITION_PLACEHOLDER: &str = "No nutrition information found";
pub const NOT_VISIBLE_PLACEHOLDER: &str = "Not clearly visible";

/// Fallback sentence requested from the model on the first answer of a conversation.
pub const FIRST_RESPONSE_OFF_TOPIC_REPLY: &str =
    "I'm here to answer health and nutrition questions about this product.";

/// Fallback sentence requested from the model once a conversation is under way.
pub const CONTINUATION_OFF_TOPIC_REPLY: &str =
    "I can only help with health and nutrition questions about this product.";

const SCORING_RUBRIC: &str = "\
- 9-10: Excellent. Clean ingredients, balanced nutrition, minimal processing.
- 7-8: Good. Minor concerns but generally healthy.
- 5-6: Average. Processed or sugary, eat occasionally.
- 3-4: Poor. Several concerns, eat rarely.
- 1-2: Unhealthy. Avoid due to serious nutritional issues.";

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    let value = value.trim();
    if value.is_empty() { placeholder } else { value }
}

/// Builds the prompt for a first-time label assessment.
pub fn build_analysis_prompt(extracted: &str, ingredients: &str, nutrition: &str) -> String {
    let extracted = or_placeholder(extracted, NO_TEXT_PLACEHOLDER);
    let ingredients = or_placeholder(ingredients, NO_INGREDIENTS_PLACEHOLDER);
    let nutrition = or_placeholder(nutrition, NO_NUTRITION_PLACEHOLDER);

    format!(
        "You are a certified nutritionist and food safety expert. Assess the food label below \
and give a clear health verdict with practical advice for an ordinary shopper.

Before anything else, write a short {TITLE_MARKER} of 3 to 8 words naming the product or its \
main concern. The title is for internal use only and is not part of your answer.

---

EXTRACTED TEXT:
{extracted}

INGREDIENTS:
{ingredients}

NUTRITION INFORMATION:
{nutrition}

---

Answer using exactly this layout:

{RECOMMENDATION_MARKER} [EAT / AVOID / MODERATE]

{HEALTH_SCORE_MARKER} [1-10]

{DETAILED_ANALYSIS_MARKER}
- **Ingredients:** quality of the ingredients, additives, preservatives, allergens, natural versus artificial.
- **Nutrition:** calories, sugar, fats, sodium, protein, fiber, vitamins and minerals.
- **Concerns:** any red flags such as high sugar or sodium, trans fats, allergens or heavy processing.

{PRACTICAL_ADVICE_MARKER} concrete, everyday guidance, for example how much and how often \
it is reasonable to eat, and who should avoid it.

{SUMMARY_MARKER} one sentence stating the overall verdict and the main reason for it.

---

Score the product with this rubric:
{SCORING_RUBRIC}
"
    )
}

/// Builds the prompt for one follow-up question.
///
/// `history` must already be trimmed to the turns that should be shown; it
/// is rendered in the order given.
pub fn build_chat_prompt(analysis: &LabelAnalysis, history: &[ChatTurn], question: &str) -> String {
    let mut prompt = String::from(
        "You are a nutritionist helping someone understand a food label they scanned.\n\n",
    );

    let extracted = analysis.extracted_text.trim();
    if !extracted.is_empty() {
        prompt.push_str(&format!("EXTRACTED TEXT:\n{extracted}\n\n"));
    }

    prompt.push_str(&format!(
        "INGREDIENTS:\n{}\n\n",
        or_placeholder(&analysis.ingredients_text, NOT_VISIBLE_PLACEHOLDER)
    ));
    prompt.push_str(&format!(
        "NUTRITION INFORMATION:\n{}\n\n",
        or_placeholder(&analysis.nutrition_text, NOT_VISIBLE_PLACEHOLDER)
    ));

    // A failed analysis has no narrative, only the error it recorded.
    let has_narrative = analysis.recommendation != Recommendation::Error
        && !analysis.raw_response.trim().is_empty();
    if has_narrative {
        prompt.push_str(&format!(
            "PREVIOUS ANALYSIS:\n{}\n\n",
            analysis.raw_response
        ));
    }

    if !history.is_empty() {
        prompt.push_str("CONVERSATION SO FAR:\n");
        for turn in history {
            let speaker = match turn.role {
                ChatRole::User => "User",
                ChatRole::Assistant => "Assistant",
            };
            prompt.push_str(&format!("{speaker}: {}\n", turn.content));
        }
        prompt.push('\n');
    }

    prompt.push_str(&format!("USER QUESTION:\n{}\n\n", question.trim()));
    prompt.push_str(&chat_instructions(history.is_empty()));

    prompt
}

fn chat_instructions(first_response: bool) -> String {
    let mut instructions = String::from(
        "INSTRUCTIONS:\n\
- Answer only questions about health, nutrition or the ingredients of this product.\n\
- Base your answer on the label information and the previous analysis above.\n\
- Keep the answer short and practical.\n",
    );

    if first_response {
        instructions.push_str(&format!(
            "- Start your reply with one line of the form `{TITLE_MARKER}: <3-6 word title for this conversation>`, \
followed by a line containing only `---`, then your answer.\n\
- If the question is about anything else, reply exactly: \"{FIRST_RESPONSE_OFF_TOPIC_REPLY}\"\n"
        ));
    } else {
        instructions.push_str(&format!(
            "- Do not add a title.\n\
- If the question is about anything else, reply exactly: \"{CONTINUATION_OFF_TOPIC_REPLY}\"\n"
        ));
    }

    instructions
}
