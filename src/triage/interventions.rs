// Therapeutic intervention scripts keyed by emotion category

use super::EmotionCategory;

/// Box breathing technique, offered for anxious messages.
pub const BREATHING_TECHNIQUE: &str = "Let's practice box breathing:

1. Breathe IN for 4 counts
2. HOLD for 4 counts
3. Breathe OUT for 4 counts
4. HOLD for 4 counts

Repeat this 4-5 times. This activates your body's relaxation response.";

/// Behavioral activation, offered for depressed messages.
pub const BEHAVIORAL_ACTIVATION: &str = "When we're depressed, we often stop doing things we enjoy. Let's gently change that:

1. Think of ONE small activity you used to enjoy
2. Can you do a tiny version of it today? (Even 5 minutes counts)
3. Notice how you feel before and after

Small actions can create positive momentum.";

/// 5-4-3-2-1 grounding technique, offered for stressed messages and as part
/// of the high-severity crisis response.
pub const GROUNDING_EXERCISE: &str = "Let's try a grounding exercise together:

Take a deep breath and notice:
\u{2022} 5 things you can SEE around you
\u{2022} 4 things you can TOUCH near you
\u{2022} 3 things you can HEAR right now
\u{2022} 2 things you can SMELL
\u{2022} 1 thing you can TASTE

This helps bring your attention back to the present moment.";

/// Intervention script for an emotion category, if one exists.
///
/// Pure lookup: only anxious, depressed, and stressed map to a script.
pub fn technique_for(category: EmotionCategory) -> Option<&'static str> {
    match category {
        EmotionCategory::Anxious => Some(BREATHING_TECHNIQUE),
        EmotionCategory::Depressed => Some(BEHAVIORAL_ACTIVATION),
        EmotionCategory::Stressed => Some(GROUNDING_EXERCISE),
        _ => None,
    }
}
