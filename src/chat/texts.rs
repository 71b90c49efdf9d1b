// Fixed prompt and message texts used by the composer

/// System instruction passed to the generator on every call.
pub const SYSTEM_PROMPT: &str = "You are a compassionate and professional mental health support assistant. Your role is to:

1. Provide empathetic, non-judgmental support
2. Listen actively and validate feelings
3. Offer evidence-based coping strategies
4. Recognize crisis situations and provide appropriate resources
5. Encourage professional help when needed
6. Maintain boundaries and clarify you're not a replacement for professional therapy

Guidelines:
- Always validate emotions before offering solutions
- Use person-first language
- Be warm but maintain professional boundaries
- Never diagnose or prescribe medications
- Encourage professional help for serious concerns
- Focus on strengths and resilience
- Provide practical, actionable suggestions
- Check in on safety when concerning statements are made

Remember: You're a support tool, not a therapist. Always encourage professional help when appropriate.";

/// Substituted for the generated text when the generator call fails.
pub const FALLBACK_REPLY: &str =
    "I'm here to listen and support you. Could you tell me more about what you're experiencing?";

/// Appended after moderate- and high-severity replies (never low, never
/// critical).
pub const SAFETY_CHECK_IN: &str =
    "How are you feeling right now? Is there anything specific I can help you with?";

/// Literal 4-step safety plan included in critical-severity replies.
pub const SAFETY_PLAN: &str = "**Safety Plan:**
1. Remove any means of self-harm from your immediate area
2. Call one of the helplines above or go to your nearest emergency room
3. Stay with someone you trust or ask someone to stay with you
4. Focus on getting through the next hour, then the next";

/// Returned by `start_session`.
pub const WELCOME_MESSAGE: &str = "Hello! I'm here to provide emotional support and help you navigate whatever you're going through.

This is a safe, confidential space where you can express yourself freely. I'm not a replacement for professional therapy, but I'm here to listen, support, and provide coping strategies.

How are you feeling today? What brings you here?";

/// Returned by `end_session`.
pub const CLOSING_MESSAGE: &str = "Thank you for sharing with me today. Remember:

\u{2022} Your feelings are valid
\u{2022} Healing is not linear
\u{2022} It's okay to ask for help
\u{2022} You've shown strength by reaching out

**Ongoing Support Resources:**
\u{2022} National Mental Health Helpline: 1800-599-0019
\u{2022} iCALL: 9152987821
\u{2022} Vandrevala Foundation: 1860 2662 345

**Self-Care Reminders:**
\u{2022} Practice self-compassion
\u{2022} Maintain regular sleep schedule
\u{2022} Stay connected with supportive people
\u{2022} Engage in activities you enjoy
\u{2022} Consider professional therapy if needed

Take care of yourself. You matter.";
